use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dealer_leads_api::config::Config;
use dealer_leads_api::enrichment_client::EnrichmentClient;
use dealer_leads_api::event_log::EventLog;
use dealer_leads_api::handlers::{self, AppState};
use dealer_leads_api::reference_data::ReferenceData;
use dealer_leads_api::storage::LeadStore;

/// Main entry point for the application.
///
/// Initializes tracing, configuration, the event log, the reference data
/// snapshot, the lead store and the enrichment client, then starts the Axum
/// server with the intake and query routes.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dealer_leads_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Structured pipeline event log, initialized once per process
    let events = Arc::new(EventLog::open(&config.event_log_file)?);
    tracing::info!("Event log opened at {}", config.event_log_file);

    // Load reference data once into an immutable handle
    let reference = Arc::new(ReferenceData::load(
        &config.branch_file,
        &config.car_file,
        &events,
    ));
    tracing::info!(
        "Reference data loaded: {} branch(es), {} car model(s)",
        reference.branch_count(),
        reference.car_model_count()
    );

    // Processed-lead store (single JSON document, serialized appends)
    let store = Arc::new(LeadStore::new(
        &config.processed_file,
        &config.dead_letter_file,
    )?);
    tracing::info!("Lead store ready at {}", config.processed_file);

    // Enrichment service client with its hard per-call timeout
    let enricher = EnrichmentClient::new(&config)
        .map_err(|e| anyhow::anyhow!("failed to initialize enrichment client: {}", e))?;
    tracing::info!(
        "Enrichment client initialized: {}",
        config.enrichment_base_url
    );

    let port = config.port;
    let app_state = Arc::new(AppState {
        config,
        reference,
        store,
        events,
        enricher,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        .route("/api/leads", post(handlers::receive_leads))
        .route("/api/leads/processed", get(handlers::list_processed_leads))
        .layer(
            ServiceBuilder::new()
                // Request size limit: 5MB max payload
                .layer(RequestBodyLimitLayer::new(5 * 1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check bypassing rate limiting
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
