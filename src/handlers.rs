use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use uuid::Uuid;

use crate::config::Config;
use crate::enrichment_client::EnrichmentClient;
use crate::errors::{AppError, ResultExt};
use crate::event_log::EventLog;
use crate::models::{LeadInput, ProcessedLeadRecord};
use crate::pipeline;
use crate::reference_data::ReferenceData;
use crate::storage::LeadStore;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Immutable reference data handle (branches, car models).
    pub reference: Arc<ReferenceData>,
    /// Append-only store of processed lead records.
    pub store: Arc<LeadStore>,
    /// Structured pipeline event log.
    pub events: Arc<EventLog>,
    /// Client for the external enrichment service.
    pub enricher: EnrichmentClient,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "dealer-leads-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/leads
///
/// Batch intake. Schedules one detached pipeline run per lead and responds
/// immediately with a count acknowledgment; no per-lead result is returned
/// synchronously. Outcomes are observable through the event log and the
/// persisted store.
pub async fn receive_leads(
    State(state): State<Arc<AppState>>,
    Json(leads): Json<Vec<LeadInput>>,
) -> Json<serde_json::Value> {
    let count = leads.len();
    tracing::info!("POST /api/leads - received batch of {} lead(s)", count);

    for lead in leads {
        let lead_id = Uuid::new_v4();
        let state = state.clone();
        tokio::spawn(async move {
            pipeline::process_lead(state, lead_id, lead).await;
        });
    }

    Json(json!({ "message": format!("{} lead(s) received", count) }))
}

/// GET /api/leads/processed
///
/// Returns the full ordered sequence of persisted records. This is the
/// result-query counterpart to the fire-and-forget intake.
pub async fn list_processed_leads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProcessedLeadRecord>>, AppError> {
    let records = state
        .store
        .read_all()
        .await
        .context("failed to read processed leads store")?;

    Ok(Json(records))
}
