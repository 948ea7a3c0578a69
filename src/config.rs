use serde::Deserialize;

/// Email domains known to hand out throwaway addresses. Leads with one of
/// these as the email domain are rejected at validation.
pub const DISPOSABLE_DOMAINS: [&str; 5] = [
    "mailinator.com",
    "10minutemail.com",
    "dispostable.com",
    "tempmail.com",
    "yopmail.com",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Base URL of the external enrichment service.
    pub enrichment_base_url: String,
    /// Hard timeout for the single best-effort enrichment call.
    pub enrichment_timeout_secs: u64,
    pub data_dir: String,
    pub log_dir: String,
    pub processed_file: String,
    pub dead_letter_file: String,
    pub branch_file: String,
    pub car_file: String,
    pub event_log_file: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?;

        let enrichment_base_url = std::env::var("MOCK_API_URL")
            .unwrap_or_else(|_| "http://mock-api:8001".to_string());
        if !enrichment_base_url.starts_with("http://")
            && !enrichment_base_url.starts_with("https://")
        {
            anyhow::bail!("MOCK_API_URL must start with http:// or https://");
        }

        let enrichment_timeout_secs = std::env::var("ENRICHMENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("ENRICHMENT_TIMEOUT_SECS must be a positive integer"))?;

        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let config = Self {
            port,
            enrichment_base_url,
            enrichment_timeout_secs,
            processed_file: format!("{}/processed_leads.json", data_dir),
            dead_letter_file: format!("{}/dead_letter.jsonl", data_dir),
            branch_file: format!("{}/branch_config.csv", data_dir),
            car_file: format!("{}/car_models.txt", data_dir),
            event_log_file: format!("{}/leads.log", log_dir),
            data_dir,
            log_dir,
        };

        // Log successful configuration load
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Enrichment base URL: {}", config.enrichment_base_url);
        tracing::debug!("Enrichment timeout: {}s", config.enrichment_timeout_secs);
        tracing::debug!("Data directory: {}", config.data_dir);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
