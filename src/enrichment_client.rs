use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::event_log::EventLog;
use crate::models::{EnrichApiResponse, EnrichmentData, LeadInput};

/// Client for the external lead enrichment service.
///
/// Issues a single best-effort call per lead, bounded by a hard timeout.
/// Any failure (timeout, transport error, non-success status, "no data"
/// response) degrades to absent enrichment; nothing escalates past this
/// boundary, so the orchestrator never sees enrichment as a hard error.
#[derive(Clone)]
pub struct EnrichmentClient {
    client: Client,
    base_url: String,
}

impl EnrichmentClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.enrichment_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create enrichment client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.enrichment_base_url.clone(),
        })
    }

    /// Enriches a lead with geographic and customer insights.
    ///
    /// Returns `None` when no enrichment is available, after emitting an
    /// `enrichment_failed` event with the reason.
    pub async fn enrich(
        &self,
        lead_id: Uuid,
        lead: &LeadInput,
        events: &EventLog,
    ) -> Option<EnrichmentData> {
        match self.call_enrich(lead).await {
            Ok(body) => {
                if !body.enriched || body.data.is_none() {
                    let reason = body
                        .error
                        .unwrap_or_else(|| "no enrichment data available".to_string());
                    events.enrichment_failed(lead_id, lead, &reason);
                    return None;
                }
                body.data
            }
            Err(e) => {
                events.enrichment_failed(lead_id, lead, &e.to_string());
                None
            }
        }
    }

    async fn call_enrich(&self, lead: &LeadInput) -> Result<EnrichApiResponse, AppError> {
        let url = format!("{}/api/enrich", self.base_url);
        tracing::debug!("Calling enrichment service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "email": lead.email,
                "phone": lead.phone,
                "area": lead.area,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApiError(format!(
                "Enrichment service returned status {}",
                status
            )));
        }

        let body: EnrichApiResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse enrichment response: {}", e))
        })?;

        Ok(body)
    }
}
