use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============ Intake Models ============

/// A prospective customer's inquiry as submitted by the dealership website.
///
/// Field names on the wire match the intake contract (`BranchID`, `WorkerCode`, ...).
/// A lead is immutable once received; it is consumed by exactly one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeadInput {
    /// Dealership branch the lead was captured at. Must be a numeric string.
    #[serde(rename = "BranchID")]
    pub branch_id: String,
    /// Salesperson code the website attached to the lead, may be empty.
    pub worker_code: String,
    /// Model key of the car the customer asked about.
    pub asked_car: String,
    pub first_name: String,
    pub last_name: String,
    /// At least one of `Email`/`Phone` must be present for the lead to validate.
    pub email: String,
    /// Israeli mobile number: exactly 10 digits starting with "05", or empty.
    pub phone: String,
    pub from_web_site: String,
    /// Area code used for geographic enrichment.
    pub area: String,
}

// ============ Reference Data Models ============

/// A dealership location with its assigned manager and region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub manager: String,
    pub region: String,
}

/// A car model entry from the static catalog. Individual fields may be
/// missing when the source block omits the labeled line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarModel {
    pub model_name: Option<String>,
    pub category: Option<String>,
    pub price_range: Option<String>,
    pub availability: Option<String>,
}

// ============ Enrichment Models ============

/// Wire envelope returned by the enrichment service.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichApiResponse {
    pub enriched: bool,
    #[serde(default)]
    pub data: Option<EnrichmentData>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Supplementary data fetched from the enrichment service.
///
/// Every part is independently nullable; the service only returns the
/// sections it could compute. `lead_priority` is the *service-side* priority
/// and is distinct from the routing tier this pipeline computes itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentData {
    #[serde(default)]
    pub geographic: Option<Geographic>,
    #[serde(default)]
    pub email_insights: Option<EmailInsights>,
    #[serde(default)]
    pub phone_insights: Option<PhoneInsights>,
    #[serde(default)]
    pub customer_profile: Option<CustomerProfile>,
    #[serde(default)]
    pub lead_priority: Option<String>,
    #[serde(default)]
    pub enriched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geographic {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub population: Option<String>,
    #[serde(default)]
    pub market_potential: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailInsights {
    #[serde(default)]
    pub customer_type: Option<String>,
    #[serde(default)]
    pub trust_level: Option<String>,
    #[serde(default)]
    pub business_email: bool,
    #[serde(default)]
    pub company_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneInsights {
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(default)]
    pub likely_first_time_buyer: Option<bool>,
    #[serde(default)]
    pub interest_level: Option<String>,
    #[serde(default)]
    pub recommended_contact_time: Option<String>,
}

// ============ Output Models ============

/// Routing tier computed from the lead's own score. Not the same notion as
/// the enrichment service's `lead_priority`, even though both use the same
/// three names; both are persisted side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Processed,
    Rejected,
}

/// Branch details attached to the persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchInfo {
    pub branch_id: String,
    pub name: String,
    pub manager: String,
    pub region: String,
}

/// Car details attached to the persisted record. `model_id` is always the
/// key the customer asked for; the remaining fields are null on catalog miss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarInfo {
    pub model_id: String,
    pub model_name: Option<String>,
    pub category: Option<String>,
    pub price_range: Option<String>,
    pub availability: Option<String>,
}

/// Subset of the enrichment payload that is persisted with the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentSnapshot {
    pub geographic: Option<Geographic>,
    pub email_insights: Option<EmailInsights>,
    pub phone_insights: Option<PhoneInsights>,
    pub lead_priority: Option<String>,
}

/// The append-only output of a pipeline run. Never mutated after write.
///
/// Rejected leads carry only `original_lead`, `status` and `reason`; fully
/// processed leads carry the complete set of stage outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedLeadRecord {
    pub lead_id: Uuid,
    pub original_lead: LeadInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_info: Option<BranchInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_info: Option<CarInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub status: LeadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub processed_at: DateTime<Utc>,
}
