use crate::models::{CarModel, EnrichmentData};

/// Upper bound on any lead score.
pub const MAX_SCORE: u8 = 100;

/// Computes a lead's quality score from car metadata and enrichment data.
///
/// Additive point model with independent contributions, clamped to
/// [`MAX_SCORE`]. Absent car or enrichment simply contributes nothing for
/// its terms. Pure and deterministic.
///
/// - enrichment lead_priority: High +40, Medium +20
/// - email trust_level High: +20
/// - phone verified: +20
/// - car category: Luxury +20, Electric +15 (mutually exclusive)
/// - car availability "In Stock": +10
pub fn calculate_score(car: Option<&CarModel>, enrichment: Option<&EnrichmentData>) -> u8 {
    let mut score: u32 = 0;

    if let Some(enrichment) = enrichment {
        match enrichment.lead_priority.as_deref() {
            Some("High") => score += 40,
            Some("Medium") => score += 20,
            _ => {}
        }
        if enrichment
            .email_insights
            .as_ref()
            .is_some_and(|insights| insights.trust_level.as_deref() == Some("High"))
        {
            score += 20;
        }
        if enrichment
            .phone_insights
            .as_ref()
            .is_some_and(|insights| insights.verified)
        {
            score += 20;
        }
    }

    if let Some(car) = car {
        match car.category.as_deref() {
            Some("Luxury") => score += 20,
            Some("Electric") => score += 15,
            _ => {}
        }
        if car.availability.as_deref() == Some("In Stock") {
            score += 10;
        }
    }

    score.min(MAX_SCORE as u32) as u8
}
