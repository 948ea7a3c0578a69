//! Per-lead processing pipeline.
//!
//! Each lead runs through a fully sequential state machine:
//! `received -> validated|rejected -> enriched -> scored -> routed -> persisted`.
//! Every stage component converts its own faults into data-level outcomes
//! (rejection reason, fallback branch, null car info, absent enrichment), so
//! the orchestrator has no error branch beyond the validation rejection path
//! and the explicit persistence dead-letter handling.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::handlers::AppState;
use crate::models::{
    BranchInfo, CarInfo, EnrichmentSnapshot, LeadInput, LeadStatus, ProcessedLeadRecord,
};
use crate::routing::assign_lead;
use crate::scoring::calculate_score;
use crate::validation::validate_lead;

/// Runs the full pipeline for one lead. Spawned as an independent background
/// task per lead; there is no cross-lead coordination.
pub async fn process_lead(state: Arc<AppState>, lead_id: Uuid, lead: LeadInput) {
    let events = &state.events;
    events.received(lead_id, &lead);

    if let Err(reason) = validate_lead(&lead) {
        events.rejected(lead_id, &lead, reason);
        let record = ProcessedLeadRecord {
            lead_id,
            original_lead: lead,
            branch_info: None,
            car_info: None,
            enrichment: None,
            score: None,
            priority: None,
            assigned_to: None,
            status: LeadStatus::Rejected,
            reason: Some(reason.to_string()),
            processed_at: Utc::now(),
        };
        persist(&state, &record).await;
        return;
    }

    let branch = state.reference.branch(&lead.branch_id).clone();
    let car = state.reference.car_model(&lead.asked_car).cloned();
    let enrichment = state.enricher.enrich(lead_id, &lead, events).await;

    let score = calculate_score(car.as_ref(), enrichment.as_ref());
    let (priority, assigned_to) = assign_lead(score, &branch.manager, &lead.worker_code);

    let record = ProcessedLeadRecord {
        lead_id,
        branch_info: Some(BranchInfo {
            branch_id: lead.branch_id.clone(),
            name: branch.name,
            manager: branch.manager,
            region: branch.region,
        }),
        car_info: Some(CarInfo {
            model_id: lead.asked_car.clone(),
            model_name: car.as_ref().and_then(|c| c.model_name.clone()),
            category: car.as_ref().and_then(|c| c.category.clone()),
            price_range: car.as_ref().and_then(|c| c.price_range.clone()),
            availability: car.as_ref().and_then(|c| c.availability.clone()),
        }),
        enrichment: Some(EnrichmentSnapshot {
            geographic: enrichment.as_ref().and_then(|e| e.geographic.clone()),
            email_insights: enrichment.as_ref().and_then(|e| e.email_insights.clone()),
            phone_insights: enrichment.as_ref().and_then(|e| e.phone_insights.clone()),
            lead_priority: enrichment.as_ref().and_then(|e| e.lead_priority.clone()),
        }),
        score: Some(score),
        priority: Some(priority),
        assigned_to: Some(assigned_to.clone()),
        status: LeadStatus::Processed,
        reason: None,
        original_lead: lead,
        processed_at: Utc::now(),
    };

    events.processed(lead_id, &record.original_lead, score, priority);
    if persist(&state, &record).await {
        events.done(lead_id, &record.original_lead, score, priority, &assigned_to);
    }
}

/// Appends the record to the store. A persistence failure is surfaced as a
/// `persistence_failed` event and the record goes to the dead-letter file.
async fn persist(state: &AppState, record: &ProcessedLeadRecord) -> bool {
    match state.store.append(record).await {
        Ok(()) => true,
        Err(e) => {
            state
                .events
                .persistence_failed(record.lead_id, &record.original_lead, &e.to_string());
            state.store.dead_letter(record).await;
            false
        }
    }
}
