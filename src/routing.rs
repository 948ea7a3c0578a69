use crate::models::Priority;

/// Scores at or above this value route as High priority.
pub const HIGH_THRESHOLD: u8 = 70;
/// Scores at or above this value (and below [`HIGH_THRESHOLD`]) route as Medium.
pub const MEDIUM_THRESHOLD: u8 = 40;

/// Maps a lead's computed score to a routing tier and a concrete assignee.
///
/// High-tier leads go straight to the branch manager. Medium and Low tiers
/// go to the salesperson named on the lead, falling back to the manager when
/// no worker code was supplied, so a lead is never left unassigned.
/// Deterministic given its three inputs; the tier here is computed from the
/// pipeline's own score, independent of the enrichment-side `lead_priority`.
pub fn assign_lead(score: u8, branch_manager: &str, worker_code: &str) -> (Priority, String) {
    let priority = if score >= HIGH_THRESHOLD {
        Priority::High
    } else if score >= MEDIUM_THRESHOLD {
        Priority::Medium
    } else {
        Priority::Low
    };

    let assigned_to = match priority {
        Priority::High => branch_manager.to_string(),
        Priority::Medium | Priority::Low => {
            if worker_code.is_empty() {
                branch_manager.to_string()
            } else {
                worker_code.to_string()
            }
        }
    };

    (priority, assigned_to)
}
