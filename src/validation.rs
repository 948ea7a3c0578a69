use crate::config::DISPOSABLE_DOMAINS;
use crate::models::LeadInput;

/// Validates a lead before it enters the processing pipeline.
///
/// Pure function, no I/O. Checks run in a fixed order and short-circuit on
/// the first failure; the returned reason string is part of the observable
/// contract (it is logged and persisted verbatim on the rejected record):
///
/// 1. `BranchID` must be composed entirely of digits.
/// 2. At least one of `Email`/`Phone` must be present.
/// 3. A present `Phone` must be a valid Israeli mobile number
///    (exactly 10 digits, starting with "05").
/// 4. `FirstName` and `LastName` must both be non-empty.
/// 5. A present `Email` must have exactly one "@", a domain containing ".",
///    and a domain outside the disposable-domain denylist.
pub fn validate_lead(lead: &LeadInput) -> Result<(), &'static str> {
    if lead.branch_id.is_empty() || !lead.branch_id.chars().all(|c| c.is_ascii_digit()) {
        return Err("BranchID must be numeric");
    }

    if lead.email.is_empty() && lead.phone.is_empty() {
        return Err("Invalid email + no phone");
    }

    if !lead.phone.is_empty() && !is_israeli_mobile(&lead.phone) {
        return Err("Invalid Israeli phone number");
    }

    if lead.first_name.is_empty() || lead.last_name.is_empty() {
        return Err("Missing name");
    }

    if !lead.email.is_empty() {
        let mut parts = lead.email.splitn(3, '@');
        let (_local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return Err("Invalid email format"),
        };
        if !domain.contains('.') {
            return Err("Invalid email format");
        }
        let domain = domain.to_lowercase();
        if DISPOSABLE_DOMAINS.contains(&domain.as_str()) {
            return Err("Disposable email not allowed");
        }
    }

    Ok(())
}

fn is_israeli_mobile(phone: &str) -> bool {
    phone.len() == 10 && phone.starts_with("05") && phone.chars().all(|c| c.is_ascii_digit())
}
