//! The visibility filter - the sole access-control gate.
//!
//! Every grievance must pass through here before reaching a caller,
//! including before aggregation or search. Visibility is all-or-nothing per
//! record; no partial-field redaction exists.

use crate::error::{GrievanceError, Result};
use crate::types::{Grievance, Principal};

/// Whether a principal may see a grievance.
///
/// Privileged principals see every record; restricted principals see only
/// records they own.
pub fn visible(principal: &Principal, grievance: &Grievance) -> bool {
    principal.is_privileged() || grievance.employee_id == principal.id
}

/// Keep only the records the principal may see.
///
/// Pure function of its inputs: relative ordering is preserved and the
/// returned sequence is fresh.
pub fn filter_visible(principal: &Principal, records: &[Grievance]) -> Vec<Grievance> {
    records
        .iter()
        .filter(|g| visible(principal, g))
        .cloned()
        .collect()
}

/// Fail closed with `Forbidden` when the principal may not see the record.
///
/// Callers use this so "not permitted" stays distinguishable from
/// "no data".
pub fn require_visible(principal: &Principal, grievance: &Grievance) -> Result<()> {
    if visible(principal, grievance) {
        Ok(())
    } else {
        Err(GrievanceError::Forbidden(format!(
            "principal {} may not access grievance {}",
            principal.id, grievance.id
        )))
    }
}
