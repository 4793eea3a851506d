//! Grievance lifecycle - filing and status transitions.
//!
//! The workflow is deliberately permissive: administrators may move freely
//! among the non-terminal states, and `closed` is terminal by convention
//! rather than enforcement. What the machine does enforce is who may
//! transition, and what data each transition must carry.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{GrievanceError, Result};
use crate::types::{
    AuthorProfile, Grievance, GrievanceDraft, GrievancePatch, GrievanceStatus, NewGrievance,
    Principal,
};

/// Outcome of a successful transition.
///
/// `updated` is the full record as the caller should now see it; `patch` is
/// the partial-field update the store must commit. Either the whole patch is
/// committed or none of it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    /// The grievance with the transition applied
    pub updated: Grievance,
    /// Partial fields for the store's update-one call
    pub patch: GrievancePatch,
}

/// Validate a draft and produce the insert payload for a new grievance.
///
/// Only a restricted principal may file, and only on their own behalf; the
/// department is snapshotted from the filer's profile. Title and description
/// must be non-empty after trimming.
pub fn file_grievance(
    principal: &Principal,
    profile: &AuthorProfile,
    draft: GrievanceDraft,
) -> Result<NewGrievance> {
    if principal.is_privileged() {
        warn!(principal = %principal.id, "privileged principal attempted to file a grievance");
        return Err(GrievanceError::Forbidden(
            "grievances are filed by employees on their own behalf".to_string(),
        ));
    }
    if profile.id != principal.id {
        return Err(GrievanceError::Forbidden(
            "grievances are filed by employees on their own behalf".to_string(),
        ));
    }

    let title = draft.title.trim();
    if title.is_empty() {
        return Err(GrievanceError::InvalidInput("title must not be empty".to_string()));
    }
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(GrievanceError::InvalidInput(
            "description must not be empty".to_string(),
        ));
    }

    debug!(
        employee = %principal.id,
        category = %draft.category.as_str(),
        priority = %draft.priority.as_str(),
        "grievance draft validated"
    );

    Ok(NewGrievance {
        employee_id: principal.id.clone(),
        title: title.to_string(),
        description: description.to_string(),
        category: draft.category,
        priority: draft.priority,
        department: profile.department.clone(),
        status: GrievanceStatus::Submitted,
    })
}

/// Validate and apply a status transition.
///
/// Only privileged principals transition. A transition into `resolved` or
/// `closed` must carry non-empty resolution text; `resolved_at` is stamped
/// only the first time the grievance reaches such a state, so the first
/// resolution time survives a later re-close. Transitions among the
/// non-terminal states leave any prior resolution untouched.
pub fn apply_transition(
    principal: &Principal,
    grievance: &Grievance,
    new_status: GrievanceStatus,
    resolution_text: Option<&str>,
) -> Result<TransitionOutcome> {
    if !principal.is_privileged() {
        warn!(
            principal = %principal.id,
            grievance = %grievance.id,
            "restricted principal attempted a status transition"
        );
        return Err(GrievanceError::Forbidden(
            "only administrative staff may update grievance status".to_string(),
        ));
    }

    let mut updated = grievance.clone();
    updated.status = new_status;

    let patch = if new_status.requires_resolution() {
        let resolution = resolution_text.map(str::trim).unwrap_or_default();
        if resolution.is_empty() {
            return Err(GrievanceError::InvalidInput(format!(
                "a transition to {} requires resolution text",
                new_status.as_str()
            )));
        }

        updated.resolution = Some(resolution.to_string());
        // First resolution time is retained across re-close.
        let stamp = if grievance.resolved_at.is_none() {
            let now = Utc::now();
            updated.resolved_at = Some(now);
            Some(now)
        } else {
            None
        };

        GrievancePatch {
            status: new_status,
            resolution: Some(resolution.to_string()),
            resolved_at: stamp,
        }
    } else {
        // Reopening leaves resolution and resolved_at in place.
        GrievancePatch {
            status: new_status,
            resolution: None,
            resolved_at: None,
        }
    };

    debug!(
        grievance = %grievance.id,
        from = %grievance.status.as_str(),
        to = %new_status.as_str(),
        by = %principal.id,
        "status transition applied"
    );

    Ok(TransitionOutcome { updated, patch })
}
