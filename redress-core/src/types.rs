//! Core types for the grievance domain.
//!
//! Field names on persisted types match the storage schema verbatim so any
//! storage adapter stays compatible with existing data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GrievanceError;

/// Role assigned to an account at provisioning time.
///
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular employee - files and tracks their own grievances
    Employee,
    /// Administrative staff - full triage rights
    Admin,
    /// Human resources staff - full triage rights
    Hr,
}

impl Role {
    /// Classify this role into its capability tier.
    ///
    /// This is the single place the privileged/restricted split is computed;
    /// access decisions must go through it rather than matching on roles.
    pub fn capability(&self) -> Capability {
        match self {
            Role::Admin | Role::Hr => Capability::Privileged,
            Role::Employee => Capability::Restricted,
        }
    }

    /// Get string representation as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Admin => "admin",
            Role::Hr => "hr",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Employee
    }
}

/// Capability tier derived from a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Sees every grievance and may drive lifecycle transitions
    Privileged,
    /// Sees only their own grievances
    Restricted,
}

/// The authenticated actor performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account identifier
    pub id: String,
    /// Role at session start
    pub role: Role,
}

impl Principal {
    /// Create a new principal.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Capability tier for this principal.
    pub fn capability(&self) -> Capability {
        self.role.capability()
    }

    /// Whether this principal holds the privileged tier.
    pub fn is_privileged(&self) -> bool {
        self.capability() == Capability::Privileged
    }
}

/// Denormalized profile fields attached at read time by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// Account identifier (what `Grievance::employee_id` references)
    pub id: String,
    /// Display name
    pub full_name: String,
    /// Staff badge number, distinct from the account id
    pub employee_id: String,
    /// Department at provisioning time
    pub department: String,
    /// Role at provisioning time
    pub role: Role,
}

/// Workflow status of a grievance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceStatus {
    /// Initial state after filing
    Submitted,
    /// Picked up by administrative staff
    UnderReview,
    /// Under active investigation
    Investigating,
    /// Resolved with a recorded resolution
    Resolved,
    /// Closed - terminal but retained
    Closed,
}

impl GrievanceStatus {
    /// Whether a transition into this status must carry resolution text.
    pub fn requires_resolution(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Get string representation as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// All statuses in workflow order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Submitted,
            Self::UnderReview,
            Self::Investigating,
            Self::Resolved,
            Self::Closed,
        ]
    }
}

impl FromStr for GrievanceStatus {
    type Err = GrievanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "investigating" => Ok(Self::Investigating),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(GrievanceError::InvalidStatus(other.to_string())),
        }
    }
}

/// Category a grievance is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceCategory {
    Harassment,
    Discrimination,
    WorkplaceSafety,
    Compensation,
    Workload,
    Management,
    Other,
}

impl GrievanceCategory {
    /// Get string representation as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Harassment => "harassment",
            Self::Discrimination => "discrimination",
            Self::WorkplaceSafety => "workplace_safety",
            Self::Compensation => "compensation",
            Self::Workload => "workload",
            Self::Management => "management",
            Self::Other => "other",
        }
    }
}

impl FromStr for GrievanceCategory {
    type Err = GrievanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "harassment" => Ok(Self::Harassment),
            "discrimination" => Ok(Self::Discrimination),
            "workplace_safety" => Ok(Self::WorkplaceSafety),
            "compensation" => Ok(Self::Compensation),
            "workload" => Ok(Self::Workload),
            "management" => Ok(Self::Management),
            "other" => Ok(Self::Other),
            other => Err(GrievanceError::InvalidInput(format!(
                "unknown category: {other}"
            ))),
        }
    }
}

/// Priority assigned at filing time.
///
/// Mutable only by re-filing, never through a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievancePriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl GrievancePriority {
    /// Get string representation as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for GrievancePriority {
    type Err = GrievanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(GrievanceError::InvalidInput(format!(
                "unknown priority: {other}"
            ))),
        }
    }
}

/// A filed employee complaint record and its workflow state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grievance {
    /// Unique identifier (store-generated)
    pub id: String,
    /// Owning employee's account id, immutable after creation
    pub employee_id: String,
    /// Short summary, non-empty
    pub title: String,
    /// Full description, non-empty
    pub description: String,
    /// Filing category
    pub category: GrievanceCategory,
    /// Filing priority
    pub priority: GrievancePriority,
    /// Department snapshotted from the filer's profile at creation
    pub department: String,
    /// Current workflow status
    pub status: GrievanceStatus,
    /// Resolution text, present once the grievance has been resolved or closed
    pub resolution: Option<String>,
    /// First time the grievance reached resolved or closed
    pub resolved_at: Option<DateTime<Utc>>,
    /// Creation time (store-generated)
    pub created_at: DateTime<Utc>,
}

impl Grievance {
    /// Resolution latency in fractional days, if resolved.
    pub fn resolution_days(&self) -> Option<f64> {
        self.resolved_at
            .map(|resolved| (resolved - self.created_at).num_milliseconds() as f64 / 86_400_000.0)
    }
}

/// Insert payload for a new grievance.
///
/// The store generates `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGrievance {
    pub employee_id: String,
    pub title: String,
    pub description: String,
    pub category: GrievanceCategory,
    pub priority: GrievancePriority,
    pub department: String,
    pub status: GrievanceStatus,
}

/// Partial update applied by a lifecycle transition.
///
/// Absent fields are left untouched by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrievancePatch {
    /// New workflow status
    pub status: GrievanceStatus,
    /// Resolution text to record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// First-resolution timestamp to record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// A single entry in a grievance's comment thread.
///
/// Comments are immutable and append-only; they have no existence independent
/// of their parent grievance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier (store-generated)
    pub id: String,
    /// Parent grievance
    pub grievance_id: String,
    /// Commenting account id
    pub user_id: String,
    /// Author display name snapshotted at post time
    pub author_name: String,
    /// Author role snapshotted at post time
    pub author_role: Role,
    /// Comment text, non-empty
    pub comment: String,
    /// Carried from the storage schema; always false from this engine
    #[serde(default)]
    pub is_internal: bool,
    /// Creation time, total ordering within the thread
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new comment.
///
/// The store generates `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub grievance_id: String,
    pub user_id: String,
    pub author_name: String,
    pub author_role: Role,
    pub comment: String,
    #[serde(default)]
    pub is_internal: bool,
}

/// What an employee submits to file a grievance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrievanceDraft {
    /// Short summary
    pub title: String,
    /// Full description
    pub description: String,
    /// Filing category
    pub category: GrievanceCategory,
    /// Filing priority
    pub priority: GrievancePriority,
}

impl GrievanceDraft {
    /// Create a draft with the default priority.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: GrievanceCategory,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            priority: GrievancePriority::default(),
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: GrievancePriority) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_classification() {
        assert_eq!(Role::Admin.capability(), Capability::Privileged);
        assert_eq!(Role::Hr.capability(), Capability::Privileged);
        assert_eq!(Role::Employee.capability(), Capability::Restricted);
    }

    #[test]
    fn test_status_round_trip() {
        for status in GrievanceStatus::all() {
            assert_eq!(status.as_str().parse::<GrievanceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "escalated".parse::<GrievanceStatus>().unwrap_err();
        assert!(matches!(err, GrievanceError::InvalidStatus(_)));
    }

    #[test]
    fn test_status_resolution_requirement() {
        assert!(GrievanceStatus::Resolved.requires_resolution());
        assert!(GrievanceStatus::Closed.requires_resolution());
        assert!(!GrievanceStatus::Submitted.requires_resolution());
        assert!(!GrievanceStatus::UnderReview.requires_resolution());
        assert!(!GrievanceStatus::Investigating.requires_resolution());
    }

    #[test]
    fn test_persisted_enum_spelling() {
        // The storage schema stores snake_case strings; serde must match.
        let json = serde_json::to_string(&GrievanceStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
        let json = serde_json::to_string(&GrievanceCategory::WorkplaceSafety).unwrap();
        assert_eq!(json, "\"workplace_safety\"");
    }

    #[test]
    fn test_draft_builder() {
        let draft = GrievanceDraft::new("Broken rung", "Ladder rung snapped", GrievanceCategory::WorkplaceSafety)
            .with_priority(GrievancePriority::High);

        assert_eq!(draft.priority, GrievancePriority::High);
        assert_eq!(draft.category, GrievanceCategory::WorkplaceSafety);
    }

    #[test]
    fn test_resolution_days_fractional() {
        let created = Utc::now();
        let grievance = Grievance {
            id: "g-1".to_string(),
            employee_id: "u-1".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            category: GrievanceCategory::Other,
            priority: GrievancePriority::Medium,
            department: "Ops".to_string(),
            status: GrievanceStatus::Resolved,
            resolution: Some("done".to_string()),
            resolved_at: Some(created + chrono::Duration::hours(36)),
            created_at: created,
        };

        assert_eq!(grievance.resolution_days(), Some(1.5));
    }
}
