//! Aggregation over a visible record set.
//!
//! Everything here is a pure function of its input: no hidden state, fully
//! deterministic, order-independent. Callers apply the visibility filter
//! before handing records in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use redress_core::{Grievance, GrievanceCategory, GrievancePriority, GrievanceStatus};

/// Derived, recomputable statistics over a record set. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of records in the input set
    pub total: usize,
    /// Tally per status; statuses with zero occurrences are absent
    pub by_status: HashMap<GrievanceStatus, usize>,
    /// Tally per category; absent when zero
    pub by_category: HashMap<GrievanceCategory, usize>,
    /// Tally per priority; absent when zero
    pub by_priority: HashMap<GrievancePriority, usize>,
    /// Tally per department; absent when zero
    pub by_department: HashMap<String, usize>,
    /// Mean resolution latency in fractional days over resolved records,
    /// 0.0 when none are resolved
    pub avg_resolution_days: f64,
}

impl AggregateStats {
    /// Share of the total held by one status, as a percentage.
    ///
    /// Defined as 0.0 when the total is zero.
    pub fn status_percentage(&self, status: GrievanceStatus) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = self.by_status.get(&status).copied().unwrap_or(0);
        count as f64 / self.total as f64 * 100.0
    }
}

/// Compute distributions and derived metrics over a visible record set.
pub fn aggregate(records: &[Grievance]) -> AggregateStats {
    let mut stats = AggregateStats {
        total: records.len(),
        ..Default::default()
    };

    let mut total_resolution_days = 0.0;
    let mut resolved_count = 0usize;

    for grievance in records {
        *stats.by_status.entry(grievance.status).or_insert(0) += 1;
        *stats.by_category.entry(grievance.category).or_insert(0) += 1;
        *stats.by_priority.entry(grievance.priority).or_insert(0) += 1;
        *stats
            .by_department
            .entry(grievance.department.clone())
            .or_insert(0) += 1;

        if let Some(days) = grievance.resolution_days() {
            total_resolution_days += days;
            resolved_count += 1;
        }
    }

    if resolved_count > 0 {
        stats.avg_resolution_days = total_resolution_days / resolved_count as f64;
    }

    stats
}

/// Headline numbers for a landing screen.
///
/// Buckets follow the triage view: in-progress folds together review and
/// investigation, resolved folds together resolved and closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of visible records
    pub total: usize,
    /// Records still in the initial state
    pub submitted: usize,
    /// Records under review or investigation
    pub in_progress: usize,
    /// Records resolved or closed
    pub resolved: usize,
    /// Most recent records, newest first
    pub recent: Vec<Grievance>,
}

/// Summarize a visible record set for a dashboard.
pub fn dashboard_summary(records: &[Grievance], recent_limit: usize) -> DashboardSummary {
    let submitted = records
        .iter()
        .filter(|g| g.status == GrievanceStatus::Submitted)
        .count();
    let in_progress = records
        .iter()
        .filter(|g| {
            matches!(
                g.status,
                GrievanceStatus::UnderReview | GrievanceStatus::Investigating
            )
        })
        .count();
    let resolved = records
        .iter()
        .filter(|g| matches!(g.status, GrievanceStatus::Resolved | GrievanceStatus::Closed))
        .count();

    let mut recent: Vec<Grievance> = records.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(recent_limit);

    DashboardSummary {
        total: records.len(),
        submitted,
        in_progress,
        resolved,
        recent,
    }
}
