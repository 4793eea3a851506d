//! Query orchestration over a snapshot of records.
//!
//! A side-effect-free pipeline callable identically from a test harness or a
//! live caller: visibility first, then search, then the exact-match filters.
//! Input records are never mutated; the output is always a fresh sequence.

use std::str::FromStr;

use redress_core::{
    filter_visible, Grievance, GrievancePriority, GrievanceStatus, Principal, Result,
};

/// Status filter with the `all` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Keep every status
    #[default]
    All,
    /// Keep exact matches only
    Only(GrievanceStatus),
}

impl FromStr for StatusFilter {
    type Err = redress_core::GrievanceError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.parse()?))
        }
    }
}

/// Priority filter with the `all` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    /// Keep every priority
    #[default]
    All,
    /// Keep exact matches only
    Only(GrievancePriority),
}

impl FromStr for PriorityFilter {
    type Err = redress_core::GrievanceError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.parse()?))
        }
    }
}

/// Search and filter criteria for one query.
#[derive(Debug, Clone, Default)]
pub struct GrievanceQuery {
    /// Case-insensitive substring matched against title and description
    pub search_text: Option<String>,
    /// Status filter, `All` by default
    pub status: StatusFilter,
    /// Priority filter, `All` by default
    pub priority: PriorityFilter,
}

impl GrievanceQuery {
    /// Match everything the principal may see.
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Keep one status only.
    pub fn with_status(mut self, status: GrievanceStatus) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    /// Keep one priority only.
    pub fn with_priority(mut self, priority: GrievancePriority) -> Self {
        self.priority = PriorityFilter::Only(priority);
        self
    }
}

/// Compose visibility, search and filters into the record set a consumer
/// sees, ordered by creation time descending.
pub fn run_query(
    principal: &Principal,
    records: &[Grievance],
    query: &GrievanceQuery,
) -> Vec<Grievance> {
    // Visibility is unconditional and comes before anything else.
    let mut result = filter_visible(principal, records);

    // Ordering is established before the filter steps; the filters below
    // keep relative order.
    result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if let Some(needle) = query
        .search_text
        .as_deref()
        .filter(|text| !text.is_empty())
    {
        let needle = needle.to_lowercase();
        result.retain(|g| {
            g.title.to_lowercase().contains(&needle)
                || g.description.to_lowercase().contains(&needle)
        });
    }

    if let StatusFilter::Only(status) = query.status {
        result.retain(|g| g.status == status);
    }

    if let PriorityFilter::Only(priority) = query.priority {
        result.retain(|g| g.priority == priority);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use redress_core::{GrievanceCategory, Role};

    fn grievance(id: &str, owner: &str, title: &str, day: i64) -> Grievance {
        let epoch = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        Grievance {
            id: id.to_string(),
            employee_id: owner.to_string(),
            title: title.to_string(),
            description: format!("Details about {title}"),
            category: GrievanceCategory::Other,
            priority: GrievancePriority::Medium,
            department: "Ops".to_string(),
            status: GrievanceStatus::Submitted,
            resolution: None,
            resolved_at: None,
            created_at: epoch + Duration::days(day),
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![
            grievance("g-1", "emp-1", "Unsafe scaffolding", 0),
            grievance("g-2", "emp-1", "Pay dispute", 1),
        ];
        let admin = Principal::new("adm-1", Role::Admin);

        let hits = run_query(&admin, &records, &GrievanceQuery::all().with_search("PAY"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "g-2");
    }

    #[test]
    fn test_search_matches_description_too() {
        let records = vec![grievance("g-1", "emp-1", "Scheduling", 0)];
        let admin = Principal::new("adm-1", Role::Admin);

        let hits = run_query(
            &admin,
            &records,
            &GrievanceQuery::all().with_search("details about sched"),
        );
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_visibility_applies_before_search() {
        let records = vec![
            grievance("g-1", "emp-1", "Pay dispute", 0),
            grievance("g-2", "emp-2", "Pay grade review", 1),
        ];
        let employee = Principal::new("emp-1", Role::Employee);

        let hits = run_query(&employee, &records, &GrievanceQuery::all().with_search("pay"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "g-1");
    }

    #[test]
    fn test_status_filter_with_all_priority() {
        let mut records = vec![
            grievance("g-1", "emp-1", "One", 0),
            grievance("g-2", "emp-1", "Two", 1),
            grievance("g-3", "emp-2", "Three", 2),
        ];
        records[1].status = GrievanceStatus::Resolved;
        records[2].status = GrievanceStatus::Resolved;

        let admin = Principal::new("adm-1", Role::Admin);
        let hits = run_query(
            &admin,
            &records,
            &GrievanceQuery::all().with_status(GrievanceStatus::Resolved),
        );

        let ids: Vec<&str> = hits.iter().map(|g| g.id.as_str()).collect();
        // Exactly the resolved subset, newest first.
        assert_eq!(ids, vec!["g-3", "g-2"]);
    }

    #[test]
    fn test_output_ordering_newest_first() {
        let records = vec![
            grievance("g-1", "emp-1", "Oldest", 0),
            grievance("g-3", "emp-1", "Newest", 5),
            grievance("g-2", "emp-1", "Middle", 2),
        ];
        let admin = Principal::new("adm-1", Role::Admin);

        let hits = run_query(&admin, &records, &GrievanceQuery::all());
        let ids: Vec<&str> = hits.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g-3", "g-2", "g-1"]);
    }

    #[test]
    fn test_input_is_left_untouched() {
        let records = vec![
            grievance("g-1", "emp-1", "Oldest", 0),
            grievance("g-2", "emp-1", "Newest", 1),
        ];
        let before = records.clone();
        let admin = Principal::new("adm-1", Role::Admin);

        let _ = run_query(&admin, &records, &GrievanceQuery::all());
        assert_eq!(records, before);
    }

    #[test]
    fn test_filter_sentinel_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "resolved".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(GrievanceStatus::Resolved)
        );
        assert!("escalated".parse::<StatusFilter>().is_err());

        assert_eq!("all".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
        assert_eq!(
            "critical".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(GrievancePriority::Critical)
        );
        assert!("severe".parse::<PriorityFilter>().is_err());
    }
}
