//! Grievance store seam, query orchestration and reporting for Redress
//!
//! Composes the decision logic from `redress-core` over an external record
//! store:
//!
//! - **Record store seam**: [`store::RecordStore`] abstracts the managed
//!   data store; [`store::MemoryStore`] backs tests and local runs
//! - **Comment threads**: append-only, visibility-gated commentary
//! - **Aggregation**: pure distributions and resolution-latency metrics
//! - **Query orchestration**: visibility, search and filters over a snapshot
//! - **Service**: [`GrievanceService`], the single entry point consumers call
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    GrievanceService                      │
//! │                                                          │
//! │  ┌────────────┐ ┌───────────┐ ┌──────────┐ ┌──────────┐ │
//! │  │ Visibility │ │ Lifecycle │ │ Comments │ │ Reports  │ │
//! │  └────────────┘ └───────────┘ └──────────┘ └──────────┘ │
//! │                          │                               │
//! │                  ┌───────▼────────┐                      │
//! │                  │  RecordStore   │                      │
//! │                  └────────────────┘                      │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod aggregate;
pub mod comments;
pub mod config;
pub mod query;
pub mod service;
pub mod store;

// Re-export main types
pub use aggregate::{aggregate, dashboard_summary, AggregateStats, DashboardSummary};
pub use comments::CommentThreadManager;
pub use config::ServiceConfig;
pub use query::{run_query, GrievanceQuery, PriorityFilter, StatusFilter};
pub use service::GrievanceService;
pub use store::{MemoryStore, RecordStore, StoreError};
