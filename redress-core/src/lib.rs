//! Grievance domain model, access rules and lifecycle for Redress
//!
//! This crate holds the decision logic that governs grievance records:
//!
//! - **Visibility**: which records a given actor may see
//! - **Lifecycle**: the legal status transitions and the data each must carry
//! - **Data model**: grievances, comment threads and the principals acting
//!   on them, with persisted field names kept schema-compatible
//!
//! # Key Components
//!
//! - [`Principal`] / [`Capability`]: the acting identity and its access tier
//! - [`visibility`]: the single access-control gate
//! - [`lifecycle`]: filing validation and the permissive transition machine
//! - [`GrievanceError`]: the error kinds every contract surfaces

pub mod error;
pub mod lifecycle;
pub mod types;
pub mod visibility;

// Re-export main types
pub use error::{GrievanceError, Result};
pub use lifecycle::{apply_transition, file_grievance, TransitionOutcome};
pub use types::*;
pub use visibility::{filter_visible, require_visible, visible};
