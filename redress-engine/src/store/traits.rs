//! Core trait for record stores.
//!
//! This module defines the `RecordStore` trait - the abstraction over the
//! external managed data store that holds grievances, comments and profiles.

use async_trait::async_trait;

use redress_core::{
    AuthorProfile, Comment, Grievance, GrievanceError, GrievancePatch, NewComment, NewGrievance,
};

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Referenced record does not exist
    #[error("record not found: {0}")]
    NotFound(String),

    /// Store is not reachable
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Store call failed or errored
    #[error("store request failed: {0}")]
    RequestFailed(String),
}

impl From<StoreError> for GrievanceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => GrievanceError::NotFound(what),
            StoreError::Unavailable(msg) => GrievanceError::UpstreamFailure(msg),
            StoreError::RequestFailed(msg) => GrievanceError::UpstreamFailure(msg),
        }
    }
}

/// Core trait for record stores.
///
/// Implementations own id generation, server timestamps and write ordering;
/// a failed call surfaces immediately and is never retried by this engine.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a grievance, returning the stored record with generated id and
    /// server timestamp.
    async fn insert_grievance(&self, new: NewGrievance) -> Result<Grievance, StoreError>;

    /// Apply a partial update to a grievance, returning the updated record.
    ///
    /// Fields absent from the patch are left untouched.
    async fn update_grievance(
        &self,
        id: &str,
        patch: GrievancePatch,
    ) -> Result<Grievance, StoreError>;

    /// Fetch a single grievance, `None` when the id is unknown.
    async fn fetch_grievance(&self, id: &str) -> Result<Option<Grievance>, StoreError>;

    /// All grievances, ordered by creation time descending (newest first).
    async fn list_grievances(&self) -> Result<Vec<Grievance>, StoreError>;

    /// Insert a comment, returning the stored record.
    ///
    /// Fails with [`StoreError::NotFound`] when the parent grievance does
    /// not exist; a comment has no existence independent of its parent.
    async fn insert_comment(&self, new: NewComment) -> Result<Comment, StoreError>;

    /// Comments for one grievance, ordered by creation time ascending with
    /// ties broken by insertion order.
    async fn comments_for(&self, grievance_id: &str) -> Result<Vec<Comment>, StoreError>;

    /// Fetch the profile joined onto comments and filings at read time.
    async fn fetch_profile(&self, principal_id: &str)
        -> Result<Option<AuthorProfile>, StoreError>;
}
