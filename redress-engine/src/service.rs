//! GrievanceService - main entry point for grievance operations.
//!
//! Composes the visibility filter, lifecycle machine, comment thread manager
//! and aggregation engine over one record store. Every operation takes the
//! acting identity explicitly; there is no ambient current-user state.

use std::sync::Arc;
use tracing::{debug, info, warn};

use redress_core::{
    apply_transition, file_grievance, filter_visible, require_visible, Comment, Grievance,
    GrievanceDraft, GrievanceError, GrievanceStatus, Principal, Result,
};

use crate::aggregate::{aggregate, dashboard_summary, AggregateStats, DashboardSummary};
use crate::comments::CommentThreadManager;
use crate::config::ServiceConfig;
use crate::query::{run_query, GrievanceQuery};
use crate::store::RecordStore;

/// Main entry point for filing, triaging and analyzing grievances.
pub struct GrievanceService {
    /// Configuration
    config: ServiceConfig,
    /// External record store
    store: Arc<dyn RecordStore>,
    /// Comment thread manager
    comments: CommentThreadManager,
}

impl GrievanceService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            config: ServiceConfig::default(),
            comments: CommentThreadManager::new(Arc::clone(&store)),
            store,
        }
    }

    /// Create with configuration.
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the service ID.
    pub fn service_id(&self) -> &str {
        &self.config.service_id
    }

    /// File a new grievance on the acting employee's behalf.
    pub async fn file_grievance(
        &self,
        identity: Option<&Principal>,
        draft: GrievanceDraft,
    ) -> Result<Grievance> {
        let principal = require_principal(identity)?;

        let profile = self
            .store
            .fetch_profile(&principal.id)
            .await?
            .ok_or_else(|| GrievanceError::NotFound(format!("profile {}", principal.id)))?;

        let new = file_grievance(principal, &profile, draft)?;
        let stored = self.store.insert_grievance(new).await?;

        info!(
            service = %self.config.service_id,
            grievance = %stored.id,
            employee = %principal.id,
            category = %stored.category.as_str(),
            priority = %stored.priority.as_str(),
            "grievance filed"
        );

        Ok(stored)
    }

    /// Fetch one grievance, visibility-gated.
    pub async fn grievance(
        &self,
        identity: Option<&Principal>,
        grievance_id: &str,
    ) -> Result<Grievance> {
        let principal = require_principal(identity)?;
        let grievance = self.fetch_existing(grievance_id).await?;
        require_visible(principal, &grievance)?;
        Ok(grievance)
    }

    /// Drive a lifecycle transition.
    ///
    /// The status arrives as the raw persisted string so unknown values
    /// surface as `InvalidStatus`. All checks run before the store write;
    /// the store commits the whole patch or none of it.
    pub async fn update_status(
        &self,
        identity: Option<&Principal>,
        grievance_id: &str,
        new_status: &str,
        resolution_text: Option<&str>,
    ) -> Result<Grievance> {
        let principal = require_principal(identity)?;
        let new_status: GrievanceStatus = new_status.parse()?;

        let grievance = self.fetch_existing(grievance_id).await?;
        let outcome = apply_transition(principal, &grievance, new_status, resolution_text)?;

        let updated = self
            .store
            .update_grievance(grievance_id, outcome.patch)
            .await?;

        info!(
            service = %self.config.service_id,
            grievance = %grievance_id,
            from = %grievance.status.as_str(),
            to = %updated.status.as_str(),
            by = %principal.id,
            "grievance status updated"
        );

        Ok(updated)
    }

    /// Append a comment to a grievance's thread.
    pub async fn add_comment(
        &self,
        identity: Option<&Principal>,
        grievance_id: &str,
        text: &str,
    ) -> Result<Comment> {
        let principal = require_principal(identity)?;
        let grievance = self.fetch_existing(grievance_id).await?;
        self.comments.add_comment(principal, &grievance, text).await
    }

    /// List a grievance's thread, oldest first.
    pub async fn comments(
        &self,
        identity: Option<&Principal>,
        grievance_id: &str,
    ) -> Result<Vec<Comment>> {
        let principal = require_principal(identity)?;
        let grievance = self.fetch_existing(grievance_id).await?;
        self.comments.list_comments(principal, &grievance).await
    }

    /// Search and filter the records visible to the caller.
    pub async fn query(
        &self,
        identity: Option<&Principal>,
        query: &GrievanceQuery,
    ) -> Result<Vec<Grievance>> {
        let principal = require_principal(identity)?;
        let records = self.store.list_grievances().await?;

        let result = run_query(principal, &records, query);
        debug!(
            service = %self.config.service_id,
            principal = %principal.id,
            matched = result.len(),
            "query evaluated"
        );
        Ok(result)
    }

    /// Compute distributions and resolution latency over the caller's
    /// visible records.
    pub async fn aggregate(&self, identity: Option<&Principal>) -> Result<AggregateStats> {
        let principal = require_principal(identity)?;
        let records = self.store.list_grievances().await?;
        let visible = filter_visible(principal, &records);
        Ok(aggregate(&visible))
    }

    /// Summarize the caller's visible records for a dashboard.
    pub async fn dashboard(&self, identity: Option<&Principal>) -> Result<DashboardSummary> {
        let principal = require_principal(identity)?;
        let records = self.store.list_grievances().await?;
        let visible = filter_visible(principal, &records);
        Ok(dashboard_summary(&visible, self.config.recent_limit))
    }

    async fn fetch_existing(&self, grievance_id: &str) -> Result<Grievance> {
        self.store
            .fetch_grievance(grievance_id)
            .await?
            .ok_or_else(|| GrievanceError::NotFound(format!("grievance {grievance_id}")))
    }
}

/// Reject unauthenticated callers before any other check runs.
fn require_principal(identity: Option<&Principal>) -> Result<&Principal> {
    match identity {
        Some(principal) => Ok(principal),
        None => {
            warn!("operation attempted without an authenticated principal");
            Err(GrievanceError::Unauthorized)
        }
    }
}
