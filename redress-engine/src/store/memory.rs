//! In-memory record store for tests and local runs.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use redress_core::{
    AuthorProfile, Comment, Grievance, GrievancePatch, NewComment, NewGrievance,
};

use super::traits::{RecordStore, StoreError};

/// DashMap-backed reference store.
///
/// Comments are appended per grievance, so a stable sort by creation time
/// reproduces the insertion-order tie-break the engine requires.
pub struct MemoryStore {
    grievances: DashMap<String, Grievance>,
    comments: DashMap<String, Vec<Comment>>,
    profiles: DashMap<String, AuthorProfile>,
    available: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            grievances: DashMap::new(),
            comments: DashMap::new(),
            profiles: DashMap::new(),
            available: AtomicBool::new(true),
        }
    }

    /// Seed a profile (account provisioning is external to the engine).
    pub fn with_profile(self, profile: AuthorProfile) -> Self {
        self.profiles.insert(profile.id.clone(), profile);
        self
    }

    /// Toggle availability; when false every call fails with `Unavailable`.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Flip availability on a live store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store disabled".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_grievance(&self, new: NewGrievance) -> Result<Grievance, StoreError> {
        self.check_available()?;

        let grievance = Grievance {
            id: uuid::Uuid::new_v4().to_string(),
            employee_id: new.employee_id,
            title: new.title,
            description: new.description,
            category: new.category,
            priority: new.priority,
            department: new.department,
            status: new.status,
            resolution: None,
            resolved_at: None,
            created_at: Utc::now(),
        };

        self.grievances.insert(grievance.id.clone(), grievance.clone());
        Ok(grievance)
    }

    async fn update_grievance(
        &self,
        id: &str,
        patch: GrievancePatch,
    ) -> Result<Grievance, StoreError> {
        self.check_available()?;

        let mut entry = self
            .grievances
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("grievance {id}")))?;

        entry.status = patch.status;
        if let Some(resolution) = patch.resolution {
            entry.resolution = Some(resolution);
        }
        if let Some(resolved_at) = patch.resolved_at {
            entry.resolved_at = Some(resolved_at);
        }

        Ok(entry.value().clone())
    }

    async fn fetch_grievance(&self, id: &str) -> Result<Option<Grievance>, StoreError> {
        self.check_available()?;
        Ok(self.grievances.get(id).map(|g| g.value().clone()))
    }

    async fn list_grievances(&self) -> Result<Vec<Grievance>, StoreError> {
        self.check_available()?;

        let mut records: Vec<Grievance> =
            self.grievances.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn insert_comment(&self, new: NewComment) -> Result<Comment, StoreError> {
        self.check_available()?;

        if !self.grievances.contains_key(&new.grievance_id) {
            return Err(StoreError::NotFound(format!(
                "grievance {}",
                new.grievance_id
            )));
        }

        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            grievance_id: new.grievance_id.clone(),
            user_id: new.user_id,
            author_name: new.author_name,
            author_role: new.author_role,
            comment: new.comment,
            is_internal: new.is_internal,
            created_at: Utc::now(),
        };

        self.comments
            .entry(new.grievance_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn comments_for(&self, grievance_id: &str) -> Result<Vec<Comment>, StoreError> {
        self.check_available()?;

        let mut thread = self
            .comments
            .get(grievance_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        // Stable sort keeps insertion order for equal timestamps.
        thread.sort_by_key(|c| c.created_at);
        Ok(thread)
    }

    async fn fetch_profile(
        &self,
        principal_id: &str,
    ) -> Result<Option<AuthorProfile>, StoreError> {
        self.check_available()?;
        Ok(self.profiles.get(principal_id).map(|p| p.value().clone()))
    }
}
