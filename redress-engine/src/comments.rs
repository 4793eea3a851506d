//! Comment thread manager.
//!
//! Enforces the thread invariants: append-only, chronologically ordered,
//! visibility-gated commentary scoped to one grievance. Comments are never
//! edited or deleted through this component.

use std::sync::Arc;
use tracing::{info, warn};

use redress_core::{
    require_visible, Comment, Grievance, GrievanceError, NewComment, Principal, Result,
};

use crate::store::RecordStore;

/// Manages the comment thread attached to a grievance.
pub struct CommentThreadManager {
    store: Arc<dyn RecordStore>,
}

impl CommentThreadManager {
    /// Create a manager over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Append a comment to a grievance's thread.
    ///
    /// The text must be non-empty after trimming, and the principal must
    /// pass the visibility filter for the parent grievance - both the owner
    /// and privileged reviewers may comment. The author's display name and
    /// role are snapshotted from their profile at post time.
    pub async fn add_comment(
        &self,
        principal: &Principal,
        grievance: &Grievance,
        text: &str,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GrievanceError::InvalidInput(
                "comment text must not be empty".to_string(),
            ));
        }

        if let Err(err) = require_visible(principal, grievance) {
            warn!(
                principal = %principal.id,
                grievance = %grievance.id,
                "comment rejected by visibility filter"
            );
            return Err(err);
        }

        let profile = self
            .store
            .fetch_profile(&principal.id)
            .await?
            .ok_or_else(|| GrievanceError::NotFound(format!("profile {}", principal.id)))?;

        let comment = self
            .store
            .insert_comment(NewComment {
                grievance_id: grievance.id.clone(),
                user_id: principal.id.clone(),
                author_name: profile.full_name,
                author_role: profile.role,
                comment: text.to_string(),
                is_internal: false,
            })
            .await?;

        info!(
            grievance = %grievance.id,
            comment = %comment.id,
            author = %principal.id,
            "comment added"
        );

        Ok(comment)
    }

    /// List a grievance's thread, oldest first.
    ///
    /// Applies the same visibility check as [`Self::add_comment`] and fails
    /// closed with `Forbidden` rather than returning an empty list, so
    /// callers can tell "no comments" from "not permitted".
    pub async fn list_comments(
        &self,
        principal: &Principal,
        grievance: &Grievance,
    ) -> Result<Vec<Comment>> {
        require_visible(principal, grievance)?;

        let mut thread = self.store.comments_for(&grievance.id).await?;
        // Stable: equal timestamps keep the store's insertion order.
        thread.sort_by_key(|c| c.created_at);
        Ok(thread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use redress_core::{
        AuthorProfile, GrievanceCategory, GrievanceDraft, GrievancePriority, Role,
    };

    fn profile(id: &str, name: &str, role: Role) -> AuthorProfile {
        AuthorProfile {
            id: id.to_string(),
            full_name: name.to_string(),
            employee_id: format!("E-{id}"),
            department: "Facilities".to_string(),
            role,
        }
    }

    async fn seeded() -> (Arc<MemoryStore>, Grievance) {
        let store = Arc::new(
            MemoryStore::new()
                .with_profile(profile("emp-1", "Dana Field", Role::Employee))
                .with_profile(profile("emp-2", "Robin Vale", Role::Employee))
                .with_profile(profile("hr-1", "Sam Reyes", Role::Hr)),
        );

        let principal = Principal::new("emp-1", Role::Employee);
        let owner_profile = store.fetch_profile("emp-1").await.unwrap().unwrap();
        let new = redress_core::file_grievance(
            &principal,
            &owner_profile,
            GrievanceDraft::new("Broken door", "Fire door will not latch", GrievanceCategory::WorkplaceSafety)
                .with_priority(GrievancePriority::High),
        )
        .unwrap();
        let grievance = store.insert_grievance(new).await.unwrap();

        (store, grievance)
    }

    #[tokio::test]
    async fn test_empty_comment_rejected_without_side_effect() {
        let (store, grievance) = seeded().await;
        let manager = CommentThreadManager::new(store.clone());
        let owner = Principal::new("emp-1", Role::Employee);

        let err = manager.add_comment(&owner, &grievance, "   ").await.unwrap_err();
        assert!(matches!(err, GrievanceError::InvalidInput(_)));

        let thread = manager.list_comments(&owner, &grievance).await.unwrap();
        assert!(thread.is_empty());
    }

    #[tokio::test]
    async fn test_owner_and_privileged_may_comment() {
        let (store, grievance) = seeded().await;
        let manager = CommentThreadManager::new(store);

        let owner = Principal::new("emp-1", Role::Employee);
        let hr = Principal::new("hr-1", Role::Hr);

        let first = manager
            .add_comment(&owner, &grievance, "Still broken this morning")
            .await
            .unwrap();
        assert_eq!(first.author_name, "Dana Field");
        assert_eq!(first.author_role, Role::Employee);

        let second = manager
            .add_comment(&hr, &grievance, "Contractor scheduled")
            .await
            .unwrap();
        assert_eq!(second.author_role, Role::Hr);
    }

    #[tokio::test]
    async fn test_non_owner_restricted_forbidden() {
        let (store, grievance) = seeded().await;
        let manager = CommentThreadManager::new(store);
        let outsider = Principal::new("emp-2", Role::Employee);

        let err = manager
            .add_comment(&outsider, &grievance, "Mine too")
            .await
            .unwrap_err();
        assert!(matches!(err, GrievanceError::Forbidden(_)));

        // Listing fails closed rather than returning an empty thread.
        let err = manager.list_comments(&outsider, &grievance).await.unwrap_err();
        assert!(matches!(err, GrievanceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_thread_ordering_ascending() {
        let (store, grievance) = seeded().await;
        let manager = CommentThreadManager::new(store);
        let owner = Principal::new("emp-1", Role::Employee);

        let c1 = manager.add_comment(&owner, &grievance, "first").await.unwrap();
        let c2 = manager.add_comment(&owner, &grievance, "second").await.unwrap();
        let c3 = manager.add_comment(&owner, &grievance, "third").await.unwrap();

        let thread = manager.list_comments(&owner, &grievance).await.unwrap();
        let ids: Vec<&str> = thread.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![c1.id.as_str(), c2.id.as_str(), c3.id.as_str()]);
    }
}
