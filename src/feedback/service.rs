//! Feedback Service
//! Mission: Core feedback business logic with explicit caller context

use crate::auth::models::{AuthUser, Role};
use crate::feedback::models::{CreateFeedbackRequest, Feedback, FeedbackStatus, FeedbackWithOwner};
use crate::feedback::store::FeedbackStore;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Feedback operation errors, mapped to HTTP at the API boundary
#[derive(Debug)]
pub enum FeedbackError {
    Validation(&'static str),
    Forbidden,
    NotFound,
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for FeedbackError {
    fn from(err: anyhow::Error) -> Self {
        FeedbackError::Internal(err)
    }
}

/// Stateless service over the feedback store
///
/// Every call takes the caller's identity or role explicitly; nothing is
/// read from ambient request state.
pub struct FeedbackService {
    store: Arc<FeedbackStore>,
}

impl FeedbackService {
    pub fn new(store: Arc<FeedbackStore>) -> Self {
        Self { store }
    }

    /// Validate a create payload, reporting only the first offending field
    fn validate_create(payload: &CreateFeedbackRequest) -> Result<i64, &'static str> {
        if payload.subject.trim().is_empty() {
            return Err("Subject is required");
        }
        if payload.message.trim().is_empty() {
            return Err("Message is required");
        }
        let rating = payload.rating.ok_or("Rating is required")?;
        if !(1..=5).contains(&rating) {
            return Err("Rating must be between 1 and 5");
        }
        Ok(rating)
    }

    /// Create a new feedback record owned by the caller
    ///
    /// Missing name/email fall back to the owner's profile values. Always
    /// persists with status `pending`.
    pub fn create(
        &self,
        owner: &AuthUser,
        payload: CreateFeedbackRequest,
    ) -> Result<Feedback, FeedbackError> {
        let rating = Self::validate_create(&payload).map_err(FeedbackError::Validation)?;

        let name = payload
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| owner.name.clone());
        let email = payload
            .email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| owner.email.clone());

        let now = Utc::now().to_rfc3339();
        let feedback = Feedback {
            id: Uuid::new_v4(),
            user_id: owner.id,
            name,
            email,
            subject: payload.subject.trim().to_string(),
            message: payload.message.trim().to_string(),
            rating,
            status: FeedbackStatus::Pending,
            created_at: now.clone(),
            updated_at: now,
        };

        self.store.insert(&feedback)?;

        Ok(feedback)
    }

    /// All feedback owned by the caller, newest-first
    pub fn list_mine(&self, owner_id: &Uuid) -> Result<Vec<Feedback>, FeedbackError> {
        Ok(self.store.list_by_owner(owner_id)?)
    }

    /// All feedback across all owners, newest-first (admin only)
    pub fn list_all(&self, caller_role: Role) -> Result<Vec<FeedbackWithOwner>, FeedbackError> {
        if caller_role != Role::Admin {
            return Err(FeedbackError::Forbidden);
        }
        Ok(self.store.list_all_with_owner()?)
    }

    /// Single record; readable by its owner or any admin
    pub fn get_by_id(
        &self,
        id: &Uuid,
        caller_id: &Uuid,
        caller_role: Role,
    ) -> Result<FeedbackWithOwner, FeedbackError> {
        let record = self
            .store
            .get_with_owner(id)?
            .ok_or(FeedbackError::NotFound)?;

        if record.feedback.user_id != *caller_id && caller_role != Role::Admin {
            return Err(FeedbackError::Forbidden);
        }

        Ok(record)
    }

    /// Overwrite a record's status (admin only)
    ///
    /// The role check runs before the id lookup, so a non-admin gets
    /// Forbidden regardless of target validity.
    pub fn update_status(
        &self,
        id: &Uuid,
        new_status: &str,
        caller_role: Role,
    ) -> Result<FeedbackWithOwner, FeedbackError> {
        if caller_role != Role::Admin {
            return Err(FeedbackError::Forbidden);
        }

        let status = FeedbackStatus::from_str(new_status).ok_or(FeedbackError::Validation(
            "Status must be one of: pending, reviewed, resolved",
        ))?;

        self.store
            .update_status(id, status)?
            .ok_or(FeedbackError::NotFound)
    }
}
