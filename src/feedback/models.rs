//! Feedback Models
//! Mission: Define the feedback record, its status workflow, and API shapes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow marker on a feedback record
///
/// Closed set: updates carrying anything else are rejected as validation
/// errors. Any value may move to any other; there is no terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeedbackStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "reviewed")]
    Reviewed,
    #[serde(rename = "resolved")]
    Resolved,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::Reviewed => "reviewed",
            FeedbackStatus::Resolved => "resolved",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(FeedbackStatus::Pending),
            "reviewed" => Some(FeedbackStatus::Reviewed),
            "resolved" => Some(FeedbackStatus::Resolved),
            _ => None,
        }
    }
}

/// A feedback submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid, // owning user - immutable after creation
    pub name: String,  // submitter display name captured at submission time
    pub email: String, // submitter email captured at submission time
    pub subject: String,
    pub message: String,
    pub rating: i64, // 1-5 stars
    pub status: FeedbackStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Owner identity joined into admin-facing responses
#[derive(Debug, Clone, Serialize)]
pub struct OwnerRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Feedback with its owner's profile joined in
#[derive(Debug, Serialize)]
pub struct FeedbackWithOwner {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub owner: OwnerRef,
}

/// Create feedback request body
///
/// `name`/`email` may override the submitter's profile values; everything is
/// defaulted so validation can report proper first-error messages instead of
/// a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rating: Option<i64>,
}

/// Status update request body
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&FeedbackStatus::Pending).unwrap();
        assert_eq!(json, r#""pending""#);

        let status: FeedbackStatus = serde_json::from_str(r#""resolved""#).unwrap();
        assert_eq!(status, FeedbackStatus::Resolved);
    }

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(FeedbackStatus::Reviewed.as_str(), "reviewed");
        assert_eq!(
            FeedbackStatus::from_str("PENDING"),
            Some(FeedbackStatus::Pending)
        );
        assert_eq!(FeedbackStatus::from_str("archived"), None);
    }

    #[test]
    fn test_feedback_with_owner_flattens() {
        let feedback = Feedback {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Slow load".to_string(),
            message: "Page took 5s".to_string(),
            rating: 3,
            status: FeedbackStatus::Pending,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        };
        let with_owner = FeedbackWithOwner {
            owner: OwnerRef {
                id: feedback.user_id.to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            feedback,
        };

        let value = serde_json::to_value(&with_owner).unwrap();
        assert_eq!(value["subject"], "Slow load");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["owner"]["email"], "ada@example.com");
    }
}
