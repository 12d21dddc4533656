//! Display Aggregates
//! Mission: Derive summary numbers from a feedback listing
//!
//! The service never computes these itself; this helper exists for
//! presentation-layer consumers to recompute from a listing they already
//! fetched.

use crate::feedback::models::{Feedback, FeedbackStatus};
use serde::Serialize;

/// Summary over a feedback listing
#[derive(Debug, Serialize, PartialEq)]
pub struct FeedbackStats {
    pub total: usize,
    pub average_rating: f64,
    pub pending: usize,
    pub reviewed: usize,
    pub resolved: usize,
}

/// Compute display aggregates over an already-fetched listing
///
/// Pure function, recomputed by the consumer on every read; the service
/// never caches or maintains these incrementally. Linear in the listing
/// size, which is unbounded since listings are unpaginated.
pub fn feedback_stats(records: &[Feedback]) -> FeedbackStats {
    let mut stats = FeedbackStats {
        total: records.len(),
        average_rating: 0.0,
        pending: 0,
        reviewed: 0,
        resolved: 0,
    };

    if records.is_empty() {
        return stats;
    }

    let mut rating_sum = 0i64;
    for record in records {
        rating_sum += record.rating;
        match record.status {
            FeedbackStatus::Pending => stats.pending += 1,
            FeedbackStatus::Reviewed => stats.reviewed += 1,
            FeedbackStatus::Resolved => stats.resolved += 1,
        }
    }

    stats.average_rating = rating_sum as f64 / records.len() as f64;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn feedback(rating: i64, status: FeedbackStatus) -> Feedback {
        Feedback {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Slow load".to_string(),
            message: "Page took 5s".to_string(),
            rating,
            status,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_empty_listing() {
        let stats = feedback_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.pending, 0);
    }

    #[test]
    fn test_counts_and_average() {
        let records = vec![
            feedback(5, FeedbackStatus::Pending),
            feedback(3, FeedbackStatus::Reviewed),
            feedback(1, FeedbackStatus::Resolved),
            feedback(3, FeedbackStatus::Pending),
        ];

        let stats = feedback_stats(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.average_rating, 3.0);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.reviewed, 1);
        assert_eq!(stats.resolved, 1);
    }
}
