//! Feedback Storage
//! Mission: Persist feedback records with SQLite, newest-first reads

use crate::feedback::models::{Feedback, FeedbackStatus, FeedbackWithOwner, OwnerRef};
use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Feedback storage with SQLite backend
pub struct FeedbackStore {
    db_path: String,
}

const FEEDBACK_COLUMNS: &str =
    "f.id, f.user_id, f.name, f.email, f.subject, f.message, f.rating, f.status, \
     f.created_at, f.updated_at";

impl FeedbackStore {
    /// Create a new feedback store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS feedback (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                subject TEXT NOT NULL,
                message TEXT NOT NULL,
                rating INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_feedback_user_created
             ON feedback (user_id, created_at DESC)",
            [],
        )?;

        Ok(())
    }

    fn row_to_feedback(row: &rusqlite::Row<'_>) -> rusqlite::Result<Feedback> {
        let parse_uuid = |idx: usize, s: String| {
            Uuid::parse_str(&s).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
        };

        let id_str: String = row.get(0)?;
        let user_id_str: String = row.get(1)?;
        let status_str: String = row.get(7)?;

        Ok(Feedback {
            id: parse_uuid(0, id_str)?,
            user_id: parse_uuid(1, user_id_str)?,
            name: row.get(2)?,
            email: row.get(3)?,
            subject: row.get(4)?,
            message: row.get(5)?,
            rating: row.get(6)?,
            status: FeedbackStatus::from_str(&status_str).unwrap_or(FeedbackStatus::Pending),
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn row_to_feedback_with_owner(row: &rusqlite::Row<'_>) -> rusqlite::Result<FeedbackWithOwner> {
        let feedback = Self::row_to_feedback(row)?;
        let owner = OwnerRef {
            id: feedback.user_id.to_string(),
            name: row.get(10)?,
            email: row.get(11)?,
        };
        Ok(FeedbackWithOwner { feedback, owner })
    }

    /// Insert a new feedback record
    pub fn insert(&self, feedback: &Feedback) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "INSERT INTO feedback
             (id, user_id, name, email, subject, message, rating, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                feedback.id.to_string(),
                feedback.user_id.to_string(),
                feedback.name,
                feedback.email,
                feedback.subject,
                feedback.message,
                feedback.rating,
                feedback.status.as_str(),
                feedback.created_at,
                feedback.updated_at,
            ],
        )?;

        Ok(())
    }

    /// All feedback owned by a user, newest-first
    pub fn list_by_owner(&self, user_id: &Uuid) -> Result<Vec<Feedback>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback f
             WHERE f.user_id = ?1
             ORDER BY f.created_at DESC, f.rowid DESC"
        ))?;

        let records = stmt
            .query_map(params![user_id.to_string()], Self::row_to_feedback)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// All feedback across all owners, newest-first, with owner joined in
    pub fn list_all_with_owner(&self) -> Result<Vec<FeedbackWithOwner>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {FEEDBACK_COLUMNS}, u.name, u.email
             FROM feedback f JOIN users u ON u.id = f.user_id
             ORDER BY f.created_at DESC, f.rowid DESC"
        ))?;

        let records = stmt
            .query_map([], Self::row_to_feedback_with_owner)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Single record with owner joined in
    pub fn get_with_owner(&self, id: &Uuid) -> Result<Option<FeedbackWithOwner>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {FEEDBACK_COLUMNS}, u.name, u.email
             FROM feedback f JOIN users u ON u.id = f.user_id
             WHERE f.id = ?1"
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_feedback_with_owner) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite a record's status, refreshing its last-modified stamp
    ///
    /// Returns the updated record, or None when the id doesn't resolve.
    pub fn update_status(
        &self,
        id: &Uuid,
        status: FeedbackStatus,
    ) -> Result<Option<FeedbackWithOwner>> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "UPDATE feedback SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![
                status.as_str(),
                Utc::now().to_rfc3339(),
                id.to_string()
            ],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }

        self.get_with_owner(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use crate::auth::user_store::UserStore;
    use tempfile::NamedTempFile;

    fn create_test_stores() -> (FeedbackStore, UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let users = UserStore::new(db_path).unwrap();
        let store = FeedbackStore::new(db_path).unwrap();
        (store, users, temp_file)
    }

    fn sample_feedback(user_id: Uuid, subject: &str, created_at: &str) -> Feedback {
        Feedback {
            id: Uuid::new_v4(),
            user_id,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: subject.to_string(),
            message: "Page took 5s".to_string(),
            rating: 3,
            status: FeedbackStatus::Pending,
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_insert_and_list_by_owner_newest_first() {
        let (store, users, _temp) = create_test_stores();
        let ada = users
            .create_user("Ada", "ada@example.com", "password123", Role::User)
            .unwrap();
        let bob = users
            .create_user("Bob", "bob@example.com", "password123", Role::User)
            .unwrap();

        store
            .insert(&sample_feedback(ada.id, "first", "2025-01-01T00:00:00Z"))
            .unwrap();
        store
            .insert(&sample_feedback(ada.id, "second", "2025-01-02T00:00:00Z"))
            .unwrap();
        store
            .insert(&sample_feedback(bob.id, "other", "2025-01-03T00:00:00Z"))
            .unwrap();

        let mine = store.list_by_owner(&ada.id).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].subject, "second");
        assert_eq!(mine[1].subject, "first");

        // Bob's listing never contains Ada's records
        let theirs = store.list_by_owner(&bob.id).unwrap();
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].subject, "other");
    }

    #[test]
    fn test_list_all_joins_owner() {
        let (store, users, _temp) = create_test_stores();
        let ada = users
            .create_user("Ada", "ada@example.com", "password123", Role::User)
            .unwrap();

        store
            .insert(&sample_feedback(ada.id, "first", "2025-01-01T00:00:00Z"))
            .unwrap();

        let all = store.list_all_with_owner().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].owner.name, "Ada");
        assert_eq!(all[0].owner.email, "ada@example.com");
    }

    #[test]
    fn test_update_status_round_trip() {
        let (store, users, _temp) = create_test_stores();
        let ada = users
            .create_user("Ada", "ada@example.com", "password123", Role::User)
            .unwrap();

        let record = sample_feedback(ada.id, "first", "2025-01-01T00:00:00Z");
        store.insert(&record).unwrap();

        let updated = store
            .update_status(&record.id, FeedbackStatus::Resolved)
            .unwrap()
            .unwrap();
        assert_eq!(updated.feedback.status, FeedbackStatus::Resolved);
        assert_ne!(updated.feedback.updated_at, record.updated_at);

        // No forward-only constraint: resolved -> pending is allowed
        let back = store
            .update_status(&record.id, FeedbackStatus::Pending)
            .unwrap()
            .unwrap();
        assert_eq!(back.feedback.status, FeedbackStatus::Pending);
    }

    #[test]
    fn test_update_status_unknown_id() {
        let (store, _users, _temp) = create_test_stores();

        let result = store
            .update_status(&Uuid::new_v4(), FeedbackStatus::Reviewed)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_get_with_owner_missing() {
        let (store, _users, _temp) = create_test_stores();
        assert!(store.get_with_owner(&Uuid::new_v4()).unwrap().is_none());
    }
}
