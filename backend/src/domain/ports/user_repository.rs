//! Port abstraction for the user persistence gateway and its errors.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{User, UserDraft, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The backing store could not be reached.
    #[error("user store connection failed: {message}")]
    Connection { message: String },

    /// A query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },

    /// No row matches the requested id.
    #[error("no user row matches the requested id")]
    NotFound,

    /// The row changed under a concurrent writer between read and write.
    #[error("user row changed under a concurrent writer: {message}")]
    Conflict { message: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// Durable storage of user records with unique-id addressing.
///
/// The gateway exclusively owns the authoritative copy of every record;
/// callers only ever hold request-scoped clones.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored record, order unspecified.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Assign a fresh id, persist the candidate, and return the stored record.
    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Overwrite every non-id field of an existing record.
    ///
    /// Idempotent for identical payloads; fails with
    /// [`UserPersistenceError::NotFound`] when no row matches.
    async fn replace(&self, id: &UserId, draft: &UserDraft) -> Result<(), UserPersistenceError>;

    /// Remove the record with the given id.
    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}

/// In-memory [`UserRepository`] backing handler and integration tests.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    rows: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("user fixture lock");
        Ok(rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("user fixture lock");
        Ok(rows.get(id.as_uuid()).cloned())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let id = UserId::random();
        let user = User::new(id, draft.clone());
        let mut rows = self.rows.lock().expect("user fixture lock");
        rows.insert(*id.as_uuid(), user.clone());
        Ok(user)
    }

    async fn replace(&self, id: &UserId, draft: &UserDraft) -> Result<(), UserPersistenceError> {
        let mut rows = self.rows.lock().expect("user fixture lock");
        match rows.get_mut(id.as_uuid()) {
            Some(stored) => {
                *stored = User::new(*id, draft.clone());
                Ok(())
            }
            None => Err(UserPersistenceError::NotFound),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut rows = self.rows.lock().expect("user fixture lock");
        match rows.remove(id.as_uuid()) {
            Some(_) => Ok(()),
            None => Err(UserPersistenceError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Port-contract coverage exercised through the in-memory fixture.

    use super::*;

    fn draft(first: &str, last: &str, email: &str) -> UserDraft {
        UserDraft::try_from_parts(first, last, email).expect("valid draft")
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = FixtureUserRepository::default();
        let candidate = draft("Ada", "Lovelace", "ada@example.com");

        let created = repo.insert(&candidate).await.expect("insert succeeds");
        assert!(!created.id().to_string().is_empty());

        let fetched = repo
            .find_by_id(created.id())
            .await
            .expect("find succeeds")
            .expect("record exists");
        assert_eq!(fetched, created);
        assert_eq!(fetched.first_name().as_ref(), "Ada");
        assert_eq!(fetched.last_name().as_ref(), "Lovelace");
        assert_eq!(fetched.email().as_ref(), "ada@example.com");
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let repo = FixtureUserRepository::default();
        let candidate = draft("Ada", "Lovelace", "ada@example.com");

        let first = repo.insert(&candidate).await.expect("insert succeeds");
        let second = repo.insert(&candidate).await.expect("insert succeeds");
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn find_unknown_id_returns_none() {
        let repo = FixtureUserRepository::default();
        let missing = UserId::random();

        let fetched = repo.find_by_id(&missing).await.expect("find succeeds");
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn replace_overwrites_every_field() {
        let repo = FixtureUserRepository::default();
        let created = repo
            .insert(&draft("Ada", "Lovelace", "ada@example.com"))
            .await
            .expect("insert succeeds");

        repo.replace(created.id(), &draft("Ada", "Byron", "byron@example.com"))
            .await
            .expect("replace succeeds");

        let fetched = repo
            .find_by_id(created.id())
            .await
            .expect("find succeeds")
            .expect("record exists");
        assert_eq!(fetched.id(), created.id());
        assert_eq!(fetched.last_name().as_ref(), "Byron");
        assert_eq!(fetched.email().as_ref(), "byron@example.com");
    }

    #[tokio::test]
    async fn replace_is_idempotent() {
        let repo = FixtureUserRepository::default();
        let created = repo
            .insert(&draft("Ada", "Lovelace", "ada@example.com"))
            .await
            .expect("insert succeeds");
        let payload = draft("Ada", "Byron", "ada@example.com");

        repo.replace(created.id(), &payload)
            .await
            .expect("first replace succeeds");
        let after_first = repo
            .find_by_id(created.id())
            .await
            .expect("find succeeds");

        repo.replace(created.id(), &payload)
            .await
            .expect("second replace succeeds");
        let after_second = repo
            .find_by_id(created.id())
            .await
            .expect("find succeeds");

        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn replace_unknown_id_fails_with_not_found() {
        let repo = FixtureUserRepository::default();
        let missing = UserId::random();

        let result = repo
            .replace(&missing, &draft("Ada", "Lovelace", "ada@example.com"))
            .await;
        assert_eq!(result, Err(UserPersistenceError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let repo = FixtureUserRepository::default();
        let created = repo
            .insert(&draft("Ada", "Lovelace", "ada@example.com"))
            .await
            .expect("insert succeeds");

        repo.delete(created.id()).await.expect("delete succeeds");

        let fetched = repo
            .find_by_id(created.id())
            .await
            .expect("find succeeds");
        assert!(fetched.is_none());

        let again = repo.delete(created.id()).await;
        assert_eq!(again, Err(UserPersistenceError::NotFound));
    }

    #[tokio::test]
    async fn list_reflects_every_stored_record() {
        let repo = FixtureUserRepository::default();
        assert!(repo.list_all().await.expect("list succeeds").is_empty());

        let mut ids = Vec::new();
        for n in 0..3 {
            let created = repo
                .insert(&draft("User", "Example", &format!("user{n}@example.com")))
                .await
                .expect("insert succeeds");
            ids.push(*created.id());
        }

        let mut listed: Vec<UserId> = repo
            .list_all()
            .await
            .expect("list succeeds")
            .iter()
            .map(|user| *user.id())
            .collect();
        listed.sort_by_key(|id| *id.as_uuid());
        ids.sort_by_key(|id| *id.as_uuid());
        assert_eq!(listed, ids);
    }
}
