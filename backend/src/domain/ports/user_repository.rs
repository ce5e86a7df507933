//! Port abstraction for user persistence adapters and their errors.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::email::EmailAddress;
use crate::domain::user::User;

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Repository connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Failure description from the backing store.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query {
        /// Failure description from the backing store.
        message: String,
    },
    /// The normalized email already names another user.
    #[error("a user with email {email} already exists")]
    DuplicateEmail {
        /// The conflicting normalized email address.
        email: String,
    },
}

impl UserStoreError {
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

    /// Create a duplicate-email error for the given address.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Durable storage for directory users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    ///
    /// Fails with [`UserStoreError::DuplicateEmail`] when the normalized
    /// email already names another user.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Persist the current field values of an existing user.
    async fn update(&self, user: &User) -> Result<(), UserStoreError>;

    /// Fetch a user by surrogate identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by normalized login email.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError>;
}

/// In-memory user repository for tests and development wiring.
///
/// Enforces the same email-uniqueness contract as the PostgreSQL adapter so
/// service tests exercise the conflict path without a database.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl FixtureUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the repository holds no users.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.lock();
        if users
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(UserStoreError::duplicate_email(user.email().as_ref()));
        }
        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.lock();
        if users
            .values()
            .any(|existing| existing.id() != user.id() && existing.email() == user.email())
        {
            return Err(UserStoreError::duplicate_email(user.email().as_ref()));
        }
        match users.get_mut(&user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(UserStoreError::query("user not found for update")),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserStoreError> {
        Ok(self.lock().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .lock()
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }
}
