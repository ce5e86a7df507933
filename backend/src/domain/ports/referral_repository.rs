//! Port abstraction for referral persistence adapters and their errors.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::referral::Referral;

/// Persistence errors raised by referral repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferralStoreError {
    /// Repository connection could not be established.
    #[error("referral store connection failed: {message}")]
    Connection {
        /// Failure description from the backing store.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("referral store query failed: {message}")]
    Query {
        /// Failure description from the backing store.
        message: String,
    },
}

impl ReferralStoreError {
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
}

/// Durable storage for referral records.
#[async_trait]
pub trait ReferralRepository: Send + Sync {
    /// Insert a new referral record.
    async fn insert(&self, referral: &Referral) -> Result<(), ReferralStoreError>;

    /// Fetch a referral by surrogate identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Referral>, ReferralStoreError>;
}

/// In-memory referral repository for tests and development wiring.
#[derive(Debug, Default)]
pub struct FixtureReferralRepository {
    referrals: Mutex<HashMap<Uuid, Referral>>,
}

impl FixtureReferralRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored referrals.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the repository holds no referrals.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Referral>> {
        self.referrals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ReferralRepository for FixtureReferralRepository {
    async fn insert(&self, referral: &Referral) -> Result<(), ReferralStoreError> {
        self.lock().insert(referral.id(), referral.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Referral>, ReferralStoreError> {
        Ok(self.lock().get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::email::EmailAddress;
    use crate::domain::record::RecordMetadata;
    use rstest::rstest;

    fn sample_referral() -> Referral {
        Referral::new(
            RecordMetadata::new(),
            EmailAddress::new("candidate@example.com").expect("valid test email"),
            "Sam",
            "Field",
            29,
            "1996-11-23",
        )
        .expect("valid referral")
    }

    #[rstest]
    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = FixtureReferralRepository::new();
        let referral = sample_referral();

        repo.insert(&referral).await.expect("insert succeeds");

        let found = repo
            .find_by_id(referral.id())
            .await
            .expect("query succeeds");
        assert_eq!(found, Some(referral));
        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_referrals_return_none() {
        let repo = FixtureReferralRepository::new();
        let found = repo
            .find_by_id(Uuid::new_v4())
            .await
            .expect("query succeeds");
        assert!(found.is_none());
        assert!(repo.is_empty());
    }
}
