//! PostgreSQL-backed `ReferralRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ReferralRepository, ReferralStoreError};
use crate::domain::{EmailAddress, RecordMetadata, Referral};

use super::models::{NewReferralRow, ReferralRow};
use super::pool::{DbPool, PoolError};
use super::schema::referrals;

/// Diesel-backed implementation of the `ReferralRepository` port.
#[derive(Clone)]
pub struct DieselReferralRepository {
    pool: DbPool,
}

impl DieselReferralRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to referral store errors.
fn map_pool_error(error: PoolError) -> ReferralStoreError {
    match error {
        PoolError::Configuration { message }
        | PoolError::Build { message }
        | PoolError::Checkout { message } => ReferralStoreError::connection(message),
    }
}

/// Map Diesel errors to referral store errors.
fn map_diesel_error(error: diesel::result::Error) -> ReferralStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ReferralStoreError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ReferralStoreError::connection("database connection error")
        }
        _ => ReferralStoreError::query("database error"),
    }
}

/// Convert a database row to a domain referral.
fn row_to_referral(row: ReferralRow) -> Result<Referral, ReferralStoreError> {
    let email = EmailAddress::new(&row.email)
        .map_err(|err| ReferralStoreError::query(format!("stored email is invalid: {err}")))?;

    Referral::new(
        RecordMetadata::from_parts(row.id, row.created_at, row.updated_at),
        email,
        row.first_name,
        row.last_name,
        row.age,
        row.dob,
    )
    .map_err(|err| ReferralStoreError::query(format!("stored referral is invalid: {err}")))
}

/// Borrow a domain referral as an insertable row.
fn referral_to_new_row(referral: &Referral) -> NewReferralRow<'_> {
    NewReferralRow {
        id: referral.id(),
        email: referral.email().as_ref(),
        first_name: referral.first_name(),
        last_name: referral.last_name(),
        age: referral.age(),
        dob: referral.dob(),
        created_at: referral.record().created_at(),
        updated_at: referral.record().updated_at(),
    }
}

#[async_trait]
impl ReferralRepository for DieselReferralRepository {
    async fn insert(&self, referral: &Referral) -> Result<(), ReferralStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(referrals::table)
            .values(&referral_to_new_row(referral))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Referral>, ReferralStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ReferralRow> = referrals::table
            .filter(referrals::id.eq(id))
            .select(ReferralRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_referral).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn sample_row() -> ReferralRow {
        let now = Utc::now();
        ReferralRow {
            id: Uuid::new_v4(),
            email: "candidate@example.com".to_owned(),
            first_name: "Sam".to_owned(),
            last_name: "Field".to_owned(),
            age: 29,
            dob: "1996-11-23".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(repo_err, ReferralStoreError::Connection { .. }));
    }

    #[rstest]
    fn row_to_referral_converts_all_fields() {
        let row = sample_row();
        let id = row.id;

        let referral = row_to_referral(row).expect("valid row converts");
        assert_eq!(referral.id(), id);
        assert_eq!(referral.email().as_ref(), "candidate@example.com");
        assert_eq!(referral.age(), 29);
    }

    #[rstest]
    fn row_to_referral_rejects_a_corrupt_email() {
        let mut row = sample_row();
        row.email = "not-an-email".to_owned();

        let err = row_to_referral(row).expect_err("corrupt email must fail");
        assert!(matches!(err, ReferralStoreError::Query { .. }));
    }

    #[rstest]
    fn new_row_mirrors_the_domain_referral() {
        let row = sample_row();
        let referral = row_to_referral(row).expect("valid row converts");

        let new_row = referral_to_new_row(&referral);
        assert_eq!(new_row.id, referral.id());
        assert_eq!(new_row.email, "candidate@example.com");
        assert_eq!(new_row.age, 29);
    }
}
