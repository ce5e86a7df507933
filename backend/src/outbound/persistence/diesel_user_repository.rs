//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `UserRepository` port. It owns the
//! translation between the `users` table and the domain aggregate, including
//! surfacing the unique email index as a duplicate-email error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserStoreError};
use crate::domain::{
    EmailAddress, PasswordHash, RecordMetadata, Role, User, UserParts, UserProfile,
};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to user store errors.
fn map_pool_error(error: PoolError) -> UserStoreError {
    match error {
        PoolError::Configuration { message }
        | PoolError::Build { message }
        | PoolError::Checkout { message } => UserStoreError::connection(message),
    }
}

/// Map Diesel errors to user store errors.
fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
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
        DieselError::NotFound => UserStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => UserStoreError::query("database error"),
        _ => UserStoreError::query("database error"),
    }
}

/// Map Diesel write errors, surfacing the unique email index as a conflict.
fn map_write_error(error: diesel::result::Error, email: &EmailAddress) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        return UserStoreError::duplicate_email(email.as_ref());
    }
    map_diesel_error(error)
}

/// Convert a database row to a domain user.
fn row_to_user(row: UserRow) -> Result<User, UserStoreError> {
    let email = EmailAddress::new(&row.email)
        .map_err(|err| UserStoreError::query(format!("stored email is invalid: {err}")))?;

    let role = Role::from_code(row.role).unwrap_or_else(|| {
        tracing::warn!(
            code = row.role,
            user_id = %row.id,
            "unrecognised role code, defaulting to Head"
        );
        Role::Head
    });

    let password = row.password_hash.and_then(|stored| {
        PasswordHash::from_phc(stored)
            .map_err(|err| {
                tracing::warn!(
                    user_id = %row.id,
                    error = %err,
                    "stored password hash is malformed, treating as unusable"
                );
            })
            .ok()
    });

    Ok(User::from_parts(UserParts {
        record: RecordMetadata::from_parts(row.id, row.created_at, row.updated_at),
        email,
        profile: UserProfile {
            title: row.title,
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age,
            dob: row.dob,
        },
        password,
        is_staff: row.is_staff,
        is_superuser: row.is_superuser,
        is_active: row.is_active,
        role,
    }))
}

/// Borrow a domain user as an insertable row.
fn user_to_new_row(user: &User) -> NewUserRow<'_> {
    let profile = user.profile();
    NewUserRow {
        id: user.id(),
        email: user.email().as_ref(),
        title: profile.title.as_str(),
        first_name: profile.first_name.as_str(),
        last_name: profile.last_name.as_str(),
        age: profile.age,
        dob: profile.dob.as_str(),
        password_hash: user.password().map(PasswordHash::as_str),
        is_staff: user.is_staff(),
        is_active: user.is_active(),
        is_superuser: user.is_superuser(),
        role: user.role().code(),
        created_at: user.record().created_at(),
        updated_at: user.record().updated_at(),
    }
}

/// Borrow a domain user as an update changeset.
fn user_to_changeset(user: &User) -> UserChangeset<'_> {
    let profile = user.profile();
    UserChangeset {
        email: user.email().as_ref(),
        title: profile.title.as_str(),
        first_name: profile.first_name.as_str(),
        last_name: profile.last_name.as_str(),
        age: Some(profile.age),
        dob: profile.dob.as_str(),
        password_hash: Some(user.password().map(PasswordHash::as_str)),
        is_staff: user.is_staff(),
        is_active: user.is_active(),
        is_superuser: user.is_superuser(),
        role: user.role().code(),
        updated_at: user.record().updated_at(),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(&user_to_new_row(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, user.email()))
    }

    async fn update(&self, user: &User) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(users::table.filter(users::id.eq(user.id())))
            .set(&user_to_changeset(user))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user.email()))?;

        if updated_rows == 0 {
            return Err(UserStoreError::query("user not found for update"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
