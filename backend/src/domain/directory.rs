//! User-directory orchestration service.
//!
//! This service owns the creation workflows:
//! - email normalization at the boundary;
//! - password hashing before anything touches a repository;
//! - staff/superuser flag assignment in a single insert;
//! - `updated_at` maintenance on saves.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::Error;
use crate::domain::credentials::PasswordHash;
use crate::domain::email::EmailAddress;
use crate::domain::ports::{
    NewUserRequest, ReferralRepository, ReferralStoreError, ReferralSubmission, UserDirectory,
    UserRepository, UserStoreError,
};
use crate::domain::record::RecordMetadata;
use crate::domain::referral::Referral;
use crate::domain::user::User;

/// Domain service implementing the [`UserDirectory`] port.
pub struct UserDirectoryService<U, R> {
    users: Arc<U>,
    referrals: Arc<R>,
    clock: Arc<dyn Clock>,
}

// Cloning shares the underlying repositories; `U` and `R` need not be Clone.
impl<U, R> Clone for UserDirectoryService<U, R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            referrals: Arc::clone(&self.referrals),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<U, R> UserDirectoryService<U, R> {
    /// Create a new directory service.
    pub fn new(users: Arc<U>, referrals: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            referrals,
            clock,
        }
    }
}

impl<U, R> UserDirectoryService<U, R>
where
    U: UserRepository,
    R: ReferralRepository,
{
    /// Shared creation path for regular users and superusers.
    async fn create(
        &self,
        request: NewUserRequest,
        is_staff: bool,
        is_superuser: bool,
    ) -> Result<User, Error> {
        let email = EmailAddress::new(&request.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let password = request
            .password
            .as_ref()
            .map(PasswordHash::from_plaintext)
            .transpose()
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;

        let mut user = User::new(
            RecordMetadata::new_at(self.clock.utc()),
            email,
            request.profile,
        );
        user.set_password(password);
        user.set_staff(is_staff);
        user.set_superuser(is_superuser);

        self.users
            .insert(&user)
            .await
            .map_err(map_user_store_error)?;
        Ok(user)
    }
}

#[async_trait]
impl<U, R> UserDirectory for UserDirectoryService<U, R>
where
    U: UserRepository,
    R: ReferralRepository,
{
    async fn create_user(&self, request: NewUserRequest) -> Result<User, Error> {
        self.create(request, false, false).await
    }

    async fn create_superuser(&self, request: NewUserRequest) -> Result<User, Error> {
        self.create(request, true, true).await
    }

    async fn save_user(&self, user: &mut User) -> Result<(), Error> {
        user.touch(self.clock.utc());
        self.users.update(user).await.map_err(map_user_store_error)
    }

    async fn submit_referral(&self, submission: ReferralSubmission) -> Result<Referral, Error> {
        let email = EmailAddress::new(&submission.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let referral = Referral::new(
            RecordMetadata::new_at(self.clock.utc()),
            email,
            submission.first_name,
            submission.last_name,
            submission.age,
            submission.dob,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.referrals
            .insert(&referral)
            .await
            .map_err(map_referral_store_error)?;
        Ok(referral)
    }
}

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::DuplicateEmail { email } => {
            Error::conflict(format!("a user with email {email} already exists"))
        }
        UserStoreError::Connection { message } => Error::service_unavailable(message),
        UserStoreError::Query { message } => Error::internal(message),
    }
}

fn map_referral_store_error(error: ReferralStoreError) -> Error {
    match error {
        ReferralStoreError::Connection { message } => Error::service_unavailable(message),
        ReferralStoreError::Query { message } => Error::internal(message),
    }
}

#[cfg(test)]
mod tests;
