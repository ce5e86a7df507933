//! Driving port for user-directory use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters (the
//! `create-admin` binary, future HTTP handlers) call it to create and amend
//! directory records without knowing the backing infrastructure.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::credentials::PlaintextPassword;
use crate::domain::referral::Referral;
use crate::domain::user::{User, UserProfile};

/// Inputs for creating a directory user.
#[derive(Debug, Clone, Default)]
pub struct NewUserRequest {
    /// Login email; normalized by the directory before storage.
    pub email: String,
    /// Optional plaintext password; omitted means the account starts with
    /// an unusable password.
    pub password: Option<PlaintextPassword>,
    /// Descriptive free-text fields.
    pub profile: UserProfile,
}

/// Inputs for recording a referral; every field is required.
#[derive(Debug, Clone, Default)]
pub struct ReferralSubmission {
    /// Candidate contact email.
    pub email: String,
    /// Candidate given name.
    pub first_name: String,
    /// Candidate family name.
    pub last_name: String,
    /// Candidate age in years.
    pub age: i32,
    /// Candidate date of birth as free text.
    pub dob: String,
}

/// Domain use-case port for the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create a regular user: active, non-staff, non-superuser.
    async fn create_user(&self, request: NewUserRequest) -> Result<User, Error>;

    /// Create an administrator: active, staff, superuser.
    async fn create_superuser(&self, request: NewUserRequest) -> Result<User, Error>;

    /// Persist a mutated user, refreshing its `updated_at` timestamp.
    async fn save_user(&self, user: &mut User) -> Result<(), Error>;

    /// Validate and record a referral submission.
    async fn submit_referral(&self, submission: ReferralSubmission) -> Result<Referral, Error>;
}
