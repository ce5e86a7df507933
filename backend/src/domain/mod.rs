//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed directory entities used by the service and
//! persistence layers. Keep types immutable where possible and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic error payload.
//! - RecordMetadata — surrogate identity plus audit timestamps.
//! - EmailAddress — normalized login identifier.
//! - PlaintextPassword / PasswordHash — credential primitives.
//! - User / UserProfile / Role — the directory user aggregate.
//! - Referral — free-standing signup referral record.
//! - UserDirectoryService — creation and save workflows over the ports.

pub mod credentials;
pub mod directory;
pub mod email;
pub mod error;
pub mod ports;
pub mod record;
pub mod referral;
pub mod user;

pub use self::credentials::{CredentialError, PasswordHash, PlaintextPassword};
pub use self::directory::UserDirectoryService;
pub use self::email::{EMAIL_MAX, EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::record::RecordMetadata;
pub use self::referral::{Referral, ReferralValidationError};
pub use self::user::{Role, User, UserParts, UserProfile, UserValidationError};

/// Convenient directory result alias.
///
/// # Examples
/// ```
/// use backend::domain::{DirectoryResult, Error, User};
///
/// fn lookup() -> DirectoryResult<Option<User>> {
///     Err(Error::service_unavailable("user store offline"))
/// }
/// ```
pub type DirectoryResult<T> = Result<T, Error>;
