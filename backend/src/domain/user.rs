//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::credentials::PasswordHash;
use crate::domain::email::{EmailAddress, EmailValidationError};
use crate::domain::record::RecordMetadata;

/// Permission tier of a directory user.
///
/// Stored as a small integer: `HEAD = 1`, `EMPLOYEE = 2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Department head; the default tier for new users.
    #[default]
    Head,
    /// Regular employee.
    Employee,
}

impl Role {
    /// Stored integer code for this role.
    pub fn code(self) -> i16 {
        match self {
            Self::Head => 1,
            Self::Employee => 2,
        }
    }

    /// Decode a stored integer code.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Head),
            2 => Some(Self::Employee),
            _ => None,
        }
    }
}

/// Free-text descriptive fields attached to a user.
///
/// None of these fields carry validation: names may be empty and `dob` is
/// stored as unconstrained text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Job title.
    pub title: String,
    /// Given name; may be empty.
    pub first_name: String,
    /// Family name; may be empty.
    pub last_name: String,
    /// Age in years, when known.
    pub age: Option<i32>,
    /// Date of birth as free text.
    pub dob: String,
}

/// Validation errors raised when rebuilding a [`User`] from serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The email field failed normalization.
    Email(EmailValidationError),
    /// The role code did not name a known role.
    UnknownRole {
        /// The unrecognised stored code.
        code: i16,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => write!(f, "{err}"),
            Self::UnknownRole { code } => write!(f, "unknown role code {code}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<EmailValidationError> for UserValidationError {
    fn from(value: EmailValidationError) -> Self {
        Self::Email(value)
    }
}

/// Full field set of a stored user, used to rehydrate from a backing store.
#[derive(Debug, Clone)]
pub struct UserParts {
    /// Identity and audit timestamps.
    pub record: RecordMetadata,
    /// Normalized login email.
    pub email: EmailAddress,
    /// Descriptive free-text fields.
    pub profile: UserProfile,
    /// Stored credential hash; `None` marks an unusable password.
    pub password: Option<PasswordHash>,
    /// Administrative-site access flag.
    pub is_staff: bool,
    /// Unrestricted-permission flag.
    pub is_superuser: bool,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Permission tier.
    pub role: Role,
}

/// Directory user keyed by a normalized email address.
///
/// ## Invariants
/// - `email` is normalized and unique across the directory.
/// - The embedded [`RecordMetadata`] owns identity and audit timestamps.
/// - `role` is always one of the defined tiers; [`is_head`](User::is_head)
///   and [`is_employee`](User::is_employee) are mutually exclusive and
///   exhaustive.
///
/// Serialized forms never include the password hash; a deserialized user
/// carries an unusable password until one is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    record: RecordMetadata,
    email: EmailAddress,
    profile: UserProfile,
    password: Option<PasswordHash>,
    is_staff: bool,
    is_superuser: bool,
    is_active: bool,
    role: Role,
}

impl User {
    /// Build a new active, non-staff user with the default role.
    pub fn new(record: RecordMetadata, email: EmailAddress, profile: UserProfile) -> Self {
        Self {
            record,
            email,
            profile,
            password: None,
            is_staff: false,
            is_superuser: false,
            is_active: true,
            role: Role::default(),
        }
    }

    /// Rebuild a user from stored field values.
    pub fn from_parts(parts: UserParts) -> Self {
        let UserParts {
            record,
            email,
            profile,
            password,
            is_staff,
            is_superuser,
            is_active,
            role,
        } = parts;
        Self {
            record,
            email,
            profile,
            password,
            is_staff,
            is_superuser,
            is_active,
            role,
        }
    }

    /// Identity and audit timestamps.
    pub fn record(&self) -> &RecordMetadata {
        &self.record
    }

    /// Surrogate identifier.
    pub fn id(&self) -> Uuid {
        self.record.id()
    }

    /// Normalized login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Descriptive free-text fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Mutable access to the descriptive fields.
    pub fn profile_mut(&mut self) -> &mut UserProfile {
        &mut self.profile
    }

    /// Stored credential hash, when one is set.
    pub fn password(&self) -> Option<&PasswordHash> {
        self.password.as_ref()
    }

    /// Whether the user can authenticate by password at all.
    pub fn has_usable_password(&self) -> bool {
        self.password.is_some()
    }

    /// Administrative-site access flag.
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Unrestricted-permission flag.
    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    /// Soft-delete flag; inactive users are retained but treated as deleted.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Permission tier.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the user holds the head tier.
    pub fn is_head(&self) -> bool {
        self.role == Role::Head
    }

    /// Whether the user holds the employee tier.
    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }

    /// Hyphen-joined full name, e.g. `"Jane-Doe"`.
    pub fn full_name(&self) -> String {
        format!("{}-{}", self.profile.first_name, self.profile.last_name)
    }

    /// Replace the login email with an already-normalized address.
    pub fn set_email(&mut self, email: EmailAddress) {
        self.email = email;
    }

    /// Replace the stored credential; `None` makes the password unusable.
    pub fn set_password(&mut self, password: Option<PasswordHash>) {
        self.password = password;
    }

    /// Set the administrative-site access flag.
    pub fn set_staff(&mut self, is_staff: bool) {
        self.is_staff = is_staff;
    }

    /// Set the unrestricted-permission flag.
    pub fn set_superuser(&mut self, is_superuser: bool) {
        self.is_superuser = is_superuser;
    }

    /// Reinstate a soft-deleted user.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Soft-delete the user instead of removing the record.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Change the permission tier.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Record a mutation instant on the embedded metadata.
    pub(crate) fn touch(&mut self, now: chrono::DateTime<chrono::Utc>) {
        self.record.touch(now);
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.email.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    #[serde(flatten)]
    record: RecordMetadata,
    email: String,
    #[serde(flatten)]
    profile: UserProfile,
    is_staff: bool,
    is_superuser: bool,
    is_active: bool,
    role: i16,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            record,
            email,
            profile,
            password: _,
            is_staff,
            is_superuser,
            is_active,
            role,
        } = value;
        Self {
            record,
            email: email.into(),
            profile,
            is_staff,
            is_superuser,
            is_active,
            role: role.code(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            record,
            email,
            profile,
            is_staff,
            is_superuser,
            is_active,
            role,
        } = value;

        let email = EmailAddress::new(email)?;
        let role = Role::from_code(role).ok_or(UserValidationError::UnknownRole { code: role })?;

        Ok(Self::from_parts(UserParts {
            record,
            email,
            profile,
            password: None,
            is_staff,
            is_superuser,
            is_active,
            role,
        }))
    }
}
