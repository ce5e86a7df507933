//! Referral data model.
//!
//! A referral captures a prospective employee's details as submitted during
//! signup. Referrals are free-standing records: no field links back to the
//! referring user.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::email::{EmailAddress, EmailValidationError};
use crate::domain::record::RecordMetadata;

/// Validation errors returned by [`Referral::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferralValidationError {
    /// The email field failed normalization.
    Email(EmailValidationError),
    /// The first name was empty once trimmed.
    EmptyFirstName,
    /// The last name was empty once trimmed.
    EmptyLastName,
    /// The date-of-birth text was empty once trimmed.
    EmptyDob,
    /// The age was negative.
    NegativeAge,
}

impl fmt::Display for ReferralValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => write!(f, "{err}"),
            Self::EmptyFirstName => write!(f, "referral first name must not be empty"),
            Self::EmptyLastName => write!(f, "referral last name must not be empty"),
            Self::EmptyDob => write!(f, "referral date of birth must not be empty"),
            Self::NegativeAge => write!(f, "referral age must not be negative"),
        }
    }
}

impl std::error::Error for ReferralValidationError {}

impl From<EmailValidationError> for ReferralValidationError {
    fn from(value: EmailValidationError) -> Self {
        Self::Email(value)
    }
}

/// Prospective employee referred by an existing user.
///
/// ## Invariants
/// - All descriptive fields are required: names and `dob` are non-empty,
///   `age` is non-negative.
/// - `dob` remains free text; no date parsing is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ReferralDto", into = "ReferralDto")]
pub struct Referral {
    record: RecordMetadata,
    email: EmailAddress,
    first_name: String,
    last_name: String,
    age: i32,
    dob: String,
}

impl Referral {
    /// Validate and construct a referral.
    pub fn new(
        record: RecordMetadata,
        email: EmailAddress,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        dob: impl Into<String>,
    ) -> Result<Self, ReferralValidationError> {
        let first_name = first_name.into();
        if first_name.trim().is_empty() {
            return Err(ReferralValidationError::EmptyFirstName);
        }
        let last_name = last_name.into();
        if last_name.trim().is_empty() {
            return Err(ReferralValidationError::EmptyLastName);
        }
        let dob = dob.into();
        if dob.trim().is_empty() {
            return Err(ReferralValidationError::EmptyDob);
        }
        if age < 0 {
            return Err(ReferralValidationError::NegativeAge);
        }

        Ok(Self {
            record,
            email,
            first_name,
            last_name,
            age,
            dob,
        })
    }

    /// Identity and audit timestamps.
    pub fn record(&self) -> &RecordMetadata {
        &self.record
    }

    /// Surrogate identifier.
    pub fn id(&self) -> Uuid {
        self.record.id()
    }

    /// Candidate contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Candidate given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Candidate family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Candidate age in years.
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Candidate date of birth as submitted.
    pub fn dob(&self) -> &str {
        self.dob.as_str()
    }
}

impl fmt::Display for Referral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.email.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferralDto {
    #[serde(flatten)]
    record: RecordMetadata,
    email: String,
    first_name: String,
    last_name: String,
    age: i32,
    dob: String,
}

impl From<Referral> for ReferralDto {
    fn from(value: Referral) -> Self {
        let Referral {
            record,
            email,
            first_name,
            last_name,
            age,
            dob,
        } = value;
        Self {
            record,
            email: email.into(),
            first_name,
            last_name,
            age,
            dob,
        }
    }
}

impl TryFrom<ReferralDto> for Referral {
    type Error = ReferralValidationError;

    fn try_from(value: ReferralDto) -> Result<Self, Self::Error> {
        let ReferralDto {
            record,
            email,
            first_name,
            last_name,
            age,
            dob,
        } = value;

        let email = EmailAddress::new(email)?;
        Referral::new(record, email, first_name, last_name, age, dob)
    }
}
