//! Email address value object with login-identifier normalization.
//!
//! The directory keys users by email, so the address is normalized once at
//! the boundary and stored in canonical form: surrounding whitespace is
//! trimmed and the domain part is lowercased. The local part is preserved
//! as given because mailbox names are case-sensitive in principle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum stored length of an email address, in characters.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    /// The address was empty once trimmed.
    Empty,
    /// The address had no `@` separator, or an empty local/domain part.
    MissingParts,
    /// The address contained interior whitespace.
    ContainsWhitespace,
    /// The address exceeded [`EMAIL_MAX`] characters.
    TooLong {
        /// The enforced maximum length.
        max: usize,
    },
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email address must not be empty"),
            Self::MissingParts => {
                write!(f, "email address must have a local part and a domain")
            }
            Self::ContainsWhitespace => {
                write!(f, "email address must not contain whitespace")
            }
            Self::TooLong { max } => {
                write!(f, "email address must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// Normalized email address used as the login identifier.
///
/// ## Invariants
/// - Non-empty, at most [`EMAIL_MAX`] characters, no whitespace.
/// - Exactly one split into local part and domain at the last `@`.
/// - The domain part is stored lowercased.
///
/// # Examples
/// ```
/// use backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Jane.Doe@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "Jane.Doe@example.com");
/// assert_eq!(email.domain(), "example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate, normalize, and construct an [`EmailAddress`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(EmailValidationError::ContainsWhitespace);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX });
        }

        let (local, domain) = trimmed
            .rsplit_once('@')
            .ok_or(EmailValidationError::MissingParts)?;
        if local.is_empty() || domain.is_empty() {
            return Err(EmailValidationError::MissingParts);
        }

        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }

    /// Domain part of the normalized address.
    pub fn domain(&self) -> &str {
        // The invariant guarantees exactly one usable split point.
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com", "user@example.com")]
    #[case("  user@example.com  ", "user@example.com")]
    #[case("User@EXAMPLE.COM", "User@example.com")]
    #[case("first.last@Mail.Example.Org", "first.last@mail.example.org")]
    fn normalization_lowercases_the_domain_only(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), expected);
    }

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("   ", EmailValidationError::Empty)]
    #[case("no-at-sign", EmailValidationError::MissingParts)]
    #[case("@example.com", EmailValidationError::MissingParts)]
    #[case("user@", EmailValidationError::MissingParts)]
    #[case("user name@example.com", EmailValidationError::ContainsWhitespace)]
    fn malformed_addresses_are_rejected(
        #[case] raw: &str,
        #[case] expected: EmailValidationError,
    ) {
        let err = EmailAddress::new(raw).expect_err("malformed input must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn overlong_addresses_are_rejected() {
        let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
        let err = EmailAddress::new(raw).expect_err("overlong input must fail");
        assert_eq!(err, EmailValidationError::TooLong { max: EMAIL_MAX });
    }

    #[rstest]
    fn normalized_forms_compare_equal() {
        let a = EmailAddress::new("user@Example.Com").expect("valid email");
        let b = EmailAddress::new("user@example.com").expect("valid email");
        assert_eq!(a, b);
    }

    #[rstest]
    fn domain_accessor_returns_the_lowercased_part() {
        let email = EmailAddress::new("user@Sub.Example.COM").expect("valid email");
        assert_eq!(email.domain(), "sub.example.com");
    }

    #[rstest]
    fn serde_round_trips_through_the_normalized_string() {
        let email = EmailAddress::new("User@EXAMPLE.com").expect("valid email");
        let json = serde_json::to_string(&email).expect("serialise");
        assert_eq!(json, "\"User@example.com\"");

        let back: EmailAddress = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, email);
    }

    #[rstest]
    fn serde_rejects_malformed_strings() {
        let result: Result<EmailAddress, _> = serde_json::from_str("\"not-an-email\"");
        assert!(result.is_err());
    }
}
