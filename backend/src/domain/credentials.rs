//! Credential primitives: plaintext password handling and stored hashes.
//!
//! Plaintext passwords only exist in memory long enough to be hashed or
//! verified, and are zeroized on drop. The stored form is an Argon2id hash
//! in PHC string format; nothing in this crate persists or serializes a
//! plaintext credential.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::RngCore;
use zeroize::Zeroizing;

/// Errors raised when handling credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The plaintext password was empty.
    EmptyPassword,
    /// The hashing backend failed.
    Hashing {
        /// Failure description from the hashing backend.
        message: String,
    },
    /// A stored hash string was not a parseable PHC string.
    MalformedHash,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::Hashing { message } => write!(f, "password hashing failed: {message}"),
            Self::MalformedHash => write!(f, "stored password hash is not a valid PHC string"),
        }
    }
}

impl std::error::Error for CredentialError {}

/// A plaintext password held in zeroized memory.
///
/// ## Invariants
/// - Non-empty; caller-provided whitespace is preserved to avoid surprising
///   credential comparisons.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextPassword(Zeroizing<String>);

impl PlaintextPassword {
    /// Construct a password from raw input.
    pub fn new(raw: impl Into<String>) -> Result<Self, CredentialError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Password bytes for hashing and verification.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlaintextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlaintextPassword(***)")
    }
}

/// Argon2id password hash in PHC string format.
///
/// # Examples
/// ```
/// use backend::domain::{PasswordHash, PlaintextPassword};
///
/// let plaintext = PlaintextPassword::new("correct horse battery staple").unwrap();
/// let hash = PasswordHash::from_plaintext(&plaintext).unwrap();
///
/// assert_ne!(hash.as_str(), plaintext.as_str());
/// assert!(hash.verify(&plaintext));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password with a freshly generated salt.
    pub fn from_plaintext(plaintext: &PlaintextPassword) -> Result<Self, CredentialError> {
        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| CredentialError::Hashing {
            message: err.to_string(),
        })?;

        Argon2::default()
            .hash_password(plaintext.as_str().as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| CredentialError::Hashing {
                message: err.to_string(),
            })
    }

    /// Rebuild a hash from its stored PHC string.
    pub fn from_phc(stored: impl Into<String>) -> Result<Self, CredentialError> {
        let stored = stored.into();
        PhcHash::new(&stored).map_err(|_| CredentialError::MalformedHash)?;
        Ok(Self(stored))
    }

    /// The PHC string as persisted.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Check a plaintext password against this hash.
    pub fn verify(&self, plaintext: &PlaintextPassword) -> bool {
        let Ok(parsed) = PhcHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_str().as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
