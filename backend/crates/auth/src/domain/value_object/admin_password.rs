//! Admin Password Value Object
//!
//! Domain wrappers over `platform::password`.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::admin_password::{AdminPassword, RawPassword};
//!
//! let raw = RawPassword::new("donations-2024".to_string()).unwrap();
//! let hashed = AdminPassword::from_raw(&raw).unwrap();
//! assert!(hashed.verify(&RawPassword::candidate("donations-2024".to_string())));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;
use std::sync::OnceLock;

const DECOY_PASSWORD: &str = "no-such-admin-decoy";

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Plaintext password supplied by a caller; zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a password that is about to be stored
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::bad_request(format!("Password must be at least {} characters", min))
            }
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::bad_request(format!("Password must be at most {} characters", max))
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// A login attempt; never rejected by policy
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::candidate(raw))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Admin Password (Hashed, for storage)
// ============================================================================

/// Stored Argon2id hash of an admin password
#[derive(Clone, PartialEq, Eq)]
pub struct AdminPassword(HashedPassword);

impl AdminPassword {
    /// Hash a validated raw password. CPU-bound.
    pub fn from_raw(raw: &RawPassword) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash()
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))?;

        Ok(Self(hashed))
    }

    /// Parse a PHC string loaded from the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification. CPU-bound.
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(raw.inner())
    }

    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }

    /// Fixed hash verified against when no admin matches, so unknown
    /// emails cost the same Argon2 work as wrong passwords. Hashed on
    /// first use; CPU-bound.
    pub fn decoy() -> Option<&'static AdminPassword> {
        static DECOY: OnceLock<Option<AdminPassword>> = OnceLock::new();
        DECOY
            .get_or_init(|| AdminPassword::from_raw(&RawPassword::candidate(DECOY_PASSWORD.to_string())).ok())
            .as_ref()
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
