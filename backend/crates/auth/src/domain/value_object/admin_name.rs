//! Admin user name
//!
//! Trimmed display/login name, unique across admins.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

const ADMIN_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AdminName(String);

impl AdminName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let name = raw.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Username is required"));
        }

        if name.chars().count() > ADMIN_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                ADMIN_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Username contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdminName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_name_trims() {
        assert_eq!(AdminName::new("  treasurer ").unwrap().as_str(), "treasurer");
    }

    #[test]
    fn test_admin_name_invalid() {
        assert!(AdminName::new("").is_err());
        assert!(AdminName::new("   ").is_err());
        assert!(AdminName::new("a".repeat(65)).is_err());
        assert!(AdminName::new("bad\u{0000}name").is_err());
    }
}
