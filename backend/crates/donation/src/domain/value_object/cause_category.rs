use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

const CAUSE_CATEGORY_MAX_LENGTH: usize = 100;

/// Free-form cause a donation supports, e.g. "education"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CauseCategory(String);

impl CauseCategory {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let category = raw.as_ref().trim();

        if category.is_empty() {
            return Err(AppError::bad_request("Cause category is required"));
        }

        if category.chars().count() > CAUSE_CATEGORY_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Cause category must be at most {} characters",
                CAUSE_CATEGORY_MAX_LENGTH
            )));
        }

        Ok(Self(category.to_string()))
    }

    pub fn from_db(category: impl Into<String>) -> Self {
        Self(category.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CauseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cause_category() {
        assert_eq!(CauseCategory::new(" education ").unwrap().as_str(), "education");
        assert!(CauseCategory::new("   ").is_err());
        assert!(CauseCategory::new("x".repeat(101)).is_err());
    }
}
