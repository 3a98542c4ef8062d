//! Donor contact details

use kernel::email::Email;
use kernel::error::app_error::{AppError, AppResult};

const DONOR_NAME_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donor {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Donor {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> AppResult<Self> {
        let name = non_blank(name).ok_or_else(|| AppError::bad_request("Donor name is required"))?;
        if name.chars().count() > DONOR_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Donor name must be at most {} characters",
                DONOR_NAME_MAX_LENGTH
            )));
        }

        let email = non_blank(email).ok_or_else(|| AppError::bad_request("Donor email is required"))?;
        let email = Email::new(email)?;

        Ok(Self {
            name,
            email,
            phone: non_blank(phone),
            address: non_blank(address),
        })
    }
}

/// Trim; blank becomes absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_valid_donor() {
        let donor = Donor::new(some(" Asha "), some("Asha@Example.com"), some("  "), None).unwrap();
        assert_eq!(donor.name, "Asha");
        assert_eq!(donor.email.as_str(), "asha@example.com");
        assert_eq!(donor.phone, None);
    }

    #[test]
    fn test_required_fields() {
        assert!(Donor::new(None, some("a@x.com"), None, None).is_err());
        assert!(Donor::new(some("  "), some("a@x.com"), None, None).is_err());
        assert!(Donor::new(some("A"), None, None, None).is_err());
        assert!(Donor::new(some("A"), some("not-an-email"), None, None).is_err());
    }
}
