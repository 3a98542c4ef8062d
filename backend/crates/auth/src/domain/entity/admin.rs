//! Admin Entity
//!
//! Operator account that can sign in to the back office.

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::AdminId;

use crate::domain::value_object::{
    admin_name::AdminName,
    admin_password::AdminPassword,
    admin_role::AdminRole,
    permission::PermissionSet,
};

#[derive(Debug, Clone)]
pub struct Admin {
    pub admin_id: AdminId,
    /// Unique display/login name
    pub username: AdminName,
    /// Unique, stored lower-cased
    pub email: Email,
    pub password_hash: AdminPassword,
    pub role: AdminRole,
    /// Explicit grants. Super-admins hold everything regardless.
    pub permissions: PermissionSet,
    pub last_login_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(
        username: AdminName,
        email: Email,
        password_hash: AdminPassword,
        role: AdminRole,
        permissions: PermissionSet,
    ) -> Self {
        let now = Utc::now();

        Self {
            admin_id: AdminId::new(),
            username,
            email,
            password_hash,
            role,
            permissions,
            last_login_at: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        self.record_login_at(Utc::now());
    }

    pub fn record_login_at(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
        self.updated_at = at;
    }

    pub fn can_authenticate(&self) -> bool {
        self.active
    }

    pub fn effective_permissions(&self) -> PermissionSet {
        self.permissions.effective_for(self.role)
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::admin_password::RawPassword;
    use crate::domain::value_object::permission::Permission;

    fn sample(role: AdminRole, permissions: PermissionSet) -> Admin {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        Admin::new(
            AdminName::new("treasurer").unwrap(),
            Email::new("Treasurer@Example.org").unwrap(),
            AdminPassword::from_raw(&raw).unwrap(),
            role,
            permissions,
        )
    }

    #[test]
    fn test_new_admin_defaults() {
        let admin = sample(AdminRole::Admin, PermissionSet::new());
        assert!(admin.active);
        assert!(admin.can_authenticate());
        assert!(admin.last_login_at.is_none());
        assert_eq!(admin.email.as_str(), "treasurer@example.org");
    }

    #[test]
    fn test_permissions_by_role() {
        let admin = sample(
            AdminRole::Admin,
            [Permission::ViewDonations].into_iter().collect(),
        );
        assert!(admin.effective_permissions().contains(Permission::ViewDonations));
        assert!(!admin.effective_permissions().contains(Permission::ExportData));

        let root = sample(AdminRole::SuperAdmin, PermissionSet::new());
        assert!(root.effective_permissions().contains(Permission::ExportData));
        assert_eq!(root.effective_permissions(), PermissionSet::all());
    }

    #[test]
    fn test_deactivate() {
        let mut admin = sample(AdminRole::Admin, PermissionSet::new());
        admin.set_active(false);
        assert!(!admin.can_authenticate());
    }

    #[test]
    fn test_record_login() {
        let mut admin = sample(AdminRole::Admin, PermissionSet::new());
        let at = Utc::now();
        admin.record_login_at(at);
        assert_eq!(admin.last_login_at, Some(at));
        assert_eq!(admin.updated_at, at);
    }
}
