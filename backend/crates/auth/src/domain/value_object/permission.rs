//! Permission Value Objects
//!
//! Capability tags granted to admins, and the any-of requirement a route
//! declares. Authorization is a set intersection between the two.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::admin_role::AdminRole;

/// A single capability tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDonations,
    ManageDonations,
    ViewAnalytics,
    ManageAdmins,
    SendEmails,
    ExportData,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::ViewDonations,
        Permission::ManageDonations,
        Permission::ViewAnalytics,
        Permission::ManageAdmins,
        Permission::SendEmails,
        Permission::ExportData,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Permission::ViewDonations => "view_donations",
            Permission::ManageDonations => "manage_donations",
            Permission::ViewAnalytics => "view_analytics",
            Permission::ManageAdmins => "manage_admins",
            Permission::SendEmails => "send_emails",
            Permission::ExportData => "export_data",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Set of permissions held by an admin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every capability; what the super-admin role effectively holds
    pub fn all() -> Self {
        Permission::ALL.into_iter().collect()
    }

    /// Parse stored tags; unknown tags are an error, not silently dropped
    pub fn from_codes<I, S>(codes: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .map(|code| {
                let code = code.as_ref().trim();
                Permission::from_code(code).ok_or_else(|| format!("Unknown permission: {}", code))
            })
            .collect()
    }

    pub fn codes(&self) -> Vec<String> {
        self.0.iter().map(|p| p.code().to_string()).collect()
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    /// Permissions this role actually holds: the full set for super-admins,
    /// the explicit set otherwise.
    pub fn effective_for(&self, role: AdminRole) -> PermissionSet {
        if role.is_super_admin() {
            Self::all()
        } else {
            self.clone()
        }
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Any-of permission requirement declared by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredPermissions(&'static [Permission]);

impl RequiredPermissions {
    pub const fn any_of(permissions: &'static [Permission]) -> Self {
        Self(permissions)
    }

    pub fn permissions(&self) -> &'static [Permission] {
        self.0
    }

    /// True iff `held` intersects the required set.
    ///
    /// An empty requirement is never satisfied.
    pub fn is_satisfied_by(&self, held: &PermissionSet) -> bool {
        self.0.iter().any(|p| held.contains(*p))
    }
}
