//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::admin::Admin;
use crate::domain::value_object::{admin_role::AdminRole, permission::PermissionSet};

/// Login request
///
/// Missing fields deserialize as empty and are rejected as bad credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of an admin. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub permissions: PermissionSet,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.admin_id.to_string(),
            username: admin.username.as_str().to_string(),
            email: admin.email.as_str().to_string(),
            role: admin.role,
            permissions: admin.permissions.clone(),
            last_login: admin.last_login_at,
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}
