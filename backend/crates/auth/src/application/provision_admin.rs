//! Provision Admin Use Case
//!
//! Creates an admin account out of band (there is no sign-up route).

use std::sync::Arc;

use kernel::email::Email;

use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    admin_name::AdminName,
    admin_password::{AdminPassword, RawPassword},
    admin_role::AdminRole,
    permission::PermissionSet,
};
use crate::error::{AuthError, AuthResult};

pub struct ProvisionAdminInput {
    pub username: String,
    pub email: String,
    pub password: String,
    /// `admin` when absent
    pub role: Option<String>,
    /// Permission tags
    pub permissions: Vec<String>,
}

pub struct ProvisionAdminUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
}

impl<R> ProvisionAdminUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ProvisionAdminInput) -> AuthResult<Admin> {
        let username = AdminName::new(&input.username)?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let role = match input.role.as_deref().map(str::trim) {
            None | Some("") => AdminRole::default(),
            Some(code) => AdminRole::from_code(code)
                .ok_or_else(|| AuthError::Validation(format!("Unknown role: {}", code)))?,
        };

        let permissions = PermissionSet::from_codes(
            input.permissions.iter().filter(|p| !p.trim().is_empty()),
        )
        .map_err(AuthError::Validation)?;

        if self
            .repo
            .exists_by_username_or_email(&username, &email)
            .await?
        {
            return Err(AuthError::AdminExists);
        }

        let password_hash =
            tokio::task::spawn_blocking(move || AdminPassword::from_raw(&raw_password))
                .await
                .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))??;

        let admin = Admin::new(username, email, password_hash, role, permissions);
        self.repo.create(&admin).await?;

        tracing::info!(
            admin_id = %admin.admin_id,
            username = %admin.username,
            role = %admin.role,
            "Admin provisioned"
        );

        Ok(admin)
    }
}
