//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::email::Email;
use kernel::id::AdminId;

use crate::domain::entity::admin::Admin;
use crate::domain::value_object::admin_name::AdminName;
use crate::error::AuthResult;

/// Admin account repository
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Insert a new admin. Duplicate username/email surfaces as a conflict.
    async fn create(&self, admin: &Admin) -> AuthResult<()>;

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<Admin>>;

    /// Lookup by normalized (lower-cased) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Admin>>;

    async fn exists_by_username_or_email(
        &self,
        username: &AdminName,
        email: &Email,
    ) -> AuthResult<bool>;

    /// Persist mutable fields (password, permissions, active flag, last login)
    async fn update(&self, admin: &Admin) -> AuthResult<()>;
}
