//! In-memory admin repository for tests and local tooling.

use std::collections::HashMap;

use kernel::email::Email;
use kernel::id::AdminId;
use tokio::sync::RwLock;

use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_name::AdminName;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: RwLock<HashMap<AdminId, Admin>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove an admin, simulating deletion behind a live token
    pub async fn remove(&self, admin_id: &AdminId) -> Option<Admin> {
        self.admins.write().await.remove(admin_id)
    }

    pub async fn len(&self) -> usize {
        self.admins.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.admins.read().await.is_empty()
    }
}

impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, admin: &Admin) -> AuthResult<()> {
        let mut admins = self.admins.write().await;
        let taken = admins
            .values()
            .any(|a| a.username == admin.username || a.email == admin.email);
        if taken || admins.contains_key(&admin.admin_id) {
            return Err(AuthError::AdminExists);
        }
        admins.insert(admin.admin_id, admin.clone());
        Ok(())
    }

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<Admin>> {
        Ok(self.admins.read().await.get(admin_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Admin>> {
        Ok(self
            .admins
            .read()
            .await
            .values()
            .find(|a| &a.email == email)
            .cloned())
    }

    async fn exists_by_username_or_email(
        &self,
        username: &AdminName,
        email: &Email,
    ) -> AuthResult<bool> {
        Ok(self
            .admins
            .read()
            .await
            .values()
            .any(|a| &a.username == username || &a.email == email))
    }

    async fn update(&self, admin: &Admin) -> AuthResult<()> {
        let mut admins = self.admins.write().await;
        match admins.get_mut(&admin.admin_id) {
            Some(stored) => {
                *stored = admin.clone();
                Ok(())
            }
            None => Err(AuthError::AdminNotFound),
        }
    }
}
