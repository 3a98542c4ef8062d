//! Authenticate Use Case
//!
//! Resolves a bearer token to a live, active admin.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthenticateUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<Admin> {
        let subject = self.tokens.verify(token)?;

        let admin = self
            .repo
            .find_by_id(&subject.admin_id)
            .await?
            .ok_or(AuthError::AdminNotFound)?;

        if !admin.can_authenticate() {
            return Err(AuthError::AccountDeactivated);
        }

        Ok(admin)
    }
}
