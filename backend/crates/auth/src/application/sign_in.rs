//! Sign In Use Case
//!
//! Verifies admin credentials and issues a bearer token.

use std::net::IpAddr;
use std::sync::Arc;

use kernel::email::Email;

use crate::application::token::TokenService;
use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_password::{AdminPassword, RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
    /// Used for logging only
    pub client_ip: Option<IpAddr>,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub token: String,
    pub admin: Admin,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> SignInUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let ip = input
            .client_ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        tracing::info!(email = %input.email.trim(), client_ip = %ip, "Admin login attempt");

        // Malformed input gets the same answer as a wrong password
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let candidate = RawPassword::candidate(input.password);
        if candidate.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let found = self.repo.find_by_email(&email).await?;

        // Unknown emails verify against a decoy so both failures cost one hash
        let stored = found.as_ref().map(|admin| admin.password_hash.clone());
        let (password_valid, upgraded) = tokio::task::spawn_blocking(move || match stored {
            Some(hash) => {
                let valid = hash.verify(&candidate);
                let upgraded = (valid && hash.needs_rehash())
                    .then(|| AdminPassword::from_raw(&candidate).ok())
                    .flatten();
                (valid, upgraded)
            }
            None => {
                if let Some(decoy) = AdminPassword::decoy() {
                    let _ = decoy.verify(&candidate);
                }
                (false, None)
            }
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?;

        let Some(mut admin) = found else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        if !admin.can_authenticate() {
            tracing::warn!(admin_id = %admin.admin_id, "Login attempt on deactivated admin");
            return Err(AuthError::InvalidCredentials);
        }

        if let Some(hash) = upgraded {
            tracing::info!(admin_id = %admin.admin_id, "Upgrading stored password hash");
            admin.password_hash = hash;
        }

        admin.record_login();
        self.repo.update(&admin).await?;

        let token = self.tokens.issue(&admin.admin_id, admin.role)?;

        tracing::info!(
            admin_id = %admin.admin_id,
            role = %admin.role,
            client_ip = %ip,
            "Admin signed in"
        );

        Ok(SignInOutput { token, admin })
    }
}
