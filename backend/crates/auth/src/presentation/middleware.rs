//! Auth Middleware
//!
//! `require_admin` resolves the bearer token to an active admin and stores it
//! in request extensions. `authorize` then checks a route's permission set
//! against that admin. Mount both with `route_layer`, authentication outermost.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::client::extract_bearer_token;
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::application::token::TokenService;
use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::permission::RequiredPermissions;
use crate::error::AuthError;

/// Middleware state
pub struct AuthMiddlewareState<R>
where
    R: AdminRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthMiddlewareState<R>
where
    R: AdminRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }
}

impl<R> Clone for AuthMiddlewareState<R>
where
    R: AdminRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

/// The authenticated admin for this request
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Admin);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Middleware that requires a valid bearer token for an active admin
pub async fn require_admin<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AdminRepository + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers()).map_err(|_| AuthError::MissingToken)?;

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());
    let admin = use_case.execute(token).await?;

    tracing::debug!(admin_id = %admin.admin_id, "Admin authenticated");

    req.extensions_mut().insert(CurrentAdmin(admin));
    Ok(next.run(req).await)
}

/// Permission gate with any-of semantics
pub async fn authorize(
    State(required): State<RequiredPermissions>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(CurrentAdmin(admin)) = req.extensions().get::<CurrentAdmin>() else {
        tracing::error!("Permission gate reached without an authenticated admin");
        return Err(AuthError::MissingToken);
    };

    if !required.is_satisfied_by(&admin.effective_permissions()) {
        tracing::warn!(
            admin_id = %admin.admin_id,
            required = ?required.permissions(),
            "Admin lacks required permission"
        );
        return Err(AuthError::InsufficientPermission);
    }

    Ok(next.run(req).await)
}
