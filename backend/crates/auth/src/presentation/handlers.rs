//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, FromRequestParts, State};
use axum::http::request::Parts;
use kernel::envelope::ApiResponse;
use platform::client::extract_client_ip;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::application::{SignInInput, SignInUseCase};
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AdminProfile, LoginRequest, LoginResponse};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: AdminRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

impl<R> Clone for AuthAppState<R>
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

/// Best-effort client address: `X-Forwarded-For` first, then the socket.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        Ok(ClientIp(extract_client_ip(&parts.headers, peer)))
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/admin/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ClientIp(client_ip): ClientIp,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<ApiResponse<LoginResponse>>>
where
    R: AdminRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| AuthError::Validation(rejection.body_text()))?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
            client_ip,
        })
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: output.token,
        admin: AdminProfile::from(&output.admin),
    })))
}
