//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::AdminRepository;
use crate::infra::postgres::PgAdminRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: Arc<PgAdminRepository>, tokens: Arc<TokenService>) -> Router {
    auth_router_generic(repo, tokens)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: Arc<R>, tokens: Arc<TokenService>) -> Router
where
    R: AdminRepository + Send + Sync + 'static,
{
    let state = AuthAppState { repo, tokens };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}
