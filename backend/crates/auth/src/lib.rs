//! Admin Authentication Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin entity, permission model, repository trait
//! - `application/` - Token service and use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Email + password login issuing a stateless HS256 bearer token
//! - Bearer-token middleware that resolves the active admin per request
//! - Any-of permission gate; super-admins hold every permission
//! - Out-of-band admin provisioning
//!
//! ## Security Model
//! - Passwords hashed with Argon2id off the async runtime
//! - Login failures never reveal which part was wrong
//! - Expired and forged tokens are indistinguishable to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use domain::value_object::permission::{Permission, PermissionSet, RequiredPermissions};
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAdminRepository;
pub use infra::postgres::PgAdminRepository;
pub use presentation::middleware::{AuthMiddlewareState, CurrentAdmin, authorize, require_admin};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::admin::Admin;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
