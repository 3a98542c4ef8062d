//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod provision_admin;
pub mod sign_in;
pub mod token;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use provision_admin::{ProvisionAdminInput, ProvisionAdminUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use token::{Claims, TokenService, TokenSubject};
