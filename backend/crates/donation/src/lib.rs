//! Donation Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Donation entity, value objects, aggregation read models, repository traits
//! - `application/` - Submission, queries, status updates, dashboard, analytics, export, receipts
//! - `infra/` - PostgreSQL and in-memory repositories, mail-backed receipt notifier
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! Submission and read-by-id/category/total are public. Listing, status
//! changes and all reporting go through the auth crate's bearer-token
//! middleware and permission gate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::DonationConfig;
pub use application::receipt::{LogOnlyNotifier, ReceiptNotifier};
pub use error::{DonationError, DonationResult};
pub use infra::mail::{ConfiguredNotifier, MailReceiptNotifier};
pub use infra::memory::InMemoryDonationRepository;
pub use infra::postgres::PgDonationRepository;
pub use presentation::router::{admin_router, donation_router};
