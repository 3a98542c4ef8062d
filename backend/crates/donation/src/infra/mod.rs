//! Infrastructure Layer
//!
//! Database implementations and the mail-backed receipt notifier.

pub mod mail;
pub mod memory;
pub mod postgres;

pub use mail::{ConfiguredNotifier, MailReceiptNotifier};
pub use memory::InMemoryDonationRepository;
pub use postgres::PgDonationRepository;
