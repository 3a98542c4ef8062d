//! Value Object Module

pub mod amount;
pub mod cause_category;
pub mod donation_status;
pub mod donor;
pub mod page;
pub mod payment_method;
pub mod time_range;

pub use kernel::id::DonationId;
