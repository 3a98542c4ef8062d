//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::DonationAppState;
pub use router::{admin_router, admin_router_generic, donation_router, donation_router_generic};
