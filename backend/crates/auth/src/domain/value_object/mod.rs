//! Value Object Module

pub mod admin_name;
pub mod admin_password;
pub mod admin_role;
pub mod permission;

pub use kernel::email::Email;
pub use kernel::id::AdminId;
