//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) with zeroized plaintext
//! - Header helpers (bearer tokens, client IP)
//! - Outbound mail transport over an HTTP relay

pub mod client;
pub mod mail;
pub mod password;
