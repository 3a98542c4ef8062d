//! Client identification utilities
//!
//! Functions for reading caller identity out of HTTP headers.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Why a bearer token could not be read from the request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerTokenError {
    #[error("Missing Authorization header")]
    Missing,
    #[error("Malformed Authorization header")]
    Malformed,
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively; exactly one non-empty token
/// must follow it.
///
/// ## Returns
/// * `Ok(token)` - the raw token text
/// * `Err(BearerTokenError)` - header absent, not UTF-8, wrong scheme, or empty
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerTokenError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerTokenError::Missing)?
        .to_str()
        .map_err(|_| BearerTokenError::Malformed)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(BearerTokenError::Malformed),
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}
