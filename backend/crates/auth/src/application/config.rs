//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Default bearer token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

const GENERATED_SECRET_LENGTH: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing bearer tokens
    pub token_secret: Vec<u8>,
    /// Lifetime of an issued token
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Create config with a random signing secret. Tokens die with the process.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; GENERATED_SECRET_LENGTH];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret)
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Saturates at `i64::MAX` for lifetimes beyond the JWT range
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.token_secret.len(), GENERATED_SECRET_LENGTH);
        assert_ne!(a.token_secret, b.token_secret);
        assert_eq!(a.token_ttl_secs(), 24 * 3600);
    }

    #[test]
    fn test_oversized_ttl_saturates() {
        let config = AuthConfig::new(b"secret".to_vec()).with_token_ttl(Duration::from_secs(u64::MAX));
        assert_eq!(config.token_ttl_secs(), i64::MAX);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = AuthConfig::new(b"super-secret".to_vec());
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
