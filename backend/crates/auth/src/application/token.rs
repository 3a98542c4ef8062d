//! Bearer Token Service
//!
//! Issues and verifies HS256 JWTs carrying `{sub, role, iat, exp}`.
//! Expiry is checked with zero leeway.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::AdminId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::admin_role::AdminRole;
use crate::error::{AuthError, AuthResult};

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id
    pub sub: String,
    pub role: AdminRole,
    pub iat: i64,
    pub exp: i64,
}

/// A verified token's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub admin_id: AdminId,
    pub role: AdminRole,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl_secs: config.token_ttl_secs(),
        }
    }

    pub fn issue(&self, admin_id: &AdminId, role: AdminRole) -> AuthResult<String> {
        self.issue_at(admin_id, role, Utc::now())
    }

    pub fn issue_at(
        &self,
        admin_id: &AdminId,
        role: AdminRole,
        now: DateTime<Utc>,
    ) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: admin_id.to_string(),
            role,
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Check signature and expiry; any failure is `InvalidToken`
    pub fn verify(&self, token: &str) -> AuthResult<TokenSubject> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AuthError::InvalidToken
        })?;

        let admin_id = data
            .claims
            .sub
            .parse::<AdminId>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(TokenSubject {
            admin_id,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::new(b"test-secret-test-secret".to_vec()))
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service();
        let admin_id = AdminId::new();
        let token = tokens.issue(&admin_id, AdminRole::SuperAdmin).unwrap();

        let subject = tokens.verify(&token).unwrap();
        assert_eq!(subject.admin_id, admin_id);
        assert_eq!(subject.role, AdminRole::SuperAdmin);
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let issued = Utc::now() - Duration::hours(25);
        let token = tokens
            .issue_at(&AdminId::new(), AdminRole::Admin, issued)
            .unwrap();

        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let other = TokenService::new(&AuthConfig::new(b"another-secret".to_vec()));
        let token = other.issue(&AdminId::new(), AdminRole::Admin).unwrap();

        assert!(matches!(service().verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_oversized_ttl_does_not_overflow_expiry() {
        let config = AuthConfig::new(b"test-secret-test-secret".to_vec())
            .with_token_ttl(std::time::Duration::from_secs(u64::MAX));
        let tokens = TokenService::new(&config);
        let token = tokens.issue(&AdminId::new(), AdminRole::Admin).unwrap();

        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(service().verify("not.a.jwt"), Err(AuthError::InvalidToken)));
        assert!(matches!(service().verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_claims_shape() {
        let tokens = service();
        let now = Utc::now();
        let token = tokens.issue_at(&AdminId::new(), AdminRole::Admin, now).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret-test-secret"),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.iat, now.timestamp());
        assert_eq!(data.claims.exp - data.claims.iat, 24 * 3600);
    }
}
