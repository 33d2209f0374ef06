//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use quill_core::ports::{AuthError, TokenClaims, TokenService};

/// Fixed token validity window: 24 hours.
pub const DEFAULT_TTL_SECONDS: i64 = 86_400;

/// JWT token service configuration. The secret is injected here once at
/// startup; it is never rotated during the process lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

/// Internal claims structure for serialization. The subject is the user's
/// email address.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256-signed stateless token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires_at = now + TimeDelta::seconds(self.config.ttl_seconds);

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        // No clock-skew tolerance: an expired token is expired.
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(TokenClaims {
            subject: token_data.claims.sub,
            issued_at: token_data.claims.iat,
            expires_at: token_data.claims.exp,
        })
    }

    fn expires_in(&self) -> u64 {
        self.config.ttl_seconds as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-key")
    }

    #[test]
    fn test_issue_token_success() {
        let service = JwtTokenService::new(test_config());

        let token = service.issue("writer@example.com").unwrap();

        assert!(!token.is_empty());
    }

    #[test]
    fn test_validate_token_round_trip() {
        let service = JwtTokenService::new(test_config());

        let token = service.issue("writer@example.com").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.subject, "writer@example.com");
        assert_eq!(claims.expires_at - claims.issued_at, DEFAULT_TTL_SECONDS);
    }

    #[test]
    fn test_validate_malformed_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate("not-a-token");

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_wrong_key() {
        let issuer = JwtTokenService::new(JwtConfig::new("key-one"));
        let verifier = JwtTokenService::new(JwtConfig::new("key-two"));

        let token = issuer.issue("writer@example.com").unwrap();

        assert!(matches!(
            verifier.validate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_validate_expired_token() {
        let mut config = test_config();
        config.ttl_seconds = -10;
        let service = JwtTokenService::new(config);

        let token = service.issue("writer@example.com").unwrap();

        assert!(matches!(
            service.validate(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_fixed_expiry_window() {
        let service = JwtTokenService::new(test_config());

        assert_eq!(service.expires_in(), 86400);
    }
}
