use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::models::{Session, SessionClaims};

const SESSION_SUBJECT: &str = "portal-session";

/// Token plus its expiry as handed to the client
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies HS256 session tokens
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionTokenService {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_secret(config.secret.as_bytes(), config.ttl)
    }

    pub fn with_secret(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, session: &Session) -> Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now
            + chrono::Duration::from_std(self.ttl)
                .map_err(|e| AppError::Internal(format!("Invalid session ttl: {}", e)))?;

        let claims = SessionClaims {
            sub: SESSION_SUBJECT.to_string(),
            roles: session.roles.clone(),
            iat: now.timestamp().max(0) as u64,
            exp: expires_at.timestamp().max(0) as u64,
        };

        Ok(IssuedToken {
            token: self.encode_claims(&claims)?,
            expires_at,
        })
    }

    pub fn validate(&self, token: &str) -> Result<Session> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(format!("Invalid session token: {}", e)))?;

        if data.claims.sub != SESSION_SUBJECT {
            return Err(AppError::Auth("Invalid session token".to_string()));
        }

        Ok(Session::new(data.claims.roles))
    }

    fn encode_claims(&self, claims: &SessionClaims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }
}
