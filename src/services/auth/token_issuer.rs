use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::error;

use crate::config::JwtSecret;
use crate::error::AppError;
use crate::services::auth::claims::IdentityClaim;

/// Default lifetime of an issued token: 7 days.
pub const DEFAULT_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Signs identity claims with the same secret the verifier checks against.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: Option<u64>,
}

impl TokenIssuer {
    pub fn new(secret: &JwtSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: Some(DEFAULT_TTL_SECONDS),
        }
    }

    /// `None` issues a token without `exp`.
    pub fn with_ttl_seconds(mut self, ttl_seconds: Option<u64>) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Sign `claim`, stamping `iat` with the current time and `exp` from the TTL.
    pub fn sign(&self, claim: &IdentityClaim) -> Result<String, AppError> {
        let now = Utc::now().timestamp().max(0) as u64;

        let exp = match self.ttl_seconds {
            Some(ttl) => Some(now.checked_add(ttl).ok_or_else(|| {
                error!(ttl_seconds = ttl, "token lifetime overflows the expiry timestamp");
                AppError::Internal
            })?),
            None => None,
        };

        let claims = IdentityClaim {
            user_id: claim.user_id.clone(),
            iat: Some(now),
            exp,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }
}
