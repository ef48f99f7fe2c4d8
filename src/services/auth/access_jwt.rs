use std::{collections::HashSet, fmt};

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::config::JwtSecret;
use crate::services::auth::claims::IdentityClaim;

/// Why a token was rejected. Only visible to server-side logs.
#[derive(Debug)]
enum FailureCause {
    EmptyToken,
    Jwt(jsonwebtoken::errors::Error),
    EmptyUserId,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => f.write_str("empty token"),
            Self::Jwt(e) => write!(f, "{}", e),
            Self::EmptyUserId => f.write_str("empty 'userId' claim"),
        }
    }
}

/// Opaque verification failure.
///
/// Callers get a single outcome for a bad signature, a malformed token or an
/// expired one. The cause is only exposed for server-side logging.
#[derive(Debug, Error)]
#[error("access token verification failed")]
pub struct VerificationFailure {
    cause: FailureCause,
}

impl VerificationFailure {
    fn new(cause: FailureCause) -> Self {
        Self { cause }
    }

    pub fn cause(&self) -> impl fmt::Display + '_ {
        &self.cause
    }
}

impl From<jsonwebtoken::errors::Error> for VerificationFailure {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::new(FailureCause::Jwt(e))
    }
}

/// HS256 access-token verifier.
///
/// Built once at startup from the resolved [`JwtSecret`] and shared read-only
/// across requests.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &JwtSecret, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is checked when the token carries one, but is not mandatory.
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature and expiry, then decode the identity claim.
    ///
    /// `token` is the bare credential with the `Bearer ` prefix already removed.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, VerificationFailure> {
        if token.trim().is_empty() {
            return Err(VerificationFailure::new(FailureCause::EmptyToken));
        }

        let data =
            jsonwebtoken::decode::<IdentityClaim>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.user_id.trim().is_empty() {
            return Err(VerificationFailure::new(FailureCause::EmptyUserId));
        }

        Ok(claims)
    }
}
