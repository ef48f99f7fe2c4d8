/*
 * Responsibility
 * - Read environment configuration once at startup (APP_ENV, JWT_SECRET, PORT, CORS ...)
 * - Resolve the token signing secret for the deployment mode
 * - Fail startup when a required value is missing or invalid
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;

/// Secret used outside production. Local and test environments sign with it.
pub const DEV_FALLBACK_SECRET: &str = "dev-secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// Only the exact value `production` selects production mode.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// HMAC secret the verifier and issuer are built with.
///
/// The variant records where the secret came from so startup can log it
/// without printing the secret itself.
#[derive(Clone, PartialEq, Eq)]
pub enum JwtSecret {
    Production(String),
    DevelopmentFallback,
}

impl JwtSecret {
    /// Production mode requires a non-empty `JWT_SECRET`.
    /// Every other mode signs with [`DEV_FALLBACK_SECRET`], whatever `JWT_SECRET` holds.
    pub fn resolve(app_env: AppEnv, production_secret: Option<String>) -> Result<Self, ConfigError> {
        if !app_env.is_production() {
            return Ok(Self::DevelopmentFallback);
        }

        match production_secret {
            Some(secret) if !secret.trim().is_empty() => Ok(Self::Production(secret)),
            Some(_) => Err(ConfigError::Invalid("JWT_SECRET")),
            None => Err(ConfigError::Missing("JWT_SECRET")),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Production(secret) => secret.as_bytes(),
            Self::DevelopmentFallback => DEV_FALLBACK_SECRET.as_bytes(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::DevelopmentFallback)
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material
        match self {
            Self::Production(_) => f.write_str("JwtSecret::Production(<redacted>)"),
            Self::DevelopmentFallback => f.write_str("JwtSecret::DevelopmentFallback"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub jwt_secret: JwtSecret,
    pub cors_allowed_origins: Vec<String>,
    pub access_token_leeway_seconds: u64,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV").as_deref());
        let jwt_secret = JwtSecret::resolve(app_env, var("JWT_SECRET"))?;

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        // Exact origins only: no wildcard, and each entry must be a valid header value.
        if cors_allowed_origins
            .iter()
            .any(|origin| origin == "*" || HeaderValue::from_str(origin).is_err())
        {
            return Err(ConfigError::Invalid("CORS_ALLOWED_ORIGINS"));
        }

        let access_token_leeway_seconds = match var("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let request_timeout_seconds = match var("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            cors_allowed_origins,
            access_token_leeway_seconds,
            request_timeout: Duration::from_secs(request_timeout_seconds),
        })
    }
}
