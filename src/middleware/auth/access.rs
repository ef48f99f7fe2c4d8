//! Bearer token verification → `AuthCtx` in request extensions.
//!
//! Every request that reaches the middleware ends in exactly one of two states:
//! - `Verified`: the token checked out, the `AuthCtx` is attached and the request moves on.
//! - `Rejected`: the request stops here with `401 Authentication required`.
//!
//! The rejection message is the same for a missing header, a wrong scheme and a bad
//! token. The concrete reason only goes to the logs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use thiserror::Error;

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Why the `Authorization` header was unusable. Logged, never returned to clients.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderRejection {
    #[error("authorization header missing")]
    Missing,
    #[error("authorization header is not valid visible ASCII")]
    NotAscii,
    #[error("authorization scheme is not Bearer")]
    WrongScheme,
}

/// Result of the authorization phase for one request.
#[derive(Debug)]
pub enum Authorization {
    Verified(AuthCtx),
    Rejected(AppError),
}

/// Put the access middleware in front of every route of `router`.
///
/// Uses `route_layer`, so requests that fall through to the not-found fallback
/// never run it.
///
/// ```ignore
/// let protected = Router::new().route("/users/me", get(current_user));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8: from_fn cannot take State, so the state is passed explicitly
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Take the candidate token out of `Authorization: Bearer <token>`.
///
/// The token itself is not inspected here: an empty remainder is left for the
/// verifier to reject.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, HeaderRejection> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(HeaderRejection::Missing)?;

    let value = value.to_str().map_err(|_| HeaderRejection::NotAscii)?;

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(HeaderRejection::WrongScheme)
}

/// Run header extraction and token verification for one request.
pub fn authorize(auth: &AuthService, headers: &HeaderMap) -> Authorization {
    let token = match extract_bearer(headers) {
        Ok(token) => token,
        Err(reason) => {
            tracing::debug!(%reason, "authorization header rejected");
            return Authorization::Rejected(AppError::unauthorized());
        }
    };

    match auth.verify(token) {
        Ok(claim) => Authorization::Verified(AuthCtx::from(claim)),
        Err(err) => {
            tracing::warn!(cause = %err.cause(), "access token verification failed");
            Authorization::Rejected(AppError::unauthorized())
        }
    }
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match authorize(&state.auth, req.headers()) {
        Authorization::Verified(auth_ctx) => {
            // middleware → extractor
            req.extensions_mut().insert(auth_ctx);
            Ok(next.run(req).await)
        }
        Authorization::Rejected(err) => Err(err),
    }
}
