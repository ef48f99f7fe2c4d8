/*
 * Responsibility
 * - Catch-all for requests no route claims (unknown path, or known path with an unknown method)
 * - Registered last in app::build_router so it only fires on real misses
 */
use axum::http::{Method, Uri};

use crate::error::AppError;

pub async fn not_found(method: Method, uri: Uri) -> AppError {
    tracing::debug!(%method, %uri, "no route matched");
    AppError::not_found()
}
