/*
 * Responsibility
 * - URL layout of the API
 * - Public routes vs routes behind the access middleware
 */
use axum::{Router, routing::get};

use crate::api::handlers::{health::health, users::current_user};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(protected(state))
}

fn protected(state: AppState) -> Router<AppState> {
    let router = Router::new().route("/users/me", get(current_user));

    middleware::auth::access::apply(router, state)
}
