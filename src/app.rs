/*
 * Responsibility
 * - Load Config → build shared services → assemble the Router
 * - Apply middleware (CORS / HTTP plumbing); the access middleware lives with the routes
 * - Start axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, fallback};
use crate::config::Config;
use crate::middleware;
use crate::services::auth::AuthService;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,gallery_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics through tracing; stderr may not be collected.
        tracing::error!(?info, "panic");

        // Outside production, fail fast so the panic is noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    if config.jwt_secret.is_fallback() {
        tracing::warn!(
            "APP_ENV is not `production`: bearer tokens are verified with the development fallback secret"
        );
    }

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build process-level services. The secret is resolved once here and never re-read.
pub fn build_state(config: &Config) -> AppState {
    let auth = Arc::new(AuthService::new(
        &config.jwt_secret,
        config.access_token_leeway_seconds,
    ));

    AppState::new(auth)
}

/// Assemble the full application Router.
///
/// The not-found fallbacks are registered after every real route.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(state.clone())
        .method_not_allowed_fallback(fallback::not_found)
        .fallback(fallback::not_found)
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
