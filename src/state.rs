/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Cloned per request; everything inside is read-only and behind Arc
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}
