/*
 * Responsibility
 * - Process-level services shared through AppState
 */
pub mod auth;
