/*
 * Responsibility
 * - Request authorization gate for the photo-gallery API
 * - Library root shared by the server binary, token-gen and the integration tests
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
