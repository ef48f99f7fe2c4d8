/*
 * Responsibility
 * - HTTP surface: routes, handlers, extractors and the not-found fallback
 */
pub mod extractors;
pub mod fallback;
pub mod handlers;
mod routes;

pub use routes::routes;
