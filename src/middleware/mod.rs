/*
 * Responsibility
 * - Router-level middleware: access control, CORS, HTTP plumbing
 */
pub mod auth;
pub mod cors;
pub mod http;
