/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the authenticated request context (AuthCtx) to handlers
 * - Keep the axum-facing part in core, the plain type in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
