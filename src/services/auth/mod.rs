/*
 * Responsibility
 * - Bearer token verification (AuthService) and issuing (TokenIssuer)
 * - The identity claim both sides agree on
 */
pub mod access_jwt;
pub mod claims;
pub mod token_issuer;

pub use access_jwt::{AuthService, VerificationFailure};
pub use claims::IdentityClaim;
pub use token_issuer::TokenIssuer;
