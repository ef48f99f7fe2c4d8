/*
 * Responsibility
 * - The authenticated context handlers see
 * - The middleware builds it from a verified token and stores it in request extensions
 *
 * Notes
 * - Token parsing and signature checks belong to middleware/services, never to this type
 */
use crate::services::auth::IdentityClaim;

/// Identity attached to an authorized request.
///
/// Lives for one request only; never persisted, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: String,
}

impl AuthCtx {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl From<IdentityClaim> for AuthCtx {
    fn from(claim: IdentityClaim) -> Self {
        Self::new(claim.user_id)
    }
}
