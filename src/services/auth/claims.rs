use serde::{Deserialize, Serialize};

/// Payload of a bearer token.
///
/// - `userId` is the only required field; tokens minted by older clients carry it as `_id`.
/// - `exp` is enforced by the verifier when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    #[serde(rename = "userId", alias = "_id")]
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl IdentityClaim {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            iat: None,
            exp: None,
        }
    }
}
