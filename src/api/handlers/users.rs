/*
 * Responsibility
 * - GET /users/me
 * - Profile storage lives in the CRUD service; this handler only reports who the caller is
 */
use axum::Json;
use serde::Serialize;

use crate::api::extractors::AuthCtxExtractor;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user_id: String,
}

pub async fn current_user(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user_id: ctx.user_id,
    })
}
