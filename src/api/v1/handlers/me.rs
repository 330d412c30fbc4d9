/*
 * Responsibility
 * - GET /me: 認証 gate が付与した Identity をそのまま返す
 */
use axum::Json;

use crate::{api::v1::extractors::CurrentUser, domain::Identity};

pub async fn me(CurrentUser(identity): CurrentUser) -> Json<Identity> {
    Json(identity)
}
