use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::Identity;
use crate::error::{AppError, AuthFailure};

/// Handler で Identity を受け取るための extractor
/// access middleware が Identity を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定のルート）
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized(AuthFailure::NoToken))
    }
}
