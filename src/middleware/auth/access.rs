//! access token 検証 → Identity を extensions に入れる
//!
//! - credential は cookie を優先し、無ければ `Authorization: Bearer <jwt>` を見る
//! - 署名 + exp を検証してから sub で user を引く（未検証の payload は使わない）
//! - 失敗はすべて 401。「token 不正」と「user 不在」はレスポンス上区別しない

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{AuthError, Authenticator};

/// 保護したい Router に認証を掛ける。
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.auth.clone());
/// let v1 = Router::new().route("/health", get(health)).merge(protected);
/// ```
pub fn apply<S>(router: Router<S>, auth: Arc<Authenticator>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に渡す
    router.layer(middleware::from_fn_with_state(auth, access_middleware))
}

async fn access_middleware(
    State(auth): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match auth.authenticate(req.headers()).await {
        Ok(identity) => identity,
        Err(err) => {
            match &err {
                AuthError::MissingCredential => {
                    tracing::debug!(path = %req.uri().path(), "no access token presented");
                }
                AuthError::InvalidCredential(_) | AuthError::UnknownSubject => {
                    tracing::warn!(error = %err, "access token rejected");
                }
                AuthError::Store(source) => {
                    tracing::error!(error = ?source, "identity lookup failed");
                }
            }
            return Err(err.into());
        }
    };

    tracing::debug!(user_id = %identity.id, role = %identity.role, "authenticated");

    // middleware → extractor / role gate への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
