/// Factory: build the request `Authenticator` from application `Config`.
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::repos::user_repo::PgUserStore;
use crate::services::auth::{AccessTokenVerifier, Authenticator};

pub fn build_authenticator(config: &Config, db: PgPool) -> Arc<Authenticator> {
    let verifier = AccessTokenVerifier::new(
        config.jwt_secret.as_bytes(),
        config.access_token_leeway_seconds,
    );

    Arc::new(Authenticator::new(
        verifier,
        Arc::new(PgUserStore::new(db)),
        config.auth_cookie_name.clone(),
    ))
}
