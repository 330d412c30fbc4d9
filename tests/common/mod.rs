//! Shared harness for gate tests: an in-memory identity store that counts
//! lookups, and a router wired the same way as `/api/v1` but with trivial
//! handlers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    routing::get,
};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use hackathon_hub::api::v1::extractors::CurrentUser;
use hackathon_hub::domain::{Identity, Role};
use hackathon_hub::middleware::auth::{RoleRule, access, role};
use hackathon_hub::repos::error::{RepoError, RepoResult};
use hackathon_hub::repos::user_repo::{UserRow, UserStore};
use hackathon_hub::services::auth::{AccessTokenIssuer, AccessTokenVerifier, Authenticator};

pub const SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";
pub const COOKIE_NAME: &str = "accessToken";

#[derive(Default)]
pub struct InMemoryUserStore {
    users: HashMap<Uuid, UserRow>,
    lookups: AtomicUsize,
    broken: bool,
}

impl InMemoryUserStore {
    pub fn with_users(rows: impl IntoIterator<Item = UserRow>) -> Self {
        Self {
            users: rows.into_iter().map(|r| (r.id, r)).collect(),
            ..Default::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_identity(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.users.get(&user_id).cloned())
    }
}

pub fn user_row(role: &str) -> UserRow {
    let id = Uuid::new_v4();
    UserRow {
        id,
        user_name: format!("{role}-user"),
        email: format!("{id}@example.com"),
        role: role.to_string(),
        image_url: None,
        created_at: Utc::now(),
    }
}

pub fn issuer() -> AccessTokenIssuer {
    AccessTokenIssuer::new(SECRET, 600)
}

pub fn token_for(user_id: Uuid) -> String {
    issuer().issue(user_id).unwrap()
}

async fn ok() -> &'static str {
    "ok"
}

async fn whoami(CurrentUser(identity): CurrentUser) -> Json<Identity> {
    Json(identity)
}

pub fn authenticator(store: Arc<InMemoryUserStore>) -> Arc<Authenticator> {
    Arc::new(Authenticator::new(
        AccessTokenVerifier::new(SECRET, 60),
        store,
        COOKIE_NAME,
    ))
}

/// `/health` is public; everything else sits behind the access gate, with a
/// role gate per route.
pub fn gated_router(store: Arc<InMemoryUserStore>) -> Router {
    let protected: Router = Router::new()
        .route("/me", get(whoami))
        .route("/admin", role::apply(get(ok), RoleRule::admin_only()))
        .route("/judging", role::apply(get(ok), RoleRule::judge_or_admin()))
        .route(
            "/organizing",
            role::apply(get(ok), RoleRule::organizer_or_admin()),
        )
        .route(
            "/builders",
            role::apply(get(ok), RoleRule::any_of([Role::Participant, Role::Judge])),
        );

    Router::new()
        .route("/health", get(ok))
        .merge(access::apply(protected, authenticator(store)))
}

/// Role gate used without the access gate in front of it.
pub fn role_only_router() -> Router {
    Router::new().route(
        "/everyone",
        role::apply(get(ok), RoleRule::any_of(Role::ALL)),
    )
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, format!("{COOKIE_NAME}={token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn get_anonymous(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(router: &Router, req: Request<Body>) -> Response {
    router.clone().oneshot(req).await.unwrap()
}

pub async fn body_bytes(res: Response) -> Vec<u8> {
    res.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(res: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(res).await).unwrap()
}

pub async fn assert_error(res: Response, status: StatusCode, code: &str) -> String {
    assert_eq!(res.status(), status);
    let body = body_json(res).await;
    assert_eq!(body["error"]["code"], code);
    body["error"]["message"].as_str().unwrap().to_string()
}
