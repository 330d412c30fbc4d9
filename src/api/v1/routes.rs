/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health だけ認証の外、それ以外は access gate (Router 全体) → role gate (route 単位) の順
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::domain::Role;
use crate::middleware::auth::{RoleRule, access, role};
use crate::state::AppState;

use crate::api::v1::handlers::{
    hackathons::{create_hackathon, list_hackathons, update_status},
    health::health,
    me::me,
    results::{get_results, publish_results},
    scores::submit_scores,
    users::{list_users, update_role},
};

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected: Router<AppState> = Router::new()
        .route("/me", get(me))
        .route("/users", role::apply(get(list_users), RoleRule::admin_only()))
        .route(
            "/users/{user_id}/role",
            role::apply(put(update_role), RoleRule::admin_only()),
        )
        .route(
            "/hackathons",
            get(list_hackathons).merge(role::apply(
                post(create_hackathon),
                RoleRule::organizer_or_admin(),
            )),
        )
        .route(
            "/hackathons/{hackathon_id}/status",
            role::apply(put(update_status), RoleRule::organizer_or_admin()),
        )
        .route(
            "/hackathons/{hackathon_id}/results",
            role::apply(
                get(get_results),
                RoleRule::any_of([Role::Participant, Role::Judge, Role::Organizer, Role::Admin]),
            )
            .merge(role::apply(
                post(publish_results),
                RoleRule::any_of([Role::Organizer, Role::Admin]),
            )),
        )
        .route(
            "/submissions/{submission_id}/scores",
            role::apply(post(submit_scores), RoleRule::judge_or_admin()),
        );

    Router::new()
        .route("/health", get(health))
        .merge(access::apply(protected, state.auth.clone()))
}
