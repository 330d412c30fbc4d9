/*
 * Responsibility
 * - /users 系 handler (admin 専用: route 側で role gate を掛ける)
 * - DB の role 文字列が不正な row は 500 扱い (ログに残す)
 */
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    api::v1::{dto::users::UpdateRoleRequest, extractors::CurrentUser},
    domain::Identity,
    error::AppError,
    repos::user_repo::{self, UserRow},
    state::AppState,
};

fn row_to_identity(row: UserRow) -> Result<Identity, AppError> {
    let user_id = row.id;
    Identity::try_from(row).map_err(|e| {
        tracing::error!(%user_id, error = %e, "user row has unknown role");
        AppError::Internal
    })
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Identity>>, AppError> {
    let rows = user_repo::list(&state.db).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_identity(row)?);
    }

    Ok(Json(res))
}

pub async fn update_role(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<Identity>, AppError> {
    let row = user_repo::update_role(&state.db, user_id, req.role)
        .await?
        .ok_or(AppError::not_found("user"))?;

    tracing::info!(actor = %actor.id, %user_id, role = %req.role, "role updated");

    Ok(Json(row_to_identity(row)?))
}
