/*
 * Responsibility
 * - /hackathons 一覧 (認証済みなら誰でも) と作成 (organizer or admin)
 * - 作成者は CurrentUser から取る (body では受け取らない)
 * - status の変更 (organizer or admin): draft → open → judging → published の一方向のみ
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::hackathons::{CreateHackathonRequest, ListQuery, UpdateStatusRequest},
        extractors::CurrentUser,
    },
    domain::hackathon::{Hackathon, HackathonStatus},
    error::AppError,
    repos::hackathon_repo::{self, HackathonRow},
    state::AppState,
};

pub(crate) fn row_to_hackathon(row: HackathonRow) -> Result<Hackathon, AppError> {
    let hackathon_id = row.hackathon_id;
    Hackathon::try_from(row).map_err(|e| {
        tracing::error!(hackathon_id, error = %e, "hackathon row has unknown status");
        AppError::Internal
    })
}

/// Compare-and-set on the current status, so two concurrent moves cannot both win.
pub(crate) async fn advance(
    state: &AppState,
    hackathon: &Hackathon,
    to: HackathonStatus,
) -> Result<Hackathon, AppError> {
    if !hackathon.status.can_advance_to(to) {
        return Err(AppError::bad_request(
            "INVALID_STATUS_TRANSITION",
            format!("hackathon is {}, cannot move to {}", hackathon.status, to),
        ));
    }

    hackathon_repo::advance_status(&state.db, hackathon.id, hackathon.status, to)
        .await?
        .ok_or_else(|| {
            AppError::bad_request(
                "INVALID_STATUS_TRANSITION",
                "hackathon status changed concurrently",
            )
        })
        .and_then(row_to_hackathon)
}

pub async fn list_hackathons(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Hackathon>>, AppError> {
    let rows = hackathon_repo::list(&state.db, q.limit(), q.offset()).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_hackathon(row)?);
    }

    Ok(Json(res))
}

pub async fn create_hackathon(
    State(state): State<AppState>,
    CurrentUser(organizer): CurrentUser,
    Json(req): Json<CreateHackathonRequest>,
) -> Result<(StatusCode, Json<Hackathon>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_HACKATHON", msg))?;

    let row = hackathon_repo::create(
        &state.db,
        req.name.trim(),
        req.description.as_deref(),
        req.starts_at,
        req.ends_at,
        organizer.id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row_to_hackathon(row)?)))
}

pub async fn update_status(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(hackathon_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Hackathon>, AppError> {
    let hackathon = hackathon_repo::get(&state.db, hackathon_id)
        .await?
        .ok_or(AppError::not_found("hackathon"))
        .and_then(row_to_hackathon)?;

    let from = hackathon.status;
    let updated = advance(&state, &hackathon, req.status).await?;

    tracing::info!(actor = %actor.id, hackathon_id, %from, to = %updated.status, "hackathon status changed");

    Ok(Json(updated))
}
