/*
 * Responsibility
 * - POST /hackathons/{hackathon_id}/results: judging 中のものを集計して published にする (organizer or admin)
 * - GET  /hackathons/{hackathon_id}/results: published なら全ロール、それ以前は organizer or admin のみ
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{dto::results::ResultsResponse, extractors::CurrentUser},
    domain::{
        hackathon::{Hackathon, HackathonStatus, JudgingCriterion, Score},
        results::{SubmissionResult, aggregate_results, can_view_results},
    },
    error::AppError,
    repos::{hackathon_repo, score_repo},
    state::AppState,
};

use super::hackathons::{advance, row_to_hackathon};

async fn load_hackathon(state: &AppState, hackathon_id: i64) -> Result<Hackathon, AppError> {
    hackathon_repo::get(&state.db, hackathon_id)
        .await?
        .ok_or(AppError::not_found("hackathon"))
        .and_then(row_to_hackathon)
}

async fn compute(state: &AppState, hackathon_id: i64) -> Result<Vec<SubmissionResult>, AppError> {
    let criteria: Vec<JudgingCriterion> = hackathon_repo::criteria(&state.db, hackathon_id)
        .await?
        .into_iter()
        .map(JudgingCriterion::from)
        .collect();
    let scores: Vec<Score> = score_repo::list_for_hackathon(&state.db, hackathon_id)
        .await?
        .into_iter()
        .map(Score::from)
        .collect();

    Ok(aggregate_results(&criteria, &scores))
}

pub async fn publish_results(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(hackathon_id): Path<i64>,
) -> Result<Json<ResultsResponse>, AppError> {
    let hackathon = load_hackathon(&state, hackathon_id).await?;
    let results = compute(&state, hackathon.id).await?;

    let published = advance(&state, &hackathon, HackathonStatus::Published).await?;

    tracing::info!(actor = %actor.id, hackathon_id, count = results.len(), "results published");

    Ok(Json(ResultsResponse {
        hackathon_id: published.id,
        status: published.status,
        results,
    }))
}

pub async fn get_results(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    Path(hackathon_id): Path<i64>,
) -> Result<Json<ResultsResponse>, AppError> {
    let hackathon = load_hackathon(&state, hackathon_id).await?;

    if !can_view_results(hackathon.status, viewer.role) {
        return Err(AppError::forbidden("organizer or admin"));
    }

    let results = compute(&state, hackathon.id).await?;

    Ok(Json(ResultsResponse {
        hackathon_id: hackathon.id,
        status: hackathon.status,
        results,
    }))
}
