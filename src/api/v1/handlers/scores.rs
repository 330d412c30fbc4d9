/*
 * Responsibility
 * - POST /submissions/{submission_id}/scores (judge or admin)
 * - hackathon が judging 中であること、criterion が同じ hackathon のものであること、
 *   value が 0..=maxScore に収まることをここで確認する
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{dto::scores::SubmitScoresRequest, extractors::CurrentUser},
    domain::{
        hackathon::{JudgingCriterion, Score},
        scoring::check_score,
    },
    error::AppError,
    repos::{hackathon_repo, score_repo},
    state::AppState,
};

use super::hackathons::row_to_hackathon;

pub async fn submit_scores(
    State(state): State<AppState>,
    CurrentUser(judge): CurrentUser,
    Path(submission_id): Path<i64>,
    Json(req): Json<SubmitScoresRequest>,
) -> Result<Json<Vec<Score>>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_SCORES", msg))?;

    let submission = hackathon_repo::get_submission(&state.db, submission_id)
        .await?
        .ok_or(AppError::not_found("submission"))?;

    let hackathon = hackathon_repo::get(&state.db, submission.hackathon_id)
        .await?
        .ok_or(AppError::not_found("hackathon"))
        .and_then(row_to_hackathon)?;

    if !hackathon.status.accepts_scores() {
        return Err(AppError::bad_request(
            "HACKATHON_NOT_JUDGING",
            format!("hackathon is {}, scores are accepted while judging", hackathon.status),
        ));
    }

    let criteria: Vec<JudgingCriterion> = hackathon_repo::criteria(&state.db, hackathon.id)
        .await?
        .into_iter()
        .map(JudgingCriterion::from)
        .collect();

    let mut new_scores = Vec::with_capacity(req.scores.len());
    for input in &req.scores {
        check_score(&criteria, input.criterion_id, input.value)
            .map_err(|e| AppError::bad_request(e.code(), e.to_string()))?;
        new_scores.push(score_repo::NewScore {
            criterion_id: input.criterion_id,
            value: input.value,
            comment: input.comment.as_deref(),
        });
    }

    let rows = score_repo::upsert_many(&state.db, submission.id, judge.id, &new_scores).await?;

    tracing::info!(judge = %judge.id, submission_id, count = rows.len(), "scores recorded");

    Ok(Json(rows.into_iter().map(Score::from).collect()))
}
