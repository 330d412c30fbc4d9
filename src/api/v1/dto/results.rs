/*
 * Responsibility
 * - 集計結果のレスポンス DTO
 */
use serde::Serialize;

use crate::domain::{hackathon::HackathonStatus, results::SubmissionResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub hackathon_id: i64,
    pub status: HackathonStatus,
    pub results: Vec<SubmissionResult>,
}
