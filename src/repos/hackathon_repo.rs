/*
 * Responsibility
 * - hackathons / judging_criteria / submissions の読み書き
 * - status は TEXT で保存し、Row → ドメイン型の変換時に parse する
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::hackathon::{
    Hackathon, HackathonStatus, JudgingCriterion, Submission, UnknownStatus,
};
use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct HackathonRow {
    #[sqlx(rename = "hackathonId")]
    pub hackathon_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    #[sqlx(rename = "startsAt")]
    pub starts_at: DateTime<Utc>,
    #[sqlx(rename = "endsAt")]
    pub ends_at: DateTime<Utc>,
    #[sqlx(rename = "organizerId")]
    pub organizer_id: Uuid,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<HackathonRow> for Hackathon {
    type Error = UnknownStatus;

    fn try_from(row: HackathonRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.hackathon_id,
            name: row.name,
            description: row.description,
            status: row.status.parse()?,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            organizer_id: row.organizer_id,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CriterionRow {
    #[sqlx(rename = "criterionId")]
    pub criterion_id: i64,
    #[sqlx(rename = "hackathonId")]
    pub hackathon_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    #[sqlx(rename = "maxScore")]
    pub max_score: i32,
}

impl From<CriterionRow> for JudgingCriterion {
    fn from(row: CriterionRow) -> Self {
        Self {
            id: row.criterion_id,
            hackathon_id: row.hackathon_id,
            name: row.name,
            description: row.description,
            weight: row.weight,
            max_score: row.max_score,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SubmissionRow {
    #[sqlx(rename = "submissionId")]
    pub submission_id: i64,
    #[sqlx(rename = "hackathonId")]
    pub hackathon_id: i64,
    #[sqlx(rename = "teamId")]
    pub team_id: i64,
    pub title: String,
    #[sqlx(rename = "repoUrl")]
    pub repo_url: Option<String>,
    #[sqlx(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.submission_id,
            hackathon_id: row.hackathon_id,
            team_id: row.team_id,
            title: row.title,
            repo_url: row.repo_url,
            submitted_at: row.submitted_at,
        }
    }
}

const HACKATHON_COLUMNS: &str = r#""hackathonId", name, description, status, "startsAt", "endsAt", "organizerId", "createdAt""#;

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> RepoResult<Vec<HackathonRow>> {
    let sql = format!(
        r#"SELECT {HACKATHON_COLUMNS} FROM hackathons ORDER BY "startsAt" DESC LIMIT $1 OFFSET $2"#
    );
    let rows = sqlx::query_as::<_, HackathonRow>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, hackathon_id: i64) -> RepoResult<Option<HackathonRow>> {
    let sql = format!(r#"SELECT {HACKATHON_COLUMNS} FROM hackathons WHERE "hackathonId" = $1"#);
    let row = sqlx::query_as::<_, HackathonRow>(&sql)
        .bind(hackathon_id)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    description: Option<&str>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    organizer_id: Uuid,
) -> RepoResult<HackathonRow> {
    let sql = format!(
        r#"
        INSERT INTO hackathons (name, description, status, "startsAt", "endsAt", "organizerId")
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {HACKATHON_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, HackathonRow>(&sql)
        .bind(name)
        .bind(description)
        .bind(HackathonStatus::Draft.as_str())
        .bind(starts_at)
        .bind(ends_at)
        .bind(organizer_id)
        .fetch_one(db)
        .await?;

    Ok(row)
}

/// Moves `from` → `to` only if the row is still in `from`.
/// `None` when the hackathon is gone or its status already changed.
pub async fn advance_status(
    db: &PgPool,
    hackathon_id: i64,
    from: HackathonStatus,
    to: HackathonStatus,
) -> RepoResult<Option<HackathonRow>> {
    let sql = format!(
        r#"
        UPDATE hackathons
        SET status = $3
        WHERE "hackathonId" = $1 AND status = $2
        RETURNING {HACKATHON_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, HackathonRow>(&sql)
        .bind(hackathon_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn criteria(db: &PgPool, hackathon_id: i64) -> RepoResult<Vec<CriterionRow>> {
    let rows = sqlx::query_as::<_, CriterionRow>(
        r#"
        SELECT "criterionId", "hackathonId", name, description, weight, "maxScore"
        FROM judging_criteria
        WHERE "hackathonId" = $1
        ORDER BY "criterionId"
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get_submission(db: &PgPool, submission_id: i64) -> RepoResult<Option<Submission>> {
    let row = sqlx::query_as::<_, SubmissionRow>(
        r#"
        SELECT "submissionId", "hackathonId", "teamId", title, "repoUrl", "submittedAt"
        FROM submissions
        WHERE "submissionId" = $1
        "#,
    )
    .bind(submission_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Submission::from))
}
