/*
 * Responsibility
 * - scores の upsert / hackathon 単位の取得
 * - (submissionId, judgeId, criterionId) で一意
 */
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::hackathon::Score;
use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct ScoreRow {
    #[sqlx(rename = "submissionId")]
    pub submission_id: i64,
    #[sqlx(rename = "judgeId")]
    pub judge_id: Uuid,
    #[sqlx(rename = "criterionId")]
    pub criterion_id: i64,
    pub value: i32,
    pub comment: Option<String>,
}

impl From<ScoreRow> for Score {
    fn from(row: ScoreRow) -> Self {
        Self {
            submission_id: row.submission_id,
            judge_id: row.judge_id,
            criterion_id: row.criterion_id,
            value: row.value,
            comment: row.comment,
        }
    }
}

pub struct NewScore<'a> {
    pub criterion_id: i64,
    pub value: i32,
    pub comment: Option<&'a str>,
}

/// Upserts all scores of one judge for one submission atomically.
pub async fn upsert_many(
    db: &PgPool,
    submission_id: i64,
    judge_id: Uuid,
    scores: &[NewScore<'_>],
) -> RepoResult<Vec<ScoreRow>> {
    let mut tx = db.begin().await?;
    let mut rows = Vec::with_capacity(scores.len());

    for score in scores {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            INSERT INTO scores ("submissionId", "judgeId", "criterionId", value, comment)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT ("submissionId", "judgeId", "criterionId")
            DO UPDATE SET value = EXCLUDED.value, comment = EXCLUDED.comment, "updatedAt" = now()
            RETURNING "submissionId", "judgeId", "criterionId", value, comment
            "#,
        )
        .bind(submission_id)
        .bind(judge_id)
        .bind(score.criterion_id)
        .bind(score.value)
        .bind(score.comment)
        .fetch_one(&mut *tx)
        .await?;
        rows.push(row);
    }

    tx.commit().await?;
    Ok(rows)
}

pub async fn list_for_hackathon(db: &PgPool, hackathon_id: i64) -> RepoResult<Vec<ScoreRow>> {
    let rows = sqlx::query_as::<_, ScoreRow>(
        r#"
        SELECT s."submissionId", s."judgeId", s."criterionId", s.value, s.comment
        FROM scores s
        JOIN submissions sub ON sub."submissionId" = s."submissionId"
        WHERE sub."hackathonId" = $1
        "#,
    )
    .bind(hackathon_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
