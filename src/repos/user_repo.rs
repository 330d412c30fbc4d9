/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - 認証用の identity 解決 (UserStore) を trait として切り出す
 * - "passwordHash" 列はどのクエリでも select しない
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::role::UnknownRole;
use crate::domain::{Identity, Role};
use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "userName")]
    pub user_name: String,
    pub email: String,
    pub role: String,
    #[sqlx(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for Identity {
    type Error = UnknownRole;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_name: row.user_name,
            email: row.email,
            role: row.role.parse()?,
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }
}

/// Identity lookup used by the authenticator. Read-only.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// `Ok(None)` when no user has this id.
    async fn find_identity(&self, user_id: Uuid) -> RepoResult<Option<UserRow>>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_identity(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        get(&self.db, user_id).await
    }
}

pub async fn get(db: &PgPool, user_id: Uuid) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", "userName", email, role, "imageUrl", "createdAt"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<UserRow>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", "userName", email, role, "imageUrl", "createdAt"
        FROM users
        ORDER BY "createdAt" DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn update_role(db: &PgPool, user_id: Uuid, role: Role) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET role = $2, "updatedAt" = now()
        WHERE "userId" = $1
        RETURNING "userId", "userName", email, role, "imageUrl", "createdAt"
        "#,
    )
    .bind(user_id)
    .bind(role.as_str())
    .fetch_optional(db)
    .await?;

    Ok(row)
}
