/*
 * Responsibility
 * - users テーブル向け操作 (UserRepo trait + Postgres 実装)
 * - username の一意制約違反は RepoError::Conflict で返す
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    pub username: String,
    pub name: String,
    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync + 'static {
    // Every user, oldest first.
    async fn list(&self) -> RepoResult<Vec<UserRow>>;

    async fn get(&self, user_id: Uuid) -> RepoResult<Option<UserRow>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>>;

    // Fails with `RepoError::Conflict` when the username is taken.
    async fn insert(&self, user: NewUser) -> RepoResult<UserRow>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", username, name, "passwordHash"
            FROM users
            ORDER BY "createdAt" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", username, name, "passwordHash"
            FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", username, name, "passwordHash"
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert(&self, user: NewUser) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, name, "passwordHash")
            VALUES ($1, $2, $3)
            RETURNING "userId", username, name, "passwordHash"
            "#,
        )
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
