/*
 * Responsibility
 * - blogs CRUD (BlogRepo trait + Postgres 実装)
 * - 返す行には owner (users) の username/name を JOIN して載せる
 * - "userId" (owner) は INSERT 時のみ書き込む。UPDATE では触らない
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::services::blog_stats::LikedEntry;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BlogRow {
    #[sqlx(rename = "blogId")]
    pub blog_id: i64,

    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,

    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    #[sqlx(rename = "ownerUsername")]
    pub owner_username: String,
    #[sqlx(rename = "ownerName")]
    pub owner_name: String,
}

impl LikedEntry for BlogRow {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn likes(&self) -> i64 {
        self.likes
    }
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
}

/// Partial update. `None` keeps the stored value.
///
/// `author` is tri-state:
/// - None: do not update
/// - Some(None): set NULL
/// - Some(Some(v)): set v
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub author: Option<Option<String>>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[async_trait]
pub trait BlogRepo: Send + Sync + 'static {
    // Every blog, oldest first.
    async fn list(&self) -> RepoResult<Vec<BlogRow>>;

    async fn get(&self, blog_id: i64) -> RepoResult<Option<BlogRow>>;

    async fn insert(&self, blog: NewBlog) -> RepoResult<BlogRow>;

    // Returns `Ok(None)` when the blog does not exist.
    async fn update(&self, blog_id: i64, changes: BlogChanges) -> RepoResult<Option<BlogRow>>;

    // Returns whether a row was deleted.
    async fn delete(&self, blog_id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgBlogRepo {
    pool: PgPool,
}

impl PgBlogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepo for PgBlogRepo {
    async fn list(&self) -> RepoResult<Vec<BlogRow>> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                b."blogId", b.title, b.author, b.url, b.likes, b."userId",
                u.username AS "ownerUsername", u.name AS "ownerName"
            FROM blogs b
            JOIN users u ON u."userId" = b."userId"
            ORDER BY b."blogId" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, blog_id: i64) -> RepoResult<Option<BlogRow>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                b."blogId", b.title, b.author, b.url, b.likes, b."userId",
                u.username AS "ownerUsername", u.name AS "ownerName"
            FROM blogs b
            JOIN users u ON u."userId" = b."userId"
            WHERE b."blogId" = $1
            "#,
        )
        .bind(blog_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert(&self, blog: NewBlog) -> RepoResult<BlogRow> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            WITH inserted AS (
                INSERT INTO blogs (title, author, url, likes, "userId")
                VALUES ($1, $2, $3, $4, $5)
                RETURNING "blogId", title, author, url, likes, "userId"
            )
            SELECT
                i."blogId", i.title, i.author, i.url, i.likes, i."userId",
                u.username AS "ownerUsername", u.name AS "ownerName"
            FROM inserted i
            JOIN users u ON u."userId" = i."userId"
            "#,
        )
        .bind(&blog.title)
        .bind(blog.author.as_deref())
        .bind(&blog.url)
        .bind(blog.likes)
        .bind(blog.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, blog_id: i64, changes: BlogChanges) -> RepoResult<Option<BlogRow>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            WITH updated AS (
                UPDATE blogs
                SET
                    title = COALESCE($2, title),
                    author = CASE
                        WHEN $3 = false THEN author
                        ELSE $4
                    END,
                    url = COALESCE($5, url),
                    likes = COALESCE($6, likes),
                    "updatedAt" = now()
                WHERE "blogId" = $1
                RETURNING "blogId", title, author, url, likes, "userId"
            )
            SELECT
                d."blogId", d.title, d.author, d.url, d.likes, d."userId",
                u.username AS "ownerUsername", u.name AS "ownerName"
            FROM updated d
            JOIN users u ON u."userId" = d."userId"
            "#,
        )
        .bind(blog_id)
        .bind(changes.title.as_deref())
        .bind(changes.author.is_some()) // $3: flag to set author
        .bind(changes.author.flatten()) // $4: new author value
        .bind(changes.url.as_deref())
        .bind(changes.likes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, blog_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE "blogId" = $1
            "#,
        )
        .bind(blog_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
