/*
 * Responsibility
 * - Blogs の request/response DTO
 * - 公開 ID は encode 済みの値を返す (内部の "blogId" を漏らさない)
 * - likes は省略時 0、範囲は 0..=MAX_LIKES
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{BlogChanges, NewBlog};
use crate::services::blog_stats::{AuthorBlogCount, AuthorLikes, FavouriteBlog};

/// Upper bound for a single blog's likes. Keeps every per-author and total
/// sum far away from `i64::MAX`.
pub const MAX_LIKES: i64 = i32::MAX as i64;

fn likes_in_range(likes: i64) -> Result<i64, &'static str> {
    if (0..=MAX_LIKES).contains(&likes) {
        Ok(likes)
    } else {
        Err("likes must be between 0 and 2147483647")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl CreateBlogRequest {
    /// Validates and binds the new blog to its owner.
    pub fn into_new_blog(self, user_id: Uuid) -> Result<NewBlog, &'static str> {
        let title = non_blank(self.title).ok_or("title is required")?;
        let url = non_blank(self.url).ok_or("url is required")?;
        let likes = likes_in_range(self.likes.unwrap_or(0))?;

        Ok(NewBlog {
            title,
            author: non_blank(self.author),
            url,
            likes,
            user_id,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): null (clear author)
    // - Some(Some(v)): set value
    #[serde(default, deserialize_with = "super::double_option")]
    pub author: Option<Option<String>>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl UpdateBlogRequest {
    pub fn into_changes(self) -> Result<BlogChanges, &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(url) = &self.url
            && url.trim().is_empty()
        {
            return Err("url cannot be empty");
        }
        if let Some(likes) = self.likes {
            likes_in_range(likes)?;
        }

        Ok(BlogChanges {
            title: self.title,
            author: self.author.map(non_blank),
            url: self.url,
            likes: self.likes,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: String, // encoded
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: OwnerResponse,
}

#[derive(Debug, Serialize)]
pub struct BlogStatsResponse {
    pub total_likes: i64,
    pub favourite_blog: Option<FavouriteBlog>,
    pub most_blogs: Option<AuthorBlogCount>,
    pub most_likes: Option<AuthorLikes>,
}
