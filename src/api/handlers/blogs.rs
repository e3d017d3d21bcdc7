/*
 * Responsibility
 * - /blogs 系 CRUD handler + 集計 (/blogs/stats)
 * - Path の {blog_id} は公開 ID → extractor で内部 ID に変換して受け取る
 * - 作成/削除は AuthCtxExtractor 必須。削除は owner 本人のみ
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::blogs::{
            BlogResponse, BlogStatsResponse, CreateBlogRequest, OwnerResponse, UpdateBlogRequest,
        },
        extractors::{AuthCtxExtractor, PublicBlogId},
    },
    error::AppError,
    repos::BlogRow,
    services::blog_stats::{self, StatsError},
    state::AppState,
};

fn row_to_response(state: &AppState, row: BlogRow) -> Result<BlogResponse, AppError> {
    let public_id = state.id_codec.encode(row.blog_id)?;

    Ok(BlogResponse {
        id: public_id,
        title: row.title,
        author: row.author,
        url: row.url,
        likes: row.likes,
        user: OwnerResponse {
            id: row.user_id,
            username: row.owner_username,
            name: row.owner_name,
        },
    })
}

// The max helpers report an empty list as null; any other failure is an error.
fn or_null<T>(result: Result<T, StatsError>) -> Result<Option<T>, StatsError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StatsError::EmptyInput) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let rows = state.blogs.list().await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn get_blog_stats(
    State(state): State<AppState>,
) -> Result<Json<BlogStatsResponse>, AppError> {
    let rows = state.blogs.list().await?;

    Ok(Json(BlogStatsResponse {
        total_likes: blog_stats::total_likes(&rows)?,
        favourite_blog: or_null(blog_stats::favourite_blog(&rows))?,
        most_blogs: or_null(blog_stats::most_blogs(&rows))?,
        most_likes: or_null(blog_stats::most_likes(&rows))?,
    }))
}

pub async fn get_blog(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
) -> Result<Json<BlogResponse>, AppError> {
    let row = state
        .blogs
        .get(blog_id.id)
        .await?
        .ok_or(AppError::not_found("blog"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn create_blog(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    Json(req): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogResponse>), AppError> {
    let new_blog = req
        .into_new_blog(auth.user_id)
        .map_err(AppError::validation)?;

    // The token may outlive its user.
    if state.users.get(auth.user_id).await?.is_none() {
        return Err(AppError::unauthorized("user no longer exists"));
    }

    let row = state.blogs.insert(new_blog).await?;
    tracing::info!(blog_id = row.blog_id, username = %auth.username, "blog created");

    let res = row_to_response(&state, row)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn update_blog(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
    Json(req): Json<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    let changes = req.into_changes().map_err(AppError::validation)?;

    let row = state
        .blogs
        .update(blog_id.id, changes)
        .await?
        .ok_or(AppError::not_found("blog"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    blog_id: PublicBlogId,
) -> Result<StatusCode, AppError> {
    let row = state
        .blogs
        .get(blog_id.id)
        .await?
        .ok_or(AppError::not_found("blog"))?;

    if !auth.owns(row.user_id) {
        tracing::warn!(
            blog_id = row.blog_id,
            owner_id = %row.user_id,
            user_id = %auth.user_id,
            "delete rejected: not the owner"
        );
        return Err(AppError::Forbidden);
    }

    if state.blogs.delete(blog_id.id).await? {
        tracing::info!(blog_id = row.blog_id, jti = %auth.jti, "blog deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("blog"))
    }
}
