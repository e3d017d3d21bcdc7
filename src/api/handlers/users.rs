/*
 * Responsibility
 * - /users handler (一覧 / 登録)
 * - 一覧では各ユーザーの blogs をまとめて返す (blogs は 1 回の list で取得して振り分け)
 * - パスワードは bcrypt でハッシュしてから保存する
 */
use std::collections::HashMap;

use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{
    api::dto::users::{CreateUserRequest, UserBlogResponse, UserResponse},
    error::AppError,
    repos::{NewUser, RepoError},
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list().await?;
    let blogs = state.blogs.list().await?;

    let mut by_owner: HashMap<Uuid, Vec<UserBlogResponse>> = HashMap::new();
    for blog in blogs {
        by_owner
            .entry(blog.user_id)
            .or_default()
            .push(UserBlogResponse {
                id: state.id_codec.encode(blog.blog_id)?,
                title: blog.title,
                author: blog.author,
                url: blog.url,
                likes: blog.likes,
            });
    }

    let res = users
        .into_iter()
        .map(|u| UserResponse {
            blogs: by_owner.remove(&u.id).unwrap_or_default(),
            id: u.id,
            username: u.username,
            name: u.name,
        })
        .collect();

    Ok(Json(res))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let password_hash = state.passwords.hash(&req.password).await?;

    let row = state
        .users
        .insert(NewUser {
            username: req.username.trim().to_string(),
            name: req.name,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            RepoError::Conflict => {
                AppError::bad_request("USERNAME_TAKEN", "expected `username` to be unique")
            }
            e => e.into(),
        })?;

    tracing::info!(user_id = %row.id, username = %row.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: row.id,
            username: row.username,
            name: row.name,
            blogs: Vec::new(),
        }),
    ))
}
