/*
 * Responsibility
 * - POST /login: username/password を検証して access token を発行
 * - ユーザー不在とパスワード不一致は同じ 401 を返す
 * - ユーザー不在でもダミー hash で bcrypt を 1 回回し、応答時間を揃える
 */
use axum::{Json, extract::State};

use crate::{
    api::dto::login::{LoginRequest, LoginResponse},
    error::AppError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let user = state.users.find_by_username(req.username.trim()).await?;

    let password_ok = match &user {
        Some(user) => state.passwords.verify(&req.password, &user.password_hash).await?,
        None => state.passwords.verify_unknown(&req.password).await?,
    };

    let user = match user {
        Some(user) if password_ok => user,
        _ => {
            tracing::warn!(username = %req.username, "login failed");
            return Err(AppError::unauthorized("invalid username or password"));
        }
    };

    let issued = state.auth.issue(user.id, &user.username).map_err(|e| {
        tracing::error!(error = ?e, user_id = %user.id, "failed to issue access token");
        AppError::Internal
    })?;

    Ok(Json(LoginResponse {
        token: issued.access_token,
        expires_in: issued.expires_in,
        username: user.username,
        name: user.name,
    }))
}
