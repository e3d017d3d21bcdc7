/*
 * Responsibility
 * - /api の URL 構造を定義
 * - 認証要否は handler の引数 (AuthCtxExtractor) で決める
 *   access middleware は app.rs で /api 全体に掛ける
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::handlers::{
    blogs::{create_blog, delete_blog, get_blog, get_blog_stats, list_blogs, update_blog},
    login::login,
    users::{create_user, list_users},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/stats", get(get_blog_stats))
        .route(
            "/blogs/{blog_id}",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/login", post(login))
}
