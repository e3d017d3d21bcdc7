/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - blogs/users repo, id_codec, auth (JWT), passwords (bcrypt)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{BlogRepo, UserRepo};
use crate::services::{
    auth::{AuthService, PasswordService},
    id_codec::IdCodec,
};

#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepo>,
    pub users: Arc<dyn UserRepo>,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
    pub passwords: PasswordService,
}

impl AppState {
    pub fn new(
        blogs: Arc<dyn BlogRepo>,
        users: Arc<dyn UserRepo>,
        id_codec: IdCodec,
        auth: Arc<AuthService>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            blogs,
            users,
            id_codec,
            auth,
            passwords,
        }
    }
}
