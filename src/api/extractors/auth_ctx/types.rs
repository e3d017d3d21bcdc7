/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use uuid::Uuid;

use crate::services::auth::VerifiedAccessToken;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は users."userId"。blog の owner 判定 (DELETE) に使う
/// - `jti` はログ相関用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub username: String,
    pub jti: String,
}

impl AuthCtx {
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(token: VerifiedAccessToken) -> Self {
        Self {
            user_id: token.user_id,
            username: token.username,
            jti: token.jti,
        }
    }
}
