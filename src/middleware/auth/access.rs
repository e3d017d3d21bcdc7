//! access token (JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization` ヘッダが無いリクエストはそのまま通す (匿名)。
//!   認証が必要な handler は `AuthCtxExtractor` で 401 を返す。
//! - ヘッダがあるのに不正 (Bearer 以外 / 署名不正 / 期限切れ) なら、ここで 401。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// `/api/*` に access token 検証を掛ける。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(auth) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(next.run(req).await);
    };

    let token = auth
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::unauthorized("token missing or malformed"))?;

    let verified = match state.auth.verify(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = ?err, "access token verification failed");
            return Err(AppError::unauthorized("token invalid"));
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(verified));

    Ok(next.run(req).await)
}
