/*
 * Responsibility
 * - handler が受け取る extractor の公開 (AuthCtx, 公開 ID)
 */
pub mod auth_ctx;
pub mod public_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use public_id::PublicBlogId;
