/*
 * Responsibility
 * - 永続化の抽象 (BlogRepo / UserRepo) と実装 (Postgres / in-memory) の公開
 */
pub mod blog_repo;
pub mod error;
pub mod memory;
pub mod user_repo;

pub use blog_repo::{BlogChanges, BlogRepo, BlogRow, NewBlog, PgBlogRepo};
pub use error::RepoError;
pub use memory::MemoryStore;
pub use user_repo::{NewUser, PgUserRepo, UserRepo};
