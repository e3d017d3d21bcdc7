//! In-memory storage backend.
//!
//! Implements both `BlogRepo` and `UserRepo` over one shared store so that
//! blog rows can carry their owner's username/name the same way the SQL
//! JOIN does. Used for local runs without Postgres and by the router tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::blog_repo::{BlogChanges, BlogRepo, BlogRow, NewBlog};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{NewUser, UserRepo, UserRow};

#[derive(Debug, Clone)]
struct StoredBlog {
    title: String,
    author: Option<String>,
    url: String,
    likes: i64,
    user_id: Uuid,
}

#[derive(Debug, Default)]
struct Inner {
    // Insertion order.
    users: Vec<UserRow>,
    // Keyed by serial id, so iteration is insertion order too.
    blogs: BTreeMap<i64, StoredBlog>,
    last_blog_id: i64,
}

impl Inner {
    fn owner(&self, user_id: Uuid) -> Option<&UserRow> {
        self.users.iter().find(|u| u.id == user_id)
    }

    fn to_row(&self, blog_id: i64, blog: &StoredBlog) -> RepoResult<BlogRow> {
        // Mirrors the FK: a blog without an owner cannot exist.
        let owner = self.owner(blog.user_id).ok_or(RepoError::Conflict)?;
        Ok(BlogRow {
            blog_id,
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
            likes: blog.likes,
            user_id: blog.user_id,
            owner_username: owner.username.clone(),
            owner_name: owner.name.clone(),
        })
    }
}

/// Cheap to clone; all clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepo for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<BlogRow>> {
        let inner = self.inner.read().await;
        inner
            .blogs
            .iter()
            .map(|(id, blog)| inner.to_row(*id, blog))
            .collect()
    }

    async fn get(&self, blog_id: i64) -> RepoResult<Option<BlogRow>> {
        let inner = self.inner.read().await;
        inner
            .blogs
            .get(&blog_id)
            .map(|blog| inner.to_row(blog_id, blog))
            .transpose()
    }

    async fn insert(&self, blog: NewBlog) -> RepoResult<BlogRow> {
        let mut inner = self.inner.write().await;
        if inner.owner(blog.user_id).is_none() {
            return Err(RepoError::Conflict);
        }

        inner.last_blog_id += 1;
        let blog_id = inner.last_blog_id;
        let stored = StoredBlog {
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user_id: blog.user_id,
        };
        let row = inner.to_row(blog_id, &stored)?;
        inner.blogs.insert(blog_id, stored);

        Ok(row)
    }

    async fn update(&self, blog_id: i64, changes: BlogChanges) -> RepoResult<Option<BlogRow>> {
        let mut inner = self.inner.write().await;
        let Some(blog) = inner.blogs.get_mut(&blog_id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            blog.title = title;
        }
        if let Some(author) = changes.author {
            blog.author = author;
        }
        if let Some(url) = changes.url {
            blog.url = url;
        }
        if let Some(likes) = changes.likes {
            blog.likes = likes;
        }

        let blog = blog.clone();
        inner.to_row(blog_id, &blog).map(Some)
    }

    async fn delete(&self, blog_id: i64) -> RepoResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.blogs.remove(&blog_id).is_some())
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn get(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        Ok(self.inner.read().await.owner(user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: NewUser) -> RepoResult<UserRow> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Conflict);
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
        };
        inner.users.push(row.clone());

        Ok(row)
    }
}
