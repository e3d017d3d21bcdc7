/*
 * Responsibility
 * - Users の request/response DTO
 * - passwordHash は response に絶対に載せない
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MIN_LENGTH: usize = 3;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().chars().count() < MIN_LENGTH {
            return Err("username must be at least 3 characters long");
        }
        if self.password.chars().count() < MIN_LENGTH {
            return Err("password must be at least 3 characters long");
        }

        Ok(())
    }
}

/// A blog as listed under its owner (no nested user).
#[derive(Debug, Serialize)]
pub struct UserBlogResponse {
    pub id: String, // encoded
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub blogs: Vec<UserBlogResponse>,
}
