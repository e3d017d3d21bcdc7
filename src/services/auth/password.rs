//! Password hashing (bcrypt).
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Clone, Debug)]
pub struct PasswordService {
    cost: u32,
    // Hashed with the same cost, so a lookup miss costs as much as a real check.
    dummy_hash: Arc<str>,
}

impl PasswordService {
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let dummy_hash = bcrypt::hash("dummy password for unknown users", cost)?;
        Ok(Self {
            cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }

    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(ok)
    }

    /// Burns one bcrypt verification for a login whose user does not exist.
    /// Always reports a mismatch.
    pub async fn verify_unknown(&self, password: &str) -> Result<bool, PasswordError> {
        self.verify(password, &self.dummy_hash).await?;
        Ok(false)
    }
}
