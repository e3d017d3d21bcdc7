/// Factory: build auth services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, PasswordError, PasswordService};

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        &config.jwt_secret,
        config.access_token_ttl_seconds,
        config.access_token_leeway_seconds,
    ))
}

pub fn build_password_service(config: &Config) -> Result<PasswordService, PasswordError> {
    PasswordService::new(config.bcrypt_cost)
}
