pub mod access_jwt;
pub mod factory;
pub mod password;

pub use access_jwt::{AuthService, VerifiedAccessToken};
pub use factory::{build_auth_service, build_password_service};
pub use password::{PasswordError, PasswordService};
