//! Access tokens: issue on login, verify on every authenticated request.
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET`. The same process both
//! issues and verifies, so a shared secret is enough.
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("invalid 'sub' (expected UUID)")]
    InvalidSubUuid,
}

/// Access token (JWT) claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// What the middleware hands to the rest of the app after verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
    pub username: String,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, ttl_seconds: u64, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<IssuedToken, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl_seconds as i64,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(IssuedToken {
            access_token: self.sign(&claims)?,
            expires_in: self.ttl_seconds,
        })
    }

    /// Signature + `exp` are checked by jsonwebtoken; `sub` must be a UUID
    /// and `username` must not be blank.
    pub fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AuthError> {
        let claims =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if claims.username.trim().is_empty() {
            return Err(AuthError::EmptyClaim("username"));
        }
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubUuid)?;

        Ok(VerifiedAccessToken {
            user_id,
            username: claims.username,
            jti: claims.jti,
        })
    }

    fn sign(&self, claims: &AccessTokenClaims) -> Result<String, AuthError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        Ok(jsonwebtoken::encode(&header, claims, &self.encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret", 3600, 0)
    }

    #[test]
    fn issued_token_verifies() {
        let auth = service();
        let user_id = Uuid::new_v4();

        let issued = auth.issue(user_id, "mluukkai").unwrap();
        assert_eq!(issued.expires_in, 3600);

        let verified = auth.verify(&issued.access_token).unwrap();
        assert_eq!(verified.user_id, user_id);
        assert_eq!(verified.username, "mluukkai");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issued = AuthService::new("other-secret", 3600, 0)
            .issue(Uuid::new_v4(), "root")
            .unwrap();

        assert!(matches!(
            service().verify(&issued.access_token),
            Err(AuthError::Jwt(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = service();
        let now = chrono::Utc::now().timestamp();
        let token = auth
            .sign(&AccessTokenClaims {
                sub: Uuid::new_v4().to_string(),
                username: "root".to_string(),
                iat: now - 7200,
                exp: now - 3600,
                jti: Uuid::new_v4().to_string(),
            })
            .unwrap();

        assert!(matches!(auth.verify(&token), Err(AuthError::Jwt(_))));
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let auth = service();
        let now = chrono::Utc::now().timestamp();
        let token = auth
            .sign(&AccessTokenClaims {
                sub: "not-a-uuid".to_string(),
                username: "root".to_string(),
                iat: now,
                exp: now + 60,
                jti: Uuid::new_v4().to_string(),
            })
            .unwrap();

        assert!(matches!(auth.verify(&token), Err(AuthError::InvalidSubUuid)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(service().verify("not.a.jwt").is_err());
    }
}
