//! CORS policy for browser clients (e.g. a bloglist frontend on another origin).
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config (comma-separated env var), WITHOUT credentials.
//!   An empty allowlist allows no origin.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

// Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
fn layer(production: bool, allowed_origins: &[String]) -> CorsLayer {
    let cors = if production {
        let allowed: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _req| allowed.iter().any(|v| v == origin),
        ))
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static(REQUEST_ID_HEADER),
    ])
    .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
    .max_age(std::time::Duration::from_secs(60 * 10))
}

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(
        config.app_env.is_production(),
        &config.cors_allowed_origins,
    ))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    async fn preflight(production: bool, allowed: &[String], origin: &str) -> Option<HeaderValue> {
        let app = Router::new()
            .route("/api/blogs", get(|| async { "[]" }))
            .layer(layer(production, allowed));

        let res = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/blogs")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn development_allows_any_origin() {
        let allow = preflight(false, &[], "http://localhost:5173").await;
        assert_eq!(allow.unwrap(), "*");
    }

    #[tokio::test]
    async fn production_allows_only_listed_origins() {
        let allowed = vec!["https://blogs.example".to_string()];

        let allow = preflight(true, &allowed, "https://blogs.example").await;
        assert_eq!(allow.unwrap(), "https://blogs.example");

        assert!(preflight(true, &allowed, "https://evil.example").await.is_none());
    }
}
