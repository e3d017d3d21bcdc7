/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (storage, id codec, auth) → Router 組み立て
 * - Middleware の適用 (HTTP 共通 / CORS / security headers / access token)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{Config, StorageBackend},
    middleware::{self, http::HttpLimits},
    repos::{BlogRepo, MemoryStore, PgBlogRepo, PgUserRepo, UserRepo},
    services::{
        auth::{build_auth_service, build_password_service},
        id_codec::IdCodec,
    },
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bloglist_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;

    let (blogs, users) = match &config.storage {
        StorageBackend::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .context("failed to connect to postgres")?;

            sqlx::migrate!()
                .run(&pool)
                .await
                .context("failed to run migrations")?;

            let blogs: Arc<dyn BlogRepo> = Arc::new(PgBlogRepo::new(pool.clone()));
            let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool));
            (blogs, users)
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            let store = MemoryStore::new();
            let blogs: Arc<dyn BlogRepo> = Arc::new(store.clone());
            let users: Arc<dyn UserRepo> = Arc::new(store);
            (blogs, users)
        }
    };

    Ok(AppState::new(
        blogs,
        users,
        id_codec,
        build_auth_service(config),
        build_password_service(config).context("failed to prepare password hashing")?,
    ))
}

/// Routes + access-token middleware, without the transport layers.
pub fn build_app(state: AppState) -> Router {
    let api = middleware::auth::access::apply(api::routes(), state.clone());

    Router::new()
        .route("/health", get(api::handlers::health::health))
        .nest("/api", api)
        .with_state(state)
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = build_app(state);
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, HttpLimits::from_config(config))
}
