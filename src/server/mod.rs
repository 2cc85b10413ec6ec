// src/server/mod.rs
//! Recipebox HTTP server
//!
//! A JSON surface over the catalog:
//! - Public listings and recipe pages
//! - Draft authoring for signed-in users (create, edit, publish, delete)
//! - Favourite toggle and comments on published recipes
//! - Static media under `/media/`
//!
//! Every handler opens its own SQLite connection inside `spawn_blocking`;
//! nothing is cached in-process between requests.

mod config;
mod error;
mod handlers;
mod routes;
mod viewer;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult, Problem};
pub use routes::create_router;
pub use viewer::ClaimedUser;

use anyhow::{Context, Result};
use axum::http::HeaderName;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::db;
use crate::db::paths;

/// Header the fronting auth proxy sets when nothing else is configured
pub const DEFAULT_USER_HEADER: &str = "x-user-id";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the recipebox database
    pub db_path: PathBuf,
    /// Directory served under `/media/`
    pub media_dir: PathBuf,
    /// Header carrying the authenticated user id
    pub user_header: HeaderName,
    /// CORS allowed origins (empty = same-origin only)
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let root = PathBuf::from(paths::DEFAULT_ROOT);
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            db_path: paths::db_path(&root),
            media_dir: root.join("media"),
            user_header: HeaderName::from_static(DEFAULT_USER_HEADER),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Shared server state
pub struct ServerState {
    pub config: ServerConfig,
}

pub type SharedState = Arc<ServerState>;

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Open a database connection
    ///
    /// Call from within `spawn_blocking`.
    pub fn open_db(&self) -> crate::Result<rusqlite::Connection> {
        db::open(&self.config.db_path.to_string_lossy())
    }
}

/// Start the recipebox server
pub async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting recipebox server on {}", config.bind_addr);
    tracing::info!("Database: {:?}", config.db_path);
    tracing::info!("Media: {:?}", config.media_dir);
    tracing::info!("Identity header: {}", config.user_header);

    db::init(&config.db_path.to_string_lossy())
        .with_context(|| format!("Failed to prepare database {}", config.db_path.display()))?;
    std::fs::create_dir_all(&config.media_dir).with_context(|| {
        format!("Failed to create media directory {}", config.media_dir.display())
    })?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    let state = Arc::new(ServerState::new(config));
    let app = create_router(state);

    tracing::info!("Recipebox is ready to serve");
    axum::serve(listener, app).await?;
    Ok(())
}
