// src/server/config.rs
//! Configuration file parsing for the recipebox server
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address, CORS origins
//! - [storage] - Root directory for the database and media
//! - [auth] - Header carrying the proxy-authenticated user id

use crate::db::paths;
use crate::server::{DEFAULT_USER_HEADER, ServerConfig};
use anyhow::{Context, Result};
use axum::http::HeaderName;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageSection,

    /// Identity settings
    #[serde(default)]
    pub auth: AuthSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Public API bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Origins allowed to call the API cross-site
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

/// Storage configuration section
#[derive(Debug, Deserialize)]
pub struct StorageSection {
    /// Root directory; the database and `media/` live under it
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(paths::DEFAULT_ROOT)
}

/// Identity configuration section
#[derive(Debug, Deserialize)]
pub struct AuthSection {
    #[serde(default = "default_user_header")]
    pub user_header: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
        }
    }
}

fn default_user_header() -> String {
    "X-User-Id".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        HeaderName::from_bytes(self.auth.user_header.as_bytes())
            .with_context(|| format!("Invalid auth.user_header: {}", self.auth.user_header))?;

        for origin in &self.server.cors_origins {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                anyhow::bail!("server.cors_origins entries must be http(s) origins, got '{}'", origin);
            }
        }

        if self.storage.root.as_os_str().is_empty() {
            anyhow::bail!("storage.root must not be empty");
        }

        Ok(())
    }

    /// Database file under the storage root
    pub fn db_path(&self) -> PathBuf {
        paths::db_path(&self.storage.root)
    }

    /// Media directory under the storage root
    pub fn media_dir(&self) -> PathBuf {
        self.storage.root.join("media")
    }

    /// Convert to the internal ServerConfig structure
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let bind_addr = self.server.bind.parse()?;
        let user_header = HeaderName::from_bytes(self.auth.user_header.as_bytes())
            .unwrap_or_else(|_| HeaderName::from_static(DEFAULT_USER_HEADER));

        Ok(ServerConfig {
            bind_addr,
            db_path: self.db_path(),
            media_dir: self.media_dir(),
            user_header,
            cors_allowed_origins: self.server.cors_origins.clone(),
        })
    }
}
