//! Configuration types and loading
//!
//! Configuration comes from defaults overridden by environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Server configuration
    pub server: ServerConfig,

    /// Attachment storage configuration
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection URL; posts are kept in memory when unset
    pub url: Option<String>,
    pub pool_size: u32,
    pub pool_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for request bodies; must leave room above the picture cap
    pub max_body_size_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory of the public attachment disk
    pub local_path: String,
    /// Folder (under the root) that receives uploaded pictures
    pub upload_folder: String,
    /// Maximum picture size in kilobytes
    pub max_picture_kb: u64,
    /// Allowed picture extensions (lowercase, without dot)
    pub allowed_extensions: Vec<String>,
    /// How stored files are named
    pub file_naming: FileNaming,
}

impl StorageConfig {
    pub fn max_picture_bytes(&self) -> u64 {
        self.max_picture_kb * 1024
    }
}

/// Strategy for naming stored files
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// `<unix-seconds>.<ext>`; two uploads in the same second share a name
    Timestamp,
    /// `<unix-seconds>_<uuid>.<ext>`
    #[default]
    Unique,
}

impl std::str::FromStr for FileNaming {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timestamp" => Ok(FileNaming::Timestamp),
            "unique" => Ok(FileNaming::Unique),
            other => Err(ConfigError::InvalidValue {
                key: "POSTBOARD_FILE_NAMING".into(),
                message: format!("expected `timestamp` or `unique`, got `{}`", other),
            }),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                pool_size: 10,
                pool_timeout_seconds: 5,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_body_size_bytes: 8 * 1024 * 1024, // 8MB
            },
            storage: StorageConfig {
                local_path: "storage/app/public".to_string(),
                upload_folder: "uploads".to_string(),
                max_picture_kb: 2048,
                allowed_extensions: ["jpeg", "png", "jpg", "gif", "svg"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                file_naming: FileNaming::default(),
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Database
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            config.database.url = Some(url);
        }
        if let Some(size) = lookup("DATABASE_POOL_SIZE") {
            config.database.pool_size = parse_value("DATABASE_POOL_SIZE", &size)?;
        }

        // Server
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = parse_value("PORT", &port)?;
        }
        if let Some(size) = lookup("MAX_BODY_SIZE_BYTES") {
            config.server.max_body_size_bytes = parse_value("MAX_BODY_SIZE_BYTES", &size)?;
        }

        // Storage
        if let Some(path) = lookup("POSTBOARD_STORAGE_PATH") {
            config.storage.local_path = path;
        }
        if let Some(folder) = lookup("POSTBOARD_UPLOAD_FOLDER") {
            let folder = folder.trim_matches('/').to_string();
            if folder.is_empty() || folder.contains("..") {
                return Err(ConfigError::InvalidValue {
                    key: "POSTBOARD_UPLOAD_FOLDER".into(),
                    message: format!("`{}` is not a relative folder name", folder),
                });
            }
            config.storage.upload_folder = folder;
        }
        if let Some(kb) = lookup("POSTBOARD_MAX_PICTURE_KB") {
            config.storage.max_picture_kb = parse_value("POSTBOARD_MAX_PICTURE_KB", &kb)?;
        }
        if let Some(naming) = lookup("POSTBOARD_FILE_NAMING") {
            config.storage.file_naming = naming.parse()?;
        }

        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}
