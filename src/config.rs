//! Environment-based configuration module
//!
//! Configuration can be set via:
//! 1. Environment variables (highest priority)
//! 2. .env file
//! 3. Default values (lowest priority)
//!
//! The resulting `AppConfig` is built once at startup and passed by
//! reference to whatever needs it; there is no global instance.

use std::path::{Path, PathBuf};
use std::{env, fs};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the products JSON document
    pub productos_path: PathBuf,

    /// Path to the sales JSON document
    pub ventas_path: PathBuf,

    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            productos_path: env::var("PRODUCTOS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/productos.json")),
            ventas_path: env::var("VENTAS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/ventas.json")),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and defaults
    pub fn load() -> Self {
        Self::default()
    }

    /// Load configuration, applying a .env file first (if it exists)
    pub fn load_with_env_file(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            // Simple .env parser (key=value format)
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');

                    // Real environment variables keep priority
                    if env::var(key).is_err() {
                        env::set_var(key, value);
                    }
                }
            }
        }

        Self::default()
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
