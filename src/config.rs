// config.rs

use crate::spreadsheets::DEFAULT_CHUNK_ROWS;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {message}")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Uploads larger than this are rejected with 413.
    pub max_upload_bytes: usize,
    /// Rows per file for the "1 file per N lines" export.
    pub chunk_rows: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            max_upload_bytes: 10 * 1024 * 1024,
            chunk_rows: DEFAULT_CHUNK_ROWS,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            bind_addr: parse_var("PRICE_SPLITTER_ADDR", defaults.bind_addr)?,
            max_workers: parse_var("PRICE_SPLITTER_WORKERS", defaults.max_workers)?,
            max_upload_bytes: parse_var(
                "PRICE_SPLITTER_MAX_UPLOAD_BYTES",
                defaults.max_upload_bytes,
            )?,
            chunk_rows: parse_var("PRICE_SPLITTER_CHUNK_ROWS", defaults.chunk_rows)?,
            log_level: env::var("PRICE_SPLITTER_LOG").unwrap_or(defaults.log_level),
        };

        if config.chunk_rows == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PRICE_SPLITTER_CHUNK_ROWS",
                value: "0".into(),
                message: "must be at least 1".into(),
            });
        }
        if config.max_workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PRICE_SPLITTER_WORKERS",
                value: "0".into(),
                message: "must be at least 1".into(),
            });
        }

        Ok(config)
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
                message: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}
