//! Centralized configuration (environment variables + defaults).
//!
//! Call `dotenv::dotenv()` before reading these so a local `.env` is honored.

use anyhow::Context;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
pub const DEFAULT_PHOTO_DIR: &str = "fotos";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Database URL must be provided (no default).
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Address the HTTP server listens on.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Directory uploaded photos are written to.
pub fn photo_dir() -> PathBuf {
    std::env::var("PHOTO_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PHOTO_DIR))
}

pub fn db_max_connections() -> anyhow::Result<u32> {
    parse_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS).map(|v| v.max(1))
}

/// Transport-level ceiling on request bodies.
///
/// Kept well above the photo size limit so oversized photos still reach the
/// upload validator and get the usual 400 answer.
pub fn upload_body_limit() -> anyhow::Result<usize> {
    parse_or("UPLOAD_BODY_LIMIT", DEFAULT_UPLOAD_BODY_LIMIT)
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be a valid number (got '{}')", key, v)),
        Err(_) => Ok(default),
    }
}
