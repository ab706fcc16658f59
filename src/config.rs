//! Configuration management for the media catalog client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage the API
//! location, the bearer token passed to every API call and the web UI address.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

/// Web UI address used when `MEDIADEX_WEB_URL` is not set.
pub const DEFAULT_WEB_URL: &str = "http://localhost:5173";

/// Wait between retries of a `502 Bad Gateway` when `MEDIADEX_RETRY_DELAY`
/// is not set.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads environment
/// variables from `mediadex/.env` under the platform-specific local data
/// directory. A missing file is not an error, the process environment alone
/// may carry the configuration.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/mediadex/.env`
/// - macOS: `~/Library/Application Support/mediadex/.env`
/// - Windows: `%LOCALAPPDATA%/mediadex/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
///
/// # Example
///
/// ```
/// use mediadex::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mediadex/.env");
    path
}

/// Returns the base URL of the catalog REST API without a trailing slash.
///
/// # Errors
///
/// Fails if `MEDIADEX_API_URL` is not set or empty.
///
/// # Example
///
/// ```
/// let api_url = api_url()?; // e.g., "https://api.example.com/v1"
/// ```
pub fn api_url() -> Result<String, String> {
    required("MEDIADEX_API_URL").map(|url| url.trim_end_matches('/').to_string())
}

/// Returns the bearer token sent with every API request.
///
/// # Errors
///
/// Fails if `MEDIADEX_API_TOKEN` is not set or empty.
pub fn api_token() -> Result<String, String> {
    required("MEDIADEX_API_TOKEN")
}

/// Returns the address of the web UI, used to open catalog pages in a browser.
pub fn web_url() -> String {
    env::var("MEDIADEX_WEB_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_WEB_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Seconds to wait before retrying a request the API answered with 502.
pub fn retry_delay() -> Duration {
    parse_retry_delay(env::var("MEDIADEX_RETRY_DELAY").ok().as_deref())
}

/// Reads a whole number of seconds, falling back to [`DEFAULT_RETRY_DELAY`].
pub fn parse_retry_delay(value: Option<&str>) -> Duration {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_DELAY)
}

/// Whether debug output is enabled through `MEDIADEX_DEBUG`.
pub fn debug_enabled() -> bool {
    env::var("MEDIADEX_DEBUG")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn required(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(format!("{} must be set", name)),
    }
}
