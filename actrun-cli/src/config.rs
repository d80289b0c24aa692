//! CLI configuration and credential cache
//!
//! The validated API key is cached in a plain file under the user config
//! directory so subsequent invocations pick it up without re-prompting.
//! `ACTRUN_CREDENTIALS` overrides the location for scripting and tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the gateway service
    pub gateway_url: String,
}

/// Location of the cached credential.
pub fn credentials_path() -> PathBuf {
    if let Ok(path) = std::env::var("ACTRUN_CREDENTIALS") {
        return PathBuf::from(path);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".config").join("actrun").join("credentials")
}

/// Reads the cached API key, if one is present and non-empty.
pub fn load_api_key() -> Option<String> {
    load_api_key_from(&credentials_path())
}

/// Caches the API key for later invocations.
pub fn save_api_key(api_key: &str) -> Result<()> {
    save_api_key_to(&credentials_path(), api_key)
}

/// Removes the cached API key. Returns whether one was present.
pub fn clear_api_key() -> Result<bool> {
    clear_api_key_at(&credentials_path())
}

fn load_api_key_from(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn save_api_key_to(path: &Path, api_key: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, api_key).with_context(|| format!("failed to write {}", path.display()))
}

fn clear_api_key_at(path: &Path) -> Result<bool> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
        Ok(true)
    } else {
        Ok(false)
    }
}
