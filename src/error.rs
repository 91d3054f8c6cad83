//! Error types for cdnsync.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("No addresses extracted from {provider} response")]
    EmptyResult { provider: String },

    #[error("Write failed for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reload failed for service '{service}': {reason}")]
    ServiceReload { service: String, reason: String },

    #[error("Unknown selector '{0}' (expected: all, cloudflare, gcore, reload, help)")]
    Selector(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
