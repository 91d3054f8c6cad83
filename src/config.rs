//! Configuration management for cdnsync.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/cdnsync/config.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory where range files are written
    pub dir: PathBuf,

    /// Output filename for the Cloudflare list
    pub cloudflare_file: String,

    /// Output filename for the Gcore list
    pub gcore_file: String,

    /// Services to reload after an update
    pub services: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/etc/cdnsync/ranges"),
            cloudflare_file: "cloudflare.txt".to_string(),
            gcore_file: "gcore.txt".to_string(),
            services: vec!["nginx".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// An explicitly passed path must exist and parse. The default path is
    /// optional: when absent, built-in defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::parse_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::parse_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Apply CLI overrides on top of file/default values
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(ref dir) = cli.dir {
            self.dir = dir.clone();
        }
        if let Some(ref name) = cli.cloudflare_file {
            self.cloudflare_file = name.clone();
        }
        if let Some(ref name) = cli.gcore_file {
            self.gcore_file = name.clone();
        }
        if let Some(ref services) = cli.services {
            self.services = services.clone();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.dir.is_absolute() {
            anyhow::bail!("Target directory must be an absolute path: {:?}", self.dir);
        }

        for name in [&self.cloudflare_file, &self.gcore_file] {
            if name.is_empty() || name.contains('/') {
                anyhow::bail!("Invalid output filename: '{}'", name);
            }
        }

        for service in &self.services {
            if !is_valid_service_name(service) {
                anyhow::bail!("Invalid service name: '{}'", service);
            }
        }

        Ok(())
    }
}

/// Service names are passed to systemctl, so restrict them to unit-name
/// characters to rule out option injection.
fn is_valid_service_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '@'))
}
