//! Configuration Management
//!
//! Loads the harness configuration: service endpoints, the admin account the
//! sweep authenticates as, capability toggles, and the fixture resources the
//! harness permanently owns.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Admin account the sweep runs as
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// API token; falls back to the OS_TOKEN environment variable
    #[serde(default)]
    pub token: Option<String>,
    pub admin_username: String,
    pub admin_project: String,
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

fn default_admin_role() -> String {
    "admin".to_string()
}

/// Base URL per service family
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoints {
    pub identity: String,
    pub compute: String,
    pub network: String,
    pub volume: String,
    pub image: String,
}

impl Endpoints {
    fn validate(&self) -> Result<()> {
        for (name, endpoint) in [
            ("identity", &self.identity),
            ("compute", &self.compute),
            ("network", &self.network),
            ("volume", &self.volume),
            ("image", &self.image),
        ] {
            Url::parse(endpoint)
                .with_context(|| format!("Invalid {} endpoint: {}", name, endpoint))?;
        }
        Ok(())
    }
}

/// Which service families the target cloud runs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceToggles {
    pub compute: bool,
    pub network: bool,
    pub volume: bool,
    pub image: bool,
}

impl Default for ServiceToggles {
    fn default() -> Self {
        Self {
            compute: true,
            network: true,
            volume: true,
            image: true,
        }
    }
}

/// Resource ids the harness permanently owns. Protected from deletion
/// whenever preserve mode is on (the default).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreservedFixtures {
    pub images: Vec<String>,
    pub flavors: Vec<String>,
    pub networks: Vec<String>,
    pub projects: Vec<String>,
    pub users: Vec<String>,
}

/// Harness configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub auth: AuthConfig,
    pub endpoints: Endpoints,
    #[serde(default)]
    pub services: ServiceToggles,
    /// Enabled network API extension aliases (e.g. "metering")
    #[serde(default)]
    pub network_extensions: Vec<String>,
    #[serde(default)]
    pub preserved: PreservedFixtures,
    #[serde(default = "default_baseline_file")]
    pub baseline_file: PathBuf,
    #[serde(default = "default_report_file")]
    pub report_file: PathBuf,
}

fn default_baseline_file() -> PathBuf {
    PathBuf::from("baseline.json")
}

fn default_report_file() -> PathBuf {
    PathBuf::from("dry_run_report.json")
}

impl Config {
    /// Default config file location
    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stacksweep").join("config.json"))
    }

    /// Load configuration from an explicit path or the default location.
    /// A missing or invalid config is fatal: the sweep must know who the
    /// harness admin is before doing anything destructive.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path().context("Could not determine config directory")?,
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.endpoints.validate()?;
        Ok(config)
    }

    /// Resolve the API token (config value, then OS_TOKEN)
    pub fn token(&self) -> Result<String> {
        if let Some(token) = &self.auth.token {
            return Ok(token.clone());
        }
        std::env::var("OS_TOKEN")
            .context("No API token: set auth.token in the config or the OS_TOKEN environment variable")
    }

    /// Whether a network API extension is enabled
    pub fn has_network_extension(&self, alias: &str) -> bool {
        self.network_extensions.iter().any(|e| e == alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config_json() -> &'static str {
        r#"{
            "auth": {
                "token": "secret",
                "admin_username": "harness-admin",
                "admin_project": "harness"
            },
            "endpoints": {
                "identity": "http://keystone:5000/v3",
                "compute": "http://nova:8774/v2.1",
                "network": "http://neutron:9696/v2.0",
                "volume": "http://cinder:8776/v3",
                "image": "http://glance:9292/v2"
            }
        }"#
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config: Config = serde_json::from_str(minimal_config_json()).expect("parse");
        assert_eq!(config.auth.admin_role, "admin");
        assert!(config.services.compute && config.services.network);
        assert!(config.preserved.images.is_empty());
        assert_eq!(config.baseline_file, PathBuf::from("baseline.json"));
        assert!(!config.has_network_extension("metering"));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(minimal_config_json()).expect("parse");
        value["endpoints"]["compute"] = serde_json::json!("not a url");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, value.to_string()).expect("write");

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, minimal_config_json()).expect("write");

        let config = Config::load(Some(&path)).expect("load");
        assert_eq!(config.auth.admin_username, "harness-admin");
        assert_eq!(config.token().expect("token"), "secret");
    }
}
