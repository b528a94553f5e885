use orbit_common::OrbitClass;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::module::orbit::DEFAULT_RANKING_SIZE;
use crate::module::source::DEFAULT_ION_BASE_URL;

const CONFIG_PATH_ENV: &str = "ORBIT_EXPLORER_CONFIG";
const ION_TOKEN_ENV: &str = "CESIUM_ION_TOKEN";

/// Where the satellite collection comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    File {
        path: String,
    },
    Ion {
        #[serde(default = "default_ion_base_url")]
        base_url: String,
        #[serde(default)]
        access_token: String,   // falls back to $CESIUM_ION_TOKEN when empty
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File {
            path: "data/satellites.czml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u64,

    /// Size of the most/least unique tables
    #[serde(default = "default_ranking_size")]
    pub ranking_size: usize,

    /// Orbit class selected on startup
    #[serde(default = "default_orbit_class")]
    pub default_orbit_class: OrbitClass,

    /// Deep-link query run once after startup, like `?id=25544`
    #[serde(default)]
    pub initial_search: Option<String>,

    #[serde(default)]
    pub source: SourceConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_retention_days() -> u64 {
    3
}

fn default_ranking_size() -> usize {
    DEFAULT_RANKING_SIZE
}

fn default_orbit_class() -> OrbitClass {
    OrbitClass::Leo
}

fn default_ion_base_url() -> String {
    DEFAULT_ION_BASE_URL.to_string()
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_retention_days: default_log_retention_days(),
            ranking_size: default_ranking_size(),
            default_orbit_class: default_orbit_class(),
            initial_search: None,
            source: SourceConfig::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: ExplorerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;
        if config.ranking_size == 0 {
            anyhow::bail!("ranking_size must be at least 1");
        }
        Ok(config)
    }

    /// Fill secrets that are kept out of the config file
    pub fn apply_env(&mut self) {
        if let SourceConfig::Ion { access_token, .. } = &mut self.source {
            if access_token.is_empty() {
                if let Ok(token) = std::env::var(ION_TOKEN_ENV) {
                    *access_token = token;
                }
            }
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub static CONFIG: OnceLock<ExplorerConfig> = OnceLock::new();

/// Load `config.toml` (or `$ORBIT_EXPLORER_CONFIG`) into `CONFIG`
pub fn read_config() -> anyhow::Result<&'static ExplorerConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let mut config = ExplorerConfig::from_file(&path)?;
    config.apply_env();

    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration already loaded"))?;
    CONFIG
        .get()
        .ok_or_else(|| anyhow::anyhow!("Configuration missing after load"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ExplorerConfig::parse("").unwrap();
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.ranking_size, 5);
        assert_eq!(config.default_orbit_class, OrbitClass::Leo);
        assert_eq!(config.initial_search, None);
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = ExplorerConfig::parse(
            r#"
            host = "127.0.0.1"
            port = 3000
            log_level = "debug"
            ranking_size = 3
            default_orbit_class = "GEO"
            initial_search = "25544"

            [source]
            kind = "ion"
            access_token = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.server_address(), "127.0.0.1:3000");
        assert_eq!(config.ranking_size, 3);
        assert_eq!(config.default_orbit_class, OrbitClass::Geo);
        assert_eq!(config.initial_search.as_deref(), Some("25544"));
        assert_eq!(
            config.source,
            SourceConfig::Ion {
                base_url: DEFAULT_ION_BASE_URL.to_string(),
                access_token: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_file_source() {
        let config = ExplorerConfig::parse("[source]\nkind = \"file\"\npath = \"sats.czml\"").unwrap();
        assert_eq!(config.source, SourceConfig::File { path: "sats.czml".to_string() });
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ExplorerConfig::parse("ranking_size = 0").is_err());
        assert!(ExplorerConfig::parse("default_orbit_class = \"leo\"").is_err());
        assert!(ExplorerConfig::parse("[source]\nkind = \"ftp\"").is_err());
    }

    #[test]
    fn test_configured_token_is_kept() {
        let mut config = ExplorerConfig::parse("[source]\nkind = \"ion\"\naccess_token = \"from-file\"").unwrap();
        config.apply_env();
        assert_eq!(
            config.source,
            SourceConfig::Ion {
                base_url: DEFAULT_ION_BASE_URL.to_string(),
                access_token: "from-file".to_string(),
            }
        );
    }
}
