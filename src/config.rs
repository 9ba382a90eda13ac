use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::valuation::ValuationSettings;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub valuation: ValuationSettings,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    #[serde(default)]
    pub summary_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<String>,
    pub summary_url: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/redemption-oracle/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(db_path) = overrides.db_path {
            self.storage.db_path = db_path;
        }
        if let Some(summary_url) = overrides.summary_url {
            self.insights.summary_url = summary_url;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn default_template() -> String {
        let template = r#"[valuation]
sweet_spot_multiplier = 1.2
round_trip_multiplier = 1.05
instant_transfer_multiplier = 1.05
seasonal_factor = 1.2
round_trip_price_factor = 1.8
min_value_cents_per_point = 0.5
max_fee_share_of_retail = 0.5
minimum_fee_per_segment = 25.0
apply_fifth_night_free = false

[storage]
db_path = "~/.local/share/redemption-oracle/wallet.db"

[server]
requests_per_minute = 30
burst_size = 10

[insights]
summary_url = ""
timeout_secs = 10
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
            burst_size: default_burst_size(),
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            summary_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_db_path() -> String {
    "~/.local/share/redemption-oracle/wallet.db".to_string()
}

fn default_requests_per_minute() -> u32 {
    30
}

fn default_burst_size() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, ConfigOverrides};
    use crate::valuation::ValuationSettings;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::default_template()).expect("template parses");
        assert_eq!(parsed.valuation, ValuationSettings::default());
        assert_eq!(parsed.server.requests_per_minute, 30);
        assert_eq!(parsed.server.burst_size, 10);
        assert!(parsed.insights.summary_url.is_empty());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let parsed: Config = toml::from_str("[valuation]\nsweet_spot_multiplier = 1.5\n")
            .expect("partial config parses");
        assert!((parsed.valuation.sweet_spot_multiplier - 1.5).abs() < 1e-9);
        assert!((parsed.valuation.round_trip_multiplier - 1.05).abs() < 1e-9);
        assert_eq!(parsed.insights.timeout_secs, 10);
    }

    #[test]
    fn overrides_replace_storage_and_insights() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            db_path: Some("/tmp/wallet.db".to_string()),
            summary_url: Some("http://localhost:3001/api/get-ai-reasoning".to_string()),
        });
        assert_eq!(config.resolved_db_path().to_string_lossy(), "/tmp/wallet.db");
        assert!(config.insights.summary_url.ends_with("get-ai-reasoning"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = Config::load(Some(std::path::Path::new("/nonexistent/redemption.toml")))
            .expect("defaults");
        assert_eq!(config.storage.db_path, "~/.local/share/redemption-oracle/wallet.db");
    }
}
