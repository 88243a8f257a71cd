use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::warn;

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// nvme-cli binary name or path
    pub nvme_bin: String,

    /// Flag appended to request JSON output
    pub json_flag: String,

    /// Per-invocation deadline in seconds, 0 disables it
    pub timeout_secs: u64,

    /// Temperature warning used when the controller reports none
    pub warning_celsius: i64,

    /// Temperature critical used when the controller reports none
    pub critical_celsius: i64,

    /// Wear-out critical threshold in percent
    pub wearout_critical: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nvme_bin: "nvme".to_string(),
            json_flag: "--output-format=json".to_string(),
            timeout_secs: 0,
            warning_celsius: 70,
            critical_celsius: 85,
            wearout_critical: 95,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in order of preference:
    /// 1. CLI arguments (and their environment fallbacks) override everything
    /// 2. JSON config file if specified
    /// 3. Default config file locations
    /// 4. Built-in defaults
    pub fn load(cli_config: Option<&CliConfig>, json_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_default_config()?.unwrap_or_default();

        if let Some(path) = json_path {
            config = Self::load_from_file(path)?;
        }

        if let Some(cli) = cli_config {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific JSON file.
    ///
    /// Missing keys keep their defaults.
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CoreError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            CoreError::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        Ok(config)
    }

    fn load_default_config() -> Result<Option<Self>> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(Some(config)),
                    Err(e) => {
                        warn!("Failed to load config from {}: {}", path.display(), e);
                        continue;
                    }
                }
            }
        }

        Ok(None)
    }

    /// Default configuration file search paths
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("munin-nvme").join("config.json"));
        }

        paths.push(PathBuf::from("/etc/munin/munin-nvme.json"));

        paths
    }

    fn apply_cli_overrides(&mut self, cli: &CliConfig) {
        if let Some(bin) = &cli.nvme_bin {
            self.nvme_bin = bin.clone();
        }
        if let Some(timeout) = cli.timeout_secs {
            self.timeout_secs = timeout;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.nvme_bin.trim().is_empty() {
            return Err(CoreError::config("nvme_bin must not be empty"));
        }

        if self.json_flag.trim().is_empty() {
            return Err(CoreError::config("json_flag must not be empty"));
        }

        if self.timeout_secs > 300 {
            return Err(CoreError::config("Timeout must be at most 300 seconds"));
        }

        if self.warning_celsius >= self.critical_celsius {
            return Err(CoreError::config(format!(
                "warning_celsius ({}) must be below critical_celsius ({})",
                self.warning_celsius, self.critical_celsius
            )));
        }

        Ok(())
    }

    /// Invocation deadline, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// CLI configuration (temporary struct for CLI parsing)
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub nvme_bin: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "munin-nvme-{}-{}.json",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_timeout_disabled() {
        let config = Config::default();
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_config("partial", r#"{"timeout_secs": 15}"#);
        let config = Config::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.nvme_bin, "nvme");
        assert_eq!(config.json_flag, "--output-format=json");
    }

    #[test]
    fn test_cli_overrides_file() {
        let path = temp_config("override", r#"{"nvme_bin": "/usr/sbin/nvme"}"#);
        let cli = CliConfig {
            nvme_bin: Some("/opt/nvme".to_string()),
            timeout_secs: Some(5),
        };
        let config = Config::load(Some(&cli), Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.nvme_bin, "/opt/nvme");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_unparsable_file_is_config_error() {
        let path = temp_config("broken", "{not json");
        let err = Config::load_from_file(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let config = Config {
            warning_celsius: 90,
            critical_celsius: 80,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_long_timeout() {
        let config = Config {
            timeout_secs: 3600,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
