use crate::config::{validate_settings, DEFAULT_MIN_LEVEL, DEFAULT_OUTPUT_DIR, DEFAULT_PAUSE_MS};
use crate::core::snapshot::DEFAULT_SNAPSHOT_PATH;
use crate::core::worker_pool::DEFAULT_WORKERS;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub directory: String,
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OUTPUT_DIR.to_string(),
            path: DEFAULT_SNAPSHOT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub workers: usize,
    pub pause_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            pause_ms: DEFAULT_PAUSE_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub min_level: i32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_level: DEFAULT_MIN_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROSTER_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }
}

impl ConfigProvider for TomlConfig {
    fn output_dir(&self) -> &str {
        &self.snapshot.directory
    }

    fn snapshot_path(&self) -> &str {
        &self.snapshot.path
    }

    fn worker_count(&self) -> usize {
        self.runner.workers
    }

    fn pause(&self) -> Duration {
        Duration::from_millis(self.runner.pause_ms)
    }

    fn min_level(&self) -> i32 {
        self.report.min_level
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("snapshot.path", &self.snapshot.path)?;
        validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.snapshot_path(), "prof.bin");
        assert_eq!(config.worker_count(), 2);
        assert_eq!(config.pause(), Duration::from_secs(1));
        assert_eq!(config.min_level(), 10);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = TomlConfig::from_toml_str(
            r#"
[runner]
workers = 4

[report]
min_level = 12

[monitoring]
enabled = true
"#,
        )
        .unwrap();

        assert_eq!(config.worker_count(), 4);
        assert_eq!(config.pause(), Duration::from_millis(1000));
        assert_eq!(config.min_level(), 12);
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("PROF_ROSTER_TEST_DIR", "/tmp/roster");
        let config = TomlConfig::from_toml_str(
            r#"
[snapshot]
directory = "${PROF_ROSTER_TEST_DIR}"
path = "${PROF_ROSTER_UNSET_VAR}.bin"
"#,
        )
        .unwrap();

        assert_eq!(config.output_dir(), "/tmp/roster");
        assert_eq!(config.snapshot_path(), "${PROF_ROSTER_UNSET_VAR}.bin");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[runner\nworkers = ");
        assert!(matches!(
            result,
            Err(RosterError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_blank_path() {
        let config = TomlConfig::from_toml_str("[snapshot]\npath = \"  \"").unwrap();
        assert!(config.validate().is_err());
    }
}
