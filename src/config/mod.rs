pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_range};
use std::time::Duration;

pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_MIN_LEVEL: i32 = 10;
pub const DEFAULT_PAUSE_MS: u64 = 1000;
pub const MAX_WORKERS: usize = 64;
pub const MAX_PAUSE_MS: u64 = 60_000;

#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "prof-roster")]
#[command(about = "Builds the sample profession roster, reports it, snapshots it and walks it on a worker pool")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    #[arg(long, default_value = crate::core::snapshot::DEFAULT_SNAPSHOT_PATH)]
    pub snapshot_path: String,

    #[arg(long, default_value_t = crate::core::worker_pool::DEFAULT_WORKERS)]
    pub workers: usize,

    #[arg(long, default_value_t = DEFAULT_PAUSE_MS)]
    pub pause_ms: u64,

    #[arg(long, default_value_t = DEFAULT_MIN_LEVEL, allow_negative_numbers = true)]
    pub min_level: i32,

    /// TOML file whose values replace the options above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn snapshot_path(&self) -> &str {
        &self.snapshot_path
    }

    fn worker_count(&self) -> usize {
        self.workers
    }

    fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    fn min_level(&self) -> i32 {
        self.min_level
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

/// Checks shared by every [`ConfigProvider`].
pub fn validate_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("output_dir", config.output_dir())?;
    validate_path("snapshot_path", config.snapshot_path())?;
    validate_positive_number("workers", config.worker_count(), 1)?;
    validate_range("workers", config.worker_count(), 1, MAX_WORKERS)?;
    validate_range(
        "pause_ms",
        config.pause().as_millis() as u64,
        0,
        MAX_PAUSE_MS,
    )?;
    Ok(())
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["prof-roster"]);
        assert_eq!(config.snapshot_path(), "prof.bin");
        assert_eq!(config.output_dir(), ".");
        assert_eq!(config.worker_count(), 2);
        assert_eq!(config.pause(), Duration::from_secs(1));
        assert_eq!(config.min_level(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_zero_workers() {
        let config = CliConfig::parse_from(["prof-roster", "--workers", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_rejects_long_pause() {
        let config = CliConfig::parse_from(["prof-roster", "--pause-ms", "120000"]);
        assert!(config.validate().is_err());
    }
}
