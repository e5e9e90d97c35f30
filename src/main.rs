use clap::Parser;
use prof_roster::core::{ConfigProvider, Pipeline};
use prof_roster::utils::{logger, validation::Validate};
use prof_roster::{CliConfig, LocalStorage, RosterEngine, RosterPipeline, TomlConfig};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting prof-roster");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling workers");
            ctrl_c.cancel();
        }
    });

    match config.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let toml = match TomlConfig::from_file(&path) {
                Ok(toml) => toml,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            };
            let monitor = config.monitor || toml.monitoring_enabled();
            run(toml, monitor, cancel).await
        }
        None => {
            let monitor = config.monitor;
            run(config, monitor, cancel).await
        }
    }
}

async fn run<C>(config: C, monitor: bool, cancel: CancellationToken) -> anyhow::Result<()>
where
    C: ConfigProvider + Validate + 'static,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_dir().to_string());
    let pipeline = RosterPipeline::new(storage, config).with_cancellation(cancel);
    let engine = RosterEngine::new_with_monitoring(pipeline, monitor);

    let summary = engine.run().await?;

    if summary.pool.cancelled > 0 {
        engine
            .pipeline()
            .console()
            .line(format!("Cancelled {} profession jobs", summary.pool.cancelled))?;
    }
    tracing::info!("✅ Roster run completed");
    Ok(())
}
