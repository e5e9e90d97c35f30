use crate::core::report::ReportSummary;
use crate::core::worker_pool::PoolReport;
use crate::core::Pipeline;
use crate::domain::model::CharacterDto;
use crate::utils::error::Result;
use crate::utils::monitor::{PhaseStats, SystemMonitor};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub report: ReportSummary,
    /// Path of the written snapshot, `None` when saving failed.
    pub snapshot_path: Option<String>,
    /// Filtered characters of the restored copy, `None` when loading failed.
    pub restored_filtered: Option<Vec<CharacterDto>>,
    pub pool: PoolReport,
    /// Per-phase resource usage, empty unless monitoring is enabled.
    pub phases: Vec<PhaseStats>,
}

pub struct RosterEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> RosterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs seed, report, persist, restore, verify and dispatch in that order.
    ///
    /// Snapshot failures are logged and the run carries on without a restored
    /// copy. Any other phase error is returned.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting roster run");

        let roster = self.pipeline.seed().await?;
        tracing::info!(
            "Seeded {} professions, {} characters",
            roster.professions().len(),
            roster.character_count()
        );

        let report = self.pipeline.report(&roster).await?;
        self.monitor.record("Report");

        let snapshot_path = match self.pipeline.persist(&roster).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!(
                    "Saving snapshot failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                self.pipeline.console().line("Error")?;
                None
            }
        };

        let restored_filtered = match &snapshot_path {
            Some(path) => match self.pipeline.restore(path).await {
                Ok(restored) => Some(self.pipeline.verify(&roster, &restored).await?),
                Err(e) => {
                    tracing::error!(
                        "Loading snapshot failed: {} (Category: {:?}, Severity: {:?})",
                        e,
                        e.category(),
                        e.severity()
                    );
                    self.pipeline.console().line("Error")?;
                    None
                }
            },
            None => None,
        };
        self.monitor.record("Persistence");

        let pool = self.pipeline.dispatch(Arc::new(roster)).await?;
        tracing::info!(
            "Workers finished: {} completed, {} cancelled, {} failed",
            pool.completed,
            pool.cancelled,
            pool.failed
        );
        self.monitor.record("Dispatch");

        Ok(RunSummary {
            report,
            snapshot_path,
            restored_filtered,
            pool,
            phases: self.monitor.finish(),
        })
    }
}
