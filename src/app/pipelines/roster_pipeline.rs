use crate::core::report::{filter_and_sort, to_dto, unique_characters, write_listing, write_report, ReportSummary};
use crate::core::runner::ParallelRunner;
use crate::core::seed::sample_roster;
use crate::core::snapshot::SnapshotStore;
use crate::core::worker_pool::PoolReport;
use crate::core::{CharacterDto, ConfigProvider, Pipeline, Roster, Storage};
use crate::utils::console::Console;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) snapshots: SnapshotStore<S>,
    pub(crate) config: C,
    pub(crate) console: Console,
    pub(crate) cancel: CancellationToken,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            snapshots: SnapshotStore::new(storage),
            config,
            console: Console::stdout(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    fn console(&self) -> &Console {
        &self.console
    }

    async fn seed(&self) -> Result<Roster> {
        sample_roster()
    }

    async fn report(&self, roster: &Roster) -> Result<ReportSummary> {
        write_report(&self.console, roster, self.config.min_level())
    }

    async fn persist(&self, roster: &Roster) -> Result<String> {
        let path = self.config.snapshot_path();
        self.snapshots.save(roster, path).await?;
        self.console.blank()?;
        self.console.line(format!("Serialized to {}", path))?;
        Ok(path.to_string())
    }

    async fn restore(&self, path: &str) -> Result<Roster> {
        let roster = self.snapshots.load(path).await?;
        self.console.line(format!("Deserialized from {}", path))?;
        Ok(roster)
    }

    async fn verify(&self, original: &Roster, restored: &Roster) -> Result<Vec<CharacterDto>> {
        write_listing(&self.console, restored)?;

        if restored.matches(original) {
            tracing::info!("✅ Restored roster matches the original");
        } else {
            tracing::warn!("Restored roster differs from the original");
        }

        let unique = unique_characters(restored);
        Ok(filter_and_sort(&unique, self.config.min_level())
            .into_iter()
            .map(|c| to_dto(restored, c))
            .collect())
    }

    async fn dispatch(&self, roster: Arc<Roster>) -> Result<PoolReport> {
        self.console.blank()?;
        self.console.line("Threads:")?;

        ParallelRunner::new(self.config.worker_count(), self.config.pause())
            .with_cancellation(self.cancel.clone())
            .run(roster, self.console.clone())
            .await
    }
}
