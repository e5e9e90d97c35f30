use crate::core::report::ReportSummary;
use crate::core::worker_pool::PoolReport;
use crate::domain::model::{CharacterDto, Roster};
use crate::utils::console::Console;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_dir(&self) -> &str;
    fn snapshot_path(&self) -> &str;
    fn worker_count(&self) -> usize;
    fn pause(&self) -> Duration;
    fn min_level(&self) -> i32;
}

/// The phases the engine drives, in order.
#[async_trait]
pub trait Pipeline: Send + Sync {
    fn console(&self) -> &Console;
    async fn seed(&self) -> Result<Roster>;
    async fn report(&self, roster: &Roster) -> Result<ReportSummary>;
    /// Writes the snapshot and returns the path it was written to.
    async fn persist(&self, roster: &Roster) -> Result<String>;
    async fn restore(&self, path: &str) -> Result<Roster>;
    /// Prints the restored copy and returns its filtered, sorted characters.
    async fn verify(&self, original: &Roster, restored: &Roster) -> Result<Vec<CharacterDto>>;
    async fn dispatch(&self, roster: Arc<Roster>) -> Result<PoolReport>;
}
