use crate::core::worker_pool::{JobOutcome, PoolReport, WorkerPool};
use crate::domain::model::{ProfessionId, Roster};
use crate::utils::console::Console;
use crate::utils::error::{Result, RosterError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Walks every profession on a worker pool, one job per profession.
///
/// Inside a job the characters are visited in order with a fixed pause after
/// each one. Cancelling the token cuts the current pause short and ends the
/// job as [`JobOutcome::Cancelled`].
///
/// Each profession is its own pool job rather than one outer job fanning out;
/// professions still run in parallel and characters stay sequential.
#[derive(Debug, Clone)]
pub struct ParallelRunner {
    workers: usize,
    pause: Duration,
    cancel: CancellationToken,
}

impl ParallelRunner {
    pub fn new(workers: usize, pause: Duration) -> Self {
        Self {
            workers,
            pause,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn run(&self, roster: Arc<Roster>, console: Console) -> Result<PoolReport> {
        let pool = WorkerPool::new(self.workers)?;
        tracing::info!(
            "Dispatching {} professions to {} workers",
            roster.professions().len(),
            pool.size()
        );

        for profession in roster.professions() {
            pool.submit(process_profession(
                roster.clone(),
                profession.id(),
                self.pause,
                self.cancel.clone(),
                console.clone(),
            ))?;
        }

        pool.shutdown().await
    }
}

async fn process_profession(
    roster: Arc<Roster>,
    id: ProfessionId,
    pause: Duration,
    cancel: CancellationToken,
    console: Console,
) -> Result<JobOutcome> {
    let profession = roster
        .profession(id)
        .ok_or_else(|| RosterError::ProcessingError {
            message: format!("unknown profession {}", id),
        })?;

    console.line(format!(
        "Processing Profession: {}, Base Armor: {}",
        profession.name(),
        profession.base_armor()
    ))?;

    for character in profession.characters() {
        console.line(format!(
            "\tProcessing Character: {}, Level: {}",
            character.name(),
            character.level()
        ))?;

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::warn!(
                    "Processing of {} cancelled at character {}",
                    profession.name(),
                    character.name()
                );
                return Ok(JobOutcome::Cancelled);
            }
            _ = tokio::time::sleep(pause) => {}
        }
    }

    Ok(JobOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::sample_roster;
    use crate::utils::console::testing::{capture, lines};

    #[tokio::test(start_paused = true)]
    async fn test_two_workers_finish_in_longest_profession_time() {
        let roster = Arc::new(sample_roster().unwrap());
        let (console, buffer) = capture();
        let runner = ParallelRunner::new(2, DEFAULT_PAUSE);

        let start = tokio::time::Instant::now();
        let report = runner.run(roster, console).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(report.completed, 2);
        // PA has two characters, PB one, and they run side by side.
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));

        let output = lines(&buffer);
        assert_eq!(output.len(), 5);
        assert!(output.contains(&"Processing Profession: PA, Base Armor: 50".to_string()));
        assert!(output.contains(&"\tProcessing Character: B, Level: 15".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_worker_runs_professions_back_to_back() {
        let roster = Arc::new(sample_roster().unwrap());
        let (console, buffer) = capture();

        let start = tokio::time::Instant::now();
        let report = ParallelRunner::new(1, DEFAULT_PAUSE)
            .run(roster, console)
            .await
            .unwrap();

        assert_eq!(report.completed, 2);
        assert!(start.elapsed() >= Duration::from_secs(3));

        // One worker keeps each profession's lines together.
        let output = lines(&buffer);
        assert_eq!(output[0], "Processing Profession: PA, Base Armor: 50");
        assert_eq!(output[1], "\tProcessing Character: A, Level: 10");
        assert_eq!(output[2], "\tProcessing Character: C, Level: 12");
        assert_eq!(output[3], "Processing Profession: PB, Base Armor: 30");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_ends_pauses_early() {
        let roster = Arc::new(sample_roster().unwrap());
        let (console, _buffer) = capture();
        let runner = ParallelRunner::new(2, Duration::from_secs(60));
        let cancel = runner.cancellation_token();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            cancel.cancel();
        });

        let start = tokio::time::Instant::now();
        let report = runner.run(roster, console).await.unwrap();

        assert_eq!(report.cancelled, 2);
        assert_eq!(report.completed, 0);
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_zero_workers_is_config_error() {
        let roster = Arc::new(sample_roster().unwrap());
        let (console, _buffer) = capture();
        let result = ParallelRunner::new(0, DEFAULT_PAUSE).run(roster, console).await;
        assert!(matches!(
            result,
            Err(RosterError::InvalidConfigValueError { .. })
        ));
    }
}
