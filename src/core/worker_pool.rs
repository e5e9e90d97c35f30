use crate::utils::error::{Result, RosterError};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

pub const DEFAULT_WORKERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub completed: usize,
    pub cancelled: usize,
    pub failed: usize,
}

impl PoolReport {
    fn merge(&mut self, other: PoolReport) {
        self.completed += other.completed;
        self.cancelled += other.cancelled;
        self.failed += other.failed;
    }

    pub fn total(&self) -> usize {
        self.completed + self.cancelled + self.failed
    }
}

type Job = Pin<Box<dyn Future<Output = Result<JobOutcome>> + Send + 'static>>;

/// Fixed number of tokio tasks pulling jobs from one shared queue.
pub struct WorkerPool {
    sender: mpsc::UnboundedSender<Job>,
    workers: Vec<JoinHandle<PoolReport>>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(RosterError::InvalidConfigValueError {
                field: "workers".to_string(),
                value: size.to_string(),
                reason: "Worker pool needs at least one worker".to_string(),
            });
        }

        let (sender, receiver) = mpsc::unbounded_channel::<Job>();
        let queue = Arc::new(Mutex::new(receiver));
        let workers = (0..size)
            .map(|worker_id| tokio::spawn(worker_loop(worker_id, queue.clone())))
            .collect();

        tracing::debug!("Worker pool started with {} workers", size);
        Ok(Self { sender, workers })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn submit<F>(&self, job: F) -> Result<()>
    where
        F: Future<Output = Result<JobOutcome>> + Send + 'static,
    {
        self.sender
            .send(Box::pin(job))
            .map_err(|_| RosterError::ProcessingError {
                message: "worker pool queue is closed".to_string(),
            })
    }

    /// Closes the queue and waits until every worker has drained it.
    ///
    /// A worker that panicked is reported as `WorkerError`, but only after
    /// all the other workers have finished their jobs.
    pub async fn shutdown(self) -> Result<PoolReport> {
        drop(self.sender);

        let mut report = PoolReport::default();
        let mut first_panic = None;
        for worker in self.workers {
            match worker.await {
                Ok(worker_report) => report.merge(worker_report),
                Err(e) => {
                    tracing::error!("Worker task aborted: {}", e);
                    first_panic.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_panic {
            return Err(e.into());
        }

        tracing::debug!(
            "Worker pool drained: {} completed, {} cancelled, {} failed",
            report.completed,
            report.cancelled,
            report.failed
        );
        Ok(report)
    }
}

async fn worker_loop(worker_id: usize, queue: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>) -> PoolReport {
    let mut report = PoolReport::default();
    loop {
        // Lock only while waiting for the next job so other workers can run theirs.
        let job = {
            let mut receiver = queue.lock().await;
            receiver.recv().await
        };
        let Some(job) = job else {
            break;
        };

        match job.await {
            Ok(JobOutcome::Completed) => report.completed += 1,
            Ok(JobOutcome::Cancelled) => report.cancelled += 1,
            Err(e) => {
                tracing::warn!("Worker {} job failed: {}", worker_id, e);
                report.failed += 1;
            }
        }
    }
    tracing::debug!("Worker {} stopped", worker_id);
    report
}
