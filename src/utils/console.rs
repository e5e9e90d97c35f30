use crate::utils::error::{Result, RosterError};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Shared line-oriented output used by the reporter and the worker jobs.
///
/// Each call to [`Console::line`] writes one complete line under the lock, so
/// lines coming from different workers may interleave but are never torn.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<dyn Write + Send>>,
}

impl Console {
    pub fn stdout() -> Self {
        Self::new(Arc::new(Mutex::new(std::io::stdout())))
    }

    pub fn new(sink: Arc<Mutex<dyn Write + Send>>) -> Self {
        Self { sink }
    }

    pub fn line(&self, text: impl AsRef<str>) -> Result<()> {
        let mut out = self.sink.lock().map_err(|_| RosterError::ProcessingError {
            message: "console lock poisoned".to_string(),
        })?;
        writeln!(out, "{}", text.as_ref())?;
        out.flush()?;
        Ok(())
    }

    pub fn blank(&self) -> Result<()> {
        self.line("")
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
