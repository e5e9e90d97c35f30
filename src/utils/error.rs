use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Worker task failed: {0}")]
    WorkerError(#[from] tokio::task::JoinError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Snapshot error: {message}")]
    SnapshotError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Persistence,
    Configuration,
    Processing,
    Concurrency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RosterError::IoError(_) => ErrorCategory::Io,
            RosterError::SerializationError(_) | RosterError::SnapshotError { .. } => {
                ErrorCategory::Persistence
            }
            RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RosterError::ProcessingError { .. } => ErrorCategory::Processing,
            RosterError::WorkerError(_) => ErrorCategory::Concurrency,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RosterError::SerializationError(_) | RosterError::SnapshotError { .. } => {
                ErrorSeverity::Low
            }
            RosterError::IoError(_) => ErrorSeverity::Medium,
            RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. }
            | RosterError::ProcessingError { .. } => ErrorSeverity::High,
            RosterError::WorkerError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Persistence => {
                "Delete the snapshot file and run again to write a fresh one"
            }
            ErrorCategory::Configuration => "Fix the reported option or config file entry",
            ErrorCategory::Processing => "Check that characters are attached to a known profession",
            ErrorCategory::Concurrency => "Run again; use --verbose to see worker logs",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::IoError(e) => format!("File access failed: {}", e),
            RosterError::SerializationError(_) | RosterError::SnapshotError { .. } => {
                format!("Snapshot could not be read or written ({})", self)
            }
            RosterError::ConfigValidationError { field, message } => {
                format!("Invalid configuration for {}: {}", field, message)
            }
            RosterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
