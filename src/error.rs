//! Error types for Officina
//!
//! Centralized error handling using thiserror. The scheduling engine itself never
//! fails; these cover the collaborators around it (editing, import, storage).

use thiserror::Error;

/// All error types that can occur in Officina
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Job id not present in the snapshot
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job id already used in the snapshot
    #[error("Duplicate job: {0}")]
    DuplicateJob(String),

    /// Worker id not present in the addressed pool
    #[error("Worker not found: {0}")]
    WorkerNotFound(String),

    /// Worker id already used in the addressed pool
    #[error("Duplicate worker: {0}")]
    DuplicateWorker(String),

    /// Snapshot failed shape validation
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Period window could not be used
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Date string is not ISO `YYYY-MM-DD`
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Configuration problem
    #[error("Config error: {0}")]
    Config(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Officina operations
pub type Result<T> = std::result::Result<T, PlannerError>;
