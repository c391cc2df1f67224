//! Error types for the blocking pool

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("requested {requested} resources but pool capacity is {capacity}")]
    InvalidRequest { requested: usize, capacity: usize },

    #[error("batch does not belong to this pool or was already released")]
    InvalidRelease,

    #[error("acquisition timed out after {0:?}")]
    AcquireTimeout(std::time::Duration),

    #[error("pool is closed")]
    PoolClosed,
}

pub type PoolResult<T> = Result<T, PoolError>;

/// Failure reported by a [`MetricEmitter`](crate::MetricEmitter)
/// implementation. Carries only a message; the monitor converts any emission
/// failure into a stop signal rather than propagating it.
#[derive(Error, Debug, Clone)]
#[error("metric emission failed: {message}")]
pub struct EmitError {
    pub message: String,
}

impl EmitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
