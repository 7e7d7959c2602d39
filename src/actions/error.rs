//! Action Dispatch Error Types

use thiserror::Error;

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors raised while handing events to action sinks
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Dispatch queue is full; the event was dropped
    #[error("Action queue is full")]
    QueueFull,

    /// Dispatcher worker is gone
    #[error("Action dispatcher is closed")]
    Closed,

    /// Action command could not be started
    #[error("Failed to spawn action command '{command}': {source}")]
    SpawnFailed {
        /// Program that failed to start
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Action command exited unsuccessfully
    #[error("Action command '{command}' failed ({status}): {stderr}")]
    CommandFailed {
        /// Full command line
        command: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// D-Bus signal emission failed
    #[error("D-Bus error: {0}")]
    Bus(#[from] zbus::Error),
}

impl DispatchError {
    /// Whether the event was lost before reaching any sink
    pub fn is_dropped(&self) -> bool {
        matches!(self, DispatchError::QueueFull | DispatchError::Closed)
    }
}
