//! Input Error Types
//!
//! Errors raised while reading and decoding contact sources. The tracker
//! itself never fails: malformed sequences are discarded in place.

use thiserror::Error;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input module error types
#[derive(Error, Debug)]
pub enum InputError {
    /// Source could not be opened
    #[error("Failed to open input source '{path}': {source}")]
    OpenFailed {
        /// Path of the source
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Record could not be decoded
    #[error("Malformed input record at line {line}: {source}")]
    Decode {
        /// 1-based line number
        line: u64,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Record is not valid UTF-8
    #[error("Input record at line {line} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        /// 1-based line number
        line: u64,
        /// Underlying decode error
        #[source]
        source: std::str::Utf8Error,
    },

    /// Record exceeds the per-record length limit
    #[error("Input record at line {line} exceeds {limit} bytes")]
    RecordTooLong {
        /// 1-based line number
        line: u64,
        /// Limit in bytes
        limit: usize,
    },

    /// Event channel to the tracker is closed
    #[error("Input event channel closed")]
    ChannelClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error classification for recovery strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Single record is unusable
    Record,
    /// The source itself is unusable
    Source,
    /// The consumer went away
    Channel,
}

/// Classify error for recovery strategy selection
pub fn classify_error(error: &InputError) -> ErrorType {
    match error {
        InputError::Decode { .. }
        | InputError::InvalidUtf8 { .. }
        | InputError::RecordTooLong { .. } => ErrorType::Record,
        InputError::OpenFailed { .. } | InputError::Io(_) => ErrorType::Source,
        InputError::ChannelClosed => ErrorType::Channel,
    }
}

/// Recovery action to take after error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Skip the record and keep reading
    Skip,
    /// Stop this source
    Stop,
}

/// Determine recovery action for error
pub fn recovery_action(error: &InputError) -> RecoveryAction {
    match classify_error(error) {
        ErrorType::Record => RecoveryAction::Skip,
        ErrorType::Source | ErrorType::Channel => RecoveryAction::Stop,
    }
}
