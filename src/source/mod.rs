//! Contact Sources
//!
//! A contact source is the port through which decoded touch contacts and
//! natively recognized gestures enter the daemon. Each source runs in its own
//! task and forwards records into a single bounded channel; the daemon owns
//! the only receiver, so the tracker sees one serialized stream no matter how
//! many producers exist.
//!
//! # Record Format
//!
//! The bundled [`JsonLinesSource`] reads one JSON object per line:
//!
//! ```text
//! {"kind":"touch","device_id":"dev0","phase":"down","timestamp":0,"x":100.0,"y":100.0}
//! {"kind":"gesture","name":"swipe","direction":"left","fingers":3}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. A malformed line
//! (bad JSON, invalid UTF-8, longer than the record limit) is logged and
//! skipped; an I/O error ends the source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::input::error::{recovery_action, InputError, RecoveryAction, Result};
use crate::input::{NativeGesture, TouchContact};

/// One record delivered by a contact source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceEvent {
    /// Touch contact for the session tracker
    Touch(TouchContact),
    /// Pre-classified native gesture for the relay
    Gesture(NativeGesture),
}

/// Producer of source events
#[async_trait]
pub trait ContactSource: Send {
    /// Human-readable source name for logs
    fn name(&self) -> &str;

    /// Next record, or `None` at end of stream
    async fn next_event(&mut self) -> Result<Option<SourceEvent>>;
}

/// Default per-record length limit in bytes
pub const DEFAULT_MAX_RECORD_LEN: usize = 64 * 1024;

enum RawLine {
    Complete,
    TooLong,
    Eof,
}

/// JSON-lines contact source over any buffered async reader
pub struct JsonLinesSource<R> {
    name: String,
    reader: R,
    buf: Vec<u8>,
    max_record_len: usize,
    line_no: u64,
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesSource<R> {
    /// Wrap a buffered reader
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            buf: Vec::new(),
            max_record_len: DEFAULT_MAX_RECORD_LEN,
            line_no: 0,
        }
    }

    /// Set the per-record length limit (newline excluded)
    pub fn with_max_record_len(mut self, limit: usize) -> Self {
        self.max_record_len = limit;
        self
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> u64 {
        self.line_no
    }

    /// Read one raw line into `buf`
    ///
    /// An overlong line is consumed up to its newline but never buffered.
    async fn read_raw_line(&mut self) -> Result<RawLine> {
        self.buf.clear();
        let mut too_long = false;
        let mut read_any = false;

        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                break;
            }
            read_any = true;

            let (used, done) = match available.iter().position(|b| *b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            };
            let content = if done { used - 1 } else { used };

            if !too_long {
                if self.buf.len() + content > self.max_record_len {
                    too_long = true;
                    self.buf.clear();
                } else {
                    self.buf.extend_from_slice(&available[..content]);
                }
            }
            self.reader.consume(used);

            if done {
                break;
            }
        }

        Ok(match (read_any, too_long) {
            (false, _) => RawLine::Eof,
            (true, true) => RawLine::TooLong,
            (true, false) => RawLine::Complete,
        })
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a JSON-lines file
    pub async fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .await
            .map_err(|source| InputError::OpenFailed {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(path.display().to_string(), BufReader::new(file)))
    }
}

impl JsonLinesSource<BufReader<Stdin>> {
    /// Read records from standard input
    pub fn stdin() -> Self {
        Self::new("stdin", BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> ContactSource for JsonLinesSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_event(&mut self) -> Result<Option<SourceEvent>> {
        loop {
            match self.read_raw_line().await? {
                RawLine::Eof => return Ok(None),
                RawLine::TooLong => {
                    self.line_no += 1;
                    return Err(InputError::RecordTooLong {
                        line: self.line_no,
                        limit: self.max_record_len,
                    });
                }
                RawLine::Complete => self.line_no += 1,
            }

            let line = self.line_no;
            let text = std::str::from_utf8(&self.buf)
                .map_err(|source| InputError::InvalidUtf8 { line, source })?;

            let record = text.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }

            return serde_json::from_str(record)
                .map(Some)
                .map_err(|source| InputError::Decode { line, source });
        }
    }
}

/// Open a source by path, where `-` means standard input
pub async fn open_source(path: &str) -> Result<Box<dyn ContactSource>> {
    if path == "-" {
        return Ok(Box::new(JsonLinesSource::stdin()));
    }
    Ok(Box::new(JsonLinesSource::open(Path::new(path)).await?))
}

/// Drain a source into the event channel
///
/// Returns the number of records forwarded. Malformed records are skipped;
/// I/O errors and a closed channel end the source.
pub async fn pump(mut source: Box<dyn ContactSource>, tx: mpsc::Sender<SourceEvent>) -> u64 {
    let mut forwarded = 0u64;

    loop {
        match source.next_event().await {
            Ok(Some(event)) => {
                if tx.send(event).await.is_err() {
                    debug!("{}: {}", source.name(), InputError::ChannelClosed);
                    break;
                }
                forwarded += 1;
            }
            Ok(None) => {
                info!("{}: end of input ({} records)", source.name(), forwarded);
                break;
            }
            Err(e) => match recovery_action(&e) {
                RecoveryAction::Skip => warn!("{}: {}", source.name(), e),
                RecoveryAction::Stop => {
                    warn!("{}: stopping source: {}", source.name(), e);
                    break;
                }
            },
        }
    }

    forwarded
}

/// Run a source on its own task
pub fn spawn_source(
    source: Box<dyn ContactSource>,
    tx: mpsc::Sender<SourceEvent>,
) -> JoinHandle<u64> {
    tokio::spawn(pump(source, tx))
}
