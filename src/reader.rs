//! Pull-based record reader.
//!
//! A [`RecordReader`] wraps one line source and hands out records one at a
//! time, skipping empty lines, lines without a valid leading timestamp and
//! lines outside the configured [`TimeWindow`].

use crate::parser::{Record, parse_line};
use crate::window::TimeWindow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{trace, warn};

/// Path that selects standard input instead of a file
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Counters kept while a source is drained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    pub lines: usize,
    pub empty: usize,
    pub unparseable: usize,
    pub outside_window: usize,
    pub records: usize,
}

impl ReaderStats {
    pub fn skipped(&self) -> usize {
        self.empty + self.unparseable + self.outside_window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    Scanning,
    Exhausted,
}

pub struct RecordReader<R> {
    source: R,
    name: String,
    delimiter: u8,
    window: TimeWindow,
    state: ReaderState,
    buf: Vec<u8>,
    current: Option<Record>,
    stats: ReaderStats,
}

impl RecordReader<Box<dyn BufRead>> {
    /// Open a file, or standard input for `-`
    pub fn open(path: &Path, delimiter: u8, window: TimeWindow) -> Result<Self, ReadError> {
        let name = path.display().to_string();
        let source: Box<dyn BufRead> = if path == Path::new(STDIN_PATH) {
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = File::open(path).map_err(|source| ReadError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(BufReader::new(file))
        };

        Ok(Self::new(source, name, delimiter, window))
    }
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(source: R, name: impl Into<String>, delimiter: u8, window: TimeWindow) -> Self {
        Self {
            source,
            name: name.into(),
            delimiter,
            window,
            state: ReaderState::Scanning,
            buf: Vec::new(),
            current: None,
            stats: ReaderStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &ReaderStats {
        &self.stats
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == ReaderState::Exhausted
    }

    /// Move to the next record inside the window.
    ///
    /// Consumes as many lines as it takes to find one, so a single call is
    /// not O(1). Returns `None` once the source is exhausted, and keeps
    /// returning `None` afterwards.
    pub fn advance(&mut self) -> Option<&Record> {
        self.current = None;

        while self.state == ReaderState::Scanning {
            self.buf.clear();
            match self.source.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.state = ReaderState::Exhausted;
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(input = %self.name, line = self.stats.lines + 1, "read failed, abandoning input: {err}");
                    self.state = ReaderState::Exhausted;
                    break;
                }
            }
            self.stats.lines += 1;

            let line = trim_line_ending(&self.buf);
            if line.is_empty() {
                self.stats.empty += 1;
                continue;
            }

            match parse_line(self.delimiter, line) {
                Ok(record) if self.window.contains(record.timestamp()) => {
                    self.stats.records += 1;
                    self.current = Some(record);
                    break;
                }
                Ok(record) => {
                    trace!(
                        input = %self.name,
                        line = self.stats.lines,
                        timestamp = %record.formatted_timestamp(),
                        "outside time window"
                    );
                    self.stats.outside_window += 1;
                }
                Err(err) => {
                    warn!(
                        input = %self.name,
                        line = self.stats.lines,
                        "could not parse line '{}': {err}",
                        String::from_utf8_lossy(line)
                    );
                    self.stats.unparseable += 1;
                }
            }
        }

        self.current.as_ref()
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
