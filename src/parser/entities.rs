use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::ops::Range;

/// One parsed log line: the leading timestamp plus the delimiter-separated
/// fields that follow it.
#[derive(Debug, Clone)]
pub struct Record {
    /// Timestamp of the line, keeping the offset it was written with
    pub(crate) timestamp: DateTime<FixedOffset>,
    /// The original line without its terminator
    pub(crate) line: Vec<u8>,
    /// Byte ranges into `line`, one per field after the timestamp
    pub(crate) fields: Vec<Range<usize>>,
}

impl Record {
    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.timestamp
    }

    /// Timestamp rendered back to RFC3339 (`Z` for UTC, fraction only when present)
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// The whole raw line, timestamp included
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field by 0-based position
    pub fn field(&self, index: usize) -> Option<&[u8]> {
        self.fields
            .get(index)
            .map(|range| &self.line[range.clone()])
    }

    pub fn fields(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.fields.iter().map(|range| &self.line[range.clone()])
    }

    /// Resolve a user-facing field number against this record.
    ///
    /// `N >= 1` is the Nth field, a negative number counts from the end
    /// (`-1` is the last field). `0` names the timestamp, which is not a
    /// byte field, so it resolves to `None` here just like an index that
    /// falls outside the fields of this particular line.
    pub fn field_by_number(&self, number: i64) -> Option<&[u8]> {
        let position = if number > 0 {
            usize::try_from(number - 1).ok()?
        } else if number < 0 {
            let from_end = usize::try_from(number.unsigned_abs()).ok()?;
            self.fields.len().checked_sub(from_end)?
        } else {
            return None;
        };
        self.field(position)
    }
}
