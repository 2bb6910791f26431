//! Field selection and output formatting

use crate::filter::CompileError;
use crate::parser::Record;
use colored::Colorize;
use std::io::{self, Write};
use std::str::FromStr;

/// Ordered list of user-facing field numbers to print.
///
/// Empty means every field, timestamp first. `0` is the timestamp, `N` the
/// Nth field and negative numbers count from the end of each record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection(Vec<i64>);

impl FieldSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn numbers(&self) -> &[i64] {
        &self.0
    }
}

impl FromStr for FieldSelection {
    type Err = CompileError;

    /// Parse `0,2,-1` style lists; `a-b` expands to every field from a to b
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::all());
        }

        let mut numbers = Vec::new();
        for part in s.split(',').map(str::trim) {
            if let Ok(number) = part.parse::<i64>() {
                numbers.push(number);
                continue;
            }

            let (start, end) = part
                .get(1..)
                .and_then(|tail| tail.find('-'))
                .map(|dash| (&part[..=dash], &part[dash + 2..]))
                .ok_or_else(|| CompileError::InvalidFieldNumber(part.to_string()))?;
            let range_error = || CompileError::InvalidFieldRange(part.to_string());
            let start: u16 = start.parse().map_err(|_| range_error())?;
            let end: u16 = end.parse().map_err(|_| range_error())?;
            if start > end {
                return Err(range_error());
            }
            numbers.extend((start..=end).map(i64::from));
        }

        Ok(Self(numbers))
    }
}

/// Write one record as a delimited, newline-terminated line.
///
/// Requested fields that do not exist on this record are left out entirely;
/// no placeholder and no extra delimiter is written for them.
pub fn write_record<W: Write>(
    out: &mut W,
    record: &Record,
    delimiter: u8,
    selection: &FieldSelection,
) -> io::Result<()> {
    if selection.is_all() {
        out.write_all(record.formatted_timestamp().as_bytes())?;
        for field in record.fields() {
            out.write_all(&[delimiter])?;
            out.write_all(field)?;
        }
    } else {
        let mut first = true;
        for &number in selection.numbers() {
            let timestamp;
            let value = if number == 0 {
                timestamp = record.formatted_timestamp();
                timestamp.as_bytes()
            } else {
                match record.field_by_number(number) {
                    Some(value) => value,
                    None => continue,
                }
            };

            if !first {
                out.write_all(&[delimiter])?;
            }
            first = false;
            out.write_all(value)?;
        }
    }
    out.write_all(b"\n")
}

/// Render a record to a byte line, see [`write_record`]
pub fn format_record(record: &Record, delimiter: u8, selection: &FieldSelection) -> Vec<u8> {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_record(&mut out, record, delimiter, selection);
    out
}

/// Write every candidate field next to its user-facing number, followed by
/// a blank line. Used by preview mode to show which number picks which value.
pub fn write_field_index<W: Write>(
    out: &mut W,
    record: &Record,
    selection: &FieldSelection,
    colorize: bool,
) -> io::Result<()> {
    let label = |number: i64| {
        let text = format!("{number:>3}");
        if colorize {
            text.cyan().bold().to_string()
        } else {
            text
        }
    };

    if selection.is_all() {
        writeln!(out, "{}\t{}", label(0), record.formatted_timestamp())?;
        for (i, field) in record.fields().enumerate() {
            write!(out, "{}\t", label(i as i64 + 1))?;
            out.write_all(field)?;
            out.write_all(b"\n")?;
        }
    } else {
        for &number in selection.numbers() {
            write!(out, "{}\t", label(number))?;
            if number == 0 {
                out.write_all(record.formatted_timestamp().as_bytes())?;
            } else {
                match record.field_by_number(number) {
                    Some(field) => out.write_all(field)?,
                    None if colorize => write!(out, "{}", "Out of range".dimmed())?,
                    None => out.write_all(b"Out of range")?,
                }
            }
            out.write_all(b"\n")?;
        }
    }
    out.write_all(b"\n")
}
