use chrono::DateTime;
use thiserror::Error;

mod entities;

pub use entities::Record;

/// Bytes that end the leading timestamp token besides the configured delimiter
const TIMESTAMP_TERMINATORS: [u8; 2] = [b' ', b'\t'];

/// Parse error types
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid timestamp '{token}': {source}")]
    InvalidTimestamp {
        token: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses a single log line into a [`Record`].
///
/// The line must start with an RFC3339 timestamp that ends at the first space,
/// tab or `delimiter` byte. That boundary byte is consumed; everything after it
/// is split on `delimiter`. A trailing delimiter does not add an empty field.
pub fn parse_line(delimiter: u8, line: &[u8]) -> Result<Record, ParseError> {
    let boundary = line
        .iter()
        .position(|&b| b == delimiter || TIMESTAMP_TERMINATORS.contains(&b))
        .unwrap_or(line.len());

    let token = String::from_utf8_lossy(&line[..boundary]);
    let timestamp =
        DateTime::parse_from_rfc3339(&token).map_err(|source| ParseError::InvalidTimestamp {
            token: token.to_string(),
            source,
        })?;

    Ok(Record {
        timestamp,
        line: line.to_vec(),
        fields: split_fields(line, boundary + 1, delimiter),
    })
}

/// Splits `line[start..]` on `delimiter` into byte ranges of the original line
fn split_fields(line: &[u8], start: usize, delimiter: u8) -> Vec<std::ops::Range<usize>> {
    let mut fields = Vec::new();
    if start >= line.len() {
        return fields;
    }

    let mut field_start = start;
    for pos in memchr::memchr_iter(delimiter, &line[start..]).map(|offset| start + offset) {
        fields.push(field_start..pos);
        field_start = pos + 1;
    }
    if field_start < line.len() {
        fields.push(field_start..line.len());
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_of(record: &Record) -> Vec<String> {
        record
            .fields()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect()
    }

    #[test]
    fn test_timestamp_ends_at_space() {
        let record = parse_line(b',', b"2017-03-01T16:02:04Z a,b").unwrap();
        assert_eq!(record.formatted_timestamp(), "2017-03-01T16:02:04Z");
        assert_eq!(fields_of(&record), vec!["a", "b"]);
    }

    #[test]
    fn test_timestamp_ends_at_delimiter() {
        let record = parse_line(b',', b"2017-03-01T16:02:04Z,a,b").unwrap();
        assert_eq!(fields_of(&record), vec!["a", "b"]);
    }

    #[test]
    fn test_trailing_delimiter_adds_no_field() {
        let record = parse_line(b',', b"2017-03-01T16:02:04Z a,b,").unwrap();
        assert_eq!(fields_of(&record), vec!["a", "b"]);
    }

    #[test]
    fn test_interior_empty_field_is_kept() {
        let record = parse_line(b',', b"2017-03-01T16:02:04Z a,,b").unwrap();
        assert_eq!(fields_of(&record), vec!["a", "", "b"]);
    }

    #[test]
    fn test_timestamp_only_line_has_no_fields() {
        let record = parse_line(b'\t', b"2017-03-01T16:02:04Z").unwrap();
        assert_eq!(record.field_count(), 0);

        let record = parse_line(b'\t', b"2017-03-01T16:02:04Z\t").unwrap();
        assert_eq!(record.field_count(), 0);
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let err = parse_line(b' ', b"yesterday 1 2").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }
}
