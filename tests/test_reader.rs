use chrono::{DateTime, FixedOffset};
use parsel::reader::{ReadError, RecordReader};
use parsel::window::TimeWindow;
use std::fs;
use std::io::BufRead;
use tempfile::tempdir;

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid RFC3339 timestamp")
}

fn read_all<R: BufRead>(reader: &mut RecordReader<R>) -> String {
    let mut dates = Vec::new();
    while let Some(record) = reader.advance() {
        dates.push(record.formatted_timestamp());
    }
    dates.join(", ")
}

fn reader(input: &str, window: TimeWindow) -> RecordReader<&[u8]> {
    RecordReader::new(input.as_bytes(), "test", b',', window)
}

#[test]
fn test_read_range() {
    let input = "2017-02-13T08:00:00Z\n2017-02-13T09:00:00Z\n2017-02-13T10:00:00Z";
    let window = TimeWindow::new(
        Some(ts("2017-02-13T09:00:00Z")),
        Some(ts("2017-02-13T10:00:00Z")),
    );

    assert_eq!(read_all(&mut reader(input, window)), "2017-02-13T09:00:00Z");
}

#[test]
fn test_read_range_infinite_beginning() {
    let window = TimeWindow::new(None, Some(ts("2017-02-13T10:00:00Z")));
    assert_eq!(
        read_all(&mut reader("2017-02-13T09:00:00Z", window)),
        "2017-02-13T09:00:00Z"
    );
}

#[test]
fn test_read_range_infinite_ending() {
    let window = TimeWindow::new(Some(ts("2017-02-13T09:00:00Z")), None);
    assert_eq!(
        read_all(&mut reader("2017-02-13T09:00:00Z", window)),
        "2017-02-13T09:00:00Z"
    );
}

#[test]
fn test_skipped_lines_do_not_stop_the_scan() {
    let input = concat!(
        "2017-02-13T08:00:00Z,early\n",
        "garbage\n",
        "\n",
        "2017-02-13T09:15:00Z,kept\n",
        "2017-02-13T11:00:00Z,late\n",
        "2017-02-13T09:45:00Z,kept\n",
    );
    let window = TimeWindow::new(
        Some(ts("2017-02-13T09:00:00Z")),
        Some(ts("2017-02-13T10:00:00Z")),
    );
    let mut r = reader(input, window);

    assert_eq!(
        read_all(&mut r),
        "2017-02-13T09:15:00Z, 2017-02-13T09:45:00Z"
    );

    let stats = r.stats();
    assert_eq!(stats.lines, 6);
    assert_eq!(stats.records, 2);
    assert_eq!(stats.outside_window, 2);
    assert_eq!(stats.unparseable, 1);
    assert_eq!(stats.empty, 1);
    assert_eq!(stats.skipped(), 4);
}

#[test]
fn test_fields_reflect_only_the_current_line() {
    let input = "2017-02-13T09:00:00Z,a,b,c\n2017-02-13T09:00:01Z,d\n";
    let mut r = reader(input, TimeWindow::unbounded());

    assert_eq!(r.advance().map(|rec| rec.field_count()), Some(3));
    let second = r.advance().expect("second record");
    assert_eq!(second.field_count(), 1);
    assert_eq!(second.field_by_number(-1), Some(&b"d"[..]));
}

#[test]
fn test_open_reads_a_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("app.log");
    fs::write(&path, "2017-02-13T09:00:00Z\tx\n2017-02-13T09:00:01Z\ty\n").expect("write log");

    let mut r = RecordReader::open(&path, b'\t', TimeWindow::unbounded()).expect("open log");
    assert_eq!(r.name(), path.display().to_string());
    assert_eq!(
        read_all(&mut r),
        "2017-02-13T09:00:00Z, 2017-02-13T09:00:01Z"
    );
    assert!(r.is_exhausted());
}

#[test]
fn test_open_missing_file_reports_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("missing.log");

    let err = match RecordReader::open(&path, b'\t', TimeWindow::unbounded()) {
        Err(err) => err,
        Ok(_) => panic!("missing file should not open"),
    };
    assert!(matches!(err, ReadError::Open { .. }));
    assert!(err.to_string().contains("missing.log"));
}
