use parsel::config::Config;
use parsel::filter::{compile_filters, parse_filter};
use parsel::parser::{Record, parse_line};
use parsel::projector::{FieldSelection, format_record, write_field_index};
use parsel::reader::RecordReader;
use parsel::window::TimeWindow;
use parsel::{Predicate, process_input};

fn record(line: &str) -> Record {
    parse_line(b' ', line.as_bytes()).expect("valid test line")
}

fn project(line: &str, fields: &str) -> String {
    let selection: FieldSelection = fields.parse().expect("valid fields");
    String::from_utf8(format_record(&record(line), b' ', &selection)).expect("utf8 output")
}

#[test]
fn test_filter_result_index() {
    let line = "2006-01-02T15:04:05Z 1 2 3 4 5";
    assert!(parse_filter("5:5").unwrap().matches(&record(line)));
    assert_eq!(project(line, "5").trim(), "5");
}

#[test]
fn test_all_fields_start_with_timestamp() {
    assert_eq!(
        project("2017-03-01T16:02:04Z a b", ""),
        "2017-03-01T16:02:04Z a b\n"
    );
}

#[test]
fn test_all_fields_output_has_one_segment_per_field() {
    for line in [
        "2017-03-01T16:02:04Z a",
        "2017-03-01T16:02:04Z a b c d",
        "2017-03-01T16:02:04Z a  b",
    ] {
        let rec = record(line);
        let out = project(line, "");
        let segments = out.trim_end_matches('\n').split(' ').count();
        assert_eq!(segments, rec.field_count() + 1, "line '{line}'");
    }
}

#[test]
fn test_last_field() {
    assert_eq!(project("2017-03-01T16:02:04Z 0 1", "-1"), "1\n");
}

#[test]
fn test_timestamp_field() {
    assert_eq!(
        project("2017-03-01T16:02:04Z a b", "2,0"),
        "b 2017-03-01T16:02:04Z\n"
    );
}

#[test]
fn test_out_of_range_fields_are_omitted() {
    assert_eq!(project("2017-03-01T16:02:04Z a b", "1,7,2"), "a b\n");
    assert_eq!(project("2017-03-01T16:02:04Z a b", "-5,2"), "b\n");
    assert_eq!(project("2017-03-01T16:02:04Z a b", "9"), "\n");
}

#[test]
fn test_field_range() {
    assert_eq!(project("2017-03-01T16:02:04Z a b c d", "2-3"), "b c\n");
}

#[test]
fn test_field_index_listing_all_fields() {
    let mut out = Vec::new();
    write_field_index(
        &mut out,
        &record("2017-03-01T16:02:04Z a b"),
        &FieldSelection::all(),
        false,
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "  0\t2017-03-01T16:02:04Z\n  1\ta\n  2\tb\n\n"
    );
}

#[test]
fn test_field_index_listing_marks_missing_fields() {
    let mut out = Vec::new();
    let selection: FieldSelection = "0,-1,3".parse().unwrap();
    write_field_index(
        &mut out,
        &record("2017-03-01T16:02:04Z a b"),
        &selection,
        false,
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "  0\t2017-03-01T16:02:04Z\n -1\tb\n  3\tOut of range\n\n"
    );
}

fn run(input: &str, predicate: &Predicate, config: &Config) -> (String, usize) {
    let mut reader = RecordReader::new(input.as_bytes(), "test", config.delimiter, config.window);
    let mut out = Vec::new();
    let summary = process_input(&mut reader, predicate, config, false, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary.matched)
}

#[test]
fn test_process_input_filters_and_projects() {
    let config = Config {
        delimiter: b' ',
        fields: "-1".parse().unwrap(),
        ..Config::default()
    };
    let predicate = compile_filters(["-1:>0"]).unwrap();
    let input = "2017-03-01T16:02:04Z 0 1\n2017-03-01T16:02:05Z 1 0\n2017-03-01T16:02:06Z 5\n";

    let (out, matched) = run(input, &predicate, &config);
    assert_eq!(out, "1\n5\n");
    assert_eq!(matched, 2);
}

#[test]
fn test_process_input_preview_caps_rows() {
    let config = Config {
        delimiter: b' ',
        preview_rows: Some(2),
        window: TimeWindow::unbounded(),
        ..Config::default()
    };
    let input: String = (0..5)
        .map(|i| format!("2017-03-01T16:02:0{i}Z row{i}\n"))
        .collect();

    let (out, matched) = run(&input, &Predicate::always(), &config);
    assert_eq!(
        out,
        concat!(
            "  0\t2017-03-01T16:02:00Z\n",
            "  1\trow0\n",
            "\n",
            "2017-03-01T16:02:00Z row0\n",
            "2017-03-01T16:02:01Z row1\n",
        )
    );
    assert_eq!(matched, 2);
}
