use crate::reader::ReaderStats;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

/// What happened to one input during a run
#[derive(Debug, Clone, Default)]
pub struct FileSummary {
    pub name: String,
    pub stats: ReaderStats,
    /// Records that passed the filters
    pub matched: usize,
    pub first: Option<DateTime<FixedOffset>>,
    pub last: Option<DateTime<FixedOffset>>,
}

impl FileSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Account for one matching record
    pub fn record_match(&mut self, timestamp: DateTime<FixedOffset>) {
        self.matched += 1;
        self.first.get_or_insert(timestamp);
        self.last = Some(timestamp);
    }
}

fn format_time(ts: Option<DateTime<FixedOffset>>) -> String {
    ts.map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_else(|| "-".to_string())
}

/// Render per-input counters as a table
pub fn format_summary_table(summaries: &[FileSummary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "File",
            "Lines",
            "In window",
            "Matched",
            "Unparseable",
            "Outside window",
            "First match",
            "Last match",
        ]);

    for summary in summaries {
        let stats = &summary.stats;
        table.add_row(vec![
            Cell::new(&summary.name),
            Cell::new(stats.lines).set_alignment(CellAlignment::Right),
            Cell::new(stats.records).set_alignment(CellAlignment::Right),
            Cell::new(summary.matched).set_alignment(CellAlignment::Right),
            Cell::new(stats.unparseable).set_alignment(CellAlignment::Right),
            Cell::new(stats.outside_window).set_alignment(CellAlignment::Right),
            Cell::new(format_time(summary.first)),
            Cell::new(format_time(summary.last)),
        ]);
    }

    table.to_string()
}
