pub mod cli;
pub mod config;
pub mod filter;
pub mod logging;
pub mod parser;
pub mod projector;
pub mod reader;
pub mod summary;
pub mod window;

use anyhow::Context;
use chrono::Local;
use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use tracing::{debug, warn};

pub use cli::{Cli, ColorMode, cli_parse};
pub use config::{Config, ConfigError, Profile, load_profile, load_profile_from_path};
pub use filter::{CompileError, Predicate, compile_filters, parse_filter};
pub use parser::{ParseError, Record, parse_line};
pub use projector::{FieldSelection, format_record, write_field_index, write_record};
pub use reader::{ReadError, ReaderStats, RecordReader};
pub use summary::{FileSummary, format_summary_table};
pub use window::TimeWindow;

/// Drain one reader, writing every record that passes `predicate`.
///
/// In preview mode the first match is preceded by its field index listing
/// and output stops after `preview_rows` rows.
pub fn process_input<R: BufRead, W: Write>(
    reader: &mut RecordReader<R>,
    predicate: &Predicate,
    config: &Config,
    colorize: bool,
    out: &mut W,
) -> io::Result<FileSummary> {
    let mut summary = FileSummary::new(reader.name());

    while let Some(record) = reader.advance() {
        if !predicate.matches(record) {
            continue;
        }

        if let Some(rows) = config.preview_rows {
            if summary.matched == 0 {
                write_field_index(out, record, &config.fields, colorize)?;
            }
            if summary.matched >= rows {
                break;
            }
        }

        summary.record_match(*record.timestamp());
        write_record(out, record, config.delimiter, &config.fields)?;
    }

    summary.stats = *reader.stats();
    Ok(summary)
}

/// Run every configured input through the compiled filter, in order.
///
/// Inputs that cannot be opened are skipped with a warning.
pub fn process_inputs<W: Write>(
    config: &Config,
    predicate: &Predicate,
    colorize: bool,
    out: &mut W,
) -> io::Result<Vec<FileSummary>> {
    let mut summaries = Vec::with_capacity(config.inputs.len());

    for input in &config.inputs {
        let mut reader = match RecordReader::open(input, config.delimiter, config.window) {
            Ok(reader) => reader,
            Err(err) => {
                warn!("{err}, skipping");
                continue;
            }
        };

        let summary = process_input(&mut reader, predicate, config, colorize, out)?;
        debug!(
            input = %summary.name,
            matched = summary.matched,
            first = ?summary.first,
            last = ?summary.last,
            "input done"
        );
        summaries.push(summary);
    }

    Ok(summaries)
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let profile = load_profile(cli.config.as_deref()).context("Failed to load config")?;
    let config = Config::resolve(&cli, &profile, Local::now().fixed_offset())?;
    let predicate = compile_filters(&config.filters).context("Invalid filter expression")?;

    debug!(window = %config.window, "returning records in window");
    debug!(filter = %predicate, "compiled filters");
    if config.window.is_empty() {
        warn!(window = %config.window, "time window is empty, no record can match");
    }

    let colorize = match config.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    };
    colored::control::set_override(colorize);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = process_inputs(&config, &predicate, colorize, &mut out).and_then(|summaries| {
        out.flush()?;
        Ok(summaries)
    });

    let summaries = match result {
        Ok(summaries) => summaries,
        // The reader of our output went away (eg `| head`); nothing left to do
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
        Err(err) => return Err(err).context("Failed to write output"),
    };

    if config.verbose {
        eprintln!("{}", format_summary_table(&summaries));
    }

    Ok(())
}
