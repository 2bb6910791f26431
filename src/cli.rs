use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parse and search timestamped, delimited logs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log files to read ("-" or nothing reads standard input)
    pub files: Vec<PathBuf>,

    /// Only include records from this time on (RFC3339, or a duration like 15m meaning "15m ago")
    #[arg(short = 'F', long)]
    pub from: Option<String>,

    /// Only include records before this time (RFC3339, or a duration like 15m meaning "15m ago")
    #[arg(short = 'T', long)]
    pub to: Option<String>,

    /// Field delimiter, exactly one byte [default: tab]
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Only return these fields (eg 0,2,-1 or 1-3); 0 is the timestamp,
    /// printed as RFC3339 with its offset and any fractional seconds
    #[arg(short, long, allow_hyphen_values = true)]
    pub fields: Option<String>,

    /// Filter to apply, repeat to combine with AND (eg "ERROR", "2:^GET", "-1:>500", "!3:ok")
    #[arg(long = "filter", value_name = "EXPR", allow_hyphen_values = true)]
    pub filters: Vec<String>,

    /// Preview the result: list field numbers, then only a few rows per file
    #[arg(short, long)]
    pub preview: bool,

    /// Trace filter evaluation and print a per-file summary to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report errors on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// When to colorize preview output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// TOML profile with default delimiter, fields, filters and preview rows
    #[arg(short, long, env = "PARSEL_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
