use crate::cli::{Cli, ColorMode};
use crate::filter::CompileError;
use crate::projector::FieldSelection;
use crate::reader::STDIN_PATH;
use crate::window::{TimeWindow, WindowError, parse_bound};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DELIMITER: u8 = b'\t';
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid delimiter '{0}': must be exactly one byte")]
    InvalidDelimiter(String),
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error("Invalid fields '{spec}': {source}")]
    Fields {
        spec: String,
        #[source]
        source: CompileError,
    },
}

/// Defaults read from a TOML profile. Command line flags take precedence.
///
/// ```toml
/// delimiter = ","
/// fields = "0,3,-1"
/// filters = ["!2:healthcheck"]
/// preview_rows = 20
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub delimiter: Option<String>,
    pub fields: Option<String>,
    /// Combined with AND, ahead of any `--filter` flags
    pub filters: Vec<String>,
    pub preview_rows: usize,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            delimiter: None,
            fields: None,
            filters: Vec::new(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

pub fn load_profile(path: Option<&Path>) -> Result<Profile, ConfigError> {
    match path {
        Some(path) => load_profile_from_path(path),
        None => Ok(Profile::default()),
    }
}

pub fn load_profile_from_path(path: &Path) -> Result<Profile, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<Profile>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

/// Fully resolved settings for one run; built once and only read afterwards
#[derive(Debug, Clone)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub delimiter: u8,
    pub window: TimeWindow,
    pub fields: FieldSelection,
    pub filters: Vec<String>,
    /// Row cap per input when previewing
    pub preview_rows: Option<usize>,
    pub verbose: bool,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from(STDIN_PATH)],
            delimiter: DEFAULT_DELIMITER,
            window: TimeWindow::unbounded(),
            fields: FieldSelection::all(),
            filters: Vec::new(),
            preview_rows: None,
            verbose: false,
            color: ColorMode::Auto,
        }
    }
}

impl Config {
    /// Merge command line flags over a profile. Relative time bounds are
    /// resolved against `now`.
    pub fn resolve(
        cli: &Cli,
        profile: &Profile,
        now: DateTime<FixedOffset>,
    ) -> Result<Self, ConfigError> {
        let inputs = if cli.files.is_empty() {
            vec![PathBuf::from(STDIN_PATH)]
        } else {
            cli.files.clone()
        };

        let delimiter = match cli.delimiter.as_deref().or(profile.delimiter.as_deref()) {
            Some(raw) => parse_delimiter(raw)?,
            None => DEFAULT_DELIMITER,
        };

        let window = TimeWindow::new(
            parse_bound("from", cli.from.as_deref().unwrap_or_default(), now)?,
            parse_bound("to", cli.to.as_deref().unwrap_or_default(), now)?,
        );

        let fields = match cli.fields.as_deref().or(profile.fields.as_deref()) {
            Some(spec) => spec.parse().map_err(|source| ConfigError::Fields {
                spec: spec.to_string(),
                source,
            })?,
            None => FieldSelection::all(),
        };

        let filters = profile
            .filters
            .iter()
            .chain(&cli.filters)
            .cloned()
            .collect();

        Ok(Self {
            inputs,
            delimiter,
            window,
            fields,
            filters,
            preview_rows: cli.preview.then_some(profile.preview_rows),
            verbose: cli.verbose,
            color: cli.color,
        })
    }
}

/// The delimiter must be a single byte; multi-byte characters are refused
pub fn parse_delimiter(raw: &str) -> Result<u8, ConfigError> {
    match raw.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(ConfigError::InvalidDelimiter(raw.to_string())),
    }
}
