//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use roopal_core::{CsvWriter, RoopalConfig, StatementParser, TabularExporter};

/// Load configuration from `path`, or defaults when none is given.
pub fn load_config(path: Option<&str>) -> anyhow::Result<RoopalConfig> {
    let config = if let Some(path) = path {
        RoopalConfig::from_file(Path::new(path))?
    } else {
        RoopalConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Parser configured from `config`.
pub fn parser(config: &RoopalConfig) -> StatementParser {
    StatementParser::new().with_overnight_rollover(config.extraction.roll_overnight_shifts)
}

/// Exporter and writer configured from `config`.
pub fn exporter(config: &RoopalConfig) -> anyhow::Result<(TabularExporter, CsvWriter)> {
    let offset = config
        .export
        .utc_offset()
        .ok_or_else(|| anyhow::anyhow!("invalid export.utc_offset_minutes"))?;
    let delimiter = config
        .export
        .delimiter_byte()
        .ok_or_else(|| anyhow::anyhow!("invalid export.delimiter"))?;

    Ok((
        TabularExporter::new().with_utc_offset(offset),
        CsvWriter::new().with_delimiter(delimiter),
    ))
}
