//! Configuration structures for the statement pipeline.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Main configuration for the roopal pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoopalConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Statement extraction configuration.
    pub extraction: ExtractionConfig,

    /// Tabular export configuration.
    pub export: ExportConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Extracted text shorter than this is reported as suspicious.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
        }
    }
}

/// Statement extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Shifts ending at an earlier clock time than they start end on the next day.
    /// When disabled such rows are skipped.
    pub roll_overnight_shifts: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            roll_overnight_shifts: true,
        }
    }
}

/// Tabular export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Omit real rider names by default.
    pub anonymise: bool,

    /// Offset (minutes east of UTC) printed on shift timestamps.
    pub utc_offset_minutes: i32,

    /// CSV field delimiter.
    pub delimiter: char,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            anonymise: false,
            utc_offset_minutes: 0,
            delimiter: ',',
        }
    }
}

impl ExportConfig {
    /// The configured offset, if it is a valid one.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)
    }

    /// The delimiter as a single byte, if it is ASCII.
    pub fn delimiter_byte(&self) -> Option<u8> {
        u8::try_from(self.delimiter).ok().filter(u8::is_ascii)
    }
}

impl RoopalConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> crate::Result<()> {
        if self.export.utc_offset().is_none() {
            return Err(crate::RoopalError::Config(format!(
                "export.utc_offset_minutes out of range: {}",
                self.export.utc_offset_minutes
            )));
        }
        if self.export.delimiter_byte().is_none() {
            return Err(crate::RoopalError::Config(format!(
                "export.delimiter must be a single ASCII character, got {:?}",
                self.export.delimiter
            )));
        }
        Ok(())
    }
}
