//! Output of plans, records and history: JSON documents, CSV series and
//! terminal tables

use std::str::FromStr;

use crate::error::{ExportError, LiftError};

pub mod csv;
pub mod json;
pub mod text;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Table,
}

impl FromStr for ExportFormat {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "table" | "text" | "txt" => Ok(ExportFormat::Table),
            _ => Err(LiftError::Export(ExportError::UnsupportedFormat {
                format: s.to_string(),
            })),
        }
    }
}

impl ExportFormat {
    /// Formats a plan can be printed in. Plans are nested, so there is no
    /// CSV rendering.
    pub fn parse_for_plan(s: &str) -> Result<Self, LiftError> {
        match s.parse()? {
            ExportFormat::Csv => Err(LiftError::Export(ExportError::UnsupportedFormat {
                format: s.to_string(),
            })),
            format => Ok(format),
        }
    }
}
