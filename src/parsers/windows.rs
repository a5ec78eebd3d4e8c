// ==============================================================================
// windows.rs - TSS Proximity Window (BED) Parser
// ==============================================================================
// Description: Reads gene TSS windows from a headerless BED file
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Format: Tab-delimited, no header, 0-based start
// Example:
//   chr1    59090    79091    ENSG00000186092.4
//   chr1    915070   935071   ENSG00000187634.11
// ==============================================================================

use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

use crate::models::ProximityWindow;

/// Errors that can occur during BED window parsing
#[derive(Error, Debug)]
pub enum WindowParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid line format at line {line}: {details}")]
    InvalidFormat { line: usize, details: String },

    #[error("Invalid coordinate at line {line}: {value}")]
    InvalidCoordinate { line: usize, value: String },
}

/// Parser for TSS window BED files
pub struct WindowParser;

impl WindowParser {
    pub fn parse(path: impl AsRef<Path>) -> Result<Vec<ProximityWindow>, WindowParseError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::parse_reader(file)
    }

    /// Parse windows from any reader, keeping file order
    pub fn parse_reader<R: std::io::Read>(reader: R) -> Result<Vec<ProximityWindow>, WindowParseError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut windows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

            let first = record.get(0).unwrap_or("").trim();
            if first.is_empty()
                || first.starts_with('#')
                || first.starts_with("track")
                || first.starts_with("browser")
            {
                continue;
            }

            if record.len() < 4 {
                return Err(WindowParseError::InvalidFormat {
                    line,
                    details: format!("Expected at least 4 tab-delimited fields, found {}", record.len()),
                });
            }

            let parse_coord = |value: &str| {
                value.trim().parse::<u64>().map_err(|_| WindowParseError::InvalidCoordinate {
                    line,
                    value: value.to_string(),
                })
            };

            windows.push(ProximityWindow {
                chrom: first.to_string(),
                start: parse_coord(&record[1])?,
                stop: parse_coord(&record[2])?,
                gene: record[3].trim().to_string(),
            });
        }

        Ok(windows)
    }
}
