// ==============================================================================
// frequency.rs - Rare Variant Allele Frequency Parser
// ==============================================================================
// Description: Reads `vcftools --freq` output restricted to rare variants
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Format: Tab-delimited; first line is a header and is skipped
// Example:
//   CHROM   POS      N_ALLELES   N_CHR   {ALLELE:FREQ}
//   chr1    14677    2           1676    G:0.998807   A:0.00119332
// ==============================================================================

use csv::{ReaderBuilder, Trim};
use std::path::Path;
use thiserror::Error;

use crate::models::FrequencyRecord;

/// Expected number of columns for a biallelic site
const FREQ_COLUMNS: usize = 6;

/// Errors that can occur during frequency file parsing
#[derive(Error, Debug)]
pub enum FrequencyParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid line format at line {line}: {details}")]
    InvalidFormat { line: usize, details: String },

    #[error("Multi-allelic site at line {line}: {alleles} alleles (only biallelic sites are supported)")]
    MultiAllelic { line: usize, alleles: usize },
}

/// Parser for allele frequency tables
pub struct FrequencyParser;

impl FrequencyParser {
    /// Parse a `vcftools --freq` table
    ///
    /// # Arguments
    /// * `path` - Path to the frequency table (plain text, tab-delimited)
    ///
    /// # Returns
    /// One `FrequencyRecord` per data row, in file order. Duplicate
    /// coordinates are kept; the caller deduplicates them. A row that is not
    /// biallelic fails the whole parse.
    ///
    /// # Example
    /// ```no_run
    /// use gene_indiv_variants::parsers::FrequencyParser;
    ///
    /// let records = FrequencyParser::parse("GTEx_AFA_rare_variants.frq")?;
    /// for record in &records {
    ///     println!("{} {} {}", record.key(), record.ref_field, record.alt_field);
    /// }
    /// # Ok::<(), gene_indiv_variants::parsers::FrequencyParseError>(())
    /// ```
    pub fn parse(path: impl AsRef<Path>) -> Result<Vec<FrequencyRecord>, FrequencyParseError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::parse_reader(file)
    }

    /// Parse frequency records from any reader, keeping file order
    pub fn parse_reader<R: std::io::Read>(reader: R) -> Result<Vec<FrequencyRecord>, FrequencyParseError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .quoting(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();

        for result in reader.records() {
            let raw = result?;
            let line = raw.position().map(|p| p.line() as usize).unwrap_or(0);

            if raw.len() > FREQ_COLUMNS {
                return Err(FrequencyParseError::MultiAllelic {
                    line,
                    alleles: raw.len() - (FREQ_COLUMNS - 2),
                });
            }
            if raw.len() < FREQ_COLUMNS {
                return Err(FrequencyParseError::InvalidFormat {
                    line,
                    details: format!("Expected {} tab-delimited fields, found {}", FREQ_COLUMNS, raw.len()),
                });
            }

            let record: FrequencyRecord = raw.deserialize(None)?;

            if record.n_alleles != 2 {
                return Err(FrequencyParseError::MultiAllelic {
                    line,
                    alleles: record.n_alleles as usize,
                });
            }

            records.push(record);
        }

        Ok(records)
    }
}
