// ==============================================================================
// outliers.rs - Expression Outlier Table Parser
// ==============================================================================
// Description: Reads the set of outlier genes from a multi-tissue outlier file
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Format: Tab-delimited with header (column names are case-insensitive)
// Example:
//   GENE                 INDIV        N    DF    MEDZ
//   ENSG00000000419.12   GTEX-1117F   40   39    -3.12
// ==============================================================================

use csv::ReaderBuilder;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during outlier file parsing
#[derive(Error, Debug)]
pub enum OutlierParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Parser for outlier tables
pub struct OutlierParser;

impl OutlierParser {
    /// Parse the distinct gene identifiers from an outlier file
    pub fn parse(path: impl AsRef<Path>) -> Result<HashSet<String>, OutlierParseError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::parse_reader(file)
    }

    /// Parse outlier genes from any reader
    pub fn parse_reader<R: std::io::Read>(reader: R) -> Result<HashSet<String>, OutlierParseError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let gene_col = reader
            .headers()?
            .iter()
            .position(|h| h.trim().to_lowercase() == "gene")
            .ok_or_else(|| OutlierParseError::MissingColumn("gene".to_string()))?;

        let mut genes = HashSet::new();
        for result in reader.records() {
            let record = result?;
            if let Some(gene) = record.get(gene_col).map(str::trim).filter(|g| !g.is_empty()) {
                genes.insert(gene.to_string());
            }
        }

        Ok(genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gene_column_case_insensitive() {
        let contents = "\
INDIV\tGENE\tMEDZ
GTEX-1\tG1\t-3.1
GTEX-2\tG2\t3.4
GTEX-3\tG1\t4.0
";
        let genes = OutlierParser::parse_reader(contents.as_bytes()).unwrap();

        assert_eq!(genes.len(), 2);
        assert!(genes.contains("G1"));
        assert!(genes.contains("G2"));
    }

    #[test]
    fn test_missing_gene_column() {
        let contents = "indiv\tmedz\nGTEX-1\t3.0\n";

        match OutlierParser::parse_reader(contents.as_bytes()) {
            Err(OutlierParseError::MissingColumn(col)) => assert_eq!(col, "gene"),
            other => panic!("Expected MissingColumn error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_yields_no_genes() {
        let genes = OutlierParser::parse_reader("gene\tindiv\n".as_bytes()).unwrap();
        assert!(genes.is_empty());
    }
}
