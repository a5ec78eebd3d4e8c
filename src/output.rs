// ==============================================================================
// output.rs - Gene/Individual Variant Report Writer
// ==============================================================================
// Description: Writes carrier lists as a tab-separated report
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Format:
//   gene    individual    variants
//   G1      sample1       $chr1:$150:$A:$T,$chr1:$170:$C:$G
// ==============================================================================

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::scanner::CarrierTable;

pub const REPORT_HEADER: [&str; 3] = ["gene", "individual", "variants"];

/// Write the report to any writer; returns the number of data rows
pub fn write_report<W: Write>(table: &CarrierTable, writer: W) -> Result<usize> {
    let mut tsv = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    tsv.write_record(REPORT_HEADER)
        .context("Failed to write report header")?;

    let mut rows = 0;
    for entry in table.entries() {
        let variants = entry.variants.join(",");
        tsv.write_record([entry.gene.as_str(), entry.individual.as_str(), variants.as_str()])
            .with_context(|| format!("Failed to write row for {}", entry.sort_key()))?;
        rows += 1;
    }

    tsv.flush().context("Failed to flush report")?;
    Ok(rows)
}

/// Write the report to `path`, creating parent directories as needed
pub fn write_report_file(table: &CarrierTable, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file {:?}", path))?;

    let rows = write_report(table, std::io::BufWriter::new(file))?;
    debug!("wrote {} report rows to {:?}", rows, path);

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn render(table: &CarrierTable) -> String {
        let mut buf = Vec::new();
        write_report(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_report_is_header_only() {
        assert_eq!(render(&CarrierTable::new()), "gene\tindividual\tvariants\n");
    }

    #[test]
    fn test_rows_sorted_and_comma_joined() {
        let mut table = CarrierTable::new();
        table.push("G2", "s1", "$chr2:$5:$A:$C".to_string());
        table.push("G1", "s2", "$chr1:$150:$A:$T".to_string());
        table.push("G1", "s2", "$chr1:$170:$C:$G".to_string());

        assert_eq!(
            render(&table),
            "gene\tindividual\tvariants\n\
             G1\ts2\t$chr1:$150:$A:$T,$chr1:$170:$C:$G\n\
             G2\ts1\t$chr2:$5:$A:$C\n"
        );
    }

    #[test]
    fn test_write_report_file_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reference").join("gene_indiv_variants.txt");

        let mut table = CarrierTable::new();
        table.push("G1", "s1", "$chr1:$150:$A:$T".to_string());

        let rows = write_report_file(&table, &path).unwrap();
        assert_eq!(rows, 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("gene\tindividual\tvariants\n"));
        assert!(contents.contains("G1\ts1\t$chr1:$150:$A:$T\n"));
    }
}
