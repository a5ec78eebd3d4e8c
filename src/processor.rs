// ==============================================================================
// processor.rs - Gene/Individual Rare Variant Linking Pipeline
// ==============================================================================
// Description: Links rare variants near outlier-gene TSS windows to the
//              individuals that carry them
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Pipeline:
//   outliers ─┐
//   TSS BED ──┴─> filter windows ─┐
//   rare .frq ──> dedup ──────────┴─> match ─┐
//   VCF ─────────────────────────────────────┴─> align -> resolve + scan -> report
// ==============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::aligner::align;
use crate::config::InputPaths;
use crate::coordinates::dedup_by_key;
use crate::matcher::{filter_windows, match_windows};
use crate::models::{FrequencyRecord, GenotypeCallSet, ProximityWindow};
use crate::output::write_report_file;
use crate::parsers::{FrequencyParser, OutlierParser, VcfGenotypeReader, WindowParser};
use crate::scanner::{scan_genotypes, CarrierTable};

/// Counts from the in-memory linking stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Windows belonging to outlier genes
    pub windows_kept: usize,
    /// Frequency records after coordinate deduplication
    pub frequency_records: usize,
    /// Frequency records inside an outlier-gene window
    pub matched_variants: usize,
    /// Matched records also present in the genotype calls
    pub aligned_variants: usize,
}

/// Carrier table plus stage counts
#[derive(Debug, Clone, Default)]
pub struct LinkedVariants {
    pub carriers: CarrierTable,
    pub stats: LinkStats,
}

/// Summary of a full pipeline run
#[derive(Debug, Clone)]
pub struct ProcessSummary {
    pub outlier_genes: usize,
    pub stats: LinkStats,
    pub carrier_pairs: usize,
    pub output_path: PathBuf,
}

/// Run the in-memory linking core on already-parsed inputs
///
/// Fails only on malformed allele frequency fields.
pub fn link_variants(
    outlier_genes: &HashSet<String>,
    windows: Vec<ProximityWindow>,
    frequencies: Vec<FrequencyRecord>,
    call_set: &GenotypeCallSet,
) -> Result<LinkedVariants> {
    let windows = filter_windows(windows, outlier_genes);
    debug!("{} TSS windows belong to outlier genes", windows.len());

    let total_frequencies = frequencies.len();
    let frequencies = dedup_by_key(frequencies, FrequencyRecord::key);
    if frequencies.len() < total_frequencies {
        debug!(
            "Removed {} duplicate rare variant coordinates",
            total_frequencies - frequencies.len()
        );
    }

    info!("filtering for rare variants within TSS windows of outlier genes");
    let assignment = match_windows(&windows, &frequencies);
    let matched = assignment.matched(&frequencies);
    info!(
        "{} of {} rare variants fall within {} outlier-gene windows",
        matched.len(),
        frequencies.len(),
        windows.len()
    );

    info!("finding matching chrom:pos in rare variants and genotype calls");
    let aligned = align(&matched, call_set);
    info!("{} rare variants have genotype calls", aligned.len());

    info!("finding variants for gene-individual pairs");
    let carriers = scan_genotypes(&aligned, call_set)
        .context("Failed to resolve major/minor alleles")?;

    Ok(LinkedVariants {
        stats: LinkStats {
            windows_kept: windows.len(),
            frequency_records: frequencies.len(),
            matched_variants: matched.len(),
            aligned_variants: aligned.len(),
        },
        carriers,
    })
}

/// File-based pipeline over the five configured paths
pub struct GeneIndivProcessor {
    paths: InputPaths,
}

impl GeneIndivProcessor {
    pub fn new(paths: InputPaths) -> Self {
        Self { paths }
    }

    /// Main processing pipeline
    pub fn process(&self) -> Result<ProcessSummary> {
        info!("reading input files");

        let outlier_genes = OutlierParser::parse(&self.paths.outliers)
            .with_context(|| format!("Failed to parse outliers file {:?}", self.paths.outliers))?;
        info!("Loaded {} outlier genes", outlier_genes.len());

        let mut vcf_reader = VcfGenotypeReader::new();
        let call_set = vcf_reader
            .parse(&self.paths.vcf)
            .with_context(|| format!("Failed to parse VCF {:?}", self.paths.vcf))?;
        info!(
            "Loaded {} genotype call sites for {} samples",
            vcf_reader.record_count,
            call_set.samples.len()
        );

        let windows = WindowParser::parse(&self.paths.tss)
            .with_context(|| format!("Failed to parse TSS windows {:?}", self.paths.tss))?;
        info!("Loaded {} TSS windows", windows.len());

        let frequencies = FrequencyParser::parse(&self.paths.rare_var)
            .with_context(|| format!("Failed to parse rare variant file {:?}", self.paths.rare_var))?;
        info!("Loaded {} rare variant frequency records", frequencies.len());

        let linked = link_variants(&outlier_genes, windows, frequencies, &call_set)?;

        let carrier_pairs = write_report_file(&linked.carriers, &self.paths.outfile)?;

        Ok(ProcessSummary {
            outlier_genes: outlier_genes.len(),
            stats: linked.stats,
            carrier_pairs,
            output_path: self.paths.outfile.clone(),
        })
    }
}
