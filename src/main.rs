// ==============================================================================
// main.rs - Gene/Individual Rare Variant Linker Entry Point
// ==============================================================================
// Description: Makes the gene / individual / rare variant list file for
//              outlier genes
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Output columns:
//   gene        outlier gene with at least one multi-tissue outlier individual
//   individual  individual with at least one rare variant in the gene's TSS window
//   variants    comma-separated $chrom:$position:$major_allele:$variant_allele
// ==============================================================================
// Usage:
//   RAREVARDIR=/data/rarevar gene-indiv-variants \
//     data/v8/outliers_medz_picked.txt \
//     download/gtex8/GTEx_AFA_10kb_TSS.vcf.gz \
//     reference/v8.genes.TSS_minus10k.bed \
//     reference/GTEx_AFA_10kb_TSS_AF_rare.frq \
//     reference/gene_indiv_variants.txt
// ==============================================================================

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gene_indiv_variants::config::InputPaths;
use gene_indiv_variants::processor::GeneIndivProcessor;

#[derive(Parser, Debug)]
#[command(author, version, about = "Make file with outlier gene and individual pairs with list of rare variants", long_about = None)]
struct Args {
    /// Multi-tissue outliers file
    outliers: PathBuf,

    /// VCF file with genotype calls (.vcf or .vcf.gz)
    vcf: PathBuf,

    /// BED file with TSS windows of genes
    tss: PathBuf,

    /// Allele frequency file with only rare variants
    rare_var: PathBuf,

    /// Output file
    outfile: PathBuf,

    /// Upper-level directory that relative paths are resolved against
    #[arg(long, env = "RAREVARDIR")]
    root_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gene_indiv_variants=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let paths = InputPaths::resolve(
        args.root_dir.as_deref(),
        &args.outliers,
        &args.vcf,
        &args.tss,
        &args.rare_var,
        &args.outfile,
    );

    let summary = GeneIndivProcessor::new(paths).process()?;

    info!(
        "Linked {} gene-individual pairs ({} outlier genes, {} windows, {} of {} rare variants matched, {} aligned)",
        summary.carrier_pairs,
        summary.outlier_genes,
        summary.stats.windows_kept,
        summary.stats.matched_variants,
        summary.stats.frequency_records,
        summary.stats.aligned_variants
    );
    info!("Report written to {}", summary.output_path.display());

    Ok(())
}
