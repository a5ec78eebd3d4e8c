// ==============================================================================
// config.rs - Input Path Configuration
// ==============================================================================
// Description: Resolves the five pipeline paths against an optional root
//              directory (RAREVARDIR)
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::path::{Path, PathBuf};

/// Paths of all pipeline inputs and the output report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// Multi-tissue outliers file (e.g., data/v8/outliers_medz_picked.txt)
    pub outliers: PathBuf,

    /// Genotype VCF (e.g., download/gtex8/GTEx_AFA_10kb_TSS.vcf.gz)
    pub vcf: PathBuf,

    /// TSS window BED (e.g., reference/v8.genes.TSS_minus10k.bed)
    pub tss: PathBuf,

    /// Rare variant frequency table (e.g., reference/GTEx_AFA_10kb_TSS_AF_rare.frq)
    pub rare_var: PathBuf,

    /// Output report
    pub outfile: PathBuf,
}

impl InputPaths {
    /// Resolve relative paths beneath `root`; absolute paths are kept
    pub fn resolve(
        root: Option<&Path>,
        outliers: impl AsRef<Path>,
        vcf: impl AsRef<Path>,
        tss: impl AsRef<Path>,
        rare_var: impl AsRef<Path>,
        outfile: impl AsRef<Path>,
    ) -> Self {
        let join = |path: &Path| match root {
            Some(root) => root.join(path),
            None => path.to_path_buf(),
        };

        Self {
            outliers: join(outliers.as_ref()),
            vcf: join(vcf.as_ref()),
            tss: join(tss.as_ref()),
            rare_var: join(rare_var.as_ref()),
            outfile: join(outfile.as_ref()),
        }
    }
}
