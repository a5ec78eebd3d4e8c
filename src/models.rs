// ==============================================================================
// models.rs - Variant Linking Data Models
// ==============================================================================
// Description: Data structures for gene/individual rare variant linking
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use serde::Deserialize;

use crate::coordinates::{coord_key, CoordKey};

/// Gene proximity window from a TSS BED file (0-based start)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityWindow {
    /// Chromosome name as written in the BED file (e.g., "chr1")
    pub chrom: String,

    /// Window start (0-based)
    pub start: u64,

    /// Window stop (0-based); the matcher treats it as inclusive
    pub stop: u64,

    /// Gene identifier (e.g., "ENSG00000187634.11")
    pub gene: String,
}

impl ProximityWindow {
    /// Whether a 0-based position falls inside `[start, stop + 1)`
    pub fn contains(&self, pos0: u64) -> bool {
        pos0 >= self.start && pos0 <= self.stop
    }
}

/// Row of a `vcftools --freq` table (1-based position)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrequencyRecord {
    pub chrom: String,

    pub pos: u64,

    pub n_alleles: u32,

    pub n_chr: u64,

    /// Reference allele with frequency (e.g., "A:0.9993")
    #[serde(rename = "ref")]
    pub ref_field: String,

    /// Alternate allele with frequency (e.g., "T:0.0007")
    #[serde(rename = "alt")]
    pub alt_field: String,
}

impl FrequencyRecord {
    pub fn key(&self) -> CoordKey {
        coord_key(&self.chrom, self.pos)
    }

    /// Position converted to 0-based coordinates; `None` for POS 0
    pub fn pos0(&self) -> Option<u64> {
        self.pos.checked_sub(1)
    }
}

/// Variant site from the genotype call set (1-based position, biallelic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub chrom: String,
    pub pos: u64,
    pub ref_allele: String,
    pub alt_allele: String,
}

impl CallRecord {
    pub fn key(&self) -> CoordKey {
        coord_key(&self.chrom, self.pos)
    }
}

/// One sample's genotype call as allele indices
///
/// Index 0 is the reference allele and 1 the alternate allele. Missing
/// alleles (`.` in VCF) are `None`, so `./1` still carries allele 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genotype {
    pub alleles: Vec<Option<usize>>,
}

impl Genotype {
    pub fn new(alleles: Vec<Option<usize>>) -> Self {
        Self { alleles }
    }

    /// Fully called genotype from allele indices (e.g., `&[0, 1]`)
    pub fn called(indices: &[usize]) -> Self {
        Self {
            alleles: indices.iter().copied().map(Some).collect(),
        }
    }

    /// Whether the allele index appears anywhere in the call
    pub fn carries(&self, allele_index: usize) -> bool {
        self.alleles.contains(&Some(allele_index))
    }
}

/// Decoded genotype call source
///
/// `variants` and `calls` are parallel: `calls[v][s]` is the genotype of
/// `samples[s]` at `variants[v]`.
#[derive(Debug, Clone, Default)]
pub struct GenotypeCallSet {
    pub samples: Vec<String>,
    pub variants: Vec<CallRecord>,
    pub calls: Vec<Vec<Genotype>>,
}

impl GenotypeCallSet {
    /// Genotype row for a variant, or an empty slice past the end
    pub fn calls_for(&self, variant_index: usize) -> &[Genotype] {
        self.calls
            .get(variant_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Accumulated rare variants carried by one individual near one gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierEntry {
    pub gene: String,
    pub individual: String,

    /// Variant descriptors (`$chrom:$pos:$major:$minor`) in scan order
    pub variants: Vec<String>,
}

impl CarrierEntry {
    pub fn new(gene: &str, individual: &str) -> Self {
        Self {
            gene: gene.to_string(),
            individual: individual.to_string(),
            variants: Vec::new(),
        }
    }

    /// Sort key: `gene:individual`
    pub fn sort_key(&self) -> String {
        format!("{}:{}", self.gene, self.individual)
    }
}
