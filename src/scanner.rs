// ==============================================================================
// scanner.rs - Genotype Scan and Carrier Aggregation
// ==============================================================================
// Description: Finds the individuals carrying each aligned rare variant and
//              accumulates per (gene, individual) variant lists
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Descriptor format:
//   $chrom:$position:$major_allele:$minor_allele     e.g. $chr1:$150:$A:$T
//   chrom/position come from the genotype call record.
// ==============================================================================

use std::collections::BTreeMap;

use crate::aligner::AlignedVariant;
use crate::alleles::{resolve_alleles, AlleleParseError, ResolvedAlleles};
use crate::models::{CallRecord, CarrierEntry, GenotypeCallSet};

/// Carrier lists keyed by `gene:individual`
///
/// The key ordering is the report ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierTable {
    entries: BTreeMap<String, CarrierEntry>,
}

impl CarrierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variant descriptor to a (gene, individual) list
    pub fn push(&mut self, gene: &str, individual: &str, descriptor: String) {
        let key = format!("{}:{}", gene, individual);
        self.entries
            .entry(key)
            .or_insert_with(|| CarrierEntry::new(gene, individual))
            .variants
            .push(descriptor);
    }

    pub fn get(&self, gene: &str, individual: &str) -> Option<&CarrierEntry> {
        self.entries.get(&format!("{}:{}", gene, individual))
    }

    /// Entries sorted by `gene:individual`
    pub fn entries(&self) -> impl Iterator<Item = &CarrierEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Format the `$chrom:$position:$major:$minor` descriptor for a call record
pub fn variant_descriptor(call: &CallRecord, alleles: &ResolvedAlleles) -> String {
    format!(
        "${}:${}:${}:${}",
        call.chrom, call.pos, alleles.major, alleles.minor
    )
}

/// Scan every sample's genotype at every aligned variant
///
/// A sample is a carrier if the minor allele index appears anywhere in its
/// call, including partially missing calls such as `./1`.
pub fn scan_genotypes(
    aligned: &[AlignedVariant<'_>],
    call_set: &GenotypeCallSet,
) -> Result<CarrierTable, AlleleParseError> {
    let mut table = CarrierTable::new();

    for variant in aligned {
        let alleles = resolve_alleles(&variant.frequency.ref_field, &variant.frequency.alt_field)?;
        let minor_index = alleles.minor_index();
        let descriptor = variant_descriptor(variant.call, &alleles);

        for (sample, genotype) in call_set
            .samples
            .iter()
            .zip(call_set.calls_for(variant.call_row))
        {
            if genotype.carries(minor_index) {
                table.push(variant.gene, sample, descriptor.clone());
            }
        }
    }

    Ok(table)
}
