// ==============================================================================
// matcher.rs - TSS Window / Rare Variant Interval Matching
// ==============================================================================
// Description: Assigns each rare variant to the first outlier-gene window
//              that contains it
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   Windows are 0-based, variants 1-based. A variant matches a window when
//   start <= pos - 1 < stop + 1. Windows are processed one chromosome at a
//   time (chromosomes in order of first appearance, windows in table order);
//   a variant keeps the gene of the first window that matched it.
//   Variant positions are sorted per chromosome so each window is resolved
//   with a binary search instead of a full scan.
// ==============================================================================

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::models::{FrequencyRecord, ProximityWindow};

/// Variant-to-gene assignment keyed by frequency table row index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneAssignment {
    genes: BTreeMap<usize, String>,
}

/// Frequency record annotated with its assigned gene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedVariant<'a> {
    pub gene: &'a str,
    pub record: &'a FrequencyRecord,
}

impl GeneAssignment {
    pub fn gene_for(&self, row: usize) -> Option<&str> {
        self.genes.get(&row).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Matched subset of `records`, in original row order
    pub fn matched<'a>(&'a self, records: &'a [FrequencyRecord]) -> Vec<MatchedVariant<'a>> {
        self.genes
            .iter()
            .filter_map(|(&row, gene)| {
                records.get(row).map(|record| MatchedVariant {
                    gene: gene.as_str(),
                    record,
                })
            })
            .collect()
    }
}

/// Keep only windows whose gene is in the outlier set
pub fn filter_windows(
    windows: Vec<ProximityWindow>,
    outlier_genes: &HashSet<String>,
) -> Vec<ProximityWindow> {
    windows
        .into_iter()
        .filter(|w| outlier_genes.contains(&w.gene))
        .collect()
}

/// Match deduplicated frequency records against outlier-gene windows
pub fn match_windows(windows: &[ProximityWindow], records: &[FrequencyRecord]) -> GeneAssignment {
    // Sorted (pos0, row) pairs per chromosome
    let mut positions: HashMap<&str, Vec<(u64, usize)>> = HashMap::new();
    for (row, record) in records.iter().enumerate() {
        let Some(pos0) = record.pos0() else {
            debug!("Skipping {}: position 0 has no 0-based coordinate", record.key());
            continue;
        };
        positions
            .entry(record.chrom.as_str())
            .or_default()
            .push((pos0, row));
    }
    for chrom_positions in positions.values_mut() {
        chrom_positions.sort_unstable();
    }

    let mut chrom_order: Vec<&str> = Vec::new();
    let mut by_chrom: HashMap<&str, Vec<&ProximityWindow>> = HashMap::new();
    for window in windows {
        let chrom = window.chrom.as_str();
        if !by_chrom.contains_key(chrom) {
            chrom_order.push(chrom);
        }
        by_chrom.entry(chrom).or_default().push(window);
    }

    let mut assignment = GeneAssignment::default();

    for chrom in chrom_order {
        let Some(chrom_positions) = positions.get(chrom) else {
            debug!("No rare variants on {}", chrom);
            continue;
        };

        for window in by_chrom.get(chrom).into_iter().flatten() {
            let first = chrom_positions.partition_point(|&(pos0, _)| pos0 < window.start);

            for &(pos0, row) in &chrom_positions[first..] {
                if !window.contains(pos0) {
                    break;
                }
                assignment
                    .genes
                    .entry(row)
                    .or_insert_with(|| window.gene.clone());
            }
        }
    }

    assignment
}
