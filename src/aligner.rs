// ==============================================================================
// aligner.rs - Frequency / Genotype Table Alignment
// ==============================================================================
// Description: Joins gene-annotated rare variants to genotype call records
//              by `$chrom:$pos` key
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::collections::HashMap;
use tracing::debug;

use crate::coordinates::{first_occurrences, CoordKey};
use crate::matcher::MatchedVariant;
use crate::models::{CallRecord, FrequencyRecord, GenotypeCallSet};

/// One rare variant present in both tables
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedVariant<'a> {
    pub key: CoordKey,
    pub gene: &'a str,
    pub frequency: &'a FrequencyRecord,
    pub call: &'a CallRecord,

    /// Row of the call record (and its genotypes) in the call set
    pub call_row: usize,
}

/// Restrict both tables to their shared keys
///
/// The matched subset drives the order. Keys missing from either side are
/// dropped. Duplicate call-table coordinates resolve to their first row.
pub fn align<'a>(
    matched: &[MatchedVariant<'a>],
    call_set: &'a GenotypeCallSet,
) -> Vec<AlignedVariant<'a>> {
    let call_index: HashMap<CoordKey, usize> =
        first_occurrences(&call_set.variants, CallRecord::key)
            .into_iter()
            .map(|row| (call_set.variants[row].key(), row))
            .collect();

    let mut aligned = Vec::with_capacity(matched.len().min(call_index.len()));

    for variant in matched {
        let key = variant.record.key();
        match call_index.get(&key) {
            Some(&call_row) => aligned.push(AlignedVariant {
                key,
                gene: variant.gene,
                frequency: variant.record,
                call: &call_set.variants[call_row],
                call_row,
            }),
            None => debug!("Dropping {} (not in genotype calls)", key),
        }
    }

    aligned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genotype;

    fn freq(chrom: &str, pos: u64) -> FrequencyRecord {
        FrequencyRecord {
            chrom: chrom.to_string(),
            pos,
            n_alleles: 2,
            n_chr: 4,
            ref_field: "A:0.75".to_string(),
            alt_field: "G:0.25".to_string(),
        }
    }

    fn call(chrom: &str, pos: u64, alt: &str) -> CallRecord {
        CallRecord {
            chrom: chrom.to_string(),
            pos,
            ref_allele: "A".to_string(),
            alt_allele: alt.to_string(),
        }
    }

    fn call_set(variants: Vec<CallRecord>) -> GenotypeCallSet {
        let calls = variants
            .iter()
            .map(|_| vec![Genotype::called(&[0, 1])])
            .collect();
        GenotypeCallSet {
            samples: vec!["s1".to_string()],
            variants,
            calls,
        }
    }

    #[test]
    fn test_alignment_is_key_based() {
        let records = vec![freq("chr1", 10), freq("chr1", 20), freq("chr1", 30)];
        let matched: Vec<MatchedVariant> = records
            .iter()
            .map(|record| MatchedVariant { gene: "G1", record })
            .collect();

        // Call table in a different order, missing pos 20, with an extra site
        let set = call_set(vec![
            call("chr1", 30, "C"),
            call("chr1", 99, "T"),
            call("chr1", 10, "G"),
        ]);

        let aligned = align(&matched, &set);
        assert_eq!(aligned.len(), 2);

        for variant in &aligned {
            assert_eq!(variant.key, variant.frequency.key());
            assert_eq!(variant.key, variant.call.key());
            assert_eq!(&set.variants[variant.call_row], variant.call);
        }

        assert_eq!(aligned[0].frequency.pos, 10);
        assert_eq!(aligned[0].call_row, 2);
        assert_eq!(aligned[1].frequency.pos, 30);
        assert_eq!(aligned[1].call_row, 0);
    }

    #[test]
    fn test_duplicate_call_sites_use_first_row() {
        let records = vec![freq("chr1", 10)];
        let matched = vec![MatchedVariant {
            gene: "G1",
            record: &records[0],
        }];

        let set = call_set(vec![call("chr1", 10, "G"), call("chr1", 10, "T")]);

        let aligned = align(&matched, &set);
        assert_eq!(aligned.len(), 1);
        assert_eq!(aligned[0].call_row, 0);
        assert_eq!(aligned[0].call.alt_allele, "G");
    }

    #[test]
    fn test_no_shared_keys() {
        let records = vec![freq("chr1", 10)];
        let matched = vec![MatchedVariant {
            gene: "G1",
            record: &records[0],
        }];
        let set = call_set(vec![call("chr2", 10, "G")]);

        assert!(align(&matched, &set).is_empty());
        assert!(align(&[], &set).is_empty());
    }
}
