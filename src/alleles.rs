// ==============================================================================
// alleles.rs - Major/Minor Allele Resolution
// ==============================================================================
// Description: Decides the major and minor (rare) allele of a biallelic site
//              from `vcftools --freq` allele:frequency fields
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Rule:
//   ref freq > alt freq   ->  major = ref, minor = alt (allele index 1)
//   alt freq > ref freq   ->  major = alt, minor = ref (allele index 0)
//   equal                 ->  major = ref, minor = alt (allele index 1)
// ==============================================================================

use thiserror::Error;

/// Errors from parsing `letters:number` allele fields
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlleleParseError {
    #[error("Invalid allele field '{0}' (expected 'letters:number')")]
    InvalidFormat(String),

    #[error("Invalid allele frequency in '{0}'")]
    InvalidFrequency(String),
}

/// Allele letters and their frequency or count
#[derive(Debug, Clone, PartialEq)]
pub struct AlleleFrequency {
    pub allele: String,
    pub value: f64,
}

impl AlleleFrequency {
    /// Parse an allele field such as "A:0.9993"
    pub fn parse(field: &str) -> Result<Self, AlleleParseError> {
        let (allele, value) = field
            .trim()
            .split_once(':')
            .ok_or_else(|| AlleleParseError::InvalidFormat(field.to_string()))?;

        if allele.is_empty() || !allele.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AlleleParseError::InvalidFormat(field.to_string()));
        }

        let value: f64 = value
            .parse()
            .map_err(|_| AlleleParseError::InvalidFrequency(field.to_string()))?;

        if !value.is_finite() {
            return Err(AlleleParseError::InvalidFrequency(field.to_string()));
        }

        Ok(Self {
            allele: allele.to_string(),
            value,
        })
    }
}

/// Resolved major/minor alleles of one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAlleles {
    pub major: String,
    pub minor: String,
    pub minor_is_alt: bool,
}

impl ResolvedAlleles {
    /// Genotype allele index of the minor allele (0 = REF, 1 = ALT)
    pub fn minor_index(&self) -> usize {
        if self.minor_is_alt {
            1
        } else {
            0
        }
    }
}

/// Resolve major/minor alleles from a site's REF and ALT frequency fields
pub fn resolve_alleles(ref_field: &str, alt_field: &str) -> Result<ResolvedAlleles, AlleleParseError> {
    let reference = AlleleFrequency::parse(ref_field)?;
    let alternate = AlleleFrequency::parse(alt_field)?;

    if alternate.value > reference.value {
        Ok(ResolvedAlleles {
            major: alternate.allele,
            minor: reference.allele,
            minor_is_alt: false,
        })
    } else {
        Ok(ResolvedAlleles {
            major: reference.allele,
            minor: alternate.allele,
            minor_is_alt: true,
        })
    }
}
