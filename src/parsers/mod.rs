// ==============================================================================
// parsers/mod.rs - Input file parser modules
// ==============================================================================
// Description: Parsers for outlier, TSS window, frequency and VCF inputs
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

pub mod outliers;
pub mod windows;
pub mod frequency;
pub mod vcf;

pub use outliers::{OutlierParser, OutlierParseError};
pub use windows::{WindowParser, WindowParseError};
pub use frequency::{FrequencyParser, FrequencyParseError};
pub use vcf::{VcfGenotypeReader, VcfParseError};
