// ==============================================================================
// lib.rs - Gene/Individual Rare Variant Linker Library
// ==============================================================================
// Description: Library interface for the rare variant linking modules
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

pub mod parsers;
pub mod models;
pub mod coordinates;
pub mod matcher;
pub mod aligner;
pub mod alleles;
pub mod scanner;
pub mod output;
pub mod config;
pub mod processor;
