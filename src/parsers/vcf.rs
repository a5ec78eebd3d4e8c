// ==============================================================================
// parsers/vcf.rs - VCF genotype call reader
// ==============================================================================
// Description: Reads sample names, biallelic sites and GT calls from a VCF
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// References:
// - VCF 4.2 Spec: https://samtools.github.io/hts-specs/VCFv4.2.pdf
// - noodles-vcf: https://docs.rs/noodles-vcf/0.81.0
// ==============================================================================
// Notes:
//   Records are decoded with noodles-vcf. Gzip and BGZF (.vcf.gz) input is
//   inflated with MultiGzDecoder first; BGZF is a series of gzip members.
//   Each lazy record is converted to a RecordBuf so GT comes back as a typed
//   Genotype. Phasing is discarded and '.' alleles are kept as missing.
// ==============================================================================

use flate2::read::MultiGzDecoder;
use noodles_vcf as vcf;
use noodles_vcf::variant::record::samples::keys::key as vcf_key;
use noodles_vcf::variant::record_buf::samples::sample::Value;
use noodles_vcf::variant::RecordBuf;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::models::{CallRecord, Genotype, GenotypeCallSet};

/// VCF parsing errors
///
/// `record` is the 1-based index of the data record (header lines excluded).
#[derive(Error, Debug)]
pub enum VcfParseError {
    #[error("Failed to open VCF file: {0}")]
    FileOpenError(String),

    #[error("Failed to read VCF header: {0}")]
    HeaderError(String),

    #[error("Invalid record {record}: {details}")]
    RecordError { record: usize, details: String },

    #[error("Multi-allelic site at record {record}: {chrom}:{pos} ALT={alt} (only biallelic sites are supported)")]
    MultiAllelic {
        record: usize,
        chrom: String,
        pos: u64,
        alt: String,
    },

    #[error("Invalid genotype '{value}' at record {record}")]
    InvalidGenotype { record: usize, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Reader for VCF genotype calls
#[derive(Debug, Default)]
pub struct VcfGenotypeReader {
    /// Count of records read on the last parse (for reporting)
    pub record_count: usize,
}

impl VcfGenotypeReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `.vcf` or `.vcf.gz` file into a genotype call set
    ///
    /// Files ending in `.gz` are decompressed as gzip, which also covers
    /// bgzip-compressed VCFs.
    ///
    /// # Arguments
    /// * `path` - Path to the VCF file
    ///
    /// # Returns
    /// Sample names from the `#CHROM` header line, one `CallRecord` per data
    /// record, and the per-sample GT calls for each record. Fails on the
    /// first multi-allelic site or malformed record.
    ///
    /// # Example
    /// ```no_run
    /// use gene_indiv_variants::parsers::VcfGenotypeReader;
    ///
    /// let mut reader = VcfGenotypeReader::new();
    /// let calls = reader.parse("GTEx_AFA_10kb_TSS.vcf.gz")?;
    /// println!("{} sites across {} samples", calls.variants.len(), calls.samples.len());
    /// # Ok::<(), gene_indiv_variants::parsers::VcfParseError>(())
    /// ```
    pub fn parse(&mut self, path: impl AsRef<Path>) -> Result<GenotypeCallSet, VcfParseError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| VcfParseError::FileOpenError(format!("{}: {}", path.display(), e)))?;

        let is_gz = path.extension().map(|ext| ext == "gz").unwrap_or(false);

        if is_gz {
            self.parse_reader(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            self.parse_reader(BufReader::new(file))
        }
    }

    /// Read genotype calls from uncompressed VCF text
    pub fn parse_reader<R: BufRead>(&mut self, inner: R) -> Result<GenotypeCallSet, VcfParseError> {
        let mut reader = vcf::io::Reader::new(inner);

        let header = reader
            .read_header()
            .map_err(|e| VcfParseError::HeaderError(e.to_string()))?;

        let mut call_set = GenotypeCallSet {
            samples: header.sample_names().iter().cloned().collect(),
            ..Default::default()
        };
        debug!("VCF header lists {} samples", call_set.samples.len());

        self.record_count = 0;

        for (idx, result) in reader.records().enumerate() {
            let record_num = idx + 1;
            let record = result.map_err(|e| VcfParseError::RecordError {
                record: record_num,
                details: e.to_string(),
            })?;

            let record = RecordBuf::try_from_variant_record(&header, &record).map_err(|e| {
                VcfParseError::RecordError {
                    record: record_num,
                    details: e.to_string(),
                }
            })?;

            let (site, genotypes) = Self::decode_record(&record, record_num, call_set.samples.len())?;
            call_set.variants.push(site);
            call_set.calls.push(genotypes);
            self.record_count += 1;
        }

        Ok(call_set)
    }

    /// Split one decoded record into its site and per-sample genotypes
    fn decode_record(
        record: &RecordBuf,
        record_num: usize,
        n_samples: usize,
    ) -> Result<(CallRecord, Vec<Genotype>), VcfParseError> {
        let chrom = record.reference_sequence_name().to_string();

        // POS 0 (telomere) has no variant start
        let pos = record
            .variant_start()
            .map(|position| position.get() as u64)
            .unwrap_or(0);

        let alts = record.alternate_bases().as_ref();
        if alts.len() > 1 {
            return Err(VcfParseError::MultiAllelic {
                record: record_num,
                chrom,
                pos,
                alt: alts.join(","),
            });
        }

        let samples = record.samples();
        let genotypes = (0..n_samples)
            .map(|i| {
                let sample = samples.get_index(i).ok_or_else(|| VcfParseError::RecordError {
                    record: record_num,
                    details: format!("Expected {} samples, found {}", n_samples, i),
                })?;

                match sample.get(vcf_key::GENOTYPE) {
                    Some(Some(Value::Genotype(genotype))) => Ok(Genotype::new(
                        genotype.as_ref().iter().map(|allele| allele.position()).collect(),
                    )),
                    Some(Some(Value::String(value))) => parse_genotype(value, record_num),
                    Some(Some(other)) => Err(VcfParseError::InvalidGenotype {
                        record: record_num,
                        value: format!("{:?}", other),
                    }),
                    // No GT key in FORMAT, or the GT value itself is missing
                    Some(None) | None => Ok(Genotype::default()),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((
            CallRecord {
                chrom,
                pos,
                ref_allele: record.reference_bases().to_string(),
                alt_allele: alts.first().cloned().unwrap_or_default(),
            },
            genotypes,
        ))
    }
}

/// Parse a GT value such as "0/1", "1|0", "./." or "1"
pub fn parse_genotype(value: &str, record_num: usize) -> Result<Genotype, VcfParseError> {
    let alleles = value
        .split(['/', '|'])
        .map(|allele| match allele {
            "." => Ok(None),
            index => index.parse::<usize>().map(Some).map_err(|_| VcfParseError::InvalidGenotype {
                record: record_num,
                value: value.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Genotype::new(alleles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const HEADER: &str = "\
##fileformat=VCFv4.2
##contig=<ID=chrom1>
##contig=<ID=chr1>
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read depth\">
";

    const VCF: &str = "\
##fileformat=VCFv4.2
##contig=<ID=chrom1>
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read depth\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tsample1\tsample2
chrom1\t150\t.\tA\tT\t.\tPASS\t.\tGT:DP\t0/1:12\t0|0:9
chrom1\t170\trs1\tC\tG\t.\tPASS\t.\tGT\t./.\t.|1
";

    fn with_header(columns_and_records: &str) -> String {
        format!("{}{}", HEADER, columns_and_records)
    }

    #[test]
    fn test_parse_samples_sites_and_calls() {
        let mut reader = VcfGenotypeReader::new();
        let set = reader.parse_reader(VCF.as_bytes()).unwrap();

        assert_eq!(set.samples, vec!["sample1", "sample2"]);
        assert_eq!(set.variants.len(), 2);
        assert_eq!(reader.record_count, 2);

        assert_eq!(set.variants[0].chrom, "chrom1");
        assert_eq!(set.variants[0].pos, 150);
        assert_eq!(set.variants[0].ref_allele, "A");
        assert_eq!(set.variants[0].alt_allele, "T");
        assert_eq!(set.variants[1].pos, 170);

        assert_eq!(set.calls[0][0], Genotype::called(&[0, 1]));
        assert_eq!(set.calls[0][1], Genotype::called(&[0, 0]));
        assert_eq!(set.calls[1][0], Genotype::new(vec![None, None]));
        assert_eq!(set.calls[1][1], Genotype::new(vec![None, Some(1)]));
    }

    #[test]
    fn test_parse_gzipped_file() {
        let file = tempfile::Builder::new().suffix(".vcf.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
        encoder.write_all(VCF.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let set = VcfGenotypeReader::new().parse(file.path()).unwrap();
        assert_eq!(set.variants.len(), 2);
        assert_eq!(set.samples.len(), 2);
        assert_eq!(set.calls[0][0], Genotype::called(&[0, 1]));
    }

    #[test]
    fn test_multi_allelic_alt_is_fatal() {
        let contents = with_header(
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\n\
             chr1\t90\t.\tG\tC\t.\t.\t.\tGT\t0/1\n\
             chr1\t100\t.\tA\tT,G\t.\t.\t.\tGT\t0/2\n",
        );
        match VcfGenotypeReader::new().parse_reader(contents.as_bytes()) {
            Err(VcfParseError::MultiAllelic { record, chrom, pos, alt }) => {
                assert_eq!(record, 2);
                assert_eq!(chrom, "chr1");
                assert_eq!(pos, 100);
                assert_eq!(alt, "T,G");
            }
            other => panic!("Expected MultiAllelic error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_alt_reads_as_empty() {
        let contents = with_header(
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\n\
             chr1\t100\t.\tA\t.\t.\t.\t.\tGT\t0/0\n",
        );
        let set = VcfGenotypeReader::new().parse_reader(contents.as_bytes()).unwrap();
        assert_eq!(set.variants[0].alt_allele, "");
        assert_eq!(set.calls[0][0], Genotype::called(&[0, 0]));
    }

    #[test]
    fn test_missing_gt_key_yields_missing_calls() {
        let contents = with_header(
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\n\
             chr1\t100\t.\tA\tT\t.\t.\t.\tDP\t9\n",
        );
        let set = VcfGenotypeReader::new().parse_reader(contents.as_bytes()).unwrap();
        assert_eq!(set.calls[0][0], Genotype::default());
        assert!(!set.calls[0][0].carries(0));
    }

    #[test]
    fn test_sample_count_mismatch() {
        let contents = with_header(
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\ts2\n\
             chr1\t100\t.\tA\tT\t.\t.\t.\tGT\t0/1\n",
        );
        assert!(matches!(
            VcfGenotypeReader::new().parse_reader(contents.as_bytes()),
            Err(VcfParseError::RecordError { record: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            VcfGenotypeReader::new().parse("/nonexistent/calls.vcf.gz"),
            Err(VcfParseError::FileOpenError(_))
        ));
    }

    #[test]
    fn test_parse_genotype_values() {
        assert_eq!(parse_genotype("1", 1).unwrap(), Genotype::called(&[1]));
        assert_eq!(parse_genotype("1|0", 1).unwrap(), Genotype::called(&[1, 0]));
        assert_eq!(parse_genotype("./1", 1).unwrap(), Genotype::new(vec![None, Some(1)]));
        assert!(matches!(
            parse_genotype("0/x", 7),
            Err(VcfParseError::InvalidGenotype { record: 7, .. })
        ));
    }
}
