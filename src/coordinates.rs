// ==============================================================================
// coordinates.rs - Coordinate Keys and Deduplication
// ==============================================================================
// Description: Builds `$chrom:$pos` keys and removes duplicate coordinates
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Key format:
//   "$" + chrom + ":$" + pos      e.g. chr1, 150  ->  "$chr1:$150"
//   pos is always the 1-based position. BED windows (0-based) are never
//   keyed; they are compared against FrequencyRecord::pos0 instead.
// ==============================================================================

use std::collections::HashSet;
use std::fmt;

/// Uniform `$chrom:$pos` key shared by the frequency and call tables
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey(String);

impl CoordKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the coordinate key for a 1-based position
pub fn coord_key(chrom: &str, pos: u64) -> CoordKey {
    CoordKey(format!("${}:${}", chrom, pos))
}

/// Indices of the first row for each distinct key, in original order
pub fn first_occurrences<T, F>(rows: &[T], key: F) -> Vec<usize>
where
    F: Fn(&T) -> CoordKey,
{
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .enumerate()
        .filter(|(_, row)| seen.insert(key(row)))
        .map(|(idx, _)| idx)
        .collect()
}

/// Keep the first row per distinct key, preserving order
pub fn dedup_by_key<T, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> CoordKey,
{
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        chrom: &'static str,
        pos: u64,
        tag: u32,
    }

    fn row(chrom: &'static str, pos: u64, tag: u32) -> Row {
        Row { chrom, pos, tag }
    }

    fn key(r: &Row) -> CoordKey {
        coord_key(r.chrom, r.pos)
    }

    #[test]
    fn test_key_format() {
        assert_eq!(coord_key("chr1", 150).as_str(), "$chr1:$150");
        assert_eq!(coord_key("22", 16050075).to_string(), "$22:$16050075");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let rows = vec![
            row("chr1", 10, 1),
            row("chr1", 20, 2),
            row("chr1", 10, 3),
            row("chr2", 10, 4),
            row("chr1", 20, 5),
        ];

        let deduped = dedup_by_key(rows, key);
        let tags: Vec<u32> = deduped.iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec![1, 2, 4]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let rows = vec![
            row("chr1", 10, 1),
            row("chr1", 10, 2),
            row("chr3", 5, 3),
        ];

        let once = dedup_by_key(rows, key);
        let twice = dedup_by_key(once.clone(), key);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_first_occurrences_indices() {
        let rows = vec![
            row("chr1", 10, 1),
            row("chr1", 10, 2),
            row("chr1", 11, 3),
        ];

        assert_eq!(first_occurrences(&rows, key), vec![0, 2]);
        assert!(first_occurrences::<Row, _>(&[], key).is_empty());
    }
}
