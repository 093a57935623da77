//! Set reconciliation over canonicalized collections: ordered splitting into
//! bounded chunks, unique-diff of a comparison list against a primary set, and the
//! three-way common/unique partition keyed by last-digit suffixes.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::canonical::{loose_canonical, suffix_key};
use crate::errors::SiftError;
use crate::types::{CanonicalKey, RawCell, SuffixKey};

/// An original value paired with its matching key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueRecord {
    /// Value exactly as extracted, preserved for output.
    pub original: RawCell,
    /// Loose canonical key used for membership tests.
    pub canonical: CanonicalKey,
}

/// Pair each extracted value with its loose canonical key, preserving order.
pub fn canonicalize_records(values: Vec<RawCell>) -> Vec<ValueRecord> {
    values
        .into_iter()
        .map(|original| {
            let canonical = loose_canonical(&original);
            ValueRecord { original, canonical }
        })
        .collect()
}

/// Build the membership set for a baseline file. Set semantics: a canonical key
/// appears once no matter how many raw values mapped to it.
pub fn primary_set(values: &[RawCell]) -> HashSet<CanonicalKey> {
    values.iter().map(|value| loose_canonical(value)).collect()
}

/// Partition rows strictly in order into chunks of at most `chunk_size`; the final
/// chunk may be shorter. No row is dropped, reordered, or duplicated.
pub fn split_chunks(rows: &[RawCell], chunk_size: usize) -> Result<Vec<Vec<RawCell>>, SiftError> {
    if chunk_size == 0 {
        return Err(SiftError::InvalidChunkSize { given: chunk_size });
    }
    let chunks: Vec<Vec<RawCell>> = rows.chunks(chunk_size).map(<[RawCell]>::to_vec).collect();
    debug!(
        "[numsift:reconcile] split {} rows into {} chunks of <= {}",
        rows.len(),
        chunks.len(),
        chunk_size
    );
    Ok(chunks)
}

/// Progress snapshot emitted between diff batches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffProgress {
    /// 1-based index of the batch just finished.
    pub batch: usize,
    /// Total number of batches for this run.
    pub total_batches: usize,
    /// Unique records found so far.
    pub emitted: usize,
}

/// Collect the originals from `comparison`, in order, whose canonical key is absent
/// from `primary` and has not been emitted yet.
///
/// The list is walked in bounded batches with `on_progress` invoked after each one;
/// that callback is the cooperative yield point for callers hosting this on an
/// event loop. Batch size never changes the result, only the callback cadence.
pub fn diff<F>(
    primary: &HashSet<CanonicalKey>,
    comparison: &[ValueRecord],
    batch_rows: usize,
    mut on_progress: F,
) -> Result<Vec<RawCell>, SiftError>
where
    F: FnMut(DiffProgress),
{
    if batch_rows == 0 {
        return Err(SiftError::InvalidChunkSize { given: batch_rows });
    }

    let total_batches = comparison.len().div_ceil(batch_rows);
    let mut emitted: HashSet<CanonicalKey> = HashSet::new();
    let mut unique: Vec<RawCell> = Vec::new();

    for (index, batch) in comparison.chunks(batch_rows).enumerate() {
        for record in batch {
            if !primary.contains(&record.canonical) && !emitted.contains(&record.canonical) {
                emitted.insert(record.canonical.clone());
                unique.push(record.original.clone());
            }
        }
        on_progress(DiffProgress {
            batch: index + 1,
            total_batches,
            emitted: unique.len(),
        });
    }

    debug!(
        "[numsift:reconcile] diff kept {} of {} comparison records",
        unique.len(),
        comparison.len()
    );
    Ok(unique)
}

/// Result of the three-way comparison. Every input suffix lands in exactly one of
/// the three buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompareSets {
    /// Suffixes present in both files; the representative seen in file A is kept.
    pub common: Vec<String>,
    /// Values whose suffix appears only in file A.
    pub unique_to_a: Vec<String>,
    /// Values whose suffix appears only in file B.
    pub unique_to_b: Vec<String>,
}

/// Partition two canonicalized collections by their last-digit suffix key.
pub fn compare(a: &[String], b: &[String]) -> CompareSets {
    let map_a = suffix_map(a);
    let map_b = suffix_map(b);

    let mut sets = CompareSets::default();
    for (suffix, value) in &map_a {
        if map_b.contains_key(suffix) {
            sets.common.push((*value).clone());
        } else {
            sets.unique_to_a.push((*value).clone());
        }
    }
    for (suffix, value) in &map_b {
        if !map_a.contains_key(suffix) {
            sets.unique_to_b.push((*value).clone());
        }
    }
    debug!(
        "[numsift:reconcile] compare: {} common, {} only-A, {} only-B",
        sets.common.len(),
        sets.unique_to_a.len(),
        sets.unique_to_b.len()
    );
    sets
}

fn suffix_map(values: &[String]) -> IndexMap<SuffixKey, &String> {
    let mut map: IndexMap<SuffixKey, &String> = IndexMap::new();
    for value in values {
        map.entry(suffix_key(value)).or_insert(value);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(count: usize) -> Vec<RawCell> {
        (0..count).map(|index| format!("09{index:08}")).collect()
    }

    #[test]
    fn split_partitions_exactly() {
        let input = rows(250_000);
        let chunks = split_chunks(&input, 100_000).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(
            chunks.iter().map(Vec::len).collect::<Vec<_>>(),
            vec![100_000, 100_000, 50_000]
        );
        let rebuilt: Vec<RawCell> = chunks.into_iter().flatten().collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn split_chunk_count_is_ceiling() {
        assert_eq!(split_chunks(&rows(10), 3).unwrap().len(), 4);
        assert_eq!(split_chunks(&rows(9), 3).unwrap().len(), 3);
        assert_eq!(split_chunks(&rows(0), 3).unwrap().len(), 0);
    }

    #[test]
    fn split_rejects_zero_chunk_size() {
        assert!(matches!(
            split_chunks(&rows(5), 0),
            Err(SiftError::InvalidChunkSize { given: 0 })
        ));
    }

    #[test]
    fn diff_keeps_only_absent_keys_in_order() {
        let primary = primary_set(&["0911223344".to_string(), "+251922334455".to_string()]);
        let comparison = canonicalize_records(vec![
            "251911223344".to_string(),
            "933445566".to_string(),
            "0933445566".to_string(),
            "944556677".to_string(),
        ]);
        let unique = diff(&primary, &comparison, 200_000, |_| {}).unwrap();
        assert_eq!(unique, vec!["933445566", "944556677"]);
    }

    #[test]
    fn diff_result_is_bounded_and_disjoint_from_primary() {
        let primary = primary_set(&rows(50));
        let comparison = canonicalize_records(rows(80));
        let unique = diff(&primary, &comparison, 7, |_| {}).unwrap();
        assert!(unique.len() <= comparison.len());
        for value in &unique {
            assert!(!primary.contains(&loose_canonical(value)));
        }
    }

    #[test]
    fn diff_is_identical_across_batch_sizes() {
        let primary = primary_set(&rows(40));
        let comparison = canonicalize_records(rows(100));
        let expected = diff(&primary, &comparison, 1, |_| {}).unwrap();
        for batch_rows in [2, 3, 17, 100, 10_000] {
            assert_eq!(diff(&primary, &comparison, batch_rows, |_| {}).unwrap(), expected);
        }
    }

    #[test]
    fn diff_reports_progress_per_batch() {
        let primary = primary_set(&rows(0));
        let comparison = canonicalize_records(rows(10));
        let mut seen = Vec::new();
        diff(&primary, &comparison, 4, |progress| seen.push(progress)).unwrap();
        assert_eq!(
            seen,
            vec![
                DiffProgress { batch: 1, total_batches: 3, emitted: 4 },
                DiffProgress { batch: 2, total_batches: 3, emitted: 8 },
                DiffProgress { batch: 3, total_batches: 3, emitted: 10 },
            ]
        );
    }

    #[test]
    fn diff_rejects_zero_batch_size() {
        assert!(matches!(
            diff(&HashSet::new(), &[], 0, |_| {}),
            Err(SiftError::InvalidChunkSize { given: 0 })
        ));
    }

    #[test]
    fn compare_partitions_every_suffix_once() {
        let a = vec!["+251911223344".to_string(), "+251922334455".to_string()];
        let b = vec!["+251911223344".to_string(), "+251933445566".to_string()];
        let sets = compare(&a, &b);
        assert_eq!(sets.common, vec!["+251911223344"]);
        assert_eq!(sets.unique_to_a, vec!["+251922334455"]);
        assert_eq!(sets.unique_to_b, vec!["+251933445566"]);

        let total = sets.common.len() + sets.unique_to_a.len() + sets.unique_to_b.len();
        let mut suffixes: Vec<String> = sets
            .common
            .iter()
            .chain(&sets.unique_to_a)
            .chain(&sets.unique_to_b)
            .map(|value| suffix_key(value))
            .collect();
        suffixes.sort();
        suffixes.dedup();
        assert_eq!(suffixes.len(), total);
    }

    #[test]
    fn compare_prefers_the_a_side_representative() {
        let a = vec!["0911223344".to_string()];
        let b = vec!["+251911223344".to_string()];
        let sets = compare(&a, &b);
        assert_eq!(sets.common, vec!["0911223344"]);
        assert!(sets.unique_to_a.is_empty());
        assert!(sets.unique_to_b.is_empty());
    }
}
