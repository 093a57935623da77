//! End-to-end tool pipelines: ingest -> canonicalize -> reconcile -> export.
//!
//! Each pipeline is a pure function over the uploaded bytes; none of them keeps
//! state between invocations, so a new upload simply replaces whatever a previous
//! run produced.

use tracing::{debug, info};

use crate::canonical::extract_phones;
use crate::config::{DiffOptions, SplitOptions};
use crate::errors::SiftError;
use crate::export::{
    OutputFile, chunk_workbook, cleaned_workbook, compared_workbook, unique_workbook,
};
use crate::ingest::{FileKind, ingest_cell_texts, ingest_values};
use crate::reconcile::{
    CompareSets, DiffProgress, canonicalize_records, compare, diff, primary_set, split_chunks,
};
use crate::types::RawCell;

/// Split an uploaded list into chunk workbooks of at most `chunk_size` rows each.
///
/// Chunk files are handed to `sink` one at a time, in order; a failure while
/// building or delivering a later chunk leaves the earlier deliveries untouched,
/// matching how triggered downloads cannot be recalled. Returns the number of
/// chunks delivered.
pub fn split_file<S>(
    bytes: &[u8],
    file_name: &str,
    options: &SplitOptions,
    mut sink: S,
) -> Result<usize, SiftError>
where
    S: FnMut(OutputFile) -> Result<(), SiftError>,
{
    // Option validation happens before any parsing starts.
    if options.chunk_size == 0 {
        return Err(SiftError::InvalidChunkSize { given: options.chunk_size });
    }

    let kind = FileKind::from_name(file_name)?;
    let rows = ingest_values(bytes, kind, options.delimiter)?;
    if rows.is_empty() {
        return Err(SiftError::EmptyInput);
    }

    let chunks = split_chunks(&rows, options.chunk_size)?;
    for (index, chunk) in chunks.iter().enumerate() {
        let file = chunk_workbook(&options.prefix, index + 1, chunk)?;
        sink(file)?;
    }
    info!(
        "[numsift:pipeline] split '{}' into {} chunk files",
        file_name,
        chunks.len()
    );
    Ok(chunks.len())
}

/// Result of the clean-numbers pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanOutcome {
    /// Canonical emitted forms, deduplicated and sorted ascending.
    pub numbers: Vec<String>,
    /// The cleaned-numbers workbook.
    pub file: OutputFile,
}

/// Scan every cell of an upload for phone numbers and emit the cleaned workbook.
pub fn clean_file(bytes: &[u8], file_name: &str) -> Result<CleanOutcome, SiftError> {
    let kind = FileKind::from_name(file_name)?;
    let cells = ingest_cell_texts(bytes, kind, Default::default())?;
    if cells.is_empty() {
        return Err(SiftError::EmptyInput);
    }

    let mut numbers = extract_phones(&cells);
    numbers.sort();
    debug!(
        "[numsift:pipeline] cleaned '{}': {} numbers from {} cells",
        file_name,
        numbers.len(),
        cells.len()
    );
    let file = cleaned_workbook(&numbers)?;
    Ok(CleanOutcome { numbers, file })
}

/// Result of the unique-diff pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffOutcome {
    /// Original comparison-file values absent from the baseline, in input order.
    pub unique: Vec<RawCell>,
    /// Distinct canonical keys loaded from the baseline file.
    pub primary_count: usize,
    /// Records loaded from the comparison file.
    pub compare_count: usize,
    /// The unique-records workbook.
    pub file: OutputFile,
}

/// Find every number present in the comparison file but absent from the baseline
/// file. `on_progress` fires between diff batches; see
/// [`diff`](crate::reconcile::diff) for the batching contract.
pub fn unique_diff<F>(
    primary_bytes: &[u8],
    primary_name: &str,
    compare_bytes: &[u8],
    compare_name: &str,
    options: &DiffOptions,
    on_progress: F,
) -> Result<DiffOutcome, SiftError>
where
    F: FnMut(DiffProgress),
{
    let primary_kind = FileKind::from_name(primary_name)?;
    let primary_rows = ingest_values(primary_bytes, primary_kind, options.delimiter)?;
    if primary_rows.is_empty() {
        return Err(SiftError::EmptyInput);
    }
    let primary = primary_set(&primary_rows);
    info!(
        "[numsift:pipeline] baseline '{}': {} distinct keys",
        primary_name,
        primary.len()
    );

    let compare_kind = FileKind::from_name(compare_name)?;
    let compare_rows = ingest_values(compare_bytes, compare_kind, options.delimiter)?;
    if compare_rows.is_empty() {
        return Err(SiftError::EmptyInput);
    }
    let comparison = canonicalize_records(compare_rows);

    let unique = diff(&primary, &comparison, options.batch_rows, on_progress)?;
    let file = unique_workbook(primary_name, compare_name, &unique)?;
    Ok(DiffOutcome {
        primary_count: primary.len(),
        compare_count: comparison.len(),
        unique,
        file,
    })
}

/// Result of the three-way comparison pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompareOutcome {
    /// Common/unique partition of the two files.
    pub sets: CompareSets,
    /// The comparison workbook.
    pub file: OutputFile,
}

/// Extract phone numbers from two uploads and partition them into common and
/// per-file unique sets by their last-digit suffix.
pub fn compare_files(
    a_bytes: &[u8],
    a_name: &str,
    b_bytes: &[u8],
    b_name: &str,
) -> Result<CompareOutcome, SiftError> {
    let a_cells = ingest_cell_texts(a_bytes, FileKind::from_name(a_name)?, Default::default())?;
    let b_cells = ingest_cell_texts(b_bytes, FileKind::from_name(b_name)?, Default::default())?;
    if a_cells.is_empty() || b_cells.is_empty() {
        return Err(SiftError::EmptyInput);
    }

    let phones_a = extract_phones(&a_cells);
    let phones_b = extract_phones(&b_cells);
    let sets = compare(&phones_a, &phones_b);
    let file = compared_workbook(&sets)?;
    Ok(CompareOutcome { sets, file })
}
