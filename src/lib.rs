#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Phone-number normalization and free-text extraction.
pub mod canonical;
/// Pipeline option types.
pub mod config;
/// Centralized constants used across ingest, reconcile, export, and persistence.
pub mod constants;
/// Remote draw-service client.
pub mod draw;
/// Workbook generation for derived sets.
pub mod export;
/// Tabular ingest of CSV and Excel uploads.
pub mod ingest;
/// End-to-end tool pipelines.
pub mod pipeline;
/// Set reconciliation: splits, diffs, and three-way comparisons.
pub mod reconcile;
/// Per-tool interface state machine.
pub mod session;
/// Participant-list persistence.
pub mod store;
/// Shared type aliases.
pub mod types;

mod errors;

pub use canonical::{extract_phones, loose_canonical, strict_normalize, suffix_key};
pub use config::{DelimiterChoice, DiffOptions, SplitOptions};
pub use draw::{DrawRequest, DrawWinner, draw_winner, draw_winner_for};
pub use errors::SiftError;
pub use export::OutputFile;
pub use ingest::{FileKind, ingest_cell_texts, ingest_values};
pub use pipeline::{
    CleanOutcome, CompareOutcome, DiffOutcome, clean_file, compare_files, split_file, unique_diff,
};
pub use reconcile::{
    CompareSets, DiffProgress, ValueRecord, canonicalize_records, compare, diff, primary_set,
    split_chunks,
};
pub use session::{ToolEvent, ToolPhase, ToolState, reduce};
pub use store::LastDrawStore;
pub use types::{CanonicalKey, RawCell, SuffixKey};
