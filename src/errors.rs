use std::io;

use thiserror::Error;

/// Error type for ingest, reconciliation, export, and remote-draw failures.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error(transparent)]
    FileRead(#[from] io::Error),
    #[error("unsupported file type for '{file_name}': upload a CSV or Excel file")]
    UnsupportedFileType { file_name: String },
    #[error("unable to auto-detect the column delimiter; select one explicitly")]
    UnrecognizedDelimiter,
    #[error("workbook contains no sheets")]
    EmptyWorkbook,
    #[error("no readable worksheet found in the workbook")]
    NoWorksheet,
    #[error("malformed tabular data: {0}")]
    Parse(String),
    #[error("no valid rows found after filtering")]
    EmptyInput,
    #[error("chunk size must be a positive number of rows (got {given})")]
    InvalidChunkSize { given: usize },
    #[error("workbook export failed: {0}")]
    Export(String),
    #[error("draw service unreachable: {0}")]
    Network(String),
    #[error("draw service rejected the request: {message}")]
    RemoteRejection { message: String },
    #[error("participant store failure: {0}")]
    Store(String),
}
