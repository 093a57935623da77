use crate::constants::export::DEFAULT_CHUNK_PREFIX;
use crate::constants::reconcile::{DEFAULT_DIFF_BATCH_ROWS, DEFAULT_SPLIT_CHUNK_ROWS};

/// Column delimiter selection for delimited-text uploads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DelimiterChoice {
    /// Sniff the delimiter from a sample of lines.
    #[default]
    Auto,
    /// Comma (`,`).
    Comma,
    /// Semicolon (`;`).
    Semicolon,
    /// Tab (`\t`).
    Tab,
    /// Pipe (`|`).
    Pipe,
}

impl DelimiterChoice {
    /// Concrete delimiter byte, or `None` for [`DelimiterChoice::Auto`].
    pub fn as_byte(self) -> Option<u8> {
        match self {
            DelimiterChoice::Auto => None,
            DelimiterChoice::Comma => Some(b','),
            DelimiterChoice::Semicolon => Some(b';'),
            DelimiterChoice::Tab => Some(b'\t'),
            DelimiterChoice::Pipe => Some(b'|'),
        }
    }

    /// Parse the option labels offered at the upload boundary
    /// (`auto`, `,`, `;`, `\t`, `|`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "auto" => Some(DelimiterChoice::Auto),
            "," => Some(DelimiterChoice::Comma),
            ";" => Some(DelimiterChoice::Semicolon),
            "\t" => Some(DelimiterChoice::Tab),
            "|" => Some(DelimiterChoice::Pipe),
            _ => None,
        }
    }
}

/// Options for the split-into-chunks pipeline.
#[derive(Clone, Debug)]
pub struct SplitOptions {
    /// Maximum rows per output chunk; must be positive.
    pub chunk_size: usize,
    /// File-name prefix for generated chunk files (`{prefix}_{index}.xlsx`).
    pub prefix: String,
    /// Delimiter selection applied to delimited-text uploads.
    pub delimiter: DelimiterChoice,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_SPLIT_CHUNK_ROWS,
            prefix: DEFAULT_CHUNK_PREFIX.to_string(),
            delimiter: DelimiterChoice::Auto,
        }
    }
}

/// Options for the unique-diff pipeline.
#[derive(Clone, Debug)]
pub struct DiffOptions {
    /// Comparison records processed per batch between progress callbacks.
    pub batch_rows: usize,
    /// Delimiter selection applied to delimited-text uploads.
    pub delimiter: DelimiterChoice,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            batch_rows: DEFAULT_DIFF_BATCH_ROWS,
            delimiter: DelimiterChoice::Auto,
        }
    }
}
