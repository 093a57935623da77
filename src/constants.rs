/// Constants used by tabular ingest and header detection.
pub mod ingest {
    /// Lowercase substrings that mark the first row as a header row.
    pub const HEADER_HINTS: [&str; 4] = ["phone", "number", "ticket", "id"];
    /// Candidate delimiters tried during auto-detection, in preference order.
    pub const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
    /// Number of non-empty lines sampled when sniffing the delimiter.
    pub const SNIFF_SAMPLE_LINES: usize = 100;
    /// Byte cap on the sniffing sample so huge uploads are not scanned whole.
    pub const SNIFF_SAMPLE_BYTES: usize = 64 * 1024;
}

/// Constants used by phone-number canonicalization.
pub mod phone {
    /// Country calling code carried by the canonical emitted form.
    pub const COUNTRY_CODE: &str = "+251";
    /// First digit of the local mobile prefix; loose canonical keys start here.
    pub const CANONICAL_MARKER: char = '9';
    /// Length of the last-digits suffix key used by the three-way comparison.
    pub const SUFFIX_KEY_LEN: usize = 8;
}

/// Constants used by set reconciliation defaults.
pub mod reconcile {
    /// Default number of rows per split chunk.
    pub const DEFAULT_SPLIT_CHUNK_ROWS: usize = 100_000;
    /// Default number of comparison records processed per diff batch.
    pub const DEFAULT_DIFF_BATCH_ROWS: usize = 200_000;
}

/// Constants used by workbook export: header labels, sheet names, file names.
pub mod export {
    /// Header label for phone-list columns (splits and cleaned output).
    pub const LABEL_PHONE: &str = "Phone";
    /// Header label for the common sheet of the comparison workbook.
    pub const LABEL_COMMON: &str = "Common";
    /// Header label for the file-1-only sheet of the comparison workbook.
    pub const LABEL_UNIQUE_FILE1: &str = "UniqueInFile1";
    /// Header label for the file-2-only sheet of the comparison workbook.
    pub const LABEL_UNIQUE_FILE2: &str = "UniqueInFile2";
    /// Header label for the unique-diff result column.
    pub const LABEL_UNIQUE_DIFF: &str = "Unique Numbers (File 2 minus File 1)";
    /// Sheet name for cleaned phone numbers.
    pub const SHEET_CLEANED: &str = "Cleaned";
    /// Sheet name for the unique-diff result.
    pub const SHEET_UNIQUE: &str = "Unique";
    /// Sheet-name prefix for split chunks (`Chunk_1`, `Chunk_2`, ...).
    pub const CHUNK_SHEET_PREFIX: &str = "Chunk_";
    /// Default file-name prefix for split chunk files.
    pub const DEFAULT_CHUNK_PREFIX: &str = "Newchunk";
    /// File name for the cleaned-numbers workbook.
    pub const CLEANED_FILE_NAME: &str = "CleanedEthiopianPhones.xlsx";
    /// File name for the three-way comparison workbook.
    pub const COMPARED_FILE_NAME: &str = "ComparedPhones.xlsx";
    /// Fallback file name for the unique-diff workbook when input names are missing.
    pub const UNIQUE_FALLBACK_FILE_NAME: &str = "unique-records.xlsx";
}

/// Constants used by the remote draw client.
pub mod draw {
    /// Failure message used when the draw service gives no message of its own.
    pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to draw winner. Please try again.";
}

/// Constants used by participant-list persistence.
pub mod store {
    /// Fixed key under which the last participant list is remembered.
    pub const LAST_DRAW_KEY: &str = "lastDraw";
    /// Default directory for persisted participant lists.
    pub const DEFAULT_STORE_DIR: &str = ".numsift_store";
}
