//! Workbook generation for derived sets. Every output is a single-column sheet
//! with a fixed header label, delivered as an in-memory `.xlsx` buffer plus the
//! file name the download should carry.

use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::constants::export::{
    CHUNK_SHEET_PREFIX, CLEANED_FILE_NAME, COMPARED_FILE_NAME, LABEL_COMMON, LABEL_PHONE,
    LABEL_UNIQUE_DIFF, LABEL_UNIQUE_FILE1, LABEL_UNIQUE_FILE2, SHEET_CLEANED, SHEET_UNIQUE,
    UNIQUE_FALLBACK_FILE_NAME,
};
use crate::errors::SiftError;
use crate::reconcile::CompareSets;
use crate::types::RawCell;

/// A generated download: file name plus workbook bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    /// File name the download should carry.
    pub name: String,
    /// Complete `.xlsx` workbook buffer.
    pub bytes: Vec<u8>,
}

/// One split chunk as `{prefix}_{index}.xlsx` (1-based), sheet `Chunk_{index}`,
/// header `Phone`.
pub fn chunk_workbook(prefix: &str, index: usize, rows: &[RawCell]) -> Result<OutputFile, SiftError> {
    let mut workbook = Workbook::new();
    let sheet_name = format!("{CHUNK_SHEET_PREFIX}{index}");
    write_column(&mut workbook, &sheet_name, LABEL_PHONE, rows)?;
    let bytes = save_buffer(workbook)?;
    let name = format!("{prefix}_{index}.xlsx");
    debug!("[numsift:export] chunk {} -> {} ({} rows)", index, name, rows.len());
    Ok(OutputFile { name, bytes })
}

/// Cleaned phone numbers as `CleanedEthiopianPhones.xlsx`, sheet `Cleaned`,
/// header `Phone`.
pub fn cleaned_workbook(numbers: &[String]) -> Result<OutputFile, SiftError> {
    let mut workbook = Workbook::new();
    write_column(&mut workbook, SHEET_CLEANED, LABEL_PHONE, numbers)?;
    Ok(OutputFile {
        name: CLEANED_FILE_NAME.to_string(),
        bytes: save_buffer(workbook)?,
    })
}

/// Unique-diff result named `{base2}_minus_{base1}_unique.xlsx` from the two input
/// file names (extensions stripped), or `unique-records.xlsx` when either name is
/// missing.
pub fn unique_workbook(
    primary_name: &str,
    compare_name: &str,
    rows: &[RawCell],
) -> Result<OutputFile, SiftError> {
    let mut workbook = Workbook::new();
    write_column(&mut workbook, SHEET_UNIQUE, LABEL_UNIQUE_DIFF, rows)?;

    let base_primary = base_name(primary_name);
    let base_compare = base_name(compare_name);
    let name = if base_primary.is_empty() || base_compare.is_empty() {
        UNIQUE_FALLBACK_FILE_NAME.to_string()
    } else {
        format!("{base_compare}_minus_{base_primary}_unique.xlsx")
    };
    Ok(OutputFile {
        name,
        bytes: save_buffer(workbook)?,
    })
}

/// Three-way comparison result as `ComparedPhones.xlsx` with `Common`,
/// `UniqueInFile1`, and `UniqueInFile2` sheets.
pub fn compared_workbook(sets: &CompareSets) -> Result<OutputFile, SiftError> {
    let mut workbook = Workbook::new();
    write_column(&mut workbook, LABEL_COMMON, LABEL_COMMON, &sets.common)?;
    write_column(
        &mut workbook,
        LABEL_UNIQUE_FILE1,
        LABEL_UNIQUE_FILE1,
        &sets.unique_to_a,
    )?;
    write_column(
        &mut workbook,
        LABEL_UNIQUE_FILE2,
        LABEL_UNIQUE_FILE2,
        &sets.unique_to_b,
    )?;
    Ok(OutputFile {
        name: COMPARED_FILE_NAME.to_string(),
        bytes: save_buffer(workbook)?,
    })
}

fn write_column(
    workbook: &mut Workbook,
    sheet_name: &str,
    header: &str,
    rows: &[String],
) -> Result<(), SiftError> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|err| SiftError::Export(err.to_string()))?;
    worksheet
        .write_string(0, 0, header)
        .map_err(|err| SiftError::Export(err.to_string()))?;
    for (index, value) in rows.iter().enumerate() {
        worksheet
            .write_string(index as u32 + 1, 0, value)
            .map_err(|err| SiftError::Export(err.to_string()))?;
    }
    Ok(())
}

fn save_buffer(mut workbook: Workbook) -> Result<Vec<u8>, SiftError> {
    workbook
        .save_to_buffer()
        .map_err(|err| SiftError::Export(err.to_string()))
}

/// File name with its final extension stripped, mirroring how the generated
/// unique-diff name is assembled from the upload names.
fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(index) => &file_name[..index],
    }
}
