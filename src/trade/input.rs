use arrow::csv::reader::Format;
use std::fs::File;
use std::path::Path;
use tracing::debug;
use crate::{ColumnNames, Error, Result};

// Rows sampled when inferring a header; only column names are checked.
const HEADER_SAMPLE_ROWS: usize = 16;

/// Checks that a results table exists and carries the configured columns.
pub fn check_results_table(path: &Path, columns: &ColumnNames) -> Result<()> {
    let file = open_regular_file(path)?;

    let (schema, _) = Format::default()
        .with_header(true)
        .infer_schema(file, Some(HEADER_SAMPLE_ROWS))
        .map_err(|e| Error::InvalidInput(format!("{:?} is not a readable CSV table: {}", path, e)))?;

    let missing: Vec<&str> = columns
        .as_array()
        .into_iter()
        .filter(|name| schema.index_of(name).is_err())
        .collect();

    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "{:?} is missing required column(s): {}",
            path,
            missing.join(", ")
        )));
    }

    debug!("Validated results table {:?} ({} columns)", path, schema.fields().len());
    Ok(())
}

/// Annotation tables are only checked for presence; their layout is left to TRADEtools.
pub fn check_annotation_table(path: &Path) -> Result<()> {
    open_regular_file(path).map(|_| ())
}

fn open_regular_file(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(Error::InvalidInput(format!(
            "{:?} does not exist or is not a regular file",
            path
        )));
    }
    File::open(path)
        .map_err(|e| Error::InvalidInput(format!("Cannot open {:?}: {}", path, e)))
}
