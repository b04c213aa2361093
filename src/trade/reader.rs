use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::csv::reader::{Format, ReaderBuilder};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use crate::{artifact_path_for, Error, Result};

/// Reads the first data row of an analysis output table.
///
/// Returns the requested `fields` as floats. Integer columns are widened,
/// and `NA`, `NaN` and empty cells read as NaN. R's `Inf`/`-Inf` read as
/// infinities; like NaN they have no JSON number form and are written as
/// `null` in responses. A table without data rows
/// or without one of the fields is an error. Extra rows are ignored with a
/// warning.
pub fn read_result_row(path: &Path, fields: &[&str]) -> Result<HashMap<String, f64>> {
    let batch = read_first_batch(path)?;

    fields
        .iter()
        .map(|name| Ok((name.to_string(), first_value(&batch, name)?)))
        .collect()
}

fn read_first_batch(path: &Path) -> Result<RecordBatch> {
    let mut file = File::open(path).map_err(|e| {
        Error::OutputShape(format!("output table {:?} could not be opened: {}", path, e))
    })?;

    let format = Format::default().with_header(true);
    let (schema, _) = format
        .infer_schema(&mut file, None)
        .map_err(|e| Error::OutputShape(format!("output table {:?} is not valid CSV: {}", path, e)))?;
    file.rewind()?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .build(file)
        .map_err(|e| Error::OutputShape(format!("output table {:?} is not valid CSV: {}", path, e)))?;

    let mut first: Option<RecordBatch> = None;
    let mut total_rows = 0;
    for batch_result in reader {
        let batch = batch_result.map_err(|e| {
            Error::OutputShape(format!("failed to read output table {:?}: {}", path, e))
        })?;
        total_rows += batch.num_rows();
        if first.is_none() && batch.num_rows() > 0 {
            first = Some(batch);
        }
    }

    let batch = first
        .ok_or_else(|| Error::OutputShape(format!("output table {:?} has no data rows", path)))?;

    if total_rows > 1 {
        warn!(
            "Output table {:?} has {} rows; only the first is used",
            path, total_rows
        );
    }

    debug!("Read output table {:?} with columns {:?}", path, column_names(&batch));
    Ok(batch)
}

fn first_value(batch: &RecordBatch, name: &str) -> Result<f64> {
    let idx = batch.schema().index_of(name).map_err(|_| {
        Error::OutputShape(format!("output is missing required field {}", name))
    })?;

    let column = batch.column(idx);
    if column.is_null(0) {
        return Ok(f64::NAN);
    }

    match column.data_type() {
        DataType::Float64 => column
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|arr| arr.value(0))
            .ok_or_else(|| cast_error(name, "Float64Array")),
        DataType::Int64 => column
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(0) as f64)
            .ok_or_else(|| cast_error(name, "Int64Array")),
        DataType::Utf8 => {
            let raw = column
                .as_any()
                .downcast_ref::<StringArray>()
                .map(|arr| arr.value(0))
                .ok_or_else(|| cast_error(name, "StringArray"))?;
            parse_numeric(raw).ok_or_else(|| {
                Error::OutputShape(format!("field {} is not numeric: {:?}", name, raw))
            })
        }
        DataType::Null => Ok(f64::NAN),
        other => Err(Error::OutputShape(format!(
            "field {} has unexpected type {:?}",
            name, other
        ))),
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    match raw.trim() {
        "" | "NA" | "NaN" => Some(f64::NAN),
        value => value.parse::<f64>().ok(),
    }
}

fn cast_error(name: &str, array: &str) -> Error {
    Error::OutputShape(format!("failed to cast {} as {}", name, array))
}

fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect()
}

/// Path of the companion artifact for `output_path`, which must exist.
pub fn locate_artifact(output_path: &Path) -> Result<PathBuf> {
    let artifact = artifact_path_for(output_path);
    if !artifact.is_file() {
        return Err(Error::OutputShape(format!(
            "result artifact {:?} was not written",
            artifact
        )));
    }
    Ok(artifact)
}

/// Deletes a temporary output table. A file that is already gone is fine.
pub fn remove_output(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed temporary output {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
