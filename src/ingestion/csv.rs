//! CSV loading into an untyped [`RawTable`].

use std::path::Path;

use crate::error::PipelineResult;
use crate::types::{RawTable, Value};

/// Load a CSV file into an in-memory [`RawTable`].
///
/// Rules:
///
/// - The first line is the header.
/// - Every row must have as many fields as the header.
/// - Every cell is kept as [`Value::Utf8`] with its text unchanged; typing happens in
///   validation. No column is required at this stage.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> PipelineResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> PipelineResult<RawTable> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|raw| Value::Utf8(raw.to_owned())).collect());
    }

    Ok(RawTable::new(headers, rows))
}
