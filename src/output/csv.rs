//! CSV serialization of [`Customer`] records.

use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::PipelineResult;
use crate::types::Customer;

/// Write `records` to a CSV file at `path`, replacing any existing file.
///
/// Rows go to a temporary file in the destination directory which is renamed over `path`
/// only after every row is flushed. On error `path` is left as it was.
///
/// The header row is always written, so an empty slice yields a header-only file.
pub fn write_customers_to_path(
    path: impl AsRef<Path>,
    records: &[Customer],
) -> PipelineResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(tmp);
    write_customers_to_writer(&mut wtr, records)?;

    let tmp = wtr.into_inner().map_err(|e| e.into_error())?;
    // Temp files are created owner-only; give the output ordinary file permissions.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write a header row plus one row per record to an existing CSV writer, then flush.
///
/// The writer must be built with `has_headers(false)`; the header comes from
/// [`Customer::schema`].
pub fn write_customers_to_writer<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    records: &[Customer],
) -> PipelineResult<()> {
    wtr.write_record(Customer::schema().field_names())?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
