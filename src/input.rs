use crate::error::InputError;
use std::path::Path;

/// Read location names from one column of a CSV file.
///
/// The header match ignores case and a leading byte-order mark. Blank cells
/// are skipped; duplicates are kept since each row is its own request.
pub fn read_locations(path: &Path, column: &str) -> Result<Vec<String>, InputError> {
    let read_err = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_err)?;

    let headers = reader.headers().map_err(read_err)?.clone();
    let wanted = column.trim().to_lowercase();
    let position = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase() == wanted)
        .ok_or_else(|| InputError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let mut locations = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        if let Some(value) = record.get(position) {
            if !value.is_empty() {
                locations.push(value.to_string());
            }
        }
    }

    Ok(locations)
}
