use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use super::lines::{skip_line, RawLines};
use super::model::{IdColumn, IdSet, FIELD_DELIMITER};
use crate::error::{FilterError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Instance identifiers: first column of a features table, header skipped.
pub fn load_instance_set(path: &Path) -> Result<IdSet> {
    load_id_set(
        path,
        true,
        IdColumn::FirstField {
            delimiter: FIELD_DELIMITER,
        },
    )
}

/// Parameter-setting identifiers: one per line, no header.
pub fn load_param_set(path: &Path) -> Result<IdSet> {
    load_id_set(path, false, IdColumn::WholeLine)
}

/// Open `path` and build an [`IdSet`] from it. The file is closed before
/// this returns, on success or failure.
pub fn load_id_set(path: &Path, skip_header: bool, column: IdColumn) -> Result<IdSet> {
    let file = File::open(path).map_err(|e| FilterError::io(e).at_path(path))?;
    let ids = build_id_set(file, skip_header, column).map_err(|e| e.at_path(path))?;
    debug!("{}: {} identifiers", path.display(), ids.len());
    Ok(ids)
}

/// Collect identifiers from `source`.
///
/// With `skip_header` the first physical line is dropped, even when it is
/// blank. Duplicates collapse, and an empty source gives an empty set.
pub fn build_id_set<R: Read>(source: R, skip_header: bool, column: IdColumn) -> Result<IdSet> {
    match column {
        IdColumn::FirstField { delimiter } => first_field_ids(source, skip_header, delimiter),
        IdColumn::WholeLine => whole_line_ids(source, skip_header),
    }
}

// ---------------------------------------------------------------------------
// Features tables
// ---------------------------------------------------------------------------

/// No quoting: a `"` is an ordinary character, as in the tables this reads.
/// Records may have any number of fields; only the first is used.
/// Blank lines after the header are ignored.
fn first_field_ids<R: Read>(source: R, skip_header: bool, delimiter: u8) -> Result<IdSet> {
    // The csv reader would pick the first non-blank line as header.
    let mut source = BufReader::new(source);
    if skip_header {
        skip_line(&mut source)?;
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true)
        .from_reader(source);

    let mut ids = IdSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(first) = record.get(0) {
            ids.insert(first.to_string());
        }
    }
    Ok(ids)
}

// ---------------------------------------------------------------------------
// Parameter lists
// ---------------------------------------------------------------------------

fn whole_line_ids<R: Read>(source: R, skip_header: bool) -> Result<IdSet> {
    let mut source = BufReader::new(source);
    if skip_header {
        skip_line(&mut source)?;
    }

    let mut ids = IdSet::new();
    let mut lines = RawLines::new(source);
    while let Some(line) = lines.next_line()? {
        let id = line.trim();
        if id.is_empty() {
            continue;
        }
        ids.insert(id.to_string());
    }
    Ok(ids)
}
