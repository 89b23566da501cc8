use std::io::{BufRead, Write};

use log::{debug, warn};

use super::lines::RawLines;
use super::model::{FilterStats, IdSet, ResultRow};
use crate::error::{FilterError, Result};

// ---------------------------------------------------------------------------
// Row filter: keep result rows whose instance and setting are both known
// ---------------------------------------------------------------------------

/// Copy rows of `source` into `sink` when field 0 is in `instances` and
/// field 1 is in `params`.
///
/// * `header`, when given, is written first followed by `\n`, whether or
///   not any row matches.
/// * Rows end at `\n`, `\r\n` or a lone `\r`. Kept rows are written
///   exactly as read, terminator included, in input order.
/// * Rows that fail either test are dropped silently. The instance is
///   tested first; a row with a known instance but no second field is
///   [`FilterError::MalformedRow`].
///
/// The sink is flushed before returning.
pub fn filter_rows<R, W>(
    instances: &IdSet,
    params: &IdSet,
    source: R,
    mut sink: W,
    header: Option<&str>,
) -> Result<FilterStats>
where
    R: BufRead,
    W: Write,
{
    if instances.is_empty() || params.is_empty() {
        warn!(
            "{} set is empty; no result row can be kept",
            if instances.is_empty() { "instance" } else { "parameter" }
        );
    }

    if let Some(header) = header {
        sink.write_all(header.as_bytes())?;
        sink.write_all(b"\n")?;
    }

    let mut stats = FilterStats::default();
    let mut lines = RawLines::new(source);
    while let Some(line) = lines.next_line()? {
        stats.rows_read += 1;

        let row = ResultRow::parse(line);
        if !instances.contains(row.instance) {
            stats.unknown_instance += 1;
            continue;
        }
        let Some(setting) = row.setting else {
            return Err(FilterError::MalformedRow {
                line: stats.rows_read,
                content: row.raw.trim_end().to_string(),
            });
        };
        if !params.contains(setting) {
            stats.unknown_param += 1;
            continue;
        }

        sink.write_all(row.raw.as_bytes())?;
        stats.rows_kept += 1;
    }
    sink.flush()?;

    debug!("filtered: {stats}");
    Ok(stats)
}
