use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// IdSet – membership set for instances or parameter settings
// ---------------------------------------------------------------------------

/// Set of identifiers a result row must match.
/// `BTreeSet` so that logged sets come out sorted.
pub type IdSet = BTreeSet<String>;

/// Delimiter used by every table this tool reads.
pub const FIELD_DELIMITER: u8 = b',';

/// Header written ahead of filtered rows by the `mip` and `rcpsp` presets.
pub const RESULTS_HEADER: &str = "instance,algsetting,result";

// ---------------------------------------------------------------------------
// IdColumn – how a source line becomes a set element
// ---------------------------------------------------------------------------

/// Which part of each line is taken as the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdColumn {
    /// First field of a delimited record (features tables).
    FirstField { delimiter: u8 },
    /// The whole line, trimmed (parameter lists).
    WholeLine,
}

impl Default for IdColumn {
    fn default() -> Self {
        IdColumn::FirstField {
            delimiter: FIELD_DELIMITER,
        }
    }
}

// ---------------------------------------------------------------------------
// ResultRow – one borrowed line of a results table
// ---------------------------------------------------------------------------

/// A results line split into its leading identifiers.
///
/// `raw` is the line exactly as read, terminator included; that is what
/// gets written when the row is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRow<'a> {
    pub instance: &'a str,
    /// `None` when the line has no second field.
    pub setting: Option<&'a str>,
    pub raw: &'a str,
}

impl<'a> ResultRow<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut fields = raw.trim_end().split(char::from(FIELD_DELIMITER));
        // `split` always yields at least one item.
        let instance = fields.next().unwrap_or_default();
        let setting = fields.next();
        ResultRow {
            instance,
            setting,
            raw,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterStats – per-run counters
// ---------------------------------------------------------------------------

/// Counters reported after a filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows dropped because the instance was not in the instance set.
    pub unknown_instance: usize,
    /// Rows dropped because the setting was not in the parameter set.
    pub unknown_param: usize,
}

impl FilterStats {
    pub fn rows_dropped(&self) -> usize {
        self.unknown_instance + self.unknown_param
    }

    /// Fold another run's counters into this one.
    pub fn absorb(&mut self, other: &FilterStats) {
        self.rows_read += other.rows_read;
        self.rows_kept += other.rows_kept;
        self.unknown_instance += other.unknown_instance;
        self.unknown_param += other.unknown_param;
    }
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} rows kept ({} unknown instance, {} unknown setting)",
            self.rows_kept, self.rows_read, self.unknown_instance, self.unknown_param
        )
    }
}
