use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Everything that can stop a filter run.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Read or write failure. `path` is `None` for in-memory sources.
    #[error("I/O error{}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error{}: {source}", display_path(.path))]
    Csv {
        path: Option<PathBuf>,
        #[source]
        source: csv::Error,
    },

    /// A result row whose instance matched but which has no setting field.
    #[error("results line {line}: expected at least two fields, got {content:?}")]
    MalformedRow { line: usize, content: String },

    #[error("invalid job file '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in '{}'", p.display()),
        None => String::new(),
    }
}

impl FilterError {
    pub(crate) fn io(source: std::io::Error) -> Self {
        FilterError::Io { path: None, source }
    }

    /// Attach a file path to an I/O or CSV error that was raised without one.
    pub fn at_path(self, at: impl Into<PathBuf>) -> Self {
        match self {
            FilterError::Io { path: None, source } => FilterError::Io {
                path: Some(at.into()),
                source,
            },
            FilterError::Csv { path: None, source } => FilterError::Csv {
                path: Some(at.into()),
                source,
            },
            other => other,
        }
    }
}

impl From<std::io::Error> for FilterError {
    fn from(source: std::io::Error) -> Self {
        FilterError::io(source)
    }
}

impl From<csv::Error> for FilterError {
    fn from(source: csv::Error) -> Self {
        FilterError::Csv { path: None, source }
    }
}
