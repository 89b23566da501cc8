//! Filter algorithm-selection result tables.
//!
//! A results table lists `instance,algsetting,result` rows. Only rows whose
//! instance appears in a features table and whose setting appears in a
//! parameter list are kept, in their original order and byte for byte.

pub mod config;
pub mod data;
pub mod error;
pub mod runner;

pub use config::{FilterJob, JobFile, PathOverrides, Preset};
pub use data::filter::filter_rows;
pub use data::loader::{build_id_set, load_instance_set, load_param_set};
pub use data::model::{FilterStats, IdColumn, IdSet, ResultRow, RESULTS_HEADER};
pub use error::{FilterError, Result};
pub use runner::{run_job, run_jobs};
