use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::model::RESULTS_HEADER;
use crate::error::{FilterError, Result};

// ---------------------------------------------------------------------------
// FilterJob – one features/params/results → output run
// ---------------------------------------------------------------------------

/// Everything needed for one filter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterJob {
    #[serde(default)]
    pub name: String,
    /// Features table; its first column lists the instances to keep.
    pub features: PathBuf,
    /// Parameter list; one setting name per line.
    pub params: PathBuf,
    /// Results table to filter.
    pub results: PathBuf,
    /// Created or truncated.
    pub output: PathBuf,
    /// Line written before the rows, without its newline.
    #[serde(default)]
    pub header: Option<String>,
}

impl FilterJob {
    /// Make every relative path relative to `base` instead of the
    /// working directory.
    pub fn resolve_against(mut self, base: &Path) -> Self {
        for path in [
            &mut self.features,
            &mut self.params,
            &mut self.results,
            &mut self.output,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Presets – the three benchmark layouts
// ---------------------------------------------------------------------------

/// Known file layouts. Paths that pointed outside the working tree have
/// no default and must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// MIP relaxation times, with header.
    Mip,
    /// RCPSP results, with header.
    Rcpsp,
    /// Relaxation values for a feature subset, no header.
    Relaxation,
}

/// Optional replacements for a preset's paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverrides {
    pub features: Option<PathBuf>,
    pub params: Option<PathBuf>,
    pub results: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

struct Layout {
    features: Option<&'static str>,
    params: &'static str,
    results: Option<&'static str>,
    output: &'static str,
    header: bool,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Mip => "mip",
            Preset::Rcpsp => "rcpsp",
            Preset::Relaxation => "relaxation",
        }
    }

    fn layout(self) -> Layout {
        match self {
            Preset::Mip => Layout {
                features: Some("mip-features.csv"),
                params: "incparams-mip.csv",
                results: None,
                output: "mip-results.csv",
                header: true,
            },
            Preset::Rcpsp => Layout {
                features: Some("rcpsp-features.csv"),
                params: "incparams-rcpsp.csv",
                results: None,
                output: "rcpsp-results.csv",
                header: true,
            },
            Preset::Relaxation => Layout {
                features: None,
                params: "incparams.csv",
                results: Some("../relaxation.csv"),
                output: "relaxation.csv",
                header: false,
            },
        }
    }

    /// Build the job for this preset, applying `overrides`.
    pub fn job(self, overrides: PathOverrides) -> Result<FilterJob> {
        let layout = self.layout();
        let required = |given: Option<PathBuf>, default: Option<&str>, what: &str| {
            given
                .or_else(|| default.map(PathBuf::from))
                .ok_or_else(|| {
                    FilterError::Config(format!(
                        "preset '{}' has no default {what} path; pass --{what}",
                        self.name()
                    ))
                })
        };

        Ok(FilterJob {
            name: self.name().to_string(),
            features: required(overrides.features, layout.features, "features")?,
            params: overrides
                .params
                .unwrap_or_else(|| PathBuf::from(layout.params)),
            results: required(overrides.results, layout.results, "results")?,
            output: overrides
                .output
                .unwrap_or_else(|| PathBuf::from(layout.output)),
            header: layout.header.then(|| RESULTS_HEADER.to_string()),
        })
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// JobFile – a batch of jobs in JSON
// ---------------------------------------------------------------------------

/// Batch file layout:
///
/// ```json
/// {
///   "jobs": [
///     {
///       "name": "mip",
///       "features": "mip-features.csv",
///       "params": "incparams-mip.csv",
///       "results": "/data/cbc/relaxation-time.csv",
///       "output": "mip-results.csv",
///       "header": "instance,algsetting,result"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    pub jobs: Vec<FilterJob>,
}

impl JobFile {
    /// Read and validate a batch file. Relative paths inside it are taken
    /// relative to the file's own directory.
    pub fn load(path: &Path) -> Result<JobFile> {
        let text = std::fs::read_to_string(path).map_err(|e| FilterError::io(e).at_path(path))?;
        let file: JobFile = serde_json::from_str(&text).map_err(|source| FilterError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let jobs = file
            .jobs
            .into_iter()
            .enumerate()
            .map(|(i, mut job)| {
                if job.name.is_empty() {
                    job.name = format!("job-{i}");
                }
                job.resolve_against(base)
            })
            .collect();

        let file = JobFile { jobs };
        file.validate()?;
        Ok(file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.jobs.is_empty() {
            return Err(FilterError::Config("job file lists no jobs".into()));
        }
        let mut seen = BTreeSet::new();
        for job in &self.jobs {
            if !seen.insert(job.name.as_str()) {
                return Err(FilterError::Config(format!(
                    "duplicate job name '{}'",
                    job.name
                )));
            }
        }
        Ok(())
    }
}
