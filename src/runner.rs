use std::fs::File;
use std::io::{BufReader, BufWriter};

use log::{debug, info};

use crate::config::FilterJob;
use crate::data::filter::filter_rows;
use crate::data::loader::{load_instance_set, load_param_set};
use crate::data::model::FilterStats;
use crate::error::{FilterError, Result};

/// Run one job: load both sets, then stream the results table into the
/// output file.
///
/// Any failure aborts the job. An output file that was already created
/// is left as it is.
pub fn run_job(job: &FilterJob) -> Result<FilterStats> {
    info!("[{}] {} -> {}", job.name, job.results.display(), job.output.display());

    let instances = load_instance_set(&job.features)?;
    debug!("[{}] instances: {:?}", job.name, instances);

    let params = load_param_set(&job.params)?;
    debug!("[{}] parameter settings: {:?}", job.name, params);

    let results = File::open(&job.results).map_err(|e| FilterError::io(e).at_path(&job.results))?;
    let output = File::create(&job.output).map_err(|e| FilterError::io(e).at_path(&job.output))?;

    let stats = filter_rows(
        &instances,
        &params,
        BufReader::new(results),
        BufWriter::new(output),
        job.header.as_deref(),
    )?;

    info!("[{}] {stats}", job.name);
    Ok(stats)
}

/// Run jobs in order, stopping at the first failure.
pub fn run_jobs(jobs: &[FilterJob]) -> Result<FilterStats> {
    let mut total = FilterStats::default();
    for job in jobs {
        let stats = run_job(job)?;
        total.absorb(&stats);
    }
    if jobs.len() > 1 {
        info!("{} jobs: {total}", jobs.len());
    }
    Ok(total)
}
