use std::path::PathBuf;

use algsel_filter::{run_job, run_jobs, FilterJob, JobFile, PathOverrides, Preset};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "algsel-filter", version)]
#[command(about = "Keep result rows whose instance and parameter setting are both known")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter with explicit paths
    Filter {
        /// Features table; instances are read from its first column
        #[arg(long)]
        features: PathBuf,

        /// Parameter list, one setting per line
        #[arg(long)]
        params: PathBuf,

        /// Results table to filter
        #[arg(long)]
        results: PathBuf,

        /// Output file (overwritten)
        #[arg(long)]
        output: PathBuf,

        /// Line to write before the filtered rows
        #[arg(long)]
        header: Option<String>,
    },

    /// Filter using one of the known benchmark layouts
    Preset {
        #[arg(value_enum)]
        preset: Preset,

        #[command(flatten)]
        paths: PathArgs,
    },

    /// Run every job listed in a JSON job file
    Batch {
        /// Path to the job file
        jobs: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PathArgs {
    /// Override the features table
    #[arg(long)]
    features: Option<PathBuf>,

    /// Override the parameter list
    #[arg(long)]
    params: Option<PathBuf>,

    /// Override the results table
    #[arg(long)]
    results: Option<PathBuf>,

    /// Override the output file
    #[arg(long)]
    output: Option<PathBuf>,
}

impl From<PathArgs> for PathOverrides {
    fn from(args: PathArgs) -> Self {
        PathOverrides {
            features: args.features,
            params: args.params,
            results: args.results,
            output: args.output,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Filter {
            features,
            params,
            results,
            output,
            header,
        } => {
            let job = FilterJob {
                name: "filter".to_string(),
                features,
                params,
                results,
                output,
                header,
            };
            run_job(&job).context("filter failed")?;
        }
        Command::Preset { preset, paths } => {
            let job = preset
                .job(paths.into())
                .with_context(|| format!("configuring preset '{preset}'"))?;
            run_job(&job).with_context(|| format!("preset '{preset}' failed"))?;
        }
        Command::Batch { jobs } => {
            let file = JobFile::load(&jobs)
                .with_context(|| format!("loading job file {}", jobs.display()))?;
            run_jobs(&file.jobs).context("batch failed")?;
        }
    }

    Ok(())
}
