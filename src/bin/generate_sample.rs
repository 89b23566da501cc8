use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a small features/params/results trio to try the filter on")]
struct Args {
    /// Directory to write the sample files into
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const N_INSTANCES: usize = 40;
/// Every n-th instance is left out of the features table.
const DROP_EVERY: usize = 4;

const SETTINGS: [&str; 6] = [
    "cplex-default",
    "cplex-nocuts",
    "cbc-default",
    "cbc-aggressive",
    "cbc-noheur",
    "scip-default",
];
/// Settings listed in the parameter file; the rest must be filtered out.
const KEPT_SETTINGS: usize = 4;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let out_dir = args.out_dir;
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(args.seed);
    let instances: Vec<String> = (0..N_INSTANCES).map(|i| format!("inst-{i:03}")).collect();

    // Features: instance name first, then a few numeric columns.
    let features_path = out_dir.join("sample-features.csv");
    let mut features = csv::Writer::from_path(&features_path)
        .with_context(|| format!("creating {}", features_path.display()))?;
    features.write_record(["instance", "nvars", "ncons", "density"])?;
    let mut n_features = 0;
    for (i, inst) in instances.iter().enumerate() {
        if i % DROP_EVERY == DROP_EVERY - 1 {
            continue;
        }
        let nvars = 100 + rng.below(20_000);
        let ncons = 50 + rng.below(10_000);
        let density = rng.next_f64() * 0.2;
        features.write_record([
            inst.clone(),
            nvars.to_string(),
            ncons.to_string(),
            format!("{density:.4}"),
        ])?;
        n_features += 1;
    }
    features.flush()?;

    let params_path = out_dir.join("sample-incparams.csv");
    let params: String = SETTINGS[..KEPT_SETTINGS]
        .iter()
        .map(|s| format!("{s}\n"))
        .collect();
    fs::write(&params_path, params)
        .with_context(|| format!("writing {}", params_path.display()))?;

    // Results: every instance × every setting, no header.
    let results_path = out_dir.join("sample-results.csv");
    let mut results = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&results_path)
        .with_context(|| format!("creating {}", results_path.display()))?;
    let mut n_results = 0;
    for inst in &instances {
        let base = rng.gauss(2.0, 1.0);
        for setting in SETTINGS {
            let seconds = format!("{:.3}", (base + rng.gauss(0.0, 0.5)).exp());
            results.write_record([inst.as_str(), setting, seconds.as_str()])?;
            n_results += 1;
        }
    }
    results.flush()?;

    info!(
        "Wrote {n_features} instances, {KEPT_SETTINGS} settings and {n_results} results to {}",
        out_dir.display()
    );
    Ok(())
}
