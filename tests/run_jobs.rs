//! End-to-end runs against files on disk.

use std::fs;
use std::path::Path;

use algsel_filter::{
    run_job, run_jobs, FilterError, FilterJob, JobFile, PathOverrides, Preset, RESULTS_HEADER,
};
use tempfile::tempdir;

const FEATURES: &str = "instance,nvars,ncons\ninst1,10,5\ninst3,20,7\n";
const PARAMS: &str = "cplex-default\ncbc-default\n";
const RESULTS: &str = "\
inst1,cplex-default,12.3
inst2,cplex-default,5.0
inst1,other,9.9
inst3,cbc-default,1.5
inst1,cbc-default,4.0
";

fn write_inputs(dir: &Path, results_name: &str) {
    fs::write(dir.join("features.csv"), FEATURES).unwrap();
    fs::write(dir.join("incparams.csv"), PARAMS).unwrap();
    fs::write(dir.join(results_name), RESULTS).unwrap();
}

fn job(dir: &Path, header: Option<&str>) -> FilterJob {
    FilterJob {
        name: "test".into(),
        features: dir.join("features.csv"),
        params: dir.join("incparams.csv"),
        results: dir.join("results.csv"),
        output: dir.join("out.csv"),
        header: header.map(str::to_string),
    }
}

#[test]
fn test_run_job_with_header() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "results.csv");

    let stats = run_job(&job(dir.path(), Some(RESULTS_HEADER))).unwrap();

    let out = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(
        out,
        "instance,algsetting,result\n\
         inst1,cplex-default,12.3\n\
         inst3,cbc-default,1.5\n\
         inst1,cbc-default,4.0\n"
    );
    assert_eq!(stats.rows_read, 5);
    assert_eq!(stats.rows_kept, 3);
    assert_eq!(stats.unknown_instance, 1);
    assert_eq!(stats.unknown_param, 1);
}

#[test]
fn test_run_job_overwrites_output() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "results.csv");
    let stale = "stale contents that are longer than the output\n".repeat(10);
    fs::write(dir.path().join("out.csv"), stale).unwrap();

    run_job(&job(dir.path(), None)).unwrap();

    let out = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert!(!out.contains("stale"));
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn test_run_job_is_idempotent() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "results.csv");
    run_job(&job(dir.path(), Some(RESULTS_HEADER))).unwrap();
    let first = fs::read_to_string(dir.path().join("out.csv")).unwrap();

    let mut again = job(dir.path(), Some(RESULTS_HEADER));
    fs::copy(dir.path().join("out.csv"), dir.path().join("first.csv")).unwrap();
    again.results = dir.path().join("first.csv");
    run_job(&again).unwrap();

    let second = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_input_is_io_error_naming_file() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "results.csv");
    fs::remove_file(dir.path().join("incparams.csv")).unwrap();

    let err = run_job(&job(dir.path(), None)).unwrap_err();
    match err {
        FilterError::Io { path, source } => {
            assert_eq!(path, Some(dir.path().join("incparams.csv")));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Sets are loaded before the output is created.
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_unwritable_output_is_io_error() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "results.csv");
    let mut bad = job(dir.path(), None);
    bad.output = dir.path().join("no-such-dir").join("out.csv");

    let err = run_job(&bad).unwrap_err();
    assert!(matches!(err, FilterError::Io { path: Some(ref p), .. } if *p == bad.output), "{err:?}");
}

#[test]
fn test_preset_relaxation_reads_parent_results() {
    let root = tempdir().unwrap();
    let work = root.path().join("test");
    fs::create_dir(&work).unwrap();
    write_inputs(&work, "unused.csv");
    fs::write(root.path().join("relaxation.csv"), RESULTS).unwrap();

    let job = Preset::Relaxation
        .job(PathOverrides {
            features: Some("features.csv".into()),
            ..Default::default()
        })
        .unwrap()
        .resolve_against(&work);
    run_job(&job).unwrap();

    let out = fs::read_to_string(work.join("relaxation.csv")).unwrap();
    assert_eq!(
        out,
        "inst1,cplex-default,12.3\ninst3,cbc-default,1.5\ninst1,cbc-default,4.0\n"
    );
}

#[test]
fn test_batch_file_runs_every_job() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "results.csv");
    fs::write(
        dir.path().join("jobs.json"),
        r#"{
            "jobs": [
                {
                    "name": "with-header",
                    "features": "features.csv",
                    "params": "incparams.csv",
                    "results": "results.csv",
                    "output": "a.csv",
                    "header": "instance,algsetting,result"
                },
                {
                    "features": "features.csv",
                    "params": "incparams.csv",
                    "results": "results.csv",
                    "output": "b.csv"
                }
            ]
        }"#,
    )
    .unwrap();

    let file = JobFile::load(&dir.path().join("jobs.json")).unwrap();
    assert_eq!(file.jobs[1].name, "job-1");

    let total = run_jobs(&file.jobs).unwrap();
    assert_eq!(total.rows_read, 10);
    assert_eq!(total.rows_kept, 6);

    let a = fs::read_to_string(dir.path().join("a.csv")).unwrap();
    let b = fs::read_to_string(dir.path().join("b.csv")).unwrap();
    assert_eq!(a, format!("{RESULTS_HEADER}\n{b}"));
}

#[test]
fn test_batch_stops_at_first_failure() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "results.csv");
    let mut broken = job(dir.path(), None);
    broken.name = "broken".into();
    broken.features = dir.path().join("missing.csv");
    let mut after = job(dir.path(), None);
    after.name = "after".into();
    after.output = dir.path().join("after.csv");

    assert!(run_jobs(&[broken, after]).is_err());
    assert!(!dir.path().join("after.csv").exists());
}

#[test]
fn test_batch_file_rejects_bad_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    fs::write(&path, r#"{ "jobs": [ { "features": "f" } ] }"#).unwrap();

    let err = JobFile::load(&path).unwrap_err();
    assert!(matches!(err, FilterError::Json { .. }), "{err:?}");
}
