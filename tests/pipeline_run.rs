use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use recent_customers::pipeline::{run, PipelineOptions, PipelineRequest};
use recent_customers::PipelineError;

const HEADER: &str = "customer_id,name,signup_date,country\n";

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 10)
        .unwrap()
        .and_hms_opt(14, 45, 0)
        .unwrap()
}

fn options_in(dir: &Path) -> PipelineOptions {
    PipelineOptions {
        output_dir: dir.to_path_buf(),
        now: Some(fixed_now()),
        ..Default::default()
    }
}

#[test]
fn keeps_only_recent_customers_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let summary = run("tests/fixtures/customers.csv", &options_in(dir.path())).unwrap();

    assert_eq!(summary.output_path, dir.path().join("proc__customers.csv"));
    assert_eq!(summary.loaded, 6);
    assert_eq!(summary.retained, 3);

    // Grace Hopper signed up exactly one year before `now` and is kept.
    let written = fs::read_to_string(&summary.output_path).unwrap();
    assert_eq!(
        written,
        format!(
            "{HEADER}1,Ada Lovelace,2025-05-01,UK\n\
             3,Grace Hopper,2024-06-10,US\n\
             5,Ken Thompson,2025-01-31,US\n"
        )
    );
}

#[test]
fn invalid_row_fails_run_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());

    let err = run("tests/fixtures/bad_customer_id.csv", &opts).unwrap_err();

    assert!(matches!(err, PipelineError::Validation { row: 4, .. }));
    assert!(!dir.path().join("proc__bad_customer_id.csv").exists());
}

#[test]
fn invalid_row_leaves_previous_output_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("proc__bad_customer_id.csv");
    fs::write(&out, "from an earlier run\n").unwrap();

    run("tests/fixtures/bad_customer_id.csv", &options_in(dir.path())).unwrap_err();

    assert_eq!(fs::read_to_string(&out).unwrap(), "from an earlier run\n");
}

#[test]
fn failed_write_keeps_destination_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the output file should go makes the final rename fail.
    let out = dir.path().join("proc__customers.csv");
    fs::create_dir(&out).unwrap();

    let err = run("tests/fixtures/customers.csv", &options_in(dir.path())).unwrap_err();

    assert!(err.is_io());
    assert!(out.is_dir());
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn numeric_looking_text_is_written_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let summary = run("tests/fixtures/numeric_text.csv", &options_in(dir.path())).unwrap();

    assert_eq!(summary.retained, 2);
    assert_eq!(
        fs::read_to_string(&summary.output_path).unwrap(),
        format!("{HEADER}1,007,2025-05-01,+44\n2,1.50,2025-05-01,1e3\n")
    );
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let err = run("tests/fixtures/nope.csv", &options_in(dir.path())).unwrap_err();

    assert!(err.is_io());
    assert!(!dir.path().join("proc__nope.csv").exists());
}

#[test]
fn empty_result_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let summary = run("tests/fixtures/old_customers.csv", &options_in(dir.path())).unwrap();

    assert_eq!(summary.loaded, 3);
    assert_eq!(summary.retained, 0);
    assert_eq!(fs::read_to_string(&summary.output_path).unwrap(), HEADER);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());

    let first = run("tests/fixtures/customers.csv", &opts).unwrap();
    let first_bytes = fs::read(&first.output_path).unwrap();
    let second = run("tests/fixtures/customers.csv", &opts).unwrap();
    let second_bytes = fs::read(&second.output_path).unwrap();

    assert_eq!(first.output_path, second.output_path);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("proc__old_customers.csv");
    fs::write(&out, "stale contents that are much longer than a header line\n").unwrap();

    run("tests/fixtures/old_customers.csv", &options_in(dir.path())).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), HEADER);
}

#[test]
fn unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(&dir.path().join("missing_subdir"));

    let err = run("tests/fixtures/customers.csv", &opts).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn request_runs_with_its_options() {
    let dir = tempfile::tempdir().unwrap();
    let req = PipelineRequest {
        input: "tests/fixtures/extra_columns.csv".into(),
        options: PipelineOptions {
            output_prefix: "recent_".to_string(),
            ..options_in(dir.path())
        },
    };

    let summary = req.run().unwrap();
    assert_eq!(summary.output_path, dir.path().join("recent_extra_columns.csv"));
    assert_eq!(
        fs::read_to_string(&summary.output_path).unwrap(),
        format!("{HEADER}1,Ada Lovelace,2025-05-01,UK\n")
    );
}
