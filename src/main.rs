use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use recent_customers::ingestion::{PipelineObserver, TracingObserver};
use recent_customers::logging;
use recent_customers::pipeline::{self, PipelineOptions};
use recent_customers::{PipelineError, PipelineResult};

fn main() -> ExitCode {
    let _guard = match logging::init(&logging::log_dir_from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialise logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let observer = Arc::new(TracingObserver);
    let input = match prompt_for_input_path() {
        Ok(path) => path,
        Err(e) => {
            observer.on_run_failed(&PathBuf::new(), &e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let opts = PipelineOptions {
        observer: Some(observer.clone()),
        ..Default::default()
    };

    match pipeline::run(&input, &opts) {
        Ok(summary) => {
            tracing::info!(
                output = %summary.output_path.display(),
                loaded = summary.loaded,
                retained = summary.retained,
                "saved the filtered data"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            observer.on_run_failed(&input, &e);
            eprintln!("Error: failed to process the CSV file: {e}");
            ExitCode::FAILURE
        }
    }
}

fn prompt_for_input_path() -> PipelineResult<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter the path to the input CSV file: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::InvalidInput {
            message: "no input path given".to_string(),
        });
    }
    Ok(PathBuf::from(trimmed))
}
