//! Run orchestration: load → validate → filter → write.
//!
//! Most callers should use [`run`], which executes the four stages once for an input file and
//! writes `proc__<file name>` (see [`output_path_for`]).
//!
//! - Every stage result is reported to [`PipelineOptions::observer`] if one is set. A failed
//!   stage produces exactly one failure event: `on_alert` when its severity reaches
//!   [`PipelineOptions::alert_at_or_above`], `on_stage_failure` otherwise.
//! - The output file is only replaced by the final stage, and only after every row has been
//!   written, so a failed run leaves no output behind and keeps any previous output intact.
//!   A successful run overwrites an existing output file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::error::{PipelineError, PipelineResult};
use crate::ingestion::csv::load_csv_from_path;
use crate::ingestion::observability::{PipelineObserver, Severity, Stage, StageContext, StageStats};
use crate::output::csv::write_customers_to_path;
use crate::processing::filter::retain_recent;
use crate::validation::validate_customers;

/// Default prefix prepended to the input file name to form the output file name.
pub const DEFAULT_OUTPUT_PREFIX: &str = "proc__";

/// Options controlling a pipeline run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Directory the output file is written to (default: current working directory).
    pub output_dir: PathBuf,
    /// Prefix for the output file name.
    pub output_prefix: String,
    /// Reference time for the one-year cutoff. `None` uses the local clock.
    pub now: Option<NaiveDateTime>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity at or above which a failure is reported through `on_alert` instead of
    /// `on_stage_failure`.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("output_dir", &self.output_dir)
            .field("output_prefix", &self.output_prefix)
            .field("now", &self.now)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            now: None,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Path of the written output file.
    pub output_path: PathBuf,
    /// Number of rows loaded and validated.
    pub loaded: usize,
    /// Number of customers written.
    pub retained: usize,
}

/// Output path for `input`: `output_dir/<prefix><input file name>`.
pub fn output_path_for(
    input: impl AsRef<Path>,
    options: &PipelineOptions,
) -> PipelineResult<PathBuf> {
    let input = input.as_ref();
    let file_name = input
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PipelineError::InvalidInput {
            message: format!("input path has no file name ({})", input.display()),
        })?;
    Ok(options
        .output_dir
        .join(format!("{}{file_name}", options.output_prefix)))
}

/// Run the full pipeline once for `input`.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use recent_customers::ingestion::TracingObserver;
/// use recent_customers::pipeline::{run, PipelineOptions};
///
/// # fn main() -> Result<(), recent_customers::PipelineError> {
/// let opts = PipelineOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let summary = run("customers.csv", &opts)?;
/// println!("wrote {} rows to {}", summary.retained, summary.output_path.display());
/// # Ok(())
/// # }
/// ```
pub fn run(input: impl AsRef<Path>, options: &PipelineOptions) -> PipelineResult<RunSummary> {
    let input = input.as_ref();
    let output_path = output_path_for(input, options)?;
    let now = options.now.unwrap_or_else(|| Local::now().naive_local());

    let loaded = load_csv_from_path(input);
    let table = observe(options, Stage::Load, input, loaded, |t| t.row_count())?;
    let validated = validate_customers(&table);
    let customers = observe(options, Stage::Validate, input, validated, Vec::len)?;
    let filtered = retain_recent(&customers, now);
    let recent = observe(options, Stage::Filter, input, filtered, Vec::len)?;
    observe(
        options,
        Stage::Write,
        &output_path,
        write_customers_to_path(&output_path, &recent),
        |_| recent.len(),
    )?;

    Ok(RunSummary {
        output_path,
        loaded: customers.len(),
        retained: recent.len(),
    })
}

/// Report a stage result to the configured observer and pass it through.
fn observe<T>(
    options: &PipelineOptions,
    stage: Stage,
    path: &Path,
    result: PipelineResult<T>,
    rows: impl FnOnce(&T) -> usize,
) -> PipelineResult<T> {
    if let Some(obs) = options.observer.as_ref() {
        let ctx = StageContext {
            stage,
            path: path.to_path_buf(),
        };
        match &result {
            Ok(v) => obs.on_stage_success(&ctx, StageStats { rows: rows(v) }),
            Err(e) => {
                let sev = Severity::for_error(e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                } else {
                    obs.on_stage_failure(&ctx, sev, e);
                }
            }
        }
    }
    result
}

/// Owned request object bundling an input path with its options.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// Path to the input CSV file.
    pub input: PathBuf,
    /// Options controlling the run.
    pub options: PipelineOptions,
}

impl PipelineRequest {
    /// Execute the request by calling [`run`].
    pub fn run(&self) -> PipelineResult<RunSummary> {
        run(&self.input, &self.options)
    }
}
