use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::PipelineError;

/// Pipeline stage an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the input file.
    Load,
    /// Mapping raw rows to customer records.
    Validate,
    /// Keeping customers who signed up within the last year.
    Filter,
    /// Writing the output file.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Load => "load",
            Stage::Validate => "validate",
            Stage::Filter => "filter",
            Stage::Write => "write",
        })
    }
}

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (stage failed).
    Error,
    /// Critical error (I/O failures).
    Critical,
}

impl Severity {
    /// Severity a stage failure is reported with.
    pub fn for_error(error: &PipelineError) -> Self {
        if error.is_io() {
            Severity::Critical
        } else {
            Severity::Error
        }
    }
}

/// Context about one stage of a run.
#[derive(Debug, Clone)]
pub struct StageContext {
    /// Stage being reported.
    pub stage: Stage,
    /// File the stage read or wrote (input for load, output for write).
    pub path: PathBuf,
}

/// Minimal stats reported when a stage succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    /// Number of rows/records the stage produced.
    pub rows: usize,
}

/// Logging interface injected into each pipeline stage.
///
/// All methods default to no-ops so implementors only override what they need.
pub trait PipelineObserver: Send + Sync {
    /// Called when a stage succeeds.
    fn on_stage_success(&self, _ctx: &StageContext, _stats: StageStats) {}

    /// Called when a stage fails below the alert threshold.
    fn on_stage_failure(
        &self,
        _ctx: &StageContext,
        _severity: Severity,
        _error: &PipelineError,
    ) {
    }

    /// Called instead of [`Self::on_stage_failure`] when a stage failure meets the alert
    /// threshold.
    ///
    /// Default behavior forwards to [`Self::on_stage_failure`].
    fn on_alert(&self, ctx: &StageContext, severity: Severity, error: &PipelineError) {
        self.on_stage_failure(ctx, severity, error)
    }

    /// Called once by the top level when a run ends without output.
    fn on_run_failed(&self, _input: &Path, _error: &PipelineError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_stage_success(&self, ctx: &StageContext, stats: StageStats) {
        for o in &self.observers {
            o.on_stage_success(ctx, stats);
        }
    }

    fn on_stage_failure(&self, ctx: &StageContext, severity: Severity, error: &PipelineError) {
        for o in &self.observers {
            o.on_stage_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &StageContext, severity: Severity, error: &PipelineError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }

    fn on_run_failed(&self, input: &Path, error: &PipelineError) {
        for o in &self.observers {
            o.on_run_failed(input, error);
        }
    }
}

/// Forwards events to `tracing`; whichever subscriber the process installed decides where
/// they end up.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_success(&self, ctx: &StageContext, stats: StageStats) {
        tracing::info!(
            stage = %ctx.stage,
            path = %ctx.path.display(),
            rows = stats.rows,
            "stage completed"
        );
    }

    fn on_stage_failure(&self, ctx: &StageContext, severity: Severity, error: &PipelineError) {
        tracing::error!(
            stage = %ctx.stage,
            severity = ?severity,
            path = %ctx.path.display(),
            err = %error,
            "stage failed"
        );
    }

    fn on_alert(&self, ctx: &StageContext, severity: Severity, error: &PipelineError) {
        tracing::error!(
            stage = %ctx.stage,
            severity = ?severity,
            path = %ctx.path.display(),
            err = %error,
            "ALERT: stage failed"
        );
    }

    fn on_run_failed(&self, input: &Path, error: &PipelineError) {
        tracing::error!(
            severity = "critical",
            input = %input.display(),
            err = %error,
            "failed to process the CSV file"
        );
    }
}
