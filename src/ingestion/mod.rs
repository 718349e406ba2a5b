//! Input loading and the observer interface the pipeline reports to.
//!
//! - [`csv`]: reads a delimited file into an untyped [`crate::types::RawTable`]
//! - [`observability`]: [`PipelineObserver`] and its stock implementations

pub mod csv;
pub mod observability;

pub use observability::{
    CompositeObserver, PipelineObserver, Severity, Stage, StageContext, StageStats, TracingObserver,
};
