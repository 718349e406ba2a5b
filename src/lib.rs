//! `recent-customers` reads a CSV of customer records, validates every row into a typed
//! [`types::Customer`], keeps the customers who signed up within the last year, and writes
//! them to a new CSV file.
//!
//! The primary entrypoint is [`pipeline::run`], which runs the four stages in order:
//!
//! 1. [`ingestion::csv::load_csv_from_path`]: header + rows into a [`types::RawTable`]
//! 2. [`validation::validate_customers`]: all-or-nothing typed validation
//! 3. [`processing::retain_recent`]: `signup_date >= today - 1 year` (inclusive)
//! 4. [`output::write_customers_to_path`]: header row plus one row per customer
//!
//! ## Input
//!
//! UTF-8, comma-delimited, with a header containing at least
//! `customer_id, name, signup_date, country`. Extra columns are ignored. `signup_date` must be
//! written as `YYYY-MM-DD`.
//!
//! ## Quick example
//!
//! ```no_run
//! use recent_customers::pipeline::{run, PipelineOptions};
//!
//! # fn main() -> Result<(), recent_customers::PipelineError> {
//! // Writes ./proc__customers.csv
//! let summary = run("data/customers.csv", &PipelineOptions::default())?;
//! println!("kept {} of {}", summary.retained, summary.loaded);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV loading and the [`ingestion::PipelineObserver`] logging interface
//! - [`validation`]: raw rows to customer records
//! - [`processing`]: recency filtering
//! - [`output`]: CSV writing
//! - [`pipeline`]: options and orchestration
//! - [`types`]: schema, raw table and record types
//! - [`error`]: the shared error type
//! - [`logging`]: rolling-file subscriber used by the binary

pub mod error;
pub mod ingestion;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod types;
pub mod validation;

pub use error::{FieldIssue, PipelineError, PipelineResult};
