//! Output serialization.

pub mod csv;

pub use self::csv::{write_customers_to_path, write_customers_to_writer};
