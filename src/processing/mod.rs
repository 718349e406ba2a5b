//! In-memory transformations over validated records.
//!
//! - [`filter()`]: record filtering by predicate
//! - [`retain_recent()`]: keep customers who signed up within the last year
//!
//! ```rust
//! use chrono::NaiveDate;
//! use recent_customers::processing::retain_recent;
//! use recent_customers::types::Customer;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let records = vec![
//!     Customer {
//!         customer_id: 1,
//!         name: "Ada".to_string(),
//!         signup_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
//!         country: "UK".to_string(),
//!     },
//!     Customer {
//!         customer_id: 2,
//!         name: "Bo".to_string(),
//!         signup_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!         country: "SE".to_string(),
//!     },
//! ];
//!
//! let recent = retain_recent(&records, now).unwrap();
//! assert_eq!(recent.len(), 1);
//! assert_eq!(recent[0].customer_id, 1);
//! ```

pub mod filter;

pub use filter::{filter, one_year_before, retain_recent};
