//! Signup-recency filtering for validated [`Customer`] records.

use chrono::{Months, NaiveDate, NaiveDateTime};

use crate::error::{PipelineError, PipelineResult};
use crate::types::Customer;

/// Returns the records for which `predicate` returns `true`, in input order.
pub fn filter<F>(records: &[Customer], mut predicate: F) -> Vec<Customer>
where
    F: FnMut(&Customer) -> bool,
{
    records.iter().filter(|&c| predicate(c)).cloned().collect()
}

/// Calendar date one year before `now`.
///
/// Subtracts twelve months, so Feb 29 clamps to Feb 28 of the previous year.
pub fn one_year_before(now: NaiveDateTime) -> PipelineResult<NaiveDate> {
    now.date()
        .checked_sub_months(Months::new(12))
        .ok_or_else(|| PipelineError::DateArithmetic {
            message: format!("cannot subtract one year from {}", now.date()),
        })
}

/// Keep customers whose signup date is on or after [`one_year_before`] `now`.
pub fn retain_recent(records: &[Customer], now: NaiveDateTime) -> PipelineResult<Vec<Customer>> {
    let cutoff = one_year_before(now)?;
    Ok(filter(records, |c| c.signup_date >= cutoff))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(15, 30, 0).unwrap()
    }

    fn customer(id: i64, signup_date: NaiveDate) -> Customer {
        Customer {
            customer_id: id,
            name: format!("c{id}"),
            signup_date,
            country: "NZ".to_string(),
        }
    }

    #[test]
    fn cutoff_subtracts_one_calendar_year() {
        assert_eq!(one_year_before(at(2025, 6, 10)).unwrap(), date(2024, 6, 10));
        assert_eq!(one_year_before(at(2024, 2, 29)).unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn boundary_day_is_included_and_order_kept() {
        let now = at(2025, 6, 10);
        let records = vec![
            customer(1, date(2025, 1, 1)),
            customer(2, date(2024, 6, 9)),
            customer(3, date(2024, 6, 10)),
            customer(4, date(2020, 3, 3)),
            customer(5, date(2025, 6, 10)),
        ];

        let out = retain_recent(&records, now).unwrap();
        let ids: Vec<i64> = out.iter().map(|c| c.customer_id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn can_return_empty() {
        let out = retain_recent(&[customer(1, date(2000, 1, 1))], at(2025, 1, 1)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn underflow_is_reported() {
        let err = one_year_before(NaiveDateTime::MIN).unwrap_err();
        assert!(err.to_string().contains("date arithmetic error"));
    }
}
