//! Batch validation of raw rows into [`Customer`] records.
//!
//! Validation is all-or-nothing: the first row with any failing field rejects the whole
//! batch with [`PipelineError::Validation`], listing every failing field of that row.

use chrono::NaiveDate;

use crate::error::{FieldIssue, PipelineError, PipelineResult};
use crate::types::{Customer, DataType, RawRow, RawTable, Value};

/// Strict textual format accepted for `signup_date`.
pub const SIGNUP_DATE_FORMAT: &str = "%Y-%m-%d";

const MISSING: &str = "<missing>";

/// Validate every row of `table`, preserving input order.
pub fn validate_customers(table: &RawTable) -> PipelineResult<Vec<Customer>> {
    let mut customers = Vec::with_capacity(table.row_count());
    for (row_idx0, row) in table.iter_rows().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        customers.push(validate_row(user_row, row)?);
    }
    Ok(customers)
}

/// Validate a single row against [`Customer::schema`]. `user_row` is only used for error
/// reporting.
pub fn validate_row(user_row: usize, row: RawRow<'_>) -> PipelineResult<Customer> {
    let schema = Customer::schema();
    let mut issues = Vec::new();
    let mut values = Vec::with_capacity(schema.fields.len());

    for field in &schema.fields {
        let parsed = match row.get(&field.name) {
            Some(value) => parse_typed_value(&field.data_type, value)
                .map_err(|message| (value.to_string(), message)),
            None => Err((MISSING.to_string(), "field required".to_string())),
        };
        match parsed {
            Ok(v) => values.push(v),
            Err((raw, message)) => issues.push(FieldIssue {
                column: field.name.clone(),
                raw,
                message,
            }),
        }
    }

    if !issues.is_empty() {
        return Err(PipelineError::Validation {
            row: user_row,
            issues,
        });
    }
    Customer::from_values(values).ok_or_else(|| PipelineError::Validation {
        row: user_row,
        issues: vec![FieldIssue {
            column: schema.field_names().collect::<Vec<_>>().join(","),
            raw: MISSING.to_string(),
            message: "values do not match the customer layout".to_string(),
        }],
    })
}

/// Parse a textual date strictly as `YYYY-MM-DD`.
pub fn parse_date_str(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, SIGNUP_DATE_FORMAT)
        .map_err(|e| format!("expected date in YYYY-MM-DD format: {e}"))
}

fn parse_typed_value(data_type: &DataType, value: &Value) -> Result<Value, String> {
    match data_type {
        DataType::Int64 => parse_int64(value).map(Value::Int64),
        DataType::Utf8 => parse_text(value).map(Value::Utf8),
        DataType::Date => parse_date_value(value).map(Value::Date),
    }
}

fn parse_int64(value: &Value) -> Result<i64, String> {
    match value {
        Value::Int64(v) => Ok(*v),
        Value::Float64(v)
            if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64 =>
        {
            Ok(*v as i64)
        }
        Value::Float64(_) => Err("expected integer, got a fractional number".to_string()),
        Value::Utf8(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("expected integer: {e}")),
        Value::Null => Err("field required".to_string()),
        Value::Date(_) => Err("expected integer, got a date".to_string()),
    }
}

fn parse_text(value: &Value) -> Result<String, String> {
    match value {
        Value::Utf8(s) => Ok(s.clone()),
        Value::Int64(_) | Value::Float64(_) => Ok(value.to_string()),
        Value::Null => Err("field required".to_string()),
        Value::Date(_) => Err("expected text, got a date".to_string()),
    }
}

fn parse_date_value(value: &Value) -> Result<NaiveDate, String> {
    match value {
        Value::Date(d) => Ok(*d),
        Value::Utf8(s) => parse_date_str(s),
        Value::Null => Err("field required".to_string()),
        Value::Int64(_) | Value::Float64(_) => {
            Err("expected date in YYYY-MM-DD format, got a number".to_string())
        }
    }
}
