//! Core data model types.
//!
//! The loader produces an untyped [`RawTable`]; validation turns it into typed [`Customer`]
//! records described by [`Customer::schema`].

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// UTF-8 string.
    Utf8,
    /// Calendar date without time of day.
    Date,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the expected shape of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// A single untyped cell of a [`RawTable`].
///
/// The CSV loader only produces [`Value::Utf8`], holding the cell text unchanged. The other
/// variants appear in rows built in code and as validated field values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string, kept verbatim.
    Utf8(String),
    /// Already-structured calendar date.
    Date(NaiveDate),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Untyped tabular data as read from a delimited file.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as `headers`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    /// Column names from the header line.
    pub headers: Vec<String>,
    /// Row-major cell storage, in file order.
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    /// Create a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate rows as [`RawRow`] views.
    pub fn iter_rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(|values| RawRow {
            headers: &self.headers,
            values,
        })
    }
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    headers: &'a [String],
    values: &'a [Value],
}

impl<'a> RawRow<'a> {
    /// Returns the cell for `column`, or `None` if the column is not in the header.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| self.values.get(idx))
    }
}

/// A validated customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    #[serde(serialize_with = "serialize_date")]
    pub signup_date: NaiveDate,
    pub country: String,
}

impl Customer {
    /// Column layout shared by validation and the writer.
    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new("customer_id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("signup_date", DataType::Date),
            Field::new("country", DataType::Utf8),
        ])
    }

    /// Build a record from validated values laid out as [`Customer::schema`].
    ///
    /// Returns `None` if the values do not match that layout.
    pub fn from_values(values: Vec<Value>) -> Option<Self> {
        let mut it = values.into_iter();
        match (it.next(), it.next(), it.next(), it.next(), it.next()) {
            (
                Some(Value::Int64(customer_id)),
                Some(Value::Utf8(name)),
                Some(Value::Date(signup_date)),
                Some(Value::Utf8(country)),
                None,
            ) => Some(Self {
                customer_id,
                name,
                signup_date,
                country,
            }),
            _ => None,
        }
    }
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_row_looks_up_by_column_name() {
        let table = RawTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Value::Int64(1), Value::Utf8("x".to_string())]],
        );
        let row = table.iter_rows().next().unwrap();
        assert_eq!(row.get("b"), Some(&Value::Utf8("x".to_string())));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn customer_schema_column_order() {
        let schema = Customer::schema();
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["customer_id", "name", "signup_date", "country"]
        );
        assert_eq!(schema.fields[2].data_type, DataType::Date);
    }

    #[test]
    fn from_values_requires_schema_layout() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let customer = Customer::from_values(vec![
            Value::Int64(5),
            Value::Utf8("007".to_string()),
            Value::Date(date),
            Value::Utf8("+44".to_string()),
        ])
        .unwrap();
        assert_eq!(customer.name, "007");
        assert_eq!(customer.country, "+44");

        assert!(Customer::from_values(vec![Value::Int64(5)]).is_none());
        assert!(
            Customer::from_values(vec![
                Value::Utf8("5".to_string()),
                Value::Utf8("a".to_string()),
                Value::Date(date),
                Value::Utf8("b".to_string()),
            ])
            .is_none()
        );
    }
}
