//! Row to JSON conversion
//!
//! Result sets are passed through to clients with whatever columns the
//! statement produced, so rows are decoded by column type rather than into
//! fixed structs.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Number, Value};
use sqlx::{
    Column, Decode, Row, Type, TypeInfo,
    postgres::{PgRow, Postgres, types::PgMoney},
};
use std::str::FromStr;
use tracing::warn;

use crate::error::{DatabaseError, DatabaseResult};

/// One result row keyed by column name
pub type JsonRow = Map<String, Value>;

/// How a column's values are turned into JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    /// `void` results of procedures that return nothing
    Void,
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Money,
    Text,
    Json,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Bytes,
    Unsupported,
}

impl ColumnKind {
    pub(crate) fn of(type_name: &str) -> Self {
        match type_name {
            "VOID" => ColumnKind::Void,
            "BOOL" => ColumnKind::Bool,
            "INT2" => ColumnKind::Int2,
            "INT4" => ColumnKind::Int4,
            "INT8" => ColumnKind::Int8,
            "FLOAT4" => ColumnKind::Float4,
            "FLOAT8" => ColumnKind::Float8,
            "NUMERIC" => ColumnKind::Numeric,
            "MONEY" => ColumnKind::Money,
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => ColumnKind::Text,
            "JSON" | "JSONB" => ColumnKind::Json,
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "TIMESTAMP" => ColumnKind::Timestamp,
            "TIMESTAMPTZ" => ColumnKind::TimestampTz,
            "BYTEA" => ColumnKind::Bytes,
            _ => ColumnKind::Unsupported,
        }
    }
}

/// Convert a row to JSON, leaving out `void` columns.
///
/// Returns `None` when nothing but `void` columns remain, which is what a
/// procedure declared to return nothing yields.
pub fn row_to_json(row: &PgRow) -> DatabaseResult<Option<JsonRow>> {
    let mut object = JsonRow::new();

    for column in row.columns() {
        let type_name = column.type_info().name();
        let index = column.ordinal();

        let value = match ColumnKind::of(type_name) {
            ColumnKind::Void => continue,
            ColumnKind::Bool => get::<bool>(row, index)?.map(Value::Bool),
            ColumnKind::Int2 => get::<i16>(row, index)?.map(Value::from),
            ColumnKind::Int4 => get::<i32>(row, index)?.map(Value::from),
            ColumnKind::Int8 => get::<i64>(row, index)?.map(Value::from),
            ColumnKind::Float4 => get::<f32>(row, index)?.map(|v| float(f64::from(v))),
            ColumnKind::Float8 => get::<f64>(row, index)?.map(float),
            ColumnKind::Numeric => get::<BigDecimal>(row, index)?.map(|v| decimal(&v)),
            ColumnKind::Money => {
                get::<PgMoney>(row, index)?.map(|v| decimal(&v.to_bigdecimal(2)))
            }
            ColumnKind::Text => get::<String>(row, index)?.map(Value::String),
            ColumnKind::Json => get::<Value>(row, index)?,
            ColumnKind::Date => get::<NaiveDate>(row, index)?.map(|v| v.to_string().into()),
            ColumnKind::Time => get::<NaiveTime>(row, index)?.map(|v| v.to_string().into()),
            ColumnKind::Timestamp => get::<NaiveDateTime>(row, index)?
                .map(|v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
            ColumnKind::TimestampTz => {
                get::<DateTime<Utc>>(row, index)?.map(|v| Value::String(v.to_rfc3339()))
            }
            ColumnKind::Bytes => get::<Vec<u8>>(row, index)?.map(Value::from),
            ColumnKind::Unsupported => {
                warn!(
                    "Column {} has type {} which is not converted, returning null",
                    column.name(),
                    type_name
                );
                None
            }
        };

        object.insert(column.name().to_string(), value.unwrap_or(Value::Null));
    }

    if object.is_empty() && !row.columns().is_empty() {
        return Ok(None);
    }
    Ok(Some(object))
}

fn get<'r, T>(row: &'r PgRow, index: usize) -> DatabaseResult<Option<T>>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get::<Option<T>, _>(index)
        .map_err(DatabaseError::Query)
}

fn float(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(value.to_string()))
}

fn decimal(value: &BigDecimal) -> Value {
    let text = if value.is_integer() {
        value.with_scale(0).to_string()
    } else {
        value.normalized().to_string()
    };
    Number::from_str(&text)
        .map(Value::Number)
        .unwrap_or(Value::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_kinds_by_type_name() {
        assert_eq!(ColumnKind::of("VOID"), ColumnKind::Void);
        assert_eq!(ColumnKind::of("INT4"), ColumnKind::Int4);
        assert_eq!(ColumnKind::of("VARCHAR"), ColumnKind::Text);
        assert_eq!(ColumnKind::of("NUMERIC"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of("JSONB"), ColumnKind::Json);
        assert_eq!(ColumnKind::of("INT4[]"), ColumnKind::Unsupported);
    }

    #[test]
    fn decimals_become_json_numbers() {
        let price = BigDecimal::from_str("19.990").unwrap();
        assert_eq!(decimal(&price), serde_json::json!(19.99));

        let whole = BigDecimal::from_str("100.00").unwrap();
        assert_eq!(decimal(&whole), serde_json::json!(100));
    }

    #[test]
    fn non_finite_floats_are_strings() {
        assert_eq!(float(f64::NAN), Value::String("NaN".to_string()));
        assert_eq!(float(1.5), serde_json::json!(1.5));
    }
}
