//! SQL values and parameter handling.
//!
//! Values are always bound as parameters in compiled output. The literal
//! form is only produced for logging, where each grammar decides how
//! dates, arrays and blobs are spelled.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::dialect::{ArrayLiteral, BlobLiteral, Grammar};

/// A SQL value that can be used as a parameter.
///
/// All values are parameterized in compiled output to prevent SQL injection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Timestamp without time zone.
    DateTime(NaiveDateTime),
    /// Structured JSON document.
    Json(serde_json::Value),
    /// Array bound as a single parameter.
    Array(Vec<SqlValue>),
    /// Out parameter receiving the identity of the rows written by an
    /// insert or update; the executor binds it as an output slot.
    Returning(Vec<String>),
}

impl SqlValue {
    /// Returns the SQL representation for inline use (escaped).
    ///
    /// **Warning**: Prefer using parameterized queries instead.
    #[must_use]
    pub fn to_sql_inline(&self, grammar: &Grammar) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                let (yes, no) = grammar.booleans;
                String::from(if *b { yes } else { no })
            }
            Self::Int(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => quote_text(s),
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                match grammar.blob_literal {
                    BlobLiteral::HexString => format!("X'{hex}'"),
                    BlobLiteral::Escaped => format!("'\\x{hex}'"),
                    BlobLiteral::Prefixed => format!("0x{hex}"),
                }
            }
            Self::Date(d) => quote_text(&d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => quote_text(&dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
            Self::Json(json) => quote_text(&json.to_string()),
            Self::Array(items) => {
                let items: Vec<String> =
                    items.iter().map(|item| item.to_sql_inline(grammar)).collect();
                match grammar.array_literal {
                    ArrayLiteral::Parenthesized => format!("({})", items.join(", ")),
                    ArrayLiteral::Constructor => format!("ARRAY[{}]", items.join(", ")),
                }
            }
            // Output slots cannot be inlined.
            Self::Returning(_) => String::from("?"),
        }
    }
}

fn quote_text(s: &str) -> String {
    // Escape single quotes by doubling them
    let escaped = s.replace('\'', "''");
    format!("'{escaped}'")
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! integer_values {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

integer_values!(i8, i16, i32, u8, u16, u32);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

impl ToSqlValue for NaiveDate {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Date(self)
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self)
    }
}

impl ToSqlValue for DateTime<Utc> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self.naive_utc())
    }
}

impl ToSqlValue for serde_json::Value {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Self::Null => SqlValue::Null,
            Self::Bool(b) => SqlValue::Bool(b),
            Self::Number(n) => n
                .as_i64()
                .map_or_else(|| SqlValue::Float(n.as_f64().unwrap_or(f64::NAN)), SqlValue::Int),
            Self::String(s) => SqlValue::Text(s),
            Self::Array(items) => {
                SqlValue::Array(items.into_iter().map(ToSqlValue::to_sql_value).collect())
            }
            object @ Self::Object(_) => SqlValue::Json(object),
        }
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl<T: ToSqlValue> ToSqlValue for Vec<T> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Array(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}
