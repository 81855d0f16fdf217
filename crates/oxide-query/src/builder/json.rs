//! Declarative statement descriptions.
//!
//! A JSON object whose keys name builder calls, applied in document order:
//!
//! ```rust
//! use oxide_query::{Client, Dialect};
//! use serde_json::json;
//!
//! let query = Client::new(Dialect::MySql).query_builder().from_json(&json!({
//!     "select": ["id", "email"],
//!     "from": "users",
//!     "where": {"active": true},
//!     "orderBy": ["created_at", "desc"],
//!     "limit": 5
//! }));
//! assert_eq!(
//!     query.to_sql().unwrap().sql,
//!     "select `id`, `email` from `users` where `active` = ? order by `created_at` desc limit ?"
//! );
//! ```

use serde_json::{Map, Value};

use crate::ast::{Operand, Row};
use crate::error::{QueryError, Result};
use crate::raw::{Bindings, Raw};

use super::Builder;

type Step = Box<dyn FnOnce(Builder) -> Builder>;

fn shape(key: &str, expected: &str) -> QueryError {
    QueryError::Value(format!("{key} expects {expected}"))
}

fn string(key: &str, arg: &Value) -> Result<String> {
    arg.as_str()
        .map(String::from)
        .ok_or_else(|| shape(key, "a string"))
}

fn strings(key: &str, arg: &Value) -> Result<Vec<String>> {
    match arg {
        Value::String(single) => Ok(vec![single.clone()]),
        Value::Array(items) => items.iter().map(|item| string(key, item)).collect(),
        _ => Err(shape(key, "a string or an array of strings")),
    }
}

fn array<'a>(key: &str, arg: &'a Value, lengths: &[usize]) -> Result<&'a [Value]> {
    match arg {
        Value::Array(items) if lengths.contains(&items.len()) => Ok(items),
        _ => Err(shape(
            key,
            &format!(
                "an array of {} elements",
                lengths
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ")
            ),
        )),
    }
}

fn operand(value: &Value) -> Operand {
    Operand::from(value.clone())
}

fn row(key: &str, arg: &Value) -> Result<Row> {
    arg.as_object()
        .map(object_row)
        .ok_or_else(|| shape(key, "an object"))
}

fn object_row(object: &Map<String, Value>) -> Row {
    object
        .iter()
        .map(|(column, value)| (column.clone(), operand(value)))
        .collect()
}

fn count(key: &str, arg: &Value) -> Result<Option<u64>> {
    match arg {
        Value::Null => Ok(None),
        _ => arg
            .as_u64()
            .map(Some)
            .ok_or_else(|| shape(key, "a non-negative integer")),
    }
}

fn is_direction(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|d| d.eq_ignore_ascii_case("asc") || d.eq_ignore_ascii_case("desc"))
}

/// A `where`-like argument: an object of equalities, `[column, value]` or
/// `[column, operator, value]`.
fn where_step(key: &str, arg: &Value, or: bool, not: bool) -> Result<Step> {
    let modifiers = move |builder: Builder| {
        let builder = if or { builder.or() } else { builder };
        if not {
            builder.not()
        } else {
            builder
        }
    };
    if let Value::Object(object) = arg {
        let row = object_row(object);
        return Ok(Box::new(move |b: Builder| modifiers(b).where_object(row)));
    }
    let items = array(key, arg, &[2, 3])?;
    let column = string(key, &items[0])?;
    if let [_, value] = items {
        let value = operand(value);
        return Ok(Box::new(move |b: Builder| modifiers(b).where_eq(column, value)));
    }
    let operator = string(key, &items[1])?;
    let value = operand(&items[2]);
    Ok(Box::new(move |b: Builder| {
        modifiers(b).where_op(column, &operator, value)
    }))
}

fn join_step(key: &str, arg: &Value, join: fn(Builder, String, String, &str, String) -> Builder) -> Result<Step> {
    let items = array(key, arg, &[3, 4])?;
    let parts = items
        .iter()
        .map(|item| string(key, item))
        .collect::<Result<Vec<_>>>()?;
    let (table, first, operator, second) = match parts.as_slice() {
        [table, first, second] => (table.clone(), first.clone(), String::from("="), second.clone()),
        [table, first, operator, second] => {
            (table.clone(), first.clone(), operator.clone(), second.clone())
        }
        _ => return Err(shape(key, "an array of 3 or 4 strings")),
    };
    Ok(Box::new(move |b: Builder| join(b, table, first, &operator, second)))
}

fn order_step(key: &str, arg: &Value) -> Result<Step> {
    match arg {
        Value::String(column) => {
            let column = column.clone();
            Ok(Box::new(move |b: Builder| b.order_by(column)))
        }
        Value::Array(items) if items.len() == 2 && items[0].is_string() && is_direction(&items[1]) => {
            let column = string(key, &items[0])?;
            let direction = string(key, &items[1])?;
            Ok(Box::new(move |b: Builder| b.order_by_direction(column, &direction)))
        }
        Value::Array(items) => {
            let steps = items
                .iter()
                .map(|item| match item {
                    Value::Object(entry) => {
                        let column = entry
                            .get("column")
                            .ok_or_else(|| shape(key, "objects with a column"))
                            .and_then(|column| string(key, column))?;
                        let direction = match entry.get("order") {
                            Some(direction) => string(key, direction)?,
                            None => String::from("asc"),
                        };
                        Ok((column, direction))
                    }
                    _ => Ok((string(key, item)?, String::from("asc"))),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Box::new(move |b: Builder| {
                steps
                    .into_iter()
                    .fold(b, |b, (column, direction)| b.order_by_direction(column, &direction))
            }))
        }
        _ => Err(shape(key, "a column, [column, direction] or a list of orderings")),
    }
}

fn raw_fragment(key: &str, arg: &Value) -> Result<Raw> {
    match arg {
        Value::String(sql) => Ok(Raw::new(sql.clone())),
        Value::Array(items) if items.len() == 2 => {
            let sql = string(key, &items[0])?;
            let bindings = match &items[1] {
                Value::Array(values) => Bindings::Positional(values.iter().map(operand).collect()),
                Value::Object(values) => Bindings::named(
                    values.iter().map(|(name, value)| (name.clone(), operand(value))),
                ),
                single => Bindings::Positional(vec![operand(single)]),
            };
            Ok(Raw::with_bindings(sql, bindings))
        }
        _ => Err(shape(key, "a string or [sql, bindings]")),
    }
}

fn insert_step(key: &str, arg: &Value) -> Result<Step> {
    let rows = match arg {
        Value::Object(object) => vec![object_row(object)],
        Value::Array(items) => items
            .iter()
            .map(|item| row(key, item))
            .collect::<Result<Vec<_>>>()?,
        _ => return Err(shape(key, "an object or an array of objects")),
    };
    Ok(Box::new(move |b: Builder| b.insert(rows)))
}

/// Parses one clause into a builder step.
fn step(key: &str, arg: &Value) -> Result<Step> {
    let step: Step = match key {
        "select" | "columns" | "column" => {
            let columns = strings(key, arg)?;
            Box::new(move |b: Builder| b.select(columns))
        }
        "distinct" => {
            let columns = match arg {
                Value::Bool(_) | Value::Null => Vec::new(),
                _ => strings(key, arg)?,
            };
            Box::new(move |b: Builder| b.distinct().select(columns))
        }
        "from" | "table" | "into" => {
            let table = string(key, arg)?;
            Box::new(move |b: Builder| b.from(table))
        }
        "withSchema" => {
            let schema = string(key, arg)?;
            Box::new(move |b: Builder| b.with_schema(schema))
        }
        "as" => {
            let alias = string(key, arg)?;
            Box::new(move |b: Builder| b.alias(alias))
        }
        "where" | "andWhere" => where_step(key, arg, false, false)?,
        "orWhere" => where_step(key, arg, true, false)?,
        "whereNot" => where_step(key, arg, false, true)?,
        "orWhereNot" => where_step(key, arg, true, true)?,
        "whereIn" | "whereNotIn" | "orWhereIn" | "orWhereNotIn" => {
            let items = array(key, arg, &[2])?;
            let column = string(key, &items[0])?;
            if !items[1].is_array() {
                return Err(shape(key, "[column, [values]]"));
            }
            let values = operand(&items[1]);
            match key {
                "whereIn" => Box::new(move |b: Builder| b.where_in(column, values)),
                "whereNotIn" => Box::new(move |b: Builder| b.where_not_in(column, values)),
                "orWhereIn" => Box::new(move |b: Builder| b.or_where_in(column, values)),
                _ => Box::new(move |b: Builder| b.or_where_not_in(column, values)),
            }
        }
        "whereNull" | "whereNotNull" | "orWhereNull" | "orWhereNotNull" => {
            let column = string(key, arg)?;
            match key {
                "whereNull" => Box::new(move |b: Builder| b.where_null(column)),
                "whereNotNull" => Box::new(move |b: Builder| b.where_not_null(column)),
                "orWhereNull" => Box::new(move |b: Builder| b.or_where_null(column)),
                _ => Box::new(move |b: Builder| b.or_where_not_null(column)),
            }
        }
        "whereBetween" | "whereNotBetween" => {
            let items = array(key, arg, &[2])?;
            let column = string(key, &items[0])?;
            let bounds = array(key, &items[1], &[2])?;
            let bounds = [operand(&bounds[0]), operand(&bounds[1])];
            if key == "whereBetween" {
                Box::new(move |b: Builder| b.where_between(column, bounds))
            } else {
                Box::new(move |b: Builder| b.where_not_between(column, bounds))
            }
        }
        "whereRaw" => {
            let fragment = raw_fragment(key, arg)?;
            Box::new(move |b: Builder| b.where_raw(fragment))
        }
        "join" | "innerJoin" => join_step(key, arg, |b, t, f, o, s| b.join(t, f, o, s))?,
        "leftJoin" => join_step(key, arg, |b, t, f, o, s| b.left_join(t, f, o, s))?,
        "leftOuterJoin" => join_step(key, arg, |b, t, f, o, s| b.left_outer_join(t, f, o, s))?,
        "rightJoin" => join_step(key, arg, |b, t, f, o, s| b.right_join(t, f, o, s))?,
        "rightOuterJoin" => join_step(key, arg, |b, t, f, o, s| b.right_outer_join(t, f, o, s))?,
        "fullOuterJoin" => join_step(key, arg, |b, t, f, o, s| b.full_outer_join(t, f, o, s))?,
        "crossJoin" => {
            let table = string(key, arg)?;
            Box::new(move |b: Builder| b.cross_join(table))
        }
        "groupBy" => {
            let columns = strings(key, arg)?;
            Box::new(move |b: Builder| b.group_by(columns))
        }
        "having" => {
            let items = array(key, arg, &[3])?;
            let column = string(key, &items[0])?;
            let operator = string(key, &items[1])?;
            let value = operand(&items[2]);
            Box::new(move |b: Builder| b.having_op(column, &operator, value))
        }
        "orderBy" => order_step(key, arg)?,
        "limit" => {
            let limit = count(key, arg)?;
            Box::new(move |b: Builder| b.limit(limit))
        }
        "offset" => {
            let offset = count(key, arg)?;
            Box::new(move |b: Builder| b.offset(offset))
        }
        "first" => {
            let columns = strings(key, arg)?;
            Box::new(move |b: Builder| b.first(columns))
        }
        "count" | "min" | "max" | "sum" | "avg" => {
            let column = string(key, arg)?;
            match key {
                "count" => Box::new(move |b: Builder| b.count(&column)),
                "min" => Box::new(move |b: Builder| b.min(&column)),
                "max" => Box::new(move |b: Builder| b.max(&column)),
                "sum" => Box::new(move |b: Builder| b.sum(&column)),
                _ => Box::new(move |b: Builder| b.avg(&column)),
            }
        }
        "insert" => insert_step(key, arg)?,
        "update" => {
            let assignments = row(key, arg)?;
            Box::new(move |b: Builder| b.update(assignments))
        }
        "returning" => {
            let columns = strings(key, arg)?;
            Box::new(move |b: Builder| b.returning(columns))
        }
        "delete" | "del" => Box::new(Builder::delete),
        "truncate" => Box::new(Builder::truncate),
        unknown => {
            return Err(QueryError::Structure(format!(
                "unknown clause \"{unknown}\""
            )))
        }
    };
    Ok(step)
}

impl Builder {
    /// Applies a declarative description.
    ///
    /// The first unknown key or badly shaped argument is recorded as the
    /// builder's error and stops processing.
    pub fn from_json(mut self, description: &Value) -> Self {
        let Some(clauses) = description.as_object() else {
            self.fail(QueryError::Value(String::from(
                "a statement description must be a JSON object",
            )));
            return self;
        };
        for (key, arg) in clauses {
            match step(key, arg) {
                Ok(apply) => self = apply(self),
                Err(error) => {
                    self.fail(error);
                    break;
                }
            }
        }
        self
    }
}
