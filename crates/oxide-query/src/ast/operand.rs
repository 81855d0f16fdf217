//! Values and identifiers that can appear inside a statement.

use std::fmt;
use std::sync::Arc;

use super::statement::Statement;
use crate::builder::Builder;
use crate::client::Client;
use crate::raw::Raw;
use crate::value::{SqlValue, ToSqlValue};

/// A callback producing a sub-query from a fresh builder.
///
/// Callbacks are resolved against the client of the builder they are
/// attached to, so the sub-query always shares the outer dialect.
#[derive(Clone)]
pub struct SubQuery(Arc<dyn Fn(Builder) -> Builder + Send + Sync>);

impl SubQuery {
    /// Wraps a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Builder) -> Builder + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Runs the callback against a fresh builder of `client`.
    pub(crate) fn build(&self, client: Client) -> Builder {
        (self.0)(client.query_builder())
    }
}

impl fmt::Debug for SubQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubQuery(..)")
    }
}

/// Shorthand for [`SubQuery::new`].
///
/// ```rust
/// use oxide_query::{sub, Client, Dialect};
///
/// let query = Client::new(Dialect::Generic)
///     .query_builder()
///     .select(["*"])
///     .from("users")
///     .where_in("id", sub(|q| q.select(["user_id"]).from("orders")));
/// assert_eq!(
///     query.to_sql().unwrap().sql,
///     r#"select * from "users" where "id" in (select "user_id" from "orders")"#
/// );
/// ```
pub fn sub<F>(callback: F) -> SubQuery
where
    F: Fn(Builder) -> Builder + Send + Sync + 'static,
{
    SubQuery::new(callback)
}

/// Anything that can stand in a value position.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A bound parameter.
    Value(SqlValue),
    /// A raw fragment spliced into the text.
    Raw(Raw),
    /// A nested statement.
    Query(Arc<Statement>),
    /// A sub-query callback not yet attached to a builder.
    Deferred(SubQuery),
    /// A value the caller left out: dropped from updates and replaced by the
    /// grammar's default marker in inserts.
    Undefined,
}

impl Operand {
    /// Returns true for a bound NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Value(SqlValue::Null))
    }
}

impl<T: ToSqlValue> From<T> for Operand {
    fn from(value: T) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl From<Raw> for Operand {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

impl From<Statement> for Operand {
    fn from(statement: Statement) -> Self {
        Self::Query(Arc::new(statement))
    }
}

impl From<Builder> for Operand {
    fn from(builder: Builder) -> Self {
        Self::Query(Arc::new(builder.into_statement()))
    }
}

impl From<SubQuery> for Operand {
    fn from(callback: SubQuery) -> Self {
        Self::Deferred(callback)
    }
}

/// An aggregate used as a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Function name (`count`, `sum`, ...).
    pub function: &'static str,
    /// Aggregated column, optionally `column as alias`.
    pub column: String,
    /// Aggregate distinct values only.
    pub distinct: bool,
}

/// Anything that can stand in an identifier position: columns, tables and
/// join operands.
#[derive(Debug, Clone)]
pub enum Column {
    /// An identifier, possibly dotted and aliased (`users.id as uid`).
    Name(String),
    /// A raw fragment spliced into the text.
    Raw(Raw),
    /// A nested statement, rendered in parentheses with its alias.
    Query(Arc<Statement>),
    /// A sub-query callback not yet attached to a builder.
    Deferred(SubQuery),
    /// An aggregate function call.
    Aggregate(Aggregate),
    /// A numeric literal, passed through unquoted.
    Number(String),
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for Column {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<i32> for Column {
    fn from(n: i32) -> Self {
        Self::Number(n.to_string())
    }
}

impl From<i64> for Column {
    fn from(n: i64) -> Self {
        Self::Number(n.to_string())
    }
}

impl From<Raw> for Column {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

impl From<Statement> for Column {
    fn from(statement: Statement) -> Self {
        Self::Query(Arc::new(statement))
    }
}

impl From<Builder> for Column {
    fn from(builder: Builder) -> Self {
        Self::Query(Arc::new(builder.into_statement()))
    }
}

impl From<SubQuery> for Column {
    fn from(callback: SubQuery) -> Self {
        Self::Deferred(callback)
    }
}

impl From<Aggregate> for Column {
    fn from(aggregate: Aggregate) -> Self {
        Self::Aggregate(aggregate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_from_values() {
        assert!(Operand::from(None::<i32>).is_null());
        assert!(matches!(
            Operand::from(5),
            Operand::Value(SqlValue::Int(5))
        ));
        assert!(matches!(
            Operand::from(vec![1, 2]),
            Operand::Value(SqlValue::Array(ref items)) if items.len() == 2
        ));
    }

    #[test]
    fn test_column_from_number_is_literal() {
        assert!(matches!(Column::from(0), Column::Number(ref n) if n == "0"));
    }
}
