//! INSERT statements and RETURNING.

use std::mem;
use std::sync::Arc;

use crate::ast::{InsertSource, Operand, Row, Statement, StatementKind, SubQuery};
use crate::error::QueryError;
use crate::raw::Raw;

use super::Builder;

impl From<Row> for InsertSource {
    fn from(row: Row) -> Self {
        Self::Rows(vec![row])
    }
}

impl From<Vec<Row>> for InsertSource {
    fn from(rows: Vec<Row>) -> Self {
        Self::Rows(rows)
    }
}

impl<const N: usize> From<[Row; N]> for InsertSource {
    fn from(rows: [Row; N]) -> Self {
        Self::Rows(rows.into())
    }
}

impl From<Raw> for InsertSource {
    fn from(raw: Raw) -> Self {
        Self::Query(Operand::Raw(raw))
    }
}

impl From<Statement> for InsertSource {
    fn from(statement: Statement) -> Self {
        Self::Query(Operand::Query(Arc::new(statement)))
    }
}

impl From<Builder> for InsertSource {
    fn from(builder: Builder) -> Self {
        Self::from(builder.into_statement())
    }
}

impl From<SubQuery> for InsertSource {
    fn from(callback: SubQuery) -> Self {
        Self::Query(Operand::Deferred(callback))
    }
}

impl Builder {
    /// Turns the statement into an INSERT of rows, a sub-query or a raw
    /// fragment.
    ///
    /// Columns are the union of the keys of every row in first-seen order;
    /// a row missing a column gets the grammar's default marker.
    pub fn insert(mut self, source: impl Into<InsertSource>) -> Self {
        self.statement.kind = StatementKind::Insert;
        let source = match source.into() {
            InsertSource::Rows(mut rows) => {
                for row in &mut rows {
                    for value in row.iter_mut() {
                        *value = self.resolve(mem::replace(value, Operand::Undefined));
                    }
                }
                InsertSource::Rows(rows)
            }
            InsertSource::Query(query) => {
                let query = self.resolve(query);
                if !matches!(query, Operand::Query(_) | Operand::Raw(_)) {
                    self.fail(QueryError::Structure(String::from(
                        "insert requires rows, a sub-query or a raw fragment",
                    )));
                }
                InsertSource::Query(query)
            }
        };
        self.statement.insert = Some(source);
        self
    }

    /// INSERT with RETURNING columns.
    pub fn insert_returning<I>(self, source: impl Into<InsertSource>, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.insert(source).returning(columns)
    }

    /// Sets the columns returned by an insert, update or delete.
    ///
    /// Ignored by grammars without a returning clause.
    pub fn returning<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.statement
            .returning
            .extend(columns.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{sub, InsertSource, Operand, Row, StatementKind};
    use crate::client::Client;
    use crate::dialect::Dialect;

    #[test]
    fn test_insert_resolves_nested_values() {
        let builder = Client::new(Dialect::Generic).table("users").insert(
            Row::new()
                .set("name", "taylor")
                .set("account_id", sub(|q| q.select(["id"]).from("accounts").limit(1))),
        );
        assert_eq!(builder.statement().kind(), StatementKind::Insert);
        let Some(InsertSource::Rows(rows)) = &builder.statement().insert else {
            panic!("expected rows");
        };
        assert!(matches!(rows[0].get("account_id"), Some(Operand::Query(_))));
    }

    #[test]
    fn test_returning_accumulates() {
        let builder = Client::new(Dialect::Postgres)
            .table("users")
            .insert_returning(Row::new().set("a", 1), ["id"])
            .returning(["name"]);
        assert_eq!(builder.statement().returning, ["id", "name"]);
    }
}
