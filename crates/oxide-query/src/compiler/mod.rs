//! Statement compilation.
//!
//! The compiler is a single recursive pass over an immutable [`Statement`].
//! Text and bindings are appended side by side, so the order of the
//! bindings always matches the order of the placeholders in the text,
//! including placeholders contributed by nested statements and raw
//! fragments.

mod condition;
mod delete;
mod ident;
mod insert;
mod literal;
mod raw;
mod select;
mod update;

use serde::Serialize;
use tracing::debug;

use crate::ast::{Operand, Statement, StatementKind, SubQuery};
use crate::client::Client;
use crate::dialect::Grammar;
use crate::error::{QueryError, Result};
use crate::value::SqlValue;

/// Compiled SQL text with its ordered bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledQuery {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// One value per placeholder, in placeholder order.
    pub bindings: Vec<SqlValue>,
}

impl CompiledQuery {
    /// Returns true when nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Appends text that holds no placeholder. A bare `?` is escaped as
    /// `\?`, so the only unescaped question marks are the ones written by
    /// [`CompiledQuery::bind`].
    fn push(&mut self, text: &str) {
        if !text.contains('?') {
            self.sql.push_str(text);
            return;
        }
        let mut escaped = self.sql.ends_with('\\');
        for ch in text.chars() {
            if ch == '?' && !escaped {
                self.sql.push('\\');
            }
            escaped = ch == '\\' && !escaped;
            self.sql.push(ch);
        }
    }

    fn bind(&mut self, value: SqlValue) {
        self.sql.push('?');
        self.bindings.push(value);
    }

    fn append(&mut self, other: Self) {
        self.sql.push_str(&other.sql);
        self.bindings.extend(other.bindings);
    }
}

fn count_value(n: u64) -> SqlValue {
    SqlValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Renders statements for one client.
pub(crate) struct QueryCompiler {
    client: Client,
    grammar: &'static Grammar,
}

impl QueryCompiler {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            grammar: client.grammar(),
        }
    }

    /// Compiles a top-level statement.
    pub(crate) fn compile(&self, statement: &Statement) -> Result<CompiledQuery> {
        let mut out = CompiledQuery::default();
        self.statement(statement, &mut out)?;
        debug!(
            dialect = self.grammar.name,
            sql = %out.sql,
            bindings = out.bindings.len(),
            "compiled statement"
        );
        Ok(out)
    }

    fn statement(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        if let Some(error) = statement.error() {
            return Err(error.clone());
        }
        match statement.kind() {
            StatementKind::Select => self.select(statement, out),
            StatementKind::Insert => self.insert(statement, out),
            StatementKind::Update => self.update(statement, out),
            StatementKind::Delete => self.delete(statement, out),
            StatementKind::Truncate => self.truncate(statement, out),
        }
    }

    /// Runs a sub-query callback that was never attached to a builder,
    /// for instance one inside a standalone [`Statement`] or raw fragment.
    fn deferred(&self, callback: &SubQuery) -> Statement {
        callback.build(self.client).into_statement()
    }

    /// Renders a nested statement in parentheses.
    fn subquery(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        out.push("(");
        self.statement(statement, out)?;
        out.push(")");
        Ok(())
    }

    /// Renders a value position.
    fn operand(&self, operand: &Operand, out: &mut CompiledQuery) -> Result<()> {
        match operand {
            Operand::Value(value) => out.bind(value.clone()),
            Operand::Raw(raw) => self.raw(raw, out)?,
            Operand::Query(statement) => self.subquery(statement, out)?,
            Operand::Deferred(callback) => self.subquery(&self.deferred(callback), out)?,
            Operand::Undefined => {
                return Err(QueryError::Value(String::from(
                    "undefined value in a value position",
                )))
            }
        }
        Ok(())
    }

    /// Renders a sub-query or raw fragment without parentheses.
    fn unwrapped(&self, operand: &Operand, out: &mut CompiledQuery) -> Result<()> {
        match operand {
            Operand::Query(statement) => self.statement(statement, out),
            Operand::Deferred(callback) => self.statement(&self.deferred(callback), out),
            Operand::Raw(raw) => self.raw(raw, out),
            other => self.operand(other, out),
        }
    }

    fn truncate(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        let (prefix, suffix) = self.grammar.truncate;
        out.push(prefix);
        self.source(statement, out)?;
        out.push(suffix);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    #[test]
    fn test_bind_appends_placeholder() {
        let mut out = CompiledQuery::default();
        out.push("a = ");
        out.bind(SqlValue::Int(1));
        assert_eq!(out.sql, "a = ?");
        assert_eq!(out.bindings, [SqlValue::Int(1)]);
    }

    #[test]
    fn test_push_escapes_question_marks() {
        let mut out = CompiledQuery::default();
        out.push(r#""what?" = "#);
        out.bind(SqlValue::Int(1));
        out.push(r#" and "data" \? 'k'"#);
        assert_eq!(out.sql, r#""what\?" = ? and "data" \? 'k'"#);
        assert_eq!(out.sql.matches('?').count() - out.sql.matches("\\?").count(), 1);
    }

    #[test]
    fn test_recorded_error_stops_compilation() {
        let mut statement = Statement::new();
        statement.fail(QueryError::Operator(String::from("isnt")));
        let compiler = QueryCompiler::new(Client::new(Dialect::Generic));
        assert_eq!(
            compiler.compile(&statement),
            Err(QueryError::Operator(String::from("isnt")))
        );
    }

    #[test]
    fn test_compiled_query_serializes() {
        let compiled = CompiledQuery {
            sql: String::from("select ?"),
            bindings: vec![SqlValue::Int(1)],
        };
        assert_eq!(
            serde_json::to_string(&compiled).unwrap(),
            r#"{"sql":"select ?","bindings":[1]}"#
        );
    }
}
