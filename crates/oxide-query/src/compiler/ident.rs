//! Identifier wrapping.

use std::sync::LazyLock;

use regex::Regex;

use super::{CompiledQuery, QueryCompiler};
use crate::ast::{Aggregate, Column, Statement};
use crate::error::{QueryError, Result};

static ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(.+?)\s+as\s+(.+?)\s*$").expect("invalid built-in alias regex")
});

static SUBSCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\[]+)(\[.*\])$").expect("invalid built-in subscript regex")
});

/// Splits on dots that are not inside brackets.
fn segments(name: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in name.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                parts.push(&name[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&name[start..]);
    parts
}

/// Splits `expr as alias`.
fn split_alias(name: &str) -> (&str, Option<&str>) {
    match ALIAS.captures(name) {
        Some(captures) => match (captures.get(1), captures.get(2)) {
            (Some(expr), Some(alias)) => (expr.as_str(), Some(alias.as_str())),
            _ => (name, None),
        },
        None => (name.trim(), None),
    }
}

impl QueryCompiler {
    fn wrap_segment(&self, segment: &str) -> String {
        if segment == "*" {
            return String::from("*");
        }
        if self.grammar.array_subscripts {
            if let Some(captures) = SUBSCRIPT.captures(segment) {
                if let (Some(column), Some(subscript)) = (captures.get(1), captures.get(2)) {
                    return format!(
                        "{}{}",
                        self.grammar.quote_identifier(column.as_str()),
                        subscript.as_str()
                    );
                }
            }
        }
        self.grammar.quote_identifier(segment)
    }

    fn wrap_dotted(&self, name: &str) -> String {
        segments(name)
            .into_iter()
            .map(|segment| self.wrap_segment(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn alias_suffix(&self, alias: &str) -> String {
        format!(
            "{}{}",
            self.grammar.alias_separator,
            self.grammar.quote_identifier(alias)
        )
    }

    /// Quotes a possibly dotted and aliased identifier.
    pub(super) fn wrap(&self, name: &str) -> String {
        match split_alias(name) {
            (expr, Some(alias)) => format!("{}{}", self.wrap_dotted(expr), self.alias_suffix(alias)),
            (expr, None) => self.wrap_dotted(expr),
        }
    }

    fn aggregate(&self, aggregate: &Aggregate, out: &mut CompiledQuery) {
        let (expr, alias) = split_alias(&aggregate.column);
        out.push(aggregate.function);
        out.push("(");
        if aggregate.distinct {
            out.push("distinct ");
        }
        out.push(&self.wrap_dotted(expr));
        out.push(")");
        if let Some(alias) = alias {
            out.push(&self.alias_suffix(alias));
        }
    }

    fn aliased_subquery(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        self.subquery(statement, out)?;
        if let Some(alias) = statement.alias() {
            out.push(&self.alias_suffix(alias));
        }
        Ok(())
    }

    /// Renders an identifier position.
    pub(super) fn column(&self, column: &Column, out: &mut CompiledQuery) -> Result<()> {
        match column {
            Column::Name(name) => out.push(&self.wrap(name)),
            Column::Number(number) => out.push(number),
            Column::Raw(raw) => self.raw(raw, out)?,
            Column::Query(statement) => self.aliased_subquery(statement, out)?,
            Column::Deferred(callback) => self.aliased_subquery(&self.deferred(callback), out)?,
            Column::Aggregate(aggregate) => self.aggregate(aggregate, out),
        }
        Ok(())
    }

    /// Renders a comma separated identifier list.
    pub(super) fn columns(&self, columns: &[Column], out: &mut CompiledQuery) -> Result<()> {
        for (index, column) in columns.iter().enumerate() {
            if index > 0 {
                out.push(", ");
            }
            self.column(column, out)?;
        }
        Ok(())
    }

    /// Renders a table position, qualified with the schema when it is a name.
    pub(super) fn table(
        &self,
        table: &Column,
        schema: Option<&str>,
        out: &mut CompiledQuery,
    ) -> Result<()> {
        match (table, schema) {
            (Column::Name(name), Some(schema)) => {
                out.push(&self.wrap(&format!("{schema}.{}", name.trim_start())));
                Ok(())
            }
            _ => self.column(table, out),
        }
    }

    /// Renders the statement's own table.
    pub(super) fn source(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        match &statement.table {
            Some(table) => self.table(table, statement.schema.as_deref(), out),
            None => Err(QueryError::Structure(String::from(
                "statement has no table",
            ))),
        }
    }

    /// The name a mutation refers to its table by: the alias when one is
    /// given, else the qualified name.
    pub(super) fn table_reference(&self, statement: &Statement) -> Option<String> {
        match &statement.table {
            Some(Column::Name(name)) => Some(match split_alias(name) {
                (_, Some(alias)) => self.grammar.quote_identifier(alias),
                (expr, None) => match statement.schema.as_deref() {
                    Some(schema) => self.wrap_dotted(&format!("{schema}.{expr}")),
                    None => self.wrap_dotted(expr),
                },
            }),
            _ => None,
        }
    }

    /// Quotes a list of bare column names.
    pub(super) fn wrap_list(&self, names: &[String], prefix: &str) -> String {
        names
            .iter()
            .map(|name| format!("{prefix}{}", self.wrap(name)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
