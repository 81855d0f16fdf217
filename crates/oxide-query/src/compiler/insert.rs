//! INSERT rendering and the multi-row and returning strategies.

use tracing::debug;

use super::{CompiledQuery, QueryCompiler};
use crate::ast::{InsertSource, Operand, Row, Statement};
use crate::dialect::{DefaultRow, MultiInsert, Returning};
use crate::error::{QueryError, Result};
use crate::value::SqlValue;

/// Union of the keys of every row, in first-seen order.
fn column_union(rows: &[Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for (column, _) in row.iter() {
            if !columns.iter().any(|known| known == column) {
                columns.push(String::from(column));
            }
        }
    }
    columns
}

/// Replaces every unescaped `?` with an oracle bind name `:1`, `:2`, ...
fn numbered_placeholders(sql: &str) -> (String, usize) {
    let mut numbered = String::with_capacity(sql.len());
    let mut count = 0;
    let mut chars = sql.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'?') => {
                chars.next();
                numbered.push_str("\\?");
            }
            '?' => {
                count += 1;
                numbered.push_str(&format!(":{count}"));
            }
            _ => numbered.push(ch),
        }
    }
    (numbered, count)
}

impl QueryCompiler {
    pub(super) fn insert(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        match &statement.insert {
            None => Ok(()),
            Some(InsertSource::Query(query)) => {
                out.push("insert into ");
                self.source(statement, out)?;
                out.push(" ");
                self.unwrapped(query, out)
            }
            Some(InsertSource::Rows(rows)) if rows.is_empty() => Ok(()),
            Some(InsertSource::Rows(rows)) => {
                let columns = column_union(rows);
                if columns.is_empty() {
                    self.default_rows(statement, rows.len(), out)
                } else {
                    self.insert_rows(statement, &columns, rows, out)
                }
            }
        }
    }

    /// Renders the value of `column` in `row`, or the undefined marker.
    fn insert_value(&self, row: &Row, column: &str, out: &mut CompiledQuery) -> Result<()> {
        match row.get(column) {
            Some(Operand::Undefined) | None => match self.client.undefined_marker() {
                Some(marker) => {
                    out.push(marker);
                    Ok(())
                }
                None => Err(QueryError::Value(format!(
                    "undefined value for column \"{column}\" in an insert"
                ))),
            },
            Some(value) => self.operand(value, out),
        }
    }

    fn row_values(&self, row: &Row, columns: &[String], out: &mut CompiledQuery) -> Result<()> {
        out.push("(");
        for (index, column) in columns.iter().enumerate() {
            if index > 0 {
                out.push(", ");
            }
            self.insert_value(row, column, out)?;
        }
        out.push(")");
        Ok(())
    }

    fn insert_rows(
        &self,
        statement: &Statement,
        columns: &[String],
        rows: &[Row],
        out: &mut CompiledQuery,
    ) -> Result<()> {
        let mut head = CompiledQuery::default();
        head.push("insert into ");
        self.source(statement, &mut head)?;
        head.push(" (");
        head.push(&self.wrap_list(columns, ""));
        head.push(")");

        match self.grammar.multi_insert {
            MultiInsert::Block if rows.len() > 1 => {
                return self.insert_block(statement, &head.sql, columns, rows, out);
            }
            MultiInsert::UnionAll if rows.len() > 1 => {
                out.append(head);
                for (index, row) in rows.iter().enumerate() {
                    out.push(if index == 0 { " select " } else { " union all select " });
                    for (position, column) in columns.iter().enumerate() {
                        if position > 0 {
                            out.push(", ");
                        }
                        self.insert_value(row, column, out)?;
                        out.push(" as ");
                        out.push(&self.grammar.quote_identifier(column));
                    }
                }
                self.returning_dropped(statement);
                return Ok(());
            }
            _ => {}
        }

        out.append(head);
        self.output_clause(statement, "inserted", out);
        out.push(" values ");
        for (index, row) in rows.iter().enumerate() {
            if index > 0 {
                out.push(", ");
            }
            self.row_values(row, columns, out)?;
        }
        self.returning_clause(statement, out);
        Ok(())
    }

    /// One `execute immediate` per row inside an anonymous block.
    fn insert_block(
        &self,
        statement: &Statement,
        head: &str,
        columns: &[String],
        rows: &[Row],
        out: &mut CompiledQuery,
    ) -> Result<()> {
        out.push("begin ");
        for row in rows {
            let mut values = CompiledQuery::default();
            self.row_values(row, columns, &mut values)?;
            let (numbered, count) = numbered_placeholders(&values.sql);
            let mut text = format!("{head} values {numbered}");
            if !statement.returning.is_empty() {
                text.push_str(&format!(" returning ROWID into :{}", count + 1));
            }
            out.push("execute immediate '");
            out.push(&text.replace('\'', "''"));
            out.push("'");
            let mut first = true;
            for value in values.bindings {
                out.push(if first { " using " } else { ", " });
                first = false;
                out.bind(value);
            }
            if !statement.returning.is_empty() {
                out.push(if first { " using out " } else { ", out " });
                out.bind(SqlValue::Returning(statement.returning.clone()));
            }
            out.push("; ");
        }
        out.push("end;");
        Ok(())
    }

    /// An insert whose rows set no column at all.
    fn default_rows(&self, statement: &Statement, count: usize, out: &mut CompiledQuery) -> Result<()> {
        let default_row = self.grammar.default_row;
        if count > 1 && default_row != DefaultRow::EmptyValues {
            return Err(QueryError::Structure(format!(
                "{} cannot insert several rows without columns",
                self.grammar.name
            )));
        }
        out.push("insert into ");
        self.source(statement, out)?;
        match default_row {
            DefaultRow::DefaultValues => {
                self.output_clause(statement, "inserted", out);
                out.push(" default values");
                self.returning_clause(statement, out);
            }
            DefaultRow::EmptyValues => {
                out.push(" () values ");
                out.push(&vec!["()"; count].join(", "));
            }
            DefaultRow::ReturningColumn => {
                let Some(column) = statement.returning.first() else {
                    return Err(QueryError::Structure(format!(
                        "{} needs a returning column to insert a row without columns",
                        self.grammar.name
                    )));
                };
                out.push(" (");
                out.push(&self.wrap(column));
                out.push(") values (default)");
                self.returning_clause(statement, out);
            }
        }
        Ok(())
    }

    /// `output inserted.[a]` ahead of the values or where clause.
    pub(super) fn output_clause(&self, statement: &Statement, table: &str, out: &mut CompiledQuery) {
        if self.grammar.returning == Returning::Output && !statement.returning.is_empty() {
            out.push(" output ");
            out.push(&self.wrap_list(&statement.returning, &format!("{table}.")));
        }
    }

    /// Trailing `returning` for the clause and rowid strategies.
    pub(super) fn returning_clause(&self, statement: &Statement, out: &mut CompiledQuery) {
        if statement.returning.is_empty() {
            return;
        }
        match self.grammar.returning {
            Returning::Clause => {
                out.push(" returning ");
                out.push(&self.wrap_list(&statement.returning, ""));
            }
            Returning::RowId => {
                out.push(" returning ROWID into ");
                out.bind(SqlValue::Returning(statement.returning.clone()));
            }
            Returning::Output => {}
            Returning::Unsupported => self.returning_dropped(statement),
        }
    }

    pub(super) fn returning_dropped(&self, statement: &Statement) {
        if !statement.returning.is_empty() {
            debug!(
                dialect = self.grammar.name,
                columns = ?statement.returning,
                "returning is not supported here; clause dropped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_union_first_seen() {
        let rows = [
            Row::new().set("a", 1),
            Row::new().set("b", 2).set("a", 3),
            Row::new().set("c", 4),
        ];
        assert_eq!(column_union(&rows), ["a", "b", "c"]);
    }

    #[test]
    fn test_numbered_placeholders() {
        assert_eq!(
            numbered_placeholders("(?, DEFAULT, ?)"),
            (String::from("(:1, DEFAULT, :2)"), 2)
        );
        assert_eq!(
            numbered_placeholders(r"('x\?', ?)"),
            (String::from(r"('x\?', :1)"), 1)
        );
    }
}
