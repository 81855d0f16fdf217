//! UPDATE statements.

use crate::ast::{Operand, Row, StatementKind};

use super::Builder;

impl Builder {
    /// Turns the statement into an UPDATE of the given assignments.
    ///
    /// Undefined values are dropped; a statement left without assignments
    /// fails to compile.
    pub fn update(mut self, row: impl Into<Row>) -> Self {
        self.statement.kind = StatementKind::Update;
        for (column, value) in row.into() {
            if matches!(value, Operand::Undefined) {
                continue;
            }
            let value = self.resolve(value);
            match self
                .statement
                .assignments
                .iter_mut()
                .find(|(name, _)| *name == column)
            {
                Some(entry) => entry.1 = value,
                None => self.statement.assignments.push((column, value)),
            }
        }
        self
    }

    /// UPDATE with RETURNING columns.
    pub fn update_returning<I>(self, row: impl Into<Row>, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.update(row).returning(columns)
    }
}
