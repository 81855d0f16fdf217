//! DELETE and TRUNCATE statements.

use crate::ast::StatementKind;

use super::Builder;

impl Builder {
    /// Turns the statement into a DELETE.
    pub fn delete(mut self) -> Self {
        self.statement.kind = StatementKind::Delete;
        self
    }

    /// Alias of [`Builder::delete`].
    pub fn del(self) -> Self {
        self.delete()
    }

    /// Turns the statement into a TRUNCATE of the source table.
    pub fn truncate(mut self) -> Self {
        self.statement.kind = StatementKind::Truncate;
        self
    }
}
