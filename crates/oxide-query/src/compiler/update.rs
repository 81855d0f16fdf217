//! UPDATE rendering.

use tracing::debug;

use super::{count_value, CompiledQuery, QueryCompiler};
use crate::ast::Statement;
use crate::dialect::MutationLimit;
use crate::error::{QueryError, Result};

impl QueryCompiler {
    pub(super) fn update(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        if statement.assignments.is_empty() {
            return Err(QueryError::Structure(String::from(
                "update has no assignments",
            )));
        }
        out.push("update ");
        self.mutation_top(statement, out);
        self.source(statement, out)?;
        if self.grammar.update_joins {
            self.joins(statement, out)?;
        } else {
            self.joins_dropped(statement, "update");
        }
        out.push(" set ");
        for (index, (column, value)) in statement.assignments.iter().enumerate() {
            if index > 0 {
                out.push(", ");
            }
            out.push(&self.wrap(column));
            out.push(" = ");
            self.operand(value, out)?;
        }
        self.output_clause(statement, "inserted", out);
        self.where_clause(statement, out)?;
        self.mutation_limit(statement, out)?;
        self.returning_clause(statement, out);
        self.mutation_suffix(statement, out);
        Ok(())
    }

    /// `top (?)` right after the verb on grammars that limit that way.
    pub(super) fn mutation_top(&self, statement: &Statement, out: &mut CompiledQuery) {
        if let (MutationLimit::Top, Some(limit)) = (self.grammar.mutation_limit, statement.limit) {
            out.push("top (");
            out.bind(count_value(limit));
            out.push(") ");
        }
    }

    /// Trailing `order by .. limit ?`, or a note that they were dropped.
    pub(super) fn mutation_limit(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        match self.grammar.mutation_limit {
            MutationLimit::Trailing => {
                self.order_by(statement, out)?;
                if let Some(limit) = statement.limit {
                    out.push(" limit ");
                    out.bind(count_value(limit));
                }
            }
            MutationLimit::Top => self.order_by(statement, out)?,
            MutationLimit::Omit if statement.limit.is_some() || !statement.orders.is_empty() => {
                debug!(
                    dialect = self.grammar.name,
                    "order by and limit are not supported on this mutation; clauses dropped"
                );
            }
            _ => {}
        }
        Ok(())
    }

    pub(super) fn mutation_suffix(&self, statement: &Statement, out: &mut CompiledQuery) {
        if statement.returning.is_empty() {
            out.push(self.grammar.mutation_suffix);
        }
    }

    pub(super) fn joins_dropped(&self, statement: &Statement, verb: &str) {
        if !statement.joins.is_empty() {
            debug!(
                dialect = self.grammar.name,
                verb,
                "joins are not supported on this mutation; clause dropped"
            );
        }
    }
}
