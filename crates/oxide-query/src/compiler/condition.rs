//! WHERE, HAVING and ON trees.

use super::{CompiledQuery, QueryCompiler};
use crate::ast::{Column, Condition, ConditionNode, Conditions, Operand};
use crate::error::Result;
use crate::value::SqlValue;

impl QueryCompiler {
    /// Renders a condition tree; the first node's connector is ignored.
    pub(super) fn conditions(&self, conditions: &Conditions, out: &mut CompiledQuery) -> Result<()> {
        for (index, node) in conditions.iter().enumerate() {
            if index > 0 {
                out.push(node.connector.as_str());
            }
            self.condition(node, out)?;
        }
        Ok(())
    }

    fn condition(&self, node: &ConditionNode, out: &mut CompiledQuery) -> Result<()> {
        let not = if node.negated { "not " } else { "" };
        match &node.condition {
            Condition::Compare {
                column,
                operator,
                value,
            } => {
                out.push(not);
                self.column(column, out)?;
                out.push(" ");
                out.push(&operator.render());
                out.push(" ");
                if value.is_null() {
                    // Null outside of the IS NULL rewrite is never bound.
                    out.push("NULL");
                } else {
                    self.operand(value, out)?;
                }
            }
            Condition::Columns {
                first,
                operator,
                second,
            } => {
                out.push(not);
                self.column(first, out)?;
                out.push(" ");
                out.push(&operator.render());
                out.push(" ");
                self.column(second, out)?;
            }
            Condition::In { column, values } => self.in_list(node.negated, column, values, out)?,
            Condition::Null { column } => {
                self.column(column, out)?;
                out.push(if node.negated {
                    " is not null"
                } else {
                    " is null"
                });
            }
            Condition::Between { column, low, high } => {
                self.column(column, out)?;
                out.push(if node.negated {
                    " not between "
                } else {
                    " between "
                });
                self.operand(low, out)?;
                out.push(" and ");
                self.operand(high, out)?;
            }
            Condition::Exists(query) => {
                out.push(if node.negated { "not exists " } else { "exists " });
                self.parenthesized(query, out)?;
            }
            Condition::Group(inner) => {
                out.push(not);
                out.push("(");
                self.conditions(inner, out)?;
                out.push(")");
            }
            Condition::Raw(raw) => {
                out.push(not);
                self.raw(raw, out)?;
            }
            Condition::Literal(value) => {
                out.push(not);
                out.push(if *value { "1 = 1" } else { "1 = 0" });
            }
        }
        Ok(())
    }

    fn in_list(
        &self,
        negated: bool,
        column: &Column,
        values: &Operand,
        out: &mut CompiledQuery,
    ) -> Result<()> {
        if let Operand::Value(SqlValue::Array(items)) = values {
            if items.is_empty() {
                out.push("1 = ");
                out.bind(SqlValue::Int(i64::from(negated)));
                return Ok(());
            }
        }
        self.column(column, out)?;
        out.push(if negated { " not in " } else { " in " });
        match values {
            Operand::Value(SqlValue::Array(items)) => {
                out.push("(");
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(", ");
                    }
                    out.bind(item.clone());
                }
                out.push(")");
                Ok(())
            }
            other => self.parenthesized(other, out),
        }
    }

    /// Renders a sub-query or raw fragment inside parentheses.
    fn parenthesized(&self, operand: &Operand, out: &mut CompiledQuery) -> Result<()> {
        match operand {
            Operand::Raw(raw) => {
                out.push("(");
                self.raw(raw, out)?;
                out.push(")");
                Ok(())
            }
            other => self.operand(other, out),
        }
    }
}
