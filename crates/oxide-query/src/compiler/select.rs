//! SELECT rendering, pagination strategies, unions and row locks.

use tracing::{debug, trace, warn};

use super::{count_value, CompiledQuery, QueryCompiler};
use crate::ast::{Join, JoinClause, Lock, Operand, Order, Statement};
use crate::dialect::{OffsetOnly, Pagination};
use crate::error::Result;
use crate::value::SqlValue;

impl QueryCompiler {
    pub(super) fn select(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        let paginated = statement.limit.is_some() || statement.offset.is_some();
        match self.grammar.pagination {
            Pagination::RowNumber { unbounded_limit } if paginated => {
                let mut inner = CompiledQuery::default();
                self.select_core(statement, &mut inner)?;
                self.unions(statement, &mut inner)?;
                trace!(dialect = self.grammar.name, "wrapping select for rownum pagination");
                self.row_number(inner, statement, unbounded_limit, out);
            }
            _ => {
                self.select_core(statement, out)?;
                self.pagination(statement, out);
                self.unions(statement, out)?;
            }
        }
        if !self.grammar.lock_in_from {
            self.lock(statement, out);
        }
        Ok(())
    }

    /// Everything up to and including ORDER BY.
    fn select_core(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        out.push("select ");
        if statement.distinct {
            out.push("distinct ");
        }
        if let (Pagination::Top, Some(limit), None) =
            (self.grammar.pagination, statement.limit, statement.offset)
        {
            out.push("top (");
            out.bind(count_value(limit));
            out.push(") ");
        }
        if statement.columns.is_empty() {
            out.push("*");
        } else {
            self.columns(&statement.columns, out)?;
        }
        if statement.table.is_some() {
            out.push(" from ");
            self.source(statement, out)?;
        }
        self.joins(statement, out)?;
        if self.grammar.lock_in_from {
            self.lock(statement, out);
        }
        self.where_clause(statement, out)?;
        if !statement.groups.is_empty() {
            out.push(" group by ");
            self.columns(&statement.groups, out)?;
        }
        if !statement.havings.is_empty() {
            out.push(" having ");
            self.conditions(&statement.havings, out)?;
        }
        self.order_by(statement, out)
    }

    pub(super) fn joins(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        for join in &statement.joins {
            out.push(" ");
            match join {
                Join::Raw(raw) => self.raw(raw, out)?,
                Join::Clause(clause) => self.join(clause, statement.schema.as_deref(), out)?,
            }
        }
        Ok(())
    }

    fn join(&self, clause: &JoinClause, schema: Option<&str>, out: &mut CompiledQuery) -> Result<()> {
        if let Some(error) = &clause.error {
            return Err(error.clone());
        }
        out.push(clause.kind.as_str());
        out.push(" ");
        self.table(&clause.table, schema, out)?;
        if !clause.using.is_empty() {
            out.push(" using (");
            out.push(&self.wrap_list(&clause.using, ""));
            out.push(")");
        } else if !clause.conditions.is_empty() {
            out.push(" on ");
            self.conditions(&clause.conditions, out)?;
        }
        Ok(())
    }

    pub(super) fn where_clause(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        if !statement.wheres.is_empty() {
            out.push(" where ");
            self.conditions(&statement.wheres, out)?;
        }
        Ok(())
    }

    pub(super) fn order_by(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        for (index, order) in statement.orders.iter().enumerate() {
            out.push(if index == 0 { " order by " } else { ", " });
            match order {
                Order::Column { column, direction } => {
                    self.column(column, out)?;
                    out.push(" ");
                    out.push(direction.as_str());
                }
                Order::Raw(raw) => self.raw(raw, out)?,
            }
        }
        Ok(())
    }

    fn pagination(&self, statement: &Statement, out: &mut CompiledQuery) {
        match self.grammar.pagination {
            Pagination::LimitOffset { offset_only } => match (statement.limit, statement.offset) {
                (Some(limit), offset) => {
                    out.push(" limit ");
                    out.bind(count_value(limit));
                    if let Some(offset) = offset {
                        out.push(" offset ");
                        out.bind(count_value(offset));
                    }
                }
                (None, Some(offset)) => {
                    match offset_only {
                        OffsetOnly::Omit => {}
                        OffsetOnly::Literal(limit) => {
                            out.push(" limit ");
                            out.push(limit);
                        }
                        OffsetOnly::Bound(limit) => {
                            out.push(" limit ");
                            out.bind(SqlValue::Int(limit));
                        }
                    }
                    out.push(" offset ");
                    out.bind(count_value(offset));
                }
                (None, None) => {}
            },
            Pagination::Top => {
                // A bare limit was rendered as `top (?)`.
                if let Some(offset) = statement.offset {
                    out.push(" offset ");
                    out.bind(count_value(offset));
                    out.push(" rows");
                    if let Some(limit) = statement.limit {
                        out.push(" fetch next ");
                        out.bind(count_value(limit));
                        out.push(" rows only");
                    }
                }
            }
            // Handled by wrapping the whole statement.
            Pagination::RowNumber { .. } => {}
        }
    }

    fn row_number(
        &self,
        inner: CompiledQuery,
        statement: &Statement,
        unbounded_limit: u64,
        out: &mut CompiledQuery,
    ) {
        match statement.offset {
            None => {
                out.push("select * from (");
                out.append(inner);
                out.push(") where rownum <= ");
                out.bind(count_value(statement.limit.unwrap_or(unbounded_limit)));
            }
            Some(offset) => {
                let limit = statement.limit.unwrap_or(unbounded_limit);
                out.push("select * from (select row_.*, ROWNUM rownum_ from (");
                out.append(inner);
                out.push(") row_ where rownum <= ");
                out.bind(count_value(limit.saturating_add(offset)));
                out.push(") where rownum_ > ");
                out.bind(count_value(offset));
            }
        }
    }

    fn unions(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        for union in &statement.unions {
            out.push(if union.all { " union all " } else { " union " });
            if union.wrap {
                out.push("(");
            }
            match &union.query {
                Operand::Raw(raw) => self.raw(raw, out)?,
                other => self.unwrapped(other, out)?,
            }
            if union.wrap {
                out.push(")");
            }
        }
        Ok(())
    }

    fn lock(&self, statement: &Statement, out: &mut CompiledQuery) {
        let Some(lock) = statement.lock else {
            return;
        };
        if !statement.transacting {
            warn!(
                dialect = self.grammar.name,
                "row lock requested outside of a transaction; lock omitted"
            );
            return;
        }
        let clause = match lock {
            Lock::ForUpdate => self.grammar.lock_update,
            Lock::ForShare => self.grammar.lock_share,
        };
        match clause {
            Some(clause) => {
                out.push(" ");
                out.push(clause);
            }
            None => debug!(
                dialect = self.grammar.name,
                lock = ?lock,
                "row lock not supported; lock omitted"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::client::Client;
    use crate::dialect::Dialect;
    use crate::value::SqlValue;

    fn users(dialect: Dialect) -> crate::builder::Builder {
        Client::new(dialect).table("users")
    }

    #[test]
    fn test_offset_only_per_dialect() {
        let sql = |dialect| users(dialect).offset(5).to_sql().unwrap();
        assert_eq!(sql(Dialect::Generic).sql, r#"select * from "users" offset ?"#);
        assert_eq!(
            sql(Dialect::MySql).sql,
            "select * from `users` limit 18446744073709551615 offset ?"
        );
        let sqlite = sql(Dialect::Sqlite);
        assert_eq!(sqlite.sql, r#"select * from "users" limit ? offset ?"#);
        assert_eq!(sqlite.bindings, [SqlValue::Int(-1), SqlValue::Int(5)]);
    }

    #[test]
    fn test_mssql_top() {
        let compiled = users(Dialect::MsSql).where_eq("id", 1).limit(10).to_sql().unwrap();
        assert_eq!(compiled.sql, "select top (?) * from [users] where [id] = ?");
        assert_eq!(compiled.bindings, [SqlValue::Int(10), SqlValue::Int(1)]);
    }

    #[test]
    fn test_oracle_rownum_wrap() {
        let compiled = users(Dialect::Oracle)
            .where_eq("id", 1)
            .limit(10)
            .offset(5)
            .to_sql()
            .unwrap();
        assert_eq!(
            compiled.sql,
            r#"select * from (select row_.*, ROWNUM rownum_ from (select * from "users" where "id" = ?) row_ where rownum <= ?) where rownum_ > ?"#
        );
        assert_eq!(
            compiled.bindings,
            [SqlValue::Int(1), SqlValue::Int(15), SqlValue::Int(5)]
        );
    }

    #[test]
    fn test_lock_requires_transaction() {
        let sql = users(Dialect::Postgres).for_update().to_sql().unwrap().sql;
        assert_eq!(sql, r#"select * from "users""#);
        let sql = users(Dialect::Postgres)
            .for_share()
            .transacting()
            .to_sql()
            .unwrap()
            .sql;
        assert_eq!(sql, r#"select * from "users" for share"#);
        let sql = users(Dialect::MsSql)
            .where_eq("id", 1)
            .for_update()
            .transacting()
            .to_sql()
            .unwrap()
            .sql;
        assert_eq!(sql, "select * from [users] with (READCOMMITTEDLOCK) where [id] = ?");
    }
}
