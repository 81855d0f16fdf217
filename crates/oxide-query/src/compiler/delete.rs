//! DELETE rendering.

use super::{CompiledQuery, QueryCompiler};
use crate::ast::Statement;
use crate::dialect::Returning;
use crate::error::Result;

impl QueryCompiler {
    pub(super) fn delete(&self, statement: &Statement, out: &mut CompiledQuery) -> Result<()> {
        out.push("delete ");
        self.mutation_top(statement, out);
        let joined = self.grammar.delete_joins && !statement.joins.is_empty();
        if joined {
            if let Some(reference) = self.table_reference(statement) {
                out.push(&reference);
                out.push(" ");
            }
        }
        out.push("from ");
        self.source(statement, out)?;
        if joined {
            self.joins(statement, out)?;
        } else {
            self.joins_dropped(statement, "delete");
        }
        self.output_clause(statement, "deleted", out);
        self.where_clause(statement, out)?;
        self.mutation_limit(statement, out)?;
        match self.grammar.returning {
            // Row identities cannot be captured from a delete.
            Returning::RowId => self.returning_dropped(statement),
            _ => self.returning_clause(statement, out),
        }
        self.mutation_suffix(statement, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::Client;
    use crate::dialect::Dialect;

    #[test]
    fn test_mysql_delete_with_join() {
        let sql = Client::new(Dialect::MySql)
            .table("users")
            .join("accounts", "users.account_id", "=", "accounts.id")
            .where_eq("accounts.closed", true)
            .del()
            .to_sql()
            .unwrap()
            .sql;
        assert_eq!(
            sql,
            "delete `users` from `users` inner join `accounts` on `users`.`account_id` = `accounts`.`id` where `accounts`.`closed` = ?"
        );
    }

    #[test]
    fn test_returning_per_dialect() {
        let delete = |dialect| {
            Client::new(dialect)
                .table("users")
                .where_eq("id", 1)
                .returning(["id"])
                .delete()
                .to_sql()
                .unwrap()
                .sql
        };
        assert_eq!(
            delete(Dialect::Postgres),
            r#"delete from "users" where "id" = ? returning "id""#
        );
        assert_eq!(
            delete(Dialect::MsSql),
            "delete from [users] output deleted.[id] where [id] = ?"
        );
        assert_eq!(delete(Dialect::Sqlite), r#"delete from "users" where "id" = ?"#);
    }
}
