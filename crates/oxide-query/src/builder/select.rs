//! Selection, sources, grouping, ordering, pagination, unions and locks.

use crate::ast::{Aggregate, Column, Direction, Lock, Operand, Order, Union};
use crate::error::QueryError;
use crate::raw::Raw;

use super::Builder;

impl Builder {
    /// Adds columns to the select list.
    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        for column in columns {
            let column = self.resolve_column(column.into());
            self.statement.columns.push(column);
        }
        self
    }

    /// Adds one column to the select list.
    pub fn column(self, column: impl Into<Column>) -> Self {
        self.select([column])
    }

    /// Selects distinct rows.
    pub fn distinct(mut self) -> Self {
        self.statement.distinct = true;
        self
    }

    /// Selects the given columns and limits the result to one row.
    pub fn first<I>(self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        self.select(columns).limit(1)
    }

    fn aggregate(mut self, function: &'static str, column: &str, distinct: bool) -> Self {
        self.statement.columns.push(Column::Aggregate(Aggregate {
            function,
            column: String::from(column),
            distinct,
        }));
        self
    }

    /// Selects `count(column)`; `column` may carry an alias (`id as total`).
    pub fn count(self, column: &str) -> Self {
        self.aggregate("count", column, false)
    }

    /// Selects `count(distinct column)`.
    pub fn count_distinct(self, column: &str) -> Self {
        self.aggregate("count", column, true)
    }

    /// Selects `min(column)`.
    pub fn min(self, column: &str) -> Self {
        self.aggregate("min", column, false)
    }

    /// Selects `min(distinct column)`.
    pub fn min_distinct(self, column: &str) -> Self {
        self.aggregate("min", column, true)
    }

    /// Selects `max(column)`.
    pub fn max(self, column: &str) -> Self {
        self.aggregate("max", column, false)
    }

    /// Selects `max(distinct column)`.
    pub fn max_distinct(self, column: &str) -> Self {
        self.aggregate("max", column, true)
    }

    /// Selects `sum(column)`.
    pub fn sum(self, column: &str) -> Self {
        self.aggregate("sum", column, false)
    }

    /// Selects `sum(distinct column)`.
    pub fn sum_distinct(self, column: &str) -> Self {
        self.aggregate("sum", column, true)
    }

    /// Selects `avg(column)`.
    pub fn avg(self, column: &str) -> Self {
        self.aggregate("avg", column, false)
    }

    /// Selects `avg(distinct column)`.
    pub fn avg_distinct(self, column: &str) -> Self {
        self.aggregate("avg", column, true)
    }

    /// Sets the source table: a name (optionally `name as alias`), a raw
    /// fragment or a sub-query.
    pub fn from(mut self, table: impl Into<Column>) -> Self {
        let table = self.resolve_column(table.into());
        self.statement.table = Some(table);
        self
    }

    /// Alias of [`Builder::from`].
    pub fn table(self, table: impl Into<Column>) -> Self {
        self.from(table)
    }

    /// Alias of [`Builder::from`], reading naturally before `insert`.
    pub fn into_table(self, table: impl Into<Column>) -> Self {
        self.from(table)
    }

    /// Qualifies the source table and joined tables with a schema.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.statement.schema = Some(schema.into());
        self
    }

    /// Names this statement when it is nested as a column or table.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.statement.alias = Some(alias.into());
        self
    }

    /// Adds GROUP BY columns.
    pub fn group_by<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Column>,
    {
        for column in columns {
            let column = self.resolve_column(column.into());
            self.statement.groups.push(column);
        }
        self
    }

    /// Adds a raw GROUP BY expression.
    pub fn group_by_raw(self, raw: impl Into<Raw>) -> Self {
        self.group_by([Column::Raw(raw.into())])
    }

    /// Orders ascending by a column.
    pub fn order_by(self, column: impl Into<Column>) -> Self {
        self.order(column.into(), Direction::Asc)
    }

    /// Orders descending by a column.
    pub fn order_by_desc(self, column: impl Into<Column>) -> Self {
        self.order(column.into(), Direction::Desc)
    }

    /// Orders by a column with a textual direction; anything but `desc`
    /// sorts ascending.
    pub fn order_by_direction(self, column: impl Into<Column>, direction: &str) -> Self {
        self.order(column.into(), Direction::parse(direction))
    }

    fn order(mut self, column: Column, direction: Direction) -> Self {
        let column = self.resolve_column(column);
        self.statement.orders.push(Order::Column { column, direction });
        self
    }

    /// Adds a raw ORDER BY expression.
    pub fn order_by_raw(mut self, raw: impl Into<Raw>) -> Self {
        if let Column::Raw(raw) = self.resolve_column(Column::Raw(raw.into())) {
            self.statement.orders.push(Order::Raw(raw));
        }
        self
    }

    /// Sets the row limit; `None` clears it.
    pub fn limit(mut self, limit: impl Into<Option<u64>>) -> Self {
        self.statement.limit = limit.into();
        self
    }

    /// Sets the number of rows to skip; `None` clears it.
    pub fn offset(mut self, offset: impl Into<Option<u64>>) -> Self {
        self.statement.offset = offset.into();
        self
    }

    /// Appends `union <query>`.
    pub fn union(self, query: impl Into<Operand>) -> Self {
        self.union_many([query], false, false)
    }

    /// Appends `union all <query>`.
    pub fn union_all(self, query: impl Into<Operand>) -> Self {
        self.union_many([query], true, false)
    }

    /// Appends `union (<query>)`.
    pub fn union_wrapped(self, query: impl Into<Operand>) -> Self {
        self.union_many([query], false, true)
    }

    /// Appends `union all (<query>)`.
    pub fn union_all_wrapped(self, query: impl Into<Operand>) -> Self {
        self.union_many([query], true, true)
    }

    /// Appends several unions sharing the same flags.
    ///
    /// Each query must be a sub-query or a raw fragment.
    pub fn union_many<I>(mut self, queries: I, all: bool, wrap: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        for query in queries {
            let query = self.resolve(query.into());
            if matches!(query, Operand::Query(_) | Operand::Raw(_)) {
                self.statement.unions.push(Union { all, wrap, query });
            } else {
                self.fail(QueryError::Structure(String::from(
                    "union requires a sub-query or a raw fragment",
                )));
            }
        }
        self
    }

    /// Requests an exclusive row lock.
    pub fn for_update(mut self) -> Self {
        self.statement.lock = Some(Lock::ForUpdate);
        self
    }

    /// Requests a shared row lock.
    pub fn for_share(mut self) -> Self {
        self.statement.lock = Some(Lock::ForShare);
        self
    }

    /// Marks the statement as running inside a transaction owned by the
    /// executor. Row locks are only rendered on such statements.
    pub fn transacting(mut self) -> Self {
        self.statement.transacting = true;
        self
    }
}
