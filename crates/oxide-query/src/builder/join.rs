//! JOIN clauses.

use crate::ast::{Column, Condition, Conditions, Connector, Join, JoinClause, JoinKind, Operator};
use crate::error::QueryError;
use crate::raw::Raw;

use super::Builder;

impl JoinClause {
    fn fail(&mut self, error: QueryError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn push_columns(
        &mut self,
        connector: Connector,
        first: Column,
        operator: &str,
        second: Column,
    ) {
        match Operator::parse(operator) {
            Ok(operator) => self.conditions.add(
                connector,
                false,
                Condition::Columns {
                    first,
                    operator,
                    second,
                },
            ),
            Err(error) => self.fail(error),
        }
    }

    /// Adds `first = second`.
    #[must_use]
    pub fn on(self, first: impl Into<Column>, second: impl Into<Column>) -> Self {
        self.on_op(first, "=", second)
    }

    /// Adds `first <operator> second`; both sides are identifiers.
    #[must_use]
    pub fn on_op(
        mut self,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Self {
        self.push_columns(Connector::And, first.into(), operator, second.into());
        self
    }

    /// Adds `and first = second`.
    #[must_use]
    pub fn and_on(self, first: impl Into<Column>, second: impl Into<Column>) -> Self {
        self.on(first, second)
    }

    /// Adds `and first <operator> second`.
    #[must_use]
    pub fn and_on_op(
        self,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Self {
        self.on_op(first, operator, second)
    }

    /// Adds `or first = second`.
    #[must_use]
    pub fn or_on(self, first: impl Into<Column>, second: impl Into<Column>) -> Self {
        self.or_on_op(first, "=", second)
    }

    /// Adds `or first <operator> second`.
    #[must_use]
    pub fn or_on_op(
        mut self,
        first: impl Into<Column>,
        operator: &str,
        second: impl Into<Column>,
    ) -> Self {
        self.push_columns(Connector::Or, first.into(), operator, second.into());
        self
    }

    /// Adds a raw ON condition.
    #[must_use]
    pub fn on_raw(mut self, raw: impl Into<Raw>) -> Self {
        self.conditions
            .add(Connector::And, false, Condition::Raw(raw.into()));
        self
    }

    /// Adds `or <raw>` to the ON conditions.
    #[must_use]
    pub fn or_on_raw(mut self, raw: impl Into<Raw>) -> Self {
        self.conditions
            .add(Connector::Or, false, Condition::Raw(raw.into()));
        self
    }

    fn group<F>(mut self, connector: Connector, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let built = callback(Self::new(self.kind, self.table.clone()));
        if let Some(error) = built.error {
            self.fail(error);
        }
        if !built.conditions.is_empty() {
            self.conditions
                .add(connector, false, Condition::Group(built.conditions));
        }
        self
    }

    /// Adds a parenthesized group of ON conditions.
    #[must_use]
    pub fn on_group<F>(self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.group(Connector::And, callback)
    }

    /// Adds `or (...)` to the ON conditions.
    #[must_use]
    pub fn or_on_group<F>(self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.group(Connector::Or, callback)
    }

    /// Joins with `using (...)` instead of ON conditions.
    #[must_use]
    pub fn using<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.using.extend(columns.into_iter().map(Into::into));
        self
    }
}

macro_rules! join_methods {
    ($($kind:ident => $name:ident, $with:ident;)*) => {
        impl Builder {
            $(
                #[doc = concat!("Adds `", stringify!($name), "` with `first <operator> second`.")]
                pub fn $name(
                    self,
                    table: impl Into<Column>,
                    first: impl Into<Column>,
                    operator: &str,
                    second: impl Into<Column>,
                ) -> Self {
                    let clause = JoinClause::new(JoinKind::$kind, table).on_op(first, operator, second);
                    self.join_clause(clause)
                }

                #[doc = concat!("Adds `", stringify!($name), "` with conditions built by the callback.")]
                pub fn $with<F>(self, table: impl Into<Column>, callback: F) -> Self
                where
                    F: FnOnce(JoinClause) -> JoinClause,
                {
                    let clause = callback(JoinClause::new(JoinKind::$kind, table));
                    self.join_clause(clause)
                }
            )*
        }
    };
}

join_methods! {
    Inner => join, join_with;
    Inner => inner_join, inner_join_with;
    Left => left_join, left_join_with;
    LeftOuter => left_outer_join, left_outer_join_with;
    Right => right_join, right_join_with;
    RightOuter => right_outer_join, right_outer_join_with;
    FullOuter => full_outer_join, full_outer_join_with;
    Outer => outer_join, outer_join_with;
}

impl Builder {
    /// Adds `cross join table`.
    pub fn cross_join(self, table: impl Into<Column>) -> Self {
        self.join_clause(JoinClause::new(JoinKind::Cross, table))
    }

    /// Adds a prepared join clause.
    pub fn join_clause(mut self, mut clause: JoinClause) -> Self {
        if let Some(error) = clause.error.take() {
            self.fail(error);
        }
        clause.table = self.resolve_column(clause.table);
        clause.conditions = self.resolve_join_conditions(clause.conditions);
        self.statement.joins.push(Join::Clause(clause));
        self
    }

    /// Adds a raw join emitted as is.
    pub fn join_raw(mut self, raw: impl Into<Raw>) -> Self {
        if let Column::Raw(raw) = self.resolve_column(Column::Raw(raw.into())) {
            self.statement.joins.push(Join::Raw(raw));
        }
        self
    }

    fn resolve_join_conditions(&mut self, conditions: Conditions) -> Conditions {
        let mut resolved = Conditions::new();
        for node in conditions {
            let condition = match node.condition {
                Condition::Columns {
                    first,
                    operator,
                    second,
                } => Condition::Columns {
                    first: self.resolve_column(first),
                    operator,
                    second: self.resolve_column(second),
                },
                Condition::Group(inner) => Condition::Group(self.resolve_join_conditions(inner)),
                Condition::Raw(raw) => Condition::Raw(self.resolve_raw(raw)),
                other => other,
            };
            resolved.add(node.connector, node.negated, condition);
        }
        resolved
    }
}
