//! WHERE and HAVING clauses.

use crate::ast::{Column, Condition, Conditions, Connector, Operand, Operator, Row};
use crate::error::QueryError;
use crate::raw::Raw;
use crate::value::SqlValue;

use super::Builder;

/// The condition tree a call writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clause {
    Where,
    Having,
}

impl Builder {
    fn conditions_mut(&mut self, clause: Clause) -> &mut Conditions {
        match clause {
            Clause::Where => &mut self.statement.wheres,
            Clause::Having => &mut self.statement.havings,
        }
    }

    /// Adds a condition using the pending modifiers.
    pub(crate) fn push_condition(&mut self, clause: Clause, condition: Condition) {
        let (connector, negated) = self.take_modifiers();
        self.conditions_mut(clause).add(connector, negated, condition);
    }

    /// Turns `(column, operator, value)` into a condition.
    ///
    /// The returned flag is an extra negation contributed by the operator
    /// itself (`not in`, `not between`, `is not`).
    fn comparison(
        &mut self,
        column: Column,
        operator: &str,
        value: Operand,
    ) -> Option<(bool, Condition)> {
        let operator = match Operator::parse(operator) {
            Ok(operator) => operator,
            Err(error) => {
                self.fail(error);
                return None;
            }
        };
        let column = self.resolve_column(column);
        let value = self.resolve(value);
        let normalized = operator.normalized().to_owned();
        match normalized.as_str() {
            "in" | "not in" => self
                .in_condition(column, value)
                .map(|condition| (normalized == "not in", condition)),
            "between" | "not between" => self
                .between_condition(column, value)
                .map(|condition| (normalized == "not between", condition)),
            "is" | "is not" | "=" if value.is_null() => {
                Some((normalized == "is not", Condition::Null { column }))
            }
            _ => Some((
                false,
                Condition::Compare {
                    column,
                    operator,
                    value,
                },
            )),
        }
    }

    fn in_condition(&mut self, column: Column, values: Operand) -> Option<Condition> {
        let values = match values {
            Operand::Value(SqlValue::Array(items)) => Operand::Value(SqlValue::Array(items)),
            Operand::Value(single) => Operand::Value(SqlValue::Array(vec![single])),
            Operand::Undefined => {
                self.fail(QueryError::Structure(String::from(
                    "in requires a list, a sub-query or a raw fragment",
                )));
                return None;
            }
            other => other,
        };
        Some(Condition::In { column, values })
    }

    fn between_condition(&mut self, column: Column, bounds: Operand) -> Option<Condition> {
        match bounds {
            Operand::Value(SqlValue::Array(items)) if items.len() == 2 => {
                let mut items = items.into_iter();
                match (items.next(), items.next()) {
                    (Some(low), Some(high)) => Some(Condition::Between {
                        column,
                        low: Operand::Value(low),
                        high: Operand::Value(high),
                    }),
                    _ => None,
                }
            }
            _ => {
                self.fail(QueryError::Value(String::from(
                    "between requires exactly two bound values",
                )));
                None
            }
        }
    }

    fn compare(&mut self, clause: Clause, column: Column, operator: &str, value: Operand) {
        let (connector, negated) = self.take_modifiers();
        if let Some((flip, condition)) = self.comparison(column, operator, value) {
            self.conditions_mut(clause)
                .add(connector, negated ^ flip, condition);
        }
    }

    /// Groups whatever the callback built into `clause`, whether it used
    /// the where or the having methods. Mixing both is a structure error.
    fn group<F>(&mut self, clause: Clause, callback: F)
    where
        F: FnOnce(Self) -> Self,
    {
        let (connector, negated) = self.take_modifiers();
        let mut built = callback(self.sub_builder());
        self.adopt(&built.statement);
        let wheres = std::mem::take(built.conditions_mut(Clause::Where));
        let havings = std::mem::take(built.conditions_mut(Clause::Having));
        let conditions = match (wheres.is_empty(), havings.is_empty()) {
            (_, true) => wheres,
            (true, false) => havings,
            (false, false) => {
                self.fail(QueryError::Structure(String::from(
                    "a condition group mixes where and having conditions",
                )));
                return;
            }
        };
        // An empty callback adds nothing rather than empty parentheses.
        if !conditions.is_empty() {
            self.conditions_mut(clause)
                .add(connector, negated, Condition::Group(conditions));
        }
    }

    fn object(&mut self, clause: Clause, row: Row) {
        let (connector, negated) = self.take_modifiers();
        let mut pairs = Conditions::new();
        for (column, value) in row {
            if let Some((flip, condition)) =
                self.comparison(Column::Name(column), "=", value)
            {
                pairs.add(Connector::And, negated ^ flip, condition);
            }
        }
        if pairs.is_empty() {
            return;
        }
        if connector == Connector::Or {
            self.conditions_mut(clause)
                .add(Connector::Or, false, Condition::Group(pairs));
        } else {
            let target = self.conditions_mut(clause);
            for node in pairs {
                target.add(Connector::And, node.negated, node.condition);
            }
        }
    }

    fn in_list(&mut self, clause: Clause, column: Column, values: Operand) {
        let (connector, negated) = self.take_modifiers();
        let column = self.resolve_column(column);
        let values = self.resolve(values);
        if let Some(condition) = self.in_condition(column, values) {
            self.conditions_mut(clause).add(connector, negated, condition);
        }
    }

    fn between(&mut self, clause: Clause, column: Column, low: Operand, high: Operand) {
        let column = self.resolve_column(column);
        let low = self.resolve(low);
        let high = self.resolve(high);
        self.push_condition(clause, Condition::Between { column, low, high });
    }

    fn null(&mut self, clause: Clause, column: Column) {
        let column = self.resolve_column(column);
        self.push_condition(clause, Condition::Null { column });
    }

    fn exists(&mut self, clause: Clause, query: Operand) {
        let query = self.resolve(query);
        if matches!(query, Operand::Query(_) | Operand::Raw(_)) {
            self.push_condition(clause, Condition::Exists(query));
        } else {
            self.take_modifiers();
            self.fail(QueryError::Structure(String::from(
                "exists requires a sub-query or a raw fragment",
            )));
        }
    }

    fn raw_condition(&mut self, clause: Clause, raw: Raw) {
        let Operand::Raw(raw) = self.resolve(Operand::Raw(raw)) else {
            return;
        };
        self.push_condition(clause, Condition::Raw(raw));
    }

    /// Adds `column = value`; a NULL value becomes `column is null`.
    pub fn where_eq(mut self, column: impl Into<Column>, value: impl Into<Operand>) -> Self {
        self.compare(Clause::Where, column.into(), "=", value.into());
        self
    }

    /// Adds `or column = value`.
    pub fn or_where_eq(self, column: impl Into<Column>, value: impl Into<Operand>) -> Self {
        self.or().where_eq(column, value)
    }

    /// Adds `and column = value`.
    pub fn and_where_eq(self, column: impl Into<Column>, value: impl Into<Operand>) -> Self {
        self.and().where_eq(column, value)
    }

    /// Adds `not column = value`.
    pub fn where_not_eq(self, column: impl Into<Column>, value: impl Into<Operand>) -> Self {
        self.not().where_eq(column, value)
    }

    /// Adds `or not column = value`.
    pub fn or_where_not_eq(self, column: impl Into<Column>, value: impl Into<Operand>) -> Self {
        self.or().not().where_eq(column, value)
    }

    /// Adds `column <operator> value`.
    ///
    /// `in`, `not in`, `between` and `not between` are dispatched to the
    /// matching clause. NULL with `=`, `is` or `is not` becomes an IS NULL
    /// check; NULL with any other operator is emitted as the unbound literal
    /// `NULL`. An operator outside the allow-list is recorded as an error.
    pub fn where_op(
        mut self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.compare(Clause::Where, column.into(), operator, value.into());
        self
    }

    /// Adds `or column <operator> value`.
    pub fn or_where_op(
        self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.or().where_op(column, operator, value)
    }

    /// Adds `and column <operator> value`.
    pub fn and_where_op(
        self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.and().where_op(column, operator, value)
    }

    /// Adds `not column <operator> value`.
    pub fn where_not_op(
        self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.not().where_op(column, operator, value)
    }

    /// Adds `or not column <operator> value`.
    pub fn or_where_not_op(
        self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.or().not().where_op(column, operator, value)
    }

    /// Adds a parenthesized group built by the callback.
    pub fn where_group<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.group(Clause::Where, callback);
        self
    }

    /// Adds `or (...)`.
    pub fn or_where_group<F>(self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.or().where_group(callback)
    }

    /// Adds `not (...)`.
    pub fn where_not_group<F>(self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.not().where_group(callback)
    }

    /// Adds `or not (...)`.
    pub fn or_where_not_group<F>(self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.or().not().where_group(callback)
    }

    /// Adds `column = value` for every pair of the row.
    ///
    /// With a pending `or` the pairs are grouped: `or ("a" = ? and "b" = ?)`.
    pub fn where_object(mut self, row: impl Into<Row>) -> Self {
        self.object(Clause::Where, row.into());
        self
    }

    /// Adds `or (...)` over the pairs of the row.
    pub fn or_where_object(self, row: impl Into<Row>) -> Self {
        self.or().where_object(row)
    }

    /// Adds `not column = value` for every pair of the row.
    pub fn where_not_object(self, row: impl Into<Row>) -> Self {
        self.not().where_object(row)
    }

    /// Adds `or (not ... and not ...)` over the pairs of the row.
    pub fn or_where_not_object(self, row: impl Into<Row>) -> Self {
        self.or().not().where_object(row)
    }

    /// Adds the tautology `1 = 1` or the contradiction `1 = 0`.
    pub fn where_bool(mut self, value: bool) -> Self {
        self.push_condition(Clause::Where, Condition::Literal(value));
        self
    }

    /// Adds a raw condition.
    pub fn where_raw(mut self, raw: impl Into<Raw>) -> Self {
        self.raw_condition(Clause::Where, raw.into());
        self
    }

    /// Adds `or <raw>`.
    pub fn or_where_raw(self, raw: impl Into<Raw>) -> Self {
        self.or().where_raw(raw)
    }

    /// Adds `column in (...)`.
    ///
    /// Accepts a `Vec` of values, a sub-query or a raw fragment. An empty
    /// list renders `1 = ?` bound to `0`.
    pub fn where_in(mut self, column: impl Into<Column>, values: impl Into<Operand>) -> Self {
        self.in_list(Clause::Where, column.into(), values.into());
        self
    }

    /// Adds `or column in (...)`.
    pub fn or_where_in(self, column: impl Into<Column>, values: impl Into<Operand>) -> Self {
        self.or().where_in(column, values)
    }

    /// Adds `column not in (...)`. An empty list renders `1 = ?` bound to `1`.
    pub fn where_not_in(self, column: impl Into<Column>, values: impl Into<Operand>) -> Self {
        self.not().where_in(column, values)
    }

    /// Adds `or column not in (...)`.
    pub fn or_where_not_in(self, column: impl Into<Column>, values: impl Into<Operand>) -> Self {
        self.or().not().where_in(column, values)
    }

    /// Adds `column is null`.
    pub fn where_null(mut self, column: impl Into<Column>) -> Self {
        self.null(Clause::Where, column.into());
        self
    }

    /// Adds `or column is null`.
    pub fn or_where_null(self, column: impl Into<Column>) -> Self {
        self.or().where_null(column)
    }

    /// Adds `column is not null`.
    pub fn where_not_null(self, column: impl Into<Column>) -> Self {
        self.not().where_null(column)
    }

    /// Adds `or column is not null`.
    pub fn or_where_not_null(self, column: impl Into<Column>) -> Self {
        self.or().not().where_null(column)
    }

    /// Adds `column between low and high`.
    pub fn where_between<T: Into<Operand>>(mut self, column: impl Into<Column>, bounds: [T; 2]) -> Self {
        let [low, high] = bounds;
        self.between(Clause::Where, column.into(), low.into(), high.into());
        self
    }

    /// Adds `or column between low and high`.
    pub fn or_where_between<T: Into<Operand>>(self, column: impl Into<Column>, bounds: [T; 2]) -> Self {
        self.or().where_between(column, bounds)
    }

    /// Adds `and column between low and high`.
    pub fn and_where_between<T: Into<Operand>>(self, column: impl Into<Column>, bounds: [T; 2]) -> Self {
        self.and().where_between(column, bounds)
    }

    /// Adds `column not between low and high`.
    pub fn where_not_between<T: Into<Operand>>(self, column: impl Into<Column>, bounds: [T; 2]) -> Self {
        self.not().where_between(column, bounds)
    }

    /// Adds `or column not between low and high`.
    pub fn or_where_not_between<T: Into<Operand>>(
        self,
        column: impl Into<Column>,
        bounds: [T; 2],
    ) -> Self {
        self.or().not().where_between(column, bounds)
    }

    /// Adds `and column not between low and high`.
    pub fn and_where_not_between<T: Into<Operand>>(
        self,
        column: impl Into<Column>,
        bounds: [T; 2],
    ) -> Self {
        self.and().not().where_between(column, bounds)
    }

    /// Adds `exists (...)` over a sub-query or raw fragment.
    pub fn where_exists(mut self, query: impl Into<Operand>) -> Self {
        self.exists(Clause::Where, query.into());
        self
    }

    /// Adds `or exists (...)`.
    pub fn or_where_exists(self, query: impl Into<Operand>) -> Self {
        self.or().where_exists(query)
    }

    /// Adds `not exists (...)`.
    pub fn where_not_exists(self, query: impl Into<Operand>) -> Self {
        self.not().where_exists(query)
    }

    /// Adds `or not exists (...)`.
    pub fn or_where_not_exists(self, query: impl Into<Operand>) -> Self {
        self.or().not().where_exists(query)
    }

    /// Adds `having column <operator> value`.
    pub fn having_op(
        mut self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.compare(Clause::Having, column.into(), operator, value.into());
        self
    }

    /// Adds `or column <operator> value` to the HAVING clause.
    pub fn or_having_op(
        self,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.or().having_op(column, operator, value)
    }

    /// Adds a parenthesized HAVING group built with either the where or the
    /// having methods.
    pub fn having_group<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.group(Clause::Having, callback);
        self
    }

    /// Adds `or (...)` to the HAVING clause.
    pub fn or_having_group<F>(self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.or().having_group(callback)
    }

    /// Adds a raw HAVING condition.
    pub fn having_raw(mut self, raw: impl Into<Raw>) -> Self {
        self.raw_condition(Clause::Having, raw.into());
        self
    }

    /// Adds `or <raw>` to the HAVING clause.
    pub fn or_having_raw(self, raw: impl Into<Raw>) -> Self {
        self.or().having_raw(raw)
    }

    /// Adds `having column in (...)`.
    pub fn having_in(mut self, column: impl Into<Column>, values: impl Into<Operand>) -> Self {
        self.in_list(Clause::Having, column.into(), values.into());
        self
    }

    /// Adds `having column is null`.
    pub fn having_null(mut self, column: impl Into<Column>) -> Self {
        self.null(Clause::Having, column.into());
        self
    }

    /// Adds `having column between low and high`.
    pub fn having_between<T: Into<Operand>>(mut self, column: impl Into<Column>, bounds: [T; 2]) -> Self {
        let [low, high] = bounds;
        self.between(Clause::Having, column.into(), low.into(), high.into());
        self
    }
}
