//! Fluent statement builder.
//!
//! Every call mutates the underlying [`Statement`] and returns the builder,
//! so clauses can be chained in any order. Errors found while building (an
//! operator outside the allow-list, a malformed BETWEEN bound, a sub-query
//! in a position that cannot hold one) are recorded on the statement and
//! returned by the first attempt to compile it.
//!
//! # Example
//!
//! ```rust
//! use oxide_query::{Client, Dialect};
//!
//! let query = Client::new(Dialect::Postgres)
//!     .query_builder()
//!     .select(["id", "name"])
//!     .from("users")
//!     .where_op("age", ">", 18)
//!     .or()
//!     .where_null("deleted_at")
//!     .limit(10);
//!
//! let compiled = query.to_sql().unwrap();
//! assert_eq!(
//!     compiled.sql,
//!     r#"select "id", "name" from "users" where "age" > ? or "deleted_at" is null limit ?"#
//! );
//! ```

mod delete;
mod insert;
mod join;
mod json;
mod select;
mod update;
mod where_clause;

use std::sync::Arc;

use tracing::trace;

use crate::ast::{Column, Connector, Operand, Statement};
use crate::client::Client;
use crate::compiler::CompiledQuery;
use crate::error::{QueryError, Result};
use crate::raw::{Bindings, Raw};

/// Fluent front end mutating a [`Statement`].
///
/// Cloning a builder copies its clause lists one level deep; nested
/// sub-queries and raw fragments are shared behind `Arc` and never mutated
/// after they are attached.
#[derive(Debug, Clone)]
#[must_use]
pub struct Builder {
    client: Client,
    statement: Statement,
    connector: Connector,
    negate: bool,
}

impl Builder {
    /// Creates an empty builder bound to a client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            statement: Statement::new(),
            connector: Connector::And,
            negate: false,
        }
    }

    /// The client this builder compiles with.
    #[must_use]
    pub const fn client(&self) -> Client {
        self.client
    }

    /// The accumulated statement.
    #[must_use]
    pub const fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Consumes the builder, returning its statement.
    #[must_use]
    pub fn into_statement(self) -> Statement {
        self.statement
    }

    /// The first error recorded while building, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&QueryError> {
        self.statement.error()
    }

    /// Returns an independent copy bound to another client.
    pub fn with_client(&self, client: impl Into<Client>) -> Self {
        let mut copy = self.clone();
        copy.client = client.into();
        copy
    }

    /// Applies a reusable piece of composition.
    ///
    /// ```rust
    /// use oxide_query::{Builder, Client, Dialect};
    ///
    /// fn active(query: Builder) -> Builder {
    ///     query.where_null("deleted_at")
    /// }
    ///
    /// let sql = Client::new(Dialect::Generic)
    ///     .table("users")
    ///     .modify(active)
    ///     .to_sql()
    ///     .unwrap()
    ///     .sql;
    /// assert_eq!(sql, r#"select * from "users" where "deleted_at" is null"#);
    /// ```
    pub fn modify<F>(self, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        callback(self)
    }

    /// Joins the next where-like call with `or`.
    pub fn or(mut self) -> Self {
        self.connector = Connector::Or;
        self
    }

    /// Joins the next where-like call with `and`.
    pub fn and(mut self) -> Self {
        self.connector = Connector::And;
        self
    }

    /// Negates the next where-like call.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Compiles to SQL text and bindings.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while building, or any error raised
    /// while rendering.
    pub fn to_sql(&self) -> Result<CompiledQuery> {
        self.client.compile(&self.statement)
    }

    /// Compiles to SQL text with every binding inlined.
    ///
    /// # Errors
    ///
    /// Same as [`Builder::to_sql`].
    pub fn to_query(&self) -> Result<String> {
        self.client.to_query(&self.statement)
    }

    pub(crate) fn fail(&mut self, error: QueryError) {
        self.statement.fail(error);
    }

    /// A fresh builder sharing this builder's client.
    pub(crate) fn sub_builder(&self) -> Self {
        Self::new(self.client)
    }

    /// Consumes the pending `or`/`not` modifiers.
    pub(crate) fn take_modifiers(&mut self) -> (Connector, bool) {
        let modifiers = (self.connector, self.negate);
        self.connector = Connector::And;
        self.negate = false;
        modifiers
    }

    /// Propagates an error recorded on a statement being attached.
    pub(crate) fn adopt(&mut self, statement: &Statement) {
        if let Some(error) = statement.error() {
            self.fail(error.clone());
        }
    }

    /// Resolves every binding of a raw fragment, so callbacks bound inside
    /// it run once, here, and their errors surface before compilation.
    pub(crate) fn resolve_raw(&mut self, mut raw: Raw) -> Raw {
        raw.bindings = match raw.bindings {
            Bindings::None => Bindings::None,
            Bindings::Positional(values) => Bindings::Positional(
                values.into_iter().map(|value| self.resolve(value)).collect(),
            ),
            Bindings::Named(pairs) => Bindings::Named(
                pairs
                    .into_iter()
                    .map(|(name, value)| (name, self.resolve(value)))
                    .collect(),
            ),
        };
        raw
    }

    /// Resolves a sub-query callback into a nested statement.
    pub(crate) fn resolve(&mut self, operand: Operand) -> Operand {
        match operand {
            Operand::Deferred(callback) => {
                trace!(dialect = %self.client.dialect(), "resolving sub-query callback");
                let built = callback.build(self.client);
                self.adopt(&built.statement);
                Operand::Query(Arc::new(built.statement))
            }
            Operand::Query(statement) => {
                self.adopt(&statement);
                Operand::Query(statement)
            }
            Operand::Raw(raw) => Operand::Raw(self.resolve_raw(raw)),
            other => other,
        }
    }

    /// Resolves a sub-query callback used in an identifier position.
    pub(crate) fn resolve_column(&mut self, column: Column) -> Column {
        match column {
            Column::Deferred(callback) => {
                trace!(dialect = %self.client.dialect(), "resolving sub-query callback in identifier position");
                let built = callback.build(self.client);
                self.adopt(&built.statement);
                Column::Query(Arc::new(built.statement))
            }
            Column::Query(statement) => {
                self.adopt(&statement);
                Column::Query(statement)
            }
            Column::Raw(raw) => Column::Raw(self.resolve_raw(raw)),
            other => other,
        }
    }
}
