//! Dialect selection and configuration.
//!
//! A [`Client`] is the explicit handle every builder and compile call is
//! bound to. There is no process-wide default.

use serde::{Deserialize, Serialize};

use crate::ast::Statement;
use crate::builder::Builder;
use crate::compiler::{CompiledQuery, QueryCompiler};
use crate::dialect::{Dialect, Grammar};
use crate::error::Result;
use crate::raw::{IntoBindings, Raw};

/// Client configuration, usually deserialized from the application's settings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Target grammar.
    pub dialect: Dialect,
    /// Substitute NULL for undefined insert values instead of the grammar's
    /// default marker (or instead of rejecting them on strict grammars).
    pub use_null_as_default: bool,
}

/// A dialect-bound entry point for building and compiling statements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Creates a client for a dialect with the default configuration.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            config: ClientConfig {
                dialect,
                use_null_as_default: false,
            },
        }
    }

    /// Creates a client from a full configuration.
    #[must_use]
    pub const fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Returns the configured dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the grammar of the configured dialect.
    #[must_use]
    pub fn grammar(&self) -> &'static Grammar {
        self.config.dialect.grammar()
    }

    /// Starts a new, empty statement.
    pub fn query_builder(&self) -> Builder {
        Builder::new(*self)
    }

    /// Shorthand for `query_builder().from(table)`.
    pub fn table(&self, table: &str) -> Builder {
        self.query_builder().from(table)
    }

    /// Creates a raw fragment.
    #[must_use]
    pub fn raw(&self, sql: &str, bindings: impl IntoBindings) -> Raw {
        Raw::with_bindings(sql, bindings)
    }

    /// Compiles a statement to SQL text and bindings.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while the statement was built, or
    /// any error raised while rendering it.
    pub fn compile(&self, statement: &Statement) -> Result<CompiledQuery> {
        QueryCompiler::new(*self).compile(statement)
    }

    /// Compiles a statement to SQL text with every binding inlined.
    ///
    /// # Errors
    ///
    /// Same as [`Client::compile`].
    pub fn to_query(&self, statement: &Statement) -> Result<String> {
        Ok(self.compile(statement)?.to_literal(self.grammar()))
    }

    /// Marker written for an undefined insert value, or `None` when such
    /// values must be rejected.
    pub(crate) fn undefined_marker(&self) -> Option<&'static str> {
        if self.config.use_null_as_default {
            Some("NULL")
        } else {
            self.grammar().undefined_marker
        }
    }
}

impl From<ClientConfig> for Client {
    fn from(config: ClientConfig) -> Self {
        Self::with_config(config)
    }
}

impl From<Dialect> for Client {
    fn from(dialect: Dialect) -> Self {
        Self::new(dialect)
    }
}
