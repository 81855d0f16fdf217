//! SQL Dialect support.
//!
//! Different databases disagree on quoting, pagination, multi-row inserts,
//! returning clauses and more. Each dialect is described by a [`Grammar`]:
//! a table of capabilities consumed by the one shared compiler.

mod generic;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// The supported target grammars.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    /// ANSI-flavoured default grammar.
    #[default]
    Generic,
    /// MySQL and MariaDB.
    MySql,
    /// PostgreSQL.
    Postgres,
    /// SQLite 3.
    Sqlite,
    /// Microsoft SQL Server.
    MsSql,
    /// Oracle Database.
    Oracle,
}

impl Dialect {
    /// Every dialect, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Generic,
        Self::MySql,
        Self::Postgres,
        Self::Sqlite,
        Self::MsSql,
        Self::Oracle,
    ];

    /// Returns the capability table of the dialect.
    #[must_use]
    pub fn grammar(self) -> &'static Grammar {
        match self {
            Self::Generic => &generic::GRAMMAR,
            Self::MySql => &mysql::GRAMMAR,
            Self::Postgres => &postgres::GRAMMAR,
            Self::Sqlite => &sqlite::GRAMMAR,
            Self::MsSql => &mssql::GRAMMAR,
            Self::Oracle => &oracle::GRAMMAR,
        }
    }

    /// Returns the name of the dialect.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.grammar().name
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "default" => Ok(Self::Generic),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "mssql" | "sqlserver" => Ok(Self::MsSql),
            "oracle" | "oracledb" => Ok(Self::Oracle),
            other => Err(QueryError::Value(format!("unknown dialect \"{other}\""))),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        Self::from(dialect.name())
    }
}

/// How LIMIT and OFFSET are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Trailing `limit ? offset ?`.
    LimitOffset {
        /// What to emit when only an offset is set.
        offset_only: OffsetOnly,
    },
    /// `select top (?)` for a bare limit, `offset ? rows fetch next ? rows only` otherwise.
    Top,
    /// Wrap the statement and filter on a row number.
    RowNumber {
        /// Limit assumed when only an offset is given.
        unbounded_limit: u64,
    },
}

/// The limit emitted in front of a lone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetOnly {
    /// `offset ?` on its own.
    Omit,
    /// An inline limit literal, e.g. the largest unsigned 64-bit value.
    Literal(&'static str),
    /// A bound limit value, e.g. `-1`.
    Bound(i64),
}

/// How several rows are written by one insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiInsert {
    /// `values (..), (..)`.
    Values,
    /// `select .. union all select ..`.
    UnionAll,
    /// One statement per row inside an anonymous block.
    Block,
}

/// How returning columns are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returning {
    /// Returning columns are dropped.
    Unsupported,
    /// Trailing `returning "a", "b"`.
    Clause,
    /// `output inserted.[a]` ahead of the values.
    Output,
    /// `returning ROWID into ?` with an out parameter.
    RowId,
}

/// How an insert of rows without any column is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRow {
    /// `default values`.
    DefaultValues,
    /// `() values ()`.
    EmptyValues,
    /// Insert `default` into the first returning column.
    ReturningColumn,
}

/// Whether update and delete honour order and limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationLimit {
    /// Silently dropped.
    Omit,
    /// Trailing `order by .. limit ?`.
    Trailing,
    /// `update top (?)` / `delete top (?)`, order kept in place.
    Top,
}

/// Literal spelling of arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLiteral {
    /// `(1, 2)`.
    Parenthesized,
    /// `ARRAY[1, 2]`.
    Constructor,
}

/// Literal spelling of blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobLiteral {
    /// `X'..'`.
    HexString,
    /// `'\x..'`.
    Escaped,
    /// `0x..`.
    Prefixed,
}

/// The dialect-specific rendering decisions consumed by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    /// Dialect name.
    pub name: &'static str,
    /// Opening and closing identifier quote.
    pub quote: (char, char),
    /// Text between an expression and its alias.
    pub alias_separator: &'static str,
    /// Render `col[1]` as `"col"[1]`.
    pub array_subscripts: bool,
    pub pagination: Pagination,
    pub multi_insert: MultiInsert,
    pub returning: Returning,
    pub default_row: DefaultRow,
    /// Marker substituted for undefined insert values; `None` rejects them.
    pub undefined_marker: Option<&'static str>,
    /// Keep joins on update statements.
    pub update_joins: bool,
    /// Keep joins on delete statements (`delete t from t join ..`).
    pub delete_joins: bool,
    pub mutation_limit: MutationLimit,
    /// Appended to update and delete statements.
    pub mutation_suffix: &'static str,
    /// Text around the table of a truncate.
    pub truncate: (&'static str, &'static str),
    /// Literal true and false.
    pub booleans: (&'static str, &'static str),
    pub array_literal: ArrayLiteral,
    pub blob_literal: BlobLiteral,
    /// Row lock clause for `for update`.
    pub lock_update: Option<&'static str>,
    /// Row lock clause for `for share`.
    pub lock_share: Option<&'static str>,
    /// Emit the lock right after the source table instead of at the end.
    pub lock_in_from: bool,
}

impl Grammar {
    /// Quotes one identifier segment, doubling embedded closing quotes.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.quote;
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for ch in name.chars() {
            if ch == close {
                quoted.push(close);
            }
            quoted.push(ch);
        }
        quoted.push(close);
        quoted
    }
}
