//! The accumulated clause state of one logical query.

use super::condition::Conditions;
use super::operand::{Column, Operand};
use crate::error::QueryError;
use crate::raw::Raw;

/// The operation a statement performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    /// SELECT (default).
    #[default]
    Select,
    /// INSERT.
    Insert,
    /// UPDATE.
    Update,
    /// DELETE.
    Delete,
    /// TRUNCATE.
    Truncate,
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl Direction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses a direction; anything but `desc` (any case) is ascending.
    #[must_use]
    pub fn parse(direction: &str) -> Self {
        if direction.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone)]
pub enum Order {
    /// A column (or raw expression) with a direction.
    Column { column: Column, direction: Direction },
    /// A raw fragment emitted as is.
    Raw(Raw),
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// LEFT OUTER JOIN.
    LeftOuter,
    /// RIGHT JOIN.
    Right,
    /// RIGHT OUTER JOIN.
    RightOuter,
    /// FULL OUTER JOIN.
    FullOuter,
    /// OUTER JOIN.
    Outer,
    /// CROSS JOIN.
    Cross,
}

impl JoinKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "inner join",
            Self::Left => "left join",
            Self::LeftOuter => "left outer join",
            Self::Right => "right join",
            Self::RightOuter => "right outer join",
            Self::FullOuter => "full outer join",
            Self::Outer => "outer join",
            Self::Cross => "cross join",
        }
    }
}

/// A join with its ON tree or USING columns.
///
/// Built either from a column pair or through the fluent methods in a join
/// callback.
#[derive(Debug, Clone)]
pub struct JoinClause {
    pub(crate) kind: JoinKind,
    pub(crate) table: Column,
    pub(crate) conditions: Conditions,
    pub(crate) using: Vec<String>,
    pub(crate) error: Option<QueryError>,
}

impl JoinClause {
    /// Creates a join without conditions.
    #[must_use]
    pub fn new(kind: JoinKind, table: impl Into<Column>) -> Self {
        Self {
            kind,
            table: table.into(),
            conditions: Conditions::new(),
            using: Vec::new(),
            error: None,
        }
    }

    /// The join type.
    #[must_use]
    pub const fn kind(&self) -> JoinKind {
        self.kind
    }

    /// The ON conditions.
    #[must_use]
    pub const fn conditions(&self) -> &Conditions {
        &self.conditions
    }
}

/// A join entry.
#[derive(Debug, Clone)]
pub enum Join {
    /// A structured join.
    Clause(JoinClause),
    /// A raw join emitted as is.
    Raw(Raw),
}

/// A statement appended with UNION.
#[derive(Debug, Clone)]
pub struct Union {
    /// UNION ALL instead of UNION.
    pub all: bool,
    /// Wrap the statement in parentheses.
    pub wrap: bool,
    /// A nested statement or raw fragment.
    pub query: Operand,
}

/// Row lock requested on a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lock {
    /// Exclusive lock.
    ForUpdate,
    /// Shared lock.
    ForShare,
}

/// An ordered mapping from column names to values.
///
/// Setting an existing column replaces its value in place.
#[derive(Debug, Clone, Default)]
pub struct Row {
    entries: Vec<(String, Operand)>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets a column value.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Operand>) -> Self {
        self.insert(column, value);
        self
    }

    /// Marks a column as present but undefined.
    #[must_use]
    pub fn undefined(mut self, column: impl Into<String>) -> Self {
        self.insert(column, Operand::Undefined);
        self
    }

    /// Sets a column value in place.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Operand>) {
        let column = column.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == column) {
            entry.1 = value;
        } else {
            self.entries.push((column, value));
        }
    }

    /// Returns the value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Operand> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns true when no column is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the columns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operand)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        self.entries.iter_mut().map(|(_, value)| value)
    }
}

impl IntoIterator for Row {
    type Item = (String, Operand);
    type IntoIter = std::vec::IntoIter<(String, Operand)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Operand>, const N: usize> From<[(K, V); N]> for Row {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Operand>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// What an insert writes.
#[derive(Debug, Clone)]
pub enum InsertSource {
    /// Literal rows.
    Rows(Vec<Row>),
    /// The result of a nested statement or raw fragment.
    Query(Operand),
}

/// The full in-memory representation of one logical query.
///
/// A statement is created empty by a builder and mutated by every fluent
/// call. Nested statements are shared behind `Arc` once attached and are
/// never mutated again.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    pub(crate) kind: StatementKind,
    pub(crate) table: Option<Column>,
    pub(crate) schema: Option<String>,
    pub(crate) alias: Option<String>,
    pub(crate) columns: Vec<Column>,
    pub(crate) distinct: bool,
    pub(crate) joins: Vec<Join>,
    pub(crate) wheres: Conditions,
    pub(crate) groups: Vec<Column>,
    pub(crate) havings: Conditions,
    pub(crate) orders: Vec<Order>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) unions: Vec<Union>,
    pub(crate) insert: Option<InsertSource>,
    pub(crate) assignments: Vec<(String, Operand)>,
    pub(crate) returning: Vec<String>,
    pub(crate) lock: Option<Lock>,
    pub(crate) transacting: bool,
    pub(crate) error: Option<QueryError>,
}

impl Statement {
    /// Creates an empty select statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The operation kind.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The target table, if any.
    #[must_use]
    pub const fn table(&self) -> Option<&Column> {
        self.table.as_ref()
    }

    /// The sub-query alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The selected columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The WHERE tree.
    #[must_use]
    pub const fn wheres(&self) -> &Conditions {
        &self.wheres
    }

    /// The HAVING tree.
    #[must_use]
    pub const fn havings(&self) -> &Conditions {
        &self.havings
    }

    /// The limit, if set.
    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// The offset, if set.
    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// The first error recorded while the statement was built.
    #[must_use]
    pub const fn error(&self) -> Option<&QueryError> {
        self.error.as_ref()
    }

    /// Records an error unless one is already present.
    pub(crate) fn fail(&mut self, error: QueryError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
