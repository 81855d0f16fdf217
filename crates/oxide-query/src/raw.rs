//! Raw SQL fragments.
//!
//! A fragment is a template plus bindings. Placeholders are expanded by the
//! compiler, never at construction, so nested fragments and statements are
//! rendered with the grammar of the statement they end up in.
//!
//! | Placeholder | Meaning |
//! |-------------|---------|
//! | `?`         | next positional value |
//! | `??`        | next positional value, quoted as an identifier |
//! | `\?`        | a literal question mark |
//! | `:name`     | named value |
//! | `:name:`    | named value, quoted as an identifier |

use std::sync::Arc;

use crate::ast::{Operand, Statement, SubQuery};
use crate::builder::Builder;
use crate::value::ToSqlValue;

/// Bindings attached to a raw fragment.
#[derive(Debug, Clone, Default)]
pub enum Bindings {
    /// The template is emitted verbatim.
    #[default]
    None,
    /// Consumed in order by `?` and `??`.
    Positional(Vec<Operand>),
    /// Looked up by `:name` and `:name:`.
    Named(Vec<(String, Operand)>),
}

impl Bindings {
    /// Builds named bindings from `(name, value)` pairs.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Types usable as the bindings of a raw fragment.
///
/// A single value is exactly one binding, even when it is a `Vec`: a vector
/// is bound as one array parameter. Several bindings are given as a fixed
/// array of values or as a `Vec<Operand>` (see [`bindings!`](crate::bindings)).
pub trait IntoBindings {
    /// Converts into [`Bindings`].
    fn into_bindings(self) -> Bindings;
}

impl IntoBindings for Bindings {
    fn into_bindings(self) -> Bindings {
        self
    }
}

impl IntoBindings for () {
    fn into_bindings(self) -> Bindings {
        Bindings::None
    }
}

impl<T: ToSqlValue> IntoBindings for T {
    fn into_bindings(self) -> Bindings {
        Bindings::Positional(vec![Operand::from(self)])
    }
}

impl<T: ToSqlValue, const N: usize> IntoBindings for [T; N] {
    fn into_bindings(self) -> Bindings {
        Bindings::Positional(self.into_iter().map(Operand::from).collect())
    }
}

impl IntoBindings for Vec<Operand> {
    fn into_bindings(self) -> Bindings {
        Bindings::Positional(self)
    }
}

impl IntoBindings for Raw {
    fn into_bindings(self) -> Bindings {
        Bindings::Positional(vec![Operand::Raw(self)])
    }
}

impl IntoBindings for Statement {
    fn into_bindings(self) -> Bindings {
        Bindings::Positional(vec![Operand::Query(Arc::new(self))])
    }
}

impl IntoBindings for Builder {
    fn into_bindings(self) -> Bindings {
        Bindings::Positional(vec![Operand::from(self)])
    }
}

impl IntoBindings for SubQuery {
    fn into_bindings(self) -> Bindings {
        Bindings::Positional(vec![Operand::Deferred(self)])
    }
}

/// Builds a `Vec<Operand>` from heterogeneous values.
///
/// ```rust
/// use oxide_query::{bindings, raw};
///
/// let fragment = raw("id = ? or email = ?", bindings![1, "foo@example.com"]);
/// ```
#[macro_export]
macro_rules! bindings {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::Operand::from($value)),*]
    };
}

/// An opaque SQL snippet with bound values.
#[derive(Debug, Clone)]
pub struct Raw {
    pub(crate) sql: String,
    pub(crate) bindings: Bindings,
    pub(crate) wrap: Option<(String, String)>,
}

impl Raw {
    /// Creates a fragment without bindings; the text is emitted verbatim,
    /// except that a `?` is escaped as `\?` since it can never be a
    /// placeholder.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: Bindings::None,
            wrap: None,
        }
    }

    /// Creates a fragment with bindings.
    #[must_use]
    pub fn with_bindings(sql: impl Into<String>, bindings: impl IntoBindings) -> Self {
        Self {
            sql: sql.into(),
            bindings: bindings.into_bindings(),
            wrap: None,
        }
    }

    /// Returns a fragment rendered between `before` and `after`.
    #[must_use]
    pub fn wrap(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.wrap = Some((before.into(), after.into()));
        self
    }

    /// The template text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bindings.
    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl From<&str> for Raw {
    fn from(sql: &str) -> Self {
        Self::new(sql)
    }
}

impl From<String> for Raw {
    fn from(sql: String) -> Self {
        Self::new(sql)
    }
}

/// Shorthand for [`Raw::with_bindings`].
#[must_use]
pub fn raw(sql: impl Into<String>, bindings: impl IntoBindings) -> Raw {
    Raw::with_bindings(sql, bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    #[test]
    fn test_single_value_is_one_binding() {
        assert!(matches!(
            raw("?", 1).bindings(),
            Bindings::Positional(values) if values.len() == 1
        ));
        // A vector is one array binding.
        assert!(matches!(
            raw("in ?", vec![1, 2, 3]).bindings(),
            Bindings::Positional(values)
                if matches!(values.as_slice(), [Operand::Value(SqlValue::Array(_))])
        ));
    }

    #[test]
    fn test_array_is_several_bindings() {
        assert!(matches!(
            raw("? and ?", [1, 2]).bindings(),
            Bindings::Positional(values) if values.len() == 2
        ));
    }

    #[test]
    fn test_bindings_macro_mixes_types() {
        let values = crate::bindings![1, "a", Raw::new("now()")];
        assert_eq!(values.len(), 3);
        assert!(matches!(values[2], Operand::Raw(_)));
    }

    #[test]
    fn test_named_bindings() {
        let bindings = Bindings::named([("name", "users.name"), ("guy", "Bob")]);
        assert!(matches!(bindings, Bindings::Named(ref pairs) if pairs.len() == 2));
    }

    #[test]
    fn test_wrap_is_kept_on_fragment() {
        let fragment = Raw::new("select 1").wrap("(", ") as one");
        assert_eq!(fragment.sql(), "select 1");
        assert_eq!(
            fragment.wrap,
            Some((String::from("("), String::from(") as one")))
        );
    }
}
