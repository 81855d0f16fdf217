//! Comparison operators.

use std::borrow::Cow;

use crate::error::{QueryError, Result};

/// Operators accepted in comparisons, lower-case with single spaces.
const OPERATORS: &[&str] = &[
    "=", "<", ">", "<=", ">=", "<>", "!=", "like", "not like", "ilike", "not ilike", "between",
    "not between", "in", "not in", "is", "is not", "exists", "not exists", "rlike", "not rlike",
    "regexp", "not regexp", "similar to", "not similar to", "&", "|", "^", "<<", ">>", "~", "~*",
    "!~", "!~*", "#", "&&", "@>", "<@", "||", "&<", "&>", "-|-", "@@", "!!", "?", "?|", "?&",
];

/// A validated comparison operator.
///
/// The caller's spelling is kept for rendering; matching is case-insensitive
/// and whitespace-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    text: String,
    normalized: String,
}

impl Operator {
    /// Validates an operator against the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Operator`] naming the rejected token.
    pub fn parse(operator: &str) -> Result<Self> {
        let normalized = operator
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if OPERATORS.contains(&normalized.as_str()) {
            Ok(Self {
                text: String::from(operator.trim()),
                normalized,
            })
        } else {
            Err(QueryError::Operator(String::from(operator)))
        }
    }

    /// The equality operator.
    #[must_use]
    pub fn equals() -> Self {
        Self {
            text: String::from("="),
            normalized: String::from("="),
        }
    }

    /// The operator as written by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The lower-case, single-spaced form used for dispatch.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// The operator as emitted in SQL. Question marks are escaped so they
    /// are never mistaken for placeholders.
    pub(crate) fn render(&self) -> Cow<'_, str> {
        if self.text.contains('?') {
            Cow::Owned(self.text.replace('?', "\\?"))
        } else {
            Cow::Borrowed(&self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_keeps_spelling() {
        let op = Operator::parse("LIKE").unwrap();
        assert_eq!(op.as_str(), "LIKE");
        assert_eq!(op.normalized(), "like");
    }

    #[test]
    fn test_operator_normalizes_whitespace() {
        let op = Operator::parse("not  between ").unwrap();
        assert_eq!(op.normalized(), "not between");
        assert_eq!(Operator::parse("BeTween").unwrap().normalized(), "between");
    }

    #[test]
    fn test_operator_rejected() {
        assert_eq!(
            Operator::parse("isnt"),
            Err(QueryError::Operator(String::from("isnt")))
        );
        assert!(Operator::parse("; drop table users").is_err());
    }

    #[test]
    fn test_question_mark_operators_are_escaped() {
        assert_eq!(Operator::parse("?|").unwrap().render(), "\\?|");
        assert_eq!(Operator::parse("~*").unwrap().render(), "~*");
    }
}
