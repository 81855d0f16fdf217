//! The boolean tree behind WHERE, HAVING and join ON clauses.

use super::operand::{Column, Operand};
use super::operator::Operator;
use crate::raw::Raw;

/// How a condition attaches to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    /// Conjunction (default).
    #[default]
    And,
    /// Disjunction.
    Or,
}

impl Connector {
    /// Returns the SQL representation, padded with spaces.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => " and ",
            Self::Or => " or ",
        }
    }
}

/// The payload of a condition node.
#[derive(Debug, Clone)]
pub enum Condition {
    /// `column <op> value`.
    Compare {
        column: Column,
        operator: Operator,
        value: Operand,
    },
    /// `first <op> second`, both sides identifiers (join conditions).
    Columns {
        first: Column,
        operator: Operator,
        second: Column,
    },
    /// `column in (...)`: a list, a sub-query or a raw fragment.
    In { column: Column, values: Operand },
    /// `column is null`.
    Null { column: Column },
    /// `column between low and high`.
    Between {
        column: Column,
        low: Operand,
        high: Operand,
    },
    /// `exists (...)`.
    Exists(Operand),
    /// A parenthesized sub-tree.
    Group(Conditions),
    /// A raw fragment.
    Raw(Raw),
    /// `1 = 1` or `1 = 0`.
    Literal(bool),
}

/// One condition with its connector and negation flag.
#[derive(Debug, Clone)]
pub struct ConditionNode {
    /// Connector to the previous node; ignored on the first node.
    pub connector: Connector,
    /// Negate the payload.
    pub negated: bool,
    /// The payload.
    pub condition: Condition,
}

/// An ordered sequence of condition nodes.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    nodes: Vec<ConditionNode>,
}

impl Conditions {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a node.
    pub fn add(&mut self, connector: Connector, negated: bool, condition: Condition) {
        self.nodes.push(ConditionNode {
            connector,
            negated,
            condition,
        });
    }

    /// Returns true when no node was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over the top-level nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, ConditionNode> {
        self.nodes.iter()
    }
}

impl IntoIterator for Conditions {
    type Item = ConditionNode;
    type IntoIter = std::vec::IntoIter<ConditionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Conditions {
    type Item = &'a ConditionNode;
    type IntoIter = std::slice::Iter<'a, ConditionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
