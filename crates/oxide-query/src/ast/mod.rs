//! The statement tree assembled by the builder and walked by the compiler.

mod condition;
mod operand;
mod operator;
mod statement;

pub use condition::{Condition, ConditionNode, Conditions, Connector};
pub use operand::{sub, Aggregate, Column, Operand, SubQuery};
pub use operator::Operator;
pub use statement::{
    Direction, InsertSource, Join, JoinClause, JoinKind, Lock, Order, Row, Statement,
    StatementKind, Union,
};
