//! # oxide-query
//!
//! A portable SQL statement builder. One statement tree, assembled through a
//! fluent API, renders to dialect-correct SQL text plus ordered bindings for
//! several target grammars.
//!
//! This crate provides:
//! - A fluent [`Builder`] for SELECT, INSERT, UPDATE, DELETE and TRUNCATE
//! - Nested sub-queries, raw fragments and grouped WHERE/HAVING/ON trees
//! - A data-driven [`Grammar`] per dialect: quoting, pagination, multi-row
//!   inserts, returning clauses and default-value policy
//! - Protection against SQL injection through parameterized output
//!
//! ## Building Statements
//!
//! ```rust
//! use oxide_query::{Client, Dialect, SqlValue};
//!
//! let client = Client::new(Dialect::Postgres);
//! let compiled = client
//!     .table("users")
//!     .select(["id", "email"])
//!     .where_op("age", ">=", 18)
//!     .where_in("role", vec!["admin", "owner"])
//!     .order_by_desc("created_at")
//!     .limit(20)
//!     .to_sql()
//!     .unwrap();
//!
//! assert_eq!(
//!     compiled.sql,
//!     r#"select "id", "email" from "users" where "age" >= ? and "role" in (?, ?) order by "created_at" desc limit ?"#
//! );
//! assert_eq!(compiled.bindings[0], SqlValue::Int(18));
//! ```
//!
//! ## One Tree, Several Dialects
//!
//! ```rust
//! use oxide_query::{Client, Dialect};
//!
//! let query = Client::new(Dialect::Generic).table("users").limit(10).offset(5);
//!
//! assert_eq!(
//!     query.to_sql().unwrap().sql,
//!     r#"select * from "users" limit ? offset ?"#
//! );
//! assert_eq!(
//!     query.with_client(Dialect::MsSql).to_sql().unwrap().sql,
//!     "select * from [users] offset ? rows fetch next ? rows only"
//! );
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are always bound. The literal form is meant for logs only:
//!
//! ```rust
//! use oxide_query::{Client, Dialect};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let query = Client::new(Dialect::MySql)
//!     .table("users")
//!     .where_eq("name", user_input);
//!
//! assert_eq!(query.to_sql().unwrap().sql, "select * from `users` where `name` = ?");
//! assert_eq!(
//!     query.to_query().unwrap(),
//!     "select * from `users` where `name` = '''; DROP TABLE users; --'"
//! );
//! ```

pub mod ast;
pub mod builder;
pub mod client;
pub mod compiler;
pub mod dialect;
pub mod error;
pub mod raw;
pub mod value;

pub use ast::{sub, Column, Direction, JoinClause, JoinKind, Operand, Row, Statement, SubQuery};
pub use builder::Builder;
pub use client::{Client, ClientConfig};
pub use compiler::CompiledQuery;
pub use dialect::{Dialect, Grammar};
pub use error::{QueryError, Result};
pub use raw::{raw, Bindings, IntoBindings, Raw};
pub use value::{SqlValue, ToSqlValue};
