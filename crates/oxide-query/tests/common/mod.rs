#![allow(dead_code)]

use oxide_query::{Builder, Client, ClientConfig, CompiledQuery, Dialect, SqlValue};

pub fn generic() -> Builder {
    Client::new(Dialect::Generic).query_builder()
}

pub fn mysql() -> Builder {
    Client::new(Dialect::MySql).query_builder()
}

pub fn pg() -> Builder {
    Client::new(Dialect::Postgres).query_builder()
}

pub fn sqlite() -> Builder {
    Client::new(Dialect::Sqlite).query_builder()
}

pub fn mssql() -> Builder {
    Client::new(Dialect::MsSql).query_builder()
}

pub fn oracle() -> Builder {
    Client::new(Dialect::Oracle).query_builder()
}

/// A builder whose undefined insert values render as `NULL`.
pub fn null_default(dialect: Dialect) -> Builder {
    Client::with_config(ClientConfig {
        dialect,
        use_null_as_default: true,
    })
    .query_builder()
}

pub fn compile(builder: &Builder) -> CompiledQuery {
    builder
        .to_sql()
        .unwrap_or_else(|e| panic!("Failed to compile: {e}"))
}

/// Asserts the SQL text and bindings, and that every placeholder has a
/// binding.
pub fn assert_sql(builder: &Builder, sql: &str, bindings: &[SqlValue]) {
    let compiled = compile(builder);
    assert_eq!(compiled.sql, sql);
    assert_eq!(compiled.bindings, bindings);
    assert_eq!(
        placeholder_count(&compiled.sql),
        compiled.bindings.len(),
        "placeholder count mismatch in: {}",
        compiled.sql
    );
}

/// Counts `?` placeholders, skipping escaped `\?`.
pub fn placeholder_count(sql: &str) -> usize {
    let mut count = 0;
    let mut escaped = false;
    for ch in sql.chars() {
        match ch {
            '\\' => escaped = true,
            '?' if escaped => escaped = false,
            '?' => count += 1,
            _ => escaped = false,
        }
    }
    count
}

pub fn int(n: i64) -> SqlValue {
    SqlValue::Int(n)
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}
