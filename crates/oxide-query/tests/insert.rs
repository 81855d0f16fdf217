//! Tests for INSERT statements: column unions, default markers, the
//! multi-row strategies, empty rows, insert-from-select and RETURNING.

mod common;
use common::*;

use oxide_query::{raw, sub, Dialect, QueryError, Row, SqlValue};

fn heterogeneous() -> Vec<Row> {
    vec![Row::from([("a", 1)]), Row::from([("b", 2)])]
}

#[test]
fn single_row() {
    assert_sql(
        &generic()
            .into_table("users")
            .insert(Row::new().set("email", "foo").set("name", "taylor")),
        r#"insert into "users" ("email", "name") values (?, ?)"#,
        &[text("foo"), text("taylor")],
    );
}

#[test]
fn rows_with_different_keys_use_default_marker() {
    assert_sql(
        &generic().into_table("users").insert(heterogeneous()),
        r#"insert into "users" ("a", "b") values (?, DEFAULT), (DEFAULT, ?)"#,
        &[int(1), int(2)],
    );
}

#[test]
fn null_as_default_marker() {
    assert_sql(
        &null_default(Dialect::Postgres)
            .into_table("users")
            .insert(heterogeneous()),
        r#"insert into "users" ("a", "b") values (?, NULL), (NULL, ?)"#,
        &[int(1), int(2)],
    );
}

#[test]
fn explicit_undefined_value_uses_marker() {
    assert_sql(
        &mysql()
            .into_table("users")
            .insert(Row::new().set("a", 1).undefined("b")),
        "insert into `users` (`a`, `b`) values (?, DEFAULT)",
        &[int(1)],
    );
}

#[test]
fn sqlite_multi_row_is_union_all() {
    assert_sql(
        &null_default(Dialect::Sqlite)
            .into_table("users")
            .insert(heterogeneous()),
        r#"insert into "users" ("a", "b") select ? as "a", NULL as "b" union all select NULL as "a", ? as "b""#,
        &[int(1), int(2)],
    );
}

#[test]
fn sqlite_single_row_uses_values() {
    assert_sql(
        &sqlite().into_table("users").insert(Row::from([("a", 1)])),
        r#"insert into "users" ("a") values (?)"#,
        &[int(1)],
    );
}

#[test]
fn sqlite_rejects_missing_values_without_null_default() {
    let result = sqlite().into_table("users").insert(heterogeneous()).to_sql();
    assert!(matches!(result, Err(QueryError::Value(_))));
}

#[test]
fn oracle_multi_row_is_block() {
    assert_sql(
        &oracle().into_table("users").insert(heterogeneous()),
        r#"begin execute immediate 'insert into "users" ("a", "b") values (:1, DEFAULT)' using ?; execute immediate 'insert into "users" ("a", "b") values (DEFAULT, :1)' using ?; end;"#,
        &[int(1), int(2)],
    );
}

#[test]
fn oracle_block_with_returning_adds_out_bindings() {
    let compiled = compile(
        &oracle()
            .into_table("users")
            .insert_returning(vec![Row::from([("a", 1)]), Row::from([("a", 2)])], ["id"]),
    );
    assert_eq!(
        compiled.sql,
        r#"begin execute immediate 'insert into "users" ("a") values (:1) returning ROWID into :2' using ?, out ?; execute immediate 'insert into "users" ("a") values (:1) returning ROWID into :2' using ?, out ?; end;"#
    );
    let returning = SqlValue::Returning(vec![String::from("id")]);
    assert_eq!(
        compiled.bindings,
        vec![int(1), returning.clone(), int(2), returning]
    );
}

#[test]
fn returning_per_dialect() {
    let insert = |builder: oxide_query::Builder| {
        builder
            .into_table("users")
            .insert_returning(Row::from([("email", "a@b.c")]), ["id"])
    };
    assert_sql(
        &insert(pg()),
        r#"insert into "users" ("email") values (?) returning "id""#,
        &[text("a@b.c")],
    );
    assert_sql(
        &insert(mssql()),
        "insert into [users] ([email]) output inserted.[id] values (?)",
        &[text("a@b.c")],
    );
    assert_sql(
        &insert(oracle()),
        r#"insert into "users" ("email") values (?) returning ROWID into ?"#,
        &[text("a@b.c"), SqlValue::Returning(vec![String::from("id")])],
    );
    assert_sql(
        &insert(mysql()),
        "insert into `users` (`email`) values (?)",
        &[text("a@b.c")],
    );
}

#[test]
fn row_without_columns() {
    assert_sql(
        &generic().into_table("users").insert(Row::new()),
        r#"insert into "users" default values"#,
        &[],
    );
    assert_sql(
        &mysql().into_table("users").insert(Row::new()),
        "insert into `users` () values ()",
        &[],
    );
    assert_sql(
        &mysql().into_table("users").insert(vec![Row::new(), Row::new()]),
        "insert into `users` () values (), ()",
        &[],
    );
    assert_sql(
        &oracle().into_table("users").insert_returning(Row::new(), ["id"]),
        r#"insert into "users" ("id") values (default) returning ROWID into ?"#,
        &[SqlValue::Returning(vec![String::from("id")])],
    );
}

#[test]
fn rows_without_columns_rejected_where_unsupported() {
    let several = pg()
        .into_table("users")
        .insert(vec![Row::new(), Row::new()])
        .to_sql();
    assert!(matches!(several, Err(QueryError::Structure(_))));

    let oracle_bare = oracle().into_table("users").insert(Row::new()).to_sql();
    assert!(matches!(oracle_bare, Err(QueryError::Structure(_))));
}

#[test]
fn empty_insert_compiles_to_nothing() {
    let compiled = compile(&generic().into_table("users").insert(Vec::<Row>::new()));
    assert!(compiled.is_empty());
    assert!(compiled.bindings.is_empty());
}

#[test]
fn insert_from_select() {
    assert_sql(
        &generic().into_table("archive").insert(
            generic()
                .select(["id", "email"])
                .from("users")
                .where_eq("old", true),
        ),
        r#"insert into "archive" select "id", "email" from "users" where "old" = ?"#,
        &[SqlValue::Bool(true)],
    );
    assert_sql(
        &generic()
            .into_table("archive")
            .insert(sub(|q| q.from("users").where_op("id", ">", 5))),
        r#"insert into "archive" select * from "users" where "id" > ?"#,
        &[int(5)],
    );
}

#[test]
fn raw_values_are_spliced() {
    assert_sql(
        &pg()
            .into_table("events")
            .insert(Row::new().set("name", "login").set("created_at", raw("now()", ()))),
        r#"insert into "events" ("name", "created_at") values (?, now())"#,
        &[text("login")],
    );
}

#[test]
fn array_value_is_one_binding() {
    assert_sql(
        &pg()
            .into_table("posts")
            .insert(Row::new().set("tags", vec!["a", "b"])),
        r#"insert into "posts" ("tags") values (?)"#,
        &[SqlValue::Array(vec![text("a"), text("b")])],
    );
}

#[test]
fn schema_qualified_insert() {
    assert_sql(
        &pg()
            .with_schema("audit")
            .into_table("events")
            .insert(Row::from([("name", "x")])),
        r#"insert into "audit"."events" ("name") values (?)"#,
        &[text("x")],
    );
}
