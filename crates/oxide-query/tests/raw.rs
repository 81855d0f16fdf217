//! Tests for raw fragments: positional and named placeholders, identifier
//! substitution, nesting and wrapping.

mod common;
use common::*;

use oxide_query::{bindings, raw, Bindings, QueryError, Raw, SqlValue};

#[test]
fn raw_column_with_binding() {
    assert_sql(
        &pg()
            .select(["id"])
            .column(raw("coalesce(??, ?) as label", bindings!["nickname", "anon"]))
            .from("users"),
        r#"select "id", coalesce("nickname", ?) as label from "users""#,
        &[text("anon")],
    );
}

#[test]
fn identifier_list_binding() {
    assert_sql(
        &mysql()
            .from("users")
            .where_raw(raw("(??) = (?, ?)", bindings![vec!["a", "b"], 1, 2])),
        "select * from `users` where (`a`, `b`) = (?, ?)",
        &[int(1), int(2)],
    );
}

#[test]
fn named_bindings() {
    let fragment = Raw::with_bindings(
        ":col: = :value or :col: is null",
        Bindings::named([("col", "email"), ("value", "a@b.c")]),
    );
    assert_sql(
        &generic().from("users").where_raw(fragment),
        r#"select * from "users" where "email" = ? or "email" is null"#,
        &[text("a@b.c")],
    );
}

#[test]
fn named_bindings_keep_casts_and_escapes() {
    let fragment = Raw::with_bindings(
        r"created_at::date = :day and label = '\:x'",
        Bindings::named([("day", "2024-01-01")]),
    );
    assert_sql(
        &pg().from("events").where_raw(fragment),
        r#"select * from "events" where created_at::date = ? and label = ':x'"#,
        &[text("2024-01-01")],
    );
}

#[test]
fn missing_named_binding_fails() {
    let fragment = Raw::with_bindings("id = :id", Bindings::named([("other", 1)]));
    let result = generic().from("users").where_raw(fragment).to_sql();
    assert!(matches!(result, Err(QueryError::Template(_))));
}

#[test]
fn positional_count_mismatch_fails() {
    let too_few = generic().from("users").where_raw(raw("a = ? and b = ?", 1)).to_sql();
    assert!(matches!(too_few, Err(QueryError::Template(_))));
    let too_many = generic().from("users").where_raw(raw("a = ?", [1, 2])).to_sql();
    assert!(matches!(too_many, Err(QueryError::Template(_))));
}

#[test]
fn vector_is_one_array_binding() {
    assert_sql(
        &pg().from("posts").where_raw(raw(r#""tags" && ?"#, vec!["a", "b"])),
        r#"select * from "posts" where "tags" && ?"#,
        &[SqlValue::Array(vec![text("a"), text("b")])],
    );
}

#[test]
fn nested_fragments_splice_in_order() {
    let inner = raw("lower(?)", "X");
    assert_sql(
        &generic()
            .from("users")
            .where_raw(raw("? = ? and ? > ?", bindings![inner, "x", raw("age", ()), 18])),
        r#"select * from "users" where lower(?) = ? and age > ?"#,
        &[text("X"), text("x"), int(18)],
    );
}

#[test]
fn nested_statement_is_unparenthesized_unless_wrapped() {
    let count = generic().count("*").from("orders").where_eq("paid", true);
    assert_sql(
        &generic()
            .select(["id"])
            .column(raw("?", count.clone()).wrap("(", ") as paid_orders"))
            .from("users"),
        r#"select "id", (select count(*) from "orders" where "paid" = ?) as paid_orders from "users""#,
        &[SqlValue::Bool(true)],
    );
    assert_sql(
        &generic().from("users").where_raw(raw("exists (?)", count)),
        r#"select * from "users" where exists (select count(*) from "orders" where "paid" = ?)"#,
        &[SqlValue::Bool(true)],
    );
}

#[test]
fn nested_statement_error_propagates() {
    let broken = generic().from("orders").where_op("id", "nope", 1);
    let result = generic().from("users").where_raw(raw("exists (?)", broken)).to_sql();
    assert_eq!(result, Err(QueryError::Operator(String::from("nope"))));
}

#[test]
fn escaped_question_mark_survives() {
    let compiled = compile(&pg().from("docs").where_raw(raw(r#""data" \? ?"#, "key")));
    assert_eq!(compiled.sql, r#"select * from "docs" where "data" \? ?"#);
    assert_eq!(placeholder_count(&compiled.sql), 1);
}

#[test]
fn raw_order_by_and_group_by_with_bindings() {
    assert_sql(
        &mysql()
            .from("users")
            .group_by_raw(raw("year(??)", "created_at"))
            .order_by_raw(raw("field(??, ?, ?)", bindings!["role", "admin", "user"])),
        "select * from `users` group by year(`created_at`) order by field(`role`, ?, ?)",
        &[text("admin"), text("user")],
    );
}
