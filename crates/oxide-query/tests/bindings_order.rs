//! Binding order must match placeholder order in the final text, across
//! columns, joins, nested statements, raw fragments and pagination.

mod common;
use common::*;

use oxide_query::{bindings, raw, sub, Builder, Dialect, Row};

fn report(builder: Builder) -> Builder {
    builder
        .select(["u.id"])
        .column(raw("? as kind", "report"))
        .column(sub(|q| {
            q.count("*")
                .from("orders as o")
                .where_raw(r#""o"."user_id" = "u"."id""#)
                .where_op("o.total", ">", 100)
                .alias("big_orders")
        }))
        .from("users as u")
        .left_join_with("accounts as a", |j| {
            j.on("a.user_id", "u.id").on_raw(raw(r#""a"."plan" = ?"#, "pro"))
        })
        .where_in("u.role", vec!["admin", "owner"])
        .where_raw(raw("u.score > ? + ?", bindings![1, raw("?", 2)]))
        .group_by(["u.id"])
        .having_op("u.id", ">", 7)
        .order_by_raw(raw("field(u.id, ?)", 9))
}

#[test]
fn every_clause_in_document_order() {
    assert_sql(
        &report(generic()).limit(20).offset(40),
        r#"select "u"."id", ? as kind, (select count(*) from "orders" as "o" where "o"."user_id" = "u"."id" and "o"."total" > ?) as "big_orders" from "users" as "u" left join "accounts" as "a" on "a"."user_id" = "u"."id" and "a"."plan" = ? where "u"."role" in (?, ?) and u.score > ? + ? group by "u"."id" having "u"."id" > ? order by field(u.id, ?) limit ? offset ?"#,
        &[
            text("report"),
            int(100),
            text("pro"),
            text("admin"),
            text("owner"),
            int(1),
            int(2),
            int(7),
            int(9),
            int(20),
            int(40),
        ],
    );
}

#[test]
fn mssql_top_binding_comes_first() {
    let compiled = compile(&report(mssql()).limit(20));
    assert!(compiled.sql.starts_with("select top (?) [u].[id], ? as kind"));
    assert_eq!(compiled.bindings[0], int(20));
    assert_eq!(compiled.bindings[1], text("report"));
    assert_eq!(placeholder_count(&compiled.sql), compiled.bindings.len());
}

#[test]
fn oracle_rownum_bindings_follow_inner_query() {
    let compiled = compile(&report(oracle()).limit(20).offset(40));
    let n = compiled.bindings.len();
    assert_eq!(n, 11);
    assert_eq!(compiled.bindings[0], text("report"));
    assert_eq!(compiled.bindings[n - 2], int(60));
    assert_eq!(compiled.bindings[n - 1], int(40));
    assert_eq!(placeholder_count(&compiled.sql), n);
}

#[test]
fn every_dialect_matches_placeholder_count() {
    for dialect in [
        Dialect::Generic,
        Dialect::MySql,
        Dialect::Postgres,
        Dialect::Sqlite,
        Dialect::MsSql,
        Dialect::Oracle,
    ] {
        let builder = Builder::new(dialect.into());
        let compiled = compile(&report(builder).limit(3).offset(1));
        assert_eq!(
            placeholder_count(&compiled.sql),
            compiled.bindings.len(),
            "{dialect:?}: {}",
            compiled.sql
        );
    }
}

#[test]
fn insert_values_then_returning() {
    assert_sql(
        &pg()
            .into_table("users")
            .insert_returning(
                vec![
                    Row::new().set("a", 1).set("b", raw("? || ?", ["x", "y"])),
                    Row::new().set("a", sub(|q| q.select(["id"]).from("t").where_eq("k", 2))).set("b", 3),
                ],
                ["id"],
            ),
        r#"insert into "users" ("a", "b") values (?, ? || ?), ((select "id" from "t" where "k" = ?), ?) returning "id""#,
        &[int(1), text("x"), text("y"), int(2), int(3)],
    );
}

#[test]
fn update_assignments_then_where() {
    assert_sql(
        &generic()
            .table("users")
            .update(
                Row::new()
                    .set("a", 1)
                    .set("b", raw("? + ?", [2, 3])),
            )
            .where_in("id", sub(|q| q.select(["id"]).from("t").where_eq("x", 4)))
            .where_eq("y", 5),
        r#"update "users" set "a" = ?, "b" = ? + ? where "id" in (select "id" from "t" where "x" = ?) and "y" = ?"#,
        &[int(1), int(2), int(3), int(4), int(5)],
    );
}

#[test]
fn union_bindings_follow_main_query() {
    assert_sql(
        &generic()
            .from("a")
            .where_eq("x", 1)
            .union(sub(|q| q.from("b").where_eq("x", 2)))
            .union_all(raw(r#"select * from "c" where "x" = ?"#, 3)),
        r#"select * from "a" where "x" = ? union select * from "b" where "x" = ? union all select * from "c" where "x" = ?"#,
        &[int(1), int(2), int(3)],
    );
}

#[test]
fn literal_interpolation_follows_bindings() {
    let literal = report(sqlite()).to_query().unwrap();
    assert!(literal.contains("'report' as kind"));
    assert!(literal.contains(r#""u"."role" in ('admin', 'owner')"#));
    assert!(literal.contains("u.score > 1 + 2"));
    assert!(!literal.contains('?'));
}
