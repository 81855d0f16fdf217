//! Tests for SELECT statements: columns, aliases, aggregates, sources,
//! sub-queries, grouping, ordering, unions and composition.

mod common;
use common::*;

use oxide_query::{raw, sub, Builder, Dialect};

#[test]
fn select_star_with_where() {
    assert_sql(
        &generic().select(["*"]).from("users").where_op("id", "=", 1),
        r#"select * from "users" where "id" = ?"#,
        &[int(1)],
    );
}

#[test]
fn select_without_columns_is_star() {
    assert_sql(&generic().from("users"), r#"select * from "users""#, &[]);
}

#[test]
fn column_and_table_aliases() {
    let query = |builder: Builder| {
        builder
            .select(["foo as bar", "users.id", "users.*"])
            .from("users AS u")
    };
    assert_sql(
        &query(generic()),
        r#"select "foo" as "bar", "users"."id", "users".* from "users" as "u""#,
        &[],
    );
    assert_sql(
        &query(oracle()),
        r#"select "foo" "bar", "users"."id", "users".* from "users" "u""#,
        &[],
    );
    assert_sql(
        &query(mssql()),
        "select [foo] as [bar], [users].[id], [users].* from [users] as [u]",
        &[],
    );
}

#[test]
fn distinct_columns() {
    assert_sql(
        &mysql().distinct().select(["name", "email"]).from("users"),
        "select distinct `name`, `email` from `users`",
        &[],
    );
}

#[test]
fn aggregates() {
    assert_sql(
        &generic().count("*").from("users"),
        r#"select count(*) from "users""#,
        &[],
    );
    assert_sql(
        &generic().count("id as total").from("users"),
        r#"select count("id") as "total" from "users""#,
        &[],
    );
    assert_sql(
        &generic()
            .count_distinct("email")
            .sum("orders.amount")
            .avg_distinct("age")
            .min("age")
            .max("age as oldest")
            .from("users"),
        r#"select count(distinct "email"), sum("orders"."amount"), avg(distinct "age"), min("age"), max("age") as "oldest" from "users""#,
        &[],
    );
    assert_sql(
        &pg()
            .min_distinct("score")
            .max_distinct("score as best")
            .sum_distinct("bonus")
            .from("games"),
        r#"select min(distinct "score"), max(distinct "score") as "best", sum(distinct "bonus") from "games""#,
        &[],
    );
}

#[test]
fn schema_qualifies_source_and_joins() {
    assert_sql(
        &pg()
            .with_schema("public")
            .from("users")
            .join("accounts", "users.id", "=", "accounts.user_id"),
        r#"select * from "public"."users" inner join "public"."accounts" on "users"."id" = "accounts"."user_id""#,
        &[],
    );
}

#[test]
fn sub_query_as_column() {
    assert_sql(
        &generic().select(["name"]).from("users").column(sub(|q| {
            q.count("*")
                .from("orders")
                .where_raw(r#""orders"."user_id" = "users"."id""#)
                .alias("order_count")
        })),
        r#"select "name", (select count(*) from "orders" where "orders"."user_id" = "users"."id") as "order_count" from "users""#,
        &[],
    );
}

#[test]
fn sub_query_as_source() {
    assert_sql(
        &generic().from(sub(|q| {
            q.from("users").where_eq("active", true).alias("active_users")
        })),
        r#"select * from (select * from "users" where "active" = ?) as "active_users""#,
        &[oxide_query::SqlValue::Bool(true)],
    );
}

#[test]
fn group_by_and_having() {
    assert_sql(
        &generic()
            .select(["department"])
            .count("id as total")
            .from("employees")
            .group_by(["department"])
            .having_op("total", ">", 5)
            .or_having_raw(raw("sum(\"salary\") > ?", 100_000)),
        r#"select "department", count("id") as "total" from "employees" group by "department" having "total" > ? or sum("salary") > ?"#,
        &[int(5), int(100_000)],
    );
}

#[test]
fn group_by_raw() {
    assert_sql(
        &mysql()
            .select(["year"])
            .from("sales")
            .group_by_raw("year with rollup"),
        "select `year` from `sales` group by year with rollup",
        &[],
    );
}

#[test]
fn order_by_variants() {
    assert_sql(
        &generic()
            .from("users")
            .order_by("name")
            .order_by_desc("age")
            .order_by_direction("email", "DESC")
            .order_by_raw("random()"),
        r#"select * from "users" order by "name" asc, "age" desc, "email" desc, random()"#,
        &[],
    );
}

#[test]
fn unions() {
    assert_sql(
        &generic()
            .from("a")
            .where_eq("x", 1)
            .union(generic().from("b").where_eq("x", 2))
            .union_all_wrapped(sub(|q| q.from("c"))),
        r#"select * from "a" where "x" = ? union select * from "b" where "x" = ? union all (select * from "c")"#,
        &[int(1), int(2)],
    );
}

#[test]
fn union_many_with_raw() {
    assert_sql(
        &generic().from("a").union_many(
            [raw("select * from \"b\"", ()), raw("select * from \"c\"", ())],
            false,
            true,
        ),
        r#"select * from "a" union (select * from "b") union (select * from "c")"#,
        &[],
    );
}

#[test]
fn first_limits_to_one_row() {
    assert_sql(
        &generic().first(["id", "name"]).from("users"),
        r#"select "id", "name" from "users" limit ?"#,
        &[int(1)],
    );
}

#[test]
fn postgres_array_subscript() {
    assert_sql(
        &pg().select(["tags[1]"]).from("posts"),
        r#"select "tags"[1] from "posts""#,
        &[],
    );
}

#[test]
fn where_bool_literals() {
    assert_sql(
        &generic().from("users").where_bool(true).or().where_bool(false),
        r#"select * from "users" where 1 = 1 or 1 = 0"#,
        &[],
    );
}

#[test]
fn clone_with_other_client_leaves_original() {
    let original = generic().from("users").where_eq("id", 1).limit(2);
    let before = compile(&original);
    let copy = original.with_client(Dialect::MsSql).where_eq("name", "x");
    assert_sql(
        &copy,
        "select top (?) * from [users] where [id] = ? and [name] = ?",
        &[int(2), int(1), text("x")],
    );
    assert_eq!(compile(&original), before);
}

#[test]
fn modify_applies_reusable_composition() {
    fn active(query: Builder) -> Builder {
        query.where_null("deleted_at").where_eq("active", true)
    }
    let sql = compile(&generic().from("users").modify(active)).sql;
    assert_eq!(
        sql,
        r#"select * from "users" where "deleted_at" is null and "active" = ?"#
    );
}

#[test]
fn compilation_is_repeatable() {
    let query = pg().from("users").where_in("id", vec![1, 2, 3]).limit(5);
    assert_eq!(compile(&query), compile(&query));
}

#[test]
fn row_locks_in_transaction() {
    let locked = |builder: Builder| builder.from("users").where_eq("id", 1).for_update().transacting();
    assert_eq!(
        compile(&locked(mysql())).sql,
        "select * from `users` where `id` = ? for update"
    );
    assert_eq!(
        compile(&mysql().from("users").for_share().transacting()).sql,
        "select * from `users` lock in share mode"
    );
    assert_eq!(
        compile(&locked(sqlite())).sql,
        r#"select * from "users" where "id" = ?"#
    );
}
