//! Raw fragment expansion.

use super::{CompiledQuery, QueryCompiler};
use crate::ast::Operand;
use crate::error::{QueryError, Result};
use crate::raw::{Bindings, Raw};
use crate::value::SqlValue;

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

impl QueryCompiler {
    /// Expands a raw fragment, splicing nested fragments and statements in
    /// template order.
    pub(super) fn raw(&self, raw: &Raw, out: &mut CompiledQuery) -> Result<()> {
        if let Some((before, _)) = &raw.wrap {
            out.push(before);
        }
        match &raw.bindings {
            Bindings::None => out.push(&raw.sql),
            Bindings::Positional(values) => self.positional(&raw.sql, values, out)?,
            Bindings::Named(pairs) => self.named(&raw.sql, pairs, out)?,
        }
        if let Some((_, after)) = &raw.wrap {
            out.push(after);
        }
        Ok(())
    }

    fn positional(&self, template: &str, values: &[Operand], out: &mut CompiledQuery) -> Result<()> {
        let mut remaining = values.iter();
        let mut chars = template.chars().peekable();
        let mut text = String::new();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' if chars.peek() == Some(&'?') => {
                    chars.next();
                    text.push_str("\\?");
                }
                '?' => {
                    out.push(&text);
                    text.clear();
                    let value = remaining.next().ok_or_else(|| {
                        QueryError::Template(format!(
                            "\"{template}\" has more placeholders than the {} bindings given",
                            values.len()
                        ))
                    })?;
                    if chars.peek() == Some(&'?') {
                        chars.next();
                        self.identifier_binding(value, out)?;
                    } else {
                        self.value_binding(value, out)?;
                    }
                }
                _ => text.push(ch),
            }
        }
        out.push(&text);
        if remaining.len() > 0 {
            return Err(QueryError::Template(format!(
                "\"{template}\" uses {} of the {} bindings given",
                values.len() - remaining.len(),
                values.len()
            )));
        }
        Ok(())
    }

    fn named(
        &self,
        template: &str,
        pairs: &[(String, Operand)],
        out: &mut CompiledQuery,
    ) -> Result<()> {
        let lookup = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    QueryError::Template(format!("missing named binding \"{name}\" in \"{template}\""))
                })
        };
        let mut chars = template.chars().peekable();
        let mut text = String::new();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' if chars.peek() == Some(&':') => {
                    chars.next();
                    text.push(':');
                }
                ':' if chars.peek() == Some(&':') => {
                    chars.next();
                    text.push_str("::");
                }
                ':' if chars.peek().copied().is_some_and(is_name_char) => {
                    let mut name = String::new();
                    while let Some(&next) = chars.peek() {
                        if !is_name_char(next) {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }
                    out.push(&text);
                    text.clear();
                    let value = lookup(&name)?;
                    if chars.peek() == Some(&':') {
                        chars.next();
                        self.identifier_binding(value, out)?;
                    } else {
                        self.value_binding(value, out)?;
                    }
                }
                _ => text.push(ch),
            }
        }
        out.push(&text);
        Ok(())
    }

    /// A binding in value position; nested statements are not parenthesized.
    fn value_binding(&self, value: &Operand, out: &mut CompiledQuery) -> Result<()> {
        self.unwrapped(value, out)
    }

    /// A binding in identifier position (`??`, `:name:`).
    fn identifier_binding(&self, value: &Operand, out: &mut CompiledQuery) -> Result<()> {
        match value {
            Operand::Value(SqlValue::Text(name)) => {
                out.push(&self.wrap(name));
                Ok(())
            }
            Operand::Value(SqlValue::Array(names)) => {
                let mut wrapped = Vec::with_capacity(names.len());
                for name in names {
                    match name {
                        SqlValue::Text(name) => wrapped.push(self.wrap(name)),
                        other => {
                            return Err(QueryError::Template(format!(
                                "identifier binding must be text, got {other:?}"
                            )))
                        }
                    }
                }
                out.push(&wrapped.join(", "));
                Ok(())
            }
            Operand::Value(other) => Err(QueryError::Template(format!(
                "identifier binding must be text, got {other:?}"
            ))),
            other => self.unwrapped(other, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Operand;
    use crate::client::Client;
    use crate::dialect::Dialect;
    use crate::error::QueryError;
    use crate::raw::{raw, Bindings, Raw};
    use crate::value::SqlValue;

    fn compile(dialect: Dialect, fragment: Raw) -> crate::error::Result<crate::compiler::CompiledQuery> {
        Client::new(dialect)
            .query_builder()
            .select([fragment])
            .to_sql()
    }

    #[test]
    fn test_identifier_and_value_placeholders() {
        let compiled = compile(
            Dialect::MySql,
            raw("?? = ?", crate::bindings!["users.name", "Bob"]),
        )
        .unwrap();
        assert_eq!(compiled.sql, "select `users`.`name` = ?");
        assert_eq!(compiled.bindings, [SqlValue::Text(String::from("Bob"))]);
    }

    #[test]
    fn test_escaped_question_mark_is_kept() {
        let compiled = compile(Dialect::Postgres, raw(r#""data" \? ?"#, "key")).unwrap();
        assert_eq!(compiled.sql, r#"select "data" \? ?"#);
        assert_eq!(compiled.bindings.len(), 1);
    }

    #[test]
    fn test_count_mismatch() {
        assert!(matches!(
            compile(Dialect::Generic, raw("? + ?", 1)),
            Err(QueryError::Template(_))
        ));
        assert!(matches!(
            compile(Dialect::Generic, raw("?", [1, 2])),
            Err(QueryError::Template(_))
        ));
    }

    #[test]
    fn test_named_placeholders() {
        let fragment = Raw::with_bindings(
            ":name: = :guy or ::cast \\:literal",
            Bindings::named([
                ("name", Operand::from("users.name")),
                ("guy", Operand::from("Bob")),
            ]),
        );
        let compiled = compile(Dialect::Generic, fragment).unwrap();
        assert_eq!(
            compiled.sql,
            r#"select "users"."name" = ? or ::cast :literal"#
        );
    }

    #[test]
    fn test_missing_named_binding() {
        let fragment = Raw::with_bindings(":missing", Bindings::named([("other", 1)]));
        assert!(matches!(
            compile(Dialect::Generic, fragment),
            Err(QueryError::Template(_))
        ));
    }

    #[test]
    fn test_nested_fragment_keeps_order() {
        let inner = raw("coalesce(?, ?)", [1, 2]);
        let outer = raw("? + ? + ?", crate::bindings![0, inner, 3]);
        let compiled = compile(Dialect::Generic, outer).unwrap();
        assert_eq!(compiled.sql, "select ? + coalesce(?, ?) + ?");
        assert_eq!(
            compiled.bindings,
            [SqlValue::Int(0), SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]
        );
    }
}
