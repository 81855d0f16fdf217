//! Literal interpolation for logging and debugging.

use super::CompiledQuery;
use crate::dialect::Grammar;

impl CompiledQuery {
    /// Returns the SQL text with every binding inlined as a literal.
    ///
    /// Escaped `\?` sequences become plain question marks. Output slots
    /// (oracle `returning .. into ?`) stay `?`.
    ///
    /// **Warning**: The result is meant for logs. Execute the parameterized
    /// form instead.
    #[must_use]
    pub fn to_literal(&self, grammar: &Grammar) -> String {
        let mut bindings = self.bindings.iter();
        let mut sql = String::with_capacity(self.sql.len());
        let mut chars = self.sql.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' if chars.peek() == Some(&'?') => {
                    chars.next();
                    sql.push('?');
                }
                '?' => match bindings.next() {
                    Some(value) => sql.push_str(&value.to_sql_inline(grammar)),
                    None => sql.push('?'),
                },
                _ => sql.push(ch),
            }
        }
        sql
    }
}
