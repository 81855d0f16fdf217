//! MySQL dialect.

use super::{
    ArrayLiteral, BlobLiteral, DefaultRow, Grammar, MultiInsert, MutationLimit, OffsetOnly,
    Pagination, Returning,
};

/// MySQL grammar: backtick quoting and limited updates.
pub(crate) const GRAMMAR: Grammar = Grammar {
    name: "mysql",
    quote: ('`', '`'),
    alias_separator: " as ",
    array_subscripts: false,
    pagination: Pagination::LimitOffset {
        // MySQL has no offset without a limit.
        offset_only: OffsetOnly::Literal("18446744073709551615"),
    },
    multi_insert: MultiInsert::Values,
    returning: Returning::Unsupported,
    default_row: DefaultRow::EmptyValues,
    undefined_marker: Some("DEFAULT"),
    update_joins: true,
    delete_joins: true,
    mutation_limit: MutationLimit::Trailing,
    mutation_suffix: "",
    truncate: ("truncate ", ""),
    booleans: ("true", "false"),
    array_literal: ArrayLiteral::Parenthesized,
    blob_literal: BlobLiteral::HexString,
    lock_update: Some("for update"),
    lock_share: Some("lock in share mode"),
    lock_in_from: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_dialect() {
        assert_eq!(GRAMMAR.name, "mysql");
        assert_eq!(GRAMMAR.quote_identifier("users"), "`users`");
        assert_eq!(GRAMMAR.mutation_limit, MutationLimit::Trailing);
        assert!(GRAMMAR.update_joins);
    }
}
