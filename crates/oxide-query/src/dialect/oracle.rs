//! Oracle dialect.

use super::{
    ArrayLiteral, BlobLiteral, DefaultRow, Grammar, MultiInsert, MutationLimit, Pagination,
    Returning,
};

/// Oracle grammar: bare aliases, rownum pagination and block inserts.
pub(crate) const GRAMMAR: Grammar = Grammar {
    name: "oracle",
    quote: ('"', '"'),
    alias_separator: " ",
    array_subscripts: false,
    pagination: Pagination::RowNumber {
        unbounded_limit: 10_000_000_000_000,
    },
    multi_insert: MultiInsert::Block,
    returning: Returning::RowId,
    default_row: DefaultRow::ReturningColumn,
    undefined_marker: Some("DEFAULT"),
    update_joins: false,
    delete_joins: false,
    mutation_limit: MutationLimit::Omit,
    mutation_suffix: "",
    truncate: ("truncate table ", ""),
    booleans: ("1", "0"),
    array_literal: ArrayLiteral::Parenthesized,
    blob_literal: BlobLiteral::HexString,
    lock_update: Some("for update"),
    lock_share: None,
    lock_in_from: false,
};
