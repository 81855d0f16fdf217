//! SQLite dialect.

use super::{
    ArrayLiteral, BlobLiteral, DefaultRow, Grammar, MultiInsert, MutationLimit, OffsetOnly,
    Pagination, Returning,
};

/// SQLite grammar.
///
/// Multi-row inserts are written as a union of selects, and undefined insert
/// values are rejected unless the client substitutes NULL.
pub(crate) const GRAMMAR: Grammar = Grammar {
    name: "sqlite",
    quote: ('"', '"'),
    alias_separator: " as ",
    array_subscripts: false,
    pagination: Pagination::LimitOffset {
        offset_only: OffsetOnly::Bound(-1),
    },
    multi_insert: MultiInsert::UnionAll,
    returning: Returning::Unsupported,
    default_row: DefaultRow::DefaultValues,
    undefined_marker: None,
    update_joins: false,
    delete_joins: false,
    mutation_limit: MutationLimit::Omit,
    mutation_suffix: "",
    truncate: ("delete from ", ""),
    booleans: ("1", "0"),
    array_literal: ArrayLiteral::Parenthesized,
    blob_literal: BlobLiteral::HexString,
    lock_update: None,
    lock_share: None,
    lock_in_from: false,
};
