//! Generic SQL dialect.

use super::{
    ArrayLiteral, BlobLiteral, DefaultRow, Grammar, MultiInsert, MutationLimit, OffsetOnly,
    Pagination, Returning,
};

/// A generic grammar close to ANSI SQL, used when no database is named.
pub(crate) const GRAMMAR: Grammar = Grammar {
    name: "generic",
    quote: ('"', '"'),
    alias_separator: " as ",
    array_subscripts: false,
    pagination: Pagination::LimitOffset {
        offset_only: OffsetOnly::Omit,
    },
    multi_insert: MultiInsert::Values,
    returning: Returning::Unsupported,
    default_row: DefaultRow::DefaultValues,
    undefined_marker: Some("DEFAULT"),
    update_joins: false,
    delete_joins: false,
    mutation_limit: MutationLimit::Omit,
    mutation_suffix: "",
    truncate: ("truncate ", ""),
    booleans: ("true", "false"),
    array_literal: ArrayLiteral::Parenthesized,
    blob_literal: BlobLiteral::HexString,
    lock_update: None,
    lock_share: None,
    lock_in_from: false,
};
