//! PostgreSQL dialect.

use super::{
    ArrayLiteral, BlobLiteral, DefaultRow, Grammar, MultiInsert, MutationLimit, OffsetOnly,
    Pagination, Returning,
};

/// PostgreSQL grammar: native `returning` and array subscripts.
pub(crate) const GRAMMAR: Grammar = Grammar {
    name: "postgres",
    quote: ('"', '"'),
    alias_separator: " as ",
    array_subscripts: true,
    pagination: Pagination::LimitOffset {
        offset_only: OffsetOnly::Omit,
    },
    multi_insert: MultiInsert::Values,
    returning: Returning::Clause,
    default_row: DefaultRow::DefaultValues,
    undefined_marker: Some("DEFAULT"),
    update_joins: false,
    delete_joins: false,
    mutation_limit: MutationLimit::Omit,
    mutation_suffix: "",
    truncate: ("truncate ", " restart identity"),
    booleans: ("true", "false"),
    array_literal: ArrayLiteral::Constructor,
    blob_literal: BlobLiteral::Escaped,
    lock_update: Some("for update"),
    lock_share: Some("for share"),
    lock_in_from: false,
};
