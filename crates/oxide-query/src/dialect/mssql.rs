//! Microsoft SQL Server dialect.

use super::{
    ArrayLiteral, BlobLiteral, DefaultRow, Grammar, MultiInsert, MutationLimit, Pagination,
    Returning,
};

/// SQL Server grammar: bracket quoting, `top`, and `output` clauses.
pub(crate) const GRAMMAR: Grammar = Grammar {
    name: "mssql",
    quote: ('[', ']'),
    alias_separator: " as ",
    array_subscripts: false,
    pagination: Pagination::Top,
    multi_insert: MultiInsert::Values,
    returning: Returning::Output,
    default_row: DefaultRow::DefaultValues,
    undefined_marker: Some("DEFAULT"),
    update_joins: true,
    delete_joins: false,
    mutation_limit: MutationLimit::Top,
    mutation_suffix: ";select @@rowcount",
    truncate: ("truncate table ", ""),
    booleans: ("1", "0"),
    array_literal: ArrayLiteral::Parenthesized,
    blob_literal: BlobLiteral::Prefixed,
    lock_update: Some("with (READCOMMITTEDLOCK)"),
    lock_share: Some("with (NOLOCK)"),
    lock_in_from: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mssql_dialect() {
        assert_eq!(GRAMMAR.name, "mssql");
        assert_eq!(GRAMMAR.quote_identifier("users"), "[users]");
        assert_eq!(GRAMMAR.pagination, Pagination::Top);
        assert_eq!(GRAMMAR.mutation_suffix, ";select @@rowcount");
    }
}
