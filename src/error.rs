//! Error types for the layers around the (total, never-failing) grouping
//! core. Grounded in the teacher's `ParseError`/`AnalyzeError` pair
//! (`src/parser.rs`, `src/analyze.rs`): a narrow `thiserror`-derived enum
//! per concern, with a `From` conversion into the crate's single
//! domain-level error base type (§7: "a single domain-level error base
//! type exists for higher layers, used by the CLI/formatter, not by
//! grouping").

use thiserror::Error;

/// The one error a caller can misuse the tree-construction API with: a
/// `Token` whose declared `TokenType` disagrees with its text. Grouping
/// passes themselves never return this — only direct arena construction
/// can violate it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("token type {expected} does not accept value {value:?}")]
    TypeValueMismatch {
        expected: String,
        value: String,
    },
}

/// Domain-level error base type for layers built on top of this crate
/// (a CLI, a formatter) that do need to fail. The grouping engine and
/// splitter never construct this themselves.
#[derive(Debug, Error)]
pub enum GroupingError {
    #[error(transparent)]
    Tree(#[from] TreeError),
}
