//! Typed group variants and their static open/close/middle descriptors.
//!
//! Mirrors the per-subclass `M_OPEN`/`M_CLOSE`/`M_MIDDLE` class attributes of
//! the token-list subclasses this crate's grouping passes are grounded on:
//! each variant carries a fixed recognition descriptor rather than dispatch
//! through a class hierarchy.

use crate::token_type::TokenType;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    Root,
    Statement,
    Parenthesis,
    SquareBrackets,
    OpenLoopTag,
    Case,
    If,
    For,
    Begin,
    Exit,
    Open,
    Select,
    DmlOperation,
    Where,
    Union,
    PackageHeading,
    Package,
    FunctionHeading,
    ProcedureHeading,
    ReturnType,
    CursorDef,
    Exceptions,
    NotFound,
    Identifier,
    IdentifierList,
    Function,
    FunctionParam,
    DataType,
    DeclareSection,
    Assignment,
    Comparison,
    Operation,
    Comment,
    FunctionBlock,
    ProcedureBlock,
    /// Sketched but never produced by any pass; see `group_transaction` in
    /// the original pipeline, which is commented out of `group()`.
    Transaction,
}

/// A `(type, values)` match spec used as an open/close/middle sentinel.
#[derive(Debug, Clone, Copy)]
pub struct MatchSpec {
    pub ty: TokenType,
    pub values: Option<&'static [&'static str]>,
}

impl MatchSpec {
    pub const fn new(ty: TokenType) -> Self {
        MatchSpec { ty, values: None }
    }
    pub const fn with_values(ty: TokenType, values: &'static [&'static str]) -> Self {
        MatchSpec { ty, values: Some(values) }
    }
}

impl Variant {
    /// Open sentinel specs, when this variant is recognized by a bracketed
    /// matcher (`_group_matching`-style pass).
    pub fn open_specs(self) -> &'static [MatchSpec] {
        use TokenType::*;
        use Variant::*;
        match self {
            Parenthesis => &[MatchSpec::with_values(Punctuation, &["("])],
            SquareBrackets => &[MatchSpec::with_values(Punctuation, &["["])],
            OpenLoopTag => &[MatchSpec::with_values(OperatorComparison, &["<<"])],
            Case => &[MatchSpec::with_values(Keyword, &["CASE"])],
            If => &[MatchSpec::with_values(Keyword, &["IF"])],
            Begin => &[MatchSpec::with_values(Keyword, &["BEGIN"])],
            Exit => &[MatchSpec::with_values(Keyword, &["EXIT"])],
            Open => &[MatchSpec::with_values(Keyword, &["OPEN"])],
            Select => &[MatchSpec::new(KeywordDml)],
            DmlOperation => {
                &[MatchSpec::with_values(KeywordDml, &["INSERT", "UPDATE", "DELETE"])]
            }
            Where => &[MatchSpec::with_values(Keyword, &["WHERE"])],
            _ => &[],
        }
    }

    pub fn close_specs(self) -> &'static [MatchSpec] {
        use TokenType::*;
        use Variant::*;
        match self {
            Parenthesis => &[MatchSpec::with_values(Punctuation, &[")"])],
            SquareBrackets => &[MatchSpec::with_values(Punctuation, &["]"])],
            OpenLoopTag => &[MatchSpec::with_values(OperatorComparison, &[">>"])],
            Case => &[MatchSpec::with_values(Keyword, &["END", "END CASE"])],
            If => &[MatchSpec::with_values(Keyword, &["END IF"])],
            Begin => &[MatchSpec::with_values(Keyword, &["END"])],
            Exit | Open | DmlOperation | Select => {
                &[MatchSpec::with_values(Punctuation, &[";"])]
            }
            Where => &[MatchSpec::with_values(
                Keyword,
                &[
                    "ORDER BY",
                    "ORDER",
                    "GROUP BY",
                    "GROUP",
                    "LIMIT",
                    "UNION",
                    "UNION ALL",
                    "EXCEPT",
                    "HAVING",
                    "RETURNING",
                    "INTO",
                    "FOR UPDATE",
                ],
            )],
            For => &[MatchSpec::with_values(Keyword, &["END LOOP"])],
            Exceptions => &[MatchSpec::with_values(Keyword, &["END"])],
            _ => &[],
        }
    }

    pub fn middle_specs(self) -> &'static [MatchSpec] {
        use Variant::*;
        match self {
            Union => &[MatchSpec::with_values(
                TokenType::Keyword,
                &["UNION", "UNION ALL"],
            )],
            _ => &[],
        }
    }
}
