//! The hierarchical token-type lattice produced by the lexer and consumed
//! by every grouping pass.
//!
//! Membership is lattice-aware: a token tagged [`TokenType::KeywordDml`] is
//! also a [`TokenType::Keyword`]. Callers should use [`TokenType::is_a`]
//! rather than `==` whenever a pass checks "is this some kind of X".

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    Whitespace,
    Punctuation,
    Name,
    StringSymbol,
    Number,
    NumberInteger,
    NumberFloat,
    Keyword,
    KeywordDml,
    KeywordDdl,
    KeywordCte,
    KeywordOrder,
    Comment,
    CommentSingle,
    CommentMultiline,
    Operator,
    OperatorComparison,
    Wildcard,
    Assignment,
    ForIn,
    Error,
}

impl TokenType {
    /// True if `self` is `ancestor` or a refinement of it in the lattice.
    pub fn is_a(self, ancestor: TokenType) -> bool {
        use TokenType::*;
        if self == ancestor {
            return true;
        }
        matches!(
            (self, ancestor),
            (NumberInteger, Number)
                | (NumberFloat, Number)
                | (KeywordDml, Keyword)
                | (KeywordDdl, Keyword)
                | (KeywordCte, Keyword)
                | (KeywordOrder, Keyword)
                | (CommentSingle, Comment)
                | (CommentMultiline, Comment)
                | (OperatorComparison, Operator)
        )
    }

    pub fn is_keyword(self) -> bool {
        self.is_a(TokenType::Keyword)
    }

    pub fn is_whitespace(self) -> bool {
        self == TokenType::Whitespace
    }

    pub fn is_comment(self) -> bool {
        self.is_a(TokenType::Comment)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// `match(token, type, values, regex, ignorecase)` from the component design:
/// true iff the token's type is a kind of `ty` and, if `values` is given,
/// the token's comparison text is one of them.
pub fn type_and_value_match(
    ttype: TokenType,
    normalized: &str,
    ty: TokenType,
    values: Option<&[&str]>,
    ignorecase: bool,
) -> bool {
    if !ttype.is_a(ty) {
        return false;
    }
    match values {
        None => true,
        Some(vals) => vals.iter().any(|v| {
            if ignorecase {
                v.eq_ignore_ascii_case(normalized)
            } else {
                *v == normalized
            }
        }),
    }
}
