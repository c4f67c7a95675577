//! Pass 8: `period`, `arrays`, `identifier`, `order`, `typecasts`,
//! `operator`, `comparison`, `as`, `aliased`, `assignment`.

use super::engine::{group_middle, recurse_apply};
use crate::token_type::TokenType;
use crate::tree::{Arena, NodeId};
use crate::variant::Variant;

fn is_identifier_like(arena: &Arena, id: Option<NodeId>) -> bool {
    let Some(id) = id else { return false };
    if let Some(v) = arena.variant(id) {
        return matches!(
            v,
            Variant::Identifier
                | Variant::Function
                | Variant::Parenthesis
                | Variant::SquareBrackets
                | Variant::Case
                | Variant::Operation
                | Variant::Comparison
        );
    }
    let tt = arena.token_type(id);
    tt == TokenType::Name
        || tt == TokenType::StringSymbol
        || tt.is_a(TokenType::Number)
        || tt == TokenType::Wildcard
}

pub fn group_period(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Identifier,
            |arena, id| arena.matches(id, TokenType::Punctuation, Some(&["."]), false),
            |arena, prev| is_identifier_like(arena, prev),
            |arena, next| is_identifier_like(arena, next) || next.is_some_and(|n| !arena.is_group(n) && arena.token_type(n) == TokenType::Wildcard),
            true,
        );
    });
}

pub fn group_arrays(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Identifier,
            |arena, id| arena.variant(id) == Some(Variant::SquareBrackets),
            |arena, prev| {
                prev.is_some_and(|p| {
                    matches!(arena.variant(p), Some(Variant::Identifier) | Some(Variant::Function))
                        || (!arena.is_group(p) && arena.token_type(p) == TokenType::Name)
                })
            },
            |_, _| true,
            true,
        );
    });
}

/// Promotes bare `Name`/`String.Symbol` leaves not already absorbed by
/// `period`/`arrays` into single-child `Identifier` groups.
pub fn group_identifier(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if !arena.is_group(child) {
                let tt = arena.token_type(child);
                if tt == TokenType::Name || tt == TokenType::StringSymbol {
                    arena.group_tokens(group, Variant::Identifier, idx, idx, false);
                }
            }
            idx += 1;
        }
    });
}

pub fn group_order(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Identifier,
            |arena, id| !arena.is_group(id) && arena.token_type(id).is_a(TokenType::KeywordOrder),
            |arena, prev| prev.is_some_and(|p| arena.variant(p) == Some(Variant::Identifier)),
            |_, _| true,
            true,
        );
    });
}

pub fn group_typecasts(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Identifier,
            |arena, id| arena.matches(id, TokenType::Operator, Some(&["::"]), false),
            |arena, prev| is_identifier_like(arena, prev),
            |arena, next| is_identifier_like(arena, next),
            true,
        );
    });
}

pub fn group_operator(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Operation,
            |arena, id| {
                !arena.is_group(id)
                    && (arena.token_type(id) == TokenType::Operator
                        || arena.token_type(id) == TokenType::Wildcard)
                    && !arena.matches(id, TokenType::Operator, Some(&["::"]), false)
            },
            |arena, prev| is_identifier_like(arena, prev),
            |arena, next| is_identifier_like(arena, next),
            true,
        );
    });
}

pub fn group_comparison(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Comparison,
            |arena, id| arena.token_type(id).is_a(TokenType::OperatorComparison) && !arena.is_group(id),
            |arena, prev| is_identifier_like(arena, prev),
            |arena, next| is_identifier_like(arena, next),
            true,
        );
    });
}

/// `AS` groups `(prev, AS, next)` into an `Identifier`. `valid_prev`:
/// anything that isn't a bare keyword (except `NULL`) and isn't a
/// `FunctionHeading`. `valid_next`: anything that isn't DML/DDL.
pub fn group_as(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Identifier,
            |arena, id| arena.matches(id, TokenType::Keyword, Some(&["AS"]), true),
            |arena, prev| {
                prev.is_some_and(|p| {
                    if arena.variant(p) == Some(Variant::FunctionHeading) {
                        return false;
                    }
                    if arena.is_group(p) {
                        return true;
                    }
                    let tt = arena.token_type(p);
                    !tt.is_keyword() || arena.matches(p, TokenType::Keyword, Some(&["NULL"]), true)
                })
            },
            |arena, next| {
                next.is_some_and(|n| {
                    arena.is_group(n) || !(arena.token_type(n) == TokenType::KeywordDml || arena.token_type(n) == TokenType::KeywordDdl)
                })
            },
            true,
        );
    });
}

/// Implicit aliasing without `AS`: any `{Parenthesis, Function, Case,
/// Identifier, Operation, Comparison, Number}` immediately followed by an
/// `Identifier` joins into one extended `Identifier`.
pub fn group_aliased(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx + 1 >= len {
                break;
            }
            let child = arena.children(group)[idx];
            let is_base = matches!(
                arena.variant(child),
                Some(Variant::Parenthesis)
                    | Some(Variant::Function)
                    | Some(Variant::Case)
                    | Some(Variant::Identifier)
                    | Some(Variant::Operation)
                    | Some(Variant::Comparison)
            ) || (!arena.is_group(child) && arena.token_type(child).is_a(TokenType::Number));
            if is_base {
                if let Some((nidx, nid)) = crate::tree::token_next(arena, group, idx + 1, true, false) {
                    if arena.variant(nid) == Some(Variant::Identifier) {
                        arena.group_tokens(group, Variant::Identifier, idx, nidx, true);
                        continue;
                    }
                }
            }
            idx += 1;
        }
    });
}

pub fn group_assignment(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Assignment,
            |arena, id| arena.matches(id, TokenType::Assignment, Some(&[":="]), false),
            |arena, prev| is_identifier_like(arena, prev),
            |arena, next| is_identifier_like(arena, next),
            true,
        );
    });
}
