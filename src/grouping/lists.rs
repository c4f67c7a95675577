//! Pass 9: `align_comments`, `identifier_list`.

use super::engine::{group_middle, recurse_apply};
use crate::token_type::TokenType;
use crate::tree::{Arena, NodeId};
use crate::variant::Variant;

fn is_list_item(arena: &Arena, id: Option<NodeId>) -> bool {
    let Some(id) = id else { return false };
    if let Some(v) = arena.variant(id) {
        return matches!(
            v,
            Variant::Function
                | Variant::Case
                | Variant::Identifier
                | Variant::Comparison
                | Variant::IdentifierList
                | Variant::Operation
                | Variant::FunctionParam
        );
    }
    let tt = arena.token_type(id);
    tt.is_a(TokenType::Number)
        || tt == TokenType::StringSymbol
        || tt == TokenType::Name
        || tt.is_keyword()
        || tt.is_comment()
        || tt == TokenType::Wildcard
}

pub fn group_identifier_list(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::IdentifierList,
            |arena, id| arena.matches(id, TokenType::Punctuation, Some(&[","]), false),
            |arena, prev| is_list_item(arena, prev),
            |arena, next| is_list_item(arena, next),
            true,
        );
    });
}

/// Absorbs a trailing `Comment` immediately following an identifier-like
/// group into that group, so a same-line comment travels with the value
/// it annotates rather than floating as an unattached sibling.
pub fn group_align_comments(arena: &mut Arena, stmt: NodeId) {
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
                Some(Variant::Identifier) | Some(Variant::IdentifierList) | Some(Variant::Comparison) | Some(Variant::Operation)
            );
            if is_base {
                let next = arena.children(group)[idx + 1];
                if arena.variant(next) == Some(Variant::Comment) {
                    arena.group_tokens(group, arena.variant(child).unwrap(), idx, idx + 1, true);
                    continue;
                }
            }
            idx += 1;
        }
    });
}
