//! Pass 6: `functions` — a bare `Name` immediately followed by a
//! `Parenthesis` becomes a `Function` call. Pass 9's `function_params`
//! partitions a `Function`'s parenthesized argument list on `,`.

use super::engine::recurse_apply;
use crate::token_type::TokenType;
use crate::tree::{Arena, NodeId};
use crate::variant::Variant;

pub fn group_functions(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if !arena.is_group(child) && arena.token_type(child) == TokenType::Name {
                if let Some(&next) = arena.children(group).get(idx + 1) {
                    if arena.variant(next) == Some(Variant::Parenthesis) {
                        arena.group_tokens(group, Variant::Function, idx, idx + 1, false);
                        idx += 1;
                        continue;
                    }
                }
            }
            idx += 1;
        }
    });
}

/// Partitions a `Function`'s `Parenthesis` children (strictly between the
/// `(`/`)` delimiters) on `,` into one `FunctionParam` per slot.
pub fn group_function_params(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        if arena.variant(group) != Some(Variant::Function) {
            return;
        }
        let Some(&paren) = arena.children(group).get(1) else {
            return;
        };
        if arena.variant(paren) != Some(Variant::Parenthesis) {
            return;
        }
        let plen = arena.children(paren).len();
        if plen < 3 {
            return; // just "(" ")"
        }
        let commas: Vec<usize> = (1..plen - 1)
            .filter(|&i| {
                let c = arena.children(paren)[i];
                !arena.is_group(c) && arena.matches(c, TokenType::Punctuation, Some(&[","]), false)
            })
            .collect();
        let mut bounds = vec![1usize];
        bounds.extend(commas.iter().map(|&c| c + 1));
        let mut slots: Vec<(usize, usize)> = Vec::new();
        for (i, &start) in bounds.iter().enumerate() {
            let end = if i + 1 < bounds.len() {
                bounds[i + 1].saturating_sub(2)
            } else {
                plen - 2
            };
            if end >= start {
                slots.push((start, end));
            }
        }
        // Group from the rightmost slot first so lower indices stay valid.
        for &(s, e) in slots.iter().rev() {
            arena.group_tokens(paren, Variant::FunctionParam, s, e, false);
        }
    });
}
