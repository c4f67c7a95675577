//! Shared generic pass shapes: the bracketed matcher (`_group_matching`)
//! and the middle-joined matcher (`_group`) of the component design §4.3,
//! plus a recursive-apply helper standing in for the `recurse` decorator
//! design note §9 describes.

use crate::tree::{Arena, NodeId};
use crate::variant::{MatchSpec, Variant};

/// Applies `local` to `root`, then recurses depth-first into every child
/// that is itself a group, using the *current* (possibly just-mutated)
/// children list. This is how every pass reaches nested clauses/blocks
/// without each pass author having to hand-write its own recursion.
pub fn recurse_apply(arena: &mut Arena, root: NodeId, local: &mut dyn FnMut(&mut Arena, NodeId)) {
    local(arena, root);
    let children = arena.children(root).to_vec();
    for c in children {
        if arena.is_group(c) {
            recurse_apply(arena, c, local);
        }
    }
}

pub(super) fn matches_any(arena: &Arena, id: NodeId, specs: &[MatchSpec]) -> bool {
    !arena.is_group(id) && specs.iter().any(|s| arena.matches(id, s.ty, s.values, true))
}

/// Bracket-stack grouping of `group`'s direct children into `variant`,
/// skipping groups already tagged `variant` (already fully matched).
pub fn group_matching(arena: &mut Arena, group: NodeId, variant: Variant) {
    if arena.variant(group) == Some(variant) {
        return;
    }
    let mut idx = 0usize;
    let mut open_stack: Vec<usize> = Vec::new();
    loop {
        let len = arena.children(group).len();
        if idx >= len {
            break;
        }
        let child = arena.children(group)[idx];
        if matches_any(arena, child, variant.open_specs()) {
            open_stack.push(idx);
        } else if matches_any(arena, child, variant.close_specs()) {
            if let Some(open_idx) = open_stack.pop() {
                arena.group_tokens(group, variant, open_idx, idx, false);
                idx = open_idx;
                continue;
            }
        }
        idx += 1;
    }
}

/// One middle-joined pass over `group`'s direct children: for every child
/// matching `is_match`, look at its previous non-whitespace sibling and
/// its immediate next sibling; if both satisfy their validators, group the
/// span `post` returns (inclusive indices), optionally extending an
/// existing left-neighbor group of `variant`.
pub fn group_middle(
    arena: &mut Arena,
    group: NodeId,
    variant: Variant,
    is_match: impl Fn(&Arena, NodeId) -> bool,
    valid_prev: impl Fn(&Arena, Option<NodeId>) -> bool,
    valid_next: impl Fn(&Arena, Option<NodeId>) -> bool,
    extend: bool,
) {
    let mut idx = 0usize;
    loop {
        let len = arena.children(group).len();
        if idx >= len {
            break;
        }
        let child = arena.children(group)[idx];
        if !arena.is_group(child) && is_match(arena, child) {
            let prev = crate::tree::token_prev(arena, group, idx.saturating_sub(1), true, false)
                .filter(|&(i, _)| i < idx)
                .map(|(_, id)| id);
            let prev = if idx == 0 { None } else { prev };
            let next = crate::tree::token_next(arena, group, idx + 1, true, false).map(|(_, id)| id);
            if valid_prev(arena, prev) && valid_next(arena, next) {
                let pidx = prev
                    .and_then(|p| arena.children(group).iter().position(|&c| c == p))
                    .unwrap_or(idx);
                let nidx = next
                    .and_then(|n| arena.children(group).iter().position(|&c| c == n))
                    .unwrap_or(idx);
                arena.group_tokens(group, variant, pidx, nidx, extend);
                idx = pidx;
                continue;
            }
        }
        idx += 1;
    }
}
