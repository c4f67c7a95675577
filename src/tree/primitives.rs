//! Index-returning cursor scans over a group's direct children.
//!
//! Mirrors `token_next`/`token_prev`/`token_next_by`/`token_first`/
//! `token_last` from the component design (§4.1): by default whitespace is
//! skipped and comments are not descended into child groups — these never
//! look past the immediate children of one group.

use super::{Arena, NodeId};
use crate::token_type::TokenType;
use crate::variant::Variant;

fn skip(arena: &Arena, id: NodeId, skip_ws: bool, skip_cm: bool) -> bool {
    (skip_ws && arena.is_whitespace(id)) || (skip_cm && arena.is_comment_leaf(id))
}

/// Returns `(index, id)` of the first non-skipped child at or after `from`.
pub fn token_next(
    arena: &Arena,
    group: NodeId,
    from: usize,
    skip_ws: bool,
    skip_cm: bool,
) -> Option<(usize, NodeId)> {
    let children = arena.children(group);
    children
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, &c)| !skip(arena, c, skip_ws, skip_cm))
        .map(|(i, &c)| (i, c))
}

/// Returns `(index, id)` of the last non-skipped child at or before `from`.
pub fn token_prev(
    arena: &Arena,
    group: NodeId,
    from: usize,
    skip_ws: bool,
    skip_cm: bool,
) -> Option<(usize, NodeId)> {
    let children = arena.children(group);
    if from >= children.len() {
        return None;
    }
    (0..=from)
        .rev()
        .find(|&i| !skip(arena, children[i], skip_ws, skip_cm))
        .map(|i| (i, children[i]))
}

pub fn token_first(arena: &Arena, group: NodeId, skip_ws: bool, skip_cm: bool) -> Option<(usize, NodeId)> {
    token_next(arena, group, 0, skip_ws, skip_cm)
}

pub fn token_last(arena: &Arena, group: NodeId, skip_ws: bool, skip_cm: bool) -> Option<(usize, NodeId)> {
    let children = arena.children(group);
    if children.is_empty() {
        return None;
    }
    token_prev(arena, group, children.len() - 1, skip_ws, skip_cm)
}

/// `token_next_by(i=variant, m=(type, values), t=type)`: scans forward from
/// `from` for the first child matching a variant, a `(type, values)` spec,
/// or a bare type — never descending into nested groups.
pub fn token_next_by(
    arena: &Arena,
    group: NodeId,
    from: usize,
    variants: &[Variant],
    spec: Option<(TokenType, &[&str])>,
    ty: Option<TokenType>,
) -> Option<(usize, NodeId)> {
    let children = arena.children(group);
    for (i, &c) in children.iter().enumerate().skip(from) {
        if let Some(v) = arena.variant(c) {
            if variants.contains(&v) {
                return Some((i, c));
            }
        }
        if let Some((t, values)) = spec {
            if arena.matches(c, t, Some(values), true) {
                return Some((i, c));
            }
        }
        if let Some(t) = ty {
            if !arena.is_group(c) && arena.token_type(c).is_a(t) {
                return Some((i, c));
            }
        }
    }
    None
}
