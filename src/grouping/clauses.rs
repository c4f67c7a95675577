//! Pass 4: DML operation / Select / Case / OpenLoopTag / If / For / Begin /
//! Exit, each a clause-shaped open/close grouping; pass 6's `where`; pass 7's
//! `union`; pass 11's `open`.

use super::engine::{group_matching, group_middle, matches_any, recurse_apply};
use crate::tree::{Arena, NodeId};
use crate::token_type::TokenType;
use crate::variant::Variant;

pub fn group_dml(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::DmlOperation);
    });
}

pub fn group_case(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::Case);
    });
}

pub fn group_openlooptag(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::OpenLoopTag);
    });
}

pub fn group_if(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::If);
    });
}

pub fn group_begin(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::Begin);
    });
}

pub fn group_exit(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::Exit);
    });
}

pub fn group_open(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::Open);
    });
}

/// `WHERE` opens; closes on the first of its boundary clause keywords
/// (`ORDER BY`, `GROUP BY`, `UNION`, ...), or — if none follows — at the
/// last child of the group, so a `WHERE` clause that runs to the end of its
/// enclosing list (the common case: `WHERE ...;` with the `;` stripped by
/// an enclosing pass, or `WHERE ...` as the last clause before a closing
/// `)`) still gets wrapped instead of being left open forever the way a
/// plain bracket-stack matcher (`group_matching`) would leave it.
pub fn group_where(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        if arena.variant(group) == Some(Variant::Where) {
            return;
        }
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if !arena.is_group(child) && arena.matches(child, TokenType::Keyword, Some(&["WHERE"]), true)
            {
                let close = (idx + 1..len).find(|&i| {
                    let c = arena.children(group)[i];
                    !arena.is_group(c) && matches_any(arena, c, Variant::Where.close_specs())
                });
                let end = match close {
                    Some(cidx) => cidx.saturating_sub(1).max(idx),
                    None => {
                        // Inside a Parenthesis/SquareBrackets, the last child
                        // is the closing `)`/`]` sentinel itself — exclude it
                        // so WHERE never swallows its enclosing group's close,
                        // mirroring `_groupable_tokens`'s `tokens[1:-1]`.
                        if matches!(arena.variant(group), Some(Variant::Parenthesis) | Some(Variant::SquareBrackets)) {
                            (len - 2).max(idx)
                        } else {
                            len - 1
                        }
                    }
                };
                arena.group_tokens(group, Variant::Where, idx, end, false);
                idx += 1;
                continue;
            }
            idx += 1;
        }
    });
}

/// Two open sentinels: a `ForIn`-typed token opens unconditionally, a
/// `LOOP` keyword opens only if not already inside a `For`. Close is
/// `END LOOP`.
pub fn group_for(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        if arena.variant(group) == Some(Variant::For) {
            return;
        }
        let mut idx = 0usize;
        let mut open: Option<usize> = None;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if !arena.is_group(child) {
                let is_forin = arena.token_type(child).is_a(TokenType::ForIn);
                let is_loop = arena.matches(child, TokenType::Keyword, Some(&["LOOP"]), true);
                let is_close = arena.matches(child, TokenType::Keyword, Some(&["END LOOP"]), true);
                if open.is_none() && (is_forin || is_loop) {
                    open = Some(idx);
                } else if is_close {
                    if let Some(open_idx) = open.take() {
                        arena.group_tokens(group, Variant::For, open_idx, idx, false);
                        idx = open_idx;
                        continue;
                    }
                }
            }
            idx += 1;
        }
    });
}

/// `SELECT` (DML) opens; closes on `;`, `UNION`, `UNION ALL` (the UNION
/// token itself stays outside, the close index is its previous sibling),
/// or — when still open at end of scan and the enclosing group is itself
/// a `Parenthesis` — at `len - 2`, supporting `(SELECT ...)` subqueries.
pub fn group_select(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        if arena.variant(group) == Some(Variant::Select) {
            return;
        }
        let mut idx = 0usize;
        let mut open: Option<usize> = None;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if !arena.is_group(child) {
                if open.is_none() && arena.matches(child, TokenType::KeywordDml, Some(&["SELECT"]), true) {
                    open = Some(idx);
                    idx += 1;
                    continue;
                }
                if let Some(open_idx) = open {
                    let is_semi = arena.matches(child, TokenType::Punctuation, Some(&[";"]), false);
                    let is_union = arena.matches(child, TokenType::Keyword, Some(&["UNION", "UNION ALL"]), true);
                    if is_semi {
                        arena.group_tokens(group, Variant::Select, open_idx, idx, false);
                        open = None;
                        idx = open_idx;
                        continue;
                    }
                    if is_union {
                        if let Some((pidx, _)) = crate::tree::token_prev(arena, group, idx.saturating_sub(1), true, false) {
                            if pidx >= open_idx {
                                arena.group_tokens(group, Variant::Select, open_idx, pidx, false);
                                open = None;
                                idx = open_idx;
                                continue;
                            }
                        }
                    }
                }
            }
            idx += 1;
        }
        if let Some(open_idx) = open {
            let len = arena.children(group).len();
            let is_subquery = arena.variant(group) == Some(Variant::Parenthesis) && len >= open_idx + 2;
            if is_subquery {
                arena.group_tokens(group, Variant::Select, open_idx, len - 2, false);
            }
        }
    });
}

/// Pass 9 (divider-style middle matcher): `UNION` / `UNION ALL` joins its
/// two neighboring clause-like siblings into one `Union` group.
pub fn group_union(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_middle(
            arena,
            group,
            Variant::Union,
            |arena, id| arena.matches(id, TokenType::Keyword, Some(&["UNION", "UNION ALL"]), true),
            |arena, prev| {
                prev.is_some_and(|p| arena.variant(p) == Some(Variant::Select) || !arena.is_group(p))
            },
            |arena, next| {
                next.is_some_and(|n| arena.variant(n) == Some(Variant::Select) || !arena.is_group(n))
            },
            true,
        );
    });
}
