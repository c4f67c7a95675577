//! Pass 2 (`package`), pass 5 (`procedure_heading`, `function_heading`,
//! `function_return_type`), and pass 11 (`cursor_def`, `procedure_block`,
//! `function_block`, `declare_section`, `exceptions`).

use super::engine::recurse_apply;
use crate::token_type::TokenType;
use crate::tree::{token_next, token_next_by, Arena, NodeId};
use crate::variant::Variant;

/// Scans `group`'s children from `start` for a keyword token matching
/// `opener`; if found, consumes an optional following `Name` and an
/// optional following `Parenthesis`, then consumes up to (excluding) the
/// first closer in `{IS, AS, ;, ,}` — or to the end of the group if none is
/// found. Returns the `(open_idx, end_idx)` span of the new heading, the id
/// of the grouped heading, and the index right after it to resume scanning.
fn group_heading_at(
    arena: &mut Arena,
    group: NodeId,
    start: usize,
    opener: &str,
    variant: Variant,
) -> Option<usize> {
    let len = arena.children(group).len();
    let mut idx = start;
    while idx < len {
        let child = arena.children(group)[idx];
        if !arena.is_group(child) && arena.matches(child, TokenType::Keyword, Some(&[opener]), true) {
            let mut end = idx;
            if let Some((nidx, nid)) = token_next(arena, group, idx + 1, true, false) {
                if arena.token_type(nid) == TokenType::Name {
                    end = nidx;
                    if let Some(&after) = arena.children(group).get(nidx + 1) {
                        if arena.variant(after) == Some(Variant::Parenthesis) {
                            end = nidx + 1;
                        }
                    }
                }
            }
            let mut closer = None;
            let mut scan = end + 1;
            let clen = arena.children(group).len();
            while scan < clen {
                let c = arena.children(group)[scan];
                if !arena.is_group(c) {
                    let is_closer = arena.matches(c, TokenType::Keyword, Some(&["IS", "AS"]), true)
                        || arena.matches(c, TokenType::Punctuation, Some(&[";", ","]), false);
                    if is_closer {
                        closer = Some(scan);
                        break;
                    }
                }
                scan += 1;
            }
            end = match closer {
                Some(c) if c > end + 1 => c - 1,
                Some(_) => end,
                None => arena.children(group).len() - 1,
            };
            arena.group_tokens(group, variant, idx, end, false);
            return Some(idx + 1);
        }
        idx += 1;
    }
    None
}

pub fn group_procedure_heading(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut start = 0;
        while let Some(next) = group_heading_at(arena, group, start, "PROCEDURE", Variant::ProcedureHeading) {
            start = next;
        }
    });
}

pub fn group_function_heading(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut start = 0;
        while let Some(next) = group_heading_at(arena, group, start, "FUNCTION", Variant::FunctionHeading) {
            start = next;
        }
    });
}

/// Groups `RETURN ...` to the end of a `FunctionHeading`'s children as a
/// nested `ReturnType`.
pub fn group_function_return_type(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        if arena.variant(group) != Some(Variant::FunctionHeading) {
            return;
        }
        if let Some((ridx, _)) =
            token_next_by(arena, group, 0, &[], Some((TokenType::Keyword, &["RETURN", "RETURNS"])), None)
        {
            let end = arena.children(group).len() - 1;
            if end >= ridx {
                arena.group_tokens(group, Variant::ReturnType, ridx, end, false);
            }
        }
    });
}

fn group_block(arena: &mut Arena, stmt: NodeId, heading: Variant, block: Variant) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if arena.variant(child) == Some(heading) {
                if let Some((nidx, nid)) = token_next(arena, group, idx + 1, true, false) {
                    if arena.matches(nid, TokenType::Keyword, Some(&["IS", "AS"]), true) {
                        if let Some((bidx, _)) =
                            token_next_by(arena, group, nidx + 1, &[Variant::Begin], None, None)
                        {
                            let mut end = bidx;
                            if let Some((tidx, tid)) = token_next(arena, group, bidx + 1, true, false) {
                                if arena.matches(tid, TokenType::Punctuation, Some(&[";"]), false) {
                                    end = tidx;
                                }
                            }
                            arena.group_tokens(group, block, idx, end, false);
                            continue;
                        }
                    }
                }
            }
            idx += 1;
        }
    });
}

pub fn group_procedure_block(arena: &mut Arena, stmt: NodeId) {
    group_block(arena, stmt, Variant::ProcedureHeading, Variant::ProcedureBlock);
}

pub fn group_function_block(arena: &mut Arena, stmt: NodeId) {
    group_block(arena, stmt, Variant::FunctionHeading, Variant::FunctionBlock);
}

/// Inside each `FunctionBlock`/`ProcedureBlock`: find `IS`/`AS` and the
/// next `Begin`; if at least one non-trivial token sits between them, wrap
/// it as a `DeclareSection`.
pub fn group_declare_section(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        if !matches!(arena.variant(group), Some(Variant::FunctionBlock) | Some(Variant::ProcedureBlock)) {
            return;
        }
        let Some((is_idx, _)) =
            token_next_by(arena, group, 0, &[], Some((TokenType::Keyword, &["IS", "AS"])), None)
        else {
            return;
        };
        let Some((begin_idx, _)) = token_next_by(arena, group, is_idx + 1, &[Variant::Begin], None, None)
        else {
            return;
        };
        if begin_idx > is_idx + 1 {
            arena.group_tokens(group, Variant::DeclareSection, is_idx + 1, begin_idx - 1, false);
        }
    });
}

/// Inside a `DeclareSection`: partitions its children on `;` into one
/// `DataType` group per declared variable (`name type[ := default];`).
pub fn group_variables(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        if arena.variant(group) != Some(Variant::DeclareSection) {
            return;
        }
        let len = arena.children(group).len();
        if len == 0 {
            return;
        }
        let semis: Vec<usize> = (0..len)
            .filter(|&i| {
                let c = arena.children(group)[i];
                !arena.is_group(c) && arena.matches(c, TokenType::Punctuation, Some(&[";"]), false)
            })
            .collect();
        let mut bounds = vec![0usize];
        bounds.extend(semis.iter().map(|&s| s + 1));
        let mut slots: Vec<(usize, usize)> = Vec::new();
        for (i, &start) in bounds.iter().enumerate() {
            if start >= len {
                continue;
            }
            let end = if i + 1 < bounds.len() {
                bounds[i + 1].saturating_sub(2)
            } else {
                len - 1
            };
            if end >= start {
                slots.push((start, end));
            }
        }
        for &(s, e) in slots.iter().rev() {
            arena.group_tokens(group, Variant::DataType, s, e, false);
        }
    });
}

/// `CURSOR ... IS ...` followed immediately by a `Select` or `Union`.
pub fn group_cursor_def(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if !arena.is_group(child) && arena.matches(child, TokenType::Keyword, Some(&["CURSOR"]), true) {
                if let Some((is_idx, _)) =
                    token_next(arena, group, idx + 1, true, false).filter(|&(_, id)| {
                        arena.matches(id, TokenType::Keyword, Some(&["IS"]), true)
                    })
                {
                    if let Some((sidx, sid)) = token_next(arena, group, is_idx + 1, true, false) {
                        if matches!(arena.variant(sid), Some(Variant::Select) | Some(Variant::Union)) {
                            arena.group_tokens(group, Variant::CursorDef, idx, sidx, false);
                            continue;
                        }
                    }
                }
            }
            idx += 1;
        }
    });
}

/// Stateful scan: on `EXCEPTION`, record the position; on the following
/// `END` (a `Begin` group's own closing keyword), group `[EXCEPTION..END)`
/// as `Exceptions`.
pub fn group_exceptions(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut exc_idx = None;
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if !arena.is_group(child) {
                if exc_idx.is_none() && arena.matches(child, TokenType::Keyword, Some(&["EXCEPTION"]), true) {
                    exc_idx = Some(idx);
                } else if arena.matches(child, TokenType::Keyword, Some(&["END"]), true) {
                    if let Some(start) = exc_idx.take() {
                        if idx > start {
                            arena.group_tokens(group, Variant::Exceptions, start, idx - 1, false);
                            idx = start;
                            continue;
                        }
                    }
                }
            }
            idx += 1;
        }
    });
}

/// Simplified package grouping: builds a `PackageHeading` up to `IS`/`AS`
/// and wraps the rest of the enclosing group's remaining children as a
/// `Package`. Precise `END <name>;` boundary detection is left to a later
/// pass since this runs before brackets/case/if/begin are grouped.
pub fn group_package(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let len = arena.children(group).len();
        let mut idx = 0usize;
        while idx < len.min(arena.children(group).len()) {
            let child = arena.children(group)[idx];
            if !arena.is_group(child) && arena.matches(child, TokenType::Keyword, Some(&["PACKAGE"]), true) {
                if let Some(_next) = group_heading_at(arena, group, idx, "PACKAGE", Variant::PackageHeading) {
                    let end = arena.children(group).len() - 1;
                    if end > idx {
                        arena.group_tokens(group, Variant::Package, idx, end, false);
                    }
                }
                break;
            }
            idx += 1;
        }
    });
}
