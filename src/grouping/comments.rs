//! Pass 1: coalesce adjacent comment tokens (and the whitespace between
//! them) into a single `Comment` group.

use super::engine::recurse_apply;
use crate::tree::{Arena, NodeId};
use crate::variant::Variant;

pub fn group_comments(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        if arena.variant(group) == Some(Variant::Comment) {
            return;
        }
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if !arena.is_group(child) && arena.token_type(child).is_comment() {
                let mut end = idx;
                loop {
                    let children = arena.children(group);
                    let next = end + 1;
                    if next >= children.len() {
                        break;
                    }
                    let nxt = children[next];
                    if arena.is_group(nxt) {
                        break;
                    }
                    let nxt_is_ws = arena.is_whitespace(nxt);
                    let nxt_is_comment = arena.token_type(nxt).is_comment();
                    if nxt_is_comment {
                        end = next;
                    } else if nxt_is_ws {
                        // only swallow ws if a further comment follows it
                        if let Some(&after) = children.get(next + 1) {
                            if !arena.is_group(after) && arena.token_type(after).is_comment() {
                                end = next + 1;
                                continue;
                            }
                        }
                        break;
                    } else {
                        break;
                    }
                }
                if end > idx {
                    arena.group_tokens(group, Variant::Comment, idx, end, false);
                }
            }
            idx += 1;
        }
    });
}
