//! Pass 10: collapse degenerate single-child `Statement`/`Identifier`
//! wrappers into their sole child.

use super::engine::recurse_apply;
use crate::tree::{Arena, NodeId};
use crate::variant::Variant;

fn flatter(arena: &mut Arena, stmt: NodeId, target: Variant) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        let mut idx = 0usize;
        loop {
            let len = arena.children(group).len();
            if idx >= len {
                break;
            }
            let child = arena.children(group)[idx];
            if arena.variant(child) == Some(target) && arena.children(child).len() == 1 {
                arena.splice_up(group, idx);
            }
            idx += 1;
        }
    });
}

pub fn flatter_statement_class(arena: &mut Arena, stmt: NodeId) {
    flatter(arena, stmt, Variant::Statement);
}

pub fn flatter_identifier_class(arena: &mut Arena, stmt: NodeId) {
    flatter(arena, stmt, Variant::Identifier);
}
