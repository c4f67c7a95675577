//! Pass 3: `[ ]` then `( )` bracket matching.

use super::engine::{group_matching, recurse_apply};
use crate::tree::{Arena, NodeId};
use crate::variant::Variant;

pub fn group_brackets(arena: &mut Arena, stmt: NodeId) {
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::SquareBrackets);
    });
    recurse_apply(arena, stmt, &mut |arena, group| {
        group_matching(arena, group, Variant::Parenthesis);
    });
}
