//! The mutable arena tree grouping passes operate over.
//!
//! Grounded in design note §9 of the specification ("in a systems language
//! use an arena + node indices ... with parent as an `Option<NodeId>`"),
//! chosen over the teacher's `rowan::GreenNodeBuilder` because rowan's
//! immutable, append-only builder does not support the repeated in-place
//! splicing (`group_tokens`) this crate's ~30 sequential passes require
//! (see `DESIGN.md`). Node field shapes (token_type/value/normalized/
//! parent/children) are grounded in `bsqlparse/sql.py`'s `Token`/
//! `TokenList` classes.

mod primitives;

pub use primitives::{token_first, token_last, token_next, token_next_by, token_prev};

use crate::token_type::TokenType;
use crate::variant::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub enum NodeData {
    Token {
        token_type: TokenType,
        value: String,
        normalized: String,
    },
    Group {
        variant: Variant,
        children: Vec<NodeId>,
    },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
}

/// Owns every node ever created during one parse. Nodes are never removed
/// from the arena (only unlinked from their parent's `children`), so
/// `NodeId`s stay valid for the arena's whole lifetime.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    /// Total nodes ever allocated (tokens and groups, including unlinked
    /// ones). Monotonically non-decreasing within one arena's lifetime;
    /// used by `grouping::run_traced` as a cheap "did this pass do
    /// anything" signal without a logging dependency.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn push_token(&mut self, token_type: TokenType, value: String, normalized: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data: NodeData::Token {
                token_type,
                value,
                normalized,
            },
            parent: None,
        });
        id
    }

    pub fn push_group(&mut self, variant: Variant, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        for &child in &children {
            self.set_parent(child, Some(id));
        }
        self.nodes.push(Node {
            data: NodeData::Group { variant, children },
            parent: None,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id.0].parent = parent;
    }

    pub fn is_group(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Group { .. })
    }

    pub fn variant(&self, id: NodeId) -> Option<Variant> {
        match &self.node(id).data {
            NodeData::Group { variant, .. } => Some(*variant),
            NodeData::Token { .. } => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).data {
            NodeData::Group { children, .. } => children,
            NodeData::Token { .. } => &[],
        }
    }

    pub fn token_type(&self, id: NodeId) -> TokenType {
        match &self.node(id).data {
            NodeData::Token { token_type, .. } => *token_type,
            NodeData::Group { .. } => TokenType::Name, // groups expose no intrinsic type
        }
    }

    pub fn normalized(&self, id: NodeId) -> &str {
        match &self.node(id).data {
            NodeData::Token { normalized, .. } => normalized,
            NodeData::Group { .. } => "",
        }
    }

    /// The token's original, un-normalized source text. Empty for groups.
    pub fn value(&self, id: NodeId) -> &str {
        match &self.node(id).data {
            NodeData::Token { value, .. } => value,
            NodeData::Group { .. } => "",
        }
    }

    pub fn is_whitespace(&self, id: NodeId) -> bool {
        matches!(&self.node(id).data, NodeData::Token { token_type, .. } if token_type.is_whitespace())
    }

    pub fn is_comment_leaf(&self, id: NodeId) -> bool {
        matches!(&self.node(id).data, NodeData::Token { token_type, .. } if token_type.is_comment())
    }

    pub fn matches(
        &self,
        id: NodeId,
        ty: TokenType,
        values: Option<&[&str]>,
        ignorecase: bool,
    ) -> bool {
        match &self.node(id).data {
            NodeData::Token {
                token_type,
                normalized,
                ..
            } => crate::token_type::type_and_value_match(*token_type, normalized, ty, values, ignorecase),
            NodeData::Group { .. } => false,
        }
    }

    /// `imt`: "is one of" across variant tags, bare type membership, and
    /// `(type, values)` match specs — the valid-prev/valid-next check used
    /// pervasively by middle-joined passes.
    pub fn imt(
        &self,
        id: NodeId,
        variants: &[Variant],
        types: &[TokenType],
        specs: &[(TokenType, &[&str])],
    ) -> bool {
        if let Some(v) = self.variant(id) {
            if variants.contains(&v) {
                return true;
            }
        }
        let tt = self.token_type(id);
        if self.is_group(id) {
            // groups carry no intrinsic token type; only variant membership applies.
        } else if types.iter().any(|t| tt.is_a(*t)) {
            return true;
        }
        for (ty, values) in specs {
            if self.matches(id, *ty, Some(values), true) {
                return true;
            }
        }
        false
    }

    /// Flattens the subtree rooted at `id` into leaf tokens, in source order.
    pub fn flatten(&self, id: NodeId, out: &mut Vec<NodeId>) {
        match &self.node(id).data {
            NodeData::Token { .. } => out.push(id),
            NodeData::Group { children, .. } => {
                for &c in children {
                    self.flatten(c, out);
                }
            }
        }
    }

    pub fn flattened_text(&self, id: NodeId) -> String {
        let mut leaves = Vec::new();
        self.flatten(id, &mut leaves);
        leaves
            .into_iter()
            .map(|leaf| match &self.node(leaf).data {
                NodeData::Token { value, .. } => value.as_str(),
                NodeData::Group { .. } => unreachable!(),
            })
            .collect()
    }

    /// Splices `group_root`'s children `[start..=end]` (inclusive) out and
    /// replaces them with one new group of `variant`. If `extend` is true
    /// and the child at `start` is already a group of `variant`, the
    /// remaining spliced children are appended to it instead of creating a
    /// new group. Returns the id of the resulting group.
    pub fn group_tokens(
        &mut self,
        group_root: NodeId,
        variant: Variant,
        start: usize,
        end: usize,
        extend: bool,
    ) -> NodeId {
        let children = self.children(group_root).to_vec();
        let span: Vec<NodeId> = children[start..=end].to_vec();

        if extend {
            if let Some(existing_variant) = self.variant(span[0]) {
                if existing_variant == variant {
                    let rest = span[1..].to_vec();
                    for &c in &rest {
                        self.set_parent(c, Some(span[0]));
                    }
                    if let NodeData::Group {
                        children: existing_children,
                        ..
                    } = &mut self.node_mut(span[0]).data
                    {
                        existing_children.extend(rest);
                    }
                    let mut new_children = children[..start].to_vec();
                    new_children.push(span[0]);
                    new_children.extend(children[end + 1..].iter().copied());
                    self.replace_children(group_root, new_children);
                    return span[0];
                }
            }
        }

        let new_group = self.push_group(variant, span);
        let mut new_children = children[..start].to_vec();
        new_children.push(new_group);
        new_children.extend(children[end + 1..].iter().copied());
        self.replace_children(group_root, new_children);
        self.set_parent(new_group, Some(group_root));
        new_group
    }

    fn replace_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        if let NodeData::Group {
            children: slot, ..
        } = &mut self.node_mut(id).data
        {
            *slot = children;
        }
    }

    pub fn insert_before(&mut self, group_root: NodeId, idx: usize, new_child: NodeId) {
        let mut children = self.children(group_root).to_vec();
        children.insert(idx, new_child);
        self.set_parent(new_child, Some(group_root));
        self.replace_children(group_root, children);
    }

    pub fn insert_after(&mut self, group_root: NodeId, idx: usize, new_child: NodeId) {
        self.insert_before(group_root, idx + 1, new_child);
    }

    pub fn pop(&mut self, group_root: NodeId, idx: usize) -> NodeId {
        let mut children = self.children(group_root).to_vec();
        let removed = children.remove(idx);
        self.replace_children(group_root, children);
        self.set_parent(removed, None);
        removed
    }

    /// Replaces a single-child group with its sole child, re-parenting the
    /// child to the grandparent. Used by the flatter passes.
    pub fn splice_up(&mut self, parent: NodeId, idx: usize) {
        let children = self.children(parent).to_vec();
        let only_child = children[idx];
        if !self.is_group(only_child) || self.children(only_child).len() != 1 {
            return;
        }
        let grandchild = self.children(only_child)[0];
        self.set_parent(grandchild, Some(parent));
        let mut new_children = children;
        new_children[idx] = grandchild;
        self.replace_children(parent, new_children);
    }

    /// Deep-copies the subtree rooted at `id` into a fresh, standalone
    /// `Arena`, remapping every `NodeId`. Used to give each top-level
    /// statement its own arena once splitting/grouping is done, so a
    /// `Statement`'s lifetime is independent of its siblings rather than
    /// tied to the whole document's shared working arena.
    pub fn extract_subtree(&self, id: NodeId) -> (Arena, NodeId) {
        let mut out = Arena::new();
        let root = self.copy_into(&mut out, id);
        (out, root)
    }

    fn copy_into(&self, out: &mut Arena, id: NodeId) -> NodeId {
        match &self.node(id).data {
            NodeData::Token {
                token_type,
                value,
                normalized,
            } => out.push_token(*token_type, value.clone(), normalized.clone()),
            NodeData::Group { variant, children } => {
                let new_children: Vec<NodeId> =
                    children.iter().map(|&c| self.copy_into(out, c)).collect();
                out.push_group(*variant, new_children)
            }
        }
    }
}
