//! A token-grouping engine for a PL/pgSQL-flavored SQL dialect: turns a flat
//! lexer token stream into a tree of typed syntactic groups (statements,
//! clauses, expressions, stored-program blocks).
//!
//! The pipeline has four stages, each its own module: [`lexer`] (flat token
//! stream), [`splitter`] (top-level statement boundaries), [`grouping`] (the
//! fixed ~30-pass tree-building pipeline), and [`filter_stack`] (the
//! external entry point wiring the first three together with optional
//! pre/post-processing filters). [`parse`] is the direct, filter-free
//! convenience path through the same three stages.

pub mod builtins;
pub mod error;
pub mod filter_stack;
pub mod grouping;
pub mod lexer;
pub mod splitter;
pub mod statement;
pub mod token_type;
pub mod tree;
pub mod variant;

pub use error::{GroupingError, TreeError};
pub use filter_stack::{FilterStack, PostprocessFilter, PreprocessFilter, StatementFilter};
pub use token_type::TokenType;
pub use tree::{Arena, NodeId};
pub use variant::Variant;

/// One arena-owned statement tree produced by [`parse`], independent of
/// any sibling statement from the same call (see `DESIGN.md`'s ownership
/// note).
pub struct Document {
    pub arena: tree::Arena,
    pub root: tree::NodeId,
}

impl Document {
    pub fn get_type(&self) -> String {
        statement::get_type(&self.arena, self.root)
    }

    pub fn to_json(&self) -> serde_json::Value {
        statement::to_json(&self.arena, self.root)
    }
}

/// Lexes, splits and fully groups `sql`, returning one [`Document`] per
/// top-level statement. Equivalent to `FilterStack::new()` with
/// `enable_grouping()` and no filters registered, but without the
/// `Box<dyn Filter>` indirection for the common no-filters case.
pub fn parse(sql: &str) -> Vec<Document> {
    let mut arena = tree::Arena::new();
    let tokens = lexer::lex(sql);
    let stmt_roots = splitter::split(&mut arena, tokens);
    stmt_roots
        .into_iter()
        .map(|root| {
            grouping::group(&mut arena, root);
            let (sub_arena, sub_root) = arena.extract_subtree(root);
            Document {
                arena: sub_arena,
                root: sub_root,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // §8 scenario 1: a `CREATE FUNCTION ... BEGIN ... END;` followed by a
    // `SELECT ...;` splits into exactly two top-level statements, the first
    // typed as the DDL keyword and the second as the DML keyword.
    #[test]
    fn create_function_then_select_splits_into_two_statements() {
        let docs = parse(
            "CREATE FUNCTION a(x VARCHAR(20)) RETURNS VARCHAR(20) \
             BEGIN DECLARE y VARCHAR(20); IF (1 = 1) THEN SET x = y; END IF; \
             RETURN x; END; SELECT * FROM a.b;",
        );
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].get_type(), "CREATE");
        assert_eq!(docs[1].get_type(), "SELECT");
    }

    #[test]
    fn lone_comment_parses_to_one_statement_with_one_comment_leaf() {
        let docs = parse("-- just a comment");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].arena.children(docs[0].root).len(), 1);
        let leaf = docs[0].arena.children(docs[0].root)[0];
        assert!(!docs[0].arena.is_group(leaf));
        assert!(docs[0].arena.token_type(leaf).is_comment());
    }

    #[test]
    fn empty_input_parses_to_no_statements() {
        let docs = parse("");
        assert_eq!(docs.len(), 0);
    }

    #[test]
    fn each_document_owns_an_independent_arena() {
        let docs = parse("select 1; select 2;");
        assert_eq!(docs.len(), 2);
        // each Document's root is index 0 or small in its own arena, not a
        // shared offset into one combined arena.
        assert!(docs[0].arena.node_count() > 0);
        assert!(docs[1].arena.node_count() > 0);
    }
}
