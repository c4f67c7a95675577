//! Module wiring and the fixed, ordered top-level pass pipeline.
//!
//! The call sequence in [`group`] mirrors `grouping_class.py`'s `group()`
//! method pass for pass (see `DESIGN.md`'s module ledger) — nothing here
//! reorders, skips, or merges a pass relative to that ordering.

mod brackets;
mod clauses;
mod comments;
mod engine;
mod flatten;
mod functions;
mod headings;
mod identifiers;
mod lists;

pub use engine::{group_matching, group_middle, recurse_apply};

use crate::tree::{Arena, NodeId};

/// Runs every grouping pass over `stmt`'s subtree in the fixed order,
/// checking `cancel` between passes. `cancel` returning `true` stops the
/// run early, leaving the tree in whatever partially-grouped state the
/// last completed pass produced — no pass is interrupted mid-way.
pub fn run(arena: &mut Arena, stmt: NodeId, cancel: Option<&dyn Fn() -> bool>) {
    macro_rules! pass {
        ($f:expr) => {
            if cancel.is_some_and(|c| c()) {
                return;
            }
            $f(arena, stmt);
        };
    }

    pass!(comments::group_comments);
    pass!(headings::group_package);
    pass!(brackets::group_brackets);
    pass!(clauses::group_dml);
    pass!(clauses::group_select);
    pass!(clauses::group_case);
    pass!(clauses::group_openlooptag);
    pass!(clauses::group_if);
    pass!(clauses::group_for);
    pass!(clauses::group_begin);
    pass!(clauses::group_exit);
    pass!(headings::group_procedure_heading);
    pass!(headings::group_function_heading);
    pass!(headings::group_function_return_type);
    pass!(functions::group_functions);
    pass!(clauses::group_where);
    pass!(clauses::group_union);
    pass!(identifiers::group_period);
    pass!(identifiers::group_arrays);
    pass!(identifiers::group_identifier);
    pass!(identifiers::group_order);
    pass!(identifiers::group_typecasts);
    pass!(identifiers::group_operator);
    pass!(identifiers::group_comparison);
    pass!(identifiers::group_as);
    pass!(identifiers::group_aliased);
    pass!(identifiers::group_assignment);
    pass!(lists::group_align_comments);
    pass!(functions::group_function_params);
    pass!(lists::group_identifier_list);
    pass!(flatten::flatter_statement_class);
    pass!(flatten::flatter_identifier_class);
    pass!(headings::group_cursor_def);
    pass!(headings::group_procedure_block);
    pass!(headings::group_function_block);
    pass!(headings::group_declare_section);
    pass!(headings::group_variables);
    pass!(headings::group_exceptions);
    pass!(clauses::group_open);
}

/// Convenience entry point for the common case of no cancellation hook.
pub fn group(arena: &mut Arena, stmt: NodeId) {
    run(arena, stmt, None);
}

/// One pass's contribution to a `run_traced` call: how many new nodes
/// (tokens re-wrapped as a new group) the pass allocated. Stands in for a
/// log line in a crate that carries no tracing dependency (see
/// `SPEC_FULL.md`'s ambient-stack note) — a typed return value instead of
/// a side-channel logger, matching how the teacher surfaces its own
/// diagnostics as typed values rather than log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingTrace {
    pub pass_name: &'static str,
    pub nodes_added: usize,
}

/// Like [`run`], but returns one [`GroupingTrace`] entry per pass that
/// actually allocated new nodes (passes that matched nothing are omitted).
pub fn run_traced(arena: &mut Arena, stmt: NodeId, cancel: Option<&dyn Fn() -> bool>) -> Vec<GroupingTrace> {
    let mut trace = Vec::new();
    macro_rules! pass {
        ($name:literal, $f:expr) => {
            if cancel.is_some_and(|c| c()) {
                return trace;
            }
            let before = arena.node_count();
            $f(arena, stmt);
            let added = arena.node_count() - before;
            if added > 0 {
                trace.push(GroupingTrace { pass_name: $name, nodes_added: added });
            }
        };
    }

    pass!("comments", comments::group_comments);
    pass!("package", headings::group_package);
    pass!("brackets", brackets::group_brackets);
    pass!("dml", clauses::group_dml);
    pass!("select", clauses::group_select);
    pass!("case", clauses::group_case);
    pass!("openlooptag", clauses::group_openlooptag);
    pass!("if", clauses::group_if);
    pass!("for", clauses::group_for);
    pass!("begin", clauses::group_begin);
    pass!("exit", clauses::group_exit);
    pass!("procedure_heading", headings::group_procedure_heading);
    pass!("function_heading", headings::group_function_heading);
    pass!("function_return_type", headings::group_function_return_type);
    pass!("functions", functions::group_functions);
    pass!("where", clauses::group_where);
    pass!("union", clauses::group_union);
    pass!("period", identifiers::group_period);
    pass!("arrays", identifiers::group_arrays);
    pass!("identifier", identifiers::group_identifier);
    pass!("order", identifiers::group_order);
    pass!("typecasts", identifiers::group_typecasts);
    pass!("operator", identifiers::group_operator);
    pass!("comparison", identifiers::group_comparison);
    pass!("as", identifiers::group_as);
    pass!("aliased", identifiers::group_aliased);
    pass!("assignment", identifiers::group_assignment);
    pass!("align_comments", lists::group_align_comments);
    pass!("function_params", functions::group_function_params);
    pass!("identifier_list", lists::group_identifier_list);
    pass!("flatter_statement_class", flatten::flatter_statement_class);
    pass!("flatter_identifier_class", flatten::flatter_identifier_class);
    pass!("cursor_def", headings::group_cursor_def);
    pass!("procedure_block", headings::group_procedure_block);
    pass!("function_block", headings::group_function_block);
    pass!("declare_section", headings::group_declare_section);
    pass!("variables", headings::group_variables);
    pass!("exceptions", headings::group_exceptions);
    pass!("open", clauses::group_open);

    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::lexer;
    use crate::splitter;
    use crate::variant::Variant;

    fn group_one(src: &str) -> (Arena, NodeId) {
        let mut arena = Arena::new();
        let tokens = lexer::lex(src);
        let stmts = splitter::split(&mut arena, tokens);
        assert_eq!(stmts.len(), 1, "expected exactly one statement from {src:?}");
        let stmt = stmts[0];
        group(&mut arena, stmt);
        (arena, stmt)
    }

    fn contains_variant(arena: &Arena, id: NodeId, variant: Variant) -> bool {
        if arena.variant(id) == Some(variant) {
            return true;
        }
        arena.children(id).iter().any(|&c| arena.is_group(c) && contains_variant(arena, c, variant))
    }

    #[test]
    fn groups_simple_select_where() {
        let (arena, stmt) = group_one("select a, b from t where a = 1;");
        assert!(contains_variant(&arena, stmt, Variant::Select));
        assert!(contains_variant(&arena, stmt, Variant::Where));
    }

    #[test]
    fn run_traced_reports_passes_that_matched_something() {
        let mut arena = Arena::new();
        let tokens = lexer::lex("select a from t where a = 1;");
        let stmts = splitter::split(&mut arena, tokens);
        let stmt = stmts[0];
        let trace = run_traced(&mut arena, stmt, None);
        assert!(trace.iter().any(|t| t.pass_name == "select"));
        assert!(trace.iter().any(|t| t.pass_name == "where"));
        assert!(trace.iter().all(|t| t.nodes_added > 0));
    }

    #[test]
    fn where_inside_parens_does_not_swallow_the_closing_paren() {
        let (arena, stmt) = group_one("(where 1)");
        let children = arena.children(stmt);
        assert_eq!(children.len(), 1);
        let paren = children[0];
        assert_eq!(arena.variant(paren), Some(Variant::Parenthesis));
        let paren_children = arena.children(paren);
        assert_eq!(paren_children.len(), 3);
        let last = *paren_children.last().unwrap();
        assert!(!arena.is_group(last));
        assert_eq!(arena.value(last), ")");
        assert!(contains_variant(&arena, paren, Variant::Where));
    }

    #[test]
    fn cancellation_hook_stops_early() {
        let mut arena = Arena::new();
        let tokens = lexer::lex("select 1;");
        let stmts = splitter::split(&mut arena, tokens);
        let stmt = stmts[0];
        let cancel: &dyn Fn() -> bool = &|| true;
        run(&mut arena, stmt, Some(cancel));
        // cancel fires before the very first pass, so nothing is grouped.
        assert!(arena.children(stmt).iter().all(|&c| arena.variant(c).is_none()));
    }
}
