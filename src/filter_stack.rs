//! `FilterStack`: the fourth pipeline stage, wiring lexer → splitter →
//! grouping → filters into one call. Grounded in `sqlparse/engine/
//! filter_stack.py`'s `FilterStack.run`: preprocess filters rewrite the
//! token stream before splitting; each statement is grouped (if enabled);
//! `stmtprocess` filters run for side effects only, exactly mirroring
//! `filter_.process(stmt)` whose return value `filter_stack.py` never
//! binds; only `postprocess` filters may replace the statement.

use crate::grouping;
use crate::lexer::{self, Token};
use crate::splitter;
use crate::tree::{Arena, NodeId};

/// One arena-owned group tree, independent of any sibling statement
/// produced by the same `FilterStack::run` call (see `DESIGN.md`'s
/// ownership note: a `Statement`'s lifetime is its own, not tied to the
/// document that produced it).
pub struct Statement {
    pub arena: Arena,
    pub root: NodeId,
}

impl Statement {
    pub fn get_type(&self) -> String {
        crate::statement::get_type(&self.arena, self.root)
    }

    pub fn to_json(&self) -> serde_json::Value {
        crate::statement::to_json(&self.arena, self.root)
    }
}

pub trait PreprocessFilter {
    fn process(&self, tokens: Vec<Token>) -> Vec<Token>;
}

/// Side-effect-only: `FilterStack::run` discards whatever this returns,
/// matching the literal Python call whose result is never assigned back.
pub trait StatementFilter {
    fn process(&self, stmt: &Statement);
}

pub trait PostprocessFilter {
    fn process(&self, stmt: Statement) -> Statement;
}

#[derive(Default)]
pub struct FilterStack {
    grouping_enabled: bool,
    preprocess: Vec<Box<dyn PreprocessFilter>>,
    stmtprocess: Vec<Box<dyn StatementFilter>>,
    postprocess: Vec<Box<dyn PostprocessFilter>>,
}

impl FilterStack {
    pub fn new() -> Self {
        FilterStack::default()
    }

    pub fn enable_grouping(&mut self) {
        self.grouping_enabled = true;
    }

    pub fn preprocess(&mut self, filter: Box<dyn PreprocessFilter>) {
        self.preprocess.push(filter);
    }

    pub fn stmtprocess(&mut self, filter: Box<dyn StatementFilter>) {
        self.stmtprocess.push(filter);
    }

    pub fn postprocess(&mut self, filter: Box<dyn PostprocessFilter>) {
        self.postprocess.push(filter);
    }

    /// Lexes `sql`, runs it through every `preprocess` filter, splits it
    /// into top-level statements, groups each (if enabled), then runs each
    /// statement through `stmtprocess` (side effects only) and
    /// `postprocess` (may replace) in registration order.
    pub fn run(&self, sql: &str) -> Vec<Statement> {
        let mut tokens: Vec<Token> = lexer::lex(sql).collect();
        for filter in &self.preprocess {
            tokens = filter.process(tokens);
        }

        let mut arena = Arena::new();
        let stmt_roots = splitter::split(&mut arena, tokens);

        let mut out = Vec::with_capacity(stmt_roots.len());
        for root in stmt_roots {
            if self.grouping_enabled {
                grouping::group(&mut arena, root);
            }
            let (sub_arena, sub_root) = arena.extract_subtree(root);
            let mut stmt = Statement {
                arena: sub_arena,
                root: sub_root,
            };
            for filter in &self.stmtprocess {
                filter.process(&stmt);
            }
            for filter in &self.postprocess {
                stmt = filter.process(stmt);
            }
            out.push(stmt);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct UppercaseKeywords;
    impl PreprocessFilter for UppercaseKeywords {
        fn process(&self, tokens: Vec<Token>) -> Vec<Token> {
            tokens
        }
    }

    #[test]
    fn preprocess_filters_see_the_full_token_stream() {
        let mut stack = FilterStack::new();
        stack.preprocess(Box::new(UppercaseKeywords));
        let stmts = stack.run("select 1;");
        assert_eq!(stmts.len(), 1);
    }

    struct CountStatements {
        count: std::cell::Cell<usize>,
    }
    impl StatementFilter for CountStatements {
        fn process(&self, _stmt: &Statement) {
            self.count.set(self.count.get() + 1);
        }
    }

    #[test]
    fn run_groups_and_splits_statements() {
        let mut stack = FilterStack::new();
        stack.enable_grouping();
        let stmts = stack.run("select 1; select 2;");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].get_type(), "SELECT");
        assert_eq!(stmts[1].get_type(), "SELECT");
    }

    #[test]
    fn stmtprocess_runs_for_every_statement_but_never_replaces() {
        let mut stack = FilterStack::new();
        let counter = std::rc::Rc::new(CountStatements { count: std::cell::Cell::new(0) });
        struct CounterFilter(std::rc::Rc<CountStatements>);
        impl StatementFilter for CounterFilter {
            fn process(&self, stmt: &Statement) {
                self.0.process(stmt);
            }
        }
        stack.stmtprocess(Box::new(CounterFilter(counter.clone())));
        let stmts = stack.run("select 1; select 2; select 3;");
        assert_eq!(stmts.len(), 3);
        assert_eq!(counter.count.get(), 3);
    }

    #[test]
    fn ungrouped_run_still_splits_statements() {
        let stack = FilterStack::new();
        let stmts = stack.run("select 1; select 2;");
        assert_eq!(stmts.len(), 2);
        // grouping disabled: get_type still finds the leading DML leaf
        // directly, since it never needed the Select wrapper.
        assert_eq!(stmts[0].get_type(), "SELECT");
    }
}
