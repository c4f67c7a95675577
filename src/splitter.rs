//! Statement Splitter: a block-depth state machine that turns the flat
//! lexer token stream into one arena-owned [`Variant::Statement`] group per
//! top-level SQL statement.
//!
//! Grounded in `sqlparse/engine/statement_splitter.py`'s `_change_splitlevel`
//! for the depth-delta table. That file's `process()` only ever yields a
//! single `Statement` wrapping its whole nested-list structure (its
//! classic split-per-`;` loop is commented out, `# self.consume_ws = True`)
//! — a known-dead path in an experimental file (see its own `FIXME(andi):
//! This makes no sense` at the `BEGIN` branch). This crate instead follows
//! the specification's prose contract directly (§4.2: "the outermost frame
//! is yielded as one or more top-level Statements, one per terminated
//! sub-frame"): a completed nested block is spliced into the running
//! top-level accumulator as one child, and the accumulator itself is only
//! flushed into a new top-level `Statement` when a `;` is seen at depth 0 —
//! which is what actually produces "one `CREATE FUNCTION ... END;`
//! followed by one `SELECT ...;`" as two statements (§8 scenario 1),
//! rather than the literal script's single all-engulfing wrap.

use crate::lexer::Token;
use crate::token_type::TokenType;
use crate::tree::{Arena, NodeId};
use crate::variant::Variant;

#[derive(Default)]
struct SplitterState {
    is_create: bool,
    in_declare: bool,
    in_case: i32,
    begin_depth: i32,
    infor: bool,
    inwhile: bool,
}

impl SplitterState {
    /// Returns the depth delta for this token, mutating block-tracking state
    /// along the way. Mirrors `_change_splitlevel`.
    fn change_splitlevel(&mut self, token_type: TokenType, normalized: &str) -> i32 {
        // `ForIn` is its own lattice leaf, not a `Keyword` refinement (see
        // `token_type.rs`'s `is_a`), and the lexer only upper-cases a
        // token's `normalized` field for keyword-typed tokens — so this has
        // to run before the keyword guard below, and match case-insensitively
        // rather than assuming `normalized` is already upper-cased.
        if token_type == TokenType::ForIn && self.is_create && self.begin_depth > 0 {
            self.infor = true;
            return 1;
        }

        if !token_type.is_keyword() {
            return 0;
        }

        // Deviates from the literal depth table here: the table gives
        // "CREATE OR REPLACE" alone a +1 delta with no keyword anywhere in
        // the table that ever closes it, which would leave the frame open
        // for the rest of the input and swallow every following top-level
        // statement into it (verified against §8 scenario 1, which uses a
        // bare `CREATE FUNCTION` and still expects a clean 2-way split).
        // Any CREATE-family DDL opener sets `is_create` with delta 0 instead
        // — `is_create` gates DECLARE/IF/FOR/WHILE exactly as the table
        // specifies, it just never consumes a frame of its own.
        if token_type == TokenType::KeywordDdl
            && (normalized == "CREATE OR REPLACE" || normalized == "CREATE")
        {
            self.is_create = true;
            return 0;
        }

        if normalized == "DECLARE" && self.is_create && self.begin_depth == 0 {
            self.in_declare = true;
            return 1;
        }

        if normalized == "BEGIN" {
            self.begin_depth += 1;
            return 1;
        }

        if normalized == "END" {
            if self.in_case > 0 {
                self.in_case -= 1;
                return -1;
            }
            self.begin_depth = (self.begin_depth - 1).max(0);
            return -1;
        }

        // `ForIn` itself is handled above, before the keyword guard; this is
        // only the `LOOP` keyword that follows it (or a bare `LOOP` with no
        // preceding `FOR ... IN`).
        if normalized == "LOOP" && self.is_create && self.begin_depth > 0 {
            if self.infor {
                self.infor = false;
                return 0;
            }
            if self.inwhile {
                self.inwhile = false;
                return 0;
            }
            return 1;
        }

        if normalized == "CASE" {
            self.in_case += 1;
            return 1;
        }

        if (normalized == "IF" || normalized == "WHILE") && self.is_create && self.begin_depth > 0 {
            if normalized == "WHILE" {
                self.inwhile = true;
            }
            return 1;
        }

        if normalized == "END CASE" {
            self.in_case -= 1;
            return -1;
        }

        if normalized == "END IF" || normalized == "END WHILE" || normalized == "END LOOP" {
            return -1;
        }

        0
    }
}

/// One statement boundary the splitter had to force-close at end of input
/// rather than by an ordinary depth-delta closer — e.g. a top-level
/// `DECLARE` before any `BEGIN` opens a frame nothing in the depth table
/// ever closes (see the header comment). Stands in for a log line: the
/// splitter is total and never refuses to produce output, so a caller that
/// wants to know "did this input hit a known rough edge" reads this
/// instead of a side-channel logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterDiagnostic {
    pub statement_index: usize,
    pub forced_closes: usize,
}

/// Splits a lexed token stream into top-level statements, each returned as
/// the [`NodeId`] of a [`Variant::Statement`] group newly created in `arena`.
pub fn split(arena: &mut Arena, tokens: impl IntoIterator<Item = Token>) -> Vec<NodeId> {
    split_inner(arena, tokens).0
}

/// Like [`split`], but also reports a [`SplitterDiagnostic`] for the final
/// statement whenever the end of input was reached with unclosed frames
/// still on the stack (forcing them closed rather than via an ordinary
/// depth-delta closer).
pub fn split_with_diagnostics(
    arena: &mut Arena,
    tokens: impl IntoIterator<Item = Token>,
) -> (Vec<NodeId>, Vec<SplitterDiagnostic>) {
    let (statements, forced_closes) = split_inner(arena, tokens);
    let mut diagnostics = Vec::new();
    if forced_closes > 0 {
        diagnostics.push(SplitterDiagnostic {
            statement_index: statements.len().saturating_sub(1),
            forced_closes,
        });
    }
    (statements, diagnostics)
}

fn split_inner(arena: &mut Arena, tokens: impl IntoIterator<Item = Token>) -> (Vec<NodeId>, usize) {
    let mut state = SplitterState::default();
    let mut level: i32 = 0;
    // stack[i] holds the children accumulated for the (i+1)-deep nested block
    let mut stack: Vec<Vec<NodeId>> = Vec::new();
    let mut current: Vec<NodeId> = Vec::new();
    let mut output: Vec<NodeId> = Vec::new();

    let push_leaf = |arena: &mut Arena, tok: &Token| {
        arena.push_token(tok.token_type, tok.value.clone(), tok.normalized.clone())
    };

    let close_frame = |arena: &mut Arena, stack: &mut Vec<Vec<NodeId>>, current: &mut Vec<NodeId>| {
        let frame = stack.pop().expect("close_frame called with empty stack");
        let wrapped = arena.push_group(Variant::Statement, frame);
        match stack.last_mut() {
            Some(parent) => parent.push(wrapped),
            None => current.push(wrapped),
        }
    };

    for tok in tokens {
        let csl = state.change_splitlevel(tok.token_type, &tok.normalized);
        level += csl;
        level = level.max(0);

        let leaf = push_leaf(arena, &tok);

        if csl == 1 {
            stack.push(vec![leaf]);
        } else if csl == -1 {
            match stack.last_mut() {
                Some(top) => top.push(leaf),
                None => current.push(leaf),
            }
            if !stack.is_empty() {
                close_frame(arena, &mut stack, &mut current);
            }
        } else {
            match stack.last_mut() {
                Some(top) => top.push(leaf),
                None => current.push(leaf),
            }
        }

        if level == 0 && stack.is_empty() && tok.token_type == TokenType::Punctuation && tok.value == ";"
        {
            if !current.is_empty() {
                let stmt = arena.push_group(Variant::Statement, std::mem::take(&mut current));
                output.push(stmt);
            }
        }
    }

    let mut forced_closes = 0usize;
    while !stack.is_empty() {
        close_frame(arena, &mut stack, &mut current);
        forced_closes += 1;
    }

    if !current.is_empty() {
        let stmt = arena.push_group(Variant::Statement, current);
        output.push(stmt);
    }

    (output, forced_closes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::lexer;

    fn split_text(src: &str) -> (Arena, Vec<NodeId>) {
        let mut arena = Arena::new();
        let tokens = lexer::lex(src);
        let stmts = split(&mut arena, tokens);
        (arena, stmts)
    }

    #[test]
    fn splits_create_function_and_following_select() {
        let (_arena, stmts) = split_text(
            "CREATE FUNCTION a(x VARCHAR(20)) RETURNS VARCHAR(20) \
             BEGIN DECLARE y VARCHAR(20); IF (1 = 1) THEN SET x = y; END IF; \
             RETURN x; END; SELECT * FROM a.b;",
        );
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn lone_comment_is_one_statement() {
        let (arena, stmts) = split_text("-- just a comment");
        assert_eq!(stmts.len(), 1);
        assert_eq!(arena.children(stmts[0]).len(), 1);
    }

    #[test]
    fn plain_statements_split_on_semicolon() {
        let (_arena, stmts) = split_text("select 1; select 2;");
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn top_level_declare_before_begin_reports_a_forced_close() {
        // DECLARE before the function's BEGIN opens a frame the depth
        // table never closes (see the splitter's own header comment and
        // DESIGN.md) — it only unwinds at end of input.
        let mut arena = Arena::new();
        let tokens = lexer::lex(
            "CREATE FUNCTION a() RETURNS INT AS DECLARE x INT; BEGIN RETURN x; END;",
        );
        let (stmts, diagnostics) = split_with_diagnostics(&mut arena, tokens);
        assert_eq!(stmts.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].forced_closes, 1);
    }
}
