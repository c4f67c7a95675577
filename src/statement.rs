//! `Statement`/`TokenList` accessor API: free functions over `(&Arena,
//! NodeId)`, mirroring `bsqlparse/sql.py`'s `Token`/`TokenList` method set
//! in arena/NodeId idiom rather than through a class hierarchy. Every
//! function here operates on one group's *direct* children only, exactly
//! like the `token_next_by`/`token_prev` primitives it's built from — none
//! of them descend into nested groups, matching §4.1's contract.

use crate::builtins;
use crate::token_type::TokenType;
use crate::tree::{token_next, token_next_by, token_prev, Arena, NodeId};
use crate::variant::Variant;

/// Strips one layer of matching outer `'...'`/`"..."` quoting from a raw
/// token value. No located source in the retrieved pack names this
/// explicitly (no `utils.py` accompanies the `sql.py` this is grounded on);
/// derived directly from `remove_quotes`'s call sites in `get_real_name`/
/// `get_parent_name`, which only ever apply it to a single `Name`/
/// `String.Symbol` token's raw text.
pub fn remove_quotes(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

/// `Statement.get_type`: the statement's leading DML/DDL keyword,
/// normalized, or `UNKNOWN`. A leading CTE keyword (`WITH`) is skipped
/// past any `Identifier`/`IdentifierList` that follows it, looking for the
/// real DML keyword beyond the CTE name list.
pub fn get_type(arena: &Arena, stmt: NodeId) -> String {
    let Some((idx, first)) = token_next(arena, stmt, 0, true, true) else {
        return "UNKNOWN".to_string();
    };
    if arena.is_group(first) {
        return "UNKNOWN".to_string();
    }
    let normalized = arena.normalized(first);
    if builtins::is_dml_keyword(normalized) || builtins::is_ddl_keyword(normalized) {
        return normalized.to_string();
    }
    if builtins::is_cte_leading_keyword(normalized) {
        let mut i = idx + 1;
        loop {
            let Some((nidx, nid)) = token_next(arena, stmt, i, true, true) else {
                return "UNKNOWN".to_string();
            };
            if arena.is_group(nid) {
                if matches!(arena.variant(nid), Some(Variant::Identifier) | Some(Variant::IdentifierList)) {
                    i = nidx + 1;
                    continue;
                }
                // By the time `get_type` runs the tree is fully grouped, so
                // the trailing DML keyword is itself wrapped (`group_select`,
                // `group_dml`) rather than sitting as a bare leaf — read its
                // leading `Keyword.DML` leaf instead of giving up on it.
                if matches!(arena.variant(nid), Some(Variant::Select) | Some(Variant::DmlOperation)) {
                    if let Some((_, kw)) = token_next_by(arena, nid, 0, &[], None, Some(TokenType::KeywordDml)) {
                        return arena.normalized(kw).to_string();
                    }
                }
                return "UNKNOWN".to_string();
            }
            let ntext = arena.normalized(nid);
            if builtins::is_dml_keyword(ntext) {
                return ntext.to_string();
            }
            return "UNKNOWN".to_string();
        }
    }
    "UNKNOWN".to_string()
}

/// `TokenList._get_first_name`: scans from `from` (or in reverse from
/// `from` down to 0) for the first `Name`/`Wildcard`/`String.Symbol` leaf,
/// or the first `Identifier`/`Function` group (recursing into its own
/// name), returning its (quote-stripped) text.
fn get_first_name(arena: &Arena, group: NodeId, from: usize, reverse: bool, keywords: bool) -> Option<String> {
    let children = arena.children(group);
    if children.is_empty() {
        return None;
    }
    let from = from.min(children.len() - 1);
    let indices: Vec<usize> = if reverse {
        (0..=from).rev().collect()
    } else {
        (from..children.len()).collect()
    };
    for i in indices {
        let id = children[i];
        if arena.is_group(id) {
            if matches!(arena.variant(id), Some(Variant::Identifier) | Some(Variant::Function)) {
                if let Some(name) = get_name(arena, id) {
                    return Some(name);
                }
            }
            continue;
        }
        let tt = arena.token_type(id);
        let is_candidate = tt == TokenType::Name
            || tt == TokenType::Wildcard
            || tt == TokenType::StringSymbol
            || (keywords && tt.is_keyword());
        if is_candidate {
            return Some(remove_quotes(arena.value(id)));
        }
    }
    None
}

/// True if `group` contains a direct `Wildcard` (`*`) child.
pub fn is_wildcard(arena: &Arena, group: NodeId) -> bool {
    token_next_by(arena, group, 0, &[], None, Some(TokenType::Wildcard)).is_some()
}

/// `TokenList.get_alias`. Preserved with its original's known
/// over-matching for a bare `"name alias"` pair — any non-trivial tail
/// after whitespace counts as an alias once the group has more than two
/// children, with no attempt to rule out an arithmetic expression's second
/// operand (see SPEC_FULL.md's Open Questions).
pub fn get_alias(arena: &Arena, group: NodeId) -> Option<String> {
    if is_wildcard(arena, group) {
        return None;
    }
    if let Some((kw_idx, _)) = token_next_by(arena, group, 0, &[], Some((TokenType::Keyword, &["AS"])), None) {
        return get_first_name(arena, group, kw_idx + 1, false, true);
    }
    let len = arena.children(group).len();
    if len > 2 {
        if let Some(&last) = arena.children(group).last() {
            if arena.variant(last) == Some(Variant::Identifier) {
                return get_first_name(arena, group, len - 1, false, false);
            }
        }
    }
    let has_ws = arena
        .children(group)
        .iter()
        .any(|&c| !arena.is_group(c) && arena.is_whitespace(c));
    if len > 2 && has_ws {
        return get_first_name(arena, group, len - 1, true, false);
    }
    None
}

/// `TokenList.has_alias`.
pub fn has_alias(arena: &Arena, group: NodeId) -> bool {
    get_alias(arena, group).is_some()
}

/// `TokenList.get_real_name`: the name after the last `.`, or the first
/// name in the group if there is no `.`.
pub fn get_real_name(arena: &Arena, group: NodeId) -> Option<String> {
    let start = token_next_by(arena, group, 0, &[], Some((TokenType::Punctuation, &["."])), None)
        .map(|(i, _)| i)
        .unwrap_or(0);
    get_first_name(arena, group, start, false, false)
}

/// `TokenList.get_parent_name`: the qualifier immediately before the `.`,
/// if any.
pub fn get_parent_name(arena: &Arena, group: NodeId) -> Option<String> {
    let (dot_idx, _) = token_next_by(arena, group, 0, &[], Some((TokenType::Punctuation, &["."])), None)?;
    let (_, prev_id) = token_prev(arena, group, dot_idx.saturating_sub(1), true, false)?;
    if arena.is_group(prev_id) {
        return None;
    }
    Some(remove_quotes(arena.value(prev_id)))
}

/// `TokenList.get_name`: the alias if present, else the real name.
pub fn get_name(arena: &Arena, group: NodeId) -> Option<String> {
    get_alias(arena, group).or_else(|| get_real_name(arena, group))
}

/// `Identifier.get_typecast`: the flattened text of whatever follows a
/// direct `::` child.
pub fn get_typecast(arena: &Arena, group: NodeId) -> Option<String> {
    let (idx, _) = token_next_by(arena, group, 0, &[], Some((TokenType::Operator, &["::"])), None)?;
    let (_, next_id) = token_next(arena, group, idx + 1, true, false)?;
    Some(arena.flattened_text(next_id))
}

/// `Identifier.get_ordering`: the normalized `ASC`/`DESC` keyword, if any.
pub fn get_ordering(arena: &Arena, group: NodeId) -> Option<String> {
    let (idx, _) = token_next_by(arena, group, 0, &[], None, Some(TokenType::KeywordOrder))?;
    let id = arena.children(group)[idx];
    Some(arena.normalized(id).to_string())
}

/// `Identifier.get_array_indices`: the flattened text of each direct
/// `SquareBrackets` child, in order.
pub fn get_array_indices(arena: &Arena, group: NodeId) -> Vec<String> {
    arena
        .children(group)
        .iter()
        .filter(|&&c| arena.variant(c) == Some(Variant::SquareBrackets))
        .map(|&c| arena.flattened_text(c))
        .collect()
}

/// `IdentifierList.get_identifiers`: the direct children that are
/// themselves identifier-like (groups or bare name/string/number/keyword
/// leaves), skipping the separating commas and whitespace.
pub fn get_identifiers(arena: &Arena, group: NodeId) -> Vec<NodeId> {
    arena
        .children(group)
        .iter()
        .copied()
        .filter(|&c| {
            if arena.is_group(c) {
                matches!(
                    arena.variant(c),
                    Some(Variant::Identifier)
                        | Some(Variant::Function)
                        | Some(Variant::Comparison)
                        | Some(Variant::Operation)
                )
            } else {
                let tt = arena.token_type(c);
                tt == TokenType::Name
                    || tt == TokenType::StringSymbol
                    || tt.is_a(TokenType::Number)
                    || tt.is_keyword()
            }
        })
        .collect()
}

/// `Comparison.left`/`Comparison.right`, `Assignment.left`/`Assignment.
/// right`, `Operation.left`/`Operation.right`: the non-whitespace child
/// immediately before/after the group's single operator child.
fn operator_operands(arena: &Arena, group: NodeId, is_operator: impl Fn(&Arena, NodeId) -> bool) -> Option<(NodeId, NodeId)> {
    let children = arena.children(group);
    let op_idx = children.iter().position(|&c| !arena.is_group(c) && is_operator(arena, c))?;
    let (_, left) = token_prev(arena, group, op_idx.saturating_sub(1), true, false).filter(|&(i, _)| i < op_idx)?;
    let (_, right) = token_next(arena, group, op_idx + 1, true, false)?;
    Some((left, right))
}

pub fn comparison_operands(arena: &Arena, group: NodeId) -> Option<(NodeId, NodeId)> {
    operator_operands(arena, group, |arena, id| arena.token_type(id).is_a(TokenType::OperatorComparison))
}

pub fn assignment_operands(arena: &Arena, group: NodeId) -> Option<(NodeId, NodeId)> {
    operator_operands(arena, group, |arena, id| arena.matches(id, TokenType::Assignment, Some(&[":="]), false))
}

/// `Operation.left`/`Operation.right`/`Operation.operator`.
pub fn operation_parts(arena: &Arena, group: NodeId) -> Option<(NodeId, NodeId, NodeId)> {
    let children = arena.children(group);
    let op_idx = children.iter().position(|&c| {
        !arena.is_group(c)
            && (arena.token_type(c) == TokenType::Operator || arena.token_type(c) == TokenType::Wildcard)
    })?;
    let (_, left) = token_prev(arena, group, op_idx.saturating_sub(1), true, false).filter(|&(i, _)| i < op_idx)?;
    let (_, right) = token_next(arena, group, op_idx + 1, true, false)?;
    Some((left, children[op_idx], right))
}

/// `Case.get_cases`: `(condition, value)` pairs for each `WHEN ... THEN
/// ...` arm, plus a final `(None, value)` pair for a trailing `ELSE`.
pub fn get_cases(arena: &Arena, case: NodeId) -> Vec<(Option<String>, String)> {
    let children = arena.children(case);
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < children.len() {
        let c = children[i];
        if !arena.is_group(c) {
            if arena.matches(c, TokenType::Keyword, Some(&["WHEN"]), true) {
                if let Some((then_idx, _)) =
                    token_next_by(arena, case, i + 1, &[], Some((TokenType::Keyword, &["THEN"])), None)
                {
                    let cond = span_text(arena, case, i + 1, then_idx.saturating_sub(1));
                    let next_marker = token_next_by(
                        arena,
                        case,
                        then_idx + 1,
                        &[],
                        Some((TokenType::Keyword, &["WHEN", "ELSE", "END", "END CASE"])),
                        None,
                    )
                    .map(|(idx, _)| idx)
                    .unwrap_or(children.len());
                    let value = span_text(arena, case, then_idx + 1, next_marker.saturating_sub(1));
                    out.push((Some(cond), value));
                    i = next_marker;
                    continue;
                }
            } else if arena.matches(c, TokenType::Keyword, Some(&["ELSE"]), true) {
                let next_marker =
                    token_next_by(arena, case, i + 1, &[], Some((TokenType::Keyword, &["END", "END CASE"])), None)
                        .map(|(idx, _)| idx)
                        .unwrap_or(children.len());
                let value = span_text(arena, case, i + 1, next_marker.saturating_sub(1));
                out.push((None, value));
                i = next_marker;
                continue;
            }
        }
        i += 1;
    }
    out
}

fn span_text(arena: &Arena, group: NodeId, start: usize, end: usize) -> String {
    let children = arena.children(group);
    if start > end || start >= children.len() {
        return String::new();
    }
    let end = end.min(children.len() - 1);
    children[start..=end]
        .iter()
        .map(|&c| arena.flattened_text(c))
        .collect()
}

/// `Function.get_parameters`: the `FunctionParam` children of the
/// `Function`'s `Parenthesis` argument list.
pub fn get_parameters(arena: &Arena, function: NodeId) -> Vec<NodeId> {
    let Some(&paren) = arena.children(function).get(1) else {
        return Vec::new();
    };
    if arena.variant(paren) != Some(Variant::Parenthesis) {
        return Vec::new();
    }
    arena
        .children(paren)
        .iter()
        .copied()
        .filter(|&c| arena.variant(c) == Some(Variant::FunctionParam))
        .collect()
}

/// `If.get_block`: the 0-indexed `idx`-th branch of an `If` group, bounded
/// by `THEN`/`ELSIF`/`ELSE`/`END IF` markers.
pub fn if_get_block(arena: &Arena, if_group: NodeId, idx: usize) -> Option<String> {
    let children = arena.children(if_group);
    let markers: Vec<usize> = children
        .iter()
        .enumerate()
        .filter(|&(_, &c)| {
            !arena.is_group(c) && arena.matches(c, TokenType::Keyword, Some(&["THEN", "ELSIF", "ELSE"]), true)
        })
        .map(|(i, _)| i)
        .collect();
    let start = *markers.get(idx)? + 1;
    let end = markers
        .get(idx + 1)
        .map(|&m| m.saturating_sub(1))
        .unwrap_or(children.len() - 1);
    Some(span_text(arena, if_group, start, end))
}

/// `For.get_condition`: the flattened text between the loop opener and
/// `LOOP`.
pub fn for_get_condition(arena: &Arena, for_group: NodeId) -> Option<String> {
    let (loop_idx, _) = token_next_by(arena, for_group, 0, &[], Some((TokenType::Keyword, &["LOOP"])), None)?;
    Some(span_text(arena, for_group, 1, loop_idx.saturating_sub(1)))
}

/// `DeclareSection.declared_variables`: the `DataType` children produced
/// by `group_variables`.
pub fn declared_variables(arena: &Arena, declare_section: NodeId) -> Vec<NodeId> {
    arena
        .children(declare_section)
        .iter()
        .copied()
        .filter(|&c| arena.variant(c) == Some(Variant::DataType))
        .collect()
}

/// `DataType.get_name`: the declared variable's name (its first `Name`
/// leaf).
pub fn data_type_get_name(arena: &Arena, data_type: NodeId) -> Option<String> {
    get_first_name(arena, data_type, 0, false, false)
}

/// `DataType.get_type`: the flattened text of everything after the name.
pub fn data_type_get_type(arena: &Arena, data_type: NodeId) -> Option<String> {
    let (idx, _) = token_next(arena, data_type, 0, true, true)?;
    let len = arena.children(data_type).len();
    if idx + 1 >= len {
        return None;
    }
    Some(span_text(arena, data_type, idx + 1, len - 1))
}

/// Serializes a subtree to the JSON convention of §6: public attributes
/// only (no parent back-references, no class-level statics).
pub fn to_json(arena: &Arena, id: NodeId) -> serde_json::Value {
    use crate::tree::NodeData;
    use serde_json::json;
    match &arena.node(id).data {
        NodeData::Token {
            token_type,
            value,
            normalized,
        } => json!({
            "kind": "token",
            "ttype": serde_json::to_value(token_type).unwrap_or(serde_json::Value::Null),
            "value": value,
            "normalized": normalized,
        }),
        NodeData::Group { variant, children } => json!({
            "kind": "group",
            "variant": serde_json::to_value(variant).unwrap_or(serde_json::Value::Null),
            "children": children.iter().map(|&c| to_json(arena, c)).collect::<Vec<_>>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::grouping;
    use crate::lexer;
    use crate::splitter;

    fn group_one(src: &str) -> (Arena, NodeId) {
        let mut arena = Arena::new();
        let tokens = lexer::lex(src);
        let stmts = splitter::split(&mut arena, tokens);
        let stmt = stmts[0];
        grouping::group(&mut arena, stmt);
        (arena, stmt)
    }

    #[test]
    fn get_type_recognizes_dml() {
        let (arena, stmt) = group_one("select 1;");
        assert_eq!(get_type(&arena, stmt), "SELECT");
    }

    #[test]
    fn get_type_recognizes_ddl() {
        let (arena, stmt) = group_one("create table t (x int);");
        assert_eq!(get_type(&arena, stmt), "CREATE");
    }

    #[test]
    fn get_type_unknown_for_empty_statement() {
        let mut arena = Arena::new();
        let stmt = arena.push_group(Variant::Statement, vec![]);
        assert_eq!(get_type(&arena, stmt), "UNKNOWN");
    }

    #[test]
    fn remove_quotes_strips_matching_pair() {
        assert_eq!(remove_quotes("\"foo\""), "foo");
        assert_eq!(remove_quotes("'foo'"), "foo");
        assert_eq!(remove_quotes("foo"), "foo");
    }

    #[test]
    fn subselect_in_from_clause_keeps_its_own_identifier_list() {
        let (arena, stmt) = group_one("SELECT id, name FROM (SELECT id, name FROM bar) as foo");
        let children = arena.children(stmt);
        assert_eq!(children.len(), 7);
        assert_eq!(arena.variant(children[2]), Some(Variant::IdentifierList));
        let last = *children.last().unwrap();
        assert_eq!(arena.variant(last), Some(Variant::Identifier));
        assert_eq!(get_name(&arena, last), Some("foo".to_string()));
    }

    #[test]
    fn qualified_name_typecast_and_alias_are_all_readable() {
        let (arena, stmt) = group_one(r#"select "x"."y"::text as "z" from foo"#);
        let non_ws: Vec<NodeId> = arena
            .children(stmt)
            .iter()
            .copied()
            .filter(|&c| arena.is_group(c) || !arena.is_whitespace(c))
            .collect();
        let ident = non_ws[1];
        assert_eq!(arena.variant(ident), Some(Variant::Identifier));
        assert_eq!(get_name(&arena, ident), Some("z".to_string()));
        assert_eq!(get_real_name(&arena, ident), Some("y".to_string()));
        assert_eq!(get_parent_name(&arena, ident), Some("x".to_string()));
        assert_eq!(get_alias(&arena, ident), Some("z".to_string()));
        assert_eq!(get_typecast(&arena, ident), Some("text".to_string()));
    }

    #[test]
    fn cte_with_select_tail_get_type_is_select() {
        let (arena, stmt) = group_one("WITH foo AS (SELECT 1,2,3) SELECT * FROM foo;");
        assert_eq!(get_type(&arena, stmt), "SELECT");
    }

    #[test]
    fn cte_with_insert_tail_get_type_is_insert() {
        let (arena, stmt) =
            group_one("WITH foo AS (SELECT 1,2,3) INSERT INTO bar SELECT * FROM foo;");
        assert_eq!(get_type(&arena, stmt), "INSERT");
    }

    #[test]
    fn comment_then_keyword_get_type_skips_the_comment() {
        let (arena, stmt) = group_one("-- comment\ninsert into foo");
        assert_eq!(get_type(&arena, stmt), "INSERT");
    }
}
