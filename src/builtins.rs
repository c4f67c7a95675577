//! Static keyword-classification tables.
//!
//! Grounded in the teacher's `src/rules/builtins.rs`, which keeps a
//! `lazy_static` + `indexmap::IndexSet` table of builtin names consulted by
//! every rule that needs "is this one of a closed set" rather than
//! hand-rolling the check at each call site. This crate follows the same
//! shape for the keyword families [`Statement::get_type`](crate::statement)
//! and the splitter/grouping passes need to recognize as a family.

use indexmap::IndexSet;
use lazy_static::lazy_static;

lazy_static! {
    /// Statement-leading DML keywords recognized by `get_type`.
    pub static ref DML_KEYWORDS: IndexSet<&'static str> =
        ["SELECT", "INSERT", "UPDATE", "DELETE"].into_iter().collect();

    /// Statement-leading DDL keywords recognized by `get_type`.
    pub static ref DDL_KEYWORDS: IndexSet<&'static str> =
        ["CREATE", "ALTER", "DROP"].into_iter().collect();

    /// Keywords `get_type` looks past when a statement opens with a CTE's
    /// `WITH` clause, before it reaches the real DML keyword.
    pub static ref CTE_LEADING_KEYWORDS: IndexSet<&'static str> =
        ["WITH"].into_iter().collect();

    /// `LOOP`-family block closers the splitter and `group_for` both treat
    /// as a single logical unit, collected here so both sites read from one
    /// table instead of duplicating the literal list.
    pub static ref LOOP_CLOSE_KEYWORDS: IndexSet<&'static str> =
        ["END LOOP", "END WHILE", "END IF", "END CASE"].into_iter().collect();
}

pub fn is_dml_keyword(word: &str) -> bool {
    DML_KEYWORDS.contains(word)
}

pub fn is_ddl_keyword(word: &str) -> bool {
    DDL_KEYWORDS.contains(word)
}

pub fn is_cte_leading_keyword(word: &str) -> bool {
    CTE_LEADING_KEYWORDS.contains(word)
}

pub fn is_loop_close_keyword(word: &str) -> bool {
    LOOP_CLOSE_KEYWORDS.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_dml_and_ddl() {
        assert_eq!(is_dml_keyword("SELECT"), true);
        assert_eq!(is_dml_keyword("CREATE"), false);
        assert_eq!(is_ddl_keyword("CREATE"), true);
        assert_eq!(is_ddl_keyword("SELECT"), false);
    }

    #[test]
    fn recognizes_loop_closers() {
        assert_eq!(is_loop_close_keyword("END LOOP"), true);
        assert_eq!(is_loop_close_keyword("END"), false);
    }
}
