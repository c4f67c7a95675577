//! Raw `logos::Logos` token kinds, mapped onto [`TokenType`] by
//! [`TokenKind::token_type`]. Keyword literals win over the looser `Ident`
//! regex because `logos` prefers the higher-priority pattern on a tie in
//! match length, mirroring the teacher's `Ident` (`priority = 1`) vs.
//! keyword-literal convention in `crates/source_gen/src/lexer/generated.rs`.

use crate::token_type::TokenType;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"--[^\n]*")]
    CommentSingle,
    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    CommentMultiline,

    // --- multi-word keyword tokens: naturally win over their shorter
    // single-word siblings because logos prefers the longer match. ---
    #[regex(r"(?i:create[ \t\r\n]+or[ \t\r\n]+replace)")]
    CreateOrReplaceKw,
    #[regex(r"(?i:end[ \t\r\n]+if)")]
    EndIfKw,
    #[regex(r"(?i:end[ \t\r\n]+loop)")]
    EndLoopKw,
    #[regex(r"(?i:end[ \t\r\n]+while)")]
    EndWhileKw,
    #[regex(r"(?i:end[ \t\r\n]+case)")]
    EndCaseKw,
    #[regex(r"(?i:union[ \t\r\n]+all)")]
    UnionAllKw,
    #[regex(r"(?i:order[ \t\r\n]+by)")]
    OrderByKw,
    #[regex(r"(?i:group[ \t\r\n]+by)")]
    GroupByKw,
    #[regex(r"(?i:for[ \t\r\n]+update)")]
    ForUpdateKw,
    #[regex(r"(?i:for[ \t\r\n]+[A-Za-z_][A-Za-z0-9_]*[ \t\r\n]+in)")]
    ForInKw,

    // --- DML / DDL / CTE keywords ---
    #[token("select", ignore(case))]
    SelectKw,
    #[token("insert", ignore(case))]
    InsertKw,
    #[token("update", ignore(case))]
    UpdateKw,
    #[token("delete", ignore(case))]
    DeleteKw,
    #[token("create", ignore(case))]
    CreateKw,
    #[token("alter", ignore(case))]
    AlterKw,
    #[token("drop", ignore(case))]
    DropKw,
    #[token("with", ignore(case))]
    WithKw,

    // --- order keyword subkind ---
    #[token("asc", ignore(case))]
    AscKw,
    #[token("desc", ignore(case))]
    DescKw,

    // --- generic keywords ---
    #[token("table", ignore(case))]
    TableKw,
    #[token("index", ignore(case))]
    IndexKw,
    #[token("concurrently", ignore(case))]
    ConcurrentlyKw,
    #[token("function", ignore(case))]
    FunctionKw,
    #[token("procedure", ignore(case))]
    ProcedureKw,
    #[token("package", ignore(case))]
    PackageKw,
    #[token("is", ignore(case))]
    IsKw,
    #[token("as", ignore(case))]
    AsKw,
    #[token("begin", ignore(case))]
    BeginKw,
    #[token("end", ignore(case))]
    EndKw,
    #[token("declare", ignore(case))]
    DeclareKw,
    #[token("cursor", ignore(case))]
    CursorKw,
    #[token("exception", ignore(case))]
    ExceptionKw,
    #[token("if", ignore(case))]
    IfKw,
    #[token("then", ignore(case))]
    ThenKw,
    #[token("else", ignore(case))]
    ElseKw,
    #[token("elsif", ignore(case))]
    ElsifKw,
    #[token("case", ignore(case))]
    CaseKw,
    #[token("when", ignore(case))]
    WhenKw,
    #[token("for", ignore(case))]
    ForKw,
    #[token("in", ignore(case))]
    InKw,
    #[token("loop", ignore(case))]
    LoopKw,
    #[token("while", ignore(case))]
    WhileKw,
    #[token("return", ignore(case))]
    ReturnKw,
    #[token("returns", ignore(case))]
    ReturnsKw,
    #[token("exit", ignore(case))]
    ExitKw,
    #[token("open", ignore(case))]
    OpenKw,
    #[token("where", ignore(case))]
    WhereKw,
    #[token("from", ignore(case))]
    FromKw,
    #[token("into", ignore(case))]
    IntoKw,
    #[token("union", ignore(case))]
    UnionKw,
    #[token("all", ignore(case))]
    AllKw,
    #[token("order", ignore(case))]
    OrderKw,
    #[token("by", ignore(case))]
    ByKw,
    #[token("group", ignore(case))]
    GroupKw,
    #[token("limit", ignore(case))]
    LimitKw,
    #[token("except", ignore(case))]
    ExceptKw,
    #[token("having", ignore(case))]
    HavingKw,
    #[token("returning", ignore(case))]
    ReturningKw,
    #[token("and", ignore(case))]
    AndKw,
    #[token("or", ignore(case))]
    OrKw,
    #[token("not", ignore(case))]
    NotKw,
    #[token("null", ignore(case))]
    NullKw,
    #[token("like", ignore(case))]
    LikeKw,
    #[token("default", ignore(case))]
    DefaultKw,
    #[token("out", ignore(case))]
    OutKw,
    #[token("nocopy", ignore(case))]
    NocopyKw,
    #[token("varchar", ignore(case))]
    VarcharKw,

    #[regex(r#""([^"]|"")*""#)]
    DelimitedIdent,
    #[regex(r"'([^']|'')*'")]
    QuotedLiteral,

    #[regex(r"[0-9]+\.[0-9]+", priority = 3)]
    Float,
    #[regex(r"[0-9]+", priority = 2)]
    Integer,
    #[regex(r"[A-Za-z_][A-Za-z0-9_$]*", priority = 1)]
    Ident,

    #[token("::")]
    Typecast,
    #[token(":=")]
    Assign,
    #[regex(r"<=|>=|<>|!=|=|<|>")]
    ComparisonOp,
    #[token("||")]
    Concat,
    #[token("<<")]
    OpenLoopTag,
    #[token(">>")]
    CloseLoopTag,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    Error,
    Eof,
}

impl TokenKind {
    pub fn token_type(self) -> TokenType {
        use TokenKind::*;
        use TokenType::*;
        match self {
            Whitespace => TokenType::Whitespace,
            CommentSingle => TokenType::CommentSingle,
            CommentMultiline => TokenType::CommentMultiline,

            SelectKw | InsertKw | UpdateKw | DeleteKw => KeywordDml,
            CreateOrReplaceKw | CreateKw | AlterKw | DropKw | TableKw | IndexKw
            | ConcurrentlyKw => KeywordDdl,
            WithKw => KeywordCte,
            AscKw | DescKw => KeywordOrder,

            FunctionKw | ProcedureKw | PackageKw | IsKw | AsKw | BeginKw | EndKw | DeclareKw
            | CursorKw | ExceptionKw | IfKw | ThenKw | ElseKw | ElsifKw | CaseKw | WhenKw
            | ForKw | InKw | LoopKw | WhileKw | ReturnKw | ReturnsKw | ExitKw | OpenKw
            | WhereKw | FromKw | IntoKw | UnionKw | AllKw | OrderKw | ByKw | GroupKw
            | LimitKw | ExceptKw | HavingKw | ReturningKw | AndKw | OrKw | NotKw | NullKw
            | LikeKw | DefaultKw | OutKw | NocopyKw | VarcharKw | EndIfKw | EndLoopKw
            | EndWhileKw | EndCaseKw | UnionAllKw | OrderByKw | GroupByKw | ForUpdateKw => {
                TokenType::Keyword
            }

            ForInKw => TokenType::ForIn,

            DelimitedIdent => StringSymbol,
            QuotedLiteral => TokenType::Name,

            Float => NumberFloat,
            Integer => NumberInteger,
            Ident => TokenType::Name,

            Assign => TokenType::Assignment,
            ComparisonOp => OperatorComparison,
            Typecast | Concat | Plus | Minus | Slash | Percent => TokenType::Operator,
            Asterisk => TokenType::Wildcard,
            OpenLoopTag | CloseLoopTag => OperatorComparison,

            LParen | RParen | LBracket | RBracket | Comma | Semicolon | Dot | Colon => {
                TokenType::Punctuation
            }

            Error | Eof => TokenType::Error,
        }
    }
}
