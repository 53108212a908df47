//! Token definitions for Stack Extensão
//!
//! Defines all token types produced by the lexer, including the
//! Portuguese keyword and word-operator vocabularies.

use crate::errors::SourceSpan;
use std::fmt;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Source location of this token
    pub span: SourceSpan,
    /// 1-based source line where this token starts
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, span: SourceSpan, line: usize) -> Self {
        Self { kind, span, line }
    }
}

/// Keywords in the Stack Extensão language
///
/// The surface spellings are Portuguese; the variants carry the
/// meaning each word has in the target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Declarations
    /// `funcao`
    Function,
    /// `classe`
    Class,
    /// `componente`
    Component,
    /// `variavel`
    Var,
    /// `constante`
    Const,
    /// `importar`
    Import,
    /// `exportar`
    Export,
    /// `de`
    From,
    /// `como`
    As,

    // Control flow
    /// `se`
    If,
    /// `senao`
    Else,
    /// `enquanto`
    While,
    /// `para`
    For,
    /// `retornar`
    Return,
    /// `tentar`
    Try,
    /// `capturar`
    Catch,
    /// `finalmente`
    Finally,
    /// `lançar`
    Throw,

    // Objects
    /// `novo`
    New,
    /// `isto`
    This,
    /// `super`
    Super,
    /// `estatico`
    Static,
    /// `publico`
    Public,
    /// `privado`
    Private,
    /// `protegido`
    Protected,
}

impl Keyword {
    /// Try to parse a string as a keyword
    pub fn parse(s: &str) -> Option<Keyword> {
        match s {
            // Declarations
            "funcao" => Some(Keyword::Function),
            "classe" => Some(Keyword::Class),
            "componente" => Some(Keyword::Component),
            "variavel" => Some(Keyword::Var),
            "constante" => Some(Keyword::Const),
            "importar" => Some(Keyword::Import),
            "exportar" => Some(Keyword::Export),
            "de" => Some(Keyword::From),
            "como" => Some(Keyword::As),

            // Control flow
            "se" => Some(Keyword::If),
            "senao" => Some(Keyword::Else),
            "enquanto" => Some(Keyword::While),
            "para" => Some(Keyword::For),
            "retornar" => Some(Keyword::Return),
            "tentar" => Some(Keyword::Try),
            "capturar" => Some(Keyword::Catch),
            "finalmente" => Some(Keyword::Finally),
            "lançar" => Some(Keyword::Throw),

            // Objects
            "novo" => Some(Keyword::New),
            "isto" => Some(Keyword::This),
            "super" => Some(Keyword::Super),
            "estatico" => Some(Keyword::Static),
            "publico" => Some(Keyword::Public),
            "privado" => Some(Keyword::Private),
            "protegido" => Some(Keyword::Protected),

            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Keyword::Function => "funcao",
            Keyword::Class => "classe",
            Keyword::Component => "componente",
            Keyword::Var => "variavel",
            Keyword::Const => "constante",
            Keyword::Import => "importar",
            Keyword::Export => "exportar",
            Keyword::From => "de",
            Keyword::As => "como",
            Keyword::If => "se",
            Keyword::Else => "senao",
            Keyword::While => "enquanto",
            Keyword::For => "para",
            Keyword::Return => "retornar",
            Keyword::Try => "tentar",
            Keyword::Catch => "capturar",
            Keyword::Finally => "finalmente",
            Keyword::Throw => "lançar",
            Keyword::New => "novo",
            Keyword::This => "isto",
            Keyword::Super => "super",
            Keyword::Static => "estatico",
            Keyword::Public => "publico",
            Keyword::Private => "privado",
            Keyword::Protected => "protegido",
        };
        write!(f, "{}", s)
    }
}

/// The kind of a token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Number literal (integer or decimal)
    Number(f64),
    /// String literal (single or double quoted)
    Str(String),
    /// Template literal (back-tick quoted, `${}` markers kept verbatim)
    TemplateStr(String),
    /// `verdadeiro`
    True,
    /// `falso`
    False,
    /// `nulo`
    Null,
    /// `vazio`
    Undefined,

    /// Identifier
    Ident(String),
    /// Keyword
    Keyword(Keyword),

    // Punctuation
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `?`
    Question,

    // Operators - single character
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `!`
    Bang,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Eq,

    // Operators - multi character
    /// `**`
    StarStar,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,

    // Special
    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this is an EOF token
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }

    /// Get a human-readable description of this token kind
    pub fn description(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::TemplateStr(_) => "template literal",
            TokenKind::True => "'verdadeiro'",
            TokenKind::False => "'falso'",
            TokenKind::Null => "'nulo'",
            TokenKind::Undefined => "'vazio'",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Question => "'?'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Bang => "'!'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Eq => "'='",
            TokenKind::StarStar => "'**'",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Str(s) => write!(f, "\"{}\"", s),
            TokenKind::TemplateStr(s) => write!(f, "`{}`", s),
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::Keyword(kw) => write!(f, "{}", kw),
            _ => write!(f, "{}", self.description()),
        }
    }
}

/// The word operators and the symbols they stand for
///
/// Each Portuguese word is interchangeable with its symbolic form
/// anywhere an operator is accepted.
pub const WORD_OPERATORS: &[(&str, &str)] = &[
    ("mais", "+"),
    ("menos", "-"),
    ("vezes", "*"),
    ("dividido", "/"),
    ("elevado", "**"),
    ("modulo", "%"),
    ("igual", "=="),
    ("diferente", "!="),
    ("maior", ">"),
    ("menor", "<"),
    ("maior_igual", ">="),
    ("menor_igual", "<="),
    ("e", "&&"),
    ("ou", "||"),
    ("nao", "!"),
];

/// Look up a word as a reserved keyword or literal word
///
/// Covers the structural keywords plus the literal words
/// `verdadeiro`, `falso`, `nulo` and `vazio`.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    match word {
        "verdadeiro" => Some(TokenKind::True),
        "falso" => Some(TokenKind::False),
        "nulo" => Some(TokenKind::Null),
        "vazio" => Some(TokenKind::Undefined),
        _ => Keyword::parse(word).map(TokenKind::Keyword),
    }
}

/// Look up a word as a word operator
///
/// Word operators lex to the same token kinds as their symbolic
/// forms, so `mais` and `+` are indistinguishable past the lexer.
pub fn word_operator(word: &str) -> Option<TokenKind> {
    match word {
        "mais" => Some(TokenKind::Plus),
        "menos" => Some(TokenKind::Minus),
        "vezes" => Some(TokenKind::Star),
        "dividido" => Some(TokenKind::Slash),
        "elevado" => Some(TokenKind::StarStar),
        "modulo" => Some(TokenKind::Percent),
        "igual" => Some(TokenKind::EqEq),
        "diferente" => Some(TokenKind::BangEq),
        "maior" => Some(TokenKind::Gt),
        "menor" => Some(TokenKind::Lt),
        "maior_igual" => Some(TokenKind::GtEq),
        "menor_igual" => Some(TokenKind::LtEq),
        "e" => Some(TokenKind::AmpAmp),
        "ou" => Some(TokenKind::PipePipe),
        "nao" => Some(TokenKind::Bang),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYWORD_SPELLINGS: &[&str] = &[
        "funcao",
        "classe",
        "componente",
        "variavel",
        "constante",
        "importar",
        "exportar",
        "de",
        "como",
        "se",
        "senao",
        "enquanto",
        "para",
        "retornar",
        "tentar",
        "capturar",
        "finalmente",
        "lançar",
        "novo",
        "isto",
        "super",
        "estatico",
        "publico",
        "privado",
        "protegido",
    ];

    #[test]
    fn test_keyword_round_trip() {
        for spelling in KEYWORD_SPELLINGS {
            let kw = Keyword::parse(spelling)
                .unwrap_or_else(|| panic!("{} should be a keyword", spelling));
            assert_eq!(kw.to_string(), *spelling);
        }
    }

    #[test]
    fn test_literal_words() {
        assert_eq!(keyword_kind("verdadeiro"), Some(TokenKind::True));
        assert_eq!(keyword_kind("falso"), Some(TokenKind::False));
        assert_eq!(keyword_kind("nulo"), Some(TokenKind::Null));
        assert_eq!(keyword_kind("vazio"), Some(TokenKind::Undefined));
        assert_eq!(keyword_kind("soma"), None);
    }

    #[test]
    fn test_word_operator_lookup() {
        assert_eq!(word_operator("mais"), Some(TokenKind::Plus));
        assert_eq!(word_operator("elevado"), Some(TokenKind::StarStar));
        assert_eq!(word_operator("e"), Some(TokenKind::AmpAmp));
        assert_eq!(word_operator("nao"), Some(TokenKind::Bang));
        assert_eq!(word_operator("soma"), None);
    }

    #[test]
    fn test_word_operator_table_is_complete() {
        for (word, _) in WORD_OPERATORS {
            assert!(
                word_operator(word).is_some(),
                "{} missing from word_operator",
                word
            );
        }
    }

    #[test]
    fn test_keywords_and_word_operators_disjoint() {
        for (word, _) in WORD_OPERATORS {
            assert!(
                keyword_kind(word).is_none(),
                "{} is both keyword and operator",
                word
            );
        }
        for spelling in KEYWORD_SPELLINGS {
            assert!(
                word_operator(spelling).is_none(),
                "{} is both keyword and operator",
                spelling
            );
        }
    }
}
