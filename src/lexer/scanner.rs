//! Hand-written lexer/scanner for Stack Extensão
//!
//! Converts source code into a stream of tokens.

use super::token::{keyword_kind, word_operator, Token, TokenKind};
use crate::errors::{SourceSpan, StackError, StackResult};

/// The lexer/scanner for Stack Extensão source code
pub struct Lexer<'src> {
    /// The source code being lexed
    source: &'src str,
    /// Current byte position in the source
    pos: usize,
    /// Start position of the current token
    start: usize,
    /// Current 1-based line number
    line: usize,
    /// Line the current token started on
    start_line: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            start: 0,
            line: 1,
            start_line: 1,
        }
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Peek at the next character (one ahead of current)
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advance to the next character and return it
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Check if we've reached the end of the source
    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Get the current span (from start to current position)
    fn current_span(&self) -> SourceSpan {
        SourceSpan::new(self.start, self.pos)
    }

    /// Get the current lexeme (text from start to current position)
    fn current_lexeme(&self) -> &'src str {
        &self.source[self.start..self.pos]
    }

    /// Create a token with the current span and start line
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.current_span(), self.start_line)
    }

    /// Create a lexer error at the current token
    fn error(&self, message: impl Into<String>) -> StackError {
        StackError::lexer(message, self.start_line, self.current_span())
    }

    /// Consume the character if it matches the expected one
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    // Line comment
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    // Block comment, no nesting
                    self.advance();
                    self.advance();
                    while !self.is_at_end() {
                        if self.peek() == Some('*') && self.peek_next() == Some('/') {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Scan a number literal
    fn scan_number(&mut self) -> StackResult<Token> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Fractional part only when a digit follows the dot
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        match self.current_lexeme().parse::<f64>() {
            Ok(n) => Ok(self.make_token(TokenKind::Number(n))),
            Err(_) => Err(self.error("invalid number literal")),
        }
    }

    /// Scan a string literal delimited by the given quote
    fn scan_string(&mut self, quote: char) -> StackResult<Token> {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c == quote {
                self.advance();
                return Ok(self.make_token(TokenKind::Str(value)));
            }

            self.advance();

            if c == '\\' {
                match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some('\'') => value.push('\''),
                    // Unknown escapes keep the escaped character
                    Some(other) => value.push(other),
                    None => break,
                }
            } else {
                value.push(c);
            }
        }

        Err(self.error("unterminated string"))
    }

    /// Scan a template literal delimited by back-ticks
    ///
    /// The body is kept verbatim, `${}` interpolation markers and escape
    /// sequences included.
    fn scan_template(&mut self) -> StackResult<Token> {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c == '`' {
                self.advance();
                return Ok(self.make_token(TokenKind::TemplateStr(value)));
            }
            self.advance();
            value.push(c);

            // An escaped back-tick must not close the template
            if c == '\\' {
                match self.advance() {
                    Some(escaped) => value.push(escaped),
                    None => break,
                }
            }
        }

        Err(self.error("unterminated template literal"))
    }

    /// Scan an identifier, keyword or word operator
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = self.current_lexeme();

        // Reserved words win over word operators
        if let Some(kind) = keyword_kind(text) {
            self.make_token(kind)
        } else if let Some(kind) = word_operator(text) {
            self.make_token(kind)
        } else {
            self.make_token(TokenKind::Ident(text.to_string()))
        }
    }

    /// Scan the next token
    pub fn next_token(&mut self) -> StackResult<Token> {
        self.skip_whitespace();
        self.start = self.pos;
        self.start_line = self.line;

        if self.is_at_end() {
            return Ok(self.make_token(TokenKind::Eof));
        }

        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(self.make_token(TokenKind::Eof)),
        };

        // Identifiers, keywords and word operators. Unicode letters are
        // allowed so accented words like `lançar` lex as single tokens.
        if c.is_alphabetic() || c == '_' || c == '$' {
            return Ok(self.scan_identifier());
        }

        // Numbers
        if c.is_ascii_digit() {
            return self.scan_number();
        }

        // String and template literals
        if c == '"' || c == '\'' {
            return self.scan_string(c);
        }
        if c == '`' {
            return self.scan_template();
        }

        // Punctuation and operators
        let token = match c {
            '(' => self.make_token(TokenKind::LParen),
            ')' => self.make_token(TokenKind::RParen),
            '{' => self.make_token(TokenKind::LBrace),
            '}' => self.make_token(TokenKind::RBrace),
            '[' => self.make_token(TokenKind::LBracket),
            ']' => self.make_token(TokenKind::RBracket),
            ',' => self.make_token(TokenKind::Comma),
            '.' => self.make_token(TokenKind::Dot),
            ';' => self.make_token(TokenKind::Semicolon),
            ':' => self.make_token(TokenKind::Colon),
            '?' => self.make_token(TokenKind::Question),

            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),

            '*' => {
                if self.match_char('*') {
                    self.make_token(TokenKind::StarStar)
                } else {
                    self.make_token(TokenKind::Star)
                }
            }

            '!' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::BangEq)
                } else {
                    self.make_token(TokenKind::Bang)
                }
            }

            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::EqEq)
                } else {
                    self.make_token(TokenKind::Eq)
                }
            }

            '<' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::LtEq)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }

            '>' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::GtEq)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }

            '&' => {
                if self.match_char('&') {
                    self.make_token(TokenKind::AmpAmp)
                } else {
                    self.make_token(TokenKind::Amp)
                }
            }

            '|' => {
                if self.match_char('|') {
                    self.make_token(TokenKind::PipePipe)
                } else {
                    self.make_token(TokenKind::Pipe)
                }
            }

            _ => return Err(self.error(format!("unexpected character: {}", c))),
        };

        Ok(token)
    }

    /// Collect all tokens into a vector
    ///
    /// The returned vector always ends with a single EOF token.
    pub fn tokenize(mut self) -> StackResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::Keyword;

    fn lex(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_tokens(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    #[test]
    fn test_basic_tokens() {
        let tokens = lex("( ) { } [ ] , . ; : ?");
        assert_eq!(
            tokens,
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Semicolon,
                TokenKind::Colon,
                TokenKind::Question,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = lex("+ - * / ** % == != < <= > >= && || ! =");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::StarStar,
                TokenKind::Percent,
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Bang,
                TokenKind::Eq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_word_operators() {
        let tokens = lex("mais menos vezes dividido elevado modulo");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::StarStar,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );

        let tokens = lex("igual diferente maior menor maior_igual menor_igual e ou nao");
        assert_eq!(
            tokens,
            vec![
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::GtEq,
                TokenKind::LtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("se senao enquanto para funcao classe retornar variavel constante");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Keyword(Keyword::If),
                TokenKind::Keyword(Keyword::Else),
                TokenKind::Keyword(Keyword::While),
                TokenKind::Keyword(Keyword::For),
                TokenKind::Keyword(Keyword::Function),
                TokenKind::Keyword(Keyword::Class),
                TokenKind::Keyword(Keyword::Return),
                TokenKind::Keyword(Keyword::Var),
                TokenKind::Keyword(Keyword::Const),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_accented_keyword() {
        let tokens = lex("lançar");
        assert_eq!(
            tokens,
            vec![TokenKind::Keyword(Keyword::Throw), TokenKind::Eof]
        );
    }

    #[test]
    fn test_literal_words() {
        let tokens = lex("verdadeiro falso nulo vazio");
        assert_eq!(
            tokens,
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::Undefined,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("42 3.14 0.5 100.25");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.14),
                TokenKind::Number(0.5),
                TokenKind::Number(100.25),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_dot_without_fraction() {
        // The dot only joins the number when a digit follows
        let tokens = lex("5.");
        assert_eq!(
            tokens,
            vec![TokenKind::Number(5.0), TokenKind::Dot, TokenKind::Eof]
        );
    }

    #[test]
    fn test_strings() {
        let tokens = lex(r#""ola" 'mundo' "com \"aspas\"" "linha\nnova""#);
        assert_eq!(
            tokens,
            vec![
                TokenKind::Str("ola".to_string()),
                TokenKind::Str("mundo".to_string()),
                TokenKind::Str("com \"aspas\"".to_string()),
                TokenKind::Str("linha\nnova".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unknown_escape_kept() {
        let tokens = lex(r#""a\qb""#);
        assert_eq!(
            tokens,
            vec![TokenKind::Str("aqb".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_template_string() {
        let tokens = lex("`Ola, ${nome}!`");
        assert_eq!(
            tokens,
            vec![
                TokenKind::TemplateStr("Ola, ${nome}!".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_template_escaped_backtick() {
        // The escaped back-tick stays in the body; the template closes
        // at the next unescaped one
        let tokens = lex(r"x = `a\`b`;");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("x".to_string()),
                TokenKind::Eq,
                TokenKind::TemplateStr(r"a\`b".to_string()),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_template_trailing_backslash_is_unterminated() {
        let err = Lexer::new(r"`abc\").tokenize().unwrap_err();
        assert!(err.to_string().contains("unterminated template"));
    }

    #[test]
    fn test_identifiers() {
        let tokens = lex("soma _interno $el nome2 ação");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("soma".to_string()),
                TokenKind::Ident("_interno".to_string()),
                TokenKind::Ident("$el".to_string()),
                TokenKind::Ident("nome2".to_string()),
                TokenKind::Ident("ação".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = lex("a // comentario\nb /* bloco\nlongo */ c");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Ident("b".to_string()),
                TokenKind::Ident("c".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_tracking() {
        let tokens = lex_tokens("a\nb\n  c");
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 3]);
    }

    #[test]
    fn test_line_tracking_through_comments() {
        let tokens = lex_tokens("a /* primeiro\nsegundo */ b");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"sem fim").tokenize().unwrap_err();
        assert!(err.to_string().contains("unterminated string"));
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_unterminated_template() {
        let err = Lexer::new("`sem fim").tokenize().unwrap_err();
        assert!(err.to_string().contains("unterminated template"));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("variavel x = 1;\n@").tokenize().unwrap_err();
        assert!(err.to_string().contains("unexpected character: @"));
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_sample_code() {
        let tokens = lex(r#"
            funcao soma(a, b) {
                retornar a mais b;
            }

            variavel total = soma(2, 3);
        "#);

        assert!(tokens.len() > 15);
        assert!(matches!(tokens.last(), Some(TokenKind::Eof)));
        assert!(tokens.contains(&TokenKind::Keyword(Keyword::Function)));
        assert!(tokens.contains(&TokenKind::Plus));
    }
}
