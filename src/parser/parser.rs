//! Recursive descent parser for Stack Extensão
//!
//! Parses a token stream into an AST. A malformed declaration is
//! reported and skipped, leaving a placeholder node, so a single
//! mistake does not hide the rest of the program.

use super::ast::*;
use crate::errors::{SourceSpan, StackError, StackResult};
use crate::lexer::{Keyword, Token, TokenKind};

/// The result of a parse: the program plus every error that was
/// recovered from along the way
#[derive(Debug)]
pub struct ParseOutcome {
    pub program: Program,
    pub diagnostics: Vec<StackError>,
}

impl ParseOutcome {
    /// Check whether parsing reported any errors
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Convert to a result, failing with the first diagnostic
    pub fn into_result(self) -> StackResult<Program> {
        let mut diagnostics = self.diagnostics;
        if diagnostics.is_empty() {
            Ok(self.program)
        } else {
            Err(diagnostics.remove(0))
        }
    }
}

/// The parser for Stack Extensão token streams
pub struct Parser {
    /// Tokens from the lexer
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Errors recovered from so far
    diagnostics: Vec<StackError>,
}

impl Parser {
    /// Create a new parser for the given tokens
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // The stream must end with EOF for peek() to be total
        if !tokens.last().is_some_and(|t| t.kind.is_eof()) {
            let span = tokens
                .last()
                .map(|t| SourceSpan::new(t.span.end, t.span.end))
                .unwrap_or_else(|| SourceSpan::new(0, 0));
            let line = tokens.last().map(|t| t.line).unwrap_or(1);
            tokens.push(Token::new(TokenKind::Eof, span, line));
        }

        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Parse the token stream into a program
    pub fn parse(mut self) -> ParseOutcome {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_declaration());
        }

        ParseOutcome {
            program: Program { statements },
            diagnostics: self.diagnostics,
        }
    }

    // ==================== Helpers ====================

    /// Check if we've reached EOF
    fn is_at_end(&self) -> bool {
        self.peek().kind.is_eof()
    }

    /// Peek at the current token
    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("tokens should have at least EOF"))
    }

    /// Get the current token's span
    fn current_span(&self) -> SourceSpan {
        self.peek().span
    }

    /// Advance and return the previous token
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    /// Get the previous token
    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Check if current token matches
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Check if current token is a keyword
    fn check_keyword(&self, kw: Keyword) -> bool {
        matches!(&self.peek().kind, TokenKind::Keyword(k) if *k == kw)
    }

    /// Create a parser error at the current token
    fn error_here(&self, message: impl Into<String>) -> StackError {
        StackError::parser(message, self.peek().line, self.current_span())
    }

    /// Consume a token if it matches, otherwise error
    fn expect(&mut self, kind: &TokenKind, msg: &str) -> StackResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(format!("{}, found {}", msg, self.peek().kind)))
        }
    }

    /// Consume a keyword if it matches, otherwise error
    fn expect_keyword(&mut self, kw: Keyword, msg: &str) -> StackResult<SourceSpan> {
        if self.check_keyword(kw) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.error_here(format!("{}, found {}", msg, self.peek().kind)))
        }
    }

    /// Consume token if it matches
    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume keyword if it matches
    fn match_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Parse an identifier
    fn parse_ident(&mut self) -> StackResult<Ident> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let span = self.current_span();
                self.advance();
                Ok(Ident::new(name, span))
            }
            _ => Err(self.error_here(format!(
                "expected identifier, found {}",
                self.peek().kind
            ))),
        }
    }

    /// Discard tokens until a likely statement boundary
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            if let TokenKind::Keyword(kw) = self.peek().kind {
                match kw {
                    Keyword::Class
                    | Keyword::Function
                    | Keyword::Var
                    | Keyword::Const
                    | Keyword::If
                    | Keyword::While
                    | Keyword::For
                    | Keyword::Return => return,
                    _ => {}
                }
            }

            self.advance();
        }
    }

    // ==================== Declarations ====================

    /// Parse one declaration, recovering to a statement boundary on error
    fn parse_declaration(&mut self) -> Stmt {
        let start = self.current_span();

        match self.try_parse_declaration() {
            Ok(stmt) => stmt,
            Err(err) => {
                self.diagnostics.push(err);
                self.synchronize();
                let span = start.merge(self.previous().span);
                Stmt {
                    kind: StmtKind::Error,
                    span,
                }
            }
        }
    }

    fn try_parse_declaration(&mut self) -> StackResult<Stmt> {
        if self.check_keyword(Keyword::Function) {
            return self.parse_function_declaration();
        }
        if self.check_keyword(Keyword::Class) {
            return self.parse_class_declaration();
        }
        if self.check_keyword(Keyword::Component) {
            return self.parse_component_declaration();
        }
        if self.check_keyword(Keyword::Var) || self.check_keyword(Keyword::Const) {
            return self.parse_var_declaration();
        }
        self.parse_statement()
    }

    fn parse_function_declaration(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Function, "expected 'funcao'")?;

        let function = self.parse_function()?;
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::Function(function),
            span,
        })
    }

    /// Parse a function's name, parameters and body
    ///
    /// Also used for class and component methods, which are written
    /// without the `funcao` keyword.
    fn parse_function(&mut self) -> StackResult<FunctionDecl> {
        let name = self.parse_ident()?;
        self.expect(&TokenKind::LParen, "expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                if params.len() >= 255 {
                    return Err(self.error_here("cannot have more than 255 parameters"));
                }
                params.push(self.parse_ident()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(&TokenKind::RParen, "expected ')' after parameters")?;
        self.expect(&TokenKind::LBrace, "expected '{' before function body")?;
        let body = self.parse_block()?;

        Ok(FunctionDecl { name, params, body })
    }

    fn parse_class_declaration(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Class, "expected 'classe'")?;
        let name = self.parse_ident()?;

        let superclass = if self.match_token(&TokenKind::Lt) {
            Some(self.parse_ident()?)
        } else {
            None
        };

        self.expect(&TokenKind::LBrace, "expected '{' before class body")?;

        let mut methods = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            methods.push(self.parse_function()?);
        }

        self.expect(&TokenKind::RBrace, "expected '}' after class body")?;
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::Class(ClassDecl {
                name,
                superclass,
                methods,
            }),
            span,
        })
    }

    fn parse_component_declaration(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Component, "expected 'componente'")?;
        let name = self.parse_ident()?;

        self.expect(&TokenKind::LBrace, "expected '{' before component body")?;

        let mut methods = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            methods.push(self.parse_function()?);
        }

        self.expect(&TokenKind::RBrace, "expected '}' after component body")?;
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::Component(ComponentDecl { name, methods }),
            span,
        })
    }

    fn parse_var_declaration(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        let is_const = self.match_keyword(Keyword::Const);
        if !is_const {
            self.expect_keyword(Keyword::Var, "expected 'variavel' or 'constante'")?;
        }

        let name = self.parse_ident()?;

        let initializer = if self.match_token(&TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(
            &TokenKind::Semicolon,
            "expected ';' after variable declaration",
        )?;
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::Var {
                name,
                initializer,
                is_const,
            },
            span,
        })
    }

    // ==================== Statements ====================

    fn parse_statement(&mut self) -> StackResult<Stmt> {
        if self.check_keyword(Keyword::If) {
            return self.parse_if();
        }
        if self.check_keyword(Keyword::While) {
            return self.parse_while();
        }
        if self.check_keyword(Keyword::For) {
            return self.parse_for();
        }
        if self.check_keyword(Keyword::Return) {
            return self.parse_return();
        }
        if self.check_keyword(Keyword::Try) {
            return self.parse_try();
        }
        if self.check(&TokenKind::LBrace) {
            return self.parse_block_statement();
        }
        self.parse_expression_statement()
    }

    fn parse_if(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect_keyword(Keyword::If, "expected 'se'")?;
        self.expect(&TokenKind::LParen, "expected '(' after 'se'")?;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::RParen, "expected ')' after condition")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_keyword(Keyword::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        let span = start.merge(self.previous().span);
        Ok(Stmt {
            kind: StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        })
    }

    fn parse_while(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect_keyword(Keyword::While, "expected 'enquanto'")?;
        self.expect(&TokenKind::LParen, "expected '(' after 'enquanto'")?;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::RParen, "expected ')' after condition")?;

        let body = Box::new(self.parse_statement()?);
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::While { condition, body },
            span,
        })
    }

    fn parse_for(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect_keyword(Keyword::For, "expected 'para'")?;
        self.expect(&TokenKind::LParen, "expected '(' after 'para'")?;

        let initializer = if self.match_token(&TokenKind::Semicolon) {
            None
        } else if self.check_keyword(Keyword::Var) || self.check_keyword(Keyword::Const) {
            Some(Box::new(self.parse_var_declaration()?))
        } else {
            Some(Box::new(self.parse_expression_statement()?))
        };

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semicolon, "expected ';' after loop condition")?;

        let increment = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::RParen, "expected ')' after for clauses")?;

        let body = Box::new(self.parse_statement()?);
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::For {
                initializer,
                condition,
                increment,
                body,
            },
            span,
        })
    }

    fn parse_return(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Return, "expected 'retornar'")?;

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(&TokenKind::Semicolon, "expected ';' after return value")?;
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::Return(value),
            span,
        })
    }

    fn parse_try(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Try, "expected 'tentar'")?;
        self.expect(&TokenKind::LBrace, "expected '{' after 'tentar'")?;
        let try_block = self.parse_block()?;

        let catch = if self.match_keyword(Keyword::Catch) {
            self.expect(&TokenKind::LParen, "expected '(' after 'capturar'")?;
            let name = self.parse_ident()?;
            self.expect(&TokenKind::RParen, "expected ')' after error name")?;
            self.expect(&TokenKind::LBrace, "expected '{' after catch clause")?;
            let body = self.parse_block()?;
            Some(CatchClause { name, body })
        } else {
            None
        };

        let finally_block = if self.match_keyword(Keyword::Finally) {
            self.expect(&TokenKind::LBrace, "expected '{' after 'finalmente'")?;
            Some(self.parse_block()?)
        } else {
            None
        };

        let span = start.merge(self.previous().span);
        Ok(Stmt {
            kind: StmtKind::Try {
                try_block,
                catch,
                finally_block,
            },
            span,
        })
    }

    fn parse_block_statement(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        self.expect(&TokenKind::LBrace, "expected '{'")?;
        let block = self.parse_block()?;
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::Block(block),
            span,
        })
    }

    /// Parse statements up to the closing brace
    ///
    /// The opening brace has already been consumed.
    fn parse_block(&mut self) -> StackResult<Block> {
        let start = self.previous().span;
        let mut stmts = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.parse_declaration());
        }

        self.expect(&TokenKind::RBrace, "expected '}' after block")?;
        let span = start.merge(self.previous().span);

        Ok(Block { stmts, span })
    }

    fn parse_expression_statement(&mut self) -> StackResult<Stmt> {
        let start = self.current_span();
        let expr = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon, "expected ';' after expression")?;
        let span = start.merge(self.previous().span);

        Ok(Stmt {
            kind: StmtKind::Expr(expr),
            span,
        })
    }

    // ==================== Expressions ====================

    fn make_binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        let span = left.span.merge(right.span);
        Expr {
            kind: ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        }
    }

    fn make_logical(left: Expr, op: LogicalOp, right: Expr) -> Expr {
        let span = left.span.merge(right.span);
        Expr {
            kind: ExprKind::Logical {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        }
    }

    fn parse_expression(&mut self) -> StackResult<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> StackResult<Expr> {
        let expr = self.parse_or()?;

        if self.match_token(&TokenKind::Eq) {
            let eq_line = self.previous().line;
            let eq_span = self.previous().span;
            let value = self.parse_assignment()?;

            return if let ExprKind::Variable(name) = expr.kind {
                let span = expr.span.merge(value.span);
                Ok(Expr {
                    kind: ExprKind::Assign {
                        name,
                        value: Box::new(value),
                    },
                    span,
                })
            } else {
                Err(StackError::parser(
                    "invalid assignment target",
                    eq_line,
                    eq_span,
                ))
            };
        }

        Ok(expr)
    }

    fn parse_or(&mut self) -> StackResult<Expr> {
        let mut expr = self.parse_and()?;

        while self.match_token(&TokenKind::PipePipe) {
            let right = self.parse_and()?;
            expr = Self::make_logical(expr, LogicalOp::Or, right);
        }

        Ok(expr)
    }

    fn parse_and(&mut self) -> StackResult<Expr> {
        let mut expr = self.parse_equality()?;

        while self.match_token(&TokenKind::AmpAmp) {
            let right = self.parse_equality()?;
            expr = Self::make_logical(expr, LogicalOp::And, right);
        }

        Ok(expr)
    }

    fn parse_equality(&mut self) -> StackResult<Expr> {
        let mut expr = self.parse_comparison()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::BangEq => BinaryOp::Ne,
                _ => break,
            };
            self.advance();

            let right = self.parse_comparison()?;
            expr = Self::make_binary(expr, op, right);
        }

        Ok(expr)
    }

    fn parse_comparison(&mut self) -> StackResult<Expr> {
        let mut expr = self.parse_term()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::Ge,
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::Le,
                _ => break,
            };
            self.advance();

            let right = self.parse_term()?;
            expr = Self::make_binary(expr, op, right);
        }

        Ok(expr)
    }

    fn parse_term(&mut self) -> StackResult<Expr> {
        let mut expr = self.parse_factor()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();

            let right = self.parse_factor()?;
            expr = Self::make_binary(expr, op, right);
        }

        Ok(expr)
    }

    fn parse_factor(&mut self) -> StackResult<Expr> {
        let mut expr = self.parse_unary()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::StarStar => BinaryOp::Pow,
                TokenKind::Percent => BinaryOp::Rem,
                _ => break,
            };
            self.advance();

            let right = self.parse_unary()?;
            expr = Self::make_binary(expr, op, right);
        }

        Ok(expr)
    }

    fn parse_unary(&mut self) -> StackResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        };

        if let Some(op) = op {
            let start = self.current_span();
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span);
            return Ok(Expr {
                kind: ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            });
        }

        self.parse_call()
    }

    fn parse_call(&mut self) -> StackResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(&TokenKind::LParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_token(&TokenKind::Dot) {
                let name = self.parse_ident()?;
                let span = expr.span.merge(name.span);
                expr = Expr {
                    kind: ExprKind::Get {
                        object: Box::new(expr),
                        name,
                    },
                    span,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> StackResult<Expr> {
        let mut args = Vec::new();

        if !self.check(&TokenKind::RParen) {
            loop {
                if args.len() >= 255 {
                    return Err(self.error_here("cannot have more than 255 arguments"));
                }
                args.push(self.parse_expression()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(&TokenKind::RParen, "expected ')' after arguments")?;
        let span = callee.span.merge(self.previous().span);

        Ok(Expr {
            kind: ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        })
    }

    fn parse_primary(&mut self) -> StackResult<Expr> {
        let span = self.current_span();

        let kind = match &self.peek().kind {
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                ExprKind::Literal(LiteralValue::Number(n))
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                ExprKind::Literal(LiteralValue::Str(s))
            }
            TokenKind::TemplateStr(s) => {
                let s = s.clone();
                self.advance();
                ExprKind::Literal(LiteralValue::Template(s))
            }
            TokenKind::True => {
                self.advance();
                ExprKind::Literal(LiteralValue::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Literal(LiteralValue::Bool(false))
            }
            TokenKind::Null => {
                self.advance();
                ExprKind::Literal(LiteralValue::Null)
            }
            TokenKind::Undefined => {
                self.advance();
                ExprKind::Literal(LiteralValue::Undefined)
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                ExprKind::Variable(Ident::new(name, span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen, "expected ')' after expression")?;
                let span = span.merge(self.previous().span);
                return Ok(Expr {
                    kind: ExprKind::Grouping(Box::new(inner)),
                    span,
                });
            }
            _ => {
                return Err(self.error_here(format!(
                    "expected expression, found {}",
                    self.peek().kind
                )));
            }
        };

        let span = span.merge(self.previous().span);
        Ok(Expr { kind, span })
    }
}
