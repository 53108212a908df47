//! Abstract Syntax Tree (AST) definitions for Stack Extensão
//!
//! These types represent the structure of a program after parsing.

use crate::errors::SourceSpan;

/// A complete parsed program
#[derive(Debug, Clone)]
pub struct Program {
    /// All top-level statements, in source order
    pub statements: Vec<Stmt>,
}

/// An identifier with source location
#[derive(Debug, Clone)]
pub struct Ident {
    pub name: String,
    pub span: SourceSpan,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A block of statements
#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: SourceSpan,
}

/// A function or method declaration
///
/// Used both for `funcao` declarations and for class/component
/// methods, which are written without the `funcao` keyword.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Block,
}

/// A class declaration with optional superclass
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: Ident,
    pub superclass: Option<Ident>,
    pub methods: Vec<FunctionDecl>,
}

/// A UI component declaration
#[derive(Debug, Clone)]
pub struct ComponentDecl {
    pub name: Ident,
    pub methods: Vec<FunctionDecl>,
}

/// A catch clause of a try statement: `capturar (erro) { ... }`
#[derive(Debug, Clone)]
pub struct CatchClause {
    pub name: Ident,
    pub body: Block,
}

/// A statement
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Function declaration: `funcao name(params) { body }`
    Function(FunctionDecl),
    /// Class declaration: `classe Name < Super { methods }`
    Class(ClassDecl),
    /// Component declaration: `componente Name { methods }`
    Component(ComponentDecl),
    /// Variable declaration: `variavel name = value;` or `constante name = value;`
    Var {
        name: Ident,
        initializer: Option<Expr>,
        is_const: bool,
    },
    /// If statement: `se (cond) stmt senao stmt`
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// While loop: `enquanto (cond) stmt`
    While { condition: Expr, body: Box<Stmt> },
    /// For loop: `para (init; cond; incr) stmt`
    For {
        initializer: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
    },
    /// Return statement: `retornar value;`
    Return(Option<Expr>),
    /// Try statement: `tentar { } capturar (e) { } finalmente { }`
    Try {
        try_block: Block,
        catch: Option<CatchClause>,
        finally_block: Option<Block>,
    },
    /// Braced block statement
    Block(Block),
    /// Expression statement
    Expr(Expr),
    /// Placeholder for a declaration the parser could not understand
    ///
    /// Produced during error recovery so that one bad declaration does
    /// not take the rest of the program with it.
    Error,
}

/// An expression
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Literal value
    Literal(LiteralValue),
    /// Variable reference
    Variable(Ident),
    /// Binary operation: `a + b`
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// Logical operation: `a && b`
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
    /// Unary operation: `!a`, `-a`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Function call: `callee(args)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// Property access: `object.name`
    Get { object: Box<Expr>, name: Ident },
    /// Assignment: `name = value`
    Assign { name: Ident, value: Box<Expr> },
    /// Parenthesized expression
    Grouping(Box<Expr>),
}

/// A literal value
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    Str(String),
    /// Template literal body, `${}` markers kept verbatim
    Template(String),
    Bool(bool),
    Null,
    Undefined,
}

/// Binary operators
///
/// These spell the same in JavaScript and Python, so the symbol lives
/// here; the target-dependent logical and unary spellings live with
/// the transpiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    /// The operator's spelling in the generated code
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}
