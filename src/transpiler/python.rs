//! Python code generator

use super::{escape_string_literal, logical_op_symbol, unary_op_symbol, CodeGenerator, Target};
use crate::errors::StackResult;
use crate::parser::{
    ClassDecl, ComponentDecl, Expr, ExprKind, FunctionDecl, LiteralValue, Program, Stmt, StmtKind,
};

/// Python code generator
pub struct PythonGenerator {
    /// Current indentation level
    indent: usize,
    /// Output buffer
    output: String,
    /// Modules the generated code imports
    imports: Vec<String>,
}

impl PythonGenerator {
    /// Create a new Python generator
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::new(),
            imports: vec![
                "import sys".to_string(),
                "import os".to_string(),
                "from typing import *".to_string(),
            ],
        }
    }

    /// Write a string to the output
    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write a line with indentation
    fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write indentation
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    /// Increase indentation
    fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation
    fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    fn param_list(f: &FunctionDecl) -> String {
        f.params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Generate a statement
    fn generate_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Function(f) => self.generate_function(f),
            StmtKind::Class(c) => self.generate_class(c),
            StmtKind::Component(c) => self.generate_component(c),
            StmtKind::Var {
                name, initializer, ..
            } => {
                self.write_indent();
                self.write(&name.name);
                self.write(" = ");
                match initializer {
                    Some(init) => self.generate_expr(init),
                    // Python has no bare declaration form
                    None => self.write("None"),
                }
                self.write("\n");
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write_indent();
                self.write("if ");
                self.generate_expr(condition);
                self.write(":\n");
                self.indent();
                self.generate_suite_stmt(then_branch);
                self.dedent();
                if let Some(else_branch) = else_branch {
                    self.writeln("else:");
                    self.indent();
                    self.generate_suite_stmt(else_branch);
                    self.dedent();
                }
            }
            StmtKind::While { condition, body } => {
                self.write_indent();
                self.write("while ");
                self.generate_expr(condition);
                self.write(":\n");
                self.indent();
                self.generate_suite_stmt(body);
                self.dedent();
            }
            StmtKind::For {
                condition, body, ..
            } => {
                // The three-clause form degrades to a range() loop; the
                // initializer and increment clauses are dropped
                self.write_indent();
                self.write("for i in range(");
                if let Some(cond) = condition {
                    self.generate_expr(cond);
                }
                self.write("):\n");
                self.indent();
                self.generate_suite_stmt(body);
                self.dedent();
            }
            StmtKind::Return(value) => {
                self.write_indent();
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.generate_expr(value);
                }
                self.write("\n");
            }
            StmtKind::Try {
                try_block,
                catch,
                finally_block,
            } => {
                self.writeln("try:");
                self.indent();
                self.generate_suite(&try_block.stmts);
                self.dedent();
                if let Some(catch) = catch {
                    self.writeln(&format!("except Exception as {}:", catch.name.name));
                    self.indent();
                    self.generate_suite(&catch.body.stmts);
                    self.dedent();
                }
                if let Some(finally) = finally_block {
                    self.writeln("finally:");
                    self.indent();
                    self.generate_suite(&finally.stmts);
                    self.dedent();
                } else if catch.is_none() {
                    // a handler-less try needs a finally arm to stay valid
                    self.writeln("finally:");
                    self.indent();
                    self.writeln("pass");
                    self.dedent();
                }
            }
            StmtKind::Block(block) => self.generate_suite(&block.stmts),
            StmtKind::Expr(expr) => {
                self.write_indent();
                self.generate_expr(expr);
                self.write("\n");
            }
            StmtKind::Error => {
                self.writeln("# skipped statement that failed to parse");
            }
        }
    }

    /// Generate an indented suite, padding with `pass` when nothing
    /// executable remains
    fn generate_suite(&mut self, stmts: &[Stmt]) {
        let has_real = stmts.iter().any(|s| !matches!(s.kind, StmtKind::Error));

        for stmt in stmts {
            self.generate_stmt(stmt);
        }

        if !has_real {
            self.writeln("pass");
        }
    }

    /// Generate a branch or loop body as a suite, flattening a braced
    /// block
    fn generate_suite_stmt(&mut self, stmt: &Stmt) {
        if let StmtKind::Block(block) = &stmt.kind {
            self.generate_suite(&block.stmts);
        } else {
            self.generate_suite(std::slice::from_ref(stmt));
        }
    }

    fn generate_function(&mut self, f: &FunctionDecl) {
        let params = Self::param_list(f);
        self.writeln(&format!("def {}({}):", f.name.name, params));
        self.indent();
        self.generate_suite(&f.body.stmts);
        self.dedent();
    }

    fn generate_class(&mut self, c: &ClassDecl) {
        let header = match &c.superclass {
            Some(superclass) => format!("class {}({}):", c.name.name, superclass.name),
            None => format!("class {}:", c.name.name),
        };
        self.writeln(&header);
        self.indent();
        if c.methods.is_empty() {
            self.writeln("pass");
        } else {
            for method in &c.methods {
                self.generate_function(method);
            }
        }
        self.dedent();
    }

    fn generate_component(&mut self, c: &ComponentDecl) {
        self.writeln(&format!("class {}:", c.name.name));
        self.indent();
        if c.methods.is_empty() {
            self.writeln("pass");
        } else {
            for method in &c.methods {
                self.generate_function(method);
            }
        }
        self.dedent();
    }

    /// Generate an expression
    fn generate_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(value) => self.generate_literal(value),
            ExprKind::Variable(name) => self.write(&name.name),
            ExprKind::Binary { left, op, right } => {
                self.generate_expr(left);
                self.write(&format!(" {} ", op.symbol()));
                self.generate_expr(right);
            }
            ExprKind::Logical { left, op, right } => {
                self.generate_expr(left);
                self.write(&format!(" {} ", logical_op_symbol(Target::Python, *op)));
                self.generate_expr(right);
            }
            ExprKind::Unary { op, operand } => {
                self.write(unary_op_symbol(Target::Python, *op));
                self.generate_expr(operand);
            }
            ExprKind::Call { callee, args } => {
                self.generate_expr(callee);
                self.write("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.generate_expr(arg);
                }
                self.write(")");
            }
            ExprKind::Get { object, name } => {
                self.generate_expr(object);
                self.write(".");
                self.write(&name.name);
            }
            ExprKind::Assign { name, value } => {
                self.write(&name.name);
                self.write(" = ");
                self.generate_expr(value);
            }
            ExprKind::Grouping(inner) => {
                self.write("(");
                self.generate_expr(inner);
                self.write(")");
            }
        }
    }

    fn generate_literal(&mut self, value: &LiteralValue) {
        match value {
            LiteralValue::Number(n) => self.write(&n.to_string()),
            LiteralValue::Str(s) => {
                let escaped = escape_string_literal(s);
                self.write(&format!("\"{}\"", escaped));
            }
            // Template bodies become f-strings; `${` interpolation
            // markers rewrite to bare braces
            LiteralValue::Template(s) => {
                let body = escape_string_literal(s).replace("${", "{");
                self.write(&format!("f\"{}\"", body));
            }
            LiteralValue::Bool(true) => self.write("True"),
            LiteralValue::Bool(false) => self.write("False"),
            LiteralValue::Null => self.write("None"),
            // Python has no undefined; None stands in
            LiteralValue::Undefined => self.write("None"),
        }
    }
}

impl Default for PythonGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for PythonGenerator {
    fn generate(&mut self, program: &Program) -> StackResult<String> {
        self.output.clear();

        let imports = self.imports.clone();
        for import in &imports {
            self.writeln(import);
        }

        for stmt in &program.statements {
            self.writeln("");
            self.generate_stmt(stmt);
        }

        Ok(self.output.clone())
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn language_name(&self) -> &'static str {
        "Python"
    }

    fn imports(&self) -> Vec<String> {
        self.imports.clone()
    }
}
