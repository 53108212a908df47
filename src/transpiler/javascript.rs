//! JavaScript code generator

use super::{escape_string_literal, logical_op_symbol, unary_op_symbol, CodeGenerator, Target};
use crate::errors::StackResult;
use crate::parser::{
    Block, ClassDecl, ComponentDecl, Expr, ExprKind, FunctionDecl, LiteralValue, Program, Stmt,
    StmtKind,
};

/// JavaScript code generator
pub struct JavaScriptGenerator {
    /// Current indentation level
    indent: usize,
    /// Output buffer
    output: String,
    /// Emit modern syntax; `false` selects ES5 fallbacks
    es6: bool,
}

impl JavaScriptGenerator {
    /// Create a new JavaScript generator
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::new(),
            es6: true,
        }
    }

    /// Set whether to emit modern (ES6) syntax
    pub fn with_es6(mut self, es6: bool) -> Self {
        self.es6 = es6;
        self
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
            self.output.push_str("  ");
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
                name,
                initializer,
                is_const,
            } => {
                self.write_indent();
                self.write(if *is_const { "const " } else { "let " });
                self.write(&name.name);
                if let Some(init) = initializer {
                    self.write(" = ");
                    self.generate_expr(init);
                }
                self.write(";\n");
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write_indent();
                self.write("if (");
                self.generate_expr(condition);
                self.write(") {\n");
                self.indent();
                self.generate_branch(then_branch);
                self.dedent();
                if let Some(else_branch) = else_branch {
                    self.writeln("} else {");
                    self.indent();
                    self.generate_branch(else_branch);
                    self.dedent();
                }
                self.writeln("}");
            }
            StmtKind::While { condition, body } => {
                self.write_indent();
                self.write("while (");
                self.generate_expr(condition);
                self.write(") {\n");
                self.indent();
                self.generate_branch(body);
                self.dedent();
                self.writeln("}");
            }
            StmtKind::For {
                initializer,
                condition,
                increment,
                body,
            } => {
                self.write_indent();
                self.write("for (");
                if let Some(init) = initializer {
                    self.generate_for_init(init);
                }
                self.write("; ");
                if let Some(cond) = condition {
                    self.generate_expr(cond);
                }
                self.write("; ");
                if let Some(incr) = increment {
                    self.generate_expr(incr);
                }
                self.write(") {\n");
                self.indent();
                self.generate_branch(body);
                self.dedent();
                self.writeln("}");
            }
            StmtKind::Return(value) => {
                self.write_indent();
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.generate_expr(value);
                }
                self.write(";\n");
            }
            StmtKind::Try {
                try_block,
                catch,
                finally_block,
            } => {
                self.writeln("try {");
                self.indent();
                self.generate_block_stmts(try_block);
                self.dedent();
                if let Some(catch) = catch {
                    self.writeln(&format!("}} catch ({}) {{", catch.name.name));
                    self.indent();
                    self.generate_block_stmts(&catch.body);
                    self.dedent();
                }
                if let Some(finally) = finally_block {
                    self.writeln("} finally {");
                    self.indent();
                    self.generate_block_stmts(finally);
                    self.dedent();
                } else if catch.is_none() {
                    // a handler-less try needs a finally arm to stay valid
                    self.writeln("} finally {");
                }
                self.writeln("}");
            }
            StmtKind::Block(block) => {
                self.writeln("{");
                self.indent();
                self.generate_block_stmts(block);
                self.dedent();
                self.writeln("}");
            }
            StmtKind::Expr(expr) => {
                self.write_indent();
                self.generate_expr(expr);
                self.write(";\n");
            }
            StmtKind::Error => {
                self.writeln("// skipped statement that failed to parse");
            }
        }
    }

    fn generate_block_stmts(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.generate_stmt(stmt);
        }
    }

    /// Generate a branch or loop body, flattening a braced block
    fn generate_branch(&mut self, stmt: &Stmt) {
        if let StmtKind::Block(block) = &stmt.kind {
            self.generate_block_stmts(block);
        } else {
            self.generate_stmt(stmt);
        }
    }

    /// Render a for-loop initializer without its trailing semicolon
    fn generate_for_init(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Var {
                name,
                initializer,
                is_const,
            } => {
                self.write(if *is_const { "const " } else { "let " });
                self.write(&name.name);
                if let Some(init) = initializer {
                    self.write(" = ");
                    self.generate_expr(init);
                }
            }
            StmtKind::Expr(expr) => self.generate_expr(expr),
            // The parser only builds Var or Expr initializers
            _ => {}
        }
    }

    fn generate_function(&mut self, f: &FunctionDecl) {
        let params = Self::param_list(f);
        if self.es6 {
            self.writeln(&format!("function {}({}) {{", f.name.name, params));
            self.indent();
            self.generate_block_stmts(&f.body);
            self.dedent();
            self.writeln("}");
        } else {
            self.writeln(&format!("var {} = function({}) {{", f.name.name, params));
            self.indent();
            self.generate_block_stmts(&f.body);
            self.dedent();
            self.writeln("};");
        }
    }

    /// Generate a class method in shorthand form
    fn generate_method(&mut self, f: &FunctionDecl) {
        let params = Self::param_list(f);
        self.writeln(&format!("{}({}) {{", f.name.name, params));
        self.indent();
        self.generate_block_stmts(&f.body);
        self.dedent();
        self.writeln("}");
    }

    fn generate_class(&mut self, c: &ClassDecl) {
        if self.es6 {
            let header = match &c.superclass {
                Some(superclass) => {
                    format!("class {} extends {} {{", c.name.name, superclass.name)
                }
                None => format!("class {} {{", c.name.name),
            };
            self.writeln(&header);
            self.indent();
            for method in &c.methods {
                self.generate_method(method);
            }
            self.dedent();
            self.writeln("}");
        } else {
            // ES5 has no class syntax: a constructor function stands in
            // and methods become plain function assignments after it
            self.writeln(&format!("function {}() {{", c.name.name));
            self.writeln("}");
            for method in &c.methods {
                self.generate_function(method);
            }
        }
    }

    /// React components always render as ES6 classes
    fn generate_component(&mut self, c: &ComponentDecl) {
        self.writeln(&format!("class {} extends React.Component {{", c.name.name));
        self.indent();
        for method in &c.methods {
            self.generate_method(method);
        }
        self.dedent();
        self.writeln("}");
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
                self.write(&format!(
                    " {} ",
                    logical_op_symbol(Target::JavaScript, *op)
                ));
                self.generate_expr(right);
            }
            ExprKind::Unary { op, operand } => {
                self.write(unary_op_symbol(Target::JavaScript, *op));
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
            // Template bodies pass through with their `${}` markers intact
            LiteralValue::Template(s) => self.write(&format!("`{}`", s)),
            LiteralValue::Bool(true) => self.write("true"),
            LiteralValue::Bool(false) => self.write("false"),
            LiteralValue::Null => self.write("null"),
            LiteralValue::Undefined => self.write("undefined"),
        }
    }
}

impl Default for JavaScriptGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for JavaScriptGenerator {
    fn generate(&mut self, program: &Program) -> StackResult<String> {
        self.output.clear();

        for stmt in &program.statements {
            self.generate_stmt(stmt);
        }

        Ok(self.output.clone())
    }

    fn file_extension(&self) -> &'static str {
        "js"
    }

    fn language_name(&self) -> &'static str {
        "JavaScript"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn gen(source: &str) -> String {
        let tokens = Lexer::new(source).tokenize().unwrap();
        let program = Parser::new(tokens).parse().into_result().unwrap();
        JavaScriptGenerator::new().generate(&program).unwrap()
    }

    fn gen_es5(source: &str) -> String {
        let tokens = Lexer::new(source).tokenize().unwrap();
        let program = Parser::new(tokens).parse().into_result().unwrap();
        JavaScriptGenerator::new()
            .with_es6(false)
            .generate(&program)
            .unwrap()
    }

    #[test]
    fn test_function_declaration() {
        let code = gen("funcao soma(a, b) { retornar a mais b; }");
        assert_eq!(code, "function soma(a, b) {\n  return a + b;\n}\n");
    }

    #[test]
    fn test_function_declaration_es5() {
        let code = gen_es5("funcao soma(a, b) { retornar a mais b; }");
        assert_eq!(code, "var soma = function(a, b) {\n  return a + b;\n};\n");
    }

    #[test]
    fn test_variable_declarations() {
        let code = gen("variavel x = 10;\nconstante PI = 3.14;\nvariavel y;");
        assert_eq!(code, "let x = 10;\nconst PI = 3.14;\nlet y;\n");
    }

    #[test]
    fn test_whole_numbers_drop_fraction() {
        let code = gen("variavel x = 10.0;");
        assert_eq!(code, "let x = 10;\n");
    }

    #[test]
    fn test_if_else() {
        let code = gen("se (x maior 5) { y = 1; } senao { y = 2; }");
        assert_eq!(code, "if (x > 5) {\n  y = 1;\n} else {\n  y = 2;\n}\n");
    }

    #[test]
    fn test_while_with_single_statement_body() {
        let code = gen("enquanto (x menor 10) x = x mais 1;");
        assert_eq!(code, "while (x < 10) {\n  x = x + 1;\n}\n");
    }

    #[test]
    fn test_for_loop() {
        let code = gen("para (variavel i = 0; i menor 10; i = i mais 1) { soma(i); }");
        assert_eq!(
            code,
            "for (let i = 0; i < 10; i = i + 1) {\n  soma(i);\n}\n"
        );
    }

    #[test]
    fn test_for_loop_empty_clauses() {
        let code = gen("para (;;) { x = 1; }");
        assert!(code.starts_with("for (; ; ) {"));
    }

    #[test]
    fn test_class_with_superclass() {
        let code = gen("classe Cachorro < Animal { latir() { retornar 1; } }");
        assert_eq!(
            code,
            "class Cachorro extends Animal {\n  latir() {\n    return 1;\n  }\n}\n"
        );
    }

    #[test]
    fn test_class_es5_fallback() {
        let code = gen_es5("classe Cachorro { latir() { retornar 1; } }");
        assert!(code.contains("function Cachorro() {"));
        assert!(code.contains("var latir = function() {"));
    }

    #[test]
    fn test_component_extends_react() {
        let code = gen("componente Botao { render() { retornar nulo; } }");
        assert_eq!(
            code,
            "class Botao extends React.Component {\n  render() {\n    return null;\n  }\n}\n"
        );
    }

    #[test]
    fn test_try_catch_finally() {
        let code = gen("tentar { a(); } capturar (erro) { b(); } finalmente { c(); }");
        assert_eq!(
            code,
            "try {\n  a();\n} catch (erro) {\n  b();\n} finally {\n  c();\n}\n"
        );
    }

    #[test]
    fn test_try_without_handlers_gets_finally() {
        let code = gen("tentar { a(); }");
        assert_eq!(code, "try {\n  a();\n} finally {\n}\n");
    }

    #[test]
    fn test_literal_keywords() {
        let code = gen("variavel a = verdadeiro;\nvariavel b = nulo;\nvariavel c = vazio;");
        assert_eq!(code, "let a = true;\nlet b = null;\nlet c = undefined;\n");
    }

    #[test]
    fn test_template_literal_passthrough() {
        let code = gen("x = `Ola, ${nome}!`;");
        assert_eq!(code, "x = `Ola, ${nome}!`;\n");
    }

    #[test]
    fn test_string_escapes() {
        let code = gen("variavel s = \"linha\\numa \\\"citacao\\\"\";");
        assert_eq!(code, "let s = \"linha\\numa \\\"citacao\\\"\";\n");
    }

    #[test]
    fn test_unary_binds_tighter_than_logical() {
        let code = gen("x = nao a e b;");
        assert_eq!(code, "x = !a && b;\n");
    }

    #[test]
    fn test_grouping_keeps_parentheses() {
        let code = gen("x = (a mais b) vezes c;");
        assert_eq!(code, "x = (a + b) * c;\n");
    }

    #[test]
    fn test_method_call_chain() {
        let code = gen("console.log(soma(1, 2));");
        assert_eq!(code, "console.log(soma(1, 2));\n");
    }

    #[test]
    fn test_error_statement_renders_comment() {
        let tokens = Lexer::new("variavel = 1;").tokenize().unwrap();
        let outcome = Parser::new(tokens).parse();
        assert!(outcome.has_errors());

        let code = JavaScriptGenerator::new()
            .generate(&outcome.program)
            .unwrap();
        assert!(code.contains("// skipped statement that failed to parse"));
    }

    #[test]
    fn test_return_without_value() {
        let code = gen("funcao parar() { retornar; }");
        assert_eq!(code, "function parar() {\n  return;\n}\n");
    }
}
