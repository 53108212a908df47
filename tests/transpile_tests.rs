//! Integration tests for the full compile pipeline and both code
//! generation targets.

use stackc::parser::{Program, Stmt, StmtKind};
use stackc::{
    compile, transpile, SourceSpan, StackError, Target, TranspileOptions,
};

fn compile_to(source: &str, target: &str) -> String {
    compile(source, target, &TranspileOptions::default())
        .unwrap()
        .code
}

#[test]
fn function_declaration_to_javascript() {
    let code = compile_to("funcao soma(a, b) { retornar a mais b; }", "javascript");
    assert_eq!(code, "function soma(a, b) {\n  return a + b;\n}\n");
}

#[test]
fn variable_assignment_to_python_has_no_semicolon() {
    let code = compile_to("variavel x = 10 mais 5;", "python");
    assert!(code.contains("x = 10 + 5\n"));
    assert!(!code.contains("x = 10 + 5;"));
}

#[test]
fn if_else_to_both_targets() {
    let source = "se (a maior b) { retornar a; } senao { retornar b; }";

    let js = compile_to(source, "javascript");
    assert_eq!(js, "if (a > b) {\n  return a;\n} else {\n  return b;\n}\n");

    let py = compile_to(source, "python");
    assert!(py.contains("if a > b:\n    return a\nelse:\n    return b\n"));
}

#[test]
fn every_binary_word_operator_renders_its_symbol() {
    for (word, symbol) in stackc::lexer::WORD_OPERATORS {
        if *word == "nao" {
            continue;
        }
        let source = format!("x = a {} b;", word);
        let js = compile_to(&source, "javascript");
        assert!(
            js.contains(&format!(" {} ", symbol)),
            "{} should render {} in JavaScript, got {}",
            word,
            symbol,
            js
        );
    }
}

#[test]
fn logical_word_operators_use_python_spellings() {
    assert!(compile_to("x = a e b;", "python").contains("a and b"));
    assert!(compile_to("x = a ou b;", "python").contains("a or b"));
    assert!(compile_to("x = nao a;", "python").contains("not a"));

    assert!(compile_to("x = a e b;", "javascript").contains("a && b"));
    assert!(compile_to("x = a ou b;", "javascript").contains("a || b"));
    assert!(compile_to("x = nao a;", "javascript").contains("!a"));
}

#[test]
fn component_renders_react_class_in_javascript() {
    let code = compile_to(
        "componente Botao { render() { retornar nulo; } }",
        "javascript",
    );
    assert!(code.contains("class Botao extends React.Component {"));
    assert!(code.contains("render() {"));
}

#[test]
fn template_strings_per_target() {
    let js = compile_to("x = `Ola, ${nome}!`;", "javascript");
    assert!(js.contains("`Ola, ${nome}!`"));

    let py = compile_to("x = `Ola, ${nome}!`;", "python");
    assert!(py.contains("f\"Ola, {nome}!\""));
}

#[test]
fn es5_option_switches_function_form() {
    let options = TranspileOptions {
        es6: false,
        ..Default::default()
    };
    let output = compile("funcao f() { retornar 1; }", "javascript", &options).unwrap();
    assert!(output.code.starts_with("var f = function() {"));
}

#[test]
fn minify_option_collapses_javascript() {
    let options = TranspileOptions {
        minify: true,
        ..Default::default()
    };
    let output = compile("funcao f() { retornar 1; }", "javascript", &options).unwrap();
    assert!(!output.code.contains('\n'));
    assert!(output.code.contains("function f()"));
}

#[test]
fn webassembly_target_returns_placeholder() {
    let output = compile("variavel x = 1;", "webassembly", &TranspileOptions::default()).unwrap();
    assert!(output.code.contains("WebAssembly transpilation"));
    assert!(output.source_map.is_none());
}

#[test]
fn unknown_target_is_a_transpile_error() {
    let err = compile("variavel x = 1;", "ruby", &TranspileOptions::default()).unwrap_err();
    match err {
        StackError::Transpiler { ref message } => {
            assert!(message.contains("unsupported target language"));
        }
        other => panic!("expected a transpiler error, got {:?}", other),
    }
}

#[test]
fn source_map_stub_accompanies_supported_targets() {
    let output = compile(
        "variavel x = 1;",
        "javascript",
        &TranspileOptions::default(),
    )
    .unwrap();
    let map = output.source_map.expect("source map requested by default");
    assert_eq!(map.version, 3);
    assert_eq!(map.mappings, "AAAA");

    let options = TranspileOptions {
        source_maps: false,
        ..Default::default()
    };
    let output = compile("variavel x = 1;", "python", &options).unwrap();
    assert!(output.source_map.is_none());
}

#[test]
fn python_output_lists_its_imports() {
    let output = compile("variavel x = 1;", "python", &TranspileOptions::default()).unwrap();
    assert_eq!(output.imports.len(), 3);
    assert!(output.imports.contains(&"import sys".to_string()));

    let output = compile(
        "variavel x = 1;",
        "javascript",
        &TranspileOptions::default(),
    )
    .unwrap();
    assert!(output.imports.is_empty());
}

#[test]
fn unrenderable_nodes_degrade_to_comments() {
    let program = Program {
        statements: vec![Stmt {
            kind: StmtKind::Error,
            span: SourceSpan::new(0, 0),
        }],
    };

    let js = transpile(&program, Target::JavaScript, &TranspileOptions::default()).unwrap();
    assert!(js.code.contains("// skipped statement"));

    let py = transpile(&program, Target::Python, &TranspileOptions::default()).unwrap();
    assert!(py.code.contains("# skipped statement"));
}

#[test]
fn lexical_failures_surface_through_compile() {
    let err = compile("\"abc", "javascript", &TranspileOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Lexer error"));
}

#[test]
fn parse_failures_surface_through_compile() {
    let err = compile("variavel = 1;", "javascript", &TranspileOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Parser error"));
}

#[test]
fn nested_program_compiles_to_both_targets() {
    let source = r#"
        classe Calculadora {
            dobrar(n) {
                retornar n vezes 2;
            }
        }

        funcao principal() {
            variavel c = novo_calculadora();
            para (variavel i = 0; i menor 3; i = i mais 1) {
                tentar {
                    c.dobrar(i);
                } capturar (erro) {
                    retornar erro;
                }
            }
            retornar verdadeiro;
        }
    "#;

    let js = compile_to(source, "javascript");
    assert!(js.contains("class Calculadora {"));
    assert!(js.contains("for (let i = 0; i < 3; i = i + 1) {"));
    assert!(js.contains("} catch (erro) {"));

    let py = compile_to(source, "python");
    assert!(py.contains("class Calculadora:"));
    assert!(py.contains("def dobrar(n):"));
    assert!(py.contains("except Exception as erro:"));
}
