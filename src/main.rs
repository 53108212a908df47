//! Stack Extensão CLI - Portuguese-keyword scripting language compiler

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stackc::errors::{print_error, print_errors};
use stackc::parser::StmtKind;
use stackc::{transpile, Lexer, Parser, Target, TranspileOptions};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Stack Extensão Compiler");
        println!("Version {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage: stackc <command> [options]");
        println!();
        println!("Commands:");
        println!("  compile <file> [-t <target>] [-o <output>] [--minify] [--no-source-map] [--es5]");
        println!("                         Compile to target language (default: javascript)");
        println!("  parse <file>           Parse and list top-level declarations");
        println!("  operators              List the word-operator vocabulary");
        println!();
        println!("Targets: javascript (js), python (py), webassembly (wasm)");
        println!();
        return ExitCode::SUCCESS;
    }

    let command = &args[1];

    match command.as_str() {
        "parse" => {
            if args.len() < 3 {
                eprintln!("Error: missing file argument");
                return ExitCode::FAILURE;
            }

            let filename = &args[2];
            let source = match fs::read_to_string(filename) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", filename, e);
                    return ExitCode::FAILURE;
                }
            };

            let tokens = match Lexer::new(&source).tokenize() {
                Ok(tokens) => tokens,
                Err(e) => {
                    print_error(&source, filename, &e);
                    return ExitCode::FAILURE;
                }
            };

            let outcome = Parser::new(tokens).parse();
            if outcome.has_errors() {
                print_errors(&source, filename, &outcome.diagnostics);
                return ExitCode::FAILURE;
            }

            println!("Parsed {} declarations:", outcome.program.statements.len());
            for stmt in &outcome.program.statements {
                match &stmt.kind {
                    StmtKind::Function(f) => {
                        println!("  funcao {} ({} params)", f.name.name, f.params.len());
                    }
                    StmtKind::Class(c) => {
                        println!("  classe {} ({} methods)", c.name.name, c.methods.len());
                    }
                    StmtKind::Component(c) => {
                        println!("  componente {} ({} methods)", c.name.name, c.methods.len());
                    }
                    StmtKind::Var { name, is_const, .. } => {
                        let kw = if *is_const { "constante" } else { "variavel" };
                        println!("  {} {}", kw, name.name);
                    }
                    _ => println!("  statement"),
                }
            }
            ExitCode::SUCCESS
        }
        "compile" => {
            if args.len() < 3 {
                eprintln!("Error: missing file argument");
                return ExitCode::FAILURE;
            }

            let filename = &args[2];

            // Parse arguments
            let mut target = String::from("javascript");
            let mut output = None;
            let mut options = TranspileOptions::default();
            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "-t" | "--target" => {
                        if i + 1 < args.len() {
                            target = args[i + 1].clone();
                            i += 2;
                        } else {
                            eprintln!("Error: -t requires a target");
                            return ExitCode::FAILURE;
                        }
                    }
                    "-o" | "--output" => {
                        if i + 1 < args.len() {
                            output = Some(args[i + 1].clone());
                            i += 2;
                        } else {
                            eprintln!("Error: -o requires an output path");
                            return ExitCode::FAILURE;
                        }
                    }
                    "--minify" => {
                        options.minify = true;
                        i += 1;
                    }
                    "--no-source-map" => {
                        options.source_maps = false;
                        i += 1;
                    }
                    "--es5" => {
                        options.es6 = false;
                        i += 1;
                    }
                    _ => {
                        eprintln!("Unknown option: {}", args[i]);
                        return ExitCode::FAILURE;
                    }
                }
            }

            let target: Target = match target.parse() {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    eprintln!("Available targets: javascript (js), python (py), webassembly (wasm)");
                    return ExitCode::FAILURE;
                }
            };

            let source = match fs::read_to_string(filename) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", filename, e);
                    return ExitCode::FAILURE;
                }
            };

            // Tokenize
            let tokens = match Lexer::new(&source).tokenize() {
                Ok(tokens) => tokens,
                Err(e) => {
                    print_error(&source, filename, &e);
                    return ExitCode::FAILURE;
                }
            };

            // Parse
            let outcome = Parser::new(tokens).parse();
            if outcome.has_errors() {
                print_errors(&source, filename, &outcome.diagnostics);
                return ExitCode::FAILURE;
            }

            // Generate code
            let result = match transpile(&outcome.program, target, &options) {
                Ok(result) => result,
                Err(e) => {
                    print_error(&source, filename, &e);
                    return ExitCode::FAILURE;
                }
            };

            // Write output
            let output_path = output
                .map(PathBuf::from)
                .unwrap_or_else(|| Path::new(filename).with_extension(target.file_extension()));

            if let Err(e) = fs::write(&output_path, &result.code) {
                eprintln!("Error writing '{}': {}", output_path.display(), e);
                return ExitCode::FAILURE;
            }
            println!(
                "Generated: {} ({} bytes)",
                output_path.display(),
                result.code.len()
            );

            if let Some(map) = &result.source_map {
                let map_path = format!("{}.map", output_path.display());
                let json = match serde_json::to_string_pretty(map) {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("Error serializing source map: {}", e);
                        return ExitCode::FAILURE;
                    }
                };
                if let Err(e) = fs::write(&map_path, json) {
                    eprintln!("Error writing '{}': {}", map_path, e);
                    return ExitCode::FAILURE;
                }
                println!("Source map: {}", map_path);
            }

            ExitCode::SUCCESS
        }
        "operators" => {
            println!("Word operators:");
            for (word, symbol) in stackc::lexer::WORD_OPERATORS {
                println!("  {:<12} {}", word, symbol);
            }
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            eprintln!("Run 'stackc' without arguments for usage information");
            ExitCode::FAILURE
        }
    }
}
