//! CLI wrapper for the jsembed interpreter.
//!
//! Usage:
//!   jsembed [options] <file.js>     # Execute a script file
//!   jsembed [options] -e "expr"     # Evaluate one expression and print it
//!   jsembed [options]               # Start REPL (interactive mode)
//!
//! Options:
//!   --config <file>   read engine settings from a TOML file
//!   --timeout <ms>    maximum execution time per script

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::time::Duration;

use jsembed::{EngineConfig, JErrorType, JavascriptEngine};
use tracing_subscriber::EnvFilter;

enum Mode {
    Repl,
    File(String),
    Eval(String),
}

fn main() {
    if env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = EngineConfig::default();
    let mut timeout = None;
    let mut mode = Mode::Repl;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "--config" => {
                let path = option_value(&args, i);
                config = match EngineConfig::load(Path::new(path)) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Error in config '{}': {}", path, e);
                        process::exit(1);
                    }
                };
                i += 1;
            }
            "--timeout" => {
                let value = option_value(&args, i);
                match value.parse::<u64>() {
                    Ok(ms) => timeout = Some(Duration::from_millis(ms)),
                    Err(_) => {
                        eprintln!("Invalid timeout '{}'", value);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "-e" | "--eval" => {
                mode = Mode::Eval(option_value(&args, i).to_string());
                i += 1;
            }
            file => mode = Mode::File(file.to_string()),
        }
        i += 1;
    }

    if let Some(timeout) = timeout {
        config = config.with_maximum_execution_time(timeout);
    }
    let mut engine = JavascriptEngine::with_config(config);

    match mode {
        Mode::Repl => run_repl(&mut engine),
        Mode::File(path) => run_file(&mut engine, &path),
        Mode::Eval(code) => eval_code(&mut engine, &code),
    }
}

fn option_value(args: &[String], i: usize) -> &str {
    match args.get(i + 1) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for '{}'", args[i]);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("jsembed - embeddable JavaScript-like interpreter");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  jsembed [options] <file.js>     Execute a script file");
    eprintln!("  jsembed [options] -e \"expr\"     Evaluate one expression");
    eprintln!("  jsembed [options]               Start REPL (interactive mode)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file>   Engine settings (TOML, [engine] table)");
    eprintln!("  --timeout <ms>    Maximum execution time per script");
}

fn run_file(engine: &mut JavascriptEngine, filename: &str) {
    let source = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            process::exit(1);
        }
    };

    if let Err(e) = engine.execute(&source) {
        eprintln!("{}: {}", filename, e);
        process::exit(1);
    }
}

fn eval_code(engine: &mut JavascriptEngine, code: &str) {
    match engine.evaluate(code) {
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run_repl(engine: &mut JavascriptEngine) {
    println!("jsembed v{}", env!("CARGO_PKG_VERSION"));
    println!("Type statements or expressions and press Enter. Type .exit to quit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let input = input.trim();

        if input == ".exit" || input == ".quit" {
            break;
        }

        if input.is_empty() {
            continue;
        }

        // A lone expression prints its value; anything else runs as statements.
        match engine.evaluate(input) {
            Ok(value) => {
                if !value.is_undefined() {
                    println!("{}", value);
                }
            }
            Err(e) if matches!(e.kind, JErrorType::SyntaxError(_)) => {
                if let Err(e) = engine.execute(input) {
                    eprintln!("{}", e);
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }
}
