//! # jsembed - an embeddable JavaScript-like interpreter
//!
//! A small scripting engine for host applications:
//! - pest-backed tokenizer and a recursive-descent parser into an arena AST
//! - tree-walking evaluator with JavaScript-style coercion and equality
//! - cooperative timeout and cross-thread stop
//! - native objects registered on the global object
//!
//! ## Quick Start
//!
//! ### Parsing
//!
//! ```
//! use jsembed::parser::JsParser;
//!
//! let program = JsParser::parse_to_ast_from_str("var x = 5 + 3;").unwrap();
//! println!("Parsed {} nodes", program.tree.len());
//! ```
//!
//! ### Running scripts
//!
//! ```
//! use jsembed::runner::ds::value::JsValue;
//! use jsembed::JavascriptEngine;
//!
//! let mut engine = JavascriptEngine::new();
//! engine
//!     .execute("function fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }")
//!     .unwrap();
//! assert_eq!(engine.evaluate("fib(10)").unwrap(), JsValue::integer(55));
//! assert_eq!(
//!     engine.call_function("fib", vec![JsValue::integer(12)]).unwrap(),
//!     JsValue::integer(144)
//! );
//! ```
//!
//! ### Timeouts
//!
//! Every `execute`, `evaluate` and `call_function` gets a fresh deadline.
//! Loops and calls check it; a script that overruns fails with
//! "Execution timed-out", one stopped through [`JavascriptEngine::stop`] or a
//! [`StopHandle`](runner::ds::execution_context::StopHandle) with
//! "Interrupted".
//!
//! ```
//! use std::time::Duration;
//! use jsembed::JavascriptEngine;
//!
//! let mut engine = JavascriptEngine::new();
//! engine.set_maximum_execution_time(Duration::from_millis(20));
//! let err = engine.execute("while (true) {}").unwrap_err();
//! assert!(err.is_timeout());
//! assert!(err.to_string().ends_with("Execution timed-out"));
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - tokenizer, lexical grammar, AST and parser
//! - **[`runner`]** - evaluation
//!   - **[`runner::ds`]** - values, objects, scopes, errors, deadline
//!   - **[`runner::eval`]** - tree-walking evaluator
//!   - **[`runner::plugin`]** - native object contract and registry
//!   - **[`runner::std_lib`]** - standard natives
//!   - **[`runner::api`]** - the engine façade

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
pub mod stack;

pub use runner::api::JavascriptEngine;
pub use runner::config::{ConfigError, EngineConfig};
pub use runner::ds::error::{JErrorType, JsError};
