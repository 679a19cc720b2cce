//! Tree-walking evaluation of a parsed program.
//!
//! Statements run through [`execute_statement`], expressions through
//! [`evaluate_expression`]; both take the arena the node lives in, the
//! current scope and the shared [`EvalContext`](crate::runner::ds::execution_context::EvalContext).

pub mod expression;
pub mod function;
pub mod operators;
pub mod statement;
pub mod types;

pub use expression::{assign, evaluate_expression};
pub use function::{call_value, invoke_user_function};
pub use statement::execute_statement;
pub use types::{Completion, CompletionType, EvalResult, ValueResult};
