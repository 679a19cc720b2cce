//! Everything after parsing: values and scopes, the evaluator, native
//! objects and the engine façade.

pub mod api;
pub mod config;
pub mod ds;
pub mod eval;
pub mod plugin;
pub mod std_lib;
