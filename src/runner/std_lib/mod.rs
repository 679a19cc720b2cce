//! Standard natives.
//!
//! The small set of native objects a fresh engine carries: `console`, the
//! `Number` and `Boolean` wrapper classes, `Math`, the three capability
//! providers `String`, `Array` and `Object` that method lookup falls back
//! to, and a few functions and constants on the global object itself.

pub mod array;
pub mod boolean;
pub mod console;
pub mod core;
pub mod global;
pub mod math;
pub mod number;
pub mod object;
pub mod string;

pub use self::core::register_core_builtins;

use crate::runner::ds::value::JsValue;

/// Argument `index`, or `undefined` when the caller passed fewer.
pub(crate) fn get_arg(args: &[JsValue], index: usize) -> JsValue {
    args.get(index).cloned().unwrap_or(JsValue::Undefined)
}
