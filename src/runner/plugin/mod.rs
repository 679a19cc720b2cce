//! Native collaborators.
//!
//! Everything the evaluator does not implement itself reaches it through the
//! global object. A native collaborator is a plain property bag registered
//! there under a name; the evaluator asks nothing more of it than readable
//! and settable properties and, optionally, invokable methods.
//!
//! Three hooks let natives go further:
//!
//! - **[`BuiltInFn`]**: a function value backed by Rust, either a plain `fn`
//!   pointer or an embedder-supplied closure.
//! - **[`NativeClass`]**: attached to a registered object, it decides what
//!   `new Name(...)` produces and whether it is allowed at all.
//! - **[`NativeInstance`]**: attached to a constructed object, it answers
//!   strict-equality by unwrapped value and may dispatch methods that are not
//!   properties.
//!
//! ### Method Calls
//!
//! `target.name(args)` resolves `name` in this order:
//!
//! 1. an own property of `target`
//! 2. the `prototype` chain of `target`
//! 3. the instance's own method dispatch ([`NativeInstance::has_method`])
//! 4. the global `String` provider, if `target` is a string
//! 5. the global `Array` provider, if `target` is an array
//! 6. the global `Object` provider
//!
//! ## Example: Custom Global
//!
//! ```
//! use jsembed::runner::plugin::types::BuiltInObject;
//! use jsembed::runner::ds::execution_context::EvalContext;
//! use jsembed::runner::ds::value::{JsValue, JsNumberType};
//! use jsembed::runner::ds::error::JErrorType;
//! use jsembed::JavascriptEngine;
//!
//! fn double(_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
//!     match args.first() {
//!         Some(JsValue::Number(JsNumberType::Integer(n))) => Ok(JsValue::integer(n * 2)),
//!         _ => Err(JErrorType::TypeError("double expects an integer".to_string())),
//!     }
//! }
//!
//! let mut engine = JavascriptEngine::new();
//! let utils = BuiltInObject::new("Utils").add_method("double", double);
//! engine.register_native_object("Utils", utils.into_js_object());
//! assert_eq!(engine.evaluate("Utils.double(21)").unwrap(), JsValue::integer(42));
//! ```

pub mod registry;
pub mod types;

pub use registry::BuiltInRegistry;
pub use types::{BuiltInFn, BuiltInObject, NativeClass, NativeFn, NativeInstance};
