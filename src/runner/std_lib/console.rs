//! Console built-in object.
//!
//! Provides console.log, console.print, console.info, console.warn and
//! console.error. Every line is also emitted as a `tracing` event with
//! target `console`.

use tracing::{error, info, warn};

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::BuiltInObject;

/// Register the console object with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let console = BuiltInObject::new("console")
        .add_method("log", console_log)
        .add_method("print", console_log)
        .add_method("info", console_log)
        .add_method("warn", console_warn)
        .add_method("error", console_error);

    registry.register_object(console);
}

/// Format all arguments for console output.
fn format_args(args: &[JsValue]) -> String {
    args.iter().map(to_string).collect::<Vec<_>>().join(" ")
}

/// console.log - Log to stdout.
fn console_log(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let line = format_args(&args);
    info!(target: "console", "{}", line);
    println!("{}", line);
    Ok(JsValue::Undefined)
}

/// console.warn - Log warning to stderr.
fn console_warn(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let line = format_args(&args);
    warn!(target: "console", "{}", line);
    eprintln!("Warning: {}", line);
    Ok(JsValue::Undefined)
}

/// console.error - Log to stderr.
fn console_error(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let line = format_args(&args);
    error!(target: "console", "{}", line);
    eprintln!("{}", line);
    Ok(JsValue::Undefined)
}
