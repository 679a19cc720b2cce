//! Functions and constants installed directly on the global object.

use tracing::debug;

use crate::parser::JsParser;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::operations::type_conversion::{to_number, to_string, type_of};
use crate::runner::ds::scope::Scope;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::eval::{evaluate_expression, execute_statement};
use crate::runner::plugin::registry::BuiltInRegistry;

use super::get_arg;

pub fn register(registry: &mut BuiltInRegistry) {
    registry.register_root_property("Infinity", JsValue::float(f64::INFINITY));
    registry.register_root_property("NaN", JsValue::float(f64::NAN));
    registry.register_root_property("undefined", JsValue::Undefined);

    registry.register_root_method("typeof", global_typeof);
    registry.register_root_method("exec", global_exec);
    registry.register_root_method("eval", global_eval);
    registry.register_root_method("parseInt", global_parse_int);
    registry.register_root_method("parseFloat", global_parse_float);
    registry.register_root_method("isNaN", global_is_nan);
    registry.register_root_method("isFinite", global_is_finite);
}

/// typeof(v) - same answer as the `typeof` operator.
fn global_typeof(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(type_of(&get_arg(&args, 0)).to_string()))
}

/// exec(source) - run statements against the global scope.
fn global_exec(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let source = to_string(&get_arg(&args, 0));
    debug!(len = source.len(), "nested exec");
    let program = JsParser::parse_to_ast_from_str(&source).map_err(|e| e.into_native_error())?;
    let scope = Scope::new_root(ctx.root.clone());
    execute_statement(&program.tree, program.root, &scope, ctx).map_err(|e| e.into_native_error())?;
    Ok(JsValue::Undefined)
}

/// eval(source) - evaluate one expression against the global scope.
fn global_eval(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let source = to_string(&get_arg(&args, 0));
    debug!(len = source.len(), "nested eval");
    let program = JsParser::parse_expression_from_str(&source).map_err(|e| e.into_native_error())?;
    let scope = Scope::new_root(ctx.root.clone());
    evaluate_expression(&program.tree, program.root, &scope, ctx).map_err(|e| e.into_native_error())
}

/// parseInt(s) - `0x` prefix reads hex, a leading `0` reads octal, anything
/// else reads an optionally signed decimal prefix.
fn global_parse_int(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let text = to_string(&get_arg(&args, 0));
    Ok(match parse_int_prefix(text.trim()) {
        Some(i) => JsValue::integer(i),
        None => JsValue::float(f64::NAN),
    })
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, hex)
    } else if body.starts_with('0') {
        (8, body)
    } else {
        (10, body)
    };
    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => {
                value = value.wrapping_mul(radix as i64).wrapping_add(d as i64);
                seen = true;
            }
            None => break,
        }
    }
    if !seen {
        return None;
    }
    Some(if negative { value.wrapping_neg() } else { value })
}

fn global_parse_float(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::float(to_number(&get_arg(&args, 0)).as_f64()))
}

fn global_is_nan(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let n = to_number(&get_arg(&args, 0));
    Ok(JsValue::Boolean(matches!(n, JsNumberType::Float(f) if f.is_nan())))
}

fn global_is_finite(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::Boolean(to_number(&get_arg(&args, 0)).as_f64().is_finite()))
}
