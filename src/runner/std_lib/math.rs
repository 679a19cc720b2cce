//! Math built-in object.
//!
//! Provides mathematical constants and functions. `Math` is a class that
//! refuses `new`.

use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::operations::type_conversion::to_number;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, NativeClass};

struct MathClass;

impl NativeClass for MathClass {
    fn class_name(&self) -> &str {
        "Math"
    }

    fn is_constructable(&self) -> bool {
        false
    }
}

/// Register the Math object with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let math = BuiltInObject::new("Math")
        .with_class(Rc::new(MathClass))
        // Constants
        .add_property("E", JsValue::float(std::f64::consts::E))
        .add_property("LN10", JsValue::float(std::f64::consts::LN_10))
        .add_property("LN2", JsValue::float(std::f64::consts::LN_2))
        .add_property("PI", JsValue::float(std::f64::consts::PI))
        .add_property("SQRT2", JsValue::float(std::f64::consts::SQRT_2))
        // Methods
        .add_method("abs", math_abs)
        .add_method("floor", math_floor)
        .add_method("ceil", math_ceil)
        .add_method("round", math_round)
        .add_method("trunc", math_trunc)
        .add_method("sign", math_sign)
        .add_method("min", math_min)
        .add_method("max", math_max)
        .add_method("sqrt", math_sqrt)
        .add_method("pow", math_pow)
        .add_method("exp", math_exp)
        .add_method("log", math_log)
        .add_method("sin", math_sin)
        .add_method("cos", math_cos)
        .add_method("tan", math_tan);

    registry.register_object(math);
}

/// Convert JsValue to f64 for math operations.
fn to_f64(value: &JsValue) -> f64 {
    to_number(value).as_f64()
}

fn arg_f64(args: &[JsValue], index: usize) -> f64 {
    args.get(index).map_or(f64::NAN, to_f64)
}

/// Convert f64 result to JsValue. Integral results come back as integers.
fn from_f64(f: f64) -> JsValue {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        JsValue::integer(f as i64)
    } else {
        JsValue::float(f)
    }
}

/// Math.abs
fn math_abs(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    match args.first() {
        Some(JsValue::Number(JsNumberType::Integer(i))) => Ok(JsValue::integer(i.wrapping_abs())),
        _ => Ok(from_f64(arg_f64(&args, 0).abs())),
    }
}

/// Math.floor
fn math_floor(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(from_f64(arg_f64(&args, 0).floor()))
}

/// Math.ceil
fn math_ceil(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(from_f64(arg_f64(&args, 0).ceil()))
}

/// Math.round - halves round towards +Infinity.
fn math_round(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(from_f64((arg_f64(&args, 0) + 0.5).floor()))
}

/// Math.trunc
fn math_trunc(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(from_f64(arg_f64(&args, 0).trunc()))
}

/// Math.sign
fn math_sign(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let x = arg_f64(&args, 0);
    Ok(if x.is_nan() {
        JsValue::float(f64::NAN)
    } else if x == 0.0 {
        JsValue::integer(0)
    } else if x > 0.0 {
        JsValue::integer(1)
    } else {
        JsValue::integer(-1)
    })
}

/// Math.min
fn math_min(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let mut result = f64::INFINITY;
    for arg in &args {
        let x = to_f64(arg);
        if x.is_nan() {
            return Ok(JsValue::float(f64::NAN));
        }
        if x < result {
            result = x;
        }
    }
    Ok(from_f64(result))
}

/// Math.max
fn math_max(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let mut result = f64::NEG_INFINITY;
    for arg in &args {
        let x = to_f64(arg);
        if x.is_nan() {
            return Ok(JsValue::float(f64::NAN));
        }
        if x > result {
            result = x;
        }
    }
    Ok(from_f64(result))
}

/// Math.sqrt
fn math_sqrt(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::float(arg_f64(&args, 0).sqrt()))
}

/// Math.pow
fn math_pow(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(from_f64(arg_f64(&args, 0).powf(arg_f64(&args, 1))))
}

/// Math.exp
fn math_exp(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::float(arg_f64(&args, 0).exp()))
}

/// Math.log
fn math_log(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::float(arg_f64(&args, 0).ln()))
}

fn math_sin(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::float(arg_f64(&args, 0).sin()))
}

fn math_cos(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::float(arg_f64(&args, 0).cos()))
}

fn math_tan(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::float(arg_f64(&args, 0).tan()))
}
