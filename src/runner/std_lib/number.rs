//! Number built-in.
//!
//! `Number` is a class: `new Number(v)` builds a wrapper instance that
//! compares equal to plain numbers (and numeric strings) under `===` and
//! answers `toString` and `valueOf` itself.

use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::object::{JsObject, ObjectKind};
use crate::runner::ds::operations::type_conversion::to_number;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, NativeClass, NativeInstance};

use super::get_arg;

const CLASS_NAME: &str = "Number";

struct NumberClass;

impl NativeClass for NumberClass {
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn construct(&self, args: &[JsValue]) -> Result<JsObject, JErrorType> {
        let value = match args.first() {
            None => JsNumberType::Integer(0),
            Some(JsValue::String(s)) if s.trim().is_empty() => JsNumberType::Float(f64::NAN),
            Some(v @ JsValue::Number(_)) | Some(v @ JsValue::String(_)) => to_number(v),
            Some(_) => JsNumberType::Float(f64::NAN),
        };
        Ok(JsObject::with_kind(ObjectKind::Instance(Box::new(NumberInstance { value }))))
    }
}

/// A wrapped number.
pub struct NumberInstance {
    value: JsNumberType,
}

impl NativeInstance for NumberInstance {
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn primitive_value(&self) -> JsValue {
        JsValue::Number(self.value)
    }

    fn are_same_value(&self, other: &JsValue) -> Option<bool> {
        let mine = self.value.as_f64();
        Some(match other {
            JsValue::Number(n) => mine == n.as_f64(),
            JsValue::String(s) if !s.trim().is_empty() => mine == to_number(other).as_f64(),
            JsValue::Object(o) => match o.borrow().native_instance() {
                Some(i) if i.class_name() == CLASS_NAME => {
                    mine == to_number(&i.primitive_value()).as_f64()
                }
                _ => false,
            },
            _ => false,
        })
    }

    fn has_method(&self, name: &str) -> bool {
        matches!(name, "toString" | "valueOf")
    }

    fn invoke_method(&self, name: &str, _args: &[JsValue]) -> Result<JsValue, JErrorType> {
        match name {
            "toString" => Ok(JsValue::String(self.value.to_string())),
            "valueOf" => Ok(JsValue::Number(self.value)),
            _ => Err(JErrorType::TypeError(format!(
                "{} has no method '{}'",
                CLASS_NAME, name
            ))),
        }
    }
}

/// Register the Number built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let number = BuiltInObject::new(CLASS_NAME)
        .with_class(Rc::new(NumberClass))
        .add_property("MAX_VALUE", JsValue::float(f64::MAX))
        .add_property("MIN_VALUE", JsValue::float(f64::MIN_POSITIVE))
        .add_property("POSITIVE_INFINITY", JsValue::float(f64::INFINITY))
        .add_property("NEGATIVE_INFINITY", JsValue::float(f64::NEG_INFINITY))
        .add_property("NaN", JsValue::float(f64::NAN))
        .add_property("MAX_SAFE_INTEGER", JsValue::integer(9007199254740991))
        .add_property("MIN_SAFE_INTEGER", JsValue::integer(-9007199254740991))
        .add_property("EPSILON", JsValue::float(f64::EPSILON))
        .add_method("isNaN", number_is_nan)
        .add_method("isFinite", number_is_finite)
        .add_method("isInteger", number_is_integer);

    registry.register_object(number);
}

/// Number.isNaN - Check if value is NaN (strict).
fn number_is_nan(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let result = matches!(get_arg(&args, 0), JsValue::Number(JsNumberType::Float(f)) if f.is_nan());
    Ok(JsValue::Boolean(result))
}

/// Number.isFinite - Check if value is finite (strict).
fn number_is_finite(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let result = match get_arg(&args, 0) {
        JsValue::Number(JsNumberType::Integer(_)) => true,
        JsValue::Number(JsNumberType::Float(f)) => f.is_finite(),
        _ => false,
    };
    Ok(JsValue::Boolean(result))
}

/// Number.isInteger
fn number_is_integer(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let result = match get_arg(&args, 0) {
        JsValue::Number(JsNumberType::Integer(_)) => true,
        JsValue::Number(JsNumberType::Float(f)) => f.is_finite() && f.fract() == 0.0,
        _ => false,
    };
    Ok(JsValue::Boolean(result))
}
