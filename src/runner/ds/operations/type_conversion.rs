use std::rc::Rc;

use crate::runner::ds::object::ObjectKind;
use crate::runner::ds::value::{JsArrayType, JsNumberType, JsValue};
use crate::stack::ensure_sufficient_stack;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_ARRAY: &str = "array";
pub const TYPE_STR_FUNCTION: &str = "function";

/// Dynamic type tag used for strict equality. Arrays get their own tag here
/// even though `typeof` reports them as objects.
pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Array(_) => TYPE_STR_ARRAY,
        JsValue::NativeFunction(_) => TYPE_STR_FUNCTION,
        JsValue::Object(o) => match o.borrow().kind {
            ObjectKind::Function(_) => TYPE_STR_FUNCTION,
            _ => TYPE_STR_OBJECT,
        },
    }
}

/// Result of the `typeof` operator.
pub fn type_of(a: &JsValue) -> &'static str {
    match get_type(a) {
        TYPE_STR_NULL | TYPE_STR_ARRAY => TYPE_STR_OBJECT,
        t => t,
    }
}

pub fn to_boolean(v: &JsValue) -> bool {
    match v {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::Number(JsNumberType::Integer(i)) => *i != 0,
        JsValue::Number(JsNumberType::Float(f)) => !(*f == 0.0 || f.is_nan()),
        JsValue::String(s) => !s.is_empty(),
        JsValue::Object(_) | JsValue::Array(_) | JsValue::NativeFunction(_) => true,
    }
}

pub fn to_string(v: &JsValue) -> String {
    stringify(v, &mut Vec::new())
}

/// Joins array elements with `separator`. `undefined` and `null` elements
/// render empty, as does an array already being stringified further up.
pub fn join_array(array: &JsArrayType, separator: &str) -> String {
    join_elements(array, separator, &mut vec![array.clone()])
}

fn join_elements(array: &JsArrayType, separator: &str, in_progress: &mut Vec<JsArrayType>) -> String {
    ensure_sufficient_stack(|| {
        let elements = array.borrow().clone();
        elements
            .iter()
            .map(|e| {
                if e.is_undefined_or_null() {
                    String::new()
                } else {
                    stringify(e, in_progress)
                }
            })
            .collect::<Vec<_>>()
            .join(separator)
    })
}

fn stringify(v: &JsValue, in_progress: &mut Vec<JsArrayType>) -> String {
    match v {
        JsValue::Undefined => TYPE_STR_UNDEFINED.to_string(),
        JsValue::Null => TYPE_STR_NULL.to_string(),
        JsValue::Boolean(b) => b.to_string(),
        JsValue::Number(n) => n.to_string(),
        JsValue::String(s) => s.clone(),
        JsValue::Array(a) => {
            if in_progress.iter().any(|seen| Rc::ptr_eq(seen, a)) {
                return String::new();
            }
            in_progress.push(a.clone());
            let joined = join_elements(a, ",", in_progress);
            in_progress.pop();
            joined
        }
        JsValue::NativeFunction(_) => "function () { [native code] }".to_string(),
        JsValue::Object(o) => {
            let o = o.borrow();
            match &o.kind {
                ObjectKind::Function(f) => format!("function {}", f.source),
                ObjectKind::Instance(i) => stringify(&i.primitive_value(), in_progress),
                ObjectKind::Class(c) => format!("[object {}]", c.class_name()),
                ObjectKind::Ordinary => "[object Object]".to_string(),
            }
        }
    }
}

/// Numeric view of a value for natives that want one. `undefined` and
/// unparsable strings become NaN.
pub fn to_number(v: &JsValue) -> JsNumberType {
    match v {
        JsValue::Undefined => JsNumberType::Float(f64::NAN),
        JsValue::Null => JsNumberType::Integer(0),
        JsValue::Boolean(b) => JsNumberType::Integer(*b as i64),
        JsValue::Number(n) => *n,
        JsValue::String(s) => string_to_number(s),
        JsValue::Object(o) => match o.borrow().native_instance() {
            Some(i) => to_number(&i.primitive_value()),
            None => JsNumberType::Float(f64::NAN),
        },
        JsValue::Array(_) | JsValue::NativeFunction(_) => JsNumberType::Float(f64::NAN),
    }
}

fn string_to_number(s: &str) -> JsNumberType {
    let t = s.trim();
    if t.is_empty() {
        return JsNumberType::Integer(0);
    }
    if let Ok(i) = t.parse::<i64>() {
        return JsNumberType::Integer(i);
    }
    match t {
        "Infinity" | "+Infinity" => JsNumberType::Float(f64::INFINITY),
        "-Infinity" => JsNumberType::Float(f64::NEG_INFINITY),
        _ => JsNumberType::Float(t.parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(f64::NAN)),
    }
}

/// Integer view used by the operator ladder: booleans are 0/1, `undefined`
/// is 0.
pub fn to_ladder_int(v: &JsValue) -> i64 {
    match v {
        JsValue::Boolean(b) => *b as i64,
        JsValue::Number(n) => n.as_i64(),
        _ => 0,
    }
}

pub fn to_ladder_double(v: &JsValue) -> f64 {
    match v {
        JsValue::Boolean(b) => *b as i64 as f64,
        JsValue::Number(n) => n.as_f64(),
        _ => 0.0,
    }
}
