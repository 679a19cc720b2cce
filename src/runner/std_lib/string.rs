//! String capability provider.
//!
//! Method calls on string values that are not found elsewhere resolve here,
//! with the string as `this`. Positions count characters, not bytes.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::operations::type_conversion::{to_number, to_string};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::BuiltInObject;

use super::get_arg;

/// Register the String provider with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let string = BuiltInObject::new("String")
        .add_method("charAt", string_char_at)
        .add_method("charCodeAt", string_char_code_at)
        .add_method("indexOf", string_index_of)
        .add_method("substring", string_substring)
        .add_method("split", string_split)
        .add_method("trim", string_trim)
        .add_method("toUpperCase", string_to_upper_case)
        .add_method("toLowerCase", string_to_lower_case);

    registry.register_object(string);
}

fn to_integer(value: &JsValue) -> i64 {
    to_number(value).as_i64()
}

/// String.prototype.charAt
fn string_char_at(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let s = to_string(&this);
    let index = to_integer(&get_arg(&args, 0));
    let c = if index < 0 {
        None
    } else {
        s.chars().nth(index as usize)
    };
    Ok(JsValue::String(c.map(String::from).unwrap_or_default()))
}

/// String.prototype.charCodeAt
fn string_char_code_at(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let s = to_string(&this);
    let index = to_integer(&get_arg(&args, 0));
    let c = if index < 0 {
        None
    } else {
        s.chars().nth(index as usize)
    };
    Ok(match c {
        Some(c) => JsValue::integer(c as i64),
        None => JsValue::float(f64::NAN),
    })
}

/// String.prototype.indexOf
fn string_index_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let s = to_string(&this);
    let search = to_string(&get_arg(&args, 0));
    let start = to_integer(&get_arg(&args, 1)).max(0) as usize;

    let byte_start = match s.char_indices().nth(start) {
        Some((b, _)) => b,
        None if search.is_empty() => return Ok(JsValue::integer(s.chars().count() as i64)),
        None => return Ok(JsValue::integer(-1)),
    };
    Ok(match s[byte_start..].find(&search) {
        Some(found) => JsValue::integer((start + s[byte_start..byte_start + found].chars().count()) as i64),
        None => JsValue::integer(-1),
    })
}

/// String.prototype.substring
fn string_substring(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let s = to_string(&this);
    let len = s.chars().count() as i64;

    let mut start = to_integer(&get_arg(&args, 0)).max(0).min(len);
    let mut end = if args.len() < 2 {
        len
    } else {
        to_integer(&args[1]).max(0).min(len)
    };

    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let result: String = s
        .chars()
        .skip(start as usize)
        .take((end - start) as usize)
        .collect();

    Ok(JsValue::String(result))
}

/// String.prototype.split - an empty separator splits into characters.
fn string_split(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let s = to_string(&this);
    let parts: Vec<JsValue> = match args.first() {
        None | Some(JsValue::Undefined) => vec![JsValue::String(s)],
        Some(separator) => {
            let separator = to_string(separator);
            if separator.is_empty() {
                s.chars().map(|c| JsValue::String(c.to_string())).collect()
            } else {
                s.split(separator.as_str())
                    .map(|p| JsValue::String(p.to_string()))
                    .collect()
            }
        }
    };
    Ok(JsValue::new_array(parts))
}

/// String.prototype.trim
fn string_trim(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(to_string(&this).trim().to_string()))
}

/// String.prototype.toUpperCase
fn string_to_upper_case(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(to_string(&this).to_uppercase()))
}

/// String.prototype.toLowerCase
fn string_to_lower_case(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(to_string(&this).to_lowercase()))
}
