//! Array capability provider.
//!
//! Method calls on array values resolve here, with the array as `this`.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::operations::test_and_comparison::strictly_equal;
use crate::runner::ds::operations::type_conversion::{join_array, to_string};
use crate::runner::ds::value::{JsArrayType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::BuiltInObject;

use super::get_arg;

/// Register the Array provider with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let array = BuiltInObject::new("Array")
        .add_method("push", array_push)
        .add_method("pop", array_pop)
        .add_method("join", array_join)
        .add_method("indexOf", array_index_of)
        .add_method("contains", array_contains)
        .add_method("includes", array_contains)
        .add_method("isArray", array_is_array);

    registry.register_object(array);
}

fn this_array(this: &JsValue, method: &str) -> Result<JsArrayType, JErrorType> {
    match this {
        JsValue::Array(a) => Ok(a.clone()),
        _ => Err(JErrorType::TypeError(format!(
            "Array.{} called on a non-array",
            method
        ))),
    }
}

/// Array.prototype.push - returns the new length.
fn array_push(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "push")?;
    let mut elements = array.borrow_mut();
    elements.extend(args);
    Ok(JsValue::integer(elements.len() as i64))
}

/// Array.prototype.pop
fn array_pop(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "pop")?;
    let last = array.borrow_mut().pop();
    Ok(last.unwrap_or(JsValue::Undefined))
}

/// Array.prototype.join - the separator defaults to `,`.
fn array_join(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "join")?;
    let separator = match args.first() {
        None | Some(JsValue::Undefined) => ",".to_string(),
        Some(s) => to_string(s),
    };
    Ok(JsValue::String(join_array(&array, &separator)))
}

fn position_of(array: &JsArrayType, needle: &JsValue) -> Option<usize> {
    array.borrow().iter().position(|e| strictly_equal(e, needle))
}

/// Array.prototype.indexOf
fn array_index_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "indexOf")?;
    let position = position_of(&array, &get_arg(&args, 0));
    Ok(JsValue::integer(position.map_or(-1, |p| p as i64)))
}

/// Array.prototype.contains
fn array_contains(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "contains")?;
    Ok(JsValue::Boolean(position_of(&array, &get_arg(&args, 0)).is_some()))
}

/// Array.isArray
fn array_is_array(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::Boolean(matches!(get_arg(&args, 0), JsValue::Array(_))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::object::JsObject;
    use crate::runner::plugin::types::NativeFn;

    fn call(f: NativeFn, this: &JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
        let mut ctx = EvalContext::new(JsObject::new().into_shared(), 8);
        f(&mut ctx, this.clone(), args)
    }

    #[test]
    fn push_and_pop_mutate_in_place() {
        let a = JsValue::new_array(vec![JsValue::integer(1)]);
        assert_eq!(call(array_push, &a, vec![JsValue::integer(2)]), Ok(JsValue::integer(2)));
        assert_eq!(call(array_pop, &a, vec![]), Ok(JsValue::integer(2)));
        assert_eq!(call(array_pop, &a, vec![]), Ok(JsValue::integer(1)));
        assert_eq!(call(array_pop, &a, vec![]), Ok(JsValue::Undefined));
    }

    #[test]
    fn join_skips_undefined_and_null() {
        let a = JsValue::new_array(vec![JsValue::integer(1), JsValue::Null, JsValue::String("x".into())]);
        assert_eq!(
            call(array_join, &a, vec![JsValue::String("-".into())]),
            Ok(JsValue::String("1--x".into()))
        );
    }

    #[test]
    fn index_of_uses_strict_equality() {
        let a = JsValue::new_array(vec![JsValue::String("1".into()), JsValue::integer(1)]);
        assert_eq!(call(array_index_of, &a, vec![JsValue::integer(1)]), Ok(JsValue::integer(1)));
        assert_eq!(call(array_contains, &a, vec![JsValue::Null]), Ok(JsValue::Boolean(false)));
    }

    #[test]
    fn non_array_receiver_is_a_type_error() {
        assert!(call(array_push, &JsValue::integer(1), vec![]).is_err());
    }
}
