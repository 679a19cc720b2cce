//! Object capability provider.
//!
//! The last stop of method lookup: any value reaches these methods, with
//! itself as `this`.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::BuiltInObject;

use super::get_arg;

/// Register the Object provider with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let object = BuiltInObject::new("Object")
        .add_method("toString", object_to_string)
        .add_method("hasOwnProperty", object_has_own_property)
        .add_method("keys", object_keys);

    registry.register_object(object);
}

/// Object.prototype.toString
fn object_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(to_string(&this)))
}

/// Object.prototype.hasOwnProperty
fn object_has_own_property(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let name = to_string(&get_arg(&args, 0));
    let result = match &this {
        JsValue::Object(o) => o.borrow().has_property(&name),
        _ => false,
    };
    Ok(JsValue::Boolean(result))
}

/// Object.keys(o) - own property names in insertion order.
fn object_keys(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let keys = match &get_arg(&args, 0) {
        JsValue::Object(o) => o
            .borrow()
            .property_names()
            .into_iter()
            .map(JsValue::String)
            .collect(),
        JsValue::Array(a) => (0..a.borrow().len())
            .map(|i| JsValue::String(i.to_string()))
            .collect(),
        _ => vec![],
    };
    Ok(JsValue::new_array(keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::object::JsObject;

    #[test]
    fn has_own_property_ignores_prototype() {
        let mut ctx = EvalContext::new(JsObject::new().into_shared(), 8);
        let proto = JsValue::new_object(JsObject::new());
        let mut o = JsObject::new();
        o.set_property("a", JsValue::integer(1));
        o.set_property("prototype", proto);
        let o = JsValue::new_object(o);
        let has = |ctx: &mut EvalContext, name: &str| {
            object_has_own_property(ctx, o.clone(), vec![JsValue::String(name.to_string())])
        };
        assert_eq!(has(&mut ctx, "a"), Ok(JsValue::Boolean(true)));
        assert_eq!(has(&mut ctx, "b"), Ok(JsValue::Boolean(false)));
    }
}
