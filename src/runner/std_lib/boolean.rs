//! Boolean built-in.
//!
//! `new Boolean(...)` is true if any argument is truthy. The wrapper
//! compares equal under `===` to booleans, numbers (non-zero is true) and
//! the strings `"true"`/`"false"`.

use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObject, ObjectKind};
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, NativeClass, NativeInstance};

const CLASS_NAME: &str = "Boolean";

struct BooleanClass;

impl NativeClass for BooleanClass {
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn construct(&self, args: &[JsValue]) -> Result<JsObject, JErrorType> {
        let value = args.iter().any(to_boolean);
        Ok(JsObject::with_kind(ObjectKind::Instance(Box::new(BooleanInstance { value }))))
    }
}

pub struct BooleanInstance {
    value: bool,
}

impl NativeInstance for BooleanInstance {
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn primitive_value(&self) -> JsValue {
        JsValue::Boolean(self.value)
    }

    fn are_same_value(&self, other: &JsValue) -> Option<bool> {
        Some(match other {
            JsValue::Boolean(b) => self.value == *b,
            JsValue::Number(n) => self.value == (n.as_f64() != 0.0),
            JsValue::String(s) => self.value == s.eq_ignore_ascii_case("true"),
            JsValue::Object(o) => match o.borrow().native_instance() {
                Some(i) if i.class_name() == CLASS_NAME => {
                    JsValue::Boolean(self.value) == i.primitive_value()
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
            "valueOf" => Ok(JsValue::Boolean(self.value)),
            _ => Err(JErrorType::TypeError(format!(
                "{} has no method '{}'",
                CLASS_NAME, name
            ))),
        }
    }
}

/// Register the Boolean built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    registry.register_object(BuiltInObject::new(CLASS_NAME).with_class(Rc::new(BooleanClass)));
}
