use crate::runner::ds::operations::type_conversion::{get_type, TYPE_STR_UNDEFINED};
use crate::runner::ds::value::{JsNumberType, JsValue};

/// Asks a wrapped native value (Number, Boolean) on either side whether it
/// equals the other operand by unwrapped value.
fn wrapper_same_value(a: &JsValue, b: &JsValue) -> Option<bool> {
    if let JsValue::Object(o) = a {
        if let Some(instance) = o.borrow().native_instance() {
            if let Some(same) = instance.are_same_value(b) {
                return Some(same);
            }
        }
    }
    None
}

/// `===`. Wrapped natives compare by value; everything else needs the same
/// dynamic type (int and double are distinct), the same function-ness, and
/// equal raw values (identity for reference types).
pub fn strictly_equal(a: &JsValue, b: &JsValue) -> bool {
    if let Some(same) = wrapper_same_value(a, b).or_else(|| wrapper_same_value(b, a)) {
        return same;
    }
    let type_a = get_type(a);
    if type_a != get_type(b) || a.is_function() != b.is_function() {
        return false;
    }
    if type_a == TYPE_STR_UNDEFINED {
        return true;
    }
    match (a, b) {
        (JsValue::Null, JsValue::Null) => true,
        (JsValue::Boolean(x), JsValue::Boolean(y)) => x == y,
        (JsValue::String(x), JsValue::String(y)) => x == y,
        (JsValue::Number(JsNumberType::Integer(x)), JsValue::Number(JsNumberType::Integer(y))) => x == y,
        (JsValue::Number(JsNumberType::Float(x)), JsValue::Number(JsNumberType::Float(y))) => x == y,
        (JsValue::Number(_), JsValue::Number(_)) => false,
        _ => a.same_reference(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::object::JsObject;

    #[test]
    fn primitives() {
        assert!(strictly_equal(&JsValue::Undefined, &JsValue::Undefined));
        assert!(!strictly_equal(&JsValue::Undefined, &JsValue::Null));
        assert!(strictly_equal(&JsValue::integer(2), &JsValue::integer(2)));
        assert!(!strictly_equal(&JsValue::integer(2), &JsValue::float(2.0)));
        assert!(strictly_equal(&JsValue::float(2.5), &JsValue::float(2.5)));
        assert!(!strictly_equal(&JsValue::integer(1), &JsValue::String("1".to_string())));
        assert!(!strictly_equal(&JsValue::float(f64::NAN), &JsValue::float(f64::NAN)));
    }

    #[test]
    fn objects_compare_by_identity() {
        let a = JsValue::new_object(JsObject::new());
        let b = JsValue::new_object(JsObject::new());
        assert!(strictly_equal(&a, &a.clone()));
        assert!(!strictly_equal(&a, &b));
    }
}
