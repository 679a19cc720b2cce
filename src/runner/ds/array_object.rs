use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::{JsArrayType, JsNumberType, JsValue};

pub const LENGTH_PROPERTY: &str = "length";

/// Arrays are dense, so writes far past the end are refused.
const MAX_ARRAY_LENGTH: i64 = 1 << 24;

/// Converts a subscript key to an array index. Only numbers index arrays.
pub fn to_array_index(key: &JsValue) -> Option<i64> {
    match key {
        JsValue::Number(JsNumberType::Integer(i)) => Some(*i),
        JsValue::Number(JsNumberType::Float(f)) if f.is_finite() => Some(*f as i64),
        _ => None,
    }
}

pub fn array_get(array: &JsArrayType, index: i64) -> JsValue {
    if index < 0 {
        return JsValue::Undefined;
    }
    array
        .borrow()
        .get(index as usize)
        .cloned()
        .unwrap_or(JsValue::Undefined)
}

/// Stores at `index`, padding with `undefined` when writing past the end.
pub fn array_set(array: &JsArrayType, index: i64, value: JsValue) -> Result<(), JErrorType> {
    if index < 0 || index >= MAX_ARRAY_LENGTH {
        return Err(JErrorType::RangeError(format!(
            "Invalid array index {}",
            index
        )));
    }
    let index = index as usize;
    let mut elements = array.borrow_mut();
    if elements.len() <= index {
        elements.resize(index + 1, JsValue::Undefined);
    }
    elements[index] = value;
    Ok(())
}

pub fn array_length(array: &JsArrayType) -> JsValue {
    JsValue::integer(array.borrow().len() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_past_end_pads_with_undefined() {
        let v = JsValue::new_array(vec![JsValue::integer(1)]);
        if let JsValue::Array(a) = &v {
            array_set(a, 3, JsValue::integer(4)).unwrap();
            assert_eq!(
                *a.borrow(),
                vec![
                    JsValue::integer(1),
                    JsValue::Undefined,
                    JsValue::Undefined,
                    JsValue::integer(4)
                ]
            );
            assert_eq!(array_get(a, 10), JsValue::Undefined);
            assert!(array_set(a, -1, JsValue::Null).is_err());
        } else {
            unreachable!()
        }
    }
}
