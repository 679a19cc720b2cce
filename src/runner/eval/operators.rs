//! The binary operator coercion ladder.
//!
//! Both operands are already evaluated. The ladder picks one branch:
//!
//! 1. both `undefined`/`null`
//! 2. both numeric-or-undefined (booleans count as 0/1): doubles if either
//!    side is a double, 64-bit integers otherwise
//! 3. either side an array or object
//! 4. otherwise both sides stringified
//!
//! Strict equality does not use the ladder.

use std::cmp::Ordering;

use crate::parser::ast::BinaryOperator;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::test_and_comparison::strictly_equal;
use crate::runner::ds::operations::type_conversion::{to_ladder_double, to_ladder_int, to_string};
use crate::runner::ds::value::{JsNumberType, JsValue};

pub fn apply_binary_operator(
    operator: BinaryOperator,
    a: &JsValue,
    b: &JsValue,
) -> Result<JsValue, JErrorType> {
    match operator {
        BinaryOperator::StrictlyEqual => return Ok(JsValue::Boolean(strictly_equal(a, b))),
        BinaryOperator::StrictlyUnequal => return Ok(JsValue::Boolean(!strictly_equal(a, b))),
        _ => {}
    }

    if a.is_undefined_or_null() && b.is_undefined_or_null() {
        return Ok(with_undefined(operator));
    }
    if is_numeric_or_undefined(a) && is_numeric_or_undefined(b) {
        return if is_double(a) || is_double(b) {
            with_doubles(operator, to_ladder_double(a), to_ladder_double(b))
        } else {
            with_ints(operator, to_ladder_int(a), to_ladder_int(b))
        };
    }
    if is_array_or_object(a) || is_array_or_object(b) {
        return with_array_or_object(operator, a, b);
    }
    with_strings(operator, &to_string(a), &to_string(b))
}

fn is_numeric_or_undefined(v: &JsValue) -> bool {
    matches!(v, JsValue::Number(_) | JsValue::Boolean(_) | JsValue::Undefined)
}

fn is_double(v: &JsValue) -> bool {
    matches!(v, JsValue::Number(JsNumberType::Float(_)))
}

fn is_array_or_object(v: &JsValue) -> bool {
    matches!(v, JsValue::Array(_) | JsValue::Object(_) | JsValue::NativeFunction(_))
}

fn not_allowed(operator: BinaryOperator, type_name: &str) -> JErrorType {
    JErrorType::TypeError(format!(
        "'{}' is not allowed on the {} type",
        operator.symbol(),
        type_name
    ))
}

fn with_undefined(operator: BinaryOperator) -> JsValue {
    match operator {
        BinaryOperator::Equal => JsValue::Boolean(true),
        BinaryOperator::NotEqual => JsValue::Boolean(false),
        _ => JsValue::Undefined,
    }
}

fn compare<T: PartialOrd>(operator: BinaryOperator, a: T, b: T) -> Option<bool> {
    let ordering = a.partial_cmp(&b);
    Some(match operator {
        BinaryOperator::Equal => ordering == Some(Ordering::Equal),
        BinaryOperator::NotEqual => ordering != Some(Ordering::Equal),
        BinaryOperator::LessThan => ordering == Some(Ordering::Less),
        BinaryOperator::LessThanEqual => {
            matches!(ordering, Some(Ordering::Less) | Some(Ordering::Equal))
        }
        BinaryOperator::GreaterThan => ordering == Some(Ordering::Greater),
        BinaryOperator::GreaterThanEqual => {
            matches!(ordering, Some(Ordering::Greater) | Some(Ordering::Equal))
        }
        _ => return None,
    })
}

fn with_ints(operator: BinaryOperator, a: i64, b: i64) -> Result<JsValue, JErrorType> {
    if let Some(result) = compare(operator, a, b) {
        return Ok(JsValue::Boolean(result));
    }
    Ok(match operator {
        BinaryOperator::Add => JsValue::integer(a.wrapping_add(b)),
        BinaryOperator::Subtract => JsValue::integer(a.wrapping_sub(b)),
        BinaryOperator::Multiply => JsValue::integer(a.wrapping_mul(b)),
        BinaryOperator::Divide => {
            if b != 0 {
                JsValue::float(a as f64 / b as f64)
            } else {
                JsValue::float(f64::INFINITY)
            }
        }
        BinaryOperator::Modulo => {
            if b != 0 {
                JsValue::integer(a.wrapping_rem(b))
            } else {
                JsValue::float(f64::INFINITY)
            }
        }
        BinaryOperator::BitwiseAnd => JsValue::integer(a & b),
        BinaryOperator::BitwiseOr => JsValue::integer(a | b),
        BinaryOperator::BitwiseXor => JsValue::integer(a ^ b),
        BinaryOperator::BitwiseLeftShift => JsValue::integer(a.wrapping_shl((b & 63) as u32)),
        BinaryOperator::BitwiseRightShift => JsValue::integer(a.wrapping_shr((b & 63) as u32)),
        BinaryOperator::BitwiseUnsignedRightShift => {
            JsValue::integer(((a as u32) >> ((b & 31) as u32)) as i64)
        }
        _ => return Err(not_allowed(operator, "Integer")),
    })
}

fn with_doubles(operator: BinaryOperator, a: f64, b: f64) -> Result<JsValue, JErrorType> {
    if let Some(result) = compare(operator, a, b) {
        return Ok(JsValue::Boolean(result));
    }
    Ok(match operator {
        BinaryOperator::Add => JsValue::float(a + b),
        BinaryOperator::Subtract => JsValue::float(a - b),
        BinaryOperator::Multiply => JsValue::float(a * b),
        BinaryOperator::Divide => {
            if b != 0.0 {
                JsValue::float(a / b)
            } else {
                JsValue::float(f64::INFINITY)
            }
        }
        BinaryOperator::Modulo => {
            if b != 0.0 {
                JsValue::float(a % b)
            } else {
                JsValue::float(f64::INFINITY)
            }
        }
        _ => return Err(not_allowed(operator, "Double")),
    })
}

fn with_array_or_object(
    operator: BinaryOperator,
    a: &JsValue,
    b: &JsValue,
) -> Result<JsValue, JErrorType> {
    match operator {
        BinaryOperator::Equal => Ok(JsValue::Boolean(a.same_reference(b))),
        BinaryOperator::NotEqual => Ok(JsValue::Boolean(!a.same_reference(b))),
        _ => {
            let culprit = if is_array_or_object(a) { a } else { b };
            let type_name = if matches!(culprit, JsValue::Array(_)) {
                "Array"
            } else {
                "Object"
            };
            Err(not_allowed(operator, type_name))
        }
    }
}

fn with_strings(operator: BinaryOperator, a: &str, b: &str) -> Result<JsValue, JErrorType> {
    if let Some(result) = compare(operator, a, b) {
        return Ok(JsValue::Boolean(result));
    }
    match operator {
        BinaryOperator::Add => Ok(JsValue::String(format!("{}{}", a, b))),
        _ => Err(not_allowed(operator, "String")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::object::JsObject;
    use pretty_assertions::assert_eq;

    fn op(operator: BinaryOperator, a: JsValue, b: JsValue) -> Result<JsValue, JErrorType> {
        apply_binary_operator(operator, &a, &b)
    }

    #[test]
    fn division_and_modulo_by_zero_are_positive_infinity() {
        assert_eq!(
            op(BinaryOperator::Divide, JsValue::integer(1), JsValue::integer(0)),
            Ok(JsValue::float(f64::INFINITY))
        );
        assert_eq!(
            op(BinaryOperator::Modulo, JsValue::integer(5), JsValue::integer(0)),
            Ok(JsValue::float(f64::INFINITY))
        );
        assert_eq!(
            op(BinaryOperator::Divide, JsValue::float(-1.0), JsValue::integer(0)),
            Ok(JsValue::float(f64::INFINITY))
        );
    }

    #[test]
    fn integer_division_produces_double() {
        assert_eq!(
            op(BinaryOperator::Divide, JsValue::integer(7), JsValue::integer(2)),
            Ok(JsValue::float(3.5))
        );
        assert_eq!(
            op(BinaryOperator::Modulo, JsValue::integer(7), JsValue::integer(3)),
            Ok(JsValue::integer(1))
        );
    }

    #[test]
    fn promotes_to_double_when_either_side_is() {
        assert_eq!(
            op(BinaryOperator::Add, JsValue::integer(1), JsValue::float(0.5)),
            Ok(JsValue::float(1.5))
        );
        assert_eq!(
            op(BinaryOperator::Add, JsValue::Boolean(true), JsValue::integer(1)),
            Ok(JsValue::integer(2))
        );
    }

    #[test]
    fn both_undefined_case() {
        assert_eq!(
            op(BinaryOperator::Equal, JsValue::Undefined, JsValue::Null),
            Ok(JsValue::Boolean(true))
        );
        assert_eq!(
            op(BinaryOperator::NotEqual, JsValue::Undefined, JsValue::Undefined),
            Ok(JsValue::Boolean(false))
        );
        assert_eq!(
            op(BinaryOperator::Add, JsValue::Undefined, JsValue::Undefined),
            Ok(JsValue::Undefined)
        );
    }

    #[test]
    fn strings_concatenate_and_compare() {
        assert_eq!(
            op(BinaryOperator::Add, JsValue::String("a".into()), JsValue::integer(1)),
            Ok(JsValue::String("a1".into()))
        );
        assert_eq!(
            op(BinaryOperator::LessThan, JsValue::String("abc".into()), JsValue::String("abd".into())),
            Ok(JsValue::Boolean(true))
        );
        assert_eq!(
            op(BinaryOperator::Subtract, JsValue::String("a".into()), JsValue::integer(1)),
            Err(JErrorType::TypeError("'-' is not allowed on the String type".into()))
        );
    }

    #[test]
    fn objects_reject_arithmetic() {
        let o = JsValue::new_object(JsObject::new());
        assert_eq!(
            op(BinaryOperator::Add, JsValue::integer(1), JsValue::new_array(vec![])),
            Err(JErrorType::TypeError("'+' is not allowed on the Array type".into()))
        );
        assert_eq!(
            op(BinaryOperator::Multiply, o.clone(), JsValue::integer(2)),
            Err(JErrorType::TypeError("'*' is not allowed on the Object type".into()))
        );
        assert_eq!(op(BinaryOperator::Equal, o.clone(), o), Ok(JsValue::Boolean(true)));
    }

    #[test]
    fn bitwise_and_shifts() {
        assert_eq!(
            op(BinaryOperator::BitwiseUnsignedRightShift, JsValue::integer(-1), JsValue::integer(28)),
            Ok(JsValue::integer(15))
        );
        assert_eq!(
            op(BinaryOperator::BitwiseLeftShift, JsValue::integer(1), JsValue::integer(4)),
            Ok(JsValue::integer(16))
        );
        assert_eq!(
            op(BinaryOperator::BitwiseAnd, JsValue::float(1.5), JsValue::integer(1)),
            Err(JErrorType::TypeError("'&' is not allowed on the Double type".into()))
        );
    }

    #[test]
    fn loose_equality_between_number_and_undefined() {
        assert_eq!(
            op(BinaryOperator::Equal, JsValue::integer(0), JsValue::Undefined),
            Ok(JsValue::Boolean(true))
        );
    }
}
