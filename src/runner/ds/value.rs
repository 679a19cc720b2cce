use std::cell::RefCell;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::object::{JsObject, JsObjectType, ObjectKind};
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::plugin::types::BuiltInFn;
use crate::stack::ensure_sufficient_stack;

pub type JsArrayType = Rc<RefCell<Vec<JsValue>>>;
pub type NativeFunctionType = Rc<BuiltInFn>;

pub enum JsValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(JsNumberType),
    String(String),
    Object(JsObjectType),
    Array(JsArrayType),
    NativeFunction(NativeFunctionType),
}

impl JsValue {
    pub fn new_object(object: JsObject) -> Self {
        JsValue::Object(Rc::new(RefCell::new(object)))
    }

    pub fn new_array(elements: Vec<JsValue>) -> Self {
        JsValue::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn new_native_function(f: BuiltInFn) -> Self {
        JsValue::NativeFunction(Rc::new(f))
    }

    pub fn integer(i: i64) -> Self {
        JsValue::Number(JsNumberType::Integer(i))
    }

    pub fn float(f: f64) -> Self {
        JsValue::Number(JsNumberType::Float(f))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    /// `undefined` and `null` both count as "nothing" for the operator ladder.
    pub fn is_undefined_or_null(&self) -> bool {
        matches!(self, JsValue::Undefined | JsValue::Null)
    }

    pub fn is_function(&self) -> bool {
        match self {
            JsValue::NativeFunction(_) => true,
            JsValue::Object(o) => matches!(o.borrow().kind, ObjectKind::Function(_)),
            _ => false,
        }
    }

    pub fn as_object(&self) -> Option<&JsObjectType> {
        match self {
            JsValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// True when both values point at the same heap entity.
    pub fn same_reference(&self, other: &JsValue) -> bool {
        match (self, other) {
            (JsValue::Object(a), JsValue::Object(b)) => Rc::ptr_eq(a, b),
            (JsValue::Array(a), JsValue::Array(b)) => Rc::ptr_eq(a, b),
            (JsValue::NativeFunction(a), JsValue::NativeFunction(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Clone for JsValue {
    fn clone(&self) -> Self {
        match self {
            JsValue::Undefined => JsValue::Undefined,
            JsValue::Null => JsValue::Null,
            JsValue::Boolean(d) => JsValue::Boolean(*d),
            JsValue::Number(d) => JsValue::Number(*d),
            JsValue::String(d) => JsValue::String(d.to_string()),
            JsValue::Object(o) => JsValue::Object(o.clone()),
            JsValue::Array(a) => JsValue::Array(a.clone()),
            JsValue::NativeFunction(f) => JsValue::NativeFunction(f.clone()),
        }
    }
}

impl Display for JsValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_string(self))
    }
}

impl fmt::Debug for JsValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        debug_value(self, f, &mut Vec::new())
    }
}

/// Arrays that contain themselves print the repeated array as `[...]`.
fn debug_value(v: &JsValue, f: &mut Formatter<'_>, in_progress: &mut Vec<JsArrayType>) -> fmt::Result {
    match v {
        JsValue::Undefined => write!(f, "JsValue::Undefined"),
        JsValue::Null => write!(f, "JsValue::Null"),
        JsValue::Boolean(b) => write!(f, "JsValue::Boolean({})", b),
        JsValue::Number(n) => write!(f, "JsValue::Number({:?})", n),
        JsValue::String(s) => write!(f, "JsValue::String({:?})", s),
        JsValue::Object(_) => write!(f, "JsValue::Object(...)"),
        JsValue::Array(a) => {
            if in_progress.iter().any(|seen| Rc::ptr_eq(seen, a)) {
                return write!(f, "JsValue::Array([...])");
            }
            in_progress.push(a.clone());
            let elements = a.borrow().clone();
            write!(f, "JsValue::Array([")?;
            for (i, e) in elements.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                ensure_sufficient_stack(|| debug_value(e, f, in_progress))?;
            }
            in_progress.pop();
            write!(f, "])")
        }
        JsValue::NativeFunction(_) => write!(f, "JsValue::NativeFunction(...)"),
    }
}

impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Number(a), JsValue::Number(b)) => a == b,
            _ => self.same_reference(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsNumberType {
    Integer(i64),
    Float(f64),
}

impl JsNumberType {
    pub fn as_f64(&self) -> f64 {
        match self {
            JsNumberType::Integer(i) => *i as f64,
            JsNumberType::Float(f) => *f,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match self {
            JsNumberType::Integer(i) => *i,
            JsNumberType::Float(f) if f.is_finite() => *f as i64,
            JsNumberType::Float(_) => 0,
        }
    }
}

impl Display for JsNumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JsNumberType::Integer(i) => write!(f, "{}", i),
            JsNumberType::Float(nf) => {
                if nf.is_nan() {
                    write!(f, "NaN")
                } else if nf.is_infinite() {
                    write!(f, "{}Infinity", if *nf < 0.0 { "-" } else { "" })
                } else if *nf == 0.0 {
                    write!(f, "0")
                } else if nf.fract() == 0.0 && nf.abs() < 1e21 {
                    write!(f, "{:.0}", nf)
                } else {
                    write!(f, "{}", nf)
                }
            }
        }
    }
}
