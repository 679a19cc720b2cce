use std::cell::RefCell;
use std::rc::Rc;

use crate::parser::ast::FunctionData;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::{NativeClass, NativeInstance};

pub type JsObjectType = Rc<RefCell<JsObject>>;

pub const PROTOTYPE_PROPERTY: &str = "prototype";

/// What an object is, beyond its property bag.
pub enum ObjectKind {
    Ordinary,
    /// A script function. The parsed body is shared between every function
    /// object created from the same literal.
    Function(Rc<FunctionData>),
    /// A registered native class such as `Number` or `Math`.
    Class(Rc<dyn NativeClass>),
    /// An instance produced by a native class constructor.
    Instance(Box<dyn NativeInstance>),
}

/// An ordered name to value property bag. Used for user objects, function
/// objects, native classes and for scope frames.
pub struct JsObject {
    properties: Vec<(String, JsValue)>,
    pub kind: ObjectKind,
}

impl JsObject {
    pub fn new() -> Self {
        JsObject {
            properties: Vec::new(),
            kind: ObjectKind::Ordinary,
        }
    }

    pub fn with_kind(kind: ObjectKind) -> Self {
        JsObject {
            properties: Vec::new(),
            kind,
        }
    }

    pub fn new_function(function: Rc<FunctionData>) -> Self {
        JsObject::with_kind(ObjectKind::Function(function))
    }

    pub fn into_shared(self) -> JsObjectType {
        Rc::new(RefCell::new(self))
    }

    pub fn get_property(&self, name: &str) -> Option<JsValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|(n, _)| n == name)
    }

    /// Replaces the value in place if the name exists, appends otherwise.
    pub fn set_property(&mut self, name: &str, value: JsValue) {
        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.properties.push((name.to_string(), value)),
        }
    }

    pub fn remove_property(&mut self, name: &str) -> Option<JsValue> {
        let idx = self.properties.iter().position(|(n, _)| n == name)?;
        Some(self.properties.remove(idx).1)
    }

    pub fn property_names(&self) -> Vec<String> {
        self.properties.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn properties(&self) -> &[(String, JsValue)] {
        &self.properties
    }

    pub fn prototype(&self) -> Option<JsObjectType> {
        match self.get_property(PROTOTYPE_PROPERTY) {
            Some(JsValue::Object(o)) => Some(o),
            _ => None,
        }
    }

    pub fn function_data(&self) -> Option<&Rc<FunctionData>> {
        match &self.kind {
            ObjectKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn native_instance(&self) -> Option<&dyn NativeInstance> {
        match &self.kind {
            ObjectKind::Instance(i) => Some(i.as_ref()),
            _ => None,
        }
    }

    pub fn native_class(&self) -> Option<&Rc<dyn NativeClass>> {
        match &self.kind {
            ObjectKind::Class(c) => Some(c),
            _ => None,
        }
    }
}

impl Default for JsObject {
    fn default() -> Self {
        Self::new()
    }
}

/// Looks `name` up on `object` and then along its `prototype` links. A
/// prototype link that loops back is treated as the end of the chain.
pub fn find_in_prototype_chain(object: &JsObjectType, name: &str) -> Option<JsValue> {
    let mut visited: Vec<JsObjectType> = vec![];
    let mut current = Some(object.clone());
    while let Some(o) = current {
        if visited.iter().any(|v| Rc::ptr_eq(v, &o)) {
            return None;
        }
        let next = {
            let borrowed = o.borrow();
            if let Some(v) = borrowed.get_property(name) {
                return Some(v);
            }
            borrowed.prototype()
        };
        visited.push(o);
        current = next;
    }
    None
}
