use std::rc::Rc;

use crate::runner::ds::object::{JsObject, JsObjectType};
use crate::runner::ds::value::JsValue;

pub const THIS_PROPERTY: &str = "this";

/// One frame of the scope chain. The root frame's object is the global
/// object; every frame keeps a handle on it so that assignments to
/// undeclared names can land there.
pub struct Scope {
    parent: Option<Rc<Scope>>,
    root: JsObjectType,
    object: JsObjectType,
}

impl Scope {
    pub fn new_root(root: JsObjectType) -> Rc<Scope> {
        Rc::new(Scope {
            parent: None,
            object: root.clone(),
            root,
        })
    }

    pub fn new_child(parent: &Rc<Scope>, object: JsObjectType) -> Rc<Scope> {
        Rc::new(Scope {
            parent: Some(parent.clone()),
            root: parent.root.clone(),
            object,
        })
    }

    pub fn object(&self) -> &JsObjectType {
        &self.object
    }

    pub fn root(&self) -> &JsObjectType {
        &self.root
    }

    pub fn parent(&self) -> Option<&Rc<Scope>> {
        self.parent.as_ref()
    }

    /// Innermost to outermost; the first frame defining `name` wins.
    pub fn find_symbol(&self, name: &str) -> Option<JsValue> {
        if let Some(v) = self.object.borrow().get_property(name) {
            return Some(v);
        }
        let mut current = self.parent.as_ref();
        while let Some(scope) = current {
            if let Some(v) = scope.object.borrow().get_property(name) {
                return Some(v);
            }
            current = scope.parent.as_ref();
        }
        None
    }

    /// Declares `name` in this frame.
    pub fn declare(&self, name: &str, value: JsValue) {
        self.object.borrow_mut().set_property(name, value);
    }

    /// Updates `name` in this frame if it is already there, otherwise
    /// defines it on the global object.
    pub fn assign(&self, name: &str, value: JsValue) {
        let mut local = self.object.borrow_mut();
        if local.has_property(name) {
            local.set_property(name, value);
        } else {
            drop(local);
            self.root.borrow_mut().set_property(name, value);
        }
    }

    /// Value of `this`, falling back to the global object.
    pub fn this_value(&self) -> JsValue {
        self.find_symbol(THIS_PROPERTY)
            .unwrap_or_else(|| JsValue::Object(self.root.clone()))
    }

    pub fn new_frame_object(this: JsValue) -> JsObjectType {
        let mut frame = JsObject::new();
        frame.set_property(THIS_PROPERTY, this);
        frame.into_shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_to_undeclared_name_lands_on_root() {
        let root = JsObject::new().into_shared();
        let global = Scope::new_root(root.clone());
        let frame = Scope::new_child(&global, JsObject::new().into_shared());
        let inner = Scope::new_child(&frame, JsObject::new().into_shared());

        frame.declare("local", JsValue::integer(1));
        inner.assign("leak", JsValue::integer(2));
        inner.assign("local", JsValue::integer(3));

        assert_eq!(root.borrow().get_property("leak"), Some(JsValue::integer(2)));
        // "local" is not in the innermost frame, so it goes global too.
        assert_eq!(root.borrow().get_property("local"), Some(JsValue::integer(3)));
        assert_eq!(frame.object().borrow().get_property("local"), Some(JsValue::integer(1)));
        assert_eq!(inner.find_symbol("local"), Some(JsValue::integer(1)));
    }

    #[test]
    fn this_falls_back_to_root() {
        let root = JsObject::new().into_shared();
        let global = Scope::new_root(root.clone());
        assert!(global.this_value().same_reference(&JsValue::Object(root)));
    }
}
