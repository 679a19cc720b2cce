//! Registry of the globals installed on a fresh engine.

use tracing::debug;

use super::types::{BuiltInFn, BuiltInObject, NativeFn};
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::value::JsValue;
use crate::runner::std_lib::register_core_builtins;

/// Registry for built-in objects.
/// Collects global objects, global functions and global constants, then
/// installs all of them on a global object in registration order.
pub struct BuiltInRegistry {
    /// All registered built-in objects.
    objects: Vec<BuiltInObject>,

    /// Functions callable without a receiver (e.g. `eval`, `typeof`).
    root_methods: Vec<(String, BuiltInFn)>,

    /// Global constants (e.g. `NaN`).
    root_properties: Vec<(String, JsValue)>,
}

impl BuiltInRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltInRegistry {
            objects: Vec::new(),
            root_methods: Vec::new(),
            root_properties: Vec::new(),
        }
    }

    /// Create a registry with the standard natives.
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        register_core_builtins(&mut registry);
        registry
    }

    /// Register a built-in object. A later registration under the same name
    /// replaces the earlier one.
    pub fn register_object(&mut self, obj: BuiltInObject) {
        self.objects.retain(|o| o.name != obj.name);
        self.objects.push(obj);
    }

    pub fn register_root_method(&mut self, name: impl Into<String>, func: NativeFn) {
        self.root_methods.push((name.into(), BuiltInFn::Native(func)));
    }

    pub fn register_root_property(&mut self, name: impl Into<String>, value: JsValue) {
        self.root_properties.push((name.into(), value));
    }

    /// Get a registered object by name.
    pub fn get_object(&self, name: &str) -> Option<&BuiltInObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Check if an object exists in the registry.
    pub fn has_object(&self, name: &str) -> bool {
        self.get_object(name).is_some()
    }

    /// Check if a method exists on an object.
    pub fn has_method(&self, object: &str, method: &str) -> bool {
        self.get_object(object)
            .map(|obj| obj.methods.iter().any(|(m, _)| m == method))
            .unwrap_or(false)
    }

    pub fn object_names(&self) -> Vec<&str> {
        self.objects.iter().map(|o| o.name.as_str()).collect()
    }

    /// Installs everything on `root`.
    pub fn install(self, root: &JsObjectType) {
        let mut root = root.borrow_mut();
        for (name, value) in self.root_properties {
            root.set_property(&name, value);
        }
        for (name, func) in self.root_methods {
            root.set_property(&name, JsValue::new_native_function(func));
        }
        for obj in self.objects {
            debug!(name = obj.name.as_str(), "installing native object");
            let name = obj.name.clone();
            root.set_property(&name, JsValue::new_object(obj.into_js_object()));
        }
    }
}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        Self::new()
    }
}
