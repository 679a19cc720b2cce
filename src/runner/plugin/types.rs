//! Core types for native collaborators.

use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::object::{JsObject, ObjectKind};
use crate::runner::ds::value::JsValue;

/// Function signature for built-in methods.
/// Native functions receive the evaluation context, `this` value, and arguments.
pub type NativeFn = fn(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType>;

/// Boxed form of a native function, for closures supplied by an embedder.
pub type PluginFn = Box<dyn Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>>;

/// Built-in function - either compiled-in or embedder-provided.
pub enum BuiltInFn {
    /// Direct function pointer - zero overhead for compiled-in functions.
    Native(NativeFn),

    /// Embedder-provided closure - small vtable indirection cost.
    Plugin(PluginFn),
}

impl BuiltInFn {
    /// Execute this built-in function.
    pub fn call(
        &self,
        ctx: &mut EvalContext,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JErrorType> {
        match self {
            BuiltInFn::Native(f) => f(ctx, this, args),
            BuiltInFn::Plugin(f) => f(ctx, this, args),
        }
    }
}

/// A class object registered on the global scope and consulted by `new`.
pub trait NativeClass {
    fn class_name(&self) -> &str;

    /// `Math` and `JSON` style namespaces answer `false`.
    fn is_constructable(&self) -> bool {
        true
    }

    /// Builds the new instance. The evaluator stamps its `prototype`.
    fn construct(&self, _args: &[JsValue]) -> Result<JsObject, JErrorType> {
        Ok(JsObject::new())
    }
}

/// A wrapped value produced by a [`NativeClass`].
pub trait NativeInstance {
    fn class_name(&self) -> &str;

    /// Value used when the instance is stringified or converted to a number.
    fn primitive_value(&self) -> JsValue;

    /// Strict-equality hook. `None` means "compare as ordinary objects".
    fn are_same_value(&self, _other: &JsValue) -> Option<bool> {
        None
    }

    /// Methods resolved by the instance itself rather than by property
    /// lookup.
    fn has_method(&self, _name: &str) -> bool {
        false
    }

    fn invoke_method(&self, name: &str, _args: &[JsValue]) -> Result<JsValue, JErrorType> {
        Err(JErrorType::TypeError(format!(
            "{} has no method '{}'",
            self.class_name(),
            name
        )))
    }
}

/// Built-in object definition.
/// Describes a global like `Math` or `console` before it is installed on the
/// global object.
pub struct BuiltInObject {
    /// Name the object is registered under (e.g., "Math", "console").
    pub name: String,

    /// Methods, installed as native-function properties.
    pub methods: Vec<(String, BuiltInFn)>,

    /// Static properties.
    pub properties: Vec<(String, JsValue)>,

    /// Class behaviour for `new`, if any.
    pub class: Option<Rc<dyn NativeClass>>,
}

impl BuiltInObject {
    /// Create a new built-in object with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        BuiltInObject {
            name: name.into(),
            methods: Vec::new(),
            properties: Vec::new(),
            class: None,
        }
    }

    /// Add a native method.
    pub fn add_method(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.methods.push((name.into(), BuiltInFn::Native(func)));
        self
    }

    /// Add a property.
    pub fn add_property(mut self, name: impl Into<String>, value: JsValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }

    /// Attach class behaviour.
    pub fn with_class(mut self, class: Rc<dyn NativeClass>) -> Self {
        self.class = Some(class);
        self
    }

    /// Materialises the definition as a script-visible object.
    pub fn into_js_object(self) -> JsObject {
        let kind = match self.class {
            Some(class) => ObjectKind::Class(class),
            None => ObjectKind::Ordinary,
        };
        let mut object = JsObject::with_kind(kind);
        for (name, value) in self.properties {
            object.set_property(&name, value);
        }
        for (name, func) in self.methods {
            object.set_property(&name, JsValue::new_native_function(func));
        }
        object
    }
}
