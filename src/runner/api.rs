//! The embedding façade.
//!
//! A [`JavascriptEngine`] owns one global object. Scripts run against it one
//! at a time on the calling thread; globals they define persist from one
//! call to the next. Every entry point restarts the execution deadline.

use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::parser::ast::Meta;
use crate::parser::JsParser;
use crate::runner::config::EngineConfig;
use crate::runner::ds::error::{JErrorType, JsError};
use crate::runner::ds::execution_context::{EvalContext, StopHandle};
use crate::runner::ds::object::{JsObject, JsObjectType};
use crate::runner::ds::scope::Scope;
use crate::runner::ds::value::JsValue;
use crate::runner::eval::{call_value, evaluate_expression, execute_statement};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::BuiltInFn;

pub struct JavascriptEngine {
    ctx: EvalContext,
    maximum_execution_time: Duration,
}

impl JavascriptEngine {
    /// An engine with the default configuration and the standard natives.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let root = JsObject::new().into_shared();
        if config.install_std_lib {
            BuiltInRegistry::with_core().install(&root);
        }
        debug!(
            timeout_ms = config.maximum_execution_time.as_millis() as u64,
            max_call_depth = config.max_call_depth,
            std_lib = config.install_std_lib,
            "engine created"
        );
        JavascriptEngine {
            ctx: EvalContext::new(root, config.max_call_depth),
            maximum_execution_time: config.maximum_execution_time,
        }
    }

    pub fn maximum_execution_time(&self) -> Duration {
        self.maximum_execution_time
    }

    /// Applies from the next execute/evaluate/call onwards.
    pub fn set_maximum_execution_time(&mut self, timeout: Duration) {
        self.maximum_execution_time = timeout;
    }

    pub fn set_max_call_depth(&mut self, depth: usize) {
        self.ctx.set_max_call_depth(depth);
    }

    /// Runs every statement in `source` for its side effects on the global
    /// object. Effects of statements that ran before a failure are kept.
    pub fn execute(&mut self, source: &str) -> Result<(), JsError> {
        debug!(len = source.len(), "execute");
        self.prepare_timeout();
        let program = JsParser::parse_to_ast_from_str(source)?;
        let scope = self.root_scope();
        execute_statement(&program.tree, program.root, &scope, &mut self.ctx)?;
        Ok(())
    }

    /// Evaluates a single expression and returns its value.
    pub fn evaluate(&mut self, source: &str) -> Result<JsValue, JsError> {
        debug!(len = source.len(), "evaluate");
        self.prepare_timeout();
        let program = JsParser::parse_expression_from_str(source)?;
        let scope = self.root_scope();
        evaluate_expression(&program.tree, program.root, &scope, &mut self.ctx)
    }

    /// Calls the global function `name`, with the global object as `this`.
    pub fn call_function(&mut self, name: &str, args: Vec<JsValue>) -> Result<JsValue, JsError> {
        debug!(function = name, args = args.len(), "call function");
        self.prepare_timeout();
        let meta = Meta::new(Rc::from(name), 0);
        let function = self
            .root()
            .borrow()
            .get_property(name)
            .filter(JsValue::is_function)
            .ok_or_else(|| JErrorType::TypeError(format!("Unknown function '{}'", name)).at(&meta))?;
        let scope = self.root_scope();
        let this = JsValue::Object(self.root().clone());
        call_value(&meta, &function, this, args, None, &scope, &mut self.ctx)
    }

    /// Calls `function` with `scope_object` as `this`, in a scope whose
    /// innermost frame is `scope_object`.
    pub fn call_function_object(
        &mut self,
        scope_object: &JsObjectType,
        function: &JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JsError> {
        debug!(args = args.len(), "call function object");
        self.prepare_timeout();
        let meta = Meta::new(Rc::from(""), 0);
        let scope = Scope::new_child(&self.root_scope(), scope_object.clone());
        let this = JsValue::Object(scope_object.clone());
        call_value(&meta, function, this, args, None, &scope, &mut self.ctx)
    }

    /// Installs `object` on the global object under `name` and returns the
    /// shared handle scripts will see.
    pub fn register_native_object(&mut self, name: &str, object: JsObject) -> JsObjectType {
        debug_assert!(
            !self.root().borrow().has_property(name),
            "'{}' is already registered",
            name
        );
        debug!(name, "register native object");
        let shared = object.into_shared();
        self.root()
            .borrow_mut()
            .set_property(name, JsValue::Object(shared.clone()));
        shared
    }

    /// Installs a native function on the global object.
    pub fn register_method<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + 'static,
    {
        debug_assert!(
            !self.root().borrow().has_property(name),
            "'{}' is already registered",
            name
        );
        debug!(name, "register method");
        self.root().borrow_mut().set_property(
            name,
            JsValue::new_native_function(BuiltInFn::Plugin(Box::new(function))),
        );
    }

    pub fn deregister_native_object(&mut self, name: &str) {
        let removed = self.root().borrow_mut().remove_property(name);
        debug_assert!(removed.is_some(), "'{}' is not registered", name);
        debug!(name, "deregister native object");
    }

    /// Aborts the running (or next) script at its next loop iteration or
    /// function call, with "Interrupted".
    pub fn stop(&self) {
        debug!("stop requested");
        self.ctx.stop();
    }

    /// A handle that can stop this engine from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.ctx.stop_handle()
    }

    /// Snapshot of the global object's properties in insertion order.
    pub fn root_object_properties(&self) -> Vec<(String, JsValue)> {
        self.root().borrow().properties().to_vec()
    }

    fn root(&self) -> &JsObjectType {
        &self.ctx.root
    }

    fn root_scope(&self) -> Rc<Scope> {
        Scope::new_root(self.ctx.root.clone())
    }

    fn prepare_timeout(&mut self) {
        self.ctx.reset_deadline(self.maximum_execution_time);
    }
}

impl Default for JavascriptEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn globals_persist_between_calls() {
        let mut engine = JavascriptEngine::new();
        engine.execute("var a = 2;").unwrap();
        engine.execute("a = a * 21;").unwrap();
        assert_eq!(engine.evaluate("a").unwrap(), JsValue::integer(42));
    }

    #[test]
    fn without_std_lib_the_root_is_empty() {
        let engine = JavascriptEngine::with_config(EngineConfig::new().with_std_lib(false));
        assert!(engine.root_object_properties().is_empty());
    }

    #[test]
    fn call_function_of_unknown_name() {
        let mut engine = JavascriptEngine::new();
        let err = engine.call_function("missing", vec![]).unwrap_err();
        assert_eq!(err.to_string(), "Line 1, column 1: Unknown function 'missing'");
    }

    #[test]
    fn registered_closure_is_callable() {
        let mut engine = JavascriptEngine::new();
        engine.register_method("sum", |_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>| {
            Ok(JsValue::integer(args.iter().map(|a| match a {
                JsValue::Number(n) => n.as_i64(),
                _ => 0,
            }).sum()))
        });
        assert_eq!(engine.evaluate("sum(1, 2, 3)").unwrap(), JsValue::integer(6));
    }
}
