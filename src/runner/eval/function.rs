//! Function calls and `new`.
//!
//! A call evaluates its arguments left to right, then dispatches on what the
//! callee turned out to be: a native function, a user function, or, for
//! `target.name(...)` call sites, a method the target dispatches itself.

use std::rc::Rc;

use tracing::trace;

use crate::parser::ast::{AstArena, FunctionData, Meta, NodeId, NodeKind};
use crate::runner::ds::error::{JErrorType, JsError};
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::object::{find_in_prototype_chain, JsObject, JsObjectType, PROTOTYPE_PROPERTY};
use crate::runner::ds::scope::Scope;
use crate::runner::ds::value::JsValue;
use crate::stack::ensure_sufficient_stack;

use super::expression::{evaluate_expression, read_property};
use super::statement::execute_statement;
use super::types::{CompletionType, ValueResult};

/// Root providers consulted, in this order, when a method is not found on
/// the target itself.
const STRING_PROVIDER: &str = "String";
const ARRAY_PROVIDER: &str = "Array";
const OBJECT_PROVIDER: &str = "Object";

/// Evaluates a `FunctionCall` node.
pub fn evaluate_call(
    tree: &AstArena,
    call: NodeId,
    callee: NodeId,
    arguments: &[NodeId],
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> ValueResult {
    let meta = &tree.get(call).meta;
    if let NodeKind::DotAccess { parent, property } = &tree.get(callee).kind {
        let this = evaluate_expression(tree, *parent, scope, ctx)?;
        let function = find_function_call(&ctx.root, &this, property).map_err(|e| e.at(meta))?;
        let args = evaluate_arguments(tree, meta, arguments, scope, ctx)?;
        return call_value(meta, &function, this, args, Some(property), scope, ctx);
    }

    let function = evaluate_expression(tree, callee, scope, ctx)?;
    let this = JsValue::Object(scope.object().clone());
    let args = evaluate_arguments(tree, meta, arguments, scope, ctx)?;
    call_value(meta, &function, this, args, None, scope, ctx)
}

/// Every invocation is a cancellation checkpoint, taken before the
/// arguments are evaluated.
fn evaluate_arguments(
    tree: &AstArena,
    meta: &Meta,
    arguments: &[NodeId],
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> Result<Vec<JsValue>, JsError> {
    ctx.check_timeout(meta)?;
    arguments
        .iter()
        .map(|a| evaluate_expression(tree, *a, scope, ctx))
        .collect()
}

/// Resolves `target.name` for a call.
///
/// Returns `undefined` when the target dispatches `name` itself, so that
/// [`call_value`] hands the call to the instance.
pub fn find_function_call(
    root: &JsObjectType,
    target: &JsValue,
    name: &str,
) -> Result<JsValue, JErrorType> {
    if let JsValue::Object(o) = target {
        if let Some(f) = find_in_prototype_chain(o, name) {
            return Ok(f);
        }
        if o.borrow().native_instance().map_or(false, |i| i.has_method(name)) {
            return Ok(JsValue::Undefined);
        }
    }

    if matches!(target, JsValue::String(_)) {
        if let Some(f) = find_root_class_property(root, STRING_PROVIDER, name) {
            return Ok(f);
        }
    }
    if matches!(target, JsValue::Array(_)) {
        if let Some(f) = find_root_class_property(root, ARRAY_PROVIDER, name) {
            return Ok(f);
        }
    }
    if let Some(f) = find_root_class_property(root, OBJECT_PROVIDER, name) {
        return Ok(f);
    }

    Err(JErrorType::TypeError(format!("Unknown function '{}'", name)))
}

fn find_root_class_property(root: &JsObjectType, class_name: &str, name: &str) -> Option<JsValue> {
    let class = match root.borrow().get_property(class_name) {
        Some(JsValue::Object(c)) => c,
        _ => return None,
    };
    let property = class.borrow().get_property(name);
    property
}

/// Calls an already evaluated function value.
///
/// `method` is the property name when the call site was `target.method(...)`;
/// only then may a native instance dispatch the call itself.
pub fn call_value(
    meta: &Meta,
    function: &JsValue,
    this: JsValue,
    args: Vec<JsValue>,
    method: Option<&str>,
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> ValueResult {
    if let JsValue::NativeFunction(f) = function {
        let f = f.clone();
        return f.call(ctx, this, args).map_err(|e| e.at(meta));
    }

    let user_function = function
        .as_object()
        .and_then(|o| o.borrow().function_data().cloned());
    if let Some(data) = user_function {
        return invoke_user_function(meta, &data, this, args, scope, ctx);
    }

    if let (Some(name), JsValue::Object(o)) = (method, &this) {
        let target = o.borrow();
        if let Some(instance) = target.native_instance() {
            if instance.has_method(name) {
                return instance.invoke_method(name, &args).map_err(|e| e.at(meta));
            }
        }
    }

    Err(JErrorType::TypeError("This expression is not a function!".to_string()).at(meta))
}

/// Runs a user function in a fresh frame holding `this` and the parameters.
///
/// The frame's parent is the caller's scope, not the scope the function was
/// declared in: free names resolve along the dynamic call chain.
pub fn invoke_user_function(
    meta: &Meta,
    function: &Rc<FunctionData>,
    this: JsValue,
    args: Vec<JsValue>,
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> ValueResult {
    ctx.enter_call(meta)?;
    trace!(
        function = function.name.as_deref().unwrap_or("<anonymous>"),
        depth = ctx.call_depth(),
        "invoking function"
    );

    let frame = Scope::new_frame_object(this);
    {
        let mut frame = frame.borrow_mut();
        let mut args = args.into_iter();
        for parameter in &function.parameters {
            frame.set_property(parameter, args.next().unwrap_or(JsValue::Undefined));
        }
    }
    let call_scope = Scope::new_child(scope, frame);

    let result = ensure_sufficient_stack(|| {
        execute_statement(&function.tree, function.body, &call_scope, ctx)
    });
    ctx.exit_call();

    let completion = result?;
    Ok(match completion.completion_type {
        CompletionType::Return => completion.get_value(),
        _ => JsValue::Undefined,
    })
}

/// Evaluates `new a.b.C(args)`.
///
/// A user function runs with a fresh object as `this` and that object is the
/// result. Any other object acts as a class: a native class builds the
/// instance (or refuses to), anything else yields an empty object. Either
/// way the instance's `prototype` is the class. A path that resolves to
/// neither yields `undefined`.
pub fn evaluate_new(
    tree: &AstArena,
    id: NodeId,
    class_path: &[String],
    arguments: &[NodeId],
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> ValueResult {
    let meta = &tree.get(id).meta;
    let class_value = resolve_class_path(class_path, scope);
    let class_object = match &class_value {
        JsValue::Object(o) => o.clone(),
        _ => return Ok(JsValue::Undefined),
    };

    let function = class_object.borrow().function_data().cloned();
    if let Some(function) = function {
        let instance = JsObject::new().into_shared();
        if let Some(prototype) = class_object.borrow().prototype() {
            instance
                .borrow_mut()
                .set_property(PROTOTYPE_PROPERTY, JsValue::Object(prototype));
        }
        let args = evaluate_arguments(tree, meta, arguments, scope, ctx)?;
        invoke_user_function(meta, &function, JsValue::Object(instance.clone()), args, scope, ctx)?;
        return Ok(JsValue::Object(instance));
    }

    let args = evaluate_arguments(tree, meta, arguments, scope, ctx)?;
    let class = class_object.borrow().native_class().cloned();
    let mut instance = match class {
        Some(class) => {
            if !class.is_constructable() {
                let class_id = class_path.last().map_or("", String::as_str);
                return Err(JErrorType::TypeError(format!("{} is not constructable!", class_id)).at(meta));
            }
            class.construct(&args).map_err(|e| e.at(meta))?
        }
        None => JsObject::new(),
    };
    instance.set_property(PROTOTYPE_PROPERTY, class_value.clone());
    Ok(JsValue::new_object(instance))
}

fn resolve_class_path(class_path: &[String], scope: &Rc<Scope>) -> JsValue {
    let mut segments = class_path.iter();
    let mut value = match segments.next().and_then(|first| scope.find_symbol(first)) {
        Some(v) => v,
        None => return JsValue::Undefined,
    };
    for segment in segments {
        value = read_property(&value, segment);
    }
    value
}
