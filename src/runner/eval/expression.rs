//! Expression evaluation.
//!
//! [`evaluate_expression`] produces the value of any expression node;
//! [`assign`] stores into the handful of node kinds that can appear on the
//! left of `=`. Everything else about calls and `new` lives in
//! [`super::function`].

use std::rc::Rc;

use crate::parser::ast::{
    AstArena, LiteralType, LogicalOperator, NodeId, NodeKind, NumberLiteralType, UnaryOperator,
};
use crate::runner::ds::array_object::{array_get, array_length, array_set, to_array_index, LENGTH_PROPERTY};
use crate::runner::ds::error::{JErrorType, JsError};
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::object::JsObject;
use crate::runner::ds::operations::type_conversion::{to_boolean, to_string, type_of};
use crate::runner::ds::scope::Scope;
use crate::runner::ds::value::JsValue;
use crate::stack::ensure_sufficient_stack;

use super::function::{evaluate_call, evaluate_new};
use super::operators::apply_binary_operator;
use super::types::ValueResult;

/// Evaluate an expression node and return its value.
pub fn evaluate_expression(
    tree: &AstArena,
    id: NodeId,
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> ValueResult {
    ensure_sufficient_stack(|| evaluate_node(tree, id, scope, ctx))
}

fn evaluate_node(tree: &AstArena, id: NodeId, scope: &Rc<Scope>, ctx: &mut EvalContext) -> ValueResult {
    let node = tree.get(id);
    match &node.kind {
        NodeKind::Literal(literal) => Ok(literal_value(literal)),

        NodeKind::Identifier(name) => Ok(scope.find_symbol(name).unwrap_or(JsValue::Undefined)),

        NodeKind::This => Ok(scope.this_value()),

        NodeKind::DotAccess { parent, property } => {
            let target = evaluate_expression(tree, *parent, scope, ctx)?;
            Ok(read_property(&target, property))
        }

        NodeKind::Subscript { object, index } => {
            let target = evaluate_expression(tree, *object, scope, ctx)?;
            let key = evaluate_expression(tree, *index, scope, ctx)?;
            Ok(read_subscript(&target, &key))
        }

        NodeKind::Unary { operator, argument } => {
            let value = evaluate_expression(tree, *argument, scope, ctx)?;
            Ok(match operator {
                UnaryOperator::LogicalNot => JsValue::Boolean(!to_boolean(&value)),
                UnaryOperator::TypeOf => JsValue::String(type_of(&value).to_string()),
            })
        }

        NodeKind::Binary { operator, left, right } => {
            let a = evaluate_expression(tree, *left, scope, ctx)?;
            let b = evaluate_expression(tree, *right, scope, ctx)?;
            apply_binary_operator(*operator, &a, &b).map_err(|e| e.at(&node.meta))
        }

        NodeKind::Logical { operator, left, right } => {
            let a = to_boolean(&evaluate_expression(tree, *left, scope, ctx)?);
            let result = match operator {
                LogicalOperator::And => a && to_boolean(&evaluate_expression(tree, *right, scope, ctx)?),
                LogicalOperator::Or => a || to_boolean(&evaluate_expression(tree, *right, scope, ctx)?),
            };
            Ok(JsValue::Boolean(result))
        }

        NodeKind::Ternary { condition, true_branch, false_branch } => {
            let branch = if to_boolean(&evaluate_expression(tree, *condition, scope, ctx)?) {
                *true_branch
            } else {
                *false_branch
            };
            evaluate_expression(tree, branch, scope, ctx)
        }

        NodeKind::Assignment { target, value } => {
            let value = evaluate_expression(tree, *value, scope, ctx)?;
            assign(tree, *target, scope, ctx, value.clone())?;
            Ok(value)
        }

        NodeKind::CompoundAssignment { target, operator, value, is_postfix } => {
            let old = evaluate_expression(tree, *target, scope, ctx)?;
            let rhs = evaluate_expression(tree, *value, scope, ctx)?;
            let new = apply_binary_operator(*operator, &old, &rhs).map_err(|e| e.at(&node.meta))?;
            assign(tree, *target, scope, ctx, new.clone())?;
            Ok(if *is_postfix { old } else { new })
        }

        NodeKind::FunctionCall { callee, arguments } => {
            evaluate_call(tree, id, *callee, arguments, scope, ctx)
        }

        NodeKind::New { class_path, arguments } => {
            evaluate_new(tree, id, class_path, arguments, scope, ctx)
        }

        NodeKind::ObjectLiteral(entries) => {
            let mut object = JsObject::new();
            for (name, value) in entries {
                let value = evaluate_expression(tree, *value, scope, ctx)?;
                object.set_property(name, value);
            }
            Ok(JsValue::new_object(object))
        }

        NodeKind::ArrayLiteral(elements) => {
            let values = elements
                .iter()
                .map(|e| evaluate_expression(tree, *e, scope, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(JsValue::new_array(values))
        }

        NodeKind::FunctionLiteral(function) => {
            Ok(JsValue::new_object(JsObject::new_function(function.clone())))
        }

        _ => Err(JErrorType::SyntaxError("Expected an expression".to_string()).at(&node.meta)),
    }
}

pub fn literal_value(literal: &LiteralType) -> JsValue {
    match literal {
        LiteralType::Undefined => JsValue::Undefined,
        LiteralType::Null => JsValue::Null,
        LiteralType::BooleanLiteral(b) => JsValue::Boolean(*b),
        LiteralType::NumberLiteral(NumberLiteralType::IntegerLiteral(i)) => JsValue::integer(*i),
        LiteralType::NumberLiteral(NumberLiteralType::FloatLiteral(f)) => JsValue::float(*f),
        LiteralType::StringLiteral(s) => JsValue::String(s.clone()),
    }
}

/// `target.name` as a plain read: the `length` shortcut for arrays and
/// strings, then own properties only.
pub fn read_property(target: &JsValue, name: &str) -> JsValue {
    if name == LENGTH_PROPERTY {
        match target {
            JsValue::Array(a) => return array_length(a),
            JsValue::String(s) => return JsValue::integer(s.chars().count() as i64),
            _ => {}
        }
    }
    match target {
        JsValue::Object(o) => o.borrow().get_property(name).unwrap_or(JsValue::Undefined),
        _ => JsValue::Undefined,
    }
}

fn read_subscript(target: &JsValue, key: &JsValue) -> JsValue {
    match target {
        JsValue::Array(a) => match to_array_index(key) {
            Some(index) => array_get(a, index),
            None => JsValue::Undefined,
        },
        JsValue::Object(o) => o
            .borrow()
            .get_property(&to_string(key))
            .unwrap_or(JsValue::Undefined),
        _ => JsValue::Undefined,
    }
}

/// Store `value` into the place `target` names.
pub fn assign(
    tree: &AstArena,
    target: NodeId,
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
    value: JsValue,
) -> Result<(), JsError> {
    let node = tree.get(target);
    match &node.kind {
        NodeKind::Identifier(name) => {
            scope.assign(name, value);
            return Ok(());
        }
        NodeKind::DotAccess { parent, property } => {
            if let JsValue::Object(o) = evaluate_expression(tree, *parent, scope, ctx)? {
                o.borrow_mut().set_property(property, value);
                return Ok(());
            }
        }
        NodeKind::Subscript { object, index } => {
            let container = evaluate_expression(tree, *object, scope, ctx)?;
            let key = evaluate_expression(tree, *index, scope, ctx)?;
            match &container {
                JsValue::Array(a) => {
                    if let Some(i) = to_array_index(&key) {
                        return array_set(a, i, value).map_err(|e| e.at(&node.meta));
                    }
                }
                JsValue::Object(o) => {
                    o.borrow_mut().set_property(&to_string(&key), value);
                    return Ok(());
                }
                _ => {}
            }
        }
        _ => {}
    }
    Err(JErrorType::ReferenceError("Cannot assign to this expression!".to_string()).at(&node.meta))
}
