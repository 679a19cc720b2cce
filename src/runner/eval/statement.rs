//! Statement execution.
//!
//! Control flow travels as a [`Completion`] rather than as an error: a block
//! stops at the first abrupt completion and hands it upward, a loop consumes
//! `break` and `continue` and passes `return` on.

use std::rc::Rc;

use crate::parser::ast::{AstArena, LoopData, Meta, NodeId, NodeKind};
use crate::runner::ds::error::JsError;
use crate::runner::ds::execution_context::EvalContext;
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::scope::Scope;
use crate::runner::ds::value::JsValue;
use crate::stack::ensure_sufficient_stack;

use super::expression::evaluate_expression;
use super::types::{Completion, CompletionType, EvalResult};

/// Execute a statement and return its completion.
pub fn execute_statement(
    tree: &AstArena,
    id: NodeId,
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> EvalResult {
    ensure_sufficient_stack(|| execute_node(tree, id, scope, ctx))
}

fn execute_node(tree: &AstArena, id: NodeId, scope: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult {
    let node = tree.get(id);
    match &node.kind {
        NodeKind::Empty => Ok(Completion::normal()),

        NodeKind::Block(statements) => {
            for statement in statements {
                let completion = execute_statement(tree, *statement, scope, ctx)?;
                if completion.is_abrupt() {
                    return Ok(completion);
                }
            }
            Ok(Completion::normal())
        }

        NodeKind::If { condition, true_branch, false_branch } => {
            if to_boolean(&evaluate_expression(tree, *condition, scope, ctx)?) {
                execute_statement(tree, *true_branch, scope, ctx)
            } else if let Some(false_branch) = false_branch {
                execute_statement(tree, *false_branch, scope, ctx)
            } else {
                Ok(Completion::normal())
            }
        }

        NodeKind::VarDeclare { name, initialiser } => {
            let value = match initialiser {
                Some(i) => evaluate_expression(tree, *i, scope, ctx)?,
                None => JsValue::Undefined,
            };
            scope.declare(name, value);
            Ok(Completion::normal())
        }

        NodeKind::Loop(data) => execute_loop(tree, &node.meta, data, scope, ctx),

        NodeKind::Return(value) => {
            let value = match value {
                Some(v) => evaluate_expression(tree, *v, scope, ctx)?,
                None => JsValue::Undefined,
            };
            Ok(Completion::return_value(value))
        }

        NodeKind::Break => Ok(Completion::break_completion()),

        NodeKind::Continue => Ok(Completion::continue_completion()),

        _ => evaluate_expression(tree, id, scope, ctx).map(Completion::normal_with_value),
    }
}

/// `while`, `do ... while` and `for` share this loop. Each iteration starts
/// with a cancellation checkpoint. A do-loop tests its condition after the
/// body, except when the body hit `continue`.
fn execute_loop(
    tree: &AstArena,
    meta: &Meta,
    data: &LoopData,
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> EvalResult {
    if let Some(initialiser) = data.initialiser {
        execute_statement(tree, initialiser, scope, ctx)?;
    }

    loop {
        ctx.check_timeout(meta)?;

        if !data.is_do_loop && !test_condition(tree, data, scope, ctx)? {
            break;
        }

        let completion = execute_statement(tree, data.body, scope, ctx)?;
        let hit_continue = match completion.completion_type {
            CompletionType::Return => return Ok(completion),
            CompletionType::Break => break,
            CompletionType::Continue => true,
            CompletionType::Normal => false,
        };

        if let Some(iterator) = data.iterator {
            execute_statement(tree, iterator, scope, ctx)?;
        }

        if data.is_do_loop && !hit_continue && !test_condition(tree, data, scope, ctx)? {
            break;
        }
    }
    Ok(Completion::normal())
}

/// A missing condition (`for (;;)`) counts as true.
fn test_condition(
    tree: &AstArena,
    data: &LoopData,
    scope: &Rc<Scope>,
    ctx: &mut EvalContext,
) -> Result<bool, JsError> {
    match data.condition {
        Some(condition) => Ok(to_boolean(&evaluate_expression(tree, condition, scope, ctx)?)),
        None => Ok(true),
    }
}
