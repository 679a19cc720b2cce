use std::mem;
use std::rc::Rc;

use tracing::trace;

use super::ast::*;
use super::lexer::Tokenizer;
use super::token::{Token, TokenType};
use crate::runner::ds::error::{JErrorType, JsError};
use crate::stack::ensure_sufficient_stack;

/// Recursive-descent parser over a single-token lookahead.
pub struct JsParser {
    tokenizer: Tokenizer,
    current: Token,
    previous_end: usize,
    arena: AstArena,
}

impl JsParser {
    fn new(script: &str) -> Result<Self, JsError> {
        let mut tokenizer = Tokenizer::new(Rc::from(script));
        let current = tokenizer.next_token()?;
        Ok(JsParser {
            tokenizer,
            current,
            previous_end: 0,
            arena: AstArena::new(),
        })
    }

    /// Parses a whole program. The root of the result is a `Block`.
    pub fn parse_to_ast_from_str(script: &str) -> Result<ProgramData, JsError> {
        trace!(len = script.len(), "parsing program");
        let mut parser = JsParser::new(script)?;
        let meta = parser.meta();
        let mut statements = vec![];
        while parser.current.token_type != TokenType::Eof {
            statements.push(parser.parse_statement()?);
        }
        let root = parser.alloc(meta, NodeKind::Block(statements));
        Ok(ProgramData {
            tree: parser.arena,
            root,
        })
    }

    /// Parses a single expression, optionally followed by `;`, and nothing
    /// else.
    pub fn parse_expression_from_str(script: &str) -> Result<ProgramData, JsError> {
        trace!(len = script.len(), "parsing expression");
        let mut parser = JsParser::new(script)?;
        let root = parser.parse_expression()?;
        parser.match_if_operator(";")?;
        parser.match_token(&TokenType::Eof)?;
        Ok(ProgramData {
            tree: parser.arena,
            root,
        })
    }

    fn meta(&self) -> Meta {
        self.current.meta.clone()
    }

    fn alloc(&mut self, meta: Meta, kind: NodeKind) -> NodeId {
        self.arena.alloc(meta, kind)
    }

    fn error(&self, message: String) -> JsError {
        JErrorType::SyntaxError(message).at(&self.current.meta)
    }

    fn advance(&mut self) -> Result<Token, JsError> {
        self.previous_end = self.tokenizer.position();
        let next = self.tokenizer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    fn is_operator(&self, op: &str) -> bool {
        matches!(self.current.token_type, TokenType::Operator(o) if o == op)
    }

    fn is_keyword(&self, kw: &str) -> bool {
        matches!(self.current.token_type, TokenType::Keyword(k) if k == kw)
    }

    fn match_if_operator(&mut self, op: &str) -> Result<bool, JsError> {
        if self.is_operator(op) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn match_if_keyword(&mut self, kw: &str) -> Result<bool, JsError> {
        if self.is_keyword(kw) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn match_token(&mut self, expected: &TokenType) -> Result<(), JsError> {
        if &self.current.token_type == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!(
                "Found {} when expecting {}",
                self.current.token_type.describe(),
                expected.describe()
            )))
        }
    }

    fn match_operator(&mut self, op: &'static str) -> Result<(), JsError> {
        self.match_token(&TokenType::Operator(op))
    }

    fn match_keyword(&mut self, kw: &'static str) -> Result<(), JsError> {
        self.match_token(&TokenType::Keyword(kw))
    }

    /// `;` is required unless the input has ended.
    fn match_end_of_statement(&mut self) -> Result<(), JsError> {
        if self.current.token_type != TokenType::Eof {
            self.match_operator(";")?;
        }
        Ok(())
    }

    fn parse_identifier(&mut self) -> Result<String, JsError> {
        if let TokenType::Identifier(name) = &self.current.token_type {
            let name = name.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(self.error(format!(
                "Found {} when expecting identifier",
                self.current.token_type.describe()
            )))
        }
    }

    fn can_start_expression(&self) -> bool {
        match &self.current.token_type {
            TokenType::Identifier(_) | TokenType::Literal(_) => true,
            TokenType::Operator(o) => matches!(*o, "(" | "[" | "{" | "!" | "-" | "++" | "--"),
            TokenType::Keyword(k) => matches!(
                *k,
                "true"
                    | "false"
                    | "null"
                    | "undefined"
                    | "this"
                    | "Infinity"
                    | "function"
                    | "new"
                    | "typeof"
            ),
            TokenType::Eof => false,
        }
    }

    // ---------------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------------

    fn parse_statement(&mut self) -> Result<NodeId, JsError> {
        let meta = self.meta();
        if self.is_operator("{") {
            return self.parse_block();
        }
        if self.match_if_keyword("var")?
            || self.match_if_keyword("let")?
            || self.match_if_keyword("const")?
        {
            return self.parse_var();
        }
        if self.match_if_keyword("if")? {
            return self.parse_if(meta);
        }
        if self.match_if_keyword("while")? {
            return self.parse_do_or_while_loop(meta, false);
        }
        if self.match_if_keyword("do")? {
            return self.parse_do_or_while_loop(meta, true);
        }
        if self.match_if_keyword("for")? {
            return self.parse_for_loop(meta);
        }
        if self.match_if_keyword("return")? {
            return self.parse_return(meta);
        }
        if self.match_if_keyword("break")? {
            self.match_end_of_statement()?;
            return Ok(self.alloc(meta, NodeKind::Break));
        }
        if self.match_if_keyword("continue")? {
            self.match_end_of_statement()?;
            return Ok(self.alloc(meta, NodeKind::Continue));
        }
        if self.match_if_keyword("function")? {
            return self.parse_function(meta);
        }
        if self.match_if_operator(";")? {
            return Ok(self.alloc(meta, NodeKind::Empty));
        }
        if self.can_start_expression() {
            let expr = self.parse_expression()?;
            self.match_end_of_statement()?;
            return Ok(expr);
        }
        Err(self.error(format!(
            "Found {} when expecting a statement",
            self.current.token_type.describe()
        )))
    }

    fn parse_block(&mut self) -> Result<NodeId, JsError> {
        ensure_sufficient_stack(|| self.parse_block_statements())
    }

    fn parse_block_statements(&mut self) -> Result<NodeId, JsError> {
        let meta = self.meta();
        self.match_operator("{")?;
        let mut statements = vec![];
        while !self.is_operator("}") {
            if self.current.token_type == TokenType::Eof {
                return Err(self.error("Found eof when expecting '}'".to_string()));
            }
            statements.push(self.parse_statement()?);
        }
        self.match_operator("}")?;
        Ok(self.alloc(meta, NodeKind::Block(statements)))
    }

    /// `var a = 1, b, c = 3;` becomes nested blocks of single declarations.
    fn parse_var(&mut self) -> Result<NodeId, JsError> {
        let meta = self.meta();
        let name = self.parse_identifier()?;
        let initialiser = if self.match_if_operator("=")? {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let declaration = self.alloc(meta.clone(), NodeKind::VarDeclare { name, initialiser });
        if self.match_if_operator(",")? {
            let rest = self.parse_var()?;
            return Ok(self.alloc(meta, NodeKind::Block(vec![declaration, rest])));
        }
        self.match_end_of_statement()?;
        Ok(declaration)
    }

    fn parse_if(&mut self, meta: Meta) -> Result<NodeId, JsError> {
        self.match_operator("(")?;
        let condition = self.parse_expression()?;
        self.match_operator(")")?;
        let true_branch = self.parse_statement()?;
        let false_branch = if self.match_if_keyword("else")? {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(self.alloc(
            meta,
            NodeKind::If {
                condition,
                true_branch,
                false_branch,
            },
        ))
    }

    fn parse_return(&mut self, meta: Meta) -> Result<NodeId, JsError> {
        if self.match_if_operator(";")? {
            return Ok(self.alloc(meta, NodeKind::Return(None)));
        }
        if self.is_operator("}") || self.current.token_type == TokenType::Eof {
            return Ok(self.alloc(meta, NodeKind::Return(None)));
        }
        let value = self.parse_expression()?;
        self.match_if_operator(";")?;
        Ok(self.alloc(meta, NodeKind::Return(Some(value))))
    }

    fn parse_for_loop(&mut self, meta: Meta) -> Result<NodeId, JsError> {
        self.match_operator("(")?;
        let initialiser = self.parse_statement()?;
        let condition = if self.match_if_operator(";")? {
            None
        } else {
            let c = self.parse_expression()?;
            self.match_operator(";")?;
            Some(c)
        };
        let iterator = if self.match_if_operator(")")? {
            None
        } else {
            let i = self.parse_expression()?;
            self.match_operator(")")?;
            Some(i)
        };
        let body = self.parse_statement()?;
        Ok(self.alloc(
            meta,
            NodeKind::Loop(LoopData {
                initialiser: Some(initialiser),
                condition,
                iterator,
                body,
                is_do_loop: false,
            }),
        ))
    }

    fn parse_do_or_while_loop(&mut self, meta: Meta, is_do_loop: bool) -> Result<NodeId, JsError> {
        let (condition, body) = if is_do_loop {
            let body = self.parse_block()?;
            self.match_keyword("while")?;
            self.match_operator("(")?;
            let condition = self.parse_expression()?;
            self.match_operator(")")?;
            self.match_end_of_statement()?;
            (condition, body)
        } else {
            self.match_operator("(")?;
            let condition = self.parse_expression()?;
            self.match_operator(")")?;
            let body = self.parse_statement()?;
            (condition, body)
        };
        Ok(self.alloc(
            meta,
            NodeKind::Loop(LoopData {
                initialiser: None,
                condition: Some(condition),
                iterator: None,
                body,
                is_do_loop,
            }),
        ))
    }

    /// `function name(...) {...}` at statement level assigns the function to
    /// `name`.
    fn parse_function(&mut self, meta: Meta) -> Result<NodeId, JsError> {
        let function = self.parse_function_definition()?;
        let name = match &function.name {
            Some(name) => name.clone(),
            None => {
                return Err(JErrorType::SyntaxError(
                    "Functions defined at statement-level must have a name".to_string(),
                )
                .at(&meta))
            }
        };
        let target = self.alloc(meta.clone(), NodeKind::Identifier(name));
        let value = self.alloc(meta.clone(), NodeKind::FunctionLiteral(Rc::new(function)));
        Ok(self.alloc(meta, NodeKind::Assignment { target, value }))
    }

    /// Parses from just after the `function` keyword through the closing
    /// brace. The body is built in a fresh arena owned by the function.
    fn parse_function_definition(&mut self) -> Result<FunctionData, JsError> {
        let source_start = self.current.meta.offset;
        let name = match &self.current.token_type {
            TokenType::Identifier(_) => Some(self.parse_identifier()?),
            _ => None,
        };
        self.match_operator("(")?;
        let mut parameters = vec![];
        while !self.is_operator(")") {
            parameters.push(self.parse_identifier()?);
            if !self.is_operator(")") {
                self.match_operator(",")?;
            }
        }
        self.match_operator(")")?;

        let outer = mem::take(&mut self.arena);
        let body = self.parse_block();
        let tree = mem::replace(&mut self.arena, outer);
        let body = body?;

        let source = self.tokenizer.script()[source_start..self.previous_end].to_string();
        Ok(FunctionData {
            name,
            parameters,
            tree,
            body,
            source,
        })
    }

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------

    fn parse_expression(&mut self) -> Result<NodeId, JsError> {
        let lhs = self.parse_logic_operator()?;
        let meta = self.meta();

        if self.match_if_operator("?")? {
            let true_branch = self.parse_expression()?;
            self.match_operator(":")?;
            let false_branch = self.parse_expression()?;
            return Ok(self.alloc(
                meta,
                NodeKind::Ternary {
                    condition: lhs,
                    true_branch,
                    false_branch,
                },
            ));
        }
        if self.match_if_operator("=")? {
            let value = self.parse_expression()?;
            return Ok(self.alloc(meta, NodeKind::Assignment { target: lhs, value }));
        }

        let compound = match &self.current.token_type {
            TokenType::Operator(op) => match *op {
                "+=" => Some(BinaryOperator::Add),
                "-=" => Some(BinaryOperator::Subtract),
                "*=" => Some(BinaryOperator::Multiply),
                "/=" => Some(BinaryOperator::Divide),
                "%=" => Some(BinaryOperator::Modulo),
                "<<=" => Some(BinaryOperator::BitwiseLeftShift),
                ">>=" => Some(BinaryOperator::BitwiseRightShift),
                "&=" => Some(BinaryOperator::BitwiseAnd),
                "|=" => Some(BinaryOperator::BitwiseOr),
                "^=" => Some(BinaryOperator::BitwiseXor),
                _ => None,
            },
            _ => None,
        };
        if let Some(operator) = compound {
            self.advance()?;
            let value = self.parse_expression()?;
            return Ok(self.alloc(
                meta,
                NodeKind::CompoundAssignment {
                    target: lhs,
                    operator,
                    value,
                    is_postfix: false,
                },
            ));
        }

        Ok(lhs)
    }

    fn parse_logic_operator(&mut self) -> Result<NodeId, JsError> {
        let mut a = self.parse_comparator()?;
        loop {
            let meta = self.meta();
            if self.match_if_operator("&&")? {
                let b = self.parse_comparator()?;
                a = self.logical(meta, LogicalOperator::And, a, b);
            } else if self.match_if_operator("||")? {
                let b = self.parse_comparator()?;
                a = self.logical(meta, LogicalOperator::Or, a, b);
            } else if self.match_if_operator("&")? {
                let b = self.parse_comparator()?;
                a = self.binary(meta, BinaryOperator::BitwiseAnd, a, b);
            } else if self.match_if_operator("|")? {
                let b = self.parse_comparator()?;
                a = self.binary(meta, BinaryOperator::BitwiseOr, a, b);
            } else if self.match_if_operator("^")? {
                let b = self.parse_comparator()?;
                a = self.binary(meta, BinaryOperator::BitwiseXor, a, b);
            } else {
                return Ok(a);
            }
        }
    }

    fn parse_comparator(&mut self) -> Result<NodeId, JsError> {
        let mut a = self.parse_shift_operator()?;
        loop {
            let operator = match &self.current.token_type {
                TokenType::Operator(op) => match *op {
                    "==" => BinaryOperator::Equal,
                    "!=" => BinaryOperator::NotEqual,
                    "===" => BinaryOperator::StrictlyEqual,
                    "!==" => BinaryOperator::StrictlyUnequal,
                    "<" => BinaryOperator::LessThan,
                    "<=" => BinaryOperator::LessThanEqual,
                    ">" => BinaryOperator::GreaterThan,
                    ">=" => BinaryOperator::GreaterThanEqual,
                    _ => return Ok(a),
                },
                _ => return Ok(a),
            };
            let meta = self.meta();
            self.advance()?;
            let b = self.parse_shift_operator()?;
            a = self.binary(meta, operator, a, b);
        }
    }

    fn parse_shift_operator(&mut self) -> Result<NodeId, JsError> {
        let mut a = self.parse_additive_operator()?;
        loop {
            let operator = match &self.current.token_type {
                TokenType::Operator("<<") => BinaryOperator::BitwiseLeftShift,
                TokenType::Operator(">>") => BinaryOperator::BitwiseRightShift,
                TokenType::Operator(">>>") => BinaryOperator::BitwiseUnsignedRightShift,
                _ => return Ok(a),
            };
            let meta = self.meta();
            self.advance()?;
            let b = self.parse_additive_operator()?;
            a = self.binary(meta, operator, a, b);
        }
    }

    fn parse_additive_operator(&mut self) -> Result<NodeId, JsError> {
        let mut a = self.parse_multiply_divide()?;
        loop {
            let operator = match &self.current.token_type {
                TokenType::Operator("+") => BinaryOperator::Add,
                TokenType::Operator("-") => BinaryOperator::Subtract,
                _ => return Ok(a),
            };
            let meta = self.meta();
            self.advance()?;
            let b = self.parse_multiply_divide()?;
            a = self.binary(meta, operator, a, b);
        }
    }

    fn parse_multiply_divide(&mut self) -> Result<NodeId, JsError> {
        let mut a = self.parse_unary()?;
        loop {
            let operator = match &self.current.token_type {
                TokenType::Operator("*") => BinaryOperator::Multiply,
                TokenType::Operator("/") => BinaryOperator::Divide,
                TokenType::Operator("%") => BinaryOperator::Modulo,
                _ => return Ok(a),
            };
            let meta = self.meta();
            self.advance()?;
            let b = self.parse_unary()?;
            a = self.binary(meta, operator, a, b);
        }
    }

    fn parse_unary(&mut self) -> Result<NodeId, JsError> {
        let meta = self.meta();
        if self.match_if_operator("-")? {
            let zero = self.alloc(
                meta.clone(),
                NodeKind::Literal(LiteralType::NumberLiteral(
                    NumberLiteralType::IntegerLiteral(0),
                )),
            );
            let b = self.parse_unary()?;
            return Ok(self.binary(meta, BinaryOperator::Subtract, zero, b));
        }
        if self.match_if_operator("!")? {
            let argument = self.parse_unary()?;
            return Ok(self.alloc(
                meta,
                NodeKind::Unary {
                    operator: UnaryOperator::LogicalNot,
                    argument,
                },
            ));
        }
        if self.match_if_operator("++")? {
            return self.parse_pre_increment(meta, BinaryOperator::Add);
        }
        if self.match_if_operator("--")? {
            return self.parse_pre_increment(meta, BinaryOperator::Subtract);
        }
        if self.match_if_keyword("typeof")? {
            let argument = self.parse_unary()?;
            return Ok(self.alloc(
                meta,
                NodeKind::Unary {
                    operator: UnaryOperator::TypeOf,
                    argument,
                },
            ));
        }
        self.parse_factor()
    }

    fn parse_pre_increment(&mut self, meta: Meta, operator: BinaryOperator) -> Result<NodeId, JsError> {
        let target = self.parse_factor()?;
        Ok(self.increment(meta, target, operator, false))
    }

    fn increment(&mut self, meta: Meta, target: NodeId, operator: BinaryOperator, is_postfix: bool) -> NodeId {
        let one = self.alloc(
            meta.clone(),
            NodeKind::Literal(LiteralType::NumberLiteral(NumberLiteralType::IntegerLiteral(
                1,
            ))),
        );
        self.alloc(
            meta,
            NodeKind::CompoundAssignment {
                target,
                operator,
                value: one,
                is_postfix,
            },
        )
    }

    fn binary(&mut self, meta: Meta, operator: BinaryOperator, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(meta, NodeKind::Binary { operator, left, right })
    }

    fn logical(&mut self, meta: Meta, operator: LogicalOperator, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(meta, NodeKind::Logical { operator, left, right })
    }

    fn parse_factor(&mut self) -> Result<NodeId, JsError> {
        ensure_sufficient_stack(|| self.parse_primary())
    }

    fn parse_primary(&mut self) -> Result<NodeId, JsError> {
        let meta = self.meta();
        let token = self.current.token_type.clone();
        let node = match token {
            TokenType::Identifier(name) => {
                self.advance()?;
                self.alloc(meta, NodeKind::Identifier(name))
            }
            TokenType::Literal(literal) => {
                self.advance()?;
                self.alloc(meta, NodeKind::Literal(literal))
            }
            TokenType::Operator("(") => {
                self.advance()?;
                let e = self.parse_expression()?;
                self.match_operator(")")?;
                e
            }
            TokenType::Operator("{") => {
                self.advance()?;
                self.parse_object_literal(meta)?
            }
            TokenType::Operator("[") => {
                self.advance()?;
                self.parse_array_literal(meta)?
            }
            TokenType::Keyword(keyword) => match keyword {
                "true" | "false" => {
                    self.advance()?;
                    self.alloc(meta, NodeKind::Literal(LiteralType::BooleanLiteral(keyword == "true")))
                }
                "null" => {
                    self.advance()?;
                    self.alloc(meta, NodeKind::Literal(LiteralType::Null))
                }
                "undefined" => {
                    self.advance()?;
                    self.alloc(meta, NodeKind::Literal(LiteralType::Undefined))
                }
                "Infinity" => {
                    self.advance()?;
                    self.alloc(
                        meta,
                        NodeKind::Literal(LiteralType::NumberLiteral(
                            NumberLiteralType::FloatLiteral(f64::INFINITY),
                        )),
                    )
                }
                "this" => {
                    self.advance()?;
                    self.alloc(meta, NodeKind::This)
                }
                "function" => {
                    self.advance()?;
                    let function = self.parse_function_definition()?;
                    if function.name.is_some() {
                        return Err(JErrorType::SyntaxError(
                            "Inline functions definitions cannot have a name".to_string(),
                        )
                        .at(&meta));
                    }
                    self.alloc(meta, NodeKind::FunctionLiteral(Rc::new(function)))
                }
                "new" => {
                    self.advance()?;
                    self.parse_new(meta)?
                }
                _ => return Err(self.expecting_expression()),
            },
            _ => return Err(self.expecting_expression()),
        };
        self.parse_suffixes(node)
    }

    fn expecting_expression(&self) -> JsError {
        self.error(format!(
            "Found {} when expecting an expression.",
            self.current.token_type.describe()
        ))
    }

    fn parse_suffixes(&mut self, mut node: NodeId) -> Result<NodeId, JsError> {
        loop {
            let meta = self.meta();
            if self.match_if_operator(".")? {
                let property = self.parse_identifier()?;
                node = self.alloc(meta, NodeKind::DotAccess { parent: node, property });
            } else if self.match_if_operator("(")? {
                let arguments = self.parse_call_arguments()?;
                node = self.alloc(meta, NodeKind::FunctionCall { callee: node, arguments });
            } else if self.match_if_operator("[")? {
                let index = self.parse_expression()?;
                self.match_operator("]")?;
                node = self.alloc(meta, NodeKind::Subscript { object: node, index });
            } else if self.match_if_operator("++")? {
                node = self.increment(meta, node, BinaryOperator::Add, true);
            } else if self.match_if_operator("--")? {
                node = self.increment(meta, node, BinaryOperator::Subtract, true);
            } else {
                return Ok(node);
            }
        }
    }

    /// Called with the `(` already consumed.
    fn parse_call_arguments(&mut self) -> Result<Vec<NodeId>, JsError> {
        let mut arguments = vec![];
        while !self.is_operator(")") {
            arguments.push(self.parse_expression()?);
            if !self.is_operator(")") {
                self.match_operator(",")?;
            }
        }
        self.match_operator(")")?;
        Ok(arguments)
    }

    fn parse_object_literal(&mut self, meta: Meta) -> Result<NodeId, JsError> {
        let mut properties = vec![];
        while !self.is_operator("}") {
            let key = match &self.current.token_type {
                TokenType::Identifier(name) => name.clone(),
                TokenType::Literal(LiteralType::StringLiteral(s)) => s.clone(),
                _ => {
                    return Err(self.error(format!(
                        "Found {} when expecting identifier",
                        self.current.token_type.describe()
                    )))
                }
            };
            self.advance()?;
            self.match_operator(":")?;
            properties.push((key, self.parse_expression()?));
            if !self.is_operator("}") {
                self.match_operator(",")?;
            }
        }
        self.match_operator("}")?;
        Ok(self.alloc(meta, NodeKind::ObjectLiteral(properties)))
    }

    fn parse_array_literal(&mut self, meta: Meta) -> Result<NodeId, JsError> {
        let mut elements = vec![];
        while !self.is_operator("]") {
            elements.push(self.parse_expression()?);
            if !self.is_operator("]") {
                self.match_operator(",")?;
            }
        }
        self.match_operator("]")?;
        Ok(self.alloc(meta, NodeKind::ArrayLiteral(elements)))
    }

    /// `new a.b.C(args)`. Suffixes after the argument list apply to the
    /// constructed value.
    fn parse_new(&mut self, meta: Meta) -> Result<NodeId, JsError> {
        let mut class_path = vec![self.parse_identifier()?];
        while self.match_if_operator(".")? {
            class_path.push(self.parse_identifier()?);
        }
        let arguments = if self.match_if_operator("(")? {
            self.parse_call_arguments()?
        } else {
            vec![]
        };
        Ok(self.alloc(meta, NodeKind::New { class_path, arguments }))
    }
}
