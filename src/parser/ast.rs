use std::fmt;
use std::rc::Rc;

/// Position of a node or token inside the script it was parsed from.
///
/// Line and column are not stored; they are computed on demand, which only
/// happens when an error is rendered.
#[derive(Clone)]
pub struct Meta {
    pub script: Rc<str>,
    pub offset: usize,
}

impl Meta {
    pub fn new(script: Rc<str>, offset: usize) -> Self {
        Meta { script, offset }
    }

    /// 1-based line and column of `offset`.
    pub fn line_and_column(&self) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for (idx, c) in self.script.char_indices() {
            if idx >= self.offset {
                break;
            }
            column += 1;
            if c == '\n' {
                column = 1;
                line += 1;
            }
        }
        (line, column)
    }
}

impl fmt::Debug for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Meta@{}", self.offset)
    }
}

impl PartialEq for Meta {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && Rc::ptr_eq(&self.script, &other.script)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralType {
    Undefined,
    Null,
    BooleanLiteral(bool),
    NumberLiteral(NumberLiteralType),
    StringLiteral(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteralType {
    IntegerLiteral(i64),
    FloatLiteral(f64),
}

/// Operators that go through the coercion ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    StrictlyEqual,
    StrictlyUnequal,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseLeftShift,
    BitwiseRightShift,
    BitwiseUnsignedRightShift,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::StrictlyEqual => "===",
            BinaryOperator::StrictlyUnequal => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseLeftShift => "<<",
            BinaryOperator::BitwiseRightShift => ">>",
            BinaryOperator::BitwiseUnsignedRightShift => ">>>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    LogicalNot,
    TypeOf,
}

/// Index of a node inside the [`AstArena`] that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct AstNode {
    pub meta: Meta,
    pub kind: NodeKind,
}

#[derive(Debug)]
pub struct LoopData {
    pub initialiser: Option<NodeId>,
    pub condition: Option<NodeId>,
    pub iterator: Option<NodeId>,
    pub body: NodeId,
    pub is_do_loop: bool,
}

/// Every variant is a statement; everything from `Literal` down is also an
/// expression and produces a value.
#[derive(Debug)]
pub enum NodeKind {
    Empty,
    Block(Vec<NodeId>),
    If {
        condition: NodeId,
        true_branch: NodeId,
        false_branch: Option<NodeId>,
    },
    VarDeclare {
        name: String,
        initialiser: Option<NodeId>,
    },
    Loop(LoopData),
    Return(Option<NodeId>),
    Break,
    Continue,

    Literal(LiteralType),
    Identifier(String),
    This,
    DotAccess {
        parent: NodeId,
        property: String,
    },
    Subscript {
        object: NodeId,
        index: NodeId,
    },
    Unary {
        operator: UnaryOperator,
        argument: NodeId,
    },
    Binary {
        operator: BinaryOperator,
        left: NodeId,
        right: NodeId,
    },
    Logical {
        operator: LogicalOperator,
        left: NodeId,
        right: NodeId,
    },
    Ternary {
        condition: NodeId,
        true_branch: NodeId,
        false_branch: NodeId,
    },
    Assignment {
        target: NodeId,
        value: NodeId,
    },
    /// `x += v`, `++x` and `x++`. `target` is read once for the old value and
    /// written once with the combined value; the node never owns a second
    /// handle on the target subtree.
    CompoundAssignment {
        target: NodeId,
        operator: BinaryOperator,
        value: NodeId,
        is_postfix: bool,
    },
    FunctionCall {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    New {
        class_path: Vec<String>,
        arguments: Vec<NodeId>,
    },
    ObjectLiteral(Vec<(String, NodeId)>),
    ArrayLiteral(Vec<NodeId>),
    FunctionLiteral(Rc<FunctionData>),
}

impl NodeKind {
    pub fn is_expression(&self) -> bool {
        !matches!(
            self,
            NodeKind::Empty
                | NodeKind::Block(_)
                | NodeKind::If { .. }
                | NodeKind::VarDeclare { .. }
                | NodeKind::Loop(_)
                | NodeKind::Return(_)
                | NodeKind::Break
                | NodeKind::Continue
        )
    }
}

/// Flat storage for one tree of nodes. Children are referenced by [`NodeId`].
#[derive(Debug, Default)]
pub struct AstArena {
    nodes: Vec<AstNode>,
}

impl AstArena {
    pub fn new() -> Self {
        AstArena { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, meta: Meta, kind: NodeKind) -> NodeId {
        self.nodes.push(AstNode { meta, kind });
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A parsed function literal. The body lives in its own arena so that the
/// function value can outlive the program it was declared in.
#[derive(Debug)]
pub struct FunctionData {
    pub name: Option<String>,
    pub parameters: Vec<String>,
    pub tree: AstArena,
    pub body: NodeId,
    /// Source text from the name (or parameter list) through the closing brace.
    pub source: String,
}

/// Output of a parse: the arena plus the node to start evaluation at.
/// For a program the root is a `Block`; for a single expression it is the
/// expression node.
#[derive(Debug)]
pub struct ProgramData {
    pub tree: AstArena,
    pub root: NodeId,
}

impl ProgramData {
    pub fn root_node(&self) -> &AstNode {
        self.tree.get(self.root)
    }
}
