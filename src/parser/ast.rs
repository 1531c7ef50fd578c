//! Shared syntax tree used by all code generators.
//!
//! The parser builds these nodes once; generators walk them read-only and
//! each compilation owns its own tree.

#[derive(Debug, PartialEq, Clone)]
pub struct Module {
    pub body: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    /// Whole-module import: `import "fs"` / `import std.io as io`.
    Import {
        module: String,
        alias: Option<String>,
    },
    /// Selective import: default, named, and namespace bindings from one
    /// module, in source order.
    ImportFrom {
        module: String,
        names: Vec<(String, String)>,
        default_name: Option<String>,
        namespace_name: Option<String>,
    },
    Let {
        name: String,
        value: Expression,
        mutable: bool,
        exported: bool,
        is_default: bool,
    },
    /// Target is always a `Name` or `Attribute`; the parser enforces it.
    Assign {
        target: Expression,
        value: Expression,
    },
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Statement>,
        exported: bool,
        is_default: bool,
    },
    /// Re-export list `export { a as b }`, optionally `from` a module.
    /// Pairs are `(local, exported)`.
    ExportNames {
        names: Vec<(String, String)>,
        source: Option<String>,
    },
    ExportDefault {
        value: Expression,
    },
    Return {
        value: Option<Expression>,
    },
    /// `orelse` is empty, not absent, when no `else` was written.
    If {
        test: Expression,
        body: Vec<Statement>,
        orelse: Vec<Statement>,
    },
    While {
        test: Expression,
        body: Vec<Statement>,
    },
    For {
        target: String,
        iterator: Expression,
        body: Vec<Statement>,
    },
    /// The call is evaluated eagerly; the target runtime receives a started
    /// handle, not a thunk. Always a `Call`; the parser enforces it.
    Spawn {
        call: Expression,
    },
    Expr(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Name(String),
    Number(f64),
    Str(String),
    Boolean(bool),
    Null,
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
    },
    Attribute {
        object: Box<Expression>,
        name: String,
    },
    List(Vec<Expression>),
    /// Keys are arbitrary expressions; source order is preserved.
    Dict(Vec<(Expression, Expression)>),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    Or,
    And,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEq => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEq => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOperator {
    Neg,
    Not,
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Neg => "-",
            UnaryOperator::Not => "!",
        }
    }
}
