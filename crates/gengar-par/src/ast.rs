//! The gengar AST: a closed set of statement and expression node kinds,
//! each carrying the [`Span`] it was parsed from.
//!
//! Every node here is produced once by the [`crate::Parser`] and then
//! read only by `gengar-emit`. There is no visitor trait; emission
//! dispatches on these variants directly, which is enough for a fixed,
//! non-extensible node set.

use gengar_util::{Span, Symbol};

/// A full source file: a sequence of top-level declarations.
#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<TopLevel>,
    pub span: Span,
}

/// A top-level form: `main() { ... }` or `fn name(...) { ... }`.
#[derive(Debug, Clone)]
pub enum TopLevel {
    Main(MainDeclare),
    Function(FunctionDeclare),
}

#[derive(Debug, Clone)]
pub struct MainDeclare {
    pub ret_type: Option<TypeAnnotation>,
    pub body: BlockStatement,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclare {
    pub name: Symbol,
    pub params: Vec<Param>,
    pub body: BlockStatement,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: Symbol,
    pub ty: Option<TypeAnnotation>,
    pub span: Span,
}

/// `: string` / `: number` / `: boolean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAnnotation {
    String,
    Number,
    Boolean,
}

#[derive(Debug, Clone)]
pub struct BlockStatement {
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Var(VarDeclare),
    If(IfStatement),
    While(WhileStatement),
    Return(ReturnStatement),
    Debugger(DebuggerStatement),
    Expression(ExpressionStatement),
}

/// `const` or `mut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Const,
    Mut,
}

#[derive(Debug, Clone)]
pub struct VarDeclare {
    pub kind: DeclKind,
    pub name: Symbol,
    pub ty: Option<TypeAnnotation>,
    /// The literal operator text (`=`, `+=`, `-=`, `*=`, `/=`), preserved
    /// verbatim for emission per spec's assignment emission rule.
    pub op: String,
    pub init: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStatement {
    pub test: Box<Expr>,
    pub consequent: BlockStatement,
    pub alternate: Option<Box<ElseBranch>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ElseBranch {
    Block(BlockStatement),
    If(IfStatement),
}

#[derive(Debug, Clone)]
pub struct WhileStatement {
    pub test: Box<Expr>,
    pub body: BlockStatement,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStatement {
    pub argument: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct DebuggerStatement {
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement {
    pub expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Assign(AssignExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Conditional(ConditionalExpression),
    Call(CallExpression),
    Member(MemberExpression),
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    NumberLiteral(NumberLiteral),
    BooleanLiteral(BooleanLiteral),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Assign(e) => e.span,
            Expr::Binary(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Conditional(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::Member(e) => e.span,
            Expr::Identifier(e) => e.span,
            Expr::StringLiteral(e) => e.span,
            Expr::NumberLiteral(e) => e.span,
            Expr::BooleanLiteral(e) => e.span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssignExpression {
    pub target: Box<Expr>,
    pub op: String,
    pub value: Box<Expr>,
    pub span: Span,
}

/// Left starts as `None` while `BinaryTail`s are threaded together by
/// the parser; by the time parsing of the enclosing expression returns,
/// every node in the chain has been back-patched and `Left` is `Some`.
/// `gengar-emit` treats a lingering `None` as an `EmissionError`, per
/// spec's AST invariant.
#[derive(Debug, Clone)]
pub struct BinaryExpression {
    pub left: Option<Box<Expr>>,
    pub op: String,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct UnaryExpression {
    pub op: String,
    pub argument: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConditionalExpression {
    pub test: Option<Box<Expr>>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CallExpression {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MemberExpression {
    pub object: Box<Expr>,
    pub property: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub name: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    /// Raw text between the quotes, unescaped (the source grammar has
    /// no escape sequences).
    pub value: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct NumberLiteral {
    pub value: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}
