//! Declaration tree for Python source.
//!
//! The tree keeps only what docstring handling needs: declarations with their
//! bodies, expression statements that may be docstrings, and compound
//! statements whose suites can hold further declarations. Every node records
//! its byte span in the source it was parsed from.

use docbench_core::patch::Span;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub body: Suite,
}

/// An ordered sequence of statements: a module body, a declaration body, or
/// one branch of a compound statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Suite {
    /// The docstring of this suite: the value of its first statement when that
    /// statement is a plain string literal expression.
    pub fn docstring(&self) -> Option<&str> {
        self.statements.first().and_then(Statement::docstring)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    ClassDef(ClassDef),
    FunctionDef(FunctionDef),
    Expr(ExprStatement),
    Compound(CompoundStatement),
    Simple(SimpleStatement),
}

impl Statement {
    /// Byte span of the whole statement, including decorators.
    pub fn span(&self) -> Span {
        match self {
            Statement::ClassDef(c) => c.span,
            Statement::FunctionDef(f) => f.span,
            Statement::Expr(e) => e.span,
            Statement::Compound(c) => c.span,
            Statement::Simple(s) => s.span,
        }
    }

    /// String value if this is a docstring-shaped expression statement.
    pub fn docstring(&self) -> Option<&str> {
        match self {
            Statement::Expr(e) => e.docstring.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub span: Span,
    pub body: Suite,
}

/// A `def` or `async def`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub asynchronous: bool,
    pub span: Span,
    pub body: Suite,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprStatement {
    pub span: Span,
    /// Evaluated value when the expression is a plain (non-bytes, non-f)
    /// string literal, possibly implicitly concatenated or parenthesized.
    pub docstring: Option<String>,
}

/// `if`, `for`, `while`, `try`, `with`, `match` and their clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundStatement {
    /// Grammar node kind, e.g. `if_statement`.
    pub kind: String,
    pub span: Span,
    pub suites: Vec<Suite>,
}

/// Any other statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleStatement {
    /// Grammar node kind, e.g. `return_statement`.
    pub kind: String,
    pub span: Span,
    /// True for placeholders inserted to keep a body non-empty.
    pub synthetic: bool,
}

impl SimpleStatement {
    /// An inert `pass` standing where a removed statement was.
    pub fn placeholder(span: Span) -> Self {
        SimpleStatement {
            kind: "pass_statement".to_string(),
            span,
            synthetic: true,
        }
    }
}
