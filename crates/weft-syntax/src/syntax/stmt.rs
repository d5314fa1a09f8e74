//! Statements.

use weft_core::SourceSpan;

use crate::{
    list::SeparatedList,
    syntax::{expr::Expr, types::TypeSyntax},
    token::SyntaxToken,
};

/// A statement, optionally located in DSL source.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block(Block),
    LocalDeclaration {
        modifiers: Vec<SyntaxToken>,
        declaration: VariableDeclaration,
    },
    Expression(Expr),
    Empty,
    Labeled {
        identifier: SyntaxToken,
        statement: Box<Stmt>,
    },
    /// `goto label;`, `goto case e;` or `goto default;`
    Goto {
        case_or_default: Option<SyntaxToken>,
        expression: Option<Expr>,
    },
    Break,
    Continue,
    Return(Option<Expr>),
    Throw(Option<Expr>),
    /// `yield return e;` or `yield break;`
    Yield {
        return_or_break: SyntaxToken,
        expression: Option<Expr>,
    },
    While {
        condition: Expr,
        statement: Box<Stmt>,
    },
    Do {
        statement: Box<Stmt>,
        condition: Expr,
    },
    For {
        declaration: Option<VariableDeclaration>,
        initializers: SeparatedList<Expr>,
        condition: Option<Expr>,
        incrementors: SeparatedList<Expr>,
        statement: Box<Stmt>,
    },
    ForEach {
        ty: TypeSyntax,
        identifier: SyntaxToken,
        expression: Expr,
        statement: Box<Stmt>,
    },
    Using {
        declaration: Option<VariableDeclaration>,
        expression: Option<Expr>,
        statement: Box<Stmt>,
    },
    Fixed {
        declaration: VariableDeclaration,
        statement: Box<Stmt>,
    },
    /// `checked { }` or `unchecked { }`
    Checked {
        keyword: SyntaxToken,
        block: Block,
    },
    Unsafe(Block),
    Lock {
        expression: Expr,
        statement: Box<Stmt>,
    },
    If {
        condition: Expr,
        statement: Box<Stmt>,
        else_clause: Option<ElseClause>,
    },
    Switch {
        expression: Expr,
        sections: Vec<SwitchSection>,
    },
    Try {
        block: Block,
        catches: Vec<CatchClause>,
        finally: Option<FinallyClause>,
    },
}

/// `{ ... }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Option<SourceSpan>,
}

impl Block {
    pub fn new(statements: impl IntoIterator<Item = Stmt>) -> Self {
        Self {
            statements: statements.into_iter().collect(),
            span: None,
        }
    }
}

/// `T a = 1, b`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub ty: TypeSyntax,
    pub variables: SeparatedList<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub identifier: SyntaxToken,
    /// Fixed-size buffer dimensions: `buffer[16]`.
    pub arguments: Option<crate::syntax::expr::ArgumentList>,
    pub initializer: Option<EqualsValueClause>,
}

/// `= value`
#[derive(Debug, Clone, PartialEq)]
pub struct EqualsValueClause {
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseClause {
    pub statement: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSection {
    pub labels: Vec<SwitchLabel>,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabel {
    Case(Expr),
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub declaration: Option<CatchDeclaration>,
    pub filter: Option<CatchFilterClause>,
    pub block: Block,
}

/// `(T e)`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchDeclaration {
    pub ty: TypeSyntax,
    pub identifier: Option<SyntaxToken>,
}

/// `when (condition)`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchFilterClause {
    pub condition: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinallyClause {
    pub block: Block,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self { kind, span: None }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, StmtKind::Block(_))
    }
}

impl From<Block> for Stmt {
    fn from(block: Block) -> Self {
        let span = block.span.clone();
        Stmt {
            kind: StmtKind::Block(block),
            span,
        }
    }
}

impl From<Expr> for Stmt {
    fn from(expression: Expr) -> Self {
        Stmt::new(StmtKind::Expression(expression))
    }
}
