//! Statement builders.

use weft_core::CsTokenKind;

use crate::{
    factory::{exprs, names},
    list::SeparatedList,
    syntax::{
        Block, ElseClause, EqualsValueClause, Expr, FinallyClause, Stmt, StmtKind, TypeSyntax,
        VariableDeclaration, VariableDeclarator,
    },
    token::SyntaxToken,
};

pub fn block(statements: impl IntoIterator<Item = Stmt>) -> Block {
    Block::new(statements)
}

pub fn expression(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Expression(expr))
}

pub fn return_value(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Return(Some(expr)))
}

pub fn return_void() -> Stmt {
    Stmt::new(StmtKind::Return(None))
}

pub fn throw(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Throw(Some(expr)))
}

/// `throw;` inside a catch clause.
pub fn rethrow() -> Stmt {
    Stmt::new(StmtKind::Throw(None))
}

/// `T name = initializer;`
pub fn local(ty: TypeSyntax, name: &str, initializer: Option<Expr>) -> Stmt {
    Stmt::new(StmtKind::LocalDeclaration {
        modifiers: Vec::new(),
        declaration: variable_declaration(ty, name, initializer),
    })
}

/// `var name = initializer;`
pub fn var(name: &str, initializer: Expr) -> Stmt {
    local(TypeSyntax::identifier("var"), name, Some(initializer))
}

pub fn variable_declaration(ty: TypeSyntax, name: &str, initializer: Option<Expr>) -> VariableDeclaration {
    VariableDeclaration {
        ty,
        variables: SeparatedList::from_items([VariableDeclarator {
            identifier: SyntaxToken::identifier(name),
            arguments: None,
            initializer: initializer.map(|value| EqualsValueClause { value }),
        }]),
    }
}

/// `if (condition) { then }`
pub fn if_then(condition: Expr, then: impl IntoIterator<Item = Stmt>) -> Stmt {
    Stmt::new(StmtKind::If {
        condition,
        statement: Box::new(block(then).into()),
        else_clause: None,
    })
}

/// `if (condition) { then } else { otherwise }`
pub fn if_else(
    condition: Expr,
    then: impl IntoIterator<Item = Stmt>,
    otherwise: impl IntoIterator<Item = Stmt>,
) -> Stmt {
    Stmt::new(StmtKind::If {
        condition,
        statement: Box::new(block(then).into()),
        else_clause: Some(ElseClause {
            statement: Box::new(block(otherwise).into()),
        }),
    })
}

/// `foreach (T name in expression) { body }`
pub fn for_each(
    ty: TypeSyntax,
    name: &str,
    expression: Expr,
    body: impl IntoIterator<Item = Stmt>,
) -> Stmt {
    Stmt::new(StmtKind::ForEach {
        ty,
        identifier: SyntaxToken::identifier(name),
        expression,
        statement: Box::new(block(body).into()),
    })
}

/// `if (parameter == null) throw new ArgumentNullException("parameter");`
pub fn argument_null_guard(parameter: &str) -> Stmt {
    Stmt::new(StmtKind::If {
        condition: exprs::equals(exprs::identifier(parameter), exprs::null()),
        statement: Box::new(throw(exprs::new_object(
            names::argument_null_exception(),
            [exprs::string(parameter)],
        ))),
        else_clause: None,
    })
}

/// `if (value != null) { body }`
pub fn not_null_guard(value: Expr, body: impl IntoIterator<Item = Stmt>) -> Stmt {
    if_then(exprs::not_equals(value, exprs::null()), body)
}

fn throw_new(exception: TypeSyntax, message: Option<&str>) -> Stmt {
    throw(exprs::new_object(exception, message.map(exprs::string)))
}

pub fn throw_not_implemented() -> Stmt {
    throw_new(names::not_implemented_exception(), None)
}

pub fn throw_not_supported(message: Option<&str>) -> Stmt {
    throw_new(names::not_supported_exception(), message)
}

pub fn throw_invalid_operation(message: &str) -> Stmt {
    throw_new(names::invalid_operation_exception(), Some(message))
}

/// `try { body } finally { finally }`
pub fn try_finally(
    body: impl IntoIterator<Item = Stmt>,
    finally: impl IntoIterator<Item = Stmt>,
) -> Stmt {
    Stmt::new(StmtKind::Try {
        block: block(body),
        catches: Vec::new(),
        finally: Some(FinallyClause {
            block: block(finally),
        }),
    })
}

/// `using (T name = resource) { body }`
pub fn using(ty: TypeSyntax, name: &str, resource: Expr, body: impl IntoIterator<Item = Stmt>) -> Stmt {
    Stmt::new(StmtKind::Using {
        declaration: Some(variable_declaration(ty, name, Some(resource))),
        expression: None,
        statement: Box::new(block(body).into()),
    })
}

/// `yield return value;`
pub fn yield_return(value: Expr) -> Stmt {
    Stmt::new(StmtKind::Yield {
        return_or_break: SyntaxToken::fixed(CsTokenKind::ReturnKeyword),
        expression: Some(value),
    })
}
