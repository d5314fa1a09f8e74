//! Statements and their clauses.

use weft_syntax::syntax::{
    Block, CatchClause, CatchDeclaration, CatchFilterClause, ElseClause, EqualsValueClause,
    FinallyClause, StmtKind, SwitchSection, VariableDeclaration, VariableDeclarator,
};

use super::{LowerError, Members};

/// The span is attached by the caller, like any spanned syntax.
pub(super) fn block(m: &Members) -> Result<Block, LowerError> {
    Ok(Block::new(m.list("Statements")?))
}

pub(super) fn equals_value(m: &Members) -> Result<EqualsValueClause, LowerError> {
    Ok(EqualsValueClause {
        value: m.required("Value")?,
    })
}

pub(super) fn local_declaration(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::LocalDeclaration {
        modifiers: m.tokens("Modifiers")?,
        declaration: m.required("Declaration")?,
    })
}

pub(super) fn variable_declaration(m: &Members) -> Result<VariableDeclaration, LowerError> {
    Ok(VariableDeclaration {
        ty: m.required("Type")?,
        variables: m.separated("Variables")?,
    })
}

pub(super) fn variable_declarator(m: &Members) -> Result<VariableDeclarator, LowerError> {
    Ok(VariableDeclarator {
        identifier: m.token("Identifier")?,
        arguments: m.optional("ArgumentList")?,
        initializer: m.optional("Initializer")?,
    })
}

pub(super) fn labeled(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Labeled {
        identifier: m.token("Identifier")?,
        statement: m.boxed("Statement")?,
    })
}

pub(super) fn goto(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Goto {
        case_or_default: m.optional_token("CaseOrDefaultKeyword")?,
        expression: m.optional("Expression")?,
    })
}

pub(super) fn yield_statement(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Yield {
        return_or_break: m.token("ReturnOrBreakKeyword")?,
        expression: m.optional("Expression")?,
    })
}

pub(super) fn while_statement(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::While {
        condition: m.required("Condition")?,
        statement: m.boxed("Statement")?,
    })
}

pub(super) fn do_statement(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Do {
        statement: m.boxed("Statement")?,
        condition: m.required("Condition")?,
    })
}

pub(super) fn for_statement(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::For {
        declaration: m.optional("Declaration")?,
        initializers: m.separated("Initializers")?,
        condition: m.optional("Condition")?,
        incrementors: m.separated("Incrementors")?,
        statement: m.boxed("Statement")?,
    })
}

pub(super) fn for_each(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::ForEach {
        ty: m.required("Type")?,
        identifier: m.token("Identifier")?,
        expression: m.required("Expression")?,
        statement: m.boxed("Statement")?,
    })
}

pub(super) fn using_statement(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Using {
        declaration: m.optional("Declaration")?,
        expression: m.optional("Expression")?,
        statement: m.boxed("Statement")?,
    })
}

pub(super) fn fixed(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Fixed {
        declaration: m.required("Declaration")?,
        statement: m.boxed("Statement")?,
    })
}

pub(super) fn checked(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Checked {
        keyword: m.token("Keyword")?,
        block: m.required("Block")?,
    })
}

pub(super) fn lock(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Lock {
        expression: m.required("Expression")?,
        statement: m.boxed("Statement")?,
    })
}

pub(super) fn if_statement(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::If {
        condition: m.required("Condition")?,
        statement: m.boxed("Statement")?,
        else_clause: m.optional("Else")?,
    })
}

pub(super) fn else_clause(m: &Members) -> Result<ElseClause, LowerError> {
    Ok(ElseClause {
        statement: m.boxed("Statement")?,
    })
}

pub(super) fn switch(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Switch {
        expression: m.required("Expression")?,
        sections: m.list("Sections")?,
    })
}

pub(super) fn switch_section(m: &Members) -> Result<SwitchSection, LowerError> {
    Ok(SwitchSection {
        labels: m.list("Labels")?,
        statements: m.list("Statements")?,
    })
}

pub(super) fn try_statement(m: &Members) -> Result<StmtKind, LowerError> {
    Ok(StmtKind::Try {
        block: m.required("Block")?,
        catches: m.list("Catches")?,
        finally: m.optional("Finally")?,
    })
}

pub(super) fn catch_clause(m: &Members) -> Result<CatchClause, LowerError> {
    Ok(CatchClause {
        declaration: m.optional("Declaration")?,
        filter: m.optional("Filter")?,
        block: m.required("Block")?,
    })
}

pub(super) fn catch_declaration(m: &Members) -> Result<CatchDeclaration, LowerError> {
    Ok(CatchDeclaration {
        ty: m.required("Type")?,
        identifier: m.optional_token("Identifier")?,
    })
}

pub(super) fn catch_filter(m: &Members) -> Result<CatchFilterClause, LowerError> {
    Ok(CatchFilterClause {
        condition: m.required("Condition")?,
    })
}

pub(super) fn finally(m: &Members) -> Result<FinallyClause, LowerError> {
    Ok(FinallyClause {
        block: m.required("Block")?,
    })
}
