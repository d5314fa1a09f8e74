//! Expressions.

use weft_core::CsTokenKind;
use weft_syntax::{
    SyntaxToken,
    syntax::{
        AnonymousMember, Argument, ArgumentList, ArgumentListKind, ExprKind, Initializer,
        InitializerKind, NameColon, NameEquals,
    },
};

use super::{LowerError, Members};

pub(super) fn name_equals(m: &Members) -> Result<NameEquals, LowerError> {
    Ok(NameEquals {
        name: m.required("Name")?,
    })
}

pub(super) fn name_colon(m: &Members) -> Result<NameColon, LowerError> {
    Ok(NameColon {
        name: m.required("Name")?,
    })
}

pub(super) fn prefix_unary(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::PrefixUnary {
        operator: operator(m, CsTokenKind::is_prefix_unary_operator)?,
        operand: m.boxed("Operand")?,
    })
}

pub(super) fn postfix_unary(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::PostfixUnary {
        operand: m.boxed("Operand")?,
        operator: operator(m, CsTokenKind::is_postfix_unary_operator)?,
    })
}

pub(super) fn binary(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::Binary {
        left: m.boxed("Left")?,
        operator: operator(m, CsTokenKind::is_binary_operator)?,
        right: m.boxed("Right")?,
    })
}

pub(super) fn assignment(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::Assignment {
        left: m.boxed("Left")?,
        operator: operator(m, CsTokenKind::is_assignment_operator)?,
        right: m.boxed("Right")?,
    })
}

/// The `OperatorToken` member, which must be of a kind `accepts`.
fn operator(m: &Members, accepts: fn(CsTokenKind) -> bool) -> Result<SyntaxToken, LowerError> {
    let operator = m.token("OperatorToken")?;
    if !accepts(operator.kind()) {
        return Err(m.invalid("OperatorToken", format!("`{}`", operator.text())));
    }
    Ok(operator)
}

pub(super) fn conditional(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::Conditional {
        condition: m.boxed("Condition")?,
        when_true: m.boxed("WhenTrue")?,
        when_false: m.boxed("WhenFalse")?,
    })
}

pub(super) fn cast(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::Cast {
        ty: m.required("Type")?,
        expression: m.boxed("Expression")?,
    })
}

pub(super) fn checked(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::Checked {
        keyword: m.token("Keyword")?,
        expression: m.boxed("Expression")?,
    })
}

pub(super) fn invocation(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::Invocation {
        expression: m.boxed("Expression")?,
        arguments: m.required("ArgumentList")?,
    })
}

pub(super) fn element_access(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::ElementAccess {
        expression: m.boxed("Expression")?,
        arguments: m.required("ArgumentList")?,
    })
}

pub(super) fn argument_list(
    m: &Members,
    kind: ArgumentListKind,
) -> Result<ArgumentList, LowerError> {
    Ok(ArgumentList {
        kind,
        arguments: m.separated("Arguments")?,
    })
}

pub(super) fn argument(m: &Members) -> Result<Argument, LowerError> {
    Ok(Argument {
        name_colon: m.optional("NameColon")?,
        ref_or_out: m.optional_token("RefOrOutKeyword")?,
        expression: m.required("Expression")?,
    })
}

pub(super) fn member_access(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::MemberAccess {
        expression: m.boxed("Expression")?,
        operator: m.token("OperatorToken")?,
        name: m.required("Name")?,
    })
}

pub(super) fn object_creation(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::ObjectCreation {
        ty: m.required("Type")?,
        arguments: m.optional("ArgumentList")?,
        initializer: m.optional("Initializer")?,
    })
}

pub(super) fn anonymous_member(m: &Members) -> Result<AnonymousMember, LowerError> {
    Ok(AnonymousMember {
        name_equals: m.optional("NameEquals")?,
        expression: m.required("Expression")?,
    })
}

pub(super) fn array_creation(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::ArrayCreation {
        ty: m.required("Type")?,
        initializer: m.optional("Initializer")?,
    })
}

pub(super) fn implicit_array_creation(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::ImplicitArrayCreation {
        commas: m.tokens("Commas")?,
        initializer: m.required("Initializer")?,
    })
}

/// `Kind` is one of `object`, `collection`, `array` or `complex`.
pub(super) fn initializer(m: &Members) -> Result<Initializer, LowerError> {
    let text = m.text("Kind")?;
    let kind = InitializerKind::parse(text).ok_or_else(|| m.invalid("Kind", format!("{text:?}")))?;
    Ok(Initializer {
        kind,
        expressions: m.separated("Expressions")?,
    })
}

pub(super) fn simple_lambda(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::SimpleLambda {
        async_keyword: m.optional_token("AsyncKeyword")?,
        parameter: m.boxed("Parameter")?,
        body: m.required("Body")?,
    })
}

pub(super) fn parenthesized_lambda(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::ParenthesizedLambda {
        async_keyword: m.optional_token("AsyncKeyword")?,
        parameters: m.required("ParameterList")?,
        body: m.required("Body")?,
    })
}

pub(super) fn anonymous_method(m: &Members) -> Result<ExprKind, LowerError> {
    Ok(ExprKind::AnonymousMethod {
        async_keyword: m.optional_token("AsyncKeyword")?,
        parameters: m.optional("ParameterList")?,
        block: m.required("Block")?,
    })
}
