//! Expression builders.
//!
//! Operator builders parenthesize their operands where the host language's
//! precedence would otherwise regroup them, so `multiply(add(a, b), c)`
//! prints as `(a + b) * c`.

use weft_core::CsTokenKind;

use crate::{
    factory::names,
    list::SeparatedList,
    syntax::{
        AnonymousMember, Argument, ArgumentList, Block, Expr, ExprKind, Initializer,
        InitializerKind, LambdaBody, NameColon, NameEquals, Parameter, ParameterList, TypeSyntax,
    },
    token::SyntaxToken,
};

/// Binding strength, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Query,
    Assignment,
    Conditional,
    Coalesce,
    ConditionalOr,
    ConditionalAnd,
    LogicalOr,
    LogicalXor,
    LogicalAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

impl Precedence {
    /// Precedence of a binary operator token kind.
    pub fn of_binary(kind: CsTokenKind) -> Self {
        match kind {
            CsTokenKind::QuestionQuestion => Precedence::Coalesce,
            CsTokenKind::BarBar => Precedence::ConditionalOr,
            CsTokenKind::AmpersandAmpersand => Precedence::ConditionalAnd,
            CsTokenKind::Bar => Precedence::LogicalOr,
            CsTokenKind::Caret => Precedence::LogicalXor,
            CsTokenKind::Ampersand => Precedence::LogicalAnd,
            CsTokenKind::EqualsEquals | CsTokenKind::ExclamationEquals => Precedence::Equality,
            CsTokenKind::LessThan
            | CsTokenKind::GreaterThan
            | CsTokenKind::LessThanEquals
            | CsTokenKind::GreaterThanEquals
            | CsTokenKind::IsKeyword
            | CsTokenKind::AsKeyword => Precedence::Relational,
            CsTokenKind::LessThanLessThan | CsTokenKind::GreaterThanGreaterThan => {
                Precedence::Shift
            }
            CsTokenKind::Plus | CsTokenKind::Minus => Precedence::Additive,
            CsTokenKind::Asterisk | CsTokenKind::Slash | CsTokenKind::Percent => {
                Precedence::Multiplicative
            }
            _ => Precedence::Assignment,
        }
    }

    /// Precedence of an expression's outermost operator.
    pub fn of(expr: &Expr) -> Self {
        match &expr.kind {
            ExprKind::Query(_) => Precedence::Query,
            ExprKind::Assignment { .. }
            | ExprKind::SimpleLambda { .. }
            | ExprKind::ParenthesizedLambda { .. }
            | ExprKind::AnonymousMethod { .. } => Precedence::Assignment,
            ExprKind::Conditional { .. } => Precedence::Conditional,
            ExprKind::Binary { operator, .. } => Precedence::of_binary(operator.kind()),
            ExprKind::PrefixUnary { .. } | ExprKind::Cast { .. } | ExprKind::Await(_) => {
                Precedence::Unary
            }
            _ => Precedence::Primary,
        }
    }
}

pub fn parenthesize(expr: Expr) -> Expr {
    Expr::new(ExprKind::Parenthesized(Box::new(expr)))
}

/// Parenthesize `expr` if it binds looser than `minimum`.
pub fn parenthesize_if_needed(expr: Expr, minimum: Precedence) -> Expr {
    if Precedence::of(&expr) < minimum {
        parenthesize(expr)
    } else {
        expr
    }
}

/// Remove one level of parentheses.
pub fn strip_parens(expr: Expr) -> Expr {
    match expr.kind {
        ExprKind::Parenthesized(inner) => *inner,
        kind => Expr {
            kind,
            span: expr.span,
        },
    }
}

/// Remove every level of parentheses.
pub fn strip_all_parens(mut expr: Expr) -> Expr {
    while let ExprKind::Parenthesized(_) = expr.kind {
        expr = strip_parens(expr);
    }
    expr
}

/// Look through parentheses and project the expression underneath.
pub fn unwrap_parens_as<'a, T>(
    expr: &'a Expr,
    project: impl FnOnce(&'a ExprKind) -> Option<T>,
) -> Option<T> {
    let mut current = expr;
    while let ExprKind::Parenthesized(inner) = &current.kind {
        current = inner.as_ref();
    }
    project(&current.kind)
}

pub fn identifier(name: &str) -> Expr {
    Expr::identifier(name)
}

/// A type used in expression position, such as the target of a static call.
pub fn type_name(ty: TypeSyntax) -> Expr {
    Expr::name(ty)
}

pub fn this() -> Expr {
    Expr::new(ExprKind::This)
}

pub fn base() -> Expr {
    Expr::new(ExprKind::Base)
}

pub fn null() -> Expr {
    Expr::literal(SyntaxToken::fixed(CsTokenKind::NullKeyword))
}

pub fn bool_literal(value: bool) -> Expr {
    let keyword = if value {
        CsTokenKind::TrueKeyword
    } else {
        CsTokenKind::FalseKeyword
    };
    Expr::literal(SyntaxToken::fixed(keyword))
}

pub fn string(value: &str) -> Expr {
    Expr::literal(SyntaxToken::string_literal(value))
}

pub fn int(value: i32) -> Expr {
    crate::factory::literal::Literal::Int32(value).to_expr()
}

/// `expr.name`
pub fn member(expr: Expr, name: &str) -> Expr {
    member_with(expr, TypeSyntax::identifier(name))
}

/// `expr.Name<arguments>`
pub fn generic_member(expr: Expr, name: &str, arguments: Vec<TypeSyntax>) -> Expr {
    member_with(expr, TypeSyntax::generic(name, arguments))
}

fn member_with(expr: Expr, name: TypeSyntax) -> Expr {
    Expr::new(ExprKind::MemberAccess {
        expression: Box::new(parenthesize_if_needed(expr, Precedence::Primary)),
        operator: SyntaxToken::fixed(CsTokenKind::Dot),
        name,
    })
}

/// `expr[arguments]`
pub fn element_access(expr: Expr, arguments: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::ElementAccess {
        expression: Box::new(parenthesize_if_needed(expr, Precedence::Primary)),
        arguments: ArgumentList::bracketed(arguments.into_iter().map(Argument::from)),
    })
}

pub fn argument_list(arguments: impl IntoIterator<Item = Expr>) -> ArgumentList {
    ArgumentList::parenthesized(arguments.into_iter().map(Argument::from))
}

/// `name: expr`
pub fn named_argument(name: &str, expr: Expr) -> Argument {
    Argument {
        name_colon: Some(NameColon {
            name: TypeSyntax::identifier(name),
        }),
        ref_or_out: None,
        expression: expr,
    }
}

pub fn ref_argument(expr: Expr) -> Argument {
    Argument {
        name_colon: None,
        ref_or_out: Some(SyntaxToken::fixed(CsTokenKind::RefKeyword)),
        expression: expr,
    }
}

pub fn out_argument(expr: Expr) -> Argument {
    Argument {
        name_colon: None,
        ref_or_out: Some(SyntaxToken::fixed(CsTokenKind::OutKeyword)),
        expression: expr,
    }
}

/// `expr(arguments)`
pub fn invoke(expr: Expr, arguments: impl IntoIterator<Item = Expr>) -> Expr {
    invoke_with(expr, argument_list(arguments))
}

pub fn invoke_with(expr: Expr, arguments: ArgumentList) -> Expr {
    Expr::new(ExprKind::Invocation {
        expression: Box::new(parenthesize_if_needed(expr, Precedence::Primary)),
        arguments,
    })
}

/// `expr.name(arguments)`
pub fn invoke_member(expr: Expr, name: &str, arguments: impl IntoIterator<Item = Expr>) -> Expr {
    invoke(member(expr, name), arguments)
}

/// A binary expression, parenthesizing operands as precedence requires.
pub fn binary(left: Expr, operator: CsTokenKind, right: Expr) -> Expr {
    let precedence = Precedence::of_binary(operator);
    let (left_minimum, right_minimum) = if operator == CsTokenKind::QuestionQuestion {
        (next_tighter(precedence), precedence)
    } else {
        (precedence, next_tighter(precedence))
    };
    Expr::new(ExprKind::Binary {
        left: Box::new(parenthesize_if_needed(left, left_minimum)),
        operator: SyntaxToken::fixed(operator),
        right: Box::new(parenthesize_if_needed(right, right_minimum)),
    })
}

fn next_tighter(precedence: Precedence) -> Precedence {
    match precedence {
        Precedence::Query => Precedence::Assignment,
        Precedence::Assignment => Precedence::Conditional,
        Precedence::Conditional => Precedence::Coalesce,
        Precedence::Coalesce => Precedence::ConditionalOr,
        Precedence::ConditionalOr => Precedence::ConditionalAnd,
        Precedence::ConditionalAnd => Precedence::LogicalOr,
        Precedence::LogicalOr => Precedence::LogicalXor,
        Precedence::LogicalXor => Precedence::LogicalAnd,
        Precedence::LogicalAnd => Precedence::Equality,
        Precedence::Equality => Precedence::Relational,
        Precedence::Relational => Precedence::Shift,
        Precedence::Shift => Precedence::Additive,
        Precedence::Additive => Precedence::Multiplicative,
        Precedence::Multiplicative => Precedence::Unary,
        Precedence::Unary | Precedence::Primary => Precedence::Primary,
    }
}

macro_rules! binary_builders {
    ($($name:ident => $kind:ident,)*) => {
        $(
            pub fn $name(left: Expr, right: Expr) -> Expr {
                binary(left, CsTokenKind::$kind, right)
            }
        )*
    };
}

binary_builders! {
    add => Plus,
    subtract => Minus,
    multiply => Asterisk,
    divide => Slash,
    modulo => Percent,
    left_shift => LessThanLessThan,
    right_shift => GreaterThanGreaterThan,
    less_than => LessThan,
    less_than_or_equal => LessThanEquals,
    greater_than => GreaterThan,
    greater_than_or_equal => GreaterThanEquals,
    equals => EqualsEquals,
    not_equals => ExclamationEquals,
    bitwise_and => Ampersand,
    exclusive_or => Caret,
    bitwise_or => Bar,
    logical_and => AmpersandAmpersand,
    logical_or => BarBar,
    coalesce => QuestionQuestion,
}

/// `expr is T`
pub fn is_type(expr: Expr, ty: TypeSyntax) -> Expr {
    binary(expr, CsTokenKind::IsKeyword, Expr::name(ty))
}

/// `expr as T`
pub fn as_type(expr: Expr, ty: TypeSyntax) -> Expr {
    binary(expr, CsTokenKind::AsKeyword, Expr::name(ty))
}

/// A prefix unary expression.
pub fn prefix(operator: CsTokenKind, operand: Expr) -> Expr {
    Expr::new(ExprKind::PrefixUnary {
        operator: SyntaxToken::fixed(operator),
        operand: Box::new(parenthesize_if_needed(operand, Precedence::Unary)),
    })
}

/// A postfix unary expression.
pub fn postfix(operand: Expr, operator: CsTokenKind) -> Expr {
    Expr::new(ExprKind::PostfixUnary {
        operand: Box::new(parenthesize_if_needed(operand, Precedence::Primary)),
        operator: SyntaxToken::fixed(operator),
    })
}

macro_rules! prefix_builders {
    ($($name:ident => $kind:ident,)*) => {
        $(
            pub fn $name(operand: Expr) -> Expr {
                prefix(CsTokenKind::$kind, operand)
            }
        )*
    };
}

prefix_builders! {
    not => Exclamation,
    negate => Minus,
    unary_plus => Plus,
    bitwise_not => Tilde,
    pre_increment => PlusPlus,
    pre_decrement => MinusMinus,
}

pub fn post_increment(operand: Expr) -> Expr {
    postfix(operand, CsTokenKind::PlusPlus)
}

pub fn post_decrement(operand: Expr) -> Expr {
    postfix(operand, CsTokenKind::MinusMinus)
}

/// An assignment with any assignment operator.
pub fn assignment(left: Expr, operator: CsTokenKind, right: Expr) -> Expr {
    debug_assert!(operator.is_assignment_operator(), "{operator:?} is not an assignment");
    Expr::new(ExprKind::Assignment {
        left: Box::new(left),
        operator: SyntaxToken::fixed(operator),
        right: Box::new(parenthesize_if_needed(right, Precedence::Assignment)),
    })
}

macro_rules! assignment_builders {
    ($($name:ident => $kind:ident,)*) => {
        $(
            pub fn $name(left: Expr, right: Expr) -> Expr {
                assignment(left, CsTokenKind::$kind, right)
            }
        )*
    };
}

assignment_builders! {
    assign => Equals,
    add_assign => PlusEquals,
    subtract_assign => MinusEquals,
    multiply_assign => AsteriskEquals,
    divide_assign => SlashEquals,
    modulo_assign => PercentEquals,
    and_assign => AmpersandEquals,
    or_assign => BarEquals,
    xor_assign => CaretEquals,
    left_shift_assign => LessThanLessThanEquals,
    right_shift_assign => GreaterThanGreaterThanEquals,
}

/// `condition ? when_true : when_false`
pub fn conditional(condition: Expr, when_true: Expr, when_false: Expr) -> Expr {
    Expr::new(ExprKind::Conditional {
        condition: Box::new(parenthesize_if_needed(condition, Precedence::Coalesce)),
        when_true: Box::new(when_true),
        when_false: Box::new(when_false),
    })
}

/// `(T)expr`, parenthesizing any operand that is not primary so that
/// `(T)(-x)` is never read as a subtraction.
pub fn cast(ty: TypeSyntax, expr: Expr) -> Expr {
    Expr::new(ExprKind::Cast {
        ty,
        expression: Box::new(parenthesize_if_needed(expr, Precedence::Primary)),
    })
}

pub fn type_of(ty: TypeSyntax) -> Expr {
    Expr::new(ExprKind::TypeOf(ty))
}

pub fn default_of(ty: TypeSyntax) -> Expr {
    Expr::new(ExprKind::Default(ty))
}

pub fn await_(expr: Expr) -> Expr {
    Expr::new(ExprKind::Await(Box::new(parenthesize_if_needed(
        expr,
        Precedence::Unary,
    ))))
}

/// `new T(arguments)`
pub fn new_object(ty: TypeSyntax, arguments: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::ObjectCreation {
        ty,
        arguments: Some(argument_list(arguments)),
        initializer: None,
    })
}

/// `new T(arguments) { Name = value, ... }`
pub fn new_object_with_members(
    ty: TypeSyntax,
    arguments: impl IntoIterator<Item = Expr>,
    members: impl IntoIterator<Item = (String, Expr)>,
) -> Expr {
    let assignments = members
        .into_iter()
        .map(|(name, value)| assign(identifier(&name), value));
    Expr::new(ExprKind::ObjectCreation {
        ty,
        arguments: Some(argument_list(arguments)),
        initializer: Some(initializer(InitializerKind::Object, assignments)),
    })
}

/// `new T { item, ... }`
pub fn new_collection(ty: TypeSyntax, items: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::ObjectCreation {
        ty,
        arguments: None,
        initializer: Some(initializer(InitializerKind::Collection, items)),
    })
}

/// `new T { { a, b }, ... }`, as for dictionaries.
pub fn new_collection_of_elements(
    ty: TypeSyntax,
    elements: impl IntoIterator<Item = Vec<Expr>>,
) -> Expr {
    let elements = elements.into_iter().map(|element| {
        Expr::new(ExprKind::Initializer(initializer(
            InitializerKind::Complex,
            element,
        )))
    });
    new_collection(ty, elements)
}

pub fn initializer(kind: InitializerKind, expressions: impl IntoIterator<Item = Expr>) -> Initializer {
    Initializer {
        kind,
        expressions: SeparatedList::from_items(expressions),
    }
}

/// `new { Name = value, ... }`
pub fn new_anonymous(members: impl IntoIterator<Item = (String, Expr)>) -> Expr {
    let initializers = members
        .into_iter()
        .map(|(name, expression)| AnonymousMember {
            name_equals: Some(NameEquals {
                name: TypeSyntax::identifier(&name),
            }),
            expression,
        })
        .collect();
    Expr::new(ExprKind::AnonymousObjectCreation { initializers })
}

/// `new T[] { items }`
pub fn new_array(element_type: TypeSyntax, items: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::ArrayCreation {
        ty: TypeSyntax::array(element_type, 1),
        initializer: Some(initializer(InitializerKind::Array, items)),
    })
}

/// `x => body`
pub fn simple_lambda(parameter: &str, body: Expr) -> Expr {
    Expr::new(ExprKind::SimpleLambda {
        async_keyword: None,
        parameter: Box::new(Parameter::implicit(parameter)),
        body: LambdaBody::Expr(Box::new(body)),
    })
}

/// `(a, b) => body`
pub fn lambda(parameters: &[&str], body: Expr) -> Expr {
    parenthesized_lambda(
        ParameterList::parenthesized(parameters.iter().map(|name| Parameter::implicit(name))),
        LambdaBody::Expr(Box::new(body)),
    )
}

/// `(a, b) => { statements }`
pub fn block_lambda(parameters: &[&str], body: Block) -> Expr {
    parenthesized_lambda(
        ParameterList::parenthesized(parameters.iter().map(|name| Parameter::implicit(name))),
        LambdaBody::Block(body),
    )
}

pub fn parenthesized_lambda(parameters: ParameterList, body: LambdaBody) -> Expr {
    Expr::new(ExprKind::ParenthesizedLambda {
        async_keyword: None,
        parameters,
        body,
    })
}

/// `delegate (parameters) { ... }`
pub fn anonymous_method(parameters: Option<ParameterList>, block: Block) -> Expr {
    Expr::new(ExprKind::AnonymousMethod {
        async_keyword: None,
        parameters,
        block,
    })
}

/// `((Func<T>)(() => { ... }))()`: a statement block used where an
/// expression of type `T` is required.
pub fn invoke_cast_lambda(result: TypeSyntax, body: Block) -> Expr {
    let lambda = block_lambda(&[], body);
    let delegate = cast(names::func(Vec::new(), result), parenthesize(lambda));
    invoke(parenthesize(delegate), [])
}
