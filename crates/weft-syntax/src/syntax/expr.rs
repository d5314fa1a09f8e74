//! Expressions and query comprehensions.

use weft_core::SourceSpan;

use crate::{
    list::SeparatedList,
    syntax::{
        decl::{Parameter, ParameterList},
        stmt::Block,
        types::TypeSyntax,
    },
    token::SyntaxToken,
};

/// An expression, optionally located in DSL source.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A name used as an expression: `x`, `List<int>`, `System.Console`.
    Name(TypeSyntax),
    Parenthesized(Box<Expr>),
    PrefixUnary {
        operator: SyntaxToken,
        operand: Box<Expr>,
    },
    PostfixUnary {
        operand: Box<Expr>,
        operator: SyntaxToken,
    },
    /// Binary operators, including `is` and `as` with a type on the right.
    Binary {
        left: Box<Expr>,
        operator: SyntaxToken,
        right: Box<Expr>,
    },
    Assignment {
        left: Box<Expr>,
        operator: SyntaxToken,
        right: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    Cast {
        ty: TypeSyntax,
        expression: Box<Expr>,
    },
    Literal(SyntaxToken),
    This,
    Base,
    TypeOf(TypeSyntax),
    Default(TypeSyntax),
    SizeOf(TypeSyntax),
    /// `checked(e)` or `unchecked(e)`
    Checked {
        keyword: SyntaxToken,
        expression: Box<Expr>,
    },
    Invocation {
        expression: Box<Expr>,
        arguments: ArgumentList,
    },
    ElementAccess {
        expression: Box<Expr>,
        arguments: ArgumentList,
    },
    /// `e.Name` or `e->Name`
    MemberAccess {
        expression: Box<Expr>,
        operator: SyntaxToken,
        name: TypeSyntax,
    },
    ObjectCreation {
        ty: TypeSyntax,
        arguments: Option<ArgumentList>,
        initializer: Option<Initializer>,
    },
    AnonymousObjectCreation {
        initializers: SeparatedList<AnonymousMember>,
    },
    ArrayCreation {
        ty: TypeSyntax,
        initializer: Option<Initializer>,
    },
    /// `new[,] { ... }`
    ImplicitArrayCreation {
        commas: Vec<SyntaxToken>,
        initializer: Initializer,
    },
    /// A brace initializer standing alone, as in nested collection elements.
    Initializer(Initializer),
    SimpleLambda {
        async_keyword: Option<SyntaxToken>,
        parameter: Box<Parameter>,
        body: LambdaBody,
    },
    ParenthesizedLambda {
        async_keyword: Option<SyntaxToken>,
        parameters: ParameterList,
        body: LambdaBody,
    },
    AnonymousMethod {
        async_keyword: Option<SyntaxToken>,
        parameters: Option<ParameterList>,
        block: Block,
    },
    Await(Box<Expr>),
    Query(Box<QueryExpression>),
    /// The empty size in `new int[,]`.
    OmittedArraySize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentListKind {
    /// `(a, b)`
    #[default]
    Parenthesized,
    /// `[a, b]`
    Bracketed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgumentList {
    pub kind: ArgumentListKind,
    pub arguments: SeparatedList<Argument>,
}

impl ArgumentList {
    pub fn parenthesized(arguments: impl IntoIterator<Item = Argument>) -> Self {
        Self {
            kind: ArgumentListKind::Parenthesized,
            arguments: SeparatedList::from_items(arguments),
        }
    }

    pub fn bracketed(arguments: impl IntoIterator<Item = Argument>) -> Self {
        Self {
            kind: ArgumentListKind::Bracketed,
            arguments: SeparatedList::from_items(arguments),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name_colon: Option<NameColon>,
    /// `ref` or `out`
    pub ref_or_out: Option<SyntaxToken>,
    pub expression: Expr,
}

impl From<Expr> for Argument {
    fn from(expression: Expr) -> Self {
        Self {
            name_colon: None,
            ref_or_out: None,
            expression,
        }
    }
}

/// `name =`
#[derive(Debug, Clone, PartialEq)]
pub struct NameEquals {
    pub name: TypeSyntax,
}

/// `name:`
#[derive(Debug, Clone, PartialEq)]
pub struct NameColon {
    pub name: TypeSyntax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitializerKind {
    /// `new T { A = 1 }`
    Object,
    /// `new T { 1, 2 }`
    Collection,
    /// `new T[] { 1, 2 }`
    Array,
    /// `{ key, value }` inside a collection initializer
    Complex,
}

impl InitializerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InitializerKind::Object => "object",
            InitializerKind::Collection => "collection",
            InitializerKind::Array => "array",
            InitializerKind::Complex => "complex",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "object" => Some(InitializerKind::Object),
            "collection" => Some(InitializerKind::Collection),
            "array" => Some(InitializerKind::Array),
            "complex" => Some(InitializerKind::Complex),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    pub kind: InitializerKind,
    pub expressions: SeparatedList<Expr>,
}

/// A member of an anonymous object: `Name = e` or a projected `e`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousMember {
    pub name_equals: Option<NameEquals>,
    pub expression: Expr,
}

/// `from x in source ...`
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExpression {
    pub from_clause: FromClause,
    pub body: QueryBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub ty: Option<TypeSyntax>,
    pub identifier: SyntaxToken,
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryBody {
    pub clauses: Vec<QueryClause>,
    pub select_or_group: SelectOrGroup,
    pub continuation: Option<Box<QueryContinuation>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryClause {
    From(FromClause),
    Let(LetClause),
    Where(WhereClause),
    Join(JoinClause),
    OrderBy(OrderByClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetClause {
    pub identifier: SyntaxToken,
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub condition: Expr,
}

/// `join T x in e on l equals r into g`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub ty: Option<TypeSyntax>,
    pub identifier: SyntaxToken,
    pub in_expression: Expr,
    pub left_expression: Expr,
    pub right_expression: Expr,
    pub into: Option<JoinIntoClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinIntoClause {
    pub identifier: SyntaxToken,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    pub orderings: SeparatedList<Ordering>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ordering {
    pub expression: Expr,
    /// `ascending` or `descending`
    pub direction: Option<SyntaxToken>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectOrGroup {
    Select(SelectClause),
    Group(GroupClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectClause {
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupClause {
    pub group_expression: Expr,
    pub by_expression: Expr,
}

/// `into g ...`
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContinuation {
    pub identifier: SyntaxToken,
    pub body: QueryBody,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { kind, span: None }
    }

    /// A name expression.
    pub fn name(name: TypeSyntax) -> Self {
        let span = name.span.clone();
        Self {
            kind: ExprKind::Name(name),
            span,
        }
    }

    pub fn identifier(name: &str) -> Self {
        Self::new(ExprKind::Name(TypeSyntax::identifier(name)))
    }

    pub fn literal(token: SyntaxToken) -> Self {
        Self::new(ExprKind::Literal(token))
    }

    pub fn omitted_array_size() -> Self {
        Self::new(ExprKind::OmittedArraySize)
    }

    /// The name or type this expression denotes, if it is a name.
    pub fn as_name(&self) -> Option<&TypeSyntax> {
        match &self.kind {
            ExprKind::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Whether the expression needs no parentheses in any operand position.
    pub fn is_primary(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Name(_)
                | ExprKind::Parenthesized(_)
                | ExprKind::Literal(_)
                | ExprKind::This
                | ExprKind::Base
                | ExprKind::TypeOf(_)
                | ExprKind::Default(_)
                | ExprKind::SizeOf(_)
                | ExprKind::Checked { .. }
                | ExprKind::Invocation { .. }
                | ExprKind::ElementAccess { .. }
                | ExprKind::MemberAccess { .. }
                | ExprKind::ObjectCreation { .. }
                | ExprKind::AnonymousObjectCreation { .. }
                | ExprKind::ArrayCreation { .. }
                | ExprKind::ImplicitArrayCreation { .. }
                | ExprKind::OmittedArraySize
        )
    }
}

impl From<TypeSyntax> for Expr {
    fn from(name: TypeSyntax) -> Self {
        Expr::name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initializer_kind_names() {
        for kind in [
            InitializerKind::Object,
            InitializerKind::Collection,
            InitializerKind::Array,
            InitializerKind::Complex,
        ] {
            assert_eq!(InitializerKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(InitializerKind::parse("dictionary"), None);
    }

    #[test]
    fn test_name_expression_keeps_span() {
        let mut name = TypeSyntax::identifier("x");
        name.span = Some(weft_core::SourceSpan::empty_at_start("a.xs"));
        let expr = Expr::name(name);
        assert!(expr.span.is_some());
        assert!(expr.is_primary());
    }
}
