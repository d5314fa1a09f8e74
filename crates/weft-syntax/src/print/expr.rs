use weft_core::CsTokenKind;

use super::{Emit, TokenSink, emit_separated, emit_spanned, punct, spaced, spaced_token};
use crate::syntax::{
    AnonymousMember, Argument, ArgumentList, ArgumentListKind, Expr, ExprKind, FromClause,
    GroupClause, Initializer, JoinClause, JoinIntoClause, LambdaBody, LetClause, NameColon,
    NameEquals, OrderByClause, Ordering, QueryBody, QueryClause, QueryContinuation,
    QueryExpression, SelectClause, SelectOrGroup, WhereClause,
};

fn emit_async(sink: &mut dyn TokenSink, async_keyword: Option<&crate::token::SyntaxToken>) {
    if let Some(keyword) = async_keyword {
        sink.token(keyword);
        sink.space();
    }
}

fn emit_parenthesized(sink: &mut dyn TokenSink, inner: &dyn Emit) {
    punct(sink, CsTokenKind::OpenParen);
    inner.emit(sink);
    punct(sink, CsTokenKind::CloseParen);
}

impl Emit for Expr {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_spanned(sink, self.span.as_ref(), |sink| match &self.kind {
            ExprKind::Name(name) => name.emit(sink),
            ExprKind::Parenthesized(inner) => emit_parenthesized(sink, inner.as_ref()),
            ExprKind::PrefixUnary { operator, operand } => {
                sink.token(operator);
                operand.emit(sink);
            }
            ExprKind::PostfixUnary { operand, operator } => {
                operand.emit(sink);
                sink.token(operator);
            }
            ExprKind::Binary {
                left,
                operator,
                right,
            }
            | ExprKind::Assignment {
                left,
                operator,
                right,
            } => {
                left.emit(sink);
                spaced_token(sink, operator);
                right.emit(sink);
            }
            ExprKind::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                condition.emit(sink);
                spaced(sink, CsTokenKind::Question);
                when_true.emit(sink);
                spaced(sink, CsTokenKind::Colon);
                when_false.emit(sink);
            }
            ExprKind::Cast { ty, expression } => {
                emit_parenthesized(sink, ty);
                expression.emit(sink);
            }
            ExprKind::Literal(token) => sink.token(token),
            ExprKind::This => punct(sink, CsTokenKind::ThisKeyword),
            ExprKind::Base => punct(sink, CsTokenKind::BaseKeyword),
            ExprKind::TypeOf(ty) => {
                punct(sink, CsTokenKind::TypeOfKeyword);
                emit_parenthesized(sink, ty);
            }
            ExprKind::Default(ty) => {
                punct(sink, CsTokenKind::DefaultKeyword);
                emit_parenthesized(sink, ty);
            }
            ExprKind::SizeOf(ty) => {
                punct(sink, CsTokenKind::SizeOfKeyword);
                emit_parenthesized(sink, ty);
            }
            ExprKind::Checked {
                keyword,
                expression,
            } => {
                sink.token(keyword);
                emit_parenthesized(sink, expression.as_ref());
            }
            ExprKind::Invocation {
                expression,
                arguments,
            }
            | ExprKind::ElementAccess {
                expression,
                arguments,
            } => {
                expression.emit(sink);
                arguments.emit(sink);
            }
            ExprKind::MemberAccess {
                expression,
                operator,
                name,
            } => {
                expression.emit(sink);
                sink.token(operator);
                name.emit(sink);
            }
            ExprKind::ObjectCreation {
                ty,
                arguments,
                initializer,
            } => {
                punct(sink, CsTokenKind::NewKeyword);
                sink.space();
                ty.emit(sink);
                if let Some(arguments) = arguments {
                    arguments.emit(sink);
                }
                if let Some(initializer) = initializer {
                    sink.space();
                    initializer.emit(sink);
                }
            }
            ExprKind::AnonymousObjectCreation { initializers } => {
                punct(sink, CsTokenKind::NewKeyword);
                sink.space();
                emit_brace_list(sink, |sink| emit_separated(sink, initializers));
            }
            ExprKind::ArrayCreation { ty, initializer } => {
                punct(sink, CsTokenKind::NewKeyword);
                sink.space();
                ty.emit(sink);
                if let Some(initializer) = initializer {
                    sink.space();
                    initializer.emit(sink);
                }
            }
            ExprKind::ImplicitArrayCreation {
                commas,
                initializer,
            } => {
                punct(sink, CsTokenKind::NewKeyword);
                punct(sink, CsTokenKind::OpenBracket);
                for comma in commas {
                    sink.token(comma);
                }
                punct(sink, CsTokenKind::CloseBracket);
                sink.space();
                initializer.emit(sink);
            }
            ExprKind::Initializer(initializer) => initializer.emit(sink),
            ExprKind::SimpleLambda {
                async_keyword,
                parameter,
                body,
            } => {
                emit_async(sink, async_keyword.as_ref());
                parameter.emit(sink);
                spaced(sink, CsTokenKind::EqualsGreaterThan);
                body.emit(sink);
            }
            ExprKind::ParenthesizedLambda {
                async_keyword,
                parameters,
                body,
            } => {
                emit_async(sink, async_keyword.as_ref());
                parameters.emit(sink);
                spaced(sink, CsTokenKind::EqualsGreaterThan);
                body.emit(sink);
            }
            ExprKind::AnonymousMethod {
                async_keyword,
                parameters,
                block,
            } => {
                emit_async(sink, async_keyword.as_ref());
                punct(sink, CsTokenKind::DelegateKeyword);
                if let Some(parameters) = parameters {
                    parameters.emit(sink);
                }
                sink.space();
                block.emit(sink);
            }
            ExprKind::Await(operand) => {
                punct(sink, CsTokenKind::AwaitKeyword);
                sink.space();
                operand.emit(sink);
            }
            ExprKind::Query(query) => query.emit(sink),
            ExprKind::OmittedArraySize => {}
        });
    }

    fn is_empty_output(&self) -> bool {
        matches!(self.kind, ExprKind::OmittedArraySize)
    }
}

/// `{ a, b }` on one line, or `{ }` when empty.
fn emit_brace_list(sink: &mut dyn TokenSink, body: impl FnOnce(&mut dyn TokenSink)) {
    punct(sink, CsTokenKind::OpenBrace);
    sink.space();
    body(sink);
    sink.space();
    punct(sink, CsTokenKind::CloseBrace);
}

impl Emit for LambdaBody {
    fn emit(&self, sink: &mut dyn TokenSink) {
        match self {
            LambdaBody::Expr(expression) => expression.emit(sink),
            LambdaBody::Block(block) => block.emit(sink),
        }
    }
}

impl Emit for ArgumentList {
    fn emit(&self, sink: &mut dyn TokenSink) {
        let (open, close) = match self.kind {
            ArgumentListKind::Parenthesized => (CsTokenKind::OpenParen, CsTokenKind::CloseParen),
            ArgumentListKind::Bracketed => (CsTokenKind::OpenBracket, CsTokenKind::CloseBracket),
        };
        punct(sink, open);
        emit_separated(sink, &self.arguments);
        punct(sink, close);
    }
}

impl Emit for Argument {
    fn emit(&self, sink: &mut dyn TokenSink) {
        if let Some(name_colon) = &self.name_colon {
            name_colon.emit(sink);
        }
        if let Some(keyword) = &self.ref_or_out {
            sink.token(keyword);
            sink.space();
        }
        self.expression.emit(sink);
    }
}

impl Emit for NameColon {
    fn emit(&self, sink: &mut dyn TokenSink) {
        self.name.emit(sink);
        punct(sink, CsTokenKind::Colon);
        sink.space();
    }
}

impl Emit for NameEquals {
    fn emit(&self, sink: &mut dyn TokenSink) {
        self.name.emit(sink);
        spaced(sink, CsTokenKind::Equals);
    }
}

impl Emit for Initializer {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_brace_list(sink, |sink| emit_separated(sink, &self.expressions));
    }
}

impl Emit for AnonymousMember {
    fn emit(&self, sink: &mut dyn TokenSink) {
        if let Some(name_equals) = &self.name_equals {
            name_equals.emit(sink);
        }
        self.expression.emit(sink);
    }
}

impl Emit for QueryExpression {
    fn emit(&self, sink: &mut dyn TokenSink) {
        self.from_clause.emit(sink);
        sink.space();
        self.body.emit(sink);
    }
}

impl Emit for FromClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::FromKeyword);
        sink.space();
        if let Some(ty) = &self.ty {
            ty.emit(sink);
            sink.space();
        }
        sink.token(&self.identifier);
        spaced(sink, CsTokenKind::InKeyword);
        self.expression.emit(sink);
    }
}

impl Emit for QueryBody {
    fn emit(&self, sink: &mut dyn TokenSink) {
        for clause in &self.clauses {
            clause.emit(sink);
            sink.space();
        }
        self.select_or_group.emit(sink);
        if let Some(continuation) = &self.continuation {
            sink.space();
            continuation.emit(sink);
        }
    }
}

impl Emit for QueryClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        match self {
            QueryClause::From(clause) => clause.emit(sink),
            QueryClause::Let(clause) => clause.emit(sink),
            QueryClause::Where(clause) => clause.emit(sink),
            QueryClause::Join(clause) => clause.emit(sink),
            QueryClause::OrderBy(clause) => clause.emit(sink),
        }
    }
}

impl Emit for LetClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::LetKeyword);
        sink.space();
        sink.token(&self.identifier);
        spaced(sink, CsTokenKind::Equals);
        self.expression.emit(sink);
    }
}

impl Emit for WhereClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::WhereKeyword);
        sink.space();
        self.condition.emit(sink);
    }
}

impl Emit for JoinClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::JoinKeyword);
        sink.space();
        if let Some(ty) = &self.ty {
            ty.emit(sink);
            sink.space();
        }
        sink.token(&self.identifier);
        spaced(sink, CsTokenKind::InKeyword);
        self.in_expression.emit(sink);
        spaced(sink, CsTokenKind::OnKeyword);
        self.left_expression.emit(sink);
        spaced(sink, CsTokenKind::EqualsKeyword);
        self.right_expression.emit(sink);
        if let Some(into) = &self.into {
            sink.space();
            into.emit(sink);
        }
    }
}

impl Emit for JoinIntoClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::IntoKeyword);
        sink.space();
        sink.token(&self.identifier);
    }
}

impl Emit for OrderByClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::OrderByKeyword);
        sink.space();
        emit_separated(sink, &self.orderings);
    }
}

impl Emit for Ordering {
    fn emit(&self, sink: &mut dyn TokenSink) {
        self.expression.emit(sink);
        if let Some(direction) = &self.direction {
            sink.space();
            sink.token(direction);
        }
    }
}

impl Emit for SelectOrGroup {
    fn emit(&self, sink: &mut dyn TokenSink) {
        match self {
            SelectOrGroup::Select(clause) => clause.emit(sink),
            SelectOrGroup::Group(clause) => clause.emit(sink),
        }
    }
}

impl Emit for SelectClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::SelectKeyword);
        sink.space();
        self.expression.emit(sink);
    }
}

impl Emit for GroupClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::GroupKeyword);
        sink.space();
        self.group_expression.emit(sink);
        spaced(sink, CsTokenKind::ByKeyword);
        self.by_expression.emit(sink);
    }
}

impl Emit for QueryContinuation {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::IntoKeyword);
        sink.space();
        sink.token(&self.identifier);
        sink.space();
        self.body.emit(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        list::SeparatedList,
        print::to_text,
        syntax::{ArrayRankSpecifier, InitializerKind, Parameter, TypeSyntax},
        token::SyntaxToken,
    };

    fn binary(left: Expr, operator: CsTokenKind, right: Expr) -> Expr {
        Expr::new(ExprKind::Binary {
            left: Box::new(left),
            operator: SyntaxToken::fixed(operator),
            right: Box::new(right),
        })
    }

    #[test]
    fn test_binary_and_unary() {
        let negated = Expr::new(ExprKind::PrefixUnary {
            operator: SyntaxToken::fixed(CsTokenKind::Minus),
            operand: Box::new(Expr::new(ExprKind::PrefixUnary {
                operator: SyntaxToken::fixed(CsTokenKind::Minus),
                operand: Box::new(Expr::identifier("x")),
            })),
        });
        let expr = binary(Expr::identifier("a"), CsTokenKind::Plus, negated);
        assert_eq!(to_text(&expr), "a + - -x");
    }

    #[test]
    fn test_invocation_with_named_argument() {
        let call = Expr::new(ExprKind::Invocation {
            expression: Box::new(Expr::new(ExprKind::MemberAccess {
                expression: Box::new(Expr::identifier("Console")),
                operator: SyntaxToken::fixed(CsTokenKind::Dot),
                name: TypeSyntax::identifier("WriteLine"),
            })),
            arguments: ArgumentList::parenthesized([
                Argument::from(Expr::literal(SyntaxToken::string_literal("hi"))),
                Argument {
                    name_colon: Some(NameColon {
                        name: TypeSyntax::identifier("count"),
                    }),
                    ref_or_out: None,
                    expression: Expr::literal(SyntaxToken::integer_literal(
                        2,
                        crate::literal_text::IntegerSuffix::None,
                    )),
                },
            ]),
        });
        assert_eq!(to_text(&call), "Console.WriteLine(\"hi\", count: 2)");
    }

    #[test]
    fn test_array_creation_with_omitted_sizes() {
        let ty = TypeSyntax::new(crate::syntax::TypeKind::Array {
            element_type: Box::new(TypeSyntax::predefined(CsTokenKind::IntKeyword)),
            rank_specifiers: vec![ArrayRankSpecifier::omitted(2)],
        });
        let creation = Expr::new(ExprKind::ArrayCreation {
            ty,
            initializer: Some(Initializer {
                kind: InitializerKind::Array,
                expressions: SeparatedList::from_items([Expr::identifier("a")]),
            }),
        });
        assert_eq!(to_text(&creation), "new int[,] { a }");
    }

    #[test]
    fn test_lambda() {
        let lambda = Expr::new(ExprKind::SimpleLambda {
            async_keyword: Some(SyntaxToken::fixed(CsTokenKind::AsyncKeyword)),
            parameter: Box::new(Parameter::implicit("x")),
            body: LambdaBody::Expr(Box::new(Expr::new(ExprKind::Await(Box::new(
                Expr::identifier("x"),
            ))))),
        });
        assert_eq!(to_text(&lambda), "async x => await x");
    }

    #[test]
    fn test_query() {
        let query = QueryExpression {
            from_clause: FromClause {
                ty: None,
                identifier: SyntaxToken::identifier("o"),
                expression: Expr::identifier("orders"),
            },
            body: QueryBody {
                clauses: vec![
                    QueryClause::Where(WhereClause {
                        condition: Expr::identifier("o"),
                    }),
                    QueryClause::OrderBy(OrderByClause {
                        orderings: SeparatedList::from_items([Ordering {
                            expression: Expr::identifier("o"),
                            direction: Some(SyntaxToken::fixed(CsTokenKind::DescendingKeyword)),
                        }]),
                    }),
                ],
                select_or_group: SelectOrGroup::Group(GroupClause {
                    group_expression: Expr::identifier("o"),
                    by_expression: Expr::identifier("k"),
                }),
                continuation: None,
            },
        };
        assert_eq!(
            to_text(&Expr::new(ExprKind::Query(Box::new(query)))),
            "from o in orders where o orderby o descending group o by k"
        );
    }

    #[test]
    fn test_conditional_and_cast() {
        let expr = Expr::new(ExprKind::Conditional {
            condition: Box::new(Expr::identifier("c")),
            when_true: Box::new(Expr::new(ExprKind::Cast {
                ty: TypeSyntax::predefined(CsTokenKind::LongKeyword),
                expression: Box::new(Expr::identifier("x")),
            })),
            when_false: Box::new(Expr::new(ExprKind::Default(TypeSyntax::identifier("T")))),
        });
        assert_eq!(to_text(&expr), "c ? (long)x : default(T)");
    }
}
