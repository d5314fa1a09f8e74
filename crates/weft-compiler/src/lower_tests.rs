use std::sync::Arc;

use weft_core::{CsTokenKind, LineMap, Node, SchemaTokenKind, SourceSpan, SyntaxLabel as L};
use weft_syntax::{
    ListError, SourceSpanned, SyntaxNode, TokenValue,
    literal_text::IntegerLiteral,
    print::{PrintOptions, print, to_text},
    syntax::{
        ArgumentList, ArrayRankSpecifier, CompilationUnit, Expr, ExprKind, LambdaBody, MemberKind,
        QueryClause, SelectOrGroup, Stmt, StmtKind, TypeArgumentList, TypeKind, TypeSyntax,
    },
};

use crate::lower::{
    LowerError, is_token_node, lower, to_separated_list, to_syntax_list, to_syntax_node,
    to_syntax_token,
};

const SOURCE: &str = "schema Orders {\n  entity Order { Id: int }\n}\n";

fn span(range: std::ops::Range<usize>) -> SourceSpan {
    LineMap::new(SOURCE).span("orders.xs", range).unwrap()
}

fn node(label: L, members: Vec<(&str, Node)>) -> Node {
    Node::structure(label, None, members)
}

fn list(items: Vec<Node>) -> Node {
    Node::list(None, None, items)
}

fn ident(text: &str) -> Node {
    Node::token(CsTokenKind::Identifier, Some(text), None)
}

fn name(text: &str) -> Node {
    node(L::IdentifierName, vec![("Identifier", ident(text))])
}

fn keyword(kind: CsTokenKind) -> Node {
    Node::atom(kind, None)
}

fn number(text: &str) -> Node {
    node(
        L::LiteralExpression,
        vec![(
            "Token",
            Node::token(CsTokenKind::NumericLiteral, Some(text), None),
        )],
    )
}

fn argument(expression: Node) -> Node {
    node(
        L::Argument,
        vec![
            ("NameColon", Node::Null),
            ("RefOrOutKeyword", Node::Null),
            ("Expression", expression),
        ],
    )
}

fn predefined(kind: CsTokenKind) -> Node {
    node(L::PredefinedType, vec![("Keyword", keyword(kind))])
}

fn accessor(kind: CsTokenKind) -> Node {
    node(
        L::AccessorDeclaration,
        vec![
            ("AttributeLists", list(Vec::new())),
            ("Modifiers", list(Vec::new())),
            ("Keyword", keyword(kind)),
            ("Body", Node::Null),
        ],
    )
}

fn block(statements: Vec<Node>) -> Node {
    node(L::Block, vec![("Statements", list(statements))])
}

fn order_unit() -> Node {
    let property = node(
        L::PropertyDeclaration,
        vec![
            ("AttributeLists", list(Vec::new())),
            ("Modifiers", list(vec![keyword(CsTokenKind::PublicKeyword)])),
            ("Type", predefined(CsTokenKind::IntKeyword)),
            ("ExplicitInterfaceSpecifier", Node::Null),
            ("Identifier", ident("Id")),
            (
                "AccessorList",
                node(
                    L::AccessorList,
                    vec![(
                        "Accessors",
                        list(vec![
                            accessor(CsTokenKind::GetKeyword),
                            accessor(CsTokenKind::SetKeyword),
                        ]),
                    )],
                ),
            ),
        ],
    );
    let class = node(
        L::ClassDeclaration,
        vec![
            ("AttributeLists", list(Vec::new())),
            ("Modifiers", list(vec![keyword(CsTokenKind::PublicKeyword)])),
            ("Identifier", ident("Order")),
            ("TypeParameterList", Node::Null),
            ("BaseList", Node::Null),
            ("ConstraintClauses", list(Vec::new())),
            ("Members", list(vec![property])),
        ],
    );
    let namespace = node(
        L::NamespaceDeclaration,
        vec![
            (
                "Name",
                node(L::QualifiedName, vec![("Left", name("Acme")), ("Right", name("Orders"))]),
            ),
            ("Externs", list(Vec::new())),
            ("Usings", list(Vec::new())),
            (
                "Members",
                list(vec![
                    class,
                    Node::structure("entity", None, [("Name", Node::atom("Order", None))]),
                    Node::Null,
                ]),
            ),
        ],
    );
    node(
        L::CompilationUnit,
        vec![
            ("Externs", list(Vec::new())),
            (
                "Usings",
                list(vec![node(
                    L::UsingDirective,
                    vec![
                        ("StaticKeyword", Node::Null),
                        ("Alias", Node::Null),
                        ("Name", name("System")),
                    ],
                )]),
            ),
            ("AttributeLists", list(Vec::new())),
            ("Members", list(vec![namespace])),
        ],
    )
}

#[test]
fn test_null_lowers_to_none() {
    assert_eq!(to_syntax_node(&Node::Null), Ok(None));
    assert_eq!(lower::<Expr>(&Node::Null), Ok(None));
}

#[test]
fn test_unlabelled_node_is_rejected() {
    let unlabelled = Node::list(None, Some(span(0..6)), Vec::new());
    match to_syntax_node(&unlabelled) {
        Err(error @ LowerError::Unlabelled { .. }) => assert_eq!(error.span(), Some(&span(0..6))),
        other => panic!("Expected Unlabelled, got {other:?}"),
    }
}

#[test]
fn test_custom_label_is_unknown() {
    let custom = Node::structure("entity", None, [("Name", Node::atom("Order", None))]);
    assert_eq!(
        to_syntax_node(&custom),
        Err(LowerError::UnknownLabel {
            label: "entity".to_string(),
            span: None,
        })
    );
}

#[test]
fn test_sentinel_labels_are_not_syntax() {
    let token = Node::token(CsTokenKind::Identifier, Some("x"), None);
    assert!(matches!(
        to_syntax_node(&token),
        Err(LowerError::UnexpectedShape { .. })
    ));

    let omitted = Node::list(Some(L::AllOmitted.into()), None, Vec::new());
    assert!(matches!(
        to_syntax_node(&omitted),
        Err(LowerError::UnexpectedShape { .. })
    ));
}

#[test]
fn test_every_native_label_is_dispatched() {
    for &label in L::ALL {
        if matches!(label, L::AllOmitted | L::Token) {
            continue;
        }
        let empty = Node::structure(label, None, Vec::<(&str, Node)>::new());
        match to_syntax_node(&empty) {
            Ok(Some(_)) => {}
            Err(LowerError::MissingMember { label: missing, .. }) => assert_eq!(missing, label),
            other => panic!("{label}: unexpected result {other:?}"),
        }
    }
}

#[test]
fn test_fixed_token_atom() {
    let atom = Node::atom(CsTokenKind::PlusEquals, Some(span(3..5)));
    let token = to_syntax_token(&atom, true).unwrap();
    assert_eq!(token.text(), "+=");
    assert_eq!(token.source_span(), Some(&span(3..5)));

    let token = to_syntax_token(&atom, false).unwrap();
    assert_eq!(token.source_span(), None);
}

#[test]
fn test_variable_kind_atom_is_rejected() {
    let atom = Node::atom(CsTokenKind::Identifier, None);
    assert!(matches!(
        to_syntax_token(&atom, true),
        Err(LowerError::Token { .. })
    ));
}

#[test]
fn test_identifier_token_is_escaped() {
    let token = to_syntax_token(&ident("class"), true).unwrap();
    assert_eq!(token.text(), "@class");
    assert_eq!(token.identifier_name(), Some("class"));

    let token = to_syntax_token(&ident("Order"), true).unwrap();
    assert_eq!(token.text(), "Order");
}

#[test]
fn test_identifier_token_requires_text() {
    let token = Node::token(CsTokenKind::Identifier, None, None);
    assert_eq!(
        to_syntax_token(&token, true),
        Err(LowerError::MissingMember {
            label: L::Token,
            member: "Text",
            span: None,
        })
    );
}

#[test]
fn test_literal_tokens_parse_their_text() {
    let hex = Node::token(CsTokenKind::NumericLiteral, Some("0x10"), None);
    let token = to_syntax_token(&hex, true).unwrap();
    assert_eq!(token.text(), "0x10");
    assert!(matches!(
        token.value(),
        TokenValue::Integer(IntegerLiteral { value: 16, .. })
    ));

    let string = Node::token(CsTokenKind::StringLiteral, Some(r#""a\tb""#), None);
    let token = to_syntax_token(&string, true).unwrap();
    assert_eq!(token.value(), &TokenValue::String(Arc::from("a\tb")));

    let bad = Node::token(CsTokenKind::CharacterLiteral, Some("'ab'"), None);
    assert!(matches!(
        to_syntax_token(&bad, true),
        Err(LowerError::Literal { .. })
    ));
}

#[test]
fn test_keyword_in_token_struct_uses_canonical_text() {
    let token = Node::token(CsTokenKind::ReturnKeyword, Some("ignored"), None);
    assert_eq!(to_syntax_token(&token, true).unwrap().text(), "return");
}

#[test]
fn test_foreign_vocabulary_is_rejected() {
    let atom = Node::atom(SchemaTokenKind::DotDot, None);
    assert!(is_token_node(&atom));
    assert_eq!(
        to_syntax_token(&atom, true),
        Err(LowerError::ForeignToken {
            vocabulary: "schema",
            kind: "DotDot".to_string(),
            span: None,
        })
    );
}

#[test]
fn test_token_node_shapes() {
    assert!(is_token_node(&keyword(CsTokenKind::Comma)));
    assert!(is_token_node(&ident("x")));
    assert!(!is_token_node(&name("x")));
    assert!(!is_token_node(&Node::atom("text", None)));
    assert!(!is_token_node(&Node::labelled_atom(L::ThisExpression, CsTokenKind::ThisKeyword, None)));
}

#[test]
fn test_all_omitted_sizes() {
    let sizes = Node::list(
        Some(L::AllOmitted.into()),
        None,
        vec![keyword(CsTokenKind::Comma), keyword(CsTokenKind::Comma)],
    );
    let rank = node(L::ArrayRankSpecifier, vec![("Sizes", sizes)]);

    let rank: ArrayRankSpecifier = lower(&rank).unwrap().unwrap();
    assert_eq!(rank.sizes.len(), 3);
    assert_eq!(rank.sizes.separators().len(), 2);
    assert!(rank.sizes.iter().all(|size| size.kind == ExprKind::OmittedArraySize));
}

#[test]
fn test_array_type_prints_omitted_ranks() {
    let sizes = Node::list(Some(L::AllOmitted.into()), None, vec![keyword(CsTokenKind::Comma)]);
    let array = node(
        L::ArrayType,
        vec![
            ("ElementType", predefined(CsTokenKind::StringKeyword)),
            (
                "RankSpecifiers",
                list(vec![
                    node(L::ArrayRankSpecifier, vec![("Sizes", sizes)]),
                    node(L::ArrayRankSpecifier, vec![("Sizes", list(Vec::new()))]),
                ]),
            ),
        ],
    );
    let ty: TypeSyntax = lower(&array).unwrap().unwrap();
    assert_eq!(to_text(&ty), "string[,][]");
}

#[test]
fn test_empty_type_arguments_hold_one_omitted() {
    let arguments = node(L::TypeArgumentList, vec![("Arguments", list(Vec::new()))]);
    let arguments: TypeArgumentList = lower(&arguments).unwrap().unwrap();
    assert_eq!(arguments.arguments.len(), 1);
    assert_eq!(arguments.arguments.items()[0].kind, TypeKind::Omitted);
}

#[test]
fn test_open_generic_name() {
    let arguments = Node::list(Some(L::AllOmitted.into()), None, vec![keyword(CsTokenKind::Comma)]);
    let generic = node(
        L::GenericName,
        vec![
            ("Identifier", ident("Dictionary")),
            (
                "TypeArgumentList",
                node(L::TypeArgumentList, vec![("Arguments", arguments)]),
            ),
        ],
    );
    let ty: TypeSyntax = lower(&generic).unwrap().unwrap();
    assert_eq!(to_text(&ty), "Dictionary<,>");
}

#[test]
fn test_all_omitted_without_factory_is_rejected() {
    let arguments = Node::list(Some(L::AllOmitted.into()), None, vec![keyword(CsTokenKind::Comma)]);
    assert!(matches!(
        to_separated_list::<weft_syntax::syntax::Argument>(&arguments, None),
        Err(LowerError::UnexpectedShape { .. })
    ));
}

#[test]
fn test_separated_items_alternate() {
    let arguments = node(
        L::ArgumentList,
        vec![(
            "Arguments",
            list(vec![
                argument(name("a")),
                keyword(CsTokenKind::Comma),
                argument(number("2")),
            ]),
        )],
    );
    let arguments: ArgumentList = lower(&arguments).unwrap().unwrap();
    assert_eq!(arguments.arguments.len(), 2);
    assert_eq!(arguments.arguments.separators().len(), 1);
}

#[test]
fn test_separated_items_out_of_order() {
    let arguments = list(vec![
        argument(name("a")),
        argument(name("b")),
        keyword(CsTokenKind::Comma),
    ]);
    assert!(matches!(
        to_separated_list::<weft_syntax::syntax::Argument>(&arguments, None),
        Err(LowerError::List {
            source: ListError::ExpectedSeparator { index: 1 },
            ..
        })
    ));
}

#[test]
fn test_items_without_separators_are_comma_separated() {
    let arguments = list(vec![argument(name("a")), argument(name("b"))]);
    let arguments =
        to_separated_list::<weft_syntax::syntax::Argument>(&arguments, None).unwrap();
    assert_eq!(arguments.len(), 2);
    assert_eq!(arguments.separators()[0].text(), ",");
}

#[test]
fn test_native_only_skips_dsl_items() {
    let items = list(vec![
        name("a"),
        Node::structure("entity", None, Vec::<(&str, Node)>::new()),
        Node::Null,
        name("b"),
    ]);
    let names: Vec<TypeSyntax> = to_syntax_list(&items, true).unwrap();
    assert_eq!(names.len(), 2);

    assert!(matches!(
        to_syntax_list::<TypeSyntax>(&items, false),
        Err(LowerError::UnknownLabel { .. })
    ));
}

#[test]
fn test_node_span_is_attached() {
    let spanned = Node::structure(
        L::IdentifierName,
        Some(span(19..25)),
        [("Identifier", ident("total"))],
    );
    let ty: TypeSyntax = lower(&spanned).unwrap().unwrap();
    assert_eq!(ty.span, Some(span(19..25)));

    let statement = Node::structure(
        L::ReturnStatement,
        Some(span(17..40)),
        [("Expression", spanned)],
    );
    let stmt: Stmt = lower(&statement).unwrap().unwrap();
    assert_eq!(stmt.span, Some(span(17..40)));
    match stmt.kind {
        StmtKind::Return(Some(expr)) => assert_eq!(expr.span, Some(span(19..25))),
        other => panic!("Expected a return statement, got {other:?}"),
    }
}

#[test]
fn test_missing_required_member() {
    let statement = Node::structure(
        L::WhileStatement,
        Some(span(0..6)),
        [("Statement", block(Vec::new()))],
    );
    assert_eq!(
        to_syntax_node(&statement),
        Err(LowerError::MissingMember {
            label: L::WhileStatement,
            member: "Condition",
            span: Some(span(0..6)),
        })
    );
}

#[test]
fn test_null_member_reads_as_none() {
    let statement = node(L::ReturnStatement, vec![("Expression", Node::Null)]);
    let stmt: Stmt = lower(&statement).unwrap().unwrap();
    assert_eq!(stmt.kind, StmtKind::Return(None));
}

#[test]
fn test_absent_optional_member_is_rejected() {
    let statement = Node::structure(
        L::IfStatement,
        Some(span(17..40)),
        [
            ("Condition", name("ok")),
            ("Statement", block(Vec::new())),
            ("ElseClause", node(L::ElseClause, vec![("Statement", block(Vec::new()))])),
        ],
    );
    assert_eq!(
        to_syntax_node(&statement),
        Err(LowerError::MissingMember {
            label: L::IfStatement,
            member: "Else",
            span: Some(span(17..40)),
        })
    );
}

#[test]
fn test_absent_list_member_is_rejected() {
    let empty_block = node(L::Block, Vec::new());
    assert_eq!(
        to_syntax_node(&empty_block),
        Err(LowerError::MissingMember {
            label: L::Block,
            member: "Statements",
            span: None,
        })
    );

    let stmt: Stmt = lower(&block(Vec::new())).unwrap().unwrap();
    assert!(stmt.is_block());
}

#[test]
fn test_if_statement_keeps_else_clause() {
    let statement = node(
        L::IfStatement,
        vec![
            ("Condition", name("ok")),
            ("Statement", node(L::BreakStatement, Vec::new())),
            (
                "Else",
                node(L::ElseClause, vec![("Statement", node(L::ContinueStatement, Vec::new()))]),
            ),
        ],
    );
    let stmt: Stmt = lower(&statement).unwrap().unwrap();
    match stmt.kind {
        StmtKind::If { else_clause, .. } => assert!(else_clause.is_some()),
        other => panic!("Expected an if statement, got {other:?}"),
    }
}

#[test]
fn test_member_of_wrong_shape() {
    let statement = node(
        L::IfStatement,
        vec![
            ("Condition", block(Vec::new())),
            ("Statement", node(L::EmptyStatement, Vec::new())),
            ("Else", Node::Null),
        ],
    );
    match to_syntax_node(&statement) {
        Err(LowerError::Shape { context, source, .. }) => {
            assert_eq!(context, "_IfStatement.Condition");
            assert_eq!(source.expected, "expression");
        }
        other => panic!("Expected a shape error, got {other:?}"),
    }
}

#[test]
fn test_initializer_kind() {
    let initializer = |kind: &str| {
        node(
            L::InitializerExpression,
            vec![
                ("Kind", Node::atom(kind, None)),
                ("Expressions", list(vec![number("1"), number("2")])),
            ],
        )
    };

    let expr: Expr = lower(&initializer("collection")).unwrap().unwrap();
    assert!(matches!(expr.kind, ExprKind::Initializer(ref init) if init.expressions.len() == 2));

    assert!(matches!(
        to_syntax_node(&initializer("dictionary")),
        Err(LowerError::InvalidValue { member: "Kind", .. })
    ));
}

#[test]
fn test_assignment_requires_assignment_operator() {
    let assignment = |operator: CsTokenKind| {
        node(
            L::AssignmentExpression,
            vec![
                ("Left", name("total")),
                ("OperatorToken", keyword(operator)),
                ("Right", number("1")),
            ],
        )
    };
    let expr: Expr = lower(&assignment(CsTokenKind::PlusEquals)).unwrap().unwrap();
    assert_eq!(to_text(&expr), "total += 1");

    assert!(matches!(
        to_syntax_node(&assignment(CsTokenKind::Plus)),
        Err(LowerError::InvalidValue { .. })
    ));
}

#[test]
fn test_binary_requires_binary_operator() {
    let binary = |operator: CsTokenKind| {
        node(
            L::BinaryExpression,
            vec![
                ("Left", name("total")),
                ("OperatorToken", keyword(operator)),
                ("Right", number("1")),
            ],
        )
    };
    let expr: Expr = lower(&binary(CsTokenKind::QuestionQuestion)).unwrap().unwrap();
    assert_eq!(to_text(&expr), "total ?? 1");

    for rejected in [CsTokenKind::Semicolon, CsTokenKind::PlusEquals, CsTokenKind::PlusPlus] {
        assert!(
            matches!(
                to_syntax_node(&binary(rejected)),
                Err(LowerError::InvalidValue { label: L::BinaryExpression, member: "OperatorToken", .. })
            ),
            "{rejected:?} accepted as a binary operator"
        );
    }
}

#[test]
fn test_unary_requires_unary_operator() {
    let unary = |label: L, operator: CsTokenKind| {
        node(
            label,
            vec![("OperatorToken", keyword(operator)), ("Operand", name("count"))],
        )
    };
    let expr: Expr = lower(&unary(L::PrefixUnaryExpression, CsTokenKind::Exclamation))
        .unwrap()
        .unwrap();
    assert_eq!(to_text(&expr), "!count");
    let expr: Expr = lower(&unary(L::PostfixUnaryExpression, CsTokenKind::PlusPlus))
        .unwrap()
        .unwrap();
    assert_eq!(to_text(&expr), "count++");

    assert!(matches!(
        to_syntax_node(&unary(L::PrefixUnaryExpression, CsTokenKind::Semicolon)),
        Err(LowerError::InvalidValue { label: L::PrefixUnaryExpression, .. })
    ));
    assert!(matches!(
        to_syntax_node(&unary(L::PostfixUnaryExpression, CsTokenKind::Exclamation)),
        Err(LowerError::InvalidValue { label: L::PostfixUnaryExpression, .. })
    ));
}

#[test]
fn test_alias_qualified_name_accepts_token_or_name() {
    let qualified = |alias: Node| {
        node(
            L::AliasQualifiedName,
            vec![("Alias", alias), ("Name", name("System"))],
        )
    };

    let ty: TypeSyntax = lower(&qualified(keyword(CsTokenKind::GlobalKeyword)))
        .unwrap()
        .unwrap();
    assert_eq!(to_text(&ty), "global::System");

    let ty: TypeSyntax = lower(&qualified(name("ext"))).unwrap().unwrap();
    assert_eq!(to_text(&ty), "ext::System");
}

#[test]
fn test_simple_lambda() {
    let body = node(
        L::BinaryExpression,
        vec![
            ("Left", name("x")),
            ("OperatorToken", keyword(CsTokenKind::Asterisk)),
            ("Right", number("2")),
        ],
    );
    let lambda = node(
        L::SimpleLambdaExpression,
        vec![
            ("AsyncKeyword", Node::Null),
            (
                "Parameter",
                node(
                    L::Parameter,
                    vec![
                        ("AttributeLists", list(Vec::new())),
                        ("Modifiers", list(Vec::new())),
                        ("Type", Node::Null),
                        ("Identifier", ident("x")),
                        ("Default", Node::Null),
                    ],
                ),
            ),
            ("Body", body),
        ],
    );
    let expr: Expr = lower(&lambda).unwrap().unwrap();
    match expr.kind {
        ExprKind::SimpleLambda {
            async_keyword: None,
            parameter,
            body: LambdaBody::Expr(_),
        } => assert_eq!(parameter.identifier.text(), "x"),
        other => panic!("Expected a simple lambda, got {other:?}"),
    }
}

#[test]
fn test_query_expression() {
    let query = node(
        L::QueryExpression,
        vec![
            (
                "FromClause",
                node(
                    L::FromClause,
                    vec![
                        ("Type", Node::Null),
                        ("Identifier", ident("o")),
                        ("Expression", name("orders")),
                    ],
                ),
            ),
            (
                "Body",
                node(
                    L::QueryBody,
                    vec![
                        (
                            "Clauses",
                            list(vec![node(L::WhereClause, vec![("Condition", name("o"))])]),
                        ),
                        (
                            "SelectOrGroup",
                            node(L::SelectClause, vec![("Expression", name("o"))]),
                        ),
                        ("Continuation", Node::Null),
                    ],
                ),
            ),
        ],
    );
    let expr: Expr = lower(&query).unwrap().unwrap();
    let ExprKind::Query(query) = expr.kind else {
        panic!("Expected a query expression");
    };
    assert_eq!(query.from_clause.identifier.text(), "o");
    assert!(matches!(query.body.clauses.as_slice(), [QueryClause::Where(_)]));
    assert!(matches!(query.body.select_or_group, SelectOrGroup::Select(_)));
}

#[test]
fn test_compilation_unit_skips_dsl_members() {
    let unit: CompilationUnit = lower(&order_unit()).unwrap().unwrap();
    let [namespace] = unit.members.as_slice() else {
        panic!("Expected one namespace");
    };
    let MemberKind::Namespace(namespace) = &namespace.kind else {
        panic!("Expected a namespace, got {:?}", namespace.kind);
    };
    assert_eq!(namespace.members.len(), 1);
}

#[test]
fn test_namespace_prints_deterministically() {
    let syntax = to_syntax_node(&order_unit()).unwrap().unwrap();
    let expected = "\
using System;

namespace Acme.Orders
{
    public class Order
    {
        public int Id { get; set; }
    }
}
";
    let first = print(&syntax, &PrintOptions::default());
    let second = print(&syntax, &PrintOptions::default());
    assert_eq!(first.text, expected);
    assert_eq!(first, second);
}

#[test]
fn test_widening_to_statement() {
    let block = block(vec![node(L::BreakStatement, Vec::new())]);
    let syntax = to_syntax_node(&block).unwrap().unwrap();
    assert!(matches!(syntax, SyntaxNode::Block(_)));
    let stmt: Stmt = lower(&block).unwrap().unwrap();
    assert!(stmt.is_block());
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Strategies ====================

    fn identifier_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z_][A-Za-z0-9_]{0,12}",
            prop::sample::select(vec!["class", "int", "event", "namespace", "var", "async"])
                .prop_map(str::to_string),
        ]
    }

    fn range_strategy() -> impl Strategy<Value = std::ops::Range<usize>> {
        let len = SOURCE.chars().count();
        (0..len).prop_flat_map(move |start| (Just(start), start..=len))
            .prop_map(|(start, end)| start..end)
    }

    // ==================== Property Test Functions ====================

    fn check_identifier_round_trip(text: &str) -> Result<(), TestCaseError> {
        let token = to_syntax_token(&ident(text), true)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(token.identifier_name(), Some(text));
        Ok(())
    }

    fn check_all_omitted_count(commas: usize) -> Result<(), TestCaseError> {
        let separators = vec![keyword(CsTokenKind::Comma); commas];
        let sizes = Node::list(Some(L::AllOmitted.into()), None, separators);
        let rank = node(L::ArrayRankSpecifier, vec![("Sizes", sizes)]);

        let rank: ArrayRankSpecifier = lower(&rank)
            .map_err(|err| TestCaseError::fail(err.to_string()))?
            .ok_or_else(|| TestCaseError::fail("rank specifier lowered to nothing"))?;
        prop_assert_eq!(rank.sizes.len(), commas + 1);
        prop_assert_eq!(rank.sizes.separators().len(), commas);
        Ok(())
    }

    fn check_span_round_trip(range: std::ops::Range<usize>) -> Result<(), TestCaseError> {
        let expected = span(range);
        let node = Node::token(CsTokenKind::Identifier, Some("x"), Some(expected.clone()));

        let with_span = to_syntax_token(&node, true)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(with_span.source_span(), Some(&expected));

        let without_span = to_syntax_token(&node, false)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(without_span.source_span(), None);
        Ok(())
    }

    // ==================== Proptest Wrappers ====================

    proptest! {
        #[test]
        fn identifier_round_trip(text in identifier_strategy()) {
            check_identifier_round_trip(&text)?;
        }

        #[test]
        fn all_omitted_count(commas in 0usize..12) {
            check_all_omitted_count(commas)?;
        }

        #[test]
        fn span_round_trip(range in range_strategy()) {
            check_span_round_trip(range)?;
        }
    }
}
