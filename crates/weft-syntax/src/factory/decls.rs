//! Declaration builders.

use log::debug;
use weft_core::{CsTokenKind, Vocabulary};

use crate::{
    factory::{exprs, names},
    list::SeparatedList,
    syntax::{
        Accessor, AccessorList, Attribute, AttributeArgument, AttributeArgumentList,
        AttributeList, BaseList, Block, CompilationUnit, ConstructorDecl, ConstructorInitializer,
        ConversionOperatorDecl, Expr, FieldDecl, IndexerDecl, MemberDecl, MemberKind, MethodDecl,
        NameEquals, NamespaceDecl, Parameter, ParameterList, PropertyDecl, Stmt, TypeDecl,
        TypeSyntax, UsingDirective,
    },
    token::SyntaxToken,
};

use super::stmts;

/// Modifier tokens from their keyword texts, such as `["public", "static"]`.
///
/// A text that is not a keyword becomes an identifier token.
pub fn modifiers(keywords: &[&str]) -> Vec<SyntaxToken> {
    keywords
        .iter()
        .map(|text| match CsTokenKind::from_fixed_text(text) {
            Some(kind) if kind.is_reserved_keyword() || kind.is_contextual_keyword() => {
                SyntaxToken::fixed(kind)
            }
            _ => {
                debug!(text; "Modifier is not a keyword");
                SyntaxToken::identifier(text)
            }
        })
        .collect()
}

/// `Name(arguments)`, or `Name` without arguments.
pub fn attribute(name: TypeSyntax, arguments: Vec<AttributeArgument>) -> Attribute {
    Attribute {
        name,
        arguments: (!arguments.is_empty()).then(|| AttributeArgumentList {
            arguments: SeparatedList::from_items(arguments),
        }),
    }
}

pub fn attribute_argument(expression: Expr) -> AttributeArgument {
    AttributeArgument {
        name_equals: None,
        name_colon: None,
        expression,
    }
}

/// `Name = expression`
pub fn named_attribute_argument(name: &str, expression: Expr) -> AttributeArgument {
    AttributeArgument {
        name_equals: Some(NameEquals {
            name: TypeSyntax::identifier(name),
        }),
        name_colon: None,
        expression,
    }
}

pub fn attribute_list(attributes: impl IntoIterator<Item = Attribute>) -> AttributeList {
    AttributeList {
        target: None,
        attributes: SeparatedList::from_items(attributes),
    }
}

/// Attach attribute lists to a member that can carry them.
///
/// Namespaces have no attributes and are returned unchanged.
pub fn with_attributes(mut member: MemberDecl, lists: Vec<AttributeList>) -> MemberDecl {
    let target = match &mut member.kind {
        MemberKind::Class(decl) | MemberKind::Struct(decl) | MemberKind::Interface(decl) => {
            &mut decl.attribute_lists
        }
        MemberKind::Enum(decl) => &mut decl.attribute_lists,
        MemberKind::Delegate(decl) => &mut decl.attribute_lists,
        MemberKind::Field(decl) | MemberKind::EventField(decl) => &mut decl.attribute_lists,
        MemberKind::Method(decl) => &mut decl.attribute_lists,
        MemberKind::Operator(decl) => &mut decl.attribute_lists,
        MemberKind::ConversionOperator(decl) => &mut decl.attribute_lists,
        MemberKind::Constructor(decl) => &mut decl.attribute_lists,
        MemberKind::Destructor(decl) => &mut decl.attribute_lists,
        MemberKind::Property(decl) | MemberKind::Event(decl) => &mut decl.attribute_lists,
        MemberKind::Indexer(decl) => &mut decl.attribute_lists,
        MemberKind::Namespace(_) => return member,
    };
    target.extend(lists);
    member
}

/// `modifiers class Name : bases { members }`
pub fn class(
    name: &str,
    modifier_keywords: &[&str],
    bases: Vec<TypeSyntax>,
    members: Vec<MemberDecl>,
) -> MemberDecl {
    MemberDecl::new(MemberKind::Class(TypeDecl {
        attribute_lists: Vec::new(),
        modifiers: modifiers(modifier_keywords),
        identifier: SyntaxToken::identifier(name),
        type_parameters: None,
        base_list: (!bases.is_empty()).then(|| BaseList {
            types: SeparatedList::from_items(bases),
        }),
        constraint_clauses: Vec::new(),
        members,
    }))
}

fn accessor(keyword: CsTokenKind, body: Option<Block>) -> Accessor {
    Accessor {
        attribute_lists: Vec::new(),
        modifiers: Vec::new(),
        keyword: SyntaxToken::fixed(keyword),
        body,
    }
}

fn property(ty: TypeSyntax, name: &str, modifier_keywords: &[&str], accessors: Vec<Accessor>) -> MemberDecl {
    MemberDecl::new(MemberKind::Property(PropertyDecl {
        attribute_lists: Vec::new(),
        modifiers: modifiers(modifier_keywords),
        ty,
        explicit_interface: None,
        identifier: SyntaxToken::identifier(name),
        accessors: AccessorList { accessors },
    }))
}

/// `T Name { get; set; }`
pub fn auto_property(ty: TypeSyntax, name: &str, modifier_keywords: &[&str]) -> MemberDecl {
    property(
        ty,
        name,
        modifier_keywords,
        vec![
            accessor(CsTokenKind::GetKeyword, None),
            accessor(CsTokenKind::SetKeyword, None),
        ],
    )
}

/// `T Name { get { body } }`
pub fn property_with_getter(
    ty: TypeSyntax,
    name: &str,
    modifier_keywords: &[&str],
    body: impl IntoIterator<Item = Stmt>,
) -> MemberDecl {
    property(
        ty,
        name,
        modifier_keywords,
        vec![accessor(CsTokenKind::GetKeyword, Some(stmts::block(body)))],
    )
}

/// `T this[parameters] { get { body } }`
pub fn indexer(
    ty: TypeSyntax,
    modifier_keywords: &[&str],
    parameters: Vec<Parameter>,
    getter: impl IntoIterator<Item = Stmt>,
) -> MemberDecl {
    MemberDecl::new(MemberKind::Indexer(IndexerDecl {
        attribute_lists: Vec::new(),
        modifiers: modifiers(modifier_keywords),
        ty,
        explicit_interface: None,
        parameters: ParameterList::bracketed(parameters),
        accessors: AccessorList {
            accessors: vec![accessor(CsTokenKind::GetKeyword, Some(stmts::block(getter)))],
        },
    }))
}

/// A method; `body` is `None` for abstract and interface methods.
pub fn method(
    return_type: TypeSyntax,
    name: &str,
    modifier_keywords: &[&str],
    parameters: Vec<Parameter>,
    body: Option<Vec<Stmt>>,
) -> MemberDecl {
    MemberDecl::new(MemberKind::Method(MethodDecl {
        attribute_lists: Vec::new(),
        modifiers: modifiers(modifier_keywords),
        return_type,
        explicit_interface: None,
        identifier: SyntaxToken::identifier(name),
        type_parameters: None,
        parameters: ParameterList::parenthesized(parameters),
        constraint_clauses: Vec::new(),
        body: body.map(stmts::block),
    }))
}

/// `: base(arguments)`
pub fn base_initializer(arguments: impl IntoIterator<Item = Expr>) -> ConstructorInitializer {
    ConstructorInitializer {
        this_or_base: SyntaxToken::fixed(CsTokenKind::BaseKeyword),
        arguments: exprs::argument_list(arguments),
    }
}

/// `: this(arguments)`
pub fn this_initializer(arguments: impl IntoIterator<Item = Expr>) -> ConstructorInitializer {
    ConstructorInitializer {
        this_or_base: SyntaxToken::fixed(CsTokenKind::ThisKeyword),
        arguments: exprs::argument_list(arguments),
    }
}

pub fn constructor(
    name: &str,
    modifier_keywords: &[&str],
    parameters: Vec<Parameter>,
    initializer: Option<ConstructorInitializer>,
    body: impl IntoIterator<Item = Stmt>,
) -> MemberDecl {
    MemberDecl::new(MemberKind::Constructor(ConstructorDecl {
        attribute_lists: Vec::new(),
        modifiers: modifiers(modifier_keywords),
        identifier: SyntaxToken::identifier(name),
        parameters: ParameterList::parenthesized(parameters),
        initializer,
        body: Some(stmts::block(body)),
    }))
}

/// `public static implicit operator T(parameter) { body }`
pub fn conversion_operator(
    implicit: bool,
    ty: TypeSyntax,
    parameter: Parameter,
    body: impl IntoIterator<Item = Stmt>,
) -> MemberDecl {
    let keyword = if implicit {
        CsTokenKind::ImplicitKeyword
    } else {
        CsTokenKind::ExplicitKeyword
    };
    MemberDecl::new(MemberKind::ConversionOperator(ConversionOperatorDecl {
        attribute_lists: Vec::new(),
        modifiers: modifiers(&["public", "static"]),
        implicit_or_explicit: SyntaxToken::fixed(keyword),
        ty,
        parameters: ParameterList::parenthesized([parameter]),
        body: Some(stmts::block(body)),
    }))
}

pub fn field(
    ty: TypeSyntax,
    name: &str,
    modifier_keywords: &[&str],
    initializer: Option<Expr>,
) -> MemberDecl {
    MemberDecl::new(MemberKind::Field(FieldDecl {
        attribute_lists: Vec::new(),
        modifiers: modifiers(modifier_keywords),
        declaration: stmts::variable_declaration(ty, name, initializer),
    }))
}

pub fn parameter(ty: TypeSyntax, name: &str) -> Parameter {
    Parameter {
        attribute_lists: Vec::new(),
        modifiers: Vec::new(),
        ty: Some(ty),
        identifier: SyntaxToken::identifier(name),
        default: None,
    }
}

/// A sealed attribute class carrying its own `AttributeUsage`.
///
/// `targets` are `AttributeTargets` member names such as `"Class"`.
pub fn attribute_class(
    name: &str,
    targets: &[&str],
    allow_multiple: bool,
    members: Vec<MemberDecl>,
) -> MemberDecl {
    let targets_expr = targets
        .iter()
        .map(|target| exprs::member(exprs::type_name(names::attribute_targets()), target))
        .reduce(exprs::bitwise_or)
        .unwrap_or_else(|| exprs::member(exprs::type_name(names::attribute_targets()), "All"));
    let usage = attribute(
        names::attribute_usage_attribute(),
        vec![
            attribute_argument(targets_expr),
            named_attribute_argument("AllowMultiple", exprs::bool_literal(allow_multiple)),
        ],
    );
    with_attributes(
        class(name, &["public", "sealed"], vec![names::attribute()], members),
        vec![attribute_list([usage])],
    )
}

/// `using Some.Namespace;`
pub fn using_directive(name: &str) -> UsingDirective {
    UsingDirective {
        static_keyword: None,
        alias: None,
        name: names::dotted(name),
    }
}

pub fn namespace(name: &str, members: Vec<MemberDecl>) -> MemberDecl {
    MemberDecl::new(MemberKind::Namespace(NamespaceDecl {
        name: names::dotted(name),
        externs: Vec::new(),
        usings: Vec::new(),
        members,
    }))
}

pub fn compilation_unit(usings: Vec<UsingDirective>, members: Vec<MemberDecl>) -> CompilationUnit {
    CompilationUnit {
        externs: Vec::new(),
        usings,
        attribute_lists: Vec::new(),
        members,
    }
}
