//! Compilation units, directives, attributes and member declarations.

use weft_core::SourceSpan;

use crate::{
    list::SeparatedList,
    syntax::{
        expr::{ArgumentList, Expr, NameColon, NameEquals},
        stmt::{Block, EqualsValueClause, VariableDeclaration},
        types::TypeSyntax,
    },
    token::SyntaxToken,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub externs: Vec<ExternAlias>,
    pub usings: Vec<UsingDirective>,
    pub attribute_lists: Vec<AttributeList>,
    pub members: Vec<MemberDecl>,
}

/// `extern alias Name;`
#[derive(Debug, Clone, PartialEq)]
pub struct ExternAlias {
    pub identifier: SyntaxToken,
}

/// `using System;`, `using static System.Math;` or `using A = B;`
#[derive(Debug, Clone, PartialEq)]
pub struct UsingDirective {
    pub static_keyword: Option<SyntaxToken>,
    pub alias: Option<NameEquals>,
    pub name: TypeSyntax,
}

/// `[target: A, B(1)]`
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeList {
    pub target: Option<AttributeTargetSpecifier>,
    pub attributes: SeparatedList<Attribute>,
}

/// `assembly:`, `return:`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTargetSpecifier {
    pub identifier: SyntaxToken,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: TypeSyntax,
    pub arguments: Option<AttributeArgumentList>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeArgumentList {
    pub arguments: SeparatedList<AttributeArgument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArgument {
    pub name_equals: Option<NameEquals>,
    pub name_colon: Option<NameColon>,
    pub expression: Expr,
}

/// A namespace or type member, optionally located in DSL source.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDecl {
    pub kind: MemberKind,
    pub span: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Namespace(NamespaceDecl),
    Class(TypeDecl),
    Struct(TypeDecl),
    Interface(TypeDecl),
    Enum(EnumDecl),
    Delegate(DelegateDecl),
    Field(FieldDecl),
    EventField(FieldDecl),
    Method(MethodDecl),
    Operator(OperatorDecl),
    ConversionOperator(ConversionOperatorDecl),
    Constructor(ConstructorDecl),
    Destructor(DestructorDecl),
    Property(PropertyDecl),
    Event(PropertyDecl),
    Indexer(IndexerDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: TypeSyntax,
    pub externs: Vec<ExternAlias>,
    pub usings: Vec<UsingDirective>,
    pub members: Vec<MemberDecl>,
}

/// The shared shape of class, struct and interface declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub identifier: SyntaxToken,
    pub type_parameters: Option<TypeParameterList>,
    pub base_list: Option<BaseList>,
    pub constraint_clauses: Vec<ConstraintClause>,
    pub members: Vec<MemberDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub identifier: SyntaxToken,
    pub base_list: Option<BaseList>,
    pub members: SeparatedList<EnumMemberDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub identifier: SyntaxToken,
    pub equals_value: Option<EqualsValueClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelegateDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub return_type: TypeSyntax,
    pub identifier: SyntaxToken,
    pub type_parameters: Option<TypeParameterList>,
    pub parameters: ParameterList,
    pub constraint_clauses: Vec<ConstraintClause>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeParameterList {
    pub parameters: SeparatedList<TypeParameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub attribute_lists: Vec<AttributeList>,
    /// `in` or `out`
    pub variance: Option<SyntaxToken>,
    pub identifier: SyntaxToken,
}

/// `: Base, IFace`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaseList {
    pub types: SeparatedList<TypeSyntax>,
}

/// `where T : class, new()`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintClause {
    pub name: TypeSyntax,
    pub constraints: SeparatedList<Constraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `new()`
    Constructor,
    /// `class` or `struct`
    ClassOrStruct(SyntaxToken),
    Type(TypeSyntax),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub declaration: VariableDeclaration,
}

/// `IFace.` before an explicitly implemented member name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplicitInterfaceSpecifier {
    pub name: TypeSyntax,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub return_type: TypeSyntax,
    pub explicit_interface: Option<ExplicitInterfaceSpecifier>,
    pub identifier: SyntaxToken,
    pub type_parameters: Option<TypeParameterList>,
    pub parameters: ParameterList,
    pub constraint_clauses: Vec<ConstraintClause>,
    /// `None` for abstract and interface methods.
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub return_type: TypeSyntax,
    pub operator: SyntaxToken,
    pub parameters: ParameterList,
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOperatorDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    /// `implicit` or `explicit`
    pub implicit_or_explicit: SyntaxToken,
    pub ty: TypeSyntax,
    pub parameters: ParameterList,
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub identifier: SyntaxToken,
    pub parameters: ParameterList,
    pub initializer: Option<ConstructorInitializer>,
    pub body: Option<Block>,
}

/// `: base(...)` or `: this(...)`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorInitializer {
    pub this_or_base: SyntaxToken,
    pub arguments: ArgumentList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestructorDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub identifier: SyntaxToken,
    pub body: Option<Block>,
}

/// A property, or an event with accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub ty: TypeSyntax,
    pub explicit_interface: Option<ExplicitInterfaceSpecifier>,
    pub identifier: SyntaxToken,
    pub accessors: AccessorList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexerDecl {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub ty: TypeSyntax,
    pub explicit_interface: Option<ExplicitInterfaceSpecifier>,
    pub parameters: ParameterList,
    pub accessors: AccessorList,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccessorList {
    pub accessors: Vec<Accessor>,
}

/// `get;`, `set { ... }`, `add { ... }`, `remove { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    pub keyword: SyntaxToken,
    pub body: Option<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterListKind {
    #[default]
    Parenthesized,
    /// Indexer parameters: `[int index]`
    Bracketed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterList {
    pub kind: ParameterListKind,
    pub parameters: SeparatedList<Parameter>,
}

impl ParameterList {
    pub fn parenthesized(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        Self {
            kind: ParameterListKind::Parenthesized,
            parameters: SeparatedList::from_items(parameters),
        }
    }

    pub fn bracketed(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        Self {
            kind: ParameterListKind::Bracketed,
            parameters: SeparatedList::from_items(parameters),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub attribute_lists: Vec<AttributeList>,
    pub modifiers: Vec<SyntaxToken>,
    /// `None` for implicitly typed lambda parameters.
    pub ty: Option<TypeSyntax>,
    pub identifier: SyntaxToken,
    pub default: Option<EqualsValueClause>,
}

impl Parameter {
    /// An implicitly typed parameter, as used by lambdas.
    pub fn implicit(name: &str) -> Self {
        Self {
            attribute_lists: Vec::new(),
            modifiers: Vec::new(),
            ty: None,
            identifier: SyntaxToken::identifier(name),
            default: None,
        }
    }
}

impl MemberDecl {
    pub fn new(kind: MemberKind) -> Self {
        Self { kind, span: None }
    }

    /// The declared name, for members that have one.
    pub fn identifier(&self) -> Option<&SyntaxToken> {
        match &self.kind {
            MemberKind::Class(decl) | MemberKind::Struct(decl) | MemberKind::Interface(decl) => {
                Some(&decl.identifier)
            }
            MemberKind::Enum(decl) => Some(&decl.identifier),
            MemberKind::Delegate(decl) => Some(&decl.identifier),
            MemberKind::Method(decl) => Some(&decl.identifier),
            MemberKind::Constructor(decl) => Some(&decl.identifier),
            MemberKind::Destructor(decl) => Some(&decl.identifier),
            MemberKind::Property(decl) | MemberKind::Event(decl) => Some(&decl.identifier),
            MemberKind::Field(decl) | MemberKind::EventField(decl) => decl
                .declaration
                .variables
                .first()
                .map(|variable| &variable.identifier),
            MemberKind::Namespace(_)
            | MemberKind::Operator(_)
            | MemberKind::ConversionOperator(_)
            | MemberKind::Indexer(_) => None,
        }
    }
}
