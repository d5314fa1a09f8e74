//! The host-language syntax tree.
//!
//! Four categories carry their own optional [`SourceSpan`](weft_core::SourceSpan):
//! [`TypeSyntax`], [`Expr`], [`Stmt`] and [`MemberDecl`], each a small struct
//! around a kind enum. Everything else is plain data nested inside them and
//! reports spans through its tokens and children.

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod types;

pub use decl::{
    Accessor, AccessorList, Attribute, AttributeArgument, AttributeArgumentList, AttributeList,
    AttributeTargetSpecifier, BaseList, CompilationUnit, Constraint, ConstraintClause,
    ConstructorDecl, ConstructorInitializer, ConversionOperatorDecl, DelegateDecl, DestructorDecl,
    EnumDecl, EnumMemberDecl, ExplicitInterfaceSpecifier, ExternAlias, FieldDecl, IndexerDecl,
    MemberDecl, MemberKind, MethodDecl, NamespaceDecl, OperatorDecl, Parameter, ParameterList,
    ParameterListKind, PropertyDecl, TypeDecl, TypeParameter, TypeParameterList, UsingDirective,
};
pub use expr::{
    AnonymousMember, Argument, ArgumentList, ArgumentListKind, Expr, ExprKind, FromClause,
    GroupClause, Initializer, InitializerKind, JoinClause, JoinIntoClause, LambdaBody, LetClause,
    NameColon, NameEquals, OrderByClause, Ordering, QueryBody, QueryClause, QueryContinuation,
    QueryExpression, SelectClause, SelectOrGroup, WhereClause,
};
pub use stmt::{
    Block, CatchClause, CatchDeclaration, CatchFilterClause, ElseClause, EqualsValueClause,
    FinallyClause, Stmt, StmtKind, SwitchLabel, SwitchSection, VariableDeclaration,
    VariableDeclarator,
};
pub use types::{ArrayRankSpecifier, TypeArgumentList, TypeKind, TypeSyntax};
