//! The sum over every syntax shape.
//!
//! Lowering produces a [`SyntaxNode`] for each labelled input node; callers
//! narrow it to the type a position requires with `TryFrom`, which fails with
//! a [`ShapeError`] naming both shapes.

use thiserror::Error;

use crate::syntax::{
    Accessor, AccessorList, AnonymousMember, Argument, ArgumentList, ArrayRankSpecifier, Attribute,
    AttributeArgument, AttributeArgumentList, AttributeList, AttributeTargetSpecifier, BaseList,
    Block, CatchClause,
    CatchDeclaration, CatchFilterClause, CompilationUnit, Constraint, ConstraintClause,
    ConstructorInitializer, ElseClause, EnumMemberDecl, EqualsValueClause,
    ExplicitInterfaceSpecifier, Expr, ExprKind, ExternAlias, FinallyClause, FromClause,
    Initializer, JoinIntoClause, LambdaBody, MemberDecl, NameColon, NameEquals, Ordering,
    Parameter, ParameterList, QueryBody, QueryClause, QueryContinuation, SelectOrGroup, Stmt,
    StmtKind, SwitchLabel, SwitchSection, TypeArgumentList, TypeParameter, TypeParameterList,
    TypeSyntax, UsingDirective, VariableDeclaration, VariableDeclarator,
};

/// A syntax node of one shape was found where another was required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ShapeError {
    pub expected: &'static str,
    pub found: &'static str,
}

macro_rules! syntax_nodes {
    (
        direct { $($dvariant:ident($dty:ty) => $dname:literal,)* }
        widening { $($wvariant:ident($wty:ty) => $wname:literal,)* }
    ) => {
        /// Any lowered syntax shape.
        #[derive(Debug, Clone, PartialEq)]
        pub enum SyntaxNode {
            $($dvariant($dty),)*
            $($wvariant($wty),)*
        }

        impl SyntaxNode {
            /// Human readable name of the shape, used in errors.
            pub fn shape_name(&self) -> &'static str {
                match self {
                    $(SyntaxNode::$dvariant(_) => $dname,)*
                    $(SyntaxNode::$wvariant(_) => $wname,)*
                }
            }
        }

        $(
            impl From<$dty> for SyntaxNode {
                fn from(node: $dty) -> Self {
                    SyntaxNode::$dvariant(node)
                }
            }

            impl TryFrom<SyntaxNode> for $dty {
                type Error = ShapeError;

                fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
                    match node {
                        SyntaxNode::$dvariant(inner) => Ok(inner),
                        other => Err(ShapeError {
                            expected: $dname,
                            found: other.shape_name(),
                        }),
                    }
                }
            }
        )*

        $(
            impl From<$wty> for SyntaxNode {
                fn from(node: $wty) -> Self {
                    SyntaxNode::$wvariant(node)
                }
            }
        )*
    };
}

syntax_nodes! {
    direct {
        CompilationUnit(CompilationUnit) => "compilation unit",
        ExternAlias(ExternAlias) => "extern alias directive",
        UsingDirective(UsingDirective) => "using directive",
        NameEquals(NameEquals) => "name equals",
        NameColon(NameColon) => "name colon",
        AttributeList(AttributeList) => "attribute list",
        AttributeTargetSpecifier(AttributeTargetSpecifier) => "attribute target",
        Attribute(Attribute) => "attribute",
        AttributeArgumentList(AttributeArgumentList) => "attribute argument list",
        AttributeArgument(AttributeArgument) => "attribute argument",
        Member(MemberDecl) => "member declaration",
        EnumMember(EnumMemberDecl) => "enum member declaration",
        TypeParameterList(TypeParameterList) => "type parameter list",
        TypeParameter(TypeParameter) => "type parameter",
        BaseList(BaseList) => "base list",
        ConstraintClause(ConstraintClause) => "constraint clause",
        Constraint(Constraint) => "constraint",
        ExplicitInterfaceSpecifier(ExplicitInterfaceSpecifier) => "explicit interface specifier",
        ConstructorInitializer(ConstructorInitializer) => "constructor initializer",
        AccessorList(AccessorList) => "accessor list",
        Accessor(Accessor) => "accessor",
        ParameterList(ParameterList) => "parameter list",
        Parameter(Parameter) => "parameter",
        EqualsValueClause(EqualsValueClause) => "equals value clause",
        VariableDeclaration(VariableDeclaration) => "variable declaration",
        VariableDeclarator(VariableDeclarator) => "variable declarator",
        ElseClause(ElseClause) => "else clause",
        SwitchSection(SwitchSection) => "switch section",
        SwitchLabel(SwitchLabel) => "switch label",
        CatchClause(CatchClause) => "catch clause",
        CatchDeclaration(CatchDeclaration) => "catch declaration",
        CatchFilterClause(CatchFilterClause) => "catch filter",
        FinallyClause(FinallyClause) => "finally clause",
        ArgumentList(ArgumentList) => "argument list",
        Argument(Argument) => "argument",
        Initializer(Initializer) => "initializer",
        AnonymousMember(AnonymousMember) => "anonymous object member",
        QueryBody(QueryBody) => "query body",
        JoinIntoClause(JoinIntoClause) => "join into clause",
        Ordering(Ordering) => "ordering",
        SelectOrGroup(SelectOrGroup) => "select or group clause",
        QueryContinuation(QueryContinuation) => "query continuation",
        TypeArgumentList(TypeArgumentList) => "type argument list",
        ArrayRankSpecifier(ArrayRankSpecifier) => "array rank specifier",
    }
    widening {
        Block(Block) => "block",
        Stmt(Stmt) => "statement",
        Expr(Expr) => "expression",
        Type(TypeSyntax) => "type",
        FromClause(FromClause) => "from clause",
        QueryClause(QueryClause) => "query clause",
    }
}

impl TryFrom<SyntaxNode> for Block {
    type Error = ShapeError;

    fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
        match node {
            SyntaxNode::Block(block) => Ok(block),
            SyntaxNode::Stmt(Stmt {
                kind: StmtKind::Block(block),
                ..
            }) => Ok(block),
            other => Err(ShapeError {
                expected: "block",
                found: other.shape_name(),
            }),
        }
    }
}

/// A block is a statement.
impl TryFrom<SyntaxNode> for Stmt {
    type Error = ShapeError;

    fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
        match node {
            SyntaxNode::Stmt(stmt) => Ok(stmt),
            SyntaxNode::Block(block) => Ok(block.into()),
            other => Err(ShapeError {
                expected: "statement",
                found: other.shape_name(),
            }),
        }
    }
}

/// A name is an expression.
impl TryFrom<SyntaxNode> for Expr {
    type Error = ShapeError;

    fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
        match node {
            SyntaxNode::Expr(expr) => Ok(expr),
            SyntaxNode::Type(ty) => Ok(Expr::name(ty)),
            SyntaxNode::Initializer(initializer) => Ok(Expr::new(ExprKind::Initializer(initializer))),
            other => Err(ShapeError {
                expected: "expression",
                found: other.shape_name(),
            }),
        }
    }
}

/// A name expression is a type.
impl TryFrom<SyntaxNode> for TypeSyntax {
    type Error = ShapeError;

    fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
        match node {
            SyntaxNode::Type(ty) => Ok(ty),
            SyntaxNode::Expr(Expr {
                kind: ExprKind::Name(ty),
                ..
            }) => Ok(ty),
            other => Err(ShapeError {
                expected: "type",
                found: other.shape_name(),
            }),
        }
    }
}

impl TryFrom<SyntaxNode> for FromClause {
    type Error = ShapeError;

    fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
        match node {
            SyntaxNode::FromClause(clause) | SyntaxNode::QueryClause(QueryClause::From(clause)) => {
                Ok(clause)
            }
            other => Err(ShapeError {
                expected: "from clause",
                found: other.shape_name(),
            }),
        }
    }
}

impl TryFrom<SyntaxNode> for QueryClause {
    type Error = ShapeError;

    fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
        match node {
            SyntaxNode::QueryClause(clause) => Ok(clause),
            SyntaxNode::FromClause(clause) => Ok(QueryClause::From(clause)),
            other => Err(ShapeError {
                expected: "query clause",
                found: other.shape_name(),
            }),
        }
    }
}

/// A lambda body is either a block or an expression.
impl TryFrom<SyntaxNode> for LambdaBody {
    type Error = ShapeError;

    fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
        match node {
            SyntaxNode::Block(block) => Ok(LambdaBody::Block(block)),
            SyntaxNode::Stmt(Stmt {
                kind: StmtKind::Block(block),
                ..
            }) => Ok(LambdaBody::Block(block)),
            other => Expr::try_from(other)
                .map(|expr| LambdaBody::Expr(Box::new(expr)))
                .map_err(|error| ShapeError {
                    expected: "lambda body",
                    found: error.found,
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_conversion() {
        let node = SyntaxNode::from(BaseList::default());
        assert_eq!(node.shape_name(), "base list");
        assert!(BaseList::try_from(node).is_ok());
    }

    #[test]
    fn test_wrong_shape_names_both() {
        let node = SyntaxNode::from(AccessorList::default());
        assert_eq!(
            BaseList::try_from(node),
            Err(ShapeError {
                expected: "base list",
                found: "accessor list",
            })
        );
    }

    #[test]
    fn test_block_widens_to_statement() {
        let stmt = Stmt::try_from(SyntaxNode::Block(Block::default())).unwrap();
        assert!(stmt.is_block());
        let block = Block::try_from(SyntaxNode::Stmt(stmt)).unwrap();
        assert!(block.statements.is_empty());
    }

    #[test]
    fn test_name_widens_to_expression_and_back() {
        let expr = Expr::try_from(SyntaxNode::Type(TypeSyntax::identifier("x"))).unwrap();
        assert!(expr.as_name().is_some());
        assert!(TypeSyntax::try_from(SyntaxNode::Expr(expr)).is_ok());

        let literal = Expr::new(ExprKind::This);
        assert!(TypeSyntax::try_from(SyntaxNode::Expr(literal)).is_err());
    }

    #[test]
    fn test_lambda_body() {
        assert!(matches!(
            LambdaBody::try_from(SyntaxNode::Block(Block::default())),
            Ok(LambdaBody::Block(_))
        ));
        assert!(matches!(
            LambdaBody::try_from(SyntaxNode::Expr(Expr::new(ExprKind::This))),
            Ok(LambdaBody::Expr(_))
        ));
        assert!(LambdaBody::try_from(SyntaxNode::from(BaseList::default())).is_err());
    }
}
