//! Names and types.

use weft_core::{CsTokenKind, SourceSpan};

use crate::{list::SeparatedList, syntax::expr::Expr, token::SyntaxToken};

/// A name or type, optionally located in DSL source.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSyntax {
    pub kind: TypeKind,
    pub span: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// `Name`
    Identifier(SyntaxToken),
    /// `Name<T1, T2>`
    Generic {
        identifier: SyntaxToken,
        type_arguments: TypeArgumentList,
    },
    /// `Left.Right`
    Qualified {
        left: Box<TypeSyntax>,
        right: Box<TypeSyntax>,
    },
    /// `alias::Name`, where the alias is an identifier or `global`.
    AliasQualified {
        alias: SyntaxToken,
        name: Box<TypeSyntax>,
    },
    /// `int`, `string`, `void`, ...
    Predefined(SyntaxToken),
    /// `T[][,]`
    Array {
        element_type: Box<TypeSyntax>,
        rank_specifiers: Vec<ArrayRankSpecifier>,
    },
    /// `T?`
    Nullable(Box<TypeSyntax>),
    /// `T*`
    Pointer(Box<TypeSyntax>),
    /// The empty argument in an open generic type such as `Dictionary<,>`.
    Omitted,
}

/// `<T1, T2>`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeArgumentList {
    pub arguments: SeparatedList<TypeSyntax>,
}

/// `[,,]` or `[10]` after an array element type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayRankSpecifier {
    pub sizes: SeparatedList<Expr>,
}

impl ArrayRankSpecifier {
    /// A rank specifier of `rank` omitted sizes.
    pub fn omitted(rank: usize) -> Self {
        let separators = (1..rank.max(1))
            .map(|_| SyntaxToken::fixed(CsTokenKind::Comma))
            .collect();
        Self {
            sizes: SeparatedList::all_omitted(separators, Expr::omitted_array_size),
        }
    }

    pub fn rank(&self) -> usize {
        self.sizes.len().max(1)
    }
}

impl TypeSyntax {
    pub fn new(kind: TypeKind) -> Self {
        Self { kind, span: None }
    }

    /// A simple identifier name.
    pub fn identifier(name: &str) -> Self {
        Self::new(TypeKind::Identifier(SyntaxToken::identifier(name)))
    }

    /// A predefined type from its keyword kind.
    pub fn predefined(keyword: CsTokenKind) -> Self {
        Self::new(TypeKind::Predefined(SyntaxToken::fixed(keyword)))
    }

    pub fn generic(name: &str, arguments: impl IntoIterator<Item = TypeSyntax>) -> Self {
        Self::new(TypeKind::Generic {
            identifier: SyntaxToken::identifier(name),
            type_arguments: TypeArgumentList {
                arguments: SeparatedList::from_items(arguments),
            },
        })
    }

    pub fn qualified(left: TypeSyntax, right: TypeSyntax) -> Self {
        Self::new(TypeKind::Qualified {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn alias_qualified(alias: SyntaxToken, name: TypeSyntax) -> Self {
        Self::new(TypeKind::AliasQualified {
            alias,
            name: Box::new(name),
        })
    }

    pub fn array(element_type: TypeSyntax, rank: usize) -> Self {
        Self::new(TypeKind::Array {
            element_type: Box::new(element_type),
            rank_specifiers: vec![ArrayRankSpecifier::omitted(rank)],
        })
    }

    pub fn nullable(element_type: TypeSyntax) -> Self {
        Self::new(TypeKind::Nullable(Box::new(element_type)))
    }

    pub fn pointer(element_type: TypeSyntax) -> Self {
        Self::new(TypeKind::Pointer(Box::new(element_type)))
    }

    pub fn omitted() -> Self {
        Self::new(TypeKind::Omitted)
    }

    /// Whether this is a simple or generic name, usable as the right side
    /// of a qualified name or a member access.
    pub fn is_simple_name(&self) -> bool {
        matches!(self.kind, TypeKind::Identifier(_) | TypeKind::Generic { .. })
    }

    /// The rightmost identifier of a name.
    pub fn rightmost_identifier(&self) -> Option<&SyntaxToken> {
        match &self.kind {
            TypeKind::Identifier(identifier) => Some(identifier),
            TypeKind::Generic { identifier, .. } => Some(identifier),
            TypeKind::Qualified { right, .. } => right.rightmost_identifier(),
            TypeKind::AliasQualified { name, .. } => name.rightmost_identifier(),
            _ => None,
        }
    }
}
