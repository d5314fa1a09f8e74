//! Names and types.

use weft_syntax::syntax::{ArrayRankSpecifier, Expr, TypeArgumentList, TypeKind, TypeSyntax};

use super::{LowerError, Members};

pub(super) fn generic_name(m: &Members) -> Result<TypeKind, LowerError> {
    Ok(TypeKind::Generic {
        identifier: m.token("Identifier")?,
        type_arguments: m.required("TypeArgumentList")?,
    })
}

/// An empty argument list means one omitted argument, as in `List<>`.
pub(super) fn type_argument_list(m: &Members) -> Result<TypeArgumentList, LowerError> {
    Ok(TypeArgumentList {
        arguments: m.separated_or("Arguments", TypeSyntax::omitted)?,
    })
}

pub(super) fn qualified_name(m: &Members) -> Result<TypeKind, LowerError> {
    Ok(TypeKind::Qualified {
        left: m.boxed("Left")?,
        right: m.boxed("Right")?,
    })
}

/// The alias may be given as a token or as an identifier name.
pub(super) fn alias_qualified_name(m: &Members) -> Result<TypeKind, LowerError> {
    Ok(TypeKind::AliasQualified {
        alias: m.identifier_token("Alias")?,
        name: m.boxed("Name")?,
    })
}

pub(super) fn array_type(m: &Members) -> Result<TypeKind, LowerError> {
    Ok(TypeKind::Array {
        element_type: m.boxed("ElementType")?,
        rank_specifiers: m.list("RankSpecifiers")?,
    })
}

pub(super) fn array_rank_specifier(m: &Members) -> Result<ArrayRankSpecifier, LowerError> {
    Ok(ArrayRankSpecifier {
        sizes: m.separated_or("Sizes", Expr::omitted_array_size)?,
    })
}
