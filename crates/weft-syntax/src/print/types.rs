use weft_core::CsTokenKind;

use super::{Emit, TokenSink, emit_separated, emit_spanned, punct};
use crate::syntax::{ArrayRankSpecifier, TypeArgumentList, TypeKind, TypeSyntax};

impl Emit for TypeSyntax {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_spanned(sink, self.span.as_ref(), |sink| match &self.kind {
            TypeKind::Identifier(identifier) | TypeKind::Predefined(identifier) => {
                sink.token(identifier);
            }
            TypeKind::Generic {
                identifier,
                type_arguments,
            } => {
                sink.token(identifier);
                type_arguments.emit(sink);
            }
            TypeKind::Qualified { left, right } => {
                left.emit(sink);
                punct(sink, CsTokenKind::Dot);
                right.emit(sink);
            }
            TypeKind::AliasQualified { alias, name } => {
                sink.token(alias);
                punct(sink, CsTokenKind::ColonColon);
                name.emit(sink);
            }
            TypeKind::Array {
                element_type,
                rank_specifiers,
            } => {
                element_type.emit(sink);
                for rank in rank_specifiers {
                    rank.emit(sink);
                }
            }
            TypeKind::Nullable(element_type) => {
                element_type.emit(sink);
                punct(sink, CsTokenKind::Question);
            }
            TypeKind::Pointer(element_type) => {
                element_type.emit(sink);
                punct(sink, CsTokenKind::Asterisk);
            }
            TypeKind::Omitted => {}
        });
    }

    fn is_empty_output(&self) -> bool {
        matches!(self.kind, TypeKind::Omitted)
    }
}

impl Emit for TypeArgumentList {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::LessThan);
        emit_separated(sink, &self.arguments);
        punct(sink, CsTokenKind::GreaterThan);
    }
}

impl Emit for ArrayRankSpecifier {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::OpenBracket);
        emit_separated(sink, &self.sizes);
        punct(sink, CsTokenKind::CloseBracket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{print::to_text, token::SyntaxToken};

    #[test]
    fn test_nested_generic() {
        let ty = TypeSyntax::generic(
            "Dictionary",
            [
                TypeSyntax::predefined(CsTokenKind::StringKeyword),
                TypeSyntax::generic("List", [TypeSyntax::identifier("T")]),
            ],
        );
        assert_eq!(to_text(&ty), "Dictionary<string, List<T>>");
    }

    #[test]
    fn test_open_generic_prints_without_spaces() {
        let ty = TypeSyntax::generic("Dictionary", [TypeSyntax::omitted(), TypeSyntax::omitted()]);
        assert_eq!(to_text(&ty), "Dictionary<,>");
    }

    #[test]
    fn test_array_ranks() {
        let ty = TypeSyntax::array(TypeSyntax::predefined(CsTokenKind::IntKeyword), 3);
        assert_eq!(to_text(&ty), "int[,,]");
        let ty = TypeSyntax::array(TypeSyntax::predefined(CsTokenKind::IntKeyword), 1);
        assert_eq!(to_text(&ty), "int[]");
    }

    #[test]
    fn test_qualified_and_alias() {
        let ty = TypeSyntax::alias_qualified(
            SyntaxToken::fixed(CsTokenKind::GlobalKeyword),
            TypeSyntax::qualified(TypeSyntax::identifier("System"), TypeSyntax::identifier("Int32")),
        );
        assert_eq!(to_text(&ty), "global::System.Int32");
        assert_eq!(
            to_text(&TypeSyntax::nullable(TypeSyntax::identifier("Guid"))),
            "Guid?"
        );
        assert_eq!(to_text(&TypeSyntax::pointer(TypeSyntax::identifier("byte"))), "@byte*");
    }
}
