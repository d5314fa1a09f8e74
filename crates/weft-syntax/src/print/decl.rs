use weft_core::CsTokenKind;

use super::{
    Emit, TokenSink, emit_braced, emit_lines, emit_modifiers, emit_separated, emit_spanned, punct,
    spaced,
};
use crate::{
    list::Element,
    syntax::{
        Accessor, AccessorList, Attribute, AttributeArgument, AttributeArgumentList,
        AttributeList, AttributeTargetSpecifier, Block, BaseList, CompilationUnit, Constraint,
        ConstraintClause, ConstructorInitializer, EnumMemberDecl, ExplicitInterfaceSpecifier,
        ExternAlias, MemberDecl, MemberKind, Parameter, ParameterList, ParameterListKind,
        TypeDecl, TypeParameter, TypeParameterList, UsingDirective,
    },
};

/// Emit members separated by blank lines.
fn emit_members(sink: &mut dyn TokenSink, members: &[MemberDecl]) {
    for (index, member) in members.iter().enumerate() {
        if index > 0 {
            sink.newline();
        }
        member.emit(sink);
        sink.newline();
    }
}

/// Emit each attribute list on its own line.
fn emit_attribute_lines(sink: &mut dyn TokenSink, attribute_lists: &[AttributeList]) {
    emit_lines(sink, attribute_lists);
}

/// Emit attribute lists inline, as on parameters.
fn emit_attributes_inline(sink: &mut dyn TokenSink, attribute_lists: &[AttributeList]) {
    for list in attribute_lists {
        list.emit(sink);
        sink.space();
    }
}

fn emit_constraint_clauses(sink: &mut dyn TokenSink, clauses: &[ConstraintClause]) {
    sink.indent();
    for clause in clauses {
        sink.newline();
        clause.emit(sink);
    }
    sink.dedent();
}

/// A method-like body: `;` when absent, otherwise a block on the next line.
fn emit_body(sink: &mut dyn TokenSink, body: Option<&Block>) {
    match body {
        Some(block) => {
            sink.newline();
            block.emit(sink);
        }
        None => punct(sink, CsTokenKind::Semicolon),
    }
}

fn emit_directives(sink: &mut dyn TokenSink, externs: &[ExternAlias], usings: &[UsingDirective]) -> bool {
    emit_lines(sink, externs);
    emit_lines(sink, usings);
    !externs.is_empty() || !usings.is_empty()
}

impl Emit for CompilationUnit {
    fn emit(&self, sink: &mut dyn TokenSink) {
        let mut preamble = emit_directives(sink, &self.externs, &self.usings);
        if !self.attribute_lists.is_empty() {
            if preamble {
                sink.newline();
            }
            emit_attribute_lines(sink, &self.attribute_lists);
            preamble = true;
        }
        if preamble && !self.members.is_empty() {
            sink.newline();
        }
        emit_members(sink, &self.members);
    }
}

impl Emit for ExternAlias {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::ExternKeyword);
        sink.space();
        punct(sink, CsTokenKind::AliasKeyword);
        sink.space();
        sink.token(&self.identifier);
        punct(sink, CsTokenKind::Semicolon);
    }
}

impl Emit for UsingDirective {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::UsingKeyword);
        sink.space();
        if let Some(keyword) = &self.static_keyword {
            sink.token(keyword);
            sink.space();
        }
        if let Some(alias) = &self.alias {
            alias.emit(sink);
        }
        self.name.emit(sink);
        punct(sink, CsTokenKind::Semicolon);
    }
}

impl Emit for AttributeList {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::OpenBracket);
        if let Some(target) = &self.target {
            target.emit(sink);
        }
        emit_separated(sink, &self.attributes);
        punct(sink, CsTokenKind::CloseBracket);
    }
}

impl Emit for AttributeTargetSpecifier {
    fn emit(&self, sink: &mut dyn TokenSink) {
        sink.token(&self.identifier);
        punct(sink, CsTokenKind::Colon);
        sink.space();
    }
}

impl Emit for Attribute {
    fn emit(&self, sink: &mut dyn TokenSink) {
        self.name.emit(sink);
        if let Some(arguments) = &self.arguments {
            arguments.emit(sink);
        }
    }
}

impl Emit for AttributeArgumentList {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::OpenParen);
        emit_separated(sink, &self.arguments);
        punct(sink, CsTokenKind::CloseParen);
    }
}

impl Emit for AttributeArgument {
    fn emit(&self, sink: &mut dyn TokenSink) {
        if let Some(name_equals) = &self.name_equals {
            name_equals.emit(sink);
        }
        if let Some(name_colon) = &self.name_colon {
            name_colon.emit(sink);
        }
        self.expression.emit(sink);
    }
}

fn emit_type_decl(sink: &mut dyn TokenSink, keyword: CsTokenKind, decl: &TypeDecl) {
    emit_attribute_lines(sink, &decl.attribute_lists);
    emit_modifiers(sink, &decl.modifiers);
    punct(sink, keyword);
    sink.space();
    sink.token(&decl.identifier);
    if let Some(type_parameters) = &decl.type_parameters {
        type_parameters.emit(sink);
    }
    if let Some(base_list) = &decl.base_list {
        base_list.emit(sink);
    }
    emit_constraint_clauses(sink, &decl.constraint_clauses);
    sink.newline();
    emit_braced(sink, |sink| emit_members(sink, &decl.members));
}

fn emit_explicit_interface(sink: &mut dyn TokenSink, specifier: Option<&ExplicitInterfaceSpecifier>) {
    if let Some(specifier) = specifier {
        specifier.emit(sink);
    }
}

impl Emit for MemberDecl {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_spanned(sink, self.span.as_ref(), |sink| match &self.kind {
            MemberKind::Namespace(decl) => {
                punct(sink, CsTokenKind::NamespaceKeyword);
                sink.space();
                decl.name.emit(sink);
                sink.newline();
                emit_braced(sink, |sink| {
                    if emit_directives(sink, &decl.externs, &decl.usings) && !decl.members.is_empty() {
                        sink.newline();
                    }
                    emit_members(sink, &decl.members);
                });
            }
            MemberKind::Class(decl) => emit_type_decl(sink, CsTokenKind::ClassKeyword, decl),
            MemberKind::Struct(decl) => emit_type_decl(sink, CsTokenKind::StructKeyword, decl),
            MemberKind::Interface(decl) => {
                emit_type_decl(sink, CsTokenKind::InterfaceKeyword, decl);
            }
            MemberKind::Enum(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                punct(sink, CsTokenKind::EnumKeyword);
                sink.space();
                sink.token(&decl.identifier);
                if let Some(base_list) = &decl.base_list {
                    base_list.emit(sink);
                }
                sink.newline();
                emit_braced(sink, |sink| {
                    for element in decl.members.elements() {
                        match element {
                            Element::Item(member) => member.emit(sink),
                            Element::Separator(separator) => {
                                sink.token(&separator);
                                sink.newline();
                            }
                        }
                    }
                    if !decl.members.is_empty() && !decl.members.has_trailing_separator() {
                        sink.newline();
                    }
                });
            }
            MemberKind::Delegate(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                punct(sink, CsTokenKind::DelegateKeyword);
                sink.space();
                decl.return_type.emit(sink);
                sink.space();
                sink.token(&decl.identifier);
                if let Some(type_parameters) = &decl.type_parameters {
                    type_parameters.emit(sink);
                }
                decl.parameters.emit(sink);
                emit_constraint_clauses(sink, &decl.constraint_clauses);
                punct(sink, CsTokenKind::Semicolon);
            }
            MemberKind::Field(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                decl.declaration.emit(sink);
                punct(sink, CsTokenKind::Semicolon);
            }
            MemberKind::EventField(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                punct(sink, CsTokenKind::EventKeyword);
                sink.space();
                decl.declaration.emit(sink);
                punct(sink, CsTokenKind::Semicolon);
            }
            MemberKind::Method(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                decl.return_type.emit(sink);
                sink.space();
                emit_explicit_interface(sink, decl.explicit_interface.as_ref());
                sink.token(&decl.identifier);
                if let Some(type_parameters) = &decl.type_parameters {
                    type_parameters.emit(sink);
                }
                decl.parameters.emit(sink);
                emit_constraint_clauses(sink, &decl.constraint_clauses);
                emit_body(sink, decl.body.as_ref());
            }
            MemberKind::Operator(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                decl.return_type.emit(sink);
                sink.space();
                punct(sink, CsTokenKind::OperatorKeyword);
                sink.space();
                sink.token(&decl.operator);
                decl.parameters.emit(sink);
                emit_body(sink, decl.body.as_ref());
            }
            MemberKind::ConversionOperator(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                sink.token(&decl.implicit_or_explicit);
                sink.space();
                punct(sink, CsTokenKind::OperatorKeyword);
                sink.space();
                decl.ty.emit(sink);
                decl.parameters.emit(sink);
                emit_body(sink, decl.body.as_ref());
            }
            MemberKind::Constructor(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                sink.token(&decl.identifier);
                decl.parameters.emit(sink);
                if let Some(initializer) = &decl.initializer {
                    initializer.emit(sink);
                }
                emit_body(sink, decl.body.as_ref());
            }
            MemberKind::Destructor(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                punct(sink, CsTokenKind::Tilde);
                sink.token(&decl.identifier);
                punct(sink, CsTokenKind::OpenParen);
                punct(sink, CsTokenKind::CloseParen);
                emit_body(sink, decl.body.as_ref());
            }
            MemberKind::Property(decl) | MemberKind::Event(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                if matches!(self.kind, MemberKind::Event(_)) {
                    punct(sink, CsTokenKind::EventKeyword);
                    sink.space();
                }
                decl.ty.emit(sink);
                sink.space();
                emit_explicit_interface(sink, decl.explicit_interface.as_ref());
                sink.token(&decl.identifier);
                decl.accessors.emit(sink);
            }
            MemberKind::Indexer(decl) => {
                emit_attribute_lines(sink, &decl.attribute_lists);
                emit_modifiers(sink, &decl.modifiers);
                decl.ty.emit(sink);
                sink.space();
                emit_explicit_interface(sink, decl.explicit_interface.as_ref());
                punct(sink, CsTokenKind::ThisKeyword);
                decl.parameters.emit(sink);
                decl.accessors.emit(sink);
            }
        });
    }
}

impl Emit for EnumMemberDecl {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_attributes_inline(sink, &self.attribute_lists);
        sink.token(&self.identifier);
        if let Some(equals_value) = &self.equals_value {
            equals_value.emit(sink);
        }
    }
}

impl Emit for TypeParameterList {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::LessThan);
        emit_separated(sink, &self.parameters);
        punct(sink, CsTokenKind::GreaterThan);
    }
}

impl Emit for TypeParameter {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_attributes_inline(sink, &self.attribute_lists);
        if let Some(variance) = &self.variance {
            sink.token(variance);
            sink.space();
        }
        sink.token(&self.identifier);
    }
}

impl Emit for BaseList {
    fn emit(&self, sink: &mut dyn TokenSink) {
        spaced(sink, CsTokenKind::Colon);
        emit_separated(sink, &self.types);
    }
}

impl Emit for ConstraintClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::WhereKeyword);
        sink.space();
        self.name.emit(sink);
        spaced(sink, CsTokenKind::Colon);
        emit_separated(sink, &self.constraints);
    }
}

impl Emit for Constraint {
    fn emit(&self, sink: &mut dyn TokenSink) {
        match self {
            Constraint::Constructor => {
                punct(sink, CsTokenKind::NewKeyword);
                punct(sink, CsTokenKind::OpenParen);
                punct(sink, CsTokenKind::CloseParen);
            }
            Constraint::ClassOrStruct(keyword) => sink.token(keyword),
            Constraint::Type(ty) => ty.emit(sink),
        }
    }
}

impl Emit for ExplicitInterfaceSpecifier {
    fn emit(&self, sink: &mut dyn TokenSink) {
        self.name.emit(sink);
        punct(sink, CsTokenKind::Dot);
    }
}

impl Emit for ConstructorInitializer {
    fn emit(&self, sink: &mut dyn TokenSink) {
        spaced(sink, CsTokenKind::Colon);
        sink.token(&self.this_or_base);
        self.arguments.emit(sink);
    }
}

impl AccessorList {
    /// Whether the list fits on one line: `{ get; set; }`.
    fn is_inline(&self) -> bool {
        self.accessors
            .iter()
            .all(|accessor| accessor.body.is_none() && accessor.attribute_lists.is_empty())
    }
}

impl Emit for AccessorList {
    fn emit(&self, sink: &mut dyn TokenSink) {
        if self.is_inline() {
            sink.space();
            punct(sink, CsTokenKind::OpenBrace);
            for accessor in &self.accessors {
                sink.space();
                accessor.emit(sink);
            }
            sink.space();
            punct(sink, CsTokenKind::CloseBrace);
        } else {
            sink.newline();
            emit_braced(sink, |sink| emit_lines(sink, &self.accessors));
        }
    }
}

impl Emit for Accessor {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_attribute_lines(sink, &self.attribute_lists);
        emit_modifiers(sink, &self.modifiers);
        sink.token(&self.keyword);
        emit_body(sink, self.body.as_ref());
    }
}

impl Emit for ParameterList {
    fn emit(&self, sink: &mut dyn TokenSink) {
        let (open, close) = match self.kind {
            ParameterListKind::Parenthesized => (CsTokenKind::OpenParen, CsTokenKind::CloseParen),
            ParameterListKind::Bracketed => (CsTokenKind::OpenBracket, CsTokenKind::CloseBracket),
        };
        punct(sink, open);
        emit_separated(sink, &self.parameters);
        punct(sink, close);
    }
}

impl Emit for Parameter {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_attributes_inline(sink, &self.attribute_lists);
        emit_modifiers(sink, &self.modifiers);
        if let Some(ty) = &self.ty {
            ty.emit(sink);
            sink.space();
        }
        sink.token(&self.identifier);
        if let Some(default) = &self.default {
            default.emit(sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        list::SeparatedList,
        print::to_text,
        syntax::{
            EnumDecl, EqualsValueClause, Expr, MethodDecl, NamespaceDecl, PropertyDecl,
            TypeSyntax,
        },
        token::SyntaxToken,
    };

    fn class(name: &str, members: Vec<MemberDecl>) -> MemberDecl {
        MemberDecl::new(MemberKind::Class(TypeDecl {
            attribute_lists: Vec::new(),
            modifiers: vec![SyntaxToken::fixed(CsTokenKind::PublicKeyword)],
            identifier: SyntaxToken::identifier(name),
            type_parameters: None,
            base_list: None,
            constraint_clauses: Vec::new(),
            members,
        }))
    }

    fn auto_property(name: &str) -> MemberDecl {
        MemberDecl::new(MemberKind::Property(PropertyDecl {
            attribute_lists: Vec::new(),
            modifiers: vec![SyntaxToken::fixed(CsTokenKind::PublicKeyword)],
            ty: TypeSyntax::predefined(CsTokenKind::IntKeyword),
            explicit_interface: None,
            identifier: SyntaxToken::identifier(name),
            accessors: AccessorList {
                accessors: [CsTokenKind::GetKeyword, CsTokenKind::SetKeyword]
                    .into_iter()
                    .map(|keyword| Accessor {
                        attribute_lists: Vec::new(),
                        modifiers: Vec::new(),
                        keyword: SyntaxToken::fixed(keyword),
                        body: None,
                    })
                    .collect(),
            },
        }))
    }

    #[test]
    fn test_compilation_unit_layout() {
        let unit = CompilationUnit {
            usings: vec![UsingDirective {
                static_keyword: None,
                alias: None,
                name: TypeSyntax::identifier("System"),
            }],
            members: vec![MemberDecl::new(MemberKind::Namespace(NamespaceDecl {
                name: TypeSyntax::qualified(
                    TypeSyntax::identifier("Shop"),
                    TypeSyntax::identifier("Model"),
                ),
                externs: Vec::new(),
                usings: Vec::new(),
                members: vec![class("Order", vec![auto_property("Id"), auto_property("Count")])],
            }))],
            ..Default::default()
        };
        let expected = "\
using System;

namespace Shop.Model
{
    public class Order
    {
        public int Id { get; set; }

        public int Count { get; set; }
    }
}
";
        assert_eq!(to_text(&unit), expected);
    }

    #[test]
    fn test_method_with_and_without_body() {
        let method = |body: Option<Block>| {
            MemberDecl::new(MemberKind::Method(MethodDecl {
                attribute_lists: Vec::new(),
                modifiers: Vec::new(),
                return_type: TypeSyntax::predefined(CsTokenKind::VoidKeyword),
                explicit_interface: None,
                identifier: SyntaxToken::identifier("Run"),
                type_parameters: None,
                parameters: ParameterList::parenthesized([Parameter {
                    attribute_lists: Vec::new(),
                    modifiers: Vec::new(),
                    ty: Some(TypeSyntax::predefined(CsTokenKind::IntKeyword)),
                    identifier: SyntaxToken::identifier("count"),
                    default: Some(EqualsValueClause {
                        value: Expr::identifier("Max"),
                    }),
                }]),
                constraint_clauses: Vec::new(),
                body,
            }))
        };
        assert_eq!(to_text(&method(None)), "void Run(int count = Max);");
        assert_eq!(
            to_text(&method(Some(Block::default()))),
            "void Run(int count = Max)\n{\n}"
        );
    }

    #[test]
    fn test_enum_members_on_lines() {
        let member = |name: &str| EnumMemberDecl {
            attribute_lists: Vec::new(),
            identifier: SyntaxToken::identifier(name),
            equals_value: None,
        };
        let decl = MemberDecl::new(MemberKind::Enum(EnumDecl {
            attribute_lists: Vec::new(),
            modifiers: Vec::new(),
            identifier: SyntaxToken::identifier("Color"),
            base_list: None,
            members: SeparatedList::from_items([member("Red"), member("Green")]),
        }));
        assert_eq!(to_text(&decl), "enum Color\n{\n    Red,\n    Green\n}");
    }

    #[test]
    fn test_generic_class_with_constraints() {
        let decl = MemberDecl::new(MemberKind::Class(TypeDecl {
            attribute_lists: Vec::new(),
            modifiers: Vec::new(),
            identifier: SyntaxToken::identifier("Repo"),
            type_parameters: Some(TypeParameterList {
                parameters: SeparatedList::from_items([TypeParameter {
                    attribute_lists: Vec::new(),
                    variance: None,
                    identifier: SyntaxToken::identifier("T"),
                }]),
            }),
            base_list: Some(BaseList {
                types: SeparatedList::from_items([TypeSyntax::identifier("IRepo")]),
            }),
            constraint_clauses: vec![ConstraintClause {
                name: TypeSyntax::identifier("T"),
                constraints: SeparatedList::from_items([
                    Constraint::ClassOrStruct(SyntaxToken::fixed(CsTokenKind::ClassKeyword)),
                    Constraint::Constructor,
                ]),
            }],
            members: Vec::new(),
        }));
        assert_eq!(
            to_text(&decl),
            "class Repo<T> : IRepo\n    where T : class, new()\n{\n}"
        );
    }
}
