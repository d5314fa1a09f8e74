//! Printing syntax trees as host-language text.
//!
//! Every syntax type implements [`Emit`], which walks the tree in source
//! order and feeds tokens and layout hints into a [`TokenSink`]. The
//! [`TextSink`] renders them with configurable indentation and records a
//! [`SourceMap`] from output ranges back to DSL spans, so diagnostics the host
//! compiler reports against generated text can be traced to their origin.
//!
//! Output is deterministic: printing the same tree twice yields the same text.

mod decl;
mod expr;
mod stmt;
mod types;

use std::ops::Range;

use log::trace;
use weft_core::{CsTokenKind, SourceSpan};

use crate::{
    list::{Element, SeparatedList},
    node::SyntaxNode,
    token::SyntaxToken,
};

/// Receives the tokens and layout of a syntax tree in source order.
pub trait TokenSink {
    fn token(&mut self, token: &SyntaxToken);

    /// A spanned node starts. Nodes nest; each call is matched by
    /// [`TokenSink::end_node`].
    fn begin_node(&mut self, _span: Option<&SourceSpan>) {}

    fn end_node(&mut self) {}

    /// Request a space before the next token.
    fn space(&mut self) {}

    fn newline(&mut self) {}

    fn indent(&mut self) {}

    fn dedent(&mut self) {}
}

/// A syntax type that can be written to a [`TokenSink`].
pub trait Emit {
    fn emit(&self, sink: &mut dyn TokenSink);

    /// Whether the node prints no tokens, like an omitted array size.
    fn is_empty_output(&self) -> bool {
        false
    }
}

impl Emit for SyntaxToken {
    fn emit(&self, sink: &mut dyn TokenSink) {
        sink.token(self);
    }
}

impl<T: Emit> Emit for Box<T> {
    fn emit(&self, sink: &mut dyn TokenSink) {
        (**self).emit(sink);
    }

    fn is_empty_output(&self) -> bool {
        (**self).is_empty_output()
    }
}

/// Printer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub indent_width: usize,
    pub newline: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            newline: "\n".to_string(),
        }
    }
}

/// The output range of one token or node and the DSL span it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRange {
    /// Character range in the printed text.
    pub range: Range<usize>,
    /// The node's or token's own span.
    pub span: Option<SourceSpan>,
    /// The own span, or else the first span found on a descendant.
    pub any_span: Option<SourceSpan>,
    /// Nesting depth; tokens sit one level below their node.
    pub depth: usize,
}

/// Output ranges of the printed tokens and nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMap {
    tokens: Vec<MappedRange>,
    nodes: Vec<MappedRange>,
}

impl SourceMap {
    /// Spanned tokens, in output order.
    pub fn tokens(&self) -> &[MappedRange] {
        &self.tokens
    }

    /// Printed nodes, in the order they were closed.
    pub fn nodes(&self) -> &[MappedRange] {
        &self.nodes
    }

    /// Spanned tokens whose output intersects `range`.
    ///
    /// An empty `range` intersects the token it points into.
    pub fn tokens_intersecting(&self, range: &Range<usize>) -> impl Iterator<Item = &MappedRange> {
        let range = range.clone();
        self.tokens
            .iter()
            .filter(move |mapped| intersects(&mapped.range, &range))
    }

    /// Nodes whose output contains `range`, innermost first.
    pub fn enclosing_nodes(&self, range: &Range<usize>) -> Vec<&MappedRange> {
        let mut enclosing: Vec<&MappedRange> = self
            .nodes
            .iter()
            .filter(|mapped| mapped.range.start <= range.start && range.end <= mapped.range.end)
            .collect();
        enclosing.sort_by(|a, b| b.depth.cmp(&a.depth));
        enclosing
    }
}

fn intersects(a: &Range<usize>, b: &Range<usize>) -> bool {
    if b.is_empty() {
        a.start <= b.start && b.start < a.end
    } else {
        a.start < b.end && b.start < a.end
    }
}

/// Printed text and its source map.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedText {
    pub text: String,
    pub source_map: SourceMap,
}

#[derive(Debug)]
struct OpenNode {
    start: Option<usize>,
    end: usize,
    span: Option<SourceSpan>,
    first_span: Option<SourceSpan>,
}

/// Renders tokens as indented text.
#[derive(Debug)]
pub struct TextSink {
    options: PrintOptions,
    text: String,
    /// Length of `text` in characters.
    chars: usize,
    indent: usize,
    at_line_start: bool,
    pending_space: bool,
    last_char: Option<char>,
    open: Vec<OpenNode>,
    source_map: SourceMap,
}

impl TextSink {
    pub fn new(options: PrintOptions) -> Self {
        Self {
            options,
            text: String::new(),
            chars: 0,
            indent: 0,
            at_line_start: true,
            pending_space: false,
            last_char: None,
            open: Vec::new(),
            source_map: SourceMap::default(),
        }
    }

    pub fn finish(mut self) -> EmittedText {
        while !self.open.is_empty() {
            self.end_node();
        }
        EmittedText {
            text: self.text,
            source_map: self.source_map,
        }
    }

    fn write(&mut self, text: &str) {
        self.chars += text.chars().count();
        self.text.push_str(text);
        if let Some(last) = text.chars().last() {
            self.last_char = Some(last);
        }
    }

    /// Whether two adjacent tokens would lex differently without a space.
    fn needs_space(&self, next: &str) -> bool {
        let (Some(prev), Some(next)) = (self.last_char, next.chars().next()) else {
            return false;
        };
        let word = |c: char| c.is_alphanumeric() || c == '_' || c == '@';
        (word(prev) && word(next))
            || (prev == next && "+-&|=".contains(prev))
            || (prev == '/' && (next == '/' || next == '*'))
    }

    fn note_span(&mut self, span: &SourceSpan) {
        for node in self.open.iter_mut().rev() {
            if node.first_span.is_some() {
                break;
            }
            node.first_span = Some(span.clone());
        }
    }
}

impl Default for TextSink {
    fn default() -> Self {
        Self::new(PrintOptions::default())
    }
}

impl TokenSink for TextSink {
    fn token(&mut self, token: &SyntaxToken) {
        let text = token.text();
        if self.at_line_start {
            let indent = " ".repeat(self.indent * self.options.indent_width);
            self.write(&indent);
            self.at_line_start = false;
        } else if self.pending_space || self.needs_space(text) {
            self.write(" ");
        }
        self.pending_space = false;

        let start = self.chars;
        self.write(text);
        let end = self.chars;

        for node in &mut self.open {
            node.start.get_or_insert(start);
            node.end = end;
        }

        if let Some(span) = token.span_ref() {
            self.source_map.tokens.push(MappedRange {
                range: start..end,
                span: Some(span.clone()),
                any_span: Some(span.clone()),
                depth: self.open.len() + 1,
            });
            self.note_span(span);
        }
    }

    fn begin_node(&mut self, span: Option<&SourceSpan>) {
        if let Some(span) = span {
            self.note_span(span);
        }
        self.open.push(OpenNode {
            start: None,
            end: self.chars,
            span: span.cloned(),
            first_span: span.cloned(),
        });
    }

    fn end_node(&mut self) {
        let Some(node) = self.open.pop() else {
            return;
        };
        let Some(start) = node.start else {
            return;
        };
        self.source_map.nodes.push(MappedRange {
            range: start..node.end,
            span: node.span,
            any_span: node.first_span,
            depth: self.open.len() + 1,
        });
    }

    fn space(&mut self) {
        if !self.at_line_start {
            self.pending_space = true;
        }
    }

    fn newline(&mut self) {
        let newline = self.options.newline.clone();
        self.write(&newline);
        self.at_line_start = true;
        self.pending_space = false;
        self.last_char = None;
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }
}

/// Print `node` as text.
pub fn print<T: Emit + ?Sized>(node: &T, options: &PrintOptions) -> EmittedText {
    let mut sink = TextSink::new(options.clone());
    node.emit(&mut sink);
    let emitted = sink.finish();
    trace!(
        chars = emitted.text.len(),
        mapped_tokens = emitted.source_map.tokens.len();
        "Printed syntax tree"
    );
    emitted
}

/// Print `node` with default options and return only the text.
pub fn to_text<T: Emit + ?Sized>(node: &T) -> String {
    print(node, &PrintOptions::default()).text
}

pub(crate) fn punct(sink: &mut dyn TokenSink, kind: CsTokenKind) {
    sink.token(&SyntaxToken::fixed(kind));
}

/// Emit `kind` surrounded by spaces.
pub(crate) fn spaced(sink: &mut dyn TokenSink, kind: CsTokenKind) {
    sink.space();
    punct(sink, kind);
    sink.space();
}

pub(crate) fn spaced_token(sink: &mut dyn TokenSink, token: &SyntaxToken) {
    sink.space();
    sink.token(token);
    sink.space();
}

/// Emit a separated list, with a space after each separator.
pub(crate) fn emit_separated<T: Emit>(sink: &mut dyn TokenSink, list: &SeparatedList<T>) {
    let mut elements = list.elements().peekable();
    while let Some(element) = elements.next() {
        match element {
            Element::Item(item) => item.emit(sink),
            Element::Separator(token) => {
                sink.token(&token);
                let next_is_empty = matches!(
                    elements.peek(),
                    Some(Element::Item(item)) if item.is_empty_output()
                );
                if !next_is_empty {
                    sink.space();
                }
            }
        }
    }
}

/// Emit tokens such as modifiers, each followed by a space.
pub(crate) fn emit_modifiers(sink: &mut dyn TokenSink, modifiers: &[SyntaxToken]) {
    for modifier in modifiers {
        sink.token(modifier);
        sink.space();
    }
}

/// Emit each item on its own line.
pub(crate) fn emit_lines<T: Emit>(sink: &mut dyn TokenSink, items: &[T]) {
    for item in items {
        item.emit(sink);
        sink.newline();
    }
}

/// Emit `{`, the indented `body`, and `}` on their own lines.
pub(crate) fn emit_braced(sink: &mut dyn TokenSink, body: impl FnOnce(&mut dyn TokenSink)) {
    punct(sink, CsTokenKind::OpenBrace);
    sink.newline();
    sink.indent();
    body(sink);
    sink.dedent();
    punct(sink, CsTokenKind::CloseBrace);
}

/// Emit `node` wrapped in a spanned node boundary.
pub(crate) fn emit_spanned(
    sink: &mut dyn TokenSink,
    span: Option<&SourceSpan>,
    body: impl FnOnce(&mut dyn TokenSink),
) {
    sink.begin_node(span);
    body(sink);
    sink.end_node();
}

impl Emit for SyntaxNode {
    fn emit(&self, sink: &mut dyn TokenSink) {
        match self {
            SyntaxNode::CompilationUnit(node) => node.emit(sink),
            SyntaxNode::ExternAlias(node) => node.emit(sink),
            SyntaxNode::UsingDirective(node) => node.emit(sink),
            SyntaxNode::NameEquals(node) => node.emit(sink),
            SyntaxNode::NameColon(node) => node.emit(sink),
            SyntaxNode::AttributeList(node) => node.emit(sink),
            SyntaxNode::AttributeTargetSpecifier(node) => node.emit(sink),
            SyntaxNode::Attribute(node) => node.emit(sink),
            SyntaxNode::AttributeArgumentList(node) => node.emit(sink),
            SyntaxNode::AttributeArgument(node) => node.emit(sink),
            SyntaxNode::Member(node) => node.emit(sink),
            SyntaxNode::EnumMember(node) => node.emit(sink),
            SyntaxNode::TypeParameterList(node) => node.emit(sink),
            SyntaxNode::TypeParameter(node) => node.emit(sink),
            SyntaxNode::BaseList(node) => node.emit(sink),
            SyntaxNode::ConstraintClause(node) => node.emit(sink),
            SyntaxNode::Constraint(node) => node.emit(sink),
            SyntaxNode::ExplicitInterfaceSpecifier(node) => node.emit(sink),
            SyntaxNode::ConstructorInitializer(node) => node.emit(sink),
            SyntaxNode::AccessorList(node) => node.emit(sink),
            SyntaxNode::Accessor(node) => node.emit(sink),
            SyntaxNode::ParameterList(node) => node.emit(sink),
            SyntaxNode::Parameter(node) => node.emit(sink),
            SyntaxNode::EqualsValueClause(node) => node.emit(sink),
            SyntaxNode::VariableDeclaration(node) => node.emit(sink),
            SyntaxNode::VariableDeclarator(node) => node.emit(sink),
            SyntaxNode::ElseClause(node) => node.emit(sink),
            SyntaxNode::SwitchSection(node) => node.emit(sink),
            SyntaxNode::SwitchLabel(node) => node.emit(sink),
            SyntaxNode::CatchClause(node) => node.emit(sink),
            SyntaxNode::CatchDeclaration(node) => node.emit(sink),
            SyntaxNode::CatchFilterClause(node) => node.emit(sink),
            SyntaxNode::FinallyClause(node) => node.emit(sink),
            SyntaxNode::ArgumentList(node) => node.emit(sink),
            SyntaxNode::Argument(node) => node.emit(sink),
            SyntaxNode::Initializer(node) => node.emit(sink),
            SyntaxNode::AnonymousMember(node) => node.emit(sink),
            SyntaxNode::QueryBody(node) => node.emit(sink),
            SyntaxNode::JoinIntoClause(node) => node.emit(sink),
            SyntaxNode::Ordering(node) => node.emit(sink),
            SyntaxNode::SelectOrGroup(node) => node.emit(sink),
            SyntaxNode::QueryContinuation(node) => node.emit(sink),
            SyntaxNode::TypeArgumentList(node) => node.emit(sink),
            SyntaxNode::ArrayRankSpecifier(node) => node.emit(sink),
            SyntaxNode::Block(node) => node.emit(sink),
            SyntaxNode::Stmt(node) => node.emit(sink),
            SyntaxNode::Expr(node) => node.emit(sink),
            SyntaxNode::Type(node) => node.emit(sink),
            SyntaxNode::FromClause(node) => node.emit(sink),
            SyntaxNode::QueryClause(node) => node.emit(sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use weft_core::LineMap;

    use super::*;
    use crate::syntax::{Expr, ExprKind, TypeSyntax};

    fn span(range: Range<usize>) -> SourceSpan {
        LineMap::new(&"y".repeat(50)).span("w.wf", range).unwrap()
    }

    #[test]
    fn test_words_are_separated() {
        let mut sink = TextSink::default();
        sink.token(&SyntaxToken::fixed(CsTokenKind::PublicKeyword));
        sink.token(&SyntaxToken::fixed(CsTokenKind::StaticKeyword));
        sink.token(&SyntaxToken::identifier("Main"));
        sink.token(&SyntaxToken::fixed(CsTokenKind::OpenParen));
        sink.token(&SyntaxToken::fixed(CsTokenKind::CloseParen));
        assert_eq!(sink.finish().text, "public static Main()");
    }

    #[test]
    fn test_operators_do_not_fuse() {
        let mut sink = TextSink::default();
        sink.token(&SyntaxToken::fixed(CsTokenKind::Minus));
        sink.token(&SyntaxToken::fixed(CsTokenKind::Minus));
        sink.token(&SyntaxToken::identifier("x"));
        assert_eq!(sink.finish().text, "- -x");
    }

    #[test]
    fn test_indentation_and_newline_options() {
        let mut sink = TextSink::new(PrintOptions {
            indent_width: 2,
            newline: "\r\n".to_string(),
        });
        emit_braced(&mut sink, |sink| {
            sink.token(&SyntaxToken::identifier("a"));
            sink.newline();
        });
        assert_eq!(sink.finish().text, "{\r\n  a\r\n}");
    }

    #[test]
    fn test_source_map_records_tokens_and_nodes() {
        let mut token = SyntaxToken::identifier("value");
        *token.span_mut() = Some(span(3..8));
        let mut sink = TextSink::default();
        sink.token(&SyntaxToken::fixed(CsTokenKind::ReturnKeyword));
        sink.begin_node(None);
        sink.token(&token);
        sink.end_node();

        let emitted = sink.finish();
        assert_eq!(emitted.text, "return value");
        let tokens = emitted.source_map.tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].range, 7..12);

        let nodes = emitted.source_map.nodes();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].span.is_none());
        assert_eq!(nodes[0].any_span, Some(span(3..8)));
    }

    #[test]
    fn test_enclosing_nodes_innermost_first() {
        let mut outer = Expr::new(ExprKind::Parenthesized(Box::new(Expr::identifier("x"))));
        outer.span = Some(span(0..5));
        let emitted = print(&outer, &PrintOptions::default());
        assert_eq!(emitted.text, "(x)");

        let enclosing = emitted.source_map.enclosing_nodes(&(1..2));
        assert_eq!(enclosing.len(), 3);
        assert!(enclosing[0].depth > enclosing[enclosing.len() - 1].depth);
        assert_eq!(enclosing.last().and_then(|n| n.span.clone()), Some(span(0..5)));
    }

    #[test]
    fn test_print_is_deterministic() {
        let ty = TypeSyntax::generic("List", [TypeSyntax::identifier("T")]);
        assert_eq!(to_text(&ty), to_text(&ty));
        assert_eq!(to_text(&ty), "List<T>");
    }
}
