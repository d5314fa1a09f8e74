//! Source spans on syntax.
//!
//! Tokens and the spanned syntax categories carry an optional
//! [`SourceSpan`] naming the DSL text they were lowered from.

use weft_core::SourceSpan;

use crate::{
    node::SyntaxNode,
    print::{Emit, TokenSink},
    syntax::{Block, Expr, MemberDecl, Stmt, TypeSyntax},
    token::SyntaxToken,
};

/// A syntax element that can record where it came from.
pub trait SourceSpanned {
    fn source_span(&self) -> Option<&SourceSpan>;

    fn set_source_span(&mut self, span: Option<SourceSpan>);

    fn with_source_span(mut self, span: Option<SourceSpan>) -> Self
    where
        Self: Sized,
    {
        self.set_source_span(span);
        self
    }
}

impl SourceSpanned for SyntaxToken {
    fn source_span(&self) -> Option<&SourceSpan> {
        self.span_ref()
    }

    fn set_source_span(&mut self, span: Option<SourceSpan>) {
        *self.span_mut() = span;
    }
}

macro_rules! spanned_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SourceSpanned for $ty {
                fn source_span(&self) -> Option<&SourceSpan> {
                    self.span.as_ref()
                }

                fn set_source_span(&mut self, span: Option<SourceSpan>) {
                    self.span = span;
                }
            }
        )*
    };
}

spanned_field!(Expr, Stmt, TypeSyntax, MemberDecl, Block);

/// Only the spanned categories hold a span; setting one on any other shape
/// has no effect.
impl SourceSpanned for SyntaxNode {
    fn source_span(&self) -> Option<&SourceSpan> {
        match self {
            SyntaxNode::Block(block) => block.source_span(),
            SyntaxNode::Stmt(stmt) => stmt.source_span(),
            SyntaxNode::Expr(expr) => expr.source_span(),
            SyntaxNode::Type(ty) => ty.source_span(),
            SyntaxNode::Member(member) => member.source_span(),
            _ => None,
        }
    }

    fn set_source_span(&mut self, span: Option<SourceSpan>) {
        match self {
            SyntaxNode::Block(block) => block.set_source_span(span),
            SyntaxNode::Stmt(stmt) => stmt.set_source_span(span),
            SyntaxNode::Expr(expr) => expr.set_source_span(span),
            SyntaxNode::Type(ty) => ty.set_source_span(span),
            SyntaxNode::Member(member) => member.set_source_span(span),
            _ => {}
        }
    }
}

/// Stops at the first span seen in pre-order.
#[derive(Default)]
struct SpanProbe {
    found: Option<SourceSpan>,
}

impl TokenSink for SpanProbe {
    fn token(&mut self, token: &SyntaxToken) {
        if self.found.is_none() {
            self.found = token.source_span().cloned();
        }
    }

    fn begin_node(&mut self, span: Option<&SourceSpan>) {
        if self.found.is_none() {
            self.found = span.cloned();
        }
    }
}

/// The span of `node`, or else the first span on any of its descendants in
/// pre-order.
pub fn any_source_span<T: Emit + ?Sized>(node: &T) -> Option<SourceSpan> {
    let mut probe = SpanProbe::default();
    node.emit(&mut probe);
    probe.found
}
