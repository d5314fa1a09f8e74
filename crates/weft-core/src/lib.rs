//! Weft Core Types
//!
//! This crate provides the foundational types shared by every stage of the
//! Weft compiler front end. It includes:
//!
//! - **Spans**: Source locations and line maps ([`span::SourceSpan`], [`span::LineMap`])
//! - **Nodes**: The generic tree produced by the schema and workflow parsers ([`node::Node`])
//! - **Labels**: The closed native-syntax label vocabulary ([`label::SyntaxLabel`])
//! - **Tokens**: The three token vocabularies and identifier escaping ([`token`] module)

pub mod label;
pub mod node;
pub mod span;
pub mod token;

pub use label::{Label, SyntaxLabel};
pub use node::{AtomValue, Node, NodeError, NodeKind};
pub use span::{LineMap, SourcePosition, SourceSpan, SpanError};
pub use token::{CsTokenKind, SchemaTokenKind, TokenError, Vocabulary, WorkflowTokenKind};
