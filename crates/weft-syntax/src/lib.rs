//! Weft Syntax
//!
//! The host-language (C#) syntax tree produced by lowering, together with
//! everything needed to build and print it:
//!
//! - **Tokens**: [`SyntaxToken`] with literal-text parsing and quoting ([`token`], [`literal_text`])
//! - **Lists**: [`SeparatedList`] keeping items and their separator tokens
//! - **Tree**: declarations, statements, expressions and types ([`syntax`]),
//!   the [`SyntaxNode`] sum over all of them ([`node`])
//! - **Spans**: the [`SourceSpanned`] trait and [`any_source_span`]
//! - **Printing**: deterministic text output with a source map ([`print`])
//! - **Factory**: helpers for generated code ([`factory`])
//!
//! # Example
//!
//! ```
//! use weft_syntax::{factory::{decls, names}, print::{print, PrintOptions}};
//!
//! let class = decls::class("Order", &["public"], Vec::new(), Vec::new());
//! let unit = decls::compilation_unit(vec![decls::using_directive("System")], vec![class]);
//! let emitted = print(&unit, &PrintOptions::default());
//! assert!(emitted.text.contains("public class Order"));
//! # let _ = names::object();
//! ```

pub mod factory;
pub mod list;
pub mod literal_text;
pub mod node;
pub mod print;
pub mod spanned;
pub mod syntax;
pub mod token;

pub use list::{ListError, SeparatedList};
pub use literal_text::LiteralError;
pub use node::{ShapeError, SyntaxNode};
pub use spanned::{SourceSpanned, any_source_span};
pub use token::{SyntaxToken, TokenValue};
