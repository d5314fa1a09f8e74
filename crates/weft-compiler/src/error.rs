//! Diagnostics for the Weft compiler.
//!
//! Every problem a compilation reports, whether it comes from a DSL parser, an
//! analyzer, or the host-language compiler, is a [`Diagnostic`]:
//! - an origin ([`Subkind`]) and a numeric [`ErrorCode`] whose range agrees
//!   with it
//! - a [`Severity`]
//! - an optional [`SourceSpan`](weft_core::SourceSpan) in DSL or host source
//!
//! Diagnostics of one compilation are gathered in a [`DiagnosticList`].
//!
//! # Example
//!
//! ```
//! # use weft_compiler::error::{Diagnostic, DiagnosticList, ErrorCode, Severity, Subkind};
//! let mut list = DiagnosticList::new();
//! list.push(Diagnostic::new(
//!     Subkind::Schema,
//!     Severity::Error,
//!     ErrorCode::new(20105),
//!     "type `Order` is defined twice",
//! ));
//!
//! assert!(list.has_errors());
//! assert_eq!(list.iter().next().unwrap().to_string(), "error[X20105]: type `Order` is defined twice");
//! ```

mod compile_error;
mod diagnostic;
mod error_code;
mod list;
mod severity;
mod subkind;

pub use compile_error::CompileError;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use list::DiagnosticList;
pub use severity::Severity;
pub use subkind::Subkind;
