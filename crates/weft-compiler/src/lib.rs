//! Weft Compiler
//!
//! The language-independent middle of the Weft schema and workflow
//! compilers:
//!
//! - **Lowering**: native-labelled [`Node`](weft_core::Node) trees to host
//!   syntax ([`lower`])
//! - **Diagnostics**: the diagnostic model ([`error`]) and the compilation
//!   context that collects them ([`context`])
//! - **Host diagnostics**: mapping host compiler output back to DSL source
//!   ([`report`])
//! - **Pipeline**: parse and analyze a project with pluggable parsers and
//!   analyzers ([`pipeline`])
//! - **Configuration**: [`config::CompilerConfig`]

pub mod config;
pub mod context;
pub mod error;
pub mod lower;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod lower_tests;

pub use context::{Abort, CompilationContext, MessageCatalog, MessageFormatter, TraceScope};
pub use error::{CompileError, Diagnostic, DiagnosticList, ErrorCode, Severity, Subkind};
pub use lower::{LowerError, to_syntax_node, to_syntax_token};
pub use pipeline::{CompilationInput, CompilationOutput, Dsl, compile, compile_schema, compile_workflow};
pub use report::{HostDiagnostic, HostFile, HostFiles, HostSeverity, report_diagnostics};
