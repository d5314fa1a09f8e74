//! Errors that end a compilation without an output bundle.

use thiserror::Error;

use crate::{context::ContextError, error::Diagnostic};

#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    /// The input has no schema or workflow file. Callers are expected to
    /// check [`CompilationInput::need_compile`](crate::pipeline::CompilationInput::need_compile)
    /// first.
    #[error("nothing to compile: the input has no DSL files")]
    NothingToCompile,

    #[error(transparent)]
    Context(#[from] ContextError),

    /// The compilation reported errors.
    #[error("{}", summarize(.0))]
    Failed(Vec<Diagnostic>),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    let Some(first) = diagnostics.iter().find(|diag| diag.is_error()).or(diagnostics.first()) else {
        return "compilation failed".to_string();
    };
    match diagnostics.len() {
        1 => first.to_string(),
        count => format!("{first} (+{} more)", count - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, Severity, Subkind};

    #[test]
    fn test_failed_display() {
        let diags = vec![
            Diagnostic::new(Subkind::Host, Severity::Warning, ErrorCode::new(168), "unused variable"),
            Diagnostic::new(Subkind::Host, Severity::Error, ErrorCode::new(103), "name does not exist"),
            Diagnostic::new(Subkind::Host, Severity::Error, ErrorCode::new(1002), "; expected"),
        ];
        assert_eq!(
            CompileError::Failed(diags).to_string(),
            "error[CS0103]: name does not exist (+2 more)"
        );
    }

    #[test]
    fn test_failed_display_single() {
        let diags = vec![Diagnostic::internal(Subkind::Schema, "boom")];
        assert_eq!(
            CompileError::Failed(diags).to_string(),
            "error[X20000]: Internal compiler error: boom"
        );
    }
}
