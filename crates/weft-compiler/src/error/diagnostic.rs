//! The diagnostic type.

use std::fmt;

use weft_core::SourceSpan;

use crate::error::{ErrorCode, Severity, Subkind};

/// A single error, warning or informational message.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    subkind: Subkind,
    severity: Severity,
    span: Option<SourceSpan>,
    code: ErrorCode,
    message: String,
}

impl Diagnostic {
    /// Create a diagnostic without a location.
    pub fn new(
        subkind: Subkind,
        severity: Severity,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            subkind,
            severity,
            span: None,
            code,
            message: message.into(),
        }
    }

    /// Set the location.
    pub fn with_span(mut self, span: Option<SourceSpan>) -> Self {
        self.span = span;
        self
    }

    /// An internal compiler error for a compilation of `subkind`.
    pub fn internal(subkind: Subkind, message: impl fmt::Display) -> Self {
        Self::new(
            subkind,
            Severity::Error,
            subkind.internal_error_code(),
            format!("Internal compiler error: {message}"),
        )
    }

    pub fn subkind(&self) -> Subkind {
        self.subkind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn span(&self) -> Option<&SourceSpan> {
        self.span.as_ref()
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The printed code, such as `X20001`.
    pub fn code_string(&self) -> String {
        self.code.code_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// The location as `file(line,character)`, if the diagnostic has one.
    pub fn location(&self) -> Option<String> {
        self.span.as_ref().map(|span| {
            let start = span.start_position();
            format!("{}({},{})", span.file_path(), start.line(), start.character())
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location() {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use weft_core::LineMap;

    use super::*;

    #[test]
    fn test_display_without_location() {
        let diag = Diagnostic::new(
            Subkind::Workflow,
            Severity::Warning,
            ErrorCode::new(30012),
            "activity `Ship` is never reached",
        );
        assert_eq!(
            diag.to_string(),
            "warning[W30012]: activity `Ship` is never reached"
        );
        assert_eq!(diag.location(), None);
    }

    #[test]
    fn test_location_uses_start_position() {
        let map = LineMap::new("type A\ntype B\n");
        let span = map.span("model.xs", 12..13).unwrap();
        let diag = Diagnostic::new(Subkind::Schema, Severity::Error, ErrorCode::new(20100), "bad")
            .with_span(Some(span));

        assert_eq!(diag.location().as_deref(), Some("model.xs(2,6)"));
        assert_eq!(diag.to_string(), "model.xs(2,6): error[X20100]: bad");
    }

    #[test]
    fn test_internal_error() {
        let diag = Diagnostic::internal(Subkind::Workflow, "index out of bounds");
        assert!(diag.is_error());
        assert_eq!(diag.code(), ErrorCode::WORKFLOW_INTERNAL_ERROR);
        assert!(diag.message().starts_with("Internal compiler error:"));
    }
}
