//! Collecting diagnostics.

use crate::error::{CompileError, Diagnostic};

/// The diagnostics of one compilation, in report order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity().is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity().is_warning())
    }

    /// Consume the list.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Failed`] with every diagnostic if any of them
    /// is an error; otherwise returns the remaining warnings and infos.
    pub fn finish(self) -> Result<Vec<Diagnostic>, CompileError> {
        if self.has_errors() {
            Err(CompileError::Failed(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Extend<Diagnostic> for DiagnosticList {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.diagnostics.extend(iter);
    }
}

impl FromIterator<Diagnostic> for DiagnosticList {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DiagnosticList {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, Severity, Subkind};

    fn diag(severity: Severity, message: &str) -> Diagnostic {
        Diagnostic::new(Subkind::Schema, severity, ErrorCode::new(20200), message)
    }

    #[test]
    fn test_empty_list() {
        let list = DiagnosticList::new();
        assert!(list.is_empty());
        assert!(!list.has_errors());
        assert_eq!(list.finish(), Ok(Vec::new()));
    }

    #[test]
    fn test_warnings_only_finish_ok() {
        let mut list = DiagnosticList::new();
        list.push(diag(Severity::Warning, "unused"));
        list.push(diag(Severity::Info, "note"));

        assert!(!list.has_errors());
        assert_eq!(list.warnings().count(), 1);
        assert_eq!(list.finish().map(|diags| diags.len()), Ok(2));
    }

    #[test]
    fn test_errors_finish_err() {
        let mut list = DiagnosticList::new();
        list.extend([diag(Severity::Warning, "first"), diag(Severity::Error, "second")]);

        assert!(list.has_errors());
        assert_eq!(list.errors().map(Diagnostic::message).collect::<Vec<_>>(), ["second"]);
        match list.finish() {
            Err(CompileError::Failed(diags)) => assert_eq!(diags.len(), 2),
            other => panic!("Expected Failed, got {other:?}"),
        }
    }
}
