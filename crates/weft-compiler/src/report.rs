//! Mapping host compiler diagnostics back to DSL source.
//!
//! The host compiler reports problems against the C# text it was given. For
//! a file that was printed from lowered syntax, that text is an
//! [`EmittedText`] whose source map remembers which DSL span produced each
//! token and node; [`report_diagnostics`] uses it to locate every host
//! diagnostic in the DSL files instead. Host files written by hand keep their
//! own positions.

use std::{fmt, ops::Range, sync::Arc};

use indexmap::IndexMap;
use log::debug;

use weft_core::{LineMap, SourceSpan};
use weft_syntax::print::EmittedText;

use crate::{
    context::TraceScope,
    error::{Diagnostic, ErrorCode, Severity, Subkind},
};

/// Severity as reported by the host compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostSeverity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl HostSeverity {
    fn severity(self) -> Option<Severity> {
        match self {
            HostSeverity::Hidden => None,
            HostSeverity::Info => Some(Severity::Info),
            HostSeverity::Warning => Some(Severity::Warning),
            HostSeverity::Error => Some(Severity::Error),
        }
    }
}

impl fmt::Display for HostSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HostSeverity::Hidden => "hidden",
            HostSeverity::Info => "info",
            HostSeverity::Warning => "warning",
            HostSeverity::Error => "error",
        };
        f.write_str(text)
    }
}

/// Where in a host file a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLocation {
    pub file_path: Arc<str>,
    /// Character range in the host file's text.
    pub range: Range<usize>,
}

/// A diagnostic produced by the host compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDiagnostic {
    pub code: u32,
    pub severity: HostSeverity,
    pub message: String,
    pub location: Option<HostLocation>,
}

impl HostDiagnostic {
    pub fn new(code: u32, severity: HostSeverity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, file_path: impl Into<Arc<str>>, range: Range<usize>) -> Self {
        self.location = Some(HostLocation {
            file_path: file_path.into(),
            range,
        });
        self
    }
}

/// A host file known to the compilation.
#[derive(Debug, Clone)]
pub enum HostFile {
    /// Printed from lowered syntax.
    Emitted(EmittedText),
    /// Written directly in the host language.
    Native(LineMap),
}

impl HostFile {
    /// A hand-written host file with the given text.
    pub fn native(text: &str) -> Self {
        HostFile::Native(LineMap::new(text))
    }
}

/// The host files of a compilation, by path.
#[derive(Debug, Clone, Default)]
pub struct HostFiles {
    files: IndexMap<Arc<str>, HostFile>,
}

impl HostFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_path: impl Into<Arc<str>>, file: HostFile) {
        self.files.insert(file_path.into(), file);
    }

    pub fn with(mut self, file_path: impl Into<Arc<str>>, file: HostFile) -> Self {
        self.insert(file_path, file);
        self
    }

    pub fn get(&self, file_path: &str) -> Option<&HostFile> {
        self.files.get(file_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Report host diagnostics into `scope`, located in DSL source where
/// possible.
///
/// Hidden diagnostics are always dropped; informational ones unless
/// `keep_info` is set. Reported diagnostics have the [`Subkind::Host`]
/// subkind whatever the scope's language.
pub fn report_diagnostics(
    scope: &TraceScope<'_>,
    diagnostics: &[HostDiagnostic],
    files: &HostFiles,
    keep_info: bool,
) {
    for host in diagnostics {
        let Some(severity) = host.severity.severity() else {
            debug!(code = host.code; "Dropping hidden host diagnostic");
            continue;
        };
        if severity == Severity::Info && !keep_info {
            debug!(code = host.code; "Dropping informational host diagnostic");
            continue;
        }

        let span = host
            .location
            .as_ref()
            .and_then(|location| locate(location, files));
        let diagnostic = Diagnostic::new(
            Subkind::Host,
            severity,
            ErrorCode::new(host.code),
            host.message.clone(),
        )
        .with_span(span);
        scope.report(diagnostic);
    }
}

/// The DSL span for a host location.
fn locate(location: &HostLocation, files: &HostFiles) -> Option<SourceSpan> {
    let file_path = &location.file_path;
    match files.get(file_path) {
        Some(HostFile::Emitted(emitted)) => Some(locate_emitted(emitted, location)),
        Some(HostFile::Native(line_map)) => {
            match line_map.span(file_path.clone(), location.range.clone()) {
                Ok(span) => Some(span),
                Err(err) => {
                    debug!(file = file_path.to_string(), err:% = err; "Host location has no source position");
                    None
                }
            }
        }
        None => {
            debug!(file = file_path.to_string(); "Host diagnostic in an unknown file");
            None
        }
    }
}

/// Prefer the merged spans of the tokens under the range, then the nearest
/// enclosing node with any span, then the start of the host file.
fn locate_emitted(emitted: &EmittedText, location: &HostLocation) -> SourceSpan {
    let range = &location.range;
    let source_map = &emitted.source_map;

    let mut merged: Option<SourceSpan> = None;
    for mapped in source_map.tokens_intersecting(range) {
        let Some(span) = &mapped.span else {
            continue;
        };
        merged = match merged {
            None => Some(span.clone()),
            // Tokens from different DSL files cannot be merged; keep the first.
            Some(current) => Some(current.merge_with(span).unwrap_or(current)),
        };
    }
    if let Some(span) = merged {
        debug!(range:? = range; "Host diagnostic mapped through tokens");
        return span;
    }

    let enclosing = source_map
        .enclosing_nodes(range)
        .into_iter()
        .find_map(|mapped| mapped.span.clone().or_else(|| mapped.any_span.clone()));
    if let Some(span) = enclosing {
        debug!(range:? = range; "Host diagnostic mapped through an enclosing node");
        return span;
    }

    debug!(range:? = range; "Host diagnostic has no source mapping");
    SourceSpan::empty_at_start(location.file_path.clone())
}

#[cfg(test)]
mod tests {
    use weft_core::CsTokenKind;
    use weft_syntax::{
        SourceSpanned, SyntaxToken,
        print::{PrintOptions, print},
        syntax::{Expr, ExprKind, Stmt, StmtKind, TypeKind, TypeSyntax},
    };

    use super::*;
    use crate::context::{CompilationContext, MessageCatalog};

    const DSL: &str = "activity Ship {\n  return total\n}\n";

    fn dsl_span(range: Range<usize>) -> SourceSpan {
        LineMap::new(DSL).span("ship.xw", range).unwrap()
    }

    /// `return total;` with the identifier spanned at `total` in the DSL.
    fn emitted_return() -> EmittedText {
        let token = SyntaxToken::identifier("total").with_source_span(Some(dsl_span(25..30)));
        let mut name = TypeSyntax::new(TypeKind::Identifier(token));
        name.span = Some(dsl_span(25..30));
        let stmt = Stmt::new(StmtKind::Return(Some(Expr::name(name))))
            .with_source_span(Some(dsl_span(18..30)));
        print(&stmt, &PrintOptions::default())
    }

    fn run(diagnostics: &[HostDiagnostic], files: &HostFiles, keep_info: bool) -> Vec<Diagnostic> {
        let context = CompilationContext::new();
        let catalog = MessageCatalog::new();
        let scope = context.begin_trace(Subkind::Workflow, &catalog, None).unwrap();
        report_diagnostics(&scope, diagnostics, files, keep_info);
        scope.end_trace().into_vec()
    }

    #[test]
    fn test_token_range_maps_to_token_span() {
        let files = HostFiles::new().with("ship.g.cs", HostFile::Emitted(emitted_return()));
        // `total` sits at 7..12 in `return total;`
        let host = HostDiagnostic::new(103, HostSeverity::Error, "The name 'total' does not exist")
            .at("ship.g.cs", 7..12);

        let reported = run(&[host], &files, false);
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].span(), Some(&dsl_span(25..30)));
        assert_eq!(reported[0].subkind(), Subkind::Host);
        assert_eq!(reported[0].code_string(), "CS0103");
    }

    #[test]
    fn test_unspanned_token_falls_back_to_enclosing_node() {
        let files = HostFiles::new().with("ship.g.cs", HostFile::Emitted(emitted_return()));
        // The `;` has no span of its own.
        let host = HostDiagnostic::new(1002, HostSeverity::Error, "; expected").at("ship.g.cs", 12..13);

        let reported = run(&[host], &files, false);
        assert_eq!(reported[0].span(), Some(&dsl_span(18..30)));
    }

    #[test]
    fn test_unmapped_text_points_at_file_start() {
        let stmt = Stmt::new(StmtKind::Expression(Expr::new(ExprKind::This)));
        let files = HostFiles::new().with(
            "gen.cs",
            HostFile::Emitted(print(&stmt, &PrintOptions::default())),
        );
        let host = HostDiagnostic::new(201, HostSeverity::Error, "Only assignment").at("gen.cs", 0..4);

        let reported = run(&[host], &files, false);
        let span = reported[0].span().unwrap();
        assert_eq!(span.file_path(), "gen.cs");
        assert_eq!(span.length(), 0);
        assert_eq!(span.start_position().line(), 1);
    }

    #[test]
    fn test_native_file_uses_own_positions() {
        let files = HostFiles::new().with("Helpers.cs", HostFile::native("class A {\n  int x\n}\n"));
        // `x` on the second line
        let host = HostDiagnostic::new(1002, HostSeverity::Error, "; expected").at("Helpers.cs", 16..17);

        let reported = run(&[host], &files, false);
        let span = reported[0].span().unwrap();
        assert_eq!(span.file_path(), "Helpers.cs");
        assert_eq!(span.start_position().line(), 2);
        assert_eq!(span.start_position().character(), 7);
    }

    #[test]
    fn test_unknown_file_has_no_span() {
        let host = HostDiagnostic::new(5001, HostSeverity::Error, "no entry point").at("Other.cs", 0..1);
        let reported = run(&[host], &HostFiles::new(), false);
        assert_eq!(reported[0].span(), None);
        assert_eq!(reported[0].location(), None);
    }

    #[test]
    fn test_info_and_hidden_are_filtered() {
        let diagnostics = [
            HostDiagnostic::new(8019, HostSeverity::Hidden, "unnecessary using"),
            HostDiagnostic::new(1591, HostSeverity::Info, "missing XML comment"),
            HostDiagnostic::new(168, HostSeverity::Warning, "unused variable"),
        ];

        let reported = run(&diagnostics, &HostFiles::new(), false);
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].severity(), Severity::Warning);

        let reported = run(&diagnostics, &HostFiles::new(), true);
        assert_eq!(reported.len(), 2);
        assert_eq!(reported[0].severity(), Severity::Info);
    }

    #[test]
    fn test_tokens_on_one_diagnostic_are_merged() {
        let left = SyntaxToken::identifier("a").with_source_span(Some(dsl_span(18..24)));
        let right = SyntaxToken::identifier("b").with_source_span(Some(dsl_span(25..30)));
        let expr = Expr::new(ExprKind::Binary {
            left: Box::new(Expr::name(TypeSyntax::new(TypeKind::Identifier(left)))),
            operator: SyntaxToken::fixed(CsTokenKind::Plus),
            right: Box::new(Expr::name(TypeSyntax::new(TypeKind::Identifier(right)))),
        });
        let emitted = print(&expr, &PrintOptions::default());
        assert_eq!(emitted.text, "a + b");
        let files = HostFiles::new().with("sum.g.cs", HostFile::Emitted(emitted));

        let host = HostDiagnostic::new(19, HostSeverity::Error, "Operator '+' cannot be applied")
            .at("sum.g.cs", 0..5);
        let reported = run(&[host], &files, false);
        assert_eq!(reported[0].span(), Some(&dsl_span(18..30)));
    }
}
