//! The compilation context.
//!
//! A [`CompilationContext`] is handed to every stage of a compilation. A
//! compilation pass runs inside a [`TraceScope`], opened with
//! [`CompilationContext::begin_trace`]: the scope knows which language it
//! compiles, turns error codes into messages through a [`MessageFormatter`],
//! and collects everything reported into a [`DiagnosticList`].
//!
//! Only one scope can be open on a context at a time. Opening a second one
//! fails with [`ContextError::AlreadyActive`]; dropping the scope ends the
//! pass on every exit path.
//!
//! # Example
//!
//! ```
//! # use weft_compiler::context::{CompilationContext, MessageCatalog};
//! # use weft_compiler::error::{ErrorCode, Subkind};
//! let catalog = MessageCatalog::new().with(ErrorCode::new(20100), "type `{0}` is not defined");
//! let context = CompilationContext::new();
//!
//! let scope = context.begin_trace(Subkind::Schema, &catalog, None).unwrap();
//! scope.error(ErrorCode::new(20100), None, &[&"Order"]);
//! let diagnostics = scope.end_trace();
//!
//! assert_eq!(diagnostics.iter().next().unwrap().message(), "type `Order` is not defined");
//! ```

use std::{
    cell::{Cell, RefCell},
    fmt,
};

use indexmap::IndexMap;
use log::{debug, trace};
use thiserror::Error;

use weft_core::{NodeError, SourceSpan};

use crate::{
    error::{Diagnostic, DiagnosticList, ErrorCode, Severity, Subkind},
    lower::LowerError,
};

/// Misuse of a [`CompilationContext`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("a {active} trace is already active on this compilation context")]
    AlreadyActive { active: Subkind },
}

/// Ends an analysis pass early.
///
/// Analyzers return it through `?` and the compile driver sorts it out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Abort {
    /// Stop with one more error, recorded by the driver.
    #[error("{0}")]
    Diagnostic(Diagnostic),

    /// Stop silently; everything worth saying is already reported.
    #[error("analysis aborted")]
    Signal,

    /// An unexpected fault, reported as an internal compiler error.
    #[error("{0}")]
    Internal(String),
}

impl From<LowerError> for Abort {
    fn from(err: LowerError) -> Self {
        Abort::Internal(err.to_string())
    }
}

impl From<NodeError> for Abort {
    fn from(err: NodeError) -> Self {
        Abort::Internal(err.to_string())
    }
}

/// Turns an error code and its arguments into a message.
pub trait MessageFormatter {
    fn format(&self, code: ErrorCode, arguments: &[&dyn fmt::Display]) -> String;
}

impl<F> MessageFormatter for F
where
    F: Fn(ErrorCode, &[&dyn fmt::Display]) -> String,
{
    fn format(&self, code: ErrorCode, arguments: &[&dyn fmt::Display]) -> String {
        self(code, arguments)
    }
}

/// Message templates by error code.
///
/// Templates refer to arguments by position: `{0}`, `{1}`, ... A code with no
/// template prints its arguments after the code.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: IndexMap<ErrorCode, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the template for `code`.
    pub fn with(mut self, code: ErrorCode, template: impl Into<String>) -> Self {
        self.insert(code, template);
        self
    }

    pub fn insert(&mut self, code: ErrorCode, template: impl Into<String>) {
        self.templates.insert(code, template.into());
    }

    pub fn template(&self, code: ErrorCode) -> Option<&str> {
        self.templates.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl MessageFormatter for MessageCatalog {
    fn format(&self, code: ErrorCode, arguments: &[&dyn fmt::Display]) -> String {
        let Some(template) = self.template(code) else {
            let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
            return if arguments.is_empty() {
                code.code_string()
            } else {
                format!("{code}: {}", arguments.join(", "))
            };
        };
        fill_template(template, arguments)
    }
}

/// Replace `{n}` placeholders with the matching argument.
///
/// `{{` and `}}` print literal braces; placeholders past the last argument
/// are kept as written.
fn fill_template(template: &str, arguments: &[&dyn fmt::Display]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find(['{', '}']) {
        message.push_str(&rest[..open]);
        let tail = &rest[open..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            message.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        let placeholder = tail
            .strip_prefix('{')
            .and_then(|inner| inner.split_once('}'))
            .and_then(|(index, after)| Some((index.parse::<usize>().ok()?, after)));
        match placeholder {
            Some((index, after)) if index < arguments.len() => {
                message.push_str(&arguments[index].to_string());
                rest = after;
            }
            _ => {
                message.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }
    message.push_str(rest);
    message
}

/// Shared state of the compilations run with one context.
///
/// A context is used from one thread; concurrent compilations each create
/// their own.
#[derive(Debug, Default)]
pub struct CompilationContext {
    active: Cell<Option<Subkind>>,
    passes: Cell<usize>,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a compilation pass.
    ///
    /// Diagnostics are collected into `diagnostics` when given, so several
    /// passes can append to one list.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::AlreadyActive`] if a pass is already open on
    /// this context.
    pub fn begin_trace<'a>(
        &'a self,
        subkind: Subkind,
        formatter: &'a dyn MessageFormatter,
        diagnostics: Option<DiagnosticList>,
    ) -> Result<TraceScope<'a>, ContextError> {
        if let Some(active) = self.active.get() {
            return Err(ContextError::AlreadyActive { active });
        }
        self.active.set(Some(subkind));
        self.passes.set(self.passes.get() + 1);
        trace!(subkind:% = subkind, pass = self.passes.get(); "Trace started");

        Ok(TraceScope {
            context: self,
            subkind,
            formatter,
            diagnostics: RefCell::new(diagnostics.unwrap_or_default()),
            suffixes: RefCell::new(Vec::new()),
        })
    }

    /// Whether a pass is open.
    pub fn is_active(&self) -> bool {
        self.active.get().is_some()
    }

    /// Number of passes opened so far.
    pub fn passes(&self) -> usize {
        self.passes.get()
    }
}

/// An open compilation pass; see [`CompilationContext::begin_trace`].
pub struct TraceScope<'a> {
    context: &'a CompilationContext,
    subkind: Subkind,
    formatter: &'a dyn MessageFormatter,
    diagnostics: RefCell<DiagnosticList>,
    suffixes: RefCell<Vec<String>>,
}

impl<'a> TraceScope<'a> {
    pub fn subkind(&self) -> Subkind {
        self.subkind
    }

    /// Record a finished diagnostic as is.
    pub fn report(&self, diagnostic: Diagnostic) {
        debug!(code:% = diagnostic.code(), severity:% = diagnostic.severity(); "Diagnostic reported");
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Build a diagnostic of this pass's language from an error code.
    ///
    /// The message comes from the formatter, followed by every active
    /// message suffix.
    pub fn create(
        &self,
        severity: Severity,
        code: ErrorCode,
        span: Option<SourceSpan>,
        arguments: &[&dyn fmt::Display],
    ) -> Diagnostic {
        let mut message = self.formatter.format(code, arguments);
        for suffix in self.suffixes.borrow().iter() {
            message.push_str(suffix);
        }
        Diagnostic::new(self.subkind, severity, code, message).with_span(span)
    }

    pub fn error(&self, code: ErrorCode, span: Option<SourceSpan>, arguments: &[&dyn fmt::Display]) {
        self.report(self.create(Severity::Error, code, span, arguments));
    }

    pub fn warning(&self, code: ErrorCode, span: Option<SourceSpan>, arguments: &[&dyn fmt::Display]) {
        self.report(self.create(Severity::Warning, code, span, arguments));
    }

    pub fn info(&self, code: ErrorCode, span: Option<SourceSpan>, arguments: &[&dyn fmt::Display]) {
        self.report(self.create(Severity::Info, code, span, arguments));
    }

    /// An error to stop the pass with: `return Err(scope.throw(...))`.
    pub fn throw(
        &self,
        code: ErrorCode,
        span: Option<SourceSpan>,
        arguments: &[&dyn fmt::Display],
    ) -> Abort {
        Abort::Diagnostic(self.create(Severity::Error, code, span, arguments))
    }

    /// Run `f` with `suffix` appended to every message created inside it.
    pub fn with_message_suffix<R>(&self, suffix: impl Into<String>, f: impl FnOnce() -> R) -> R {
        self.suffixes.borrow_mut().push(suffix.into());
        let _pop = SuffixGuard(&self.suffixes);
        f()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().has_errors()
    }

    /// Number of diagnostics collected so far.
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Close the pass and return what it collected.
    pub fn end_trace(self) -> DiagnosticList {
        self.diagnostics.take()
    }
}

impl Drop for TraceScope<'_> {
    fn drop(&mut self) {
        self.context.active.set(None);
        trace!(
            subkind:% = self.subkind,
            diagnostics = self.diagnostics.borrow().len();
            "Trace ended"
        );
    }
}

impl fmt::Debug for TraceScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceScope")
            .field("subkind", &self.subkind)
            .field("diagnostics", &self.diagnostics)
            .field("suffixes", &self.suffixes)
            .finish()
    }
}

struct SuffixGuard<'s>(&'s RefCell<Vec<String>>);

impl Drop for SuffixGuard<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().pop();
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use weft_core::LineMap;

    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::new()
            .with(ErrorCode::new(20100), "type `{0}` is not defined")
            .with(ErrorCode::new(20101), "`{1}` expects {0} arguments")
    }

    #[test]
    fn test_fill_template() {
        assert_eq!(fill_template("{0} and {1}", &[&"a", &2]), "a and 2");
        assert_eq!(fill_template("{1}{0}", &[&"x", &"y"]), "yx");
        assert_eq!(fill_template("{{literal}} {0}", &[&1]), "{literal} 1");
        assert_eq!(fill_template("missing {3}", &[&1]), "missing {3}");
        assert_eq!(fill_template("open { brace", &[]), "open { brace");
    }

    #[test]
    fn test_catalog_fallback() {
        let catalog = catalog();
        assert_eq!(catalog.format(ErrorCode::new(20999), &[]), "X20999");
        assert_eq!(catalog.format(ErrorCode::new(20999), &[&"a", &"b"]), "X20999: a, b");
    }

    #[test]
    fn test_trace_collects_diagnostics() {
        let context = CompilationContext::new();
        let catalog = catalog();
        let span = LineMap::new("type A").span("a.xs", 5..6).unwrap();

        let scope = context.begin_trace(Subkind::Schema, &catalog, None).unwrap();
        scope.error(ErrorCode::new(20100), Some(span.clone()), &[&"A"]);
        scope.warning(ErrorCode::new(20101), None, &[&2, &"Map"]);
        assert!(scope.has_errors());
        let diagnostics = scope.end_trace();

        let messages: Vec<_> = diagnostics.iter().map(Diagnostic::message).collect();
        assert_eq!(messages, ["type `A` is not defined", "`Map` expects 2 arguments"]);
        assert_eq!(diagnostics.iter().next().unwrap().span(), Some(&span));
        assert!(diagnostics.iter().all(|diag| diag.subkind() == Subkind::Schema));
        assert!(!context.is_active());
    }

    #[test]
    fn test_nested_trace_is_rejected() {
        let context = CompilationContext::new();
        let catalog = catalog();

        let outer = context.begin_trace(Subkind::Workflow, &catalog, None).unwrap();
        let nested = context.begin_trace(Subkind::Schema, &catalog, None);
        assert_eq!(
            nested.err(),
            Some(ContextError::AlreadyActive {
                active: Subkind::Workflow
            })
        );

        drop(outer);
        assert!(context.begin_trace(Subkind::Schema, &catalog, None).is_ok());
        assert_eq!(context.passes(), 2);
    }

    #[test]
    fn test_scope_ends_on_panic() {
        let context = CompilationContext::new();
        let catalog = catalog();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _scope = context.begin_trace(Subkind::Schema, &catalog, None).unwrap();
            panic!("analyzer bug");
        }));

        assert!(result.is_err());
        assert!(!context.is_active());
    }

    #[test]
    fn test_passes_share_a_list() {
        let context = CompilationContext::new();
        let catalog = catalog();

        let first = context.begin_trace(Subkind::Schema, &catalog, None).unwrap();
        first.error(ErrorCode::new(20100), None, &[&"A"]);
        let list = first.end_trace();

        let second = context.begin_trace(Subkind::Schema, &catalog, Some(list)).unwrap();
        second.error(ErrorCode::new(20100), None, &[&"B"]);
        assert_eq!(second.end_trace().len(), 2);
    }

    #[test]
    fn test_message_suffix_nests() {
        let context = CompilationContext::new();
        let catalog = catalog();
        let scope = context.begin_trace(Subkind::Schema, &catalog, None).unwrap();

        scope.with_message_suffix(" (in `Order`)", || {
            scope.error(ErrorCode::new(20100), None, &[&"A"]);
            scope.with_message_suffix(" (field `Id`)", || {
                scope.error(ErrorCode::new(20100), None, &[&"B"]);
            });
        });
        scope.error(ErrorCode::new(20100), None, &[&"C"]);

        let messages: Vec<_> = scope
            .end_trace()
            .into_iter()
            .map(|diag| diag.message().to_string())
            .collect();
        assert_eq!(
            messages,
            [
                "type `A` is not defined (in `Order`)",
                "type `B` is not defined (in `Order`) (field `Id`)",
                "type `C` is not defined",
            ]
        );
    }

    #[test]
    fn test_throw_builds_abort() {
        let context = CompilationContext::new();
        let formatter = |code: ErrorCode, _: &[&dyn fmt::Display]| format!("failed with {code}");
        let scope = context.begin_trace(Subkind::Workflow, &formatter, None).unwrap();

        let abort = scope.throw(ErrorCode::new(30007), None, &[]);
        match abort {
            Abort::Diagnostic(diag) => {
                assert_eq!(diag.message(), "failed with W30007");
                assert!(diag.is_error());
            }
            other => panic!("Expected a diagnostic abort, got {other:?}"),
        }
        // Throwing does not record anything by itself.
        assert_eq!(scope.diagnostic_count(), 0);
    }
}
