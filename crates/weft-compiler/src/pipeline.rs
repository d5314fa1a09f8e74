//! The compilation pipeline.
//!
//! [`compile`] drives one compilation of a schema or workflow project: it
//! parses every DSL file with a [`DslParser`], and if all of them parsed,
//! hands the parsed units to an [`Analyzer`]. Everything either stage reports
//! ends up in the [`CompilationOutput`]; a parser or analyzer that fails in
//! an unexpected way is reported as an internal compiler error rather than
//! taking the caller down with it.

use std::{
    any::Any,
    fmt, fs, io,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    context::{Abort, CompilationContext, MessageFormatter, TraceScope},
    error::{CompileError, Diagnostic, DiagnosticList, Severity, Subkind},
};

/// The two Weft languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dsl {
    Schema,
    Workflow,
}

impl Dsl {
    pub fn subkind(self) -> Subkind {
        match self {
            Dsl::Schema => Subkind::Schema,
            Dsl::Workflow => Subkind::Workflow,
        }
    }
}

impl fmt::Display for Dsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.subkind(), f)
    }
}

/// An input file could not be read.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// A source file of a compilation.
///
/// Files on disk are read on first use and the text is kept afterwards.
#[derive(Debug, Clone)]
pub struct InputFile {
    path: Arc<str>,
    disk_path: Option<PathBuf>,
    text: OnceLock<Arc<str>>,
}

impl InputFile {
    /// A file to be read from `path` when its text is first needed.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            path: path.to_string_lossy().into(),
            disk_path: Some(path.to_path_buf()),
            text: OnceLock::new(),
        }
    }

    /// A file whose text is already known.
    pub fn in_memory(path: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            disk_path: None,
            text: OnceLock::from(text.into()),
        }
    }

    /// The path diagnostics refer to this file by.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the text has been read yet.
    pub fn is_loaded(&self) -> bool {
        self.text.get().is_some()
    }

    /// The file's text, read from disk on first call.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Read`] if the file cannot be read. A failed read
    /// is retried on the next call.
    pub fn text(&self) -> Result<Arc<str>, InputError> {
        if let Some(text) = self.text.get() {
            return Ok(Arc::clone(text));
        }

        let disk_path = self.disk_path.as_deref().unwrap_or(Path::new(&*self.path));
        let text = fs::read_to_string(disk_path).map_err(|source| InputError::Read {
            path: self.path.to_string(),
            source,
        })?;
        debug!(path = &*self.path, chars = text.len(); "Input file read");
        Ok(Arc::clone(self.text.get_or_init(|| text.into())))
    }
}

/// An assembly the host compilation references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataReference {
    pub path: PathBuf,
    /// Extern aliases the reference is visible under; empty for `global`.
    pub aliases: Vec<String>,
}

impl MetadataReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// Everything one compilation reads.
#[derive(Debug, Clone, Default)]
pub struct CompilationInput {
    pub preprocessor_symbols: Vec<String>,
    /// Plain C# sources compiled alongside the DSL.
    pub host_files: Vec<InputFile>,
    pub metadata_references: Vec<MetadataReference>,
    /// C# sources with embedded DSL fragments.
    pub hosted_files: Vec<InputFile>,
    /// Files written entirely in the DSL.
    pub dsl_files: Vec<InputFile>,
}

impl CompilationInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether there is any DSL to compile. [`compile`] refuses inputs where
    /// this is `false`.
    pub fn need_compile(&self) -> bool {
        !self.hosted_files.is_empty() || !self.dsl_files.is_empty()
    }

    /// The DSL-bearing files, each marked with whether it is hosted.
    fn dsl_sources(&self) -> impl Iterator<Item = (&InputFile, bool)> {
        self.hosted_files
            .iter()
            .map(|file| (file, true))
            .chain(self.dsl_files.iter().map(|file| (file, false)))
    }
}

/// What a compilation produced.
#[derive(Debug)]
pub struct CompilationOutput<T> {
    pub diagnostics: DiagnosticList,
    /// Present when the analyzer ran to completion.
    pub analyzer_output: Option<T>,
}

impl<T> CompilationOutput<T> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Parses one DSL file.
pub trait DslParser {
    type Unit;

    /// Parse `text`, the contents of `file`.
    ///
    /// Syntax errors are reported into `scope`. Returns `None` when the file
    /// could not be parsed well enough to analyze.
    fn parse(
        &self,
        file: &InputFile,
        text: &str,
        hosted: bool,
        scope: &TraceScope<'_>,
    ) -> Option<Self::Unit>;
}

/// A host source handed to the analyzer unparsed; its text is read when
/// first asked for.
#[derive(Debug, Clone, Copy)]
pub struct DeferredSource<'a> {
    file: &'a InputFile,
}

impl<'a> DeferredSource<'a> {
    pub fn path(&self) -> &'a str {
        self.file.path()
    }

    /// # Errors
    ///
    /// Returns [`InputError::Read`] if the file cannot be read.
    pub fn text(&self) -> Result<Arc<str>, InputError> {
        self.file.text()
    }
}

/// The analyzer's view of a compilation.
#[derive(Debug)]
pub struct AnalyzerInput<'a, U> {
    pub units: Vec<U>,
    pub host_sources: Vec<DeferredSource<'a>>,
    pub preprocessor_symbols: &'a [String],
    pub metadata_references: &'a [MetadataReference],
}

/// Analyzes the parsed units of a compilation.
pub trait Analyzer<U> {
    type Output;

    /// Report problems into `scope`; stop early by returning an [`Abort`].
    fn analyze(
        &self,
        input: AnalyzerInput<'_, U>,
        scope: &TraceScope<'_>,
    ) -> Result<Self::Output, Abort>;
}

/// Compile a `dsl` project.
///
/// Every hosted and DSL file is parsed in its own trace. When all of them
/// parse, the analyzer runs over the units in one more trace. The analyzer
/// stopping with [`Abort::Diagnostic`] records that diagnostic,
/// [`Abort::Signal`] stops silently, and [`Abort::Internal`] or a panic is
/// reported as one internal compiler error.
///
/// # Errors
///
/// Returns [`CompileError::NothingToCompile`] if `input` has no DSL files,
/// and [`CompileError::Context`] if a trace is already active on `context`.
/// Problems in the sources are diagnostics in the output, not errors.
pub fn compile<P, A>(
    context: &CompilationContext,
    dsl: Dsl,
    input: &CompilationInput,
    parser: &P,
    analyzer: &A,
    formatter: &dyn MessageFormatter,
) -> Result<CompilationOutput<A::Output>, CompileError>
where
    P: DslParser,
    A: Analyzer<P::Unit>,
{
    if !input.need_compile() {
        return Err(CompileError::NothingToCompile);
    }
    let subkind = dsl.subkind();
    info!(
        dsl:% = dsl,
        hosted_files = input.hosted_files.len(),
        dsl_files = input.dsl_files.len(),
        host_files = input.host_files.len();
        "Compilation started"
    );

    let mut diagnostics = DiagnosticList::new();
    let mut units = Vec::new();
    let mut parse_failed = false;
    for (file, hosted) in input.dsl_sources() {
        let scope = context.begin_trace(subkind, formatter, Some(diagnostics))?;
        match parse_file(parser, file, hosted, &scope) {
            Some(unit) => units.push(unit),
            None => parse_failed = true,
        }
        diagnostics = scope.end_trace();
    }

    if parse_failed {
        info!(
            dsl:% = dsl,
            diagnostics = diagnostics.len();
            "Compilation stopped after parse errors"
        );
        return Ok(CompilationOutput {
            diagnostics,
            analyzer_output: None,
        });
    }

    let analyzer_input = AnalyzerInput {
        units,
        host_sources: input
            .host_files
            .iter()
            .map(|file| DeferredSource { file })
            .collect(),
        preprocessor_symbols: &input.preprocessor_symbols,
        metadata_references: &input.metadata_references,
    };

    let scope = context.begin_trace(subkind, formatter, Some(diagnostics))?;
    debug!(dsl:% = dsl; "Running analyzer");
    let analyzer_output = run_analyzer(analyzer, analyzer_input, &scope);
    let diagnostics = scope.end_trace();

    info!(
        dsl:% = dsl,
        diagnostics = diagnostics.len(),
        errors = diagnostics.errors().count(),
        analyzed = analyzer_output.is_some();
        "Compilation finished"
    );
    Ok(CompilationOutput {
        diagnostics,
        analyzer_output,
    })
}

/// [`compile`] a schema project.
///
/// # Errors
///
/// See [`compile`].
pub fn compile_schema<P, A>(
    context: &CompilationContext,
    input: &CompilationInput,
    parser: &P,
    analyzer: &A,
    formatter: &dyn MessageFormatter,
) -> Result<CompilationOutput<A::Output>, CompileError>
where
    P: DslParser,
    A: Analyzer<P::Unit>,
{
    compile(context, Dsl::Schema, input, parser, analyzer, formatter)
}

/// [`compile`] a workflow project.
///
/// # Errors
///
/// See [`compile`].
pub fn compile_workflow<P, A>(
    context: &CompilationContext,
    input: &CompilationInput,
    parser: &P,
    analyzer: &A,
    formatter: &dyn MessageFormatter,
) -> Result<CompilationOutput<A::Output>, CompileError>
where
    P: DslParser,
    A: Analyzer<P::Unit>,
{
    compile(context, Dsl::Workflow, input, parser, analyzer, formatter)
}

fn parse_file<P: DslParser>(
    parser: &P,
    file: &InputFile,
    hosted: bool,
    scope: &TraceScope<'_>,
) -> Option<P::Unit> {
    let text = match file.text() {
        Ok(text) => text,
        Err(err) => {
            warn!(path = file.path(), err:% = err; "Input file unreadable");
            let subkind = scope.subkind();
            scope.report(Diagnostic::new(
                subkind,
                Severity::Error,
                subkind.unreadable_file_code(),
                err.to_string(),
            ));
            return None;
        }
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| parser.parse(file, &text, hosted, scope)));
    let unit = match result {
        Ok(unit) => unit,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(path = file.path(), message = message.as_str(); "Parser panicked");
            scope.report(Diagnostic::internal(scope.subkind(), message));
            None
        }
    };
    debug!(path = file.path(), hosted = hosted, parsed = unit.is_some(); "Parsed input file");
    unit
}

fn run_analyzer<U, A: Analyzer<U>>(
    analyzer: &A,
    input: AnalyzerInput<'_, U>,
    scope: &TraceScope<'_>,
) -> Option<A::Output> {
    let subkind = scope.subkind();
    let result = panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze(input, scope)));
    match result {
        Ok(Ok(output)) => Some(output),
        Ok(Err(Abort::Diagnostic(diagnostic))) => {
            debug!(code:% = diagnostic.code(); "Analyzer stopped with an error");
            scope.report(diagnostic);
            None
        }
        Ok(Err(Abort::Signal)) => {
            debug!("Analyzer aborted");
            None
        }
        Ok(Err(Abort::Internal(message))) => {
            warn!(message = message.as_str(); "Analyzer failed");
            scope.report(Diagnostic::internal(subkind, message));
            None
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(message = message.as_str(); "Analyzer panicked");
            scope.report(Diagnostic::internal(subkind, message));
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{context::MessageCatalog, error::ErrorCode};

    /// Accepts any text without `!`; the unit is the text itself.
    struct LineParser;

    impl DslParser for LineParser {
        type Unit = String;

        fn parse(
            &self,
            file: &InputFile,
            text: &str,
            hosted: bool,
            scope: &TraceScope<'_>,
        ) -> Option<String> {
            if text.contains('!') {
                scope.error(ErrorCode::new(30100), None, &[&file.path()]);
                return None;
            }
            Some(if hosted { format!("hosted:{text}") } else { text.to_string() })
        }
    }

    enum Outcome {
        Succeed,
        Throw,
        Signal,
        Internal,
        Panic,
    }

    struct TestAnalyzer {
        outcome: Outcome,
        calls: Cell<usize>,
    }

    impl TestAnalyzer {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
            }
        }
    }

    impl Analyzer<String> for TestAnalyzer {
        type Output = Vec<String>;

        fn analyze(
            &self,
            input: AnalyzerInput<'_, String>,
            scope: &TraceScope<'_>,
        ) -> Result<Vec<String>, Abort> {
            self.calls.set(self.calls.get() + 1);
            scope.warning(ErrorCode::new(30200), None, &[]);
            match self.outcome {
                Outcome::Succeed => {
                    let mut units = input.units;
                    for source in &input.host_sources {
                        units.push(source.text().map_err(|err| Abort::Internal(err.to_string()))?.to_string());
                    }
                    Ok(units)
                }
                Outcome::Throw => Err(scope.throw(ErrorCode::new(30300), None, &[&"Ship"])),
                Outcome::Signal => Err(Abort::Signal),
                Outcome::Internal => Err(Abort::Internal("bad state".to_string())),
                Outcome::Panic => panic!("index out of bounds"),
            }
        }
    }

    fn catalog() -> MessageCatalog {
        MessageCatalog::new()
            .with(ErrorCode::new(30100), "syntax error in `{0}`")
            .with(ErrorCode::new(30200), "activity has no steps")
            .with(ErrorCode::new(30300), "unknown activity `{0}`")
    }

    fn workflow_input(files: &[&str]) -> CompilationInput {
        CompilationInput {
            dsl_files: files
                .iter()
                .enumerate()
                .map(|(index, text)| InputFile::in_memory(format!("flow{index}.xw"), *text))
                .collect(),
            ..CompilationInput::default()
        }
    }

    fn run(input: &CompilationInput, analyzer: &TestAnalyzer) -> CompilationOutput<Vec<String>> {
        let context = CompilationContext::new();
        let output = compile_workflow(&context, input, &LineParser, analyzer, &catalog()).unwrap();
        assert!(!context.is_active());
        output
    }

    #[test]
    fn test_nothing_to_compile() {
        let context = CompilationContext::new();
        let input = CompilationInput {
            host_files: vec![InputFile::in_memory("A.cs", "class A {}")],
            ..CompilationInput::default()
        };
        assert!(!input.need_compile());

        let analyzer = TestAnalyzer::new(Outcome::Succeed);
        let result = compile_schema(&context, &input, &LineParser, &analyzer, &catalog());
        assert!(matches!(result, Err(CompileError::NothingToCompile)));
        assert_eq!(context.passes(), 0);
    }

    #[test]
    fn test_need_compile_counts_hosted_files() {
        let input = CompilationInput {
            hosted_files: vec![InputFile::in_memory("A.cs", "")],
            ..CompilationInput::default()
        };
        assert!(input.need_compile());
    }

    #[test]
    fn test_successful_compile() {
        let mut input = workflow_input(&["ship", "bill"]);
        input.hosted_files.push(InputFile::in_memory("Host.cs", "inline"));
        input.host_files.push(InputFile::in_memory("Util.cs", "class Util {}"));
        let analyzer = TestAnalyzer::new(Outcome::Succeed);

        let output = run(&input, &analyzer);
        assert!(!output.has_errors());
        assert_eq!(
            output.analyzer_output,
            Some(vec![
                "hosted:inline".to_string(),
                "ship".to_string(),
                "bill".to_string(),
                "class Util {}".to_string(),
            ])
        );
        assert_eq!(output.diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_parse_errors_from_every_file_skip_analysis() {
        let input = workflow_input(&["ok", "bad!", "worse!"]);
        let analyzer = TestAnalyzer::new(Outcome::Succeed);

        let output = run(&input, &analyzer);
        assert_eq!(analyzer.calls.get(), 0);
        assert!(output.analyzer_output.is_none());
        let messages: Vec<_> = output.diagnostics.iter().map(Diagnostic::message).collect();
        assert_eq!(
            messages,
            ["syntax error in `flow1.xw`", "syntax error in `flow2.xw`"]
        );
    }

    #[test]
    fn test_thrown_diagnostic_is_recorded() {
        let analyzer = TestAnalyzer::new(Outcome::Throw);
        let output = run(&workflow_input(&["ship"]), &analyzer);

        assert!(output.analyzer_output.is_none());
        let diagnostics = output.diagnostics.into_vec();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1].message(), "unknown activity `Ship`");
        assert_eq!(diagnostics[1].code_string(), "W30300");
    }

    #[test]
    fn test_signal_stops_silently() {
        let analyzer = TestAnalyzer::new(Outcome::Signal);
        let output = run(&workflow_input(&["ship"]), &analyzer);

        assert!(output.analyzer_output.is_none());
        assert!(!output.has_errors());
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn test_internal_abort_is_reported() {
        let analyzer = TestAnalyzer::new(Outcome::Internal);
        let output = run(&workflow_input(&["ship"]), &analyzer);

        let errors: Vec<_> = output.diagnostics.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Internal compiler error: bad state");
        assert_eq!(errors[0].code(), ErrorCode::WORKFLOW_INTERNAL_ERROR);
    }

    #[test]
    fn test_panic_becomes_one_internal_error() {
        let analyzer = TestAnalyzer::new(Outcome::Panic);
        let output = run(&workflow_input(&["ship"]), &analyzer);

        let errors: Vec<_> = output.diagnostics.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().starts_with("Internal compiler error:"));
        assert!(errors[0].message().contains("index out of bounds"));
    }

    /// Parses like [`LineParser`], but panics on text containing `#`.
    struct PanicParser;

    impl DslParser for PanicParser {
        type Unit = String;

        fn parse(
            &self,
            file: &InputFile,
            text: &str,
            hosted: bool,
            scope: &TraceScope<'_>,
        ) -> Option<String> {
            if text.contains('#') {
                panic!("parser bug in {}", file.path());
            }
            LineParser.parse(file, text, hosted, scope)
        }
    }

    #[test]
    fn test_parser_panic_becomes_internal_error() {
        let context = CompilationContext::new();
        let input = workflow_input(&["ship", "bill#", "pay"]);
        let analyzer = TestAnalyzer::new(Outcome::Succeed);

        let output = compile_workflow(&context, &input, &PanicParser, &analyzer, &catalog()).unwrap();
        assert!(!context.is_active());
        assert_eq!(analyzer.calls.get(), 0);
        assert!(output.analyzer_output.is_none());

        let errors: Vec<_> = output.diagnostics.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), ErrorCode::WORKFLOW_INTERNAL_ERROR);
        assert_eq!(
            errors[0].message(),
            "Internal compiler error: parser bug in flow1.xw"
        );
    }

    #[test]
    fn test_active_trace_is_rejected() {
        let context = CompilationContext::new();
        let catalog = catalog();
        let _scope = context.begin_trace(Subkind::Schema, &catalog, None).unwrap();

        let analyzer = TestAnalyzer::new(Outcome::Succeed);
        let result = compile_workflow(&context, &workflow_input(&["ship"]), &LineParser, &analyzer, &catalog);
        assert!(matches!(result, Err(CompileError::Context(_))));
    }

    #[test]
    fn test_unreadable_file_reports_reserved_code() {
        let dir = tempfile::tempdir().unwrap();
        let input = CompilationInput {
            dsl_files: vec![InputFile::from_path(dir.path().join("missing.xs"))],
            ..CompilationInput::default()
        };
        let context = CompilationContext::new();
        let analyzer = TestAnalyzer::new(Outcome::Succeed);

        let output = compile_schema(&context, &input, &LineParser, &analyzer, &catalog()).unwrap();
        assert!(output.analyzer_output.is_none());
        let diagnostics = output.diagnostics.into_vec();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), ErrorCode::SCHEMA_UNREADABLE_FILE);
        assert!(diagnostics[0].message().contains("missing.xs"));
    }

    #[test]
    fn test_input_file_reads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xs");
        fs::write(&path, "entity Order").unwrap();

        let file = InputFile::from_path(&path);
        assert!(!file.is_loaded());
        assert_eq!(&*file.text().unwrap(), "entity Order");

        fs::remove_file(&path).unwrap();
        assert!(file.is_loaded());
        assert_eq!(&*file.text().unwrap(), "entity Order");
    }

    #[test]
    fn test_metadata_reference_aliases() {
        let reference = MetadataReference::new("lib/Acme.dll").with_alias("acme");
        assert_eq!(reference.path, PathBuf::from("lib/Acme.dll"));
        assert_eq!(reference.aliases, ["acme"]);
    }
}
