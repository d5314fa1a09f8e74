//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the library's error types and
//! miette's rich diagnostic formatting used in the CLI. Lowering errors
//! whose node span points into a readable file are shown with a snippet of
//! that file.

use std::{fmt, fs};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use weft_compiler::lower::LowerError;

use crate::CliError;

/// Adapter for a lowering error with its source file.
pub struct LowerAdapter<'a> {
    err: &'a LowerError,
    /// The file the error's span points into, if it could be read.
    src: Option<(NamedSource<String>, SourceSpan)>,
}

impl<'a> LowerAdapter<'a> {
    /// Create an adapter, reading the spanned file when there is one.
    pub fn new(err: &'a LowerError) -> Self {
        let src = err.span().and_then(|span| {
            let text = fs::read_to_string(span.file_path()).ok()?;
            let start = byte_offset(&text, span.start_index());
            let end = byte_offset(&text, span.end_index());
            Some((
                NamedSource::new(span.file_path(), text),
                SourceSpan::new(start.into(), end - start),
            ))
        });
        Self { err, src }
    }

    /// Whether a source snippet is available.
    pub fn has_source(&self) -> bool {
        self.src.is_some()
    }
}

/// Byte offset of the character at `index`, clamped to the end of `text`.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

impl fmt::Debug for LowerAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LowerAdapter")
            .field("err", &self.err)
            .field("has_source", &self.has_source())
            .finish()
    }
}

impl fmt::Display for LowerAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for LowerAdapter<'_> {}

impl MietteDiagnostic for LowerAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("weft::lower"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            LowerError::UnknownLabel { .. } => {
                "nodes with language-specific labels must be rewritten to native syntax before code generation"
            }
            LowerError::MissingMember { .. } => "native syntax nodes must carry every required member",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src
            .as_ref()
            .map(|(source, _)| source as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (_, span) = self.src.as_ref()?;
        let label = LabeledSpan::new_primary_with_span(Some("while lowering this node".to_string()), *span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for every other [`CliError`] variant.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "weft::io",
            CliError::Json { .. } => "weft::json",
            CliError::EmptyInput(_) => "weft::input",
            CliError::Lower(_) => "weft::lower",
            CliError::Config(_) => "weft::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A lowering error, with a snippet when its source is readable.
    Lower(LowerAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Lower(l) => fmt::Display::fmt(l, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Lower(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Lower(l) => l.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Lower(l) => l.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Lower(l) => l.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Lower(l) => l.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Lower(lower_err) => vec![Reportable::Lower(LowerAdapter::new(lower_err))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
