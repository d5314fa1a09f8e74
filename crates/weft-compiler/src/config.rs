//! Configuration types for Weft compilations.
//!
//! All types implement [`serde::Deserialize`] and default every field, so a
//! configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`CompilerConfig`] - Top-level configuration.
//! - [`DiagnosticsConfig`] - Which host diagnostics are reported.
//! - [`EmitConfig`] - How generated C# is laid out.
//!
//! # Example
//!
//! ```
//! # use weft_compiler::config::CompilerConfig;
//! let config = CompilerConfig::default();
//! assert!(!config.diagnostics().keep_info());
//! assert_eq!(config.print_options().indent_width, 4);
//! ```

use serde::Deserialize;

use weft_syntax::print::PrintOptions;

/// Top-level compiler configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompilerConfig {
    /// Diagnostics configuration section.
    #[serde(default)]
    diagnostics: DiagnosticsConfig,

    /// Emit configuration section.
    #[serde(default)]
    emit: EmitConfig,
}

impl CompilerConfig {
    pub fn new(diagnostics: DiagnosticsConfig, emit: EmitConfig) -> Self {
        Self { diagnostics, emit }
    }

    pub fn diagnostics(&self) -> &DiagnosticsConfig {
        &self.diagnostics
    }

    pub fn emit(&self) -> &EmitConfig {
        &self.emit
    }

    /// Printer settings for generated C#.
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            indent_width: self.emit.indent_width,
            newline: self.emit.newline.clone(),
        }
    }
}

/// Filtering of reported host diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DiagnosticsConfig {
    /// Keep informational host diagnostics instead of dropping them.
    #[serde(default)]
    keep_info: bool,
}

impl DiagnosticsConfig {
    pub fn new(keep_info: bool) -> Self {
        Self { keep_info }
    }

    pub fn keep_info(&self) -> bool {
        self.keep_info
    }
}

/// Layout of generated C#.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmitConfig {
    /// Spaces per indentation level.
    #[serde(default = "default_indent_width")]
    indent_width: usize,

    /// Line terminator.
    #[serde(default = "default_newline")]
    newline: String,
}

impl EmitConfig {
    pub fn new(indent_width: usize, newline: impl Into<String>) -> Self {
        Self {
            indent_width,
            newline: newline.into(),
        }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn newline(&self) -> &str {
        &self.newline
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            newline: default_newline(),
        }
    }
}

fn default_indent_width() -> usize {
    4
}

fn default_newline() -> String {
    "\n".to_string()
}
