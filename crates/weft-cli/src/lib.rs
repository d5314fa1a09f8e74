//! CLI logic for the Weft code generator.
//!
//! Reads a `_CompilationUnit` node tree serialized as JSON, lowers it to host
//! syntax, and writes the printed C#.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use std::fs;

use log::{debug, info};

use weft_compiler::lower::lower;
use weft_core::Node;
use weft_syntax::{print::print, syntax::CompilationUnit};

/// Run the Weft CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or empty node trees
/// - Lowering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Generating code"
    );

    let config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let node: Node = serde_json::from_str(&source).map_err(|source| CliError::Json {
        path: args.input.clone(),
        source,
    })?;
    debug!(label:? = node.label(); "Node tree loaded");

    let unit: CompilationUnit = lower(&node)?.ok_or_else(|| CliError::EmptyInput(args.input.clone()))?;
    let emitted = print(&unit, &config.print_options());
    debug!(
        chars = emitted.text.len(),
        mapped_tokens = emitted.source_map.tokens().len();
        "Compilation unit printed"
    );

    fs::write(&args.output, emitted.text)?;

    info!(output_file = args.output; "C# written successfully");

    Ok(())
}
