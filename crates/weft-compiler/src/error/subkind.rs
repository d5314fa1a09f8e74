//! Diagnostic origins.

use std::fmt;

use crate::error::ErrorCode;

/// Which language a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subkind {
    /// The host language (C#), reported back by its compiler.
    Host,
    /// The schema language.
    Schema,
    /// The workflow language.
    Workflow,
}

impl Subkind {
    /// The code reported when a compilation of this language fails internally.
    ///
    /// The host language has no compilation pass of its own and shares the
    /// schema code.
    pub fn internal_error_code(self) -> ErrorCode {
        match self {
            Subkind::Host | Subkind::Schema => ErrorCode::SCHEMA_INTERNAL_ERROR,
            Subkind::Workflow => ErrorCode::WORKFLOW_INTERNAL_ERROR,
        }
    }

    /// The code reported when an input file of this language cannot be read.
    pub fn unreadable_file_code(self) -> ErrorCode {
        match self {
            Subkind::Host | Subkind::Schema => ErrorCode::SCHEMA_UNREADABLE_FILE,
            Subkind::Workflow => ErrorCode::WORKFLOW_UNREADABLE_FILE,
        }
    }
}

impl fmt::Display for Subkind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subkind::Host => "host",
            Subkind::Schema => "schema",
            Subkind::Workflow => "workflow",
        };
        f.write_str(name)
    }
}
