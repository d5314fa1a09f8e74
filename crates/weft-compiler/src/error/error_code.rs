//! Numeric error codes.
//!
//! Codes are partitioned by origin:
//! - below `20000` - host-language compiler codes, printed `CS0103`
//! - `20000..30000` - schema language codes, printed `X20001`
//! - `30000` and up - workflow language codes, printed `W30001`

use std::fmt;

use crate::error::Subkind;

const SCHEMA_BASE: u32 = 20000;
const WORKFLOW_BASE: u32 = 30000;

/// A diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(u32);

impl ErrorCode {
    /// Internal compiler error during a schema compilation.
    pub const SCHEMA_INTERNAL_ERROR: ErrorCode = ErrorCode(SCHEMA_BASE);

    /// A schema input file could not be read.
    pub const SCHEMA_UNREADABLE_FILE: ErrorCode = ErrorCode(SCHEMA_BASE + 1);

    /// Internal compiler error during a workflow compilation.
    pub const WORKFLOW_INTERNAL_ERROR: ErrorCode = ErrorCode(WORKFLOW_BASE);

    /// A workflow input file could not be read.
    pub const WORKFLOW_UNREADABLE_FILE: ErrorCode = ErrorCode(WORKFLOW_BASE + 1);

    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The language this code belongs to, by its range.
    pub fn origin(self) -> Subkind {
        match self.0 {
            code if code < SCHEMA_BASE => Subkind::Host,
            code if code < WORKFLOW_BASE => Subkind::Schema,
            _ => Subkind::Workflow,
        }
    }

    /// The printed form: `CS0103`, `X20001` or `W30001`.
    pub fn code_string(self) -> String {
        match self.origin() {
            Subkind::Host => format!("CS{:04}", self.0),
            Subkind::Schema => format!("X{:05}", self.0),
            Subkind::Workflow => format!("W{:05}", self.0),
        }
    }
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code_string())
    }
}
