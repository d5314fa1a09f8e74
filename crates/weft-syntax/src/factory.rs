//! Helpers for building generated host-language code.
//!
//! Analyzers produce most of their output through these functions rather
//! than by assembling syntax structs by hand:
//!
//! - [`names`]: fully qualified framework type names
//! - [`literal`]: typed constant values and their expressions
//! - [`exprs`], [`stmts`], [`decls`]: expression, statement and declaration builders

pub mod decls;
pub mod exprs;
pub mod literal;
pub mod names;
pub mod stmts;

pub use literal::{DateTimeKind, Literal, PrimitiveKind};
