//! Diagnostics and error reporting for the OData query core
//!
//! This crate provides the shared diagnostic infrastructure: stable error
//! codes, source locations reported by the schema reader, and the
//! `Diagnostic` values that later stages collect from unresolved bindings
//! and construction failures.

mod diagnostic;
mod error_code;
mod location;

pub use diagnostic::*;
pub use error_code::*;
pub use location::*;
