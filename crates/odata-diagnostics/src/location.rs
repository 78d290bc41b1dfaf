//! Source locations as reported by the schema reader

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line/column position in a schema document (1-based)
///
/// The schema reader that feeds this core works on CSDL documents; it hands
/// over the position where a declaration appeared so diagnostics produced
/// much later can still point at the original text. This core never opens
/// the document itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
