//! Diagnostic values produced by the analysis and resolution stages

use crate::{ErrorCode, SourceLocation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the model or query cannot be used as written
    Error,
    /// Warning - potential issue but usable
    Warning,
    /// Information - informational message
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message with location and context
///
/// Diagnostics are plain data. Resolution itself never fails (unresolved
/// bindings degrade to placeholder values); a later pass inspects those
/// placeholders and turns them into `Diagnostic`s for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Location in the schema document, when known
    pub location: Option<SourceLocation>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            location: None,
            help: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ODQ0300;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(ODQ0300, "binding path 'Owner/' is malformed")
            .with_location(SourceLocation::new(4, 9));

        assert_eq!(
            diag.to_string(),
            "error: ODQ0300 - binding path 'Owner/' is malformed at 4:9"
        );
    }

    #[test]
    fn test_warning_severity() {
        let diag = Diagnostic::warning(ODQ0300, "suspicious path");
        assert_eq!(diag.severity, Severity::Warning);
        assert!(diag.location.is_none());
    }
}
