//! Error codes following a structured numbering system
//!
//! Error code ranges:
//! - ODQ0100-ODQ0199: Semantic analysis (promotion, function resolution)
//! - ODQ0200-ODQ0299: Model construction (schema building)
//! - ODQ0300-ODQ0399: Binding resolution (navigation targets, paths)
//! - ODQ0900-ODQ0999: Internal errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a semantic-analysis error (0100-0199)
    pub const fn is_semantic_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a model-construction error (0200-0299)
    pub const fn is_model_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a binding-resolution error (0300-0399)
    pub const fn is_binding_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is an internal error (0900-0999)
    pub const fn is_internal_error(&self) -> bool {
        self.0 >= 900 && self.0 < 1000
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ODQ{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

// Static error info storage
static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Semantic analysis (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Unsupported operand types")
            .with_help("The operator is not defined for these operand types"),
    );
    map.insert(101, ErrorInfo::new("Unknown canonical function"));
    map.insert(102, ErrorInfo::new("No overload with matching argument count"));
    map.insert(103, ErrorInfo::new("Argument type mismatch"));

    // Model construction (0200-0299)
    map.insert(200, ErrorInfo::new("Duplicate schema type"));
    map.insert(201, ErrorInfo::new("Duplicate property"));
    map.insert(202, ErrorInfo::new("Duplicate navigation source"));

    // Binding resolution (0300-0399)
    map.insert(
        300,
        ErrorInfo::new("Unresolved binding path").with_help(
            "Each path segment must name a navigation property or a derived type",
        ),
    );
    map.insert(301, ErrorInfo::new("Unresolved navigation property"));
    map.insert(302, ErrorInfo::new("Unresolved binding target"));

    // Internal (0900-0999)
    map.insert(900, ErrorInfo::new("Internal error"));

    map
});

// Convenient error code constants

// Semantic analysis
pub const ODQ0100: ErrorCode = ErrorCode::new(100);
pub const ODQ0101: ErrorCode = ErrorCode::new(101);
pub const ODQ0102: ErrorCode = ErrorCode::new(102);
pub const ODQ0103: ErrorCode = ErrorCode::new(103);

// Model construction
pub const ODQ0200: ErrorCode = ErrorCode::new(200);
pub const ODQ0201: ErrorCode = ErrorCode::new(201);
pub const ODQ0202: ErrorCode = ErrorCode::new(202);

// Binding resolution
pub const ODQ0300: ErrorCode = ErrorCode::new(300);
pub const ODQ0301: ErrorCode = ErrorCode::new(301);
pub const ODQ0302: ErrorCode = ErrorCode::new(302);

// Internal
pub const ODQ0900: ErrorCode = ErrorCode::new(900);
