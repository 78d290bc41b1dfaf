//! Model construction errors

use odata_diagnostics::{Diagnostic, ErrorCode, ODQ0200, ODQ0201, ODQ0202};
use thiserror::Error;

/// Errors raised while building a schema model
///
/// Construction is the only fallible surface of this crate: resolution never
/// fails (it degrades to placeholder values instead). These errors indicate
/// the schema itself is contradictory and must be fixed at the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdmModelError {
    /// A type with the same qualified name is already declared
    #[error("schema type '{name}' is already declared")]
    DuplicateSchemaType {
        /// Qualified name of the colliding type
        name: String,
    },

    /// A property with the same name is already declared on the type
    #[error("property '{property}' is already declared on '{type_name}'")]
    DuplicateProperty {
        /// Qualified name of the declaring type
        type_name: String,
        /// Name of the colliding property
        property: String,
    },

    /// An entity set or singleton with the same name already exists
    #[error("navigation source '{name}' is already declared in container '{container}'")]
    DuplicateNavigationSource {
        /// Name of the entity container
        container: String,
        /// Name of the colliding source
        name: String,
    },
}

impl EdmModelError {
    /// The stable error code for this error
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateSchemaType { .. } => ODQ0200,
            Self::DuplicateProperty { .. } => ODQ0201,
            Self::DuplicateNavigationSource { .. } => ODQ0202,
        }
    }
}

impl From<EdmModelError> for Diagnostic {
    fn from(error: EdmModelError) -> Self {
        Diagnostic::error(error.code(), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odata_diagnostics::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_codes() {
        let err = EdmModelError::DuplicateSchemaType {
            name: "Demo.Person".into(),
        };
        assert_eq!(err.code(), ODQ0200);

        let err = EdmModelError::DuplicateNavigationSource {
            container: "Container".into(),
            name: "People".into(),
        };
        assert_eq!(err.code(), ODQ0202);
    }

    #[test]
    fn test_diagnostic_conversion() {
        let err = EdmModelError::DuplicateProperty {
            type_name: "Demo.Person".into(),
            property: "Name".into(),
        };
        let diag = Diagnostic::from(err);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, ODQ0201);
        assert_eq!(
            diag.message,
            "property 'Name' is already declared on 'Demo.Person'"
        );
    }
}
