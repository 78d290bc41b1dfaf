//! Semantic analysis core for OData-style queries
//!
//! This crate bundles the pieces a query binder builds on:
//! - An Entity Data Model: schema types, navigation properties, entity
//!   sets and singletons, and lazy navigation binding resolution
//! - Operator type promotion over that model
//! - Canonical function overload resolution
//! - Shared diagnostics with stable error codes
//!
//! # Example
//!
//! ```
//! use odata_query::{
//!     BinaryOperator, CanonicalFunctions, ConstantNode, EdmTypeRef, PropertyAccessNode,
//!     TypePromoter,
//! };
//!
//! // Is `Age gt 21` legal, and at what common type?
//! let promoter = TypePromoter::new();
//! let age = PropertyAccessNode::new("Age", EdmTypeRef::int32(false));
//! let limit = ConstantNode::typed("21", EdmTypeRef::int64(true));
//!
//! let outcome = promoter.promote_binary_operands(BinaryOperator::GreaterThan, &age, &limit);
//! assert!(outcome.is_supported());
//! assert_eq!(outcome.left(), Some(&EdmTypeRef::int64(true)));
//!
//! // Which overload does `substring(Name, 1, 2)` bind to?
//! let functions = CanonicalFunctions::with_uri_builtins();
//! assert!(functions.resolve("substring", 3).is_ok());
//! ```

// Re-export the member crates under stable module names
pub use odata_diagnostics as diagnostics;
pub use odata_edm as edm;
pub use odata_semantics as semantics;

// Convenience re-exports of the main entry points
pub use odata_diagnostics::{Diagnostic, ErrorCode, Severity, SourceLocation};
pub use odata_edm::{
    BindingTarget, BoundNavigationProperty, EdmComplexType, EdmEntityContainer, EdmEntityType,
    EdmModel, EdmModelError, EdmNavigationProperty, EdmNavigationSource, EdmPrimitiveKind,
    EdmTypeRef, IdentityKey, IdentitySet, NavigationSourceKind,
};
pub use odata_semantics::{
    find_by_argument_count, BinaryOperator, BinaryPromotion, CanonicalFunctions, ConstantNode,
    FunctionResolutionError, FunctionSignature, OpenPropertyAccessNode, PropertyAccessNode,
    QueryNode, TypePromoter, UnaryOperator, UnaryPromotion,
};
