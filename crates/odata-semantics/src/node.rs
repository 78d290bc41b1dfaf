//! Query expression nodes as the promotion engine sees them
//!
//! The binder that builds full expression trees lives elsewhere; promotion
//! only needs one capability from a node, its static type. Open property
//! accesses have none, and a null literal is likewise untyped.

use odata_edm::EdmTypeRef;
use std::fmt;

/// A node of the bound query tree, reduced to its typing capability
///
/// `static_type` returns `None` when the node's type is unknown until
/// runtime: an open (undeclared) property access or a null literal.
pub trait QueryNode: fmt::Debug {
    /// The statically known type of this node, if any
    fn static_type(&self) -> Option<&EdmTypeRef>;
}

/// Access to a property declared in the schema
#[derive(Debug, Clone)]
pub struct PropertyAccessNode {
    name: String,
    type_ref: EdmTypeRef,
}

impl PropertyAccessNode {
    /// Create a property access with the property's declared type
    pub fn new(name: impl Into<String>, type_ref: EdmTypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }

    /// The accessed property name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl QueryNode for PropertyAccessNode {
    fn static_type(&self) -> Option<&EdmTypeRef> {
        Some(&self.type_ref)
    }
}

/// Access to a dynamic property on an open type
///
/// The property is not declared in the schema, so its type is unknown until
/// a value arrives at runtime.
#[derive(Debug, Clone)]
pub struct OpenPropertyAccessNode {
    name: String,
}

impl OpenPropertyAccessNode {
    /// Create an open property access
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The accessed property name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl QueryNode for OpenPropertyAccessNode {
    fn static_type(&self) -> Option<&EdmTypeRef> {
        None
    }
}

/// A literal value in the query text
#[derive(Debug, Clone)]
pub struct ConstantNode {
    text: String,
    type_ref: Option<EdmTypeRef>,
}

impl ConstantNode {
    /// Create a typed literal from its query text
    pub fn typed(text: impl Into<String>, type_ref: EdmTypeRef) -> Self {
        Self {
            text: text.into(),
            type_ref: Some(type_ref),
        }
    }

    /// Create the `null` literal, which carries no type
    pub fn null() -> Self {
        Self {
            text: "null".to_string(),
            type_ref: None,
        }
    }

    /// The literal text as written in the query
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl QueryNode for ConstantNode {
    fn static_type(&self) -> Option<&EdmTypeRef> {
        self.type_ref.as_ref()
    }
}
