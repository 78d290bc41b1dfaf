//! Type references: a usage of a schema type with nullability and facets

use crate::{EdmComplexType, EdmEntityType, EdmPrimitiveKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Constraining facets of a primitive type reference
///
/// Facets shape a usage of a kind (`String` with `max_length`, `Decimal`
/// with `precision`/`scale`); they never participate in convertibility or
/// promotion, which are defined over kind identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeFacets {
    /// Maximum length for string and binary kinds
    pub max_length: Option<usize>,
    /// Significant digits for decimal and temporal kinds
    pub precision: Option<u8>,
    /// Digits right of the decimal point
    pub scale: Option<u8>,
}

/// A reference to a schema type
///
/// References are cheap to clone: entity and complex variants share their
/// definition through an `Arc`, and two references denote the same type iff
/// they point at the same definition, irrespective of nullability or facets.
#[derive(Debug, Clone)]
pub enum EdmTypeRef {
    /// Primitive kind usage
    Primitive {
        kind: EdmPrimitiveKind,
        nullable: bool,
        facets: TypeFacets,
    },
    /// Entity type usage
    Entity {
        definition: Arc<EdmEntityType>,
        nullable: bool,
    },
    /// Complex type usage
    Complex {
        definition: Arc<EdmComplexType>,
        nullable: bool,
    },
    /// Collection of a uniform element type
    Collection {
        element: Box<EdmTypeRef>,
        nullable: bool,
    },
}

impl EdmTypeRef {
    // === Constructors ===

    /// Create a primitive reference with default facets
    pub fn primitive(kind: EdmPrimitiveKind, nullable: bool) -> Self {
        Self::Primitive {
            kind,
            nullable,
            facets: TypeFacets::default(),
        }
    }

    /// Create a primitive reference with explicit facets
    pub fn primitive_with_facets(kind: EdmPrimitiveKind, nullable: bool, facets: TypeFacets) -> Self {
        Self::Primitive {
            kind,
            nullable,
            facets,
        }
    }

    /// Create an `Edm.Boolean` reference
    pub fn boolean(nullable: bool) -> Self {
        Self::primitive(EdmPrimitiveKind::Boolean, nullable)
    }

    /// Create an `Edm.String` reference
    pub fn string(nullable: bool) -> Self {
        Self::primitive(EdmPrimitiveKind::String, nullable)
    }

    /// Create an `Edm.Int32` reference
    pub fn int32(nullable: bool) -> Self {
        Self::primitive(EdmPrimitiveKind::Int32, nullable)
    }

    /// Create an `Edm.Int64` reference
    pub fn int64(nullable: bool) -> Self {
        Self::primitive(EdmPrimitiveKind::Int64, nullable)
    }

    /// Create an `Edm.Double` reference
    pub fn double(nullable: bool) -> Self {
        Self::primitive(EdmPrimitiveKind::Double, nullable)
    }

    /// Create an `Edm.Decimal` reference
    pub fn decimal(nullable: bool) -> Self {
        Self::primitive(EdmPrimitiveKind::Decimal, nullable)
    }

    /// Create an `Edm.Date` reference
    pub fn date(nullable: bool) -> Self {
        Self::primitive(EdmPrimitiveKind::Date, nullable)
    }

    /// Create an `Edm.DateTimeOffset` reference
    pub fn date_time_offset(nullable: bool) -> Self {
        Self::primitive(EdmPrimitiveKind::DateTimeOffset, nullable)
    }

    /// Create an entity reference
    pub fn entity(definition: &Arc<EdmEntityType>, nullable: bool) -> Self {
        Self::Entity {
            definition: Arc::clone(definition),
            nullable,
        }
    }

    /// Create a complex reference
    pub fn complex(definition: &Arc<EdmComplexType>, nullable: bool) -> Self {
        Self::Complex {
            definition: Arc::clone(definition),
            nullable,
        }
    }

    /// Create a collection reference
    pub fn collection(element: EdmTypeRef) -> Self {
        Self::Collection {
            element: Box::new(element),
            nullable: false,
        }
    }

    // === Category predicates ===

    /// Check if this references a primitive kind
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive { .. })
    }

    /// Check if this references an entity type
    pub fn is_entity(&self) -> bool {
        matches!(self, Self::Entity { .. })
    }

    /// Check if this references a complex type
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex { .. })
    }

    /// Check if this references a collection
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection { .. })
    }

    // === Accessors ===

    /// Whether the referenced value may be null
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Primitive { nullable, .. }
            | Self::Entity { nullable, .. }
            | Self::Complex { nullable, .. }
            | Self::Collection { nullable, .. } => *nullable,
        }
    }

    /// Copy of this reference with the given nullability
    pub fn with_nullable(&self, nullable: bool) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            Self::Primitive { nullable: n, .. }
            | Self::Entity { nullable: n, .. }
            | Self::Complex { nullable: n, .. }
            | Self::Collection { nullable: n, .. } => *n = nullable,
        }
        copy
    }

    /// The primitive kind, for primitive references
    pub fn primitive_kind(&self) -> Option<EdmPrimitiveKind> {
        match self {
            Self::Primitive { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The facets, for primitive references
    pub fn facets(&self) -> Option<&TypeFacets> {
        match self {
            Self::Primitive { facets, .. } => Some(facets),
            _ => None,
        }
    }

    /// The entity definition, for entity references
    pub fn entity_definition(&self) -> Option<&Arc<EdmEntityType>> {
        match self {
            Self::Entity { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// The complex definition, for complex references
    pub fn complex_definition(&self) -> Option<&Arc<EdmComplexType>> {
        match self {
            Self::Complex { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// The element type, for collection references
    pub fn element_type(&self) -> Option<&EdmTypeRef> {
        match self {
            Self::Collection { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Check if two references denote the same type
    ///
    /// Primitive references compare by kind, entity and complex references
    /// by definition identity, collections by element. Nullability and
    /// facets are not part of a type's identity.
    pub fn same_definition(&self, other: &EdmTypeRef) -> bool {
        match (self, other) {
            (Self::Primitive { kind: a, .. }, Self::Primitive { kind: b, .. }) => a == b,
            (Self::Entity { definition: a, .. }, Self::Entity { definition: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            (Self::Complex { definition: a, .. }, Self::Complex { definition: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            (Self::Collection { element: a, .. }, Self::Collection { element: b, .. }) => {
                a.same_definition(b)
            }
            _ => false,
        }
    }

    /// Qualified name of the referenced type
    pub fn full_name(&self) -> String {
        match self {
            Self::Primitive { kind, .. } => kind.to_string(),
            Self::Entity { definition, .. } => definition.full_name(),
            Self::Complex { definition, .. } => definition.full_name(),
            Self::Collection { element, .. } => format!("Collection({})", element.full_name()),
        }
    }
}

impl PartialEq for EdmTypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Primitive {
                    kind: a,
                    nullable: na,
                    facets: fa,
                },
                Self::Primitive {
                    kind: b,
                    nullable: nb,
                    facets: fb,
                },
            ) => a == b && na == nb && fa == fb,
            (
                Self::Entity {
                    definition: a,
                    nullable: na,
                },
                Self::Entity {
                    definition: b,
                    nullable: nb,
                },
            ) => Arc::ptr_eq(a, b) && na == nb,
            (
                Self::Complex {
                    definition: a,
                    nullable: na,
                },
                Self::Complex {
                    definition: b,
                    nullable: nb,
                },
            ) => Arc::ptr_eq(a, b) && na == nb,
            (
                Self::Collection {
                    element: a,
                    nullable: na,
                },
                Self::Collection {
                    element: b,
                    nullable: nb,
                },
            ) => a == b && na == nb,
            _ => false,
        }
    }
}

impl Eq for EdmTypeRef {}

impl fmt::Display for EdmTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
