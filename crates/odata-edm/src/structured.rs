//! Structured schema types: entity and complex type definitions
//!
//! Definitions are data nodes allocated behind `Arc`s. Inheritance is an
//! explicit optional back-reference to the base definition, fixed at
//! construction; ancestry queries walk that chain. Two definitions are the
//! same type iff they are the same allocation.

use crate::{EdmModelError, EdmTypeRef};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// A declared value-carrying property
#[derive(Debug, Clone)]
pub struct EdmStructuralProperty {
    name: String,
    type_ref: EdmTypeRef,
}

impl EdmStructuralProperty {
    /// Create a structural property
    pub fn new(name: impl Into<String>, type_ref: EdmTypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }

    /// The property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the property
    pub fn type_ref(&self) -> &EdmTypeRef {
        &self.type_ref
    }
}

/// A navigation property: a typed relationship to another entity type
///
/// Navigation properties are identity-distinct: the resolver caches key on
/// the allocation, so the `Arc` returned by
/// [`EdmEntityType::add_navigation_property`] is the property's identity.
pub struct EdmNavigationProperty {
    name: String,
    target: Arc<EdmEntityType>,
    collection: bool,
    contains_target: bool,
}

impl EdmNavigationProperty {
    /// Create a single-valued navigation property
    pub fn single(name: impl Into<String>, target: &Arc<EdmEntityType>) -> Self {
        Self {
            name: name.into(),
            target: Arc::clone(target),
            collection: false,
            contains_target: false,
        }
    }

    /// Create a collection-valued navigation property
    pub fn collection(name: impl Into<String>, target: &Arc<EdmEntityType>) -> Self {
        Self {
            name: name.into(),
            target: Arc::clone(target),
            collection: true,
            contains_target: false,
        }
    }

    /// Mark the relationship as containment (parent owns the targets)
    pub fn contained(mut self) -> Self {
        self.contains_target = true;
        self
    }

    /// The property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entity type the property navigates to
    pub fn target(&self) -> &Arc<EdmEntityType> {
        &self.target
    }

    /// Whether the property is collection-valued
    pub fn is_collection(&self) -> bool {
        self.collection
    }

    /// Whether the targets are owned by the source entity
    pub fn contains_target(&self) -> bool {
        self.contains_target
    }

    /// The type of the property as an expression would see it
    ///
    /// Single-valued relationships are nullable; collection elements are not.
    pub fn type_ref(&self) -> EdmTypeRef {
        if self.collection {
            EdmTypeRef::collection(EdmTypeRef::entity(&self.target, false))
        } else {
            EdmTypeRef::entity(&self.target, true)
        }
    }
}

impl fmt::Debug for EdmNavigationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EdmNavigationProperty({} -> {}{}{})",
            self.name,
            self.target.full_name(),
            if self.collection { ", collection" } else { "" },
            if self.contains_target { ", contained" } else { "" },
        )
    }
}

/// A property found on a structured type
#[derive(Debug, Clone)]
pub enum EdmProperty {
    /// Value-carrying property
    Structural(EdmStructuralProperty),
    /// Relationship property
    Navigation(Arc<EdmNavigationProperty>),
}

impl EdmProperty {
    /// The property name
    pub fn name(&self) -> &str {
        match self {
            Self::Structural(p) => p.name(),
            Self::Navigation(p) => p.name(),
        }
    }

    /// The type of the property
    pub fn type_ref(&self) -> EdmTypeRef {
        match self {
            Self::Structural(p) => p.type_ref().clone(),
            Self::Navigation(p) => p.type_ref(),
        }
    }
}

/// An entity type definition
///
/// Property maps are interior-mutable because relationship graphs are
/// cyclic: a type's navigation property may target the type itself, so
/// properties are added after the `Arc` exists. Base references are fixed
/// at construction, which keeps inheritance chains acyclic.
pub struct EdmEntityType {
    namespace: String,
    name: String,
    base: Option<Arc<EdmEntityType>>,
    is_open: bool,
    structural: RwLock<IndexMap<String, EdmStructuralProperty>>,
    navigation: RwLock<IndexMap<String, Arc<EdmNavigationProperty>>>,
    derived: RwLock<Vec<Weak<EdmEntityType>>>,
}

impl EdmEntityType {
    /// Create a root entity type
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Arc<Self> {
        Self::build(namespace.into(), name.into(), None, false)
    }

    /// Create an entity type deriving from `base`
    pub fn derived(
        namespace: impl Into<String>,
        name: impl Into<String>,
        base: &Arc<EdmEntityType>,
    ) -> Arc<Self> {
        Self::build(namespace.into(), name.into(), Some(Arc::clone(base)), false)
    }

    /// Create an open entity type (instances accept undeclared properties)
    pub fn open(namespace: impl Into<String>, name: impl Into<String>) -> Arc<Self> {
        Self::build(namespace.into(), name.into(), None, true)
    }

    fn build(
        namespace: String,
        name: String,
        base: Option<Arc<EdmEntityType>>,
        is_open: bool,
    ) -> Arc<Self> {
        let ty = Arc::new(Self {
            namespace,
            name,
            base,
            is_open,
            structural: RwLock::new(IndexMap::new()),
            navigation: RwLock::new(IndexMap::new()),
            derived: RwLock::new(Vec::new()),
        });
        if let Some(base) = &ty.base {
            base.derived.write().push(Arc::downgrade(&ty));
        }
        ty
    }

    // === Identity ===

    /// The schema namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The simple type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace-qualified name
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// The base type, if any
    pub fn base_type(&self) -> Option<&Arc<EdmEntityType>> {
        self.base.as_ref()
    }

    /// Whether instances accept undeclared (open) properties
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Directly derived types registered so far
    pub fn derived_types(&self) -> Vec<Arc<EdmEntityType>> {
        self.derived.read().iter().filter_map(Weak::upgrade).collect()
    }

    // === Construction ===

    /// Declare a structural property
    pub fn add_structural_property(
        &self,
        name: impl Into<String>,
        type_ref: EdmTypeRef,
    ) -> Result<(), EdmModelError> {
        let name = name.into();
        if self.declares(&name) {
            return Err(EdmModelError::DuplicateProperty {
                type_name: self.full_name(),
                property: name,
            });
        }
        self.structural
            .write()
            .insert(name.clone(), EdmStructuralProperty::new(name, type_ref));
        Ok(())
    }

    /// Declare a navigation property, returning its identity handle
    pub fn add_navigation_property(
        &self,
        property: EdmNavigationProperty,
    ) -> Result<Arc<EdmNavigationProperty>, EdmModelError> {
        if self.declares(property.name()) {
            return Err(EdmModelError::DuplicateProperty {
                type_name: self.full_name(),
                property: property.name().to_string(),
            });
        }
        let property = Arc::new(property);
        self.navigation
            .write()
            .insert(property.name().to_string(), Arc::clone(&property));
        Ok(property)
    }

    fn declares(&self, name: &str) -> bool {
        self.structural.read().contains_key(name) || self.navigation.read().contains_key(name)
    }

    // === Queries ===

    /// Find a property by name, walking the base-type chain
    pub fn find_property(&self, name: &str) -> Option<EdmProperty> {
        if let Some(p) = self.structural.read().get(name) {
            return Some(EdmProperty::Structural(p.clone()));
        }
        if let Some(p) = self.navigation.read().get(name) {
            return Some(EdmProperty::Navigation(Arc::clone(p)));
        }
        self.base.as_ref().and_then(|base| base.find_property(name))
    }

    /// Find a navigation property by name, walking the base-type chain
    pub fn find_navigation_property(&self, name: &str) -> Option<Arc<EdmNavigationProperty>> {
        if let Some(p) = self.navigation.read().get(name) {
            return Some(Arc::clone(p));
        }
        self.base
            .as_ref()
            .and_then(|base| base.find_navigation_property(name))
    }

    /// Check if this type is `ancestor` or transitively derives from it
    pub fn is_or_derives_from(&self, ancestor: &Arc<EdmEntityType>) -> bool {
        if std::ptr::eq(self, Arc::as_ptr(ancestor)) {
            return true;
        }
        let mut current = self.base.as_ref();
        while let Some(ty) = current {
            if Arc::ptr_eq(ty, ancestor) {
                return true;
            }
            current = ty.base.as_ref();
        }
        false
    }

    /// All strict ancestors, nearest first
    pub fn ancestors(&self) -> Vec<Arc<EdmEntityType>> {
        let mut chain = Vec::new();
        let mut current = self.base.clone();
        while let Some(ty) = current {
            chain.push(Arc::clone(&ty));
            current = ty.base.clone();
        }
        chain
    }
}

impl fmt::Debug for EdmEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdmEntityType({})", self.full_name())
    }
}

/// A complex type definition: structured value without identity
///
/// Complex types carry structural properties and may inherit, but never
/// declare navigation properties and never back entity sets.
pub struct EdmComplexType {
    namespace: String,
    name: String,
    base: Option<Arc<EdmComplexType>>,
    structural: RwLock<IndexMap<String, EdmStructuralProperty>>,
}

impl EdmComplexType {
    /// Create a root complex type
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Arc<Self> {
        Self::build(namespace.into(), name.into(), None)
    }

    /// Create a complex type deriving from `base`
    pub fn derived(
        namespace: impl Into<String>,
        name: impl Into<String>,
        base: &Arc<EdmComplexType>,
    ) -> Arc<Self> {
        Self::build(namespace.into(), name.into(), Some(Arc::clone(base)))
    }

    fn build(namespace: String, name: String, base: Option<Arc<EdmComplexType>>) -> Arc<Self> {
        Arc::new(Self {
            namespace,
            name,
            base,
            structural: RwLock::new(IndexMap::new()),
        })
    }

    /// The schema namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The simple type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace-qualified name
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// The base type, if any
    pub fn base_type(&self) -> Option<&Arc<EdmComplexType>> {
        self.base.as_ref()
    }

    /// Declare a structural property
    pub fn add_structural_property(
        &self,
        name: impl Into<String>,
        type_ref: EdmTypeRef,
    ) -> Result<(), EdmModelError> {
        let name = name.into();
        if self.structural.read().contains_key(&name) {
            return Err(EdmModelError::DuplicateProperty {
                type_name: self.full_name(),
                property: name,
            });
        }
        self.structural
            .write()
            .insert(name.clone(), EdmStructuralProperty::new(name, type_ref));
        Ok(())
    }

    /// Find a property by name, walking the base-type chain
    pub fn find_property(&self, name: &str) -> Option<EdmStructuralProperty> {
        if let Some(p) = self.structural.read().get(name) {
            return Some(p.clone());
        }
        self.base.as_ref().and_then(|base| base.find_property(name))
    }

    /// Check if this type is `ancestor` or transitively derives from it
    pub fn is_or_derives_from(&self, ancestor: &Arc<EdmComplexType>) -> bool {
        if std::ptr::eq(self, Arc::as_ptr(ancestor)) {
            return true;
        }
        let mut current = self.base.as_ref();
        while let Some(ty) = current {
            if Arc::ptr_eq(ty, ancestor) {
                return true;
            }
            current = ty.base.as_ref();
        }
        false
    }
}

impl fmt::Debug for EdmComplexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdmComplexType({})", self.full_name())
    }
}
