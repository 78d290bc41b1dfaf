//! Navigation sources and binding data
//!
//! A navigation source is something entities live in: an entity set, a
//! singleton, a contained child of another source, or the unknown sentinel
//! the resolver hands out when nothing better exists. Sources own the lazily
//! computed state of binding resolution: the full type reference, the
//! materialized bindings, and the identity-keyed contained/unknown caches.
//! Each of those is computed at most once and never mutated afterwards.

use crate::{EdmEntityType, EdmNavigationProperty, EdmTypeRef, IdentityKey};
use log::trace;
use odata_diagnostics::SourceLocation;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// How a navigation source came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationSourceKind {
    /// Declared entity set in the container
    EntitySet,
    /// Declared singleton in the container
    Singleton,
    /// Target of a containment navigation property, owned by the parent
    Contained,
    /// Sentinel for a navigation property with no binding information
    Unknown,
}

/// A raw navigation property binding as a schema author wrote it
///
/// Declarations carry the unparsed path and target name; they are resolved
/// into [`NavigationPropertyBinding`]s when the source materializes.
#[derive(Debug, Clone)]
pub struct DeclaredBinding {
    path: String,
    target: String,
    location: Option<SourceLocation>,
}

impl DeclaredBinding {
    /// Create a binding declaration
    pub fn new(
        path: impl Into<String>,
        target: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        Self {
            path: path.into(),
            target: target.into(),
            location,
        }
    }

    /// The raw binding path, e.g. `"Orders"` or `"Demo.Manager/DirectReports"`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The name of the entity set or singleton the path binds to
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Where the declaration appeared in the schema document
    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }
}

/// A binding path that did not resolve to a navigation property
///
/// Carries the type the path was declared on (the original starting type,
/// not a partially advanced one) so diagnostics can point at the mismatch.
#[derive(Debug, Clone)]
pub struct UnresolvedPath {
    /// The type the path started from
    pub defining_type: Arc<EdmEntityType>,
    /// The path exactly as declared
    pub raw_path: String,
    /// Where the declaration appeared
    pub location: Option<SourceLocation>,
}

/// A binding path whose final segment is not a navigation property
#[derive(Debug, Clone)]
pub struct UnresolvedNavigationProperty {
    /// The type the path had reached when the final segment failed
    pub reached_type: Arc<EdmEntityType>,
    /// The path exactly as declared
    pub raw_path: String,
    /// Where the declaration appeared
    pub location: Option<SourceLocation>,
}

/// A binding target name that names neither an entity set nor a singleton
#[derive(Debug, Clone)]
pub struct UnresolvedSource {
    /// The target name exactly as declared
    pub raw_name: String,
    /// Where the declaration appeared
    pub location: Option<SourceLocation>,
}

/// The navigation-property side of a materialized binding
///
/// Unresolved variants are inert values, not errors; resolution never aborts
/// model construction. A later diagnostics pass inspects them.
#[derive(Debug, Clone)]
pub enum BoundNavigationProperty {
    /// The path resolved to a declared navigation property
    Resolved(Arc<EdmNavigationProperty>),
    /// A non-final path segment failed to resolve
    UnresolvedPath(UnresolvedPath),
    /// The final segment is not a navigation property on the reached type
    UnresolvedProperty(UnresolvedNavigationProperty),
}

impl BoundNavigationProperty {
    /// The resolved property, if resolution succeeded
    pub fn resolved(&self) -> Option<&Arc<EdmNavigationProperty>> {
        match self {
            Self::Resolved(property) => Some(property),
            _ => None,
        }
    }
}

/// The target side of a materialized binding
#[derive(Debug, Clone)]
pub enum BindingTarget {
    /// The target name resolved to a container source
    Resolved(Arc<EdmNavigationSource>),
    /// The target name matched neither an entity set nor a singleton
    Unresolved(UnresolvedSource),
}

impl BindingTarget {
    /// The resolved source, if resolution succeeded
    pub fn resolved(&self) -> Option<&Arc<EdmNavigationSource>> {
        match self {
            Self::Resolved(source) => Some(source),
            Self::Unresolved(_) => None,
        }
    }
}

/// A materialized navigation property binding
///
/// Produced once per [`DeclaredBinding`] when the owning source
/// materializes; immutable afterwards.
#[derive(Debug, Clone)]
pub struct NavigationPropertyBinding {
    property: BoundNavigationProperty,
    target: BindingTarget,
}

impl NavigationPropertyBinding {
    pub(crate) fn new(property: BoundNavigationProperty, target: BindingTarget) -> Self {
        Self { property, target }
    }

    /// The navigation property the binding declares a target for
    pub fn property(&self) -> &BoundNavigationProperty {
        &self.property
    }

    /// The source the navigation property binds to
    pub fn target(&self) -> &BindingTarget {
        &self.target
    }
}

type TargetCache = RwLock<HashMap<IdentityKey<EdmNavigationProperty>, Arc<EdmNavigationSource>>>;

/// An entity set, singleton, or one of their derived placeholder sources
///
/// Sources are allocated behind `Arc`s and compared by identity. The full
/// type reference and the materialized bindings are single-assignment cells:
/// racing first accesses converge on one published value, and the value is
/// never recomputed. The contained/unknown caches key on navigation property
/// identity, so two properties with equal names on different types never
/// collide.
pub struct EdmNavigationSource {
    name: String,
    kind: NavigationSourceKind,
    element_type: Arc<EdmEntityType>,
    collection_valued: bool,
    type_ref: OnceCell<EdmTypeRef>,
    declared: RwLock<Vec<DeclaredBinding>>,
    materialized: OnceCell<Vec<NavigationPropertyBinding>>,
    contained_cache: TargetCache,
    unknown_cache: TargetCache,
}

impl EdmNavigationSource {
    /// Create an entity set holding instances of `element_type`
    pub fn entity_set(name: impl Into<String>, element_type: &Arc<EdmEntityType>) -> Arc<Self> {
        Self::build(
            name.into(),
            NavigationSourceKind::EntitySet,
            element_type,
            true,
        )
    }

    /// Create a singleton holding one instance of `element_type`
    pub fn singleton(name: impl Into<String>, element_type: &Arc<EdmEntityType>) -> Arc<Self> {
        Self::build(
            name.into(),
            NavigationSourceKind::Singleton,
            element_type,
            false,
        )
    }

    fn build(
        name: String,
        kind: NavigationSourceKind,
        element_type: &Arc<EdmEntityType>,
        collection_valued: bool,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            kind,
            element_type: Arc::clone(element_type),
            collection_valued,
            type_ref: OnceCell::new(),
            declared: RwLock::new(Vec::new()),
            materialized: OnceCell::new(),
            contained_cache: RwLock::new(HashMap::new()),
            unknown_cache: RwLock::new(HashMap::new()),
        })
    }

    fn derived(
        name: String,
        kind: NavigationSourceKind,
        property: &Arc<EdmNavigationProperty>,
    ) -> Arc<Self> {
        Self::build(name, kind, property.target(), property.is_collection())
    }

    // === Identity ===

    /// The source name as declared (or derived, for placeholder sources)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the source came to exist
    pub fn kind(&self) -> NavigationSourceKind {
        self.kind
    }

    /// The entity type of the instances the source holds
    pub fn element_type(&self) -> &Arc<EdmEntityType> {
        &self.element_type
    }

    /// The full type of the source, computed once on first access
    ///
    /// Entity sets and contained collections are collections of their
    /// element type; singletons are a single non-nullable instance; other
    /// single-valued sources may be absent and are nullable.
    pub fn type_ref(&self) -> &EdmTypeRef {
        self.type_ref.get_or_init(|| {
            let element = EdmTypeRef::entity(&self.element_type, false);
            if self.collection_valued {
                EdmTypeRef::collection(element)
            } else if self.kind == NavigationSourceKind::Singleton {
                element
            } else {
                element.with_nullable(true)
            }
        })
    }

    // === Binding declarations ===

    /// Declare a raw navigation property binding
    ///
    /// Bindings materialize at most once, on the first call to
    /// [`EdmModel::navigation_property_bindings`]; declarations made after
    /// that point are not observed.
    ///
    /// [`EdmModel::navigation_property_bindings`]: crate::EdmModel::navigation_property_bindings
    pub fn declare_binding(
        &self,
        path: impl Into<String>,
        target: impl Into<String>,
        location: Option<SourceLocation>,
    ) {
        self.declared
            .write()
            .push(DeclaredBinding::new(path, target, location));
    }

    /// Snapshot of the raw binding declarations made so far
    pub fn declared_bindings(&self) -> Vec<DeclaredBinding> {
        self.declared.read().clone()
    }

    /// The materialized bindings, if the source has materialized
    pub fn materialized_bindings(&self) -> Option<&[NavigationPropertyBinding]> {
        self.materialized.get().map(Vec::as_slice)
    }

    pub(crate) fn materialize_with(
        &self,
        compute: impl FnOnce() -> Vec<NavigationPropertyBinding>,
    ) -> &[NavigationPropertyBinding] {
        self.materialized.get_or_init(compute)
    }

    // === Identity-keyed target caches ===

    /// The contained target owned by this source for a containment property
    ///
    /// Created lazily on first lookup, keyed by property identity; every
    /// later lookup returns the same `Arc`.
    pub(crate) fn contained_target(
        &self,
        property: &Arc<EdmNavigationProperty>,
    ) -> Arc<EdmNavigationSource> {
        if let Some(hit) = self.contained_cache.read().get(&IdentityKey::new(property)) {
            return Arc::clone(hit);
        }
        let mut cache = self.contained_cache.write();
        Arc::clone(
            cache
                .entry(IdentityKey::new(property))
                .or_insert_with(|| {
                    trace!(
                        "creating contained target '{}/{}'",
                        self.name,
                        property.name()
                    );
                    Self::derived(
                        format!("{}/{}", self.name, property.name()),
                        NavigationSourceKind::Contained,
                        property,
                    )
                }),
        )
    }

    /// The sentinel unknown target for a property with no binding
    ///
    /// Same caching discipline as [`contained_target`](Self::contained_target).
    pub(crate) fn unknown_target(
        &self,
        property: &Arc<EdmNavigationProperty>,
    ) -> Arc<EdmNavigationSource> {
        if let Some(hit) = self.unknown_cache.read().get(&IdentityKey::new(property)) {
            return Arc::clone(hit);
        }
        let mut cache = self.unknown_cache.write();
        Arc::clone(
            cache
                .entry(IdentityKey::new(property))
                .or_insert_with(|| {
                    trace!(
                        "creating unknown target for '{}' on '{}'",
                        property.name(),
                        self.name
                    );
                    Self::derived(
                        property.name().to_string(),
                        NavigationSourceKind::Unknown,
                        property,
                    )
                }),
        )
    }
}

impl fmt::Debug for EdmNavigationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EdmNavigationSource({:?} '{}' of {})",
            self.kind,
            self.name,
            self.element_type.full_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn people_set() -> (Arc<EdmEntityType>, Arc<EdmNavigationSource>) {
        let person = EdmEntityType::new("Demo", "Person");
        let people = EdmNavigationSource::entity_set("People", &person);
        (person, people)
    }

    #[test]
    fn test_entity_set_type_is_collection() {
        let (person, people) = people_set();

        let ty = people.type_ref();
        assert!(ty.is_collection());
        let element = ty.element_type().expect("collection element");
        assert!(element.entity_definition().is_some_and(|d| Arc::ptr_eq(d, &person)));

        // Second access observes the same published value.
        assert!(std::ptr::eq(ty, people.type_ref()));
    }

    #[test]
    fn test_singleton_type_is_single_instance() {
        let person = EdmEntityType::new("Demo", "Person");
        let me = EdmNavigationSource::singleton("Me", &person);

        let ty = me.type_ref();
        assert_eq!(ty, &EdmTypeRef::entity(&person, false));
    }

    #[test]
    fn test_contained_target_identity_stable() {
        let (person, people) = people_set();
        let addresses = person
            .add_navigation_property(
                EdmNavigationProperty::collection("Addresses", &person).contained(),
            )
            .unwrap();

        let first = people.contained_target(&addresses);
        let second = people.contained_target(&addresses);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.kind(), NavigationSourceKind::Contained);
        assert_eq!(first.name(), "People/Addresses");
        assert!(first.type_ref().is_collection());
    }

    #[test]
    fn test_unknown_targets_keyed_by_property_identity() {
        let (person, people) = people_set();
        let dog = EdmEntityType::new("Demo", "Dog");

        // Same property name on two different types: distinct identities.
        let friend_of_person = person
            .add_navigation_property(EdmNavigationProperty::single("Friend", &person))
            .unwrap();
        let friend_of_dog = dog
            .add_navigation_property(EdmNavigationProperty::single("Friend", &dog))
            .unwrap();

        let a = people.unknown_target(&friend_of_person);
        let b = people.unknown_target(&friend_of_dog);
        assert!(!Arc::ptr_eq(&a, &b), "distinct properties must not collide");
        assert!(Arc::ptr_eq(&a, &people.unknown_target(&friend_of_person)));
        assert_eq!(a.kind(), NavigationSourceKind::Unknown);
    }

    #[test]
    fn test_declared_bindings_snapshot() {
        let (_, people) = people_set();
        assert!(people.declared_bindings().is_empty());

        people.declare_binding("Friend", "People", None);
        let declared = people.declared_bindings();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].path(), "Friend");
        assert_eq!(declared[0].target(), "People");
        assert!(people.materialized_bindings().is_none());
    }
}
