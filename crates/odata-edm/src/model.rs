//! The schema model and the navigation binding resolver
//!
//! The resolver lives here rather than on the sources because resolving a
//! binding needs the whole schema surface: entity types for down-cast
//! segments and the container for target names. The resolved state itself
//! is cached on the sources, computed at most once.

use crate::{
    BindingTarget, BoundNavigationProperty, EdmComplexType, EdmEntityContainer, EdmEntityType,
    EdmModelError, EdmNavigationProperty, EdmNavigationSource, IdentitySet,
    NavigationPropertyBinding, UnresolvedNavigationProperty, UnresolvedPath, UnresolvedSource,
};
use indexmap::IndexMap;
use log::debug;
use odata_diagnostics::{Diagnostic, SourceLocation, ODQ0300, ODQ0301, ODQ0302};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// An Entity Data Model: declared types plus the entity container
///
/// Types are keyed by qualified name (`Demo.Person`) in declaration order.
/// Declaration rejects duplicates; everything else on the model is a query.
pub struct EdmModel {
    namespace: String,
    entity_types: RwLock<IndexMap<String, Arc<EdmEntityType>>>,
    complex_types: RwLock<IndexMap<String, Arc<EdmComplexType>>>,
    container: EdmEntityContainer,
}

impl EdmModel {
    /// Create an empty model with the given schema namespace and container
    pub fn new(namespace: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entity_types: RwLock::new(IndexMap::new()),
            complex_types: RwLock::new(IndexMap::new()),
            container: EdmEntityContainer::new(container_name),
        }
    }

    /// The schema namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The entity container
    pub fn container(&self) -> &EdmEntityContainer {
        &self.container
    }

    // === Type declaration and lookup ===

    /// Declare an entity type in this schema
    pub fn declare_entity_type(&self, ty: &Arc<EdmEntityType>) -> Result<(), EdmModelError> {
        let name = ty.full_name();
        if self.declares_type(&name) {
            return Err(EdmModelError::DuplicateSchemaType { name });
        }
        self.entity_types.write().insert(name, Arc::clone(ty));
        Ok(())
    }

    /// Declare a complex type in this schema
    pub fn declare_complex_type(&self, ty: &Arc<EdmComplexType>) -> Result<(), EdmModelError> {
        let name = ty.full_name();
        if self.declares_type(&name) {
            return Err(EdmModelError::DuplicateSchemaType { name });
        }
        self.complex_types.write().insert(name, Arc::clone(ty));
        Ok(())
    }

    fn declares_type(&self, qualified: &str) -> bool {
        self.entity_types.read().contains_key(qualified)
            || self.complex_types.read().contains_key(qualified)
    }

    /// Look up an entity type by qualified name
    pub fn find_entity_type(&self, qualified: &str) -> Option<Arc<EdmEntityType>> {
        self.entity_types.read().get(qualified).map(Arc::clone)
    }

    /// Look up a complex type by qualified name
    pub fn find_complex_type(&self, qualified: &str) -> Option<Arc<EdmComplexType>> {
        self.complex_types.read().get(qualified).map(Arc::clone)
    }

    /// All declared entity types, in declaration order
    pub fn entity_types(&self) -> Vec<Arc<EdmEntityType>> {
        self.entity_types.read().values().map(Arc::clone).collect()
    }

    /// All declared complex types, in declaration order
    pub fn complex_types(&self) -> Vec<Arc<EdmComplexType>> {
        self.complex_types.read().values().map(Arc::clone).collect()
    }

    // === Binding resolution ===

    /// The materialized navigation property bindings of `source`
    ///
    /// Computed on first access from the source's declared bindings and
    /// cached on the source; every later call returns the same slice, even
    /// when first accesses race. The slice is finite and re-iterable.
    pub fn navigation_property_bindings<'s>(
        &self,
        source: &'s EdmNavigationSource,
    ) -> &'s [NavigationPropertyBinding] {
        source.materialize_with(|| {
            let declared = source.declared_bindings();
            debug!(
                "materializing {} binding(s) on '{}'",
                declared.len(),
                source.name()
            );
            declared
                .into_iter()
                .map(|decl| {
                    let property = self.resolve_binding_path(
                        source.element_type(),
                        decl.path(),
                        decl.location(),
                    );
                    let target = self.resolve_binding_target(decl.target(), decl.location());
                    NavigationPropertyBinding::new(property, target)
                })
                .collect()
        })
    }

    /// Resolve a binding path declared on `defining_type`
    ///
    /// Segments are separated by `/`. Every segment but the last either
    /// names an entity type (a down-cast, advancing to that type with no
    /// relationship check) or a navigation property on the current type
    /// (advancing to its target). The final segment must name a navigation
    /// property on the type reached. Failures return inert placeholders,
    /// never errors: a failed intermediate segment reports the original
    /// defining type, a failed final segment the type the cast chain
    /// reached.
    pub fn resolve_binding_path(
        &self,
        defining_type: &Arc<EdmEntityType>,
        path: &str,
        location: Option<SourceLocation>,
    ) -> BoundNavigationProperty {
        if path.is_empty() || path.ends_with('/') {
            return BoundNavigationProperty::UnresolvedPath(UnresolvedPath {
                defining_type: Arc::clone(defining_type),
                raw_path: path.to_string(),
                location,
            });
        }

        let segments: Vec<&str> = path.split('/').collect();
        let Some((last, rest)) = segments.split_last() else {
            return BoundNavigationProperty::UnresolvedPath(UnresolvedPath {
                defining_type: Arc::clone(defining_type),
                raw_path: path.to_string(),
                location,
            });
        };

        let mut current = Arc::clone(defining_type);
        for segment in rest {
            if let Some(cast) = self.find_entity_type(segment) {
                current = cast;
            } else if let Some(property) = current.find_navigation_property(segment) {
                current = Arc::clone(property.target());
            } else {
                return BoundNavigationProperty::UnresolvedPath(UnresolvedPath {
                    defining_type: Arc::clone(defining_type),
                    raw_path: path.to_string(),
                    location,
                });
            }
        }

        match current.find_navigation_property(last) {
            Some(property) => BoundNavigationProperty::Resolved(property),
            None => BoundNavigationProperty::UnresolvedProperty(UnresolvedNavigationProperty {
                reached_type: current,
                raw_path: path.to_string(),
                location,
            }),
        }
    }

    fn resolve_binding_target(
        &self,
        name: &str,
        location: Option<SourceLocation>,
    ) -> BindingTarget {
        if let Some(set) = self.container.find_entity_set(name) {
            return BindingTarget::Resolved(set);
        }
        if let Some(singleton) = self.container.find_singleton(name) {
            return BindingTarget::Resolved(singleton);
        }
        BindingTarget::Unresolved(UnresolvedSource {
            raw_name: name.to_string(),
            location,
        })
    }

    /// The source a navigation property leads to from `source`
    ///
    /// Non-containment properties are looked up in the materialized
    /// bindings by property identity. Containment properties, and
    /// properties with no usable binding, fall back to the per-property
    /// contained/unknown caches on `source`. This never fails: absent
    /// information degrades to a cached placeholder source.
    pub fn find_navigation_target(
        &self,
        source: &EdmNavigationSource,
        property: &Arc<EdmNavigationProperty>,
    ) -> Arc<EdmNavigationSource> {
        if !property.contains_target() {
            for binding in self.navigation_property_bindings(source) {
                let bound = binding.property().resolved();
                if bound.is_some_and(|p| Arc::ptr_eq(p, property)) {
                    if let BindingTarget::Resolved(target) = binding.target() {
                        return Arc::clone(target);
                    }
                    // Matched, but the declared target never resolved:
                    // degrade to the unknown cache like an absent binding.
                    break;
                }
            }
        }
        if property.contains_target() {
            source.contained_target(property)
        } else {
            source.unknown_target(property)
        }
    }

    /// Diagnostics for every unresolved binding reachable from the container
    ///
    /// Forces materialization on the container sources and walks resolved
    /// targets, visiting each source once; resolution state is shared with
    /// normal lookups. One diagnostic is produced per placeholder, carrying
    /// the declared location when known.
    pub fn binding_diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut visited: IdentitySet<EdmNavigationSource> = IdentitySet::new();
        let mut pending = self.container.entity_sets();
        pending.extend(self.container.singletons());

        while let Some(source) = pending.pop() {
            if !visited.insert(&source) {
                continue;
            }
            for binding in self.navigation_property_bindings(&source) {
                match binding.property() {
                    BoundNavigationProperty::Resolved(_) => {}
                    BoundNavigationProperty::UnresolvedPath(unresolved) => {
                        diagnostics.push(locate(
                            Diagnostic::error(
                                ODQ0300,
                                format!(
                                    "binding path '{}' on '{}' does not resolve from {}",
                                    unresolved.raw_path,
                                    source.name(),
                                    unresolved.defining_type.full_name()
                                ),
                            ),
                            unresolved.location,
                        ));
                    }
                    BoundNavigationProperty::UnresolvedProperty(unresolved) => {
                        diagnostics.push(locate(
                            Diagnostic::error(
                                ODQ0301,
                                format!(
                                    "binding path '{}' on '{}' names no navigation property on {}",
                                    unresolved.raw_path,
                                    source.name(),
                                    unresolved.reached_type.full_name()
                                ),
                            ),
                            unresolved.location,
                        ));
                    }
                }
                match binding.target() {
                    BindingTarget::Resolved(target) => pending.push(Arc::clone(target)),
                    BindingTarget::Unresolved(unresolved) => {
                        diagnostics.push(locate(
                            Diagnostic::error(
                                ODQ0302,
                                format!(
                                    "binding target '{}' on '{}' names neither an entity set nor a singleton",
                                    unresolved.raw_name,
                                    source.name()
                                ),
                            ),
                            unresolved.location,
                        ));
                    }
                }
            }
        }
        diagnostics
    }
}

fn locate(diagnostic: Diagnostic, location: Option<SourceLocation>) -> Diagnostic {
    match location {
        Some(location) => diagnostic.with_location(location),
        None => diagnostic,
    }
}

impl fmt::Debug for EdmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EdmModel({}, {} entity type(s), {} complex type(s))",
            self.namespace,
            self.entity_types.read().len(),
            self.complex_types.read().len()
        )
    }
}
