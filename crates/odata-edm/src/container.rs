//! The entity container: named entry points into the model

use crate::{EdmEntityType, EdmModelError, EdmNavigationSource};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// The container of a model's entity sets and singletons
///
/// Sets and singletons share one name space: a set and a singleton may not
/// carry the same name. Lookup methods are the surface binding resolution
/// works against.
pub struct EdmEntityContainer {
    name: String,
    entity_sets: RwLock<IndexMap<String, Arc<EdmNavigationSource>>>,
    singletons: RwLock<IndexMap<String, Arc<EdmNavigationSource>>>,
}

impl EdmEntityContainer {
    /// Create an empty container
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_sets: RwLock::new(IndexMap::new()),
            singletons: RwLock::new(IndexMap::new()),
        }
    }

    /// The container name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare an entity set holding instances of `element_type`
    pub fn add_entity_set(
        &self,
        name: impl Into<String>,
        element_type: &Arc<EdmEntityType>,
    ) -> Result<Arc<EdmNavigationSource>, EdmModelError> {
        let name = name.into();
        if self.declares(&name) {
            return Err(EdmModelError::DuplicateNavigationSource {
                container: self.name.clone(),
                name,
            });
        }
        let source = EdmNavigationSource::entity_set(name.clone(), element_type);
        self.entity_sets.write().insert(name, Arc::clone(&source));
        Ok(source)
    }

    /// Declare a singleton holding one instance of `element_type`
    pub fn add_singleton(
        &self,
        name: impl Into<String>,
        element_type: &Arc<EdmEntityType>,
    ) -> Result<Arc<EdmNavigationSource>, EdmModelError> {
        let name = name.into();
        if self.declares(&name) {
            return Err(EdmModelError::DuplicateNavigationSource {
                container: self.name.clone(),
                name,
            });
        }
        let source = EdmNavigationSource::singleton(name.clone(), element_type);
        self.singletons.write().insert(name, Arc::clone(&source));
        Ok(source)
    }

    fn declares(&self, name: &str) -> bool {
        self.entity_sets.read().contains_key(name) || self.singletons.read().contains_key(name)
    }

    /// Look up an entity set by name
    pub fn find_entity_set(&self, name: &str) -> Option<Arc<EdmNavigationSource>> {
        self.entity_sets.read().get(name).map(Arc::clone)
    }

    /// Look up a singleton by name
    pub fn find_singleton(&self, name: &str) -> Option<Arc<EdmNavigationSource>> {
        self.singletons.read().get(name).map(Arc::clone)
    }

    /// All declared entity sets, in declaration order
    pub fn entity_sets(&self) -> Vec<Arc<EdmNavigationSource>> {
        self.entity_sets.read().values().map(Arc::clone).collect()
    }

    /// All declared singletons, in declaration order
    pub fn singletons(&self) -> Vec<Arc<EdmNavigationSource>> {
        self.singletons.read().values().map(Arc::clone).collect()
    }
}

impl fmt::Debug for EdmEntityContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EdmEntityContainer({}, {} set(s), {} singleton(s))",
            self.name,
            self.entity_sets.read().len(),
            self.singletons.read().len()
        )
    }
}
