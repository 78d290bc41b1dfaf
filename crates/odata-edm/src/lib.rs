//! Entity Data Model for the OData query core
//!
//! This crate provides the schema surface semantic analysis works against:
//! - Primitive kinds and type references with nullability and facets
//! - Entity and complex type definitions with explicit inheritance chains
//! - Navigation properties, sources (entity sets and singletons), and the
//!   entity container
//! - The navigation binding resolver, with lazy compute-once caches and
//!   inert placeholder values for everything that does not resolve
//! - Identity-keyed containers used by resolution bookkeeping
//!
//! Schema documents are parsed elsewhere; models are built in code through
//! the declaration API, which is what a CSDL reader would drive.

mod container;
mod error;
mod identity;
mod kind;
mod model;
mod source;
mod structured;
mod type_ref;

pub use container::*;
pub use error::*;
pub use identity::*;
pub use kind::*;
pub use model::*;
pub use source::*;
pub use structured::*;
pub use type_ref::*;
