//! Semantic analysis for the OData query core
//!
//! This crate decides what an operator or function call means over a
//! schema from `odata-edm`:
//! - Binary and unary operator classification into promotion families
//! - The type promoter: operator legality and the common promoted operand
//!   type, with untyped (open or null) operands passing through
//! - Canonical function signatures, the count-first overload matcher, and
//!   the URI builtin registry
//!
//! Nothing here parses query text. Callers hand in bound nodes exposing a
//! static type and get legality verdicts and promoted types back; every
//! "not supported" outcome is a value, not an error.

mod node;
mod operator;
mod promotion;
mod signature;

pub use node::*;
pub use operator::*;
pub use promotion::*;
pub use signature::*;
