//! Implicit type promotion for query operators
//!
//! Operator legality is decided per family: equality accepts related entity
//! types, identical complex definitions, and compatible primitive kinds;
//! ordering accepts compatible primitives; arithmetic accepts numeric
//! primitives; logical accepts booleans. An operand with no static type (an
//! open property or a null literal) never makes an expression illegal on its
//! own.
//!
//! Promotion reports, it does not reject: an unsupported pairing comes back
//! as [`BinaryPromotion::Unsupported`] with the operand types untouched, and
//! the caller decides what diagnostic to raise.

use std::sync::Arc;

use odata_edm::{EdmPrimitiveKind, EdmTypeRef};

use crate::node::QueryNode;
use crate::operator::{BinaryOperator, OperatorFamily, UnaryOperator};

/// Outcome of promoting the operands of a binary operator
///
/// Both variants carry the operand types after the attempt. On
/// [`Supported`](Self::Supported) the two sides hold the common promoted
/// type (or `None` when neither side had a static type); on
/// [`Unsupported`](Self::Unsupported) they hold the operands' original
/// static types, unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryPromotion {
    Supported {
        left: Option<EdmTypeRef>,
        right: Option<EdmTypeRef>,
    },
    Unsupported {
        left: Option<EdmTypeRef>,
        right: Option<EdmTypeRef>,
    },
}

impl BinaryPromotion {
    /// Whether the operator is legal over these operands
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported { .. })
    }

    /// The left operand type after the promotion attempt
    pub fn left(&self) -> Option<&EdmTypeRef> {
        match self {
            Self::Supported { left, .. } | Self::Unsupported { left, .. } => left.as_ref(),
        }
    }

    /// The right operand type after the promotion attempt
    pub fn right(&self) -> Option<&EdmTypeRef> {
        match self {
            Self::Supported { right, .. } | Self::Unsupported { right, .. } => right.as_ref(),
        }
    }
}

/// Outcome of promoting the operand of a unary operator
///
/// The operand type is never rewritten; the variants only record legality.
#[derive(Debug, Clone, PartialEq)]
pub enum UnaryPromotion {
    Supported { operand: Option<EdmTypeRef> },
    Unsupported { operand: Option<EdmTypeRef> },
}

impl UnaryPromotion {
    /// Whether the operator is legal over this operand
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported { .. })
    }

    /// The operand type
    pub fn operand(&self) -> Option<&EdmTypeRef> {
        match self {
            Self::Supported { operand } | Self::Unsupported { operand } => operand.as_ref(),
        }
    }
}

/// Decides operator legality and computes promoted operand types
#[derive(Debug, Default, Clone, Copy)]
pub struct TypePromoter;

impl TypePromoter {
    pub fn new() -> Self {
        Self
    }

    /// Promote both operands of a binary operator
    pub fn promote_binary_operands(
        &self,
        op: BinaryOperator,
        left: &dyn QueryNode,
        right: &dyn QueryNode,
    ) -> BinaryPromotion {
        let left = left.static_type().cloned();
        let right = right.static_type().cloned();
        match op.family() {
            OperatorFamily::Equality => promote_equality(left, right),
            OperatorFamily::Ordering => promote_primitive_family(left, right, |_| true),
            OperatorFamily::Arithmetic => {
                promote_primitive_family(left, right, |kind| kind.is_numeric())
            }
            OperatorFamily::Logical => promote_primitive_family(left, right, |kind| {
                matches!(kind, EdmPrimitiveKind::Boolean)
            }),
        }
    }

    /// Promote the operand of a unary operator
    ///
    /// `Negate` requires a numeric primitive, `Not` a boolean; an absent
    /// static type passes through as supported. The operand type is left
    /// unchanged either way.
    pub fn promote_unary_operand(
        &self,
        op: UnaryOperator,
        operand: &dyn QueryNode,
    ) -> UnaryPromotion {
        let operand = operand.static_type().cloned();
        let admits: fn(EdmPrimitiveKind) -> bool = match op {
            UnaryOperator::Negate => |kind| kind.is_numeric(),
            UnaryOperator::Not => |kind| matches!(kind, EdmPrimitiveKind::Boolean),
        };
        match &operand {
            None => UnaryPromotion::Supported { operand },
            Some(type_ref) if type_ref.primitive_kind().is_some_and(admits) => {
                UnaryPromotion::Supported { operand }
            }
            Some(_) => UnaryPromotion::Unsupported { operand },
        }
    }

    /// Whether a value of `source` type is implicitly usable where `target`
    /// is expected
    ///
    /// Primitives convert per [`can_promote_kind`], ignoring facets and
    /// nullability. Entity and complex references convert to themselves or
    /// to any ancestor definition. Collections convert element-wise.
    /// Cross-category conversions never hold.
    pub fn can_convert_to(&self, source: &EdmTypeRef, target: &EdmTypeRef) -> bool {
        if let (Some(from), Some(to)) = (source.primitive_kind(), target.primitive_kind()) {
            return can_promote_kind(from, to);
        }
        if let (Some(from), Some(to)) = (source.entity_definition(), target.entity_definition()) {
            return from.is_or_derives_from(to);
        }
        if let (Some(from), Some(to)) = (source.complex_definition(), target.complex_definition()) {
            return from.is_or_derives_from(to);
        }
        if let (Some(from), Some(to)) = (source.element_type(), target.element_type()) {
            return self.can_convert_to(from, to);
        }
        false
    }
}

/// Directed primitive promotion: can a `from` value be widened to `to`?
///
/// Identical kinds always promote. Integrals widen to strictly larger
/// integrals (`SByte` and `Byte` share a width and never convert to each
/// other) and to `Decimal`, `Single`, or `Double`. `Single` widens to
/// `Double`, but `Decimal` never converts to or from either. `Date` widens
/// to `DateTimeOffset`. Every other kind converts only to itself.
pub fn can_promote_kind(from: EdmPrimitiveKind, to: EdmPrimitiveKind) -> bool {
    use EdmPrimitiveKind::{Date, DateTimeOffset, Decimal, Double, Single};

    if from == to {
        return true;
    }
    if from.is_integral() {
        if to.is_integral() {
            return match (from.integral_rank(), to.integral_rank()) {
                (Some(narrow), Some(wide)) => narrow < wide,
                _ => false,
            };
        }
        return matches!(to, Decimal | Single | Double);
    }
    matches!((from, to), (Single, Double) | (Date, DateTimeOffset))
}

/// Undirected primitive promotion: the common kind both operands widen to
///
/// Returns the wider of the two when one direction converts, and `Int16`
/// for the signed/unsigned byte pairing, which no single byte kind can
/// hold. Returns `None` when the kinds share no common type, notably
/// `Decimal` with `Single` or `Double`.
pub fn promote_primitive_kinds(
    a: EdmPrimitiveKind,
    b: EdmPrimitiveKind,
) -> Option<EdmPrimitiveKind> {
    use EdmPrimitiveKind::{Byte, Int16, SByte};

    if a == b {
        return Some(a);
    }
    if matches!((a, b), (SByte, Byte) | (Byte, SByte)) {
        return Some(Int16);
    }
    if can_promote_kind(a, b) {
        return Some(b);
    }
    if can_promote_kind(b, a) {
        return Some(a);
    }
    None
}

fn promote_equality(left: Option<EdmTypeRef>, right: Option<EdmTypeRef>) -> BinaryPromotion {
    let (left, right) = match (left, right) {
        // A null literal or open property compares against anything.
        (None, None) => {
            return BinaryPromotion::Supported {
                left: None,
                right: None,
            };
        }
        (Some(concrete), None) | (None, Some(concrete)) => {
            return BinaryPromotion::Supported {
                left: Some(concrete.clone()),
                right: Some(concrete),
            };
        }
        (Some(left), Some(right)) => (left, right),
    };

    let nullable = left.is_nullable() || right.is_nullable();

    if let (Some(from), Some(to)) = (left.primitive_kind(), right.primitive_kind()) {
        if let Some(promoted) = promote_primitive_kinds(from, to) {
            let common = EdmTypeRef::primitive(promoted, nullable);
            return BinaryPromotion::Supported {
                left: Some(common.clone()),
                right: Some(common),
            };
        }
        return BinaryPromotion::Unsupported {
            left: Some(left),
            right: Some(right),
        };
    }

    if let (Some(left_def), Some(right_def)) =
        (left.entity_definition(), right.entity_definition())
    {
        // Related entity types widen toward the ancestor definition.
        let ancestor = if left_def.is_or_derives_from(right_def) {
            Some(right_def)
        } else if right_def.is_or_derives_from(left_def) {
            Some(left_def)
        } else {
            None
        };
        if let Some(definition) = ancestor {
            let common = EdmTypeRef::entity(definition, nullable);
            return BinaryPromotion::Supported {
                left: Some(common.clone()),
                right: Some(common),
            };
        }
        return BinaryPromotion::Unsupported {
            left: Some(left),
            right: Some(right),
        };
    }

    if let (Some(left_def), Some(right_def)) =
        (left.complex_definition(), right.complex_definition())
    {
        if Arc::ptr_eq(left_def, right_def) {
            let common = EdmTypeRef::complex(left_def, nullable);
            return BinaryPromotion::Supported {
                left: Some(common.clone()),
                right: Some(common),
            };
        }
    }

    BinaryPromotion::Unsupported {
        left: Some(left),
        right: Some(right),
    }
}

fn promote_primitive_family(
    left: Option<EdmTypeRef>,
    right: Option<EdmTypeRef>,
    admits: fn(EdmPrimitiveKind) -> bool,
) -> BinaryPromotion {
    match (left, right) {
        (None, None) => BinaryPromotion::Supported {
            left: None,
            right: None,
        },
        (Some(concrete), None) => {
            if concrete.primitive_kind().is_some_and(admits) {
                BinaryPromotion::Supported {
                    left: Some(concrete.clone()),
                    right: Some(concrete),
                }
            } else {
                BinaryPromotion::Unsupported {
                    left: Some(concrete),
                    right: None,
                }
            }
        }
        (None, Some(concrete)) => {
            if concrete.primitive_kind().is_some_and(admits) {
                BinaryPromotion::Supported {
                    left: Some(concrete.clone()),
                    right: Some(concrete),
                }
            } else {
                BinaryPromotion::Unsupported {
                    left: None,
                    right: Some(concrete),
                }
            }
        }
        (Some(left), Some(right)) => {
            if let (Some(from), Some(to)) = (left.primitive_kind(), right.primitive_kind()) {
                if admits(from) && admits(to) {
                    if let Some(promoted) = promote_primitive_kinds(from, to) {
                        let nullable = left.is_nullable() || right.is_nullable();
                        let common = EdmTypeRef::primitive(promoted, nullable);
                        return BinaryPromotion::Supported {
                            left: Some(common.clone()),
                            right: Some(common),
                        };
                    }
                }
            }
            BinaryPromotion::Unsupported {
                left: Some(left),
                right: Some(right),
            }
        }
    }
}
