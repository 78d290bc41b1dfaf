//! Primitive kinds of the Entity Data Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// The primitive kinds an EDM schema can reference
///
/// Kinds classify values; they carry no facets or nullability, which belong
/// to the type reference wrapping a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdmPrimitiveKind {
    /// Fixed- or variable-length binary data
    Binary,
    /// True/false
    Boolean,
    /// Unsigned 8-bit integer
    Byte,
    /// Date without a time-of-day component
    Date,
    /// Point in time with offset from UTC
    DateTimeOffset,
    /// Numeric value with fixed precision and scale
    Decimal,
    /// IEEE 754 binary64 floating point
    Double,
    /// Signed duration in days, hours, minutes, and (sub)seconds
    Duration,
    /// 16-byte globally unique identifier
    Guid,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// Signed 8-bit integer
    SByte,
    /// IEEE 754 binary32 floating point
    Single,
    /// Binary data stream
    Stream,
    /// Unicode text
    String,
    /// Clock time without a date component
    TimeOfDay,
}

impl EdmPrimitiveKind {
    /// All primitive kinds, in qualified-name order
    pub const ALL: [EdmPrimitiveKind; 17] = [
        Self::Binary,
        Self::Boolean,
        Self::Byte,
        Self::Date,
        Self::DateTimeOffset,
        Self::Decimal,
        Self::Double,
        Self::Duration,
        Self::Guid,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::SByte,
        Self::Single,
        Self::Stream,
        Self::String,
        Self::TimeOfDay,
    ];

    /// Get the simple name of this kind
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Date => "Date",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::Duration => "Duration",
            Self::Guid => "Guid",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::SByte => "SByte",
            Self::Single => "Single",
            Self::Stream => "Stream",
            Self::String => "String",
            Self::TimeOfDay => "TimeOfDay",
        }
    }

    /// Parse a qualified name such as `Edm.Int32`
    pub fn from_qualified_name(name: &str) -> Option<Self> {
        let simple = name.strip_prefix("Edm.")?;
        Self::ALL.iter().copied().find(|kind| kind.name() == simple)
    }

    /// Check if this is a signed or unsigned integral kind
    pub const fn is_integral(&self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Int16 | Self::Int32 | Self::Int64 | Self::SByte
        )
    }

    /// Check if this is a floating-point kind
    pub const fn is_floating(&self) -> bool {
        matches!(self, Self::Single | Self::Double)
    }

    /// Check if this kind participates in arithmetic
    pub const fn is_numeric(&self) -> bool {
        self.is_integral() || self.is_floating() || matches!(self, Self::Decimal)
    }

    /// Check if this is a date/time kind
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::DateTimeOffset | Self::Duration | Self::TimeOfDay
        )
    }

    /// Width rank among the integral kinds
    ///
    /// `SByte` and `Byte` share the narrowest rank; neither converts to the
    /// other, but both widen to `Int16` and beyond. Non-integral kinds have
    /// no rank: the promotion rules for `Decimal`, `Single`, and `Double`
    /// are not a total order.
    pub const fn integral_rank(&self) -> Option<u8> {
        match self {
            Self::SByte | Self::Byte => Some(1),
            Self::Int16 => Some(2),
            Self::Int32 => Some(3),
            Self::Int64 => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for EdmPrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edm.{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_qualified_names_round_trip() {
        for kind in EdmPrimitiveKind::ALL {
            assert_eq!(
                EdmPrimitiveKind::from_qualified_name(&kind.to_string()),
                Some(kind)
            );
        }
        assert_eq!(EdmPrimitiveKind::from_qualified_name("Edm.Nope"), None);
        assert_eq!(EdmPrimitiveKind::from_qualified_name("Int32"), None);
    }

    #[test]
    fn test_kind_classes() {
        assert!(EdmPrimitiveKind::Int32.is_integral());
        assert!(EdmPrimitiveKind::Byte.is_integral());
        assert!(!EdmPrimitiveKind::Decimal.is_integral());

        assert!(EdmPrimitiveKind::Decimal.is_numeric());
        assert!(EdmPrimitiveKind::Single.is_numeric());
        assert!(!EdmPrimitiveKind::String.is_numeric());

        assert!(EdmPrimitiveKind::Duration.is_temporal());
        assert!(!EdmPrimitiveKind::Guid.is_temporal());
    }

    #[test]
    fn test_integral_ranks() {
        assert_eq!(
            EdmPrimitiveKind::SByte.integral_rank(),
            EdmPrimitiveKind::Byte.integral_rank()
        );
        assert!(
            EdmPrimitiveKind::Int16.integral_rank() < EdmPrimitiveKind::Int64.integral_rank()
        );
        assert_eq!(EdmPrimitiveKind::Double.integral_rank(), None);
    }
}
