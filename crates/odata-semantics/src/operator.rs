//! Query operators and their families

use serde::{Deserialize, Serialize};

/// Binary operators of the query language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// Equality
    Equal,
    /// Inequality
    NotEqual,
    /// Greater than
    GreaterThan,
    /// Greater than or equal
    GreaterThanOrEqual,
    /// Less than
    LessThan,
    /// Less than or equal
    LessThanOrEqual,
    /// Logical and
    And,
    /// Logical or
    Or,
    /// Addition
    Add,
    /// Subtraction
    Subtract,
    /// Multiplication
    Multiply,
    /// Division
    Divide,
    /// Modulo
    Modulo,
}

/// The typing family an operator promotes under
///
/// Each family has one promotion rule: equality compares values of related
/// types, ordering and arithmetic are primitive-only, logical is boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    /// Equal, NotEqual
    Equality,
    /// GreaterThan, GreaterThanOrEqual, LessThan, LessThanOrEqual
    Ordering,
    /// Add, Subtract, Multiply, Divide, Modulo
    Arithmetic,
    /// And, Or
    Logical,
}

impl BinaryOperator {
    /// The promotion family of this operator
    pub const fn family(&self) -> OperatorFamily {
        match self {
            Self::Equal | Self::NotEqual => OperatorFamily::Equality,
            Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::LessThan
            | Self::LessThanOrEqual => OperatorFamily::Ordering,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo => {
                OperatorFamily::Arithmetic
            }
            Self::And | Self::Or => OperatorFamily::Logical,
        }
    }

    /// Check if this is an equality operator
    pub const fn is_equality(&self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    /// Check if this is an ordering comparison
    pub const fn is_ordering(&self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::GreaterThanOrEqual | Self::LessThan | Self::LessThanOrEqual
        )
    }

    /// Check if this is an arithmetic operator
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo
        )
    }

    /// Check if this is a logical operator
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// The filter-expression token for this operator
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::GreaterThan => "gt",
            Self::GreaterThanOrEqual => "ge",
            Self::LessThan => "lt",
            Self::LessThanOrEqual => "le",
            Self::And => "and",
            Self::Or => "or",
            Self::Add => "add",
            Self::Subtract => "sub",
            Self::Multiply => "mul",
            Self::Divide => "div",
            Self::Modulo => "mod",
        }
    }
}

/// Unary operators of the query language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Arithmetic negation
    Negate,
    /// Logical not
    Not,
}

impl UnaryOperator {
    /// The filter-expression token for this operator
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "not",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_families_partition_the_operators() {
        assert_eq!(BinaryOperator::Equal.family(), OperatorFamily::Equality);
        assert_eq!(BinaryOperator::LessThan.family(), OperatorFamily::Ordering);
        assert_eq!(BinaryOperator::Modulo.family(), OperatorFamily::Arithmetic);
        assert_eq!(BinaryOperator::Or.family(), OperatorFamily::Logical);

        assert!(BinaryOperator::NotEqual.is_equality());
        assert!(!BinaryOperator::NotEqual.is_ordering());
        assert!(BinaryOperator::GreaterThanOrEqual.is_ordering());
        assert!(BinaryOperator::Divide.is_arithmetic());
        assert!(BinaryOperator::And.is_logical());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(BinaryOperator::Equal.symbol(), "eq");
        assert_eq!(BinaryOperator::GreaterThanOrEqual.symbol(), "ge");
        assert_eq!(BinaryOperator::Modulo.symbol(), "mod");
        assert_eq!(UnaryOperator::Not.symbol(), "not");
        assert_eq!(UnaryOperator::Negate.symbol(), "-");
    }
}
