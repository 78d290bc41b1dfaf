//! Tests for operator type promotion
//!
//! Covers:
//! - Untyped operands (open properties, null literals) passing through
//! - Entity operands widening to the shared ancestor definition
//! - Complex operands requiring the exact same definition
//! - Primitive kind widening and the per-family admissibility rules
//! - Nullability OR on every supported pairing
//! - Unary negate/not admissibility
//! - can_convert_to across facets, inheritance chains, and collections

use odata_edm::{EdmComplexType, EdmEntityType, EdmPrimitiveKind, EdmTypeRef, TypeFacets};
use odata_semantics::{
    BinaryOperator, ConstantNode, OpenPropertyAccessNode, PropertyAccessNode, QueryNode,
    TypePromoter, UnaryOperator,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn property(type_ref: EdmTypeRef) -> PropertyAccessNode {
    PropertyAccessNode::new("P", type_ref)
}

// === Untyped operands ===

#[rstest]
#[case(BinaryOperator::Equal)]
#[case(BinaryOperator::NotEqual)]
fn test_equality_against_open_property_adopts_concrete_type(#[case] op: BinaryOperator) {
    let promoter = TypePromoter::new();
    let person = EdmEntityType::new("Demo", "Person");
    let address = EdmComplexType::new("Demo", "Address");

    let concrete_types = [
        EdmTypeRef::int32(false),
        EdmTypeRef::string(true),
        EdmTypeRef::boolean(false),
        EdmTypeRef::entity(&person, true),
        EdmTypeRef::complex(&address, false),
        EdmTypeRef::collection(EdmTypeRef::int32(false)),
    ];

    for type_ref in concrete_types {
        let declared = property(type_ref.clone());
        let open = OpenPropertyAccessNode::new("Dynamic");

        for (left, right) in [
            (&declared as &dyn QueryNode, &open as &dyn QueryNode),
            (&open, &declared),
        ] {
            let outcome = promoter.promote_binary_operands(op, left, right);
            assert!(outcome.is_supported(), "{op:?} over {type_ref} and open");
            assert_eq!(outcome.left(), Some(&type_ref));
            assert_eq!(outcome.right(), Some(&type_ref));
        }
    }
}

#[test]
fn test_equality_of_null_literals() {
    let promoter = TypePromoter::new();
    let null = ConstantNode::null();

    let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, &null, &null);
    assert!(outcome.is_supported());
    assert_eq!(outcome.left(), None);
    assert_eq!(outcome.right(), None);

    let age = property(EdmTypeRef::int32(false));
    let outcome = promoter.promote_binary_operands(BinaryOperator::NotEqual, &age, &null);
    assert!(outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::int32(false)));
    assert_eq!(outcome.right(), Some(&EdmTypeRef::int32(false)));
}

// === Entity operands ===

#[test]
fn test_equality_widens_related_entities_to_ancestor() {
    let promoter = TypePromoter::new();
    let person = EdmEntityType::new("Demo", "Person");
    let employee = EdmEntityType::derived("Demo", "Employee", &person);

    let base = property(EdmTypeRef::entity(&person, false));
    let derived = property(EdmTypeRef::entity(&employee, false));

    for (left, right) in [
        (&base as &dyn QueryNode, &derived as &dyn QueryNode),
        (&derived, &base),
    ] {
        let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, left, right);
        assert!(outcome.is_supported());
        assert_eq!(outcome.left(), Some(&EdmTypeRef::entity(&person, false)));
        assert_eq!(outcome.right(), Some(&EdmTypeRef::entity(&person, false)));
    }
}

#[test]
fn test_equality_rejects_unrelated_entities() {
    let promoter = TypePromoter::new();
    let person = EdmEntityType::new("Demo", "Person");
    let dog = EdmEntityType::new("Demo", "Dog");

    let left = property(EdmTypeRef::entity(&dog, true));
    let right = property(EdmTypeRef::entity(&person, false));

    let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, &left, &right);
    assert!(!outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::entity(&dog, true)));
    assert_eq!(outcome.right(), Some(&EdmTypeRef::entity(&person, false)));
}

#[test]
fn test_equality_rejects_cross_category_pairs() {
    let promoter = TypePromoter::new();
    let person = EdmEntityType::new("Demo", "Person");
    let address = EdmComplexType::new("Demo", "Address");

    let pairs = [
        (EdmTypeRef::entity(&person, true), EdmTypeRef::complex(&address, true)),
        (EdmTypeRef::int32(true), EdmTypeRef::entity(&person, true)),
        (EdmTypeRef::int32(true), EdmTypeRef::complex(&address, true)),
        (
            EdmTypeRef::collection(EdmTypeRef::int32(true)),
            EdmTypeRef::int32(true),
        ),
        (
            EdmTypeRef::collection(EdmTypeRef::entity(&person, false)),
            EdmTypeRef::entity(&person, false),
        ),
    ];

    for (a, b) in pairs {
        let first = property(a.clone());
        let second = property(b.clone());

        let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, &first, &second);
        assert!(!outcome.is_supported(), "{a} eq {b} must not be supported");
        assert_eq!(outcome.left(), Some(&a));
        assert_eq!(outcome.right(), Some(&b));

        let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, &second, &first);
        assert!(!outcome.is_supported(), "{b} eq {a} must not be supported");
        assert_eq!(outcome.left(), Some(&b));
        assert_eq!(outcome.right(), Some(&a));
    }
}

#[test]
fn test_equality_nullability_is_or_of_operands() {
    let promoter = TypePromoter::new();
    let person = EdmEntityType::new("Demo", "Person");
    let address = EdmComplexType::new("Demo", "Address");

    let required_entity = property(EdmTypeRef::entity(&person, false));
    let optional_entity = property(EdmTypeRef::entity(&person, true));
    let required_complex = property(EdmTypeRef::complex(&address, false));
    let optional_complex = property(EdmTypeRef::complex(&address, true));

    for (left, right) in [
        (&required_entity, &optional_entity),
        (&optional_entity, &required_entity),
    ] {
        let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, left, right);
        assert!(outcome.is_supported());
        assert_eq!(outcome.left(), Some(&EdmTypeRef::entity(&person, true)));
        assert_eq!(outcome.right(), Some(&EdmTypeRef::entity(&person, true)));
    }

    for (left, right) in [
        (&required_complex, &optional_complex),
        (&optional_complex, &required_complex),
    ] {
        let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, left, right);
        assert!(outcome.is_supported());
        assert_eq!(outcome.left(), Some(&EdmTypeRef::complex(&address, true)));
        assert_eq!(outcome.right(), Some(&EdmTypeRef::complex(&address, true)));
    }
}

#[test]
fn test_equality_rejects_distinct_complex_definitions() {
    let promoter = TypePromoter::new();
    let home = EdmComplexType::new("Demo", "HomeAddress");
    let work = EdmComplexType::new("Demo", "WorkAddress");

    let left = property(EdmTypeRef::complex(&home, true));
    let right = property(EdmTypeRef::complex(&work, true));

    let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, &left, &right);
    assert!(!outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::complex(&home, true)));
    assert_eq!(outcome.right(), Some(&EdmTypeRef::complex(&work, true)));
}

// === Ordering, arithmetic, logical ===

#[test]
fn test_ordering_rejects_complex_where_equality_succeeds() {
    let promoter = TypePromoter::new();
    let address = EdmComplexType::new("Demo", "Address");

    let left = property(EdmTypeRef::complex(&address, false));
    let right = property(EdmTypeRef::complex(&address, false));

    let equal = promoter.promote_binary_operands(BinaryOperator::Equal, &left, &right);
    assert!(equal.is_supported());

    let greater = promoter.promote_binary_operands(BinaryOperator::GreaterThan, &left, &right);
    assert!(!greater.is_supported());
    assert_eq!(greater.left(), Some(&EdmTypeRef::complex(&address, false)));
    assert_eq!(greater.right(), Some(&EdmTypeRef::complex(&address, false)));
}

#[test]
fn test_ordering_on_strings_is_supported() {
    let promoter = TypePromoter::new();
    let left = property(EdmTypeRef::string(false));
    let right = property(EdmTypeRef::string(true));

    let outcome = promoter.promote_binary_operands(BinaryOperator::LessThan, &left, &right);
    assert!(outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::string(true)));
    assert_eq!(outcome.right(), Some(&EdmTypeRef::string(true)));
}

#[rstest]
#[case(EdmPrimitiveKind::SByte, EdmPrimitiveKind::Byte, EdmPrimitiveKind::Int16)]
#[case(EdmPrimitiveKind::Int32, EdmPrimitiveKind::Int64, EdmPrimitiveKind::Int64)]
#[case(EdmPrimitiveKind::Int64, EdmPrimitiveKind::Single, EdmPrimitiveKind::Single)]
#[case(EdmPrimitiveKind::Int32, EdmPrimitiveKind::Decimal, EdmPrimitiveKind::Decimal)]
#[case(
    EdmPrimitiveKind::Date,
    EdmPrimitiveKind::DateTimeOffset,
    EdmPrimitiveKind::DateTimeOffset
)]
fn test_primitive_widening_through_comparison(
    #[case] a: EdmPrimitiveKind,
    #[case] b: EdmPrimitiveKind,
    #[case] expected: EdmPrimitiveKind,
) {
    let promoter = TypePromoter::new();
    let left = property(EdmTypeRef::primitive(a, false));
    let right = property(EdmTypeRef::primitive(b, true));

    for (first, second) in [(&left, &right), (&right, &left)] {
        let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, first, second);
        assert!(outcome.is_supported(), "{a} eq {b} should be supported");
        assert_eq!(outcome.left(), Some(&EdmTypeRef::primitive(expected, true)));
        assert_eq!(outcome.right(), Some(&EdmTypeRef::primitive(expected, true)));
    }
}

#[rstest]
#[case(EdmPrimitiveKind::Decimal, EdmPrimitiveKind::Double)]
#[case(EdmPrimitiveKind::Decimal, EdmPrimitiveKind::Single)]
#[case(EdmPrimitiveKind::String, EdmPrimitiveKind::Int32)]
#[case(EdmPrimitiveKind::Boolean, EdmPrimitiveKind::Guid)]
fn test_incompatible_primitive_kinds_stay_unchanged(
    #[case] a: EdmPrimitiveKind,
    #[case] b: EdmPrimitiveKind,
) {
    let promoter = TypePromoter::new();
    let left = property(EdmTypeRef::primitive(a, false));
    let right = property(EdmTypeRef::primitive(b, true));

    let outcome = promoter.promote_binary_operands(BinaryOperator::Equal, &left, &right);
    assert!(!outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::primitive(a, false)));
    assert_eq!(outcome.right(), Some(&EdmTypeRef::primitive(b, true)));
}

#[test]
fn test_arithmetic_requires_numeric_operands() {
    let promoter = TypePromoter::new();

    let int32 = property(EdmTypeRef::int32(false));
    let int64 = property(EdmTypeRef::int64(false));
    let outcome = promoter.promote_binary_operands(BinaryOperator::Add, &int32, &int64);
    assert!(outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::int64(false)));

    let flag = property(EdmTypeRef::boolean(true));
    let outcome = promoter.promote_binary_operands(BinaryOperator::Add, &flag, &flag);
    assert!(!outcome.is_supported());

    let name = property(EdmTypeRef::string(true));
    let outcome = promoter.promote_binary_operands(BinaryOperator::Subtract, &name, &name);
    assert!(!outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::string(true)));

    // Pass-through only holds when the concrete side is admissible.
    let null = ConstantNode::null();
    let outcome = promoter.promote_binary_operands(BinaryOperator::Multiply, &int32, &null);
    assert!(outcome.is_supported());
    assert_eq!(outcome.right(), Some(&EdmTypeRef::int32(false)));

    let outcome = promoter.promote_binary_operands(BinaryOperator::Multiply, &name, &null);
    assert!(!outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::string(true)));
    assert_eq!(outcome.right(), None);
}

#[test]
fn test_logical_requires_boolean_operands() {
    let promoter = TypePromoter::new();

    let flag = property(EdmTypeRef::boolean(false));
    let optional_flag = property(EdmTypeRef::boolean(true));
    let outcome = promoter.promote_binary_operands(BinaryOperator::And, &flag, &optional_flag);
    assert!(outcome.is_supported());
    assert_eq!(outcome.left(), Some(&EdmTypeRef::boolean(true)));

    let age = property(EdmTypeRef::int32(false));
    let outcome = promoter.promote_binary_operands(BinaryOperator::And, &age, &flag);
    assert!(!outcome.is_supported());

    let name = property(EdmTypeRef::string(true));
    let outcome = promoter.promote_binary_operands(BinaryOperator::Or, &name, &name);
    assert!(!outcome.is_supported());

    let null = ConstantNode::null();
    let outcome = promoter.promote_binary_operands(BinaryOperator::Or, &flag, &null);
    assert!(outcome.is_supported());
    assert_eq!(outcome.right(), Some(&EdmTypeRef::boolean(false)));
}

// === Unary operators ===

#[test]
fn test_negate_admissibility() {
    let promoter = TypePromoter::new();
    let address = EdmComplexType::new("Demo", "Address");

    let age = property(EdmTypeRef::int32(false));
    let outcome = promoter.promote_unary_operand(UnaryOperator::Negate, &age);
    assert!(outcome.is_supported());
    assert_eq!(outcome.operand(), Some(&EdmTypeRef::int32(false)));

    let price = property(EdmTypeRef::decimal(true));
    assert!(promoter
        .promote_unary_operand(UnaryOperator::Negate, &price)
        .is_supported());

    for kind in [
        EdmPrimitiveKind::DateTimeOffset,
        EdmPrimitiveKind::TimeOfDay,
        EdmPrimitiveKind::Date,
        EdmPrimitiveKind::Duration,
        EdmPrimitiveKind::String,
        EdmPrimitiveKind::Boolean,
    ] {
        let node = property(EdmTypeRef::primitive(kind, true));
        let outcome = promoter.promote_unary_operand(UnaryOperator::Negate, &node);
        assert!(!outcome.is_supported(), "negate over {kind} must be rejected");
        assert_eq!(outcome.operand(), Some(&EdmTypeRef::primitive(kind, true)));
    }

    let open = OpenPropertyAccessNode::new("Dynamic");
    let outcome = promoter.promote_unary_operand(UnaryOperator::Negate, &open);
    assert!(outcome.is_supported());
    assert_eq!(outcome.operand(), None);

    let home = property(EdmTypeRef::complex(&address, false));
    assert!(!promoter
        .promote_unary_operand(UnaryOperator::Negate, &home)
        .is_supported());
}

#[test]
fn test_not_admissibility() {
    let promoter = TypePromoter::new();
    let address = EdmComplexType::new("Demo", "Address");

    let flag = property(EdmTypeRef::boolean(true));
    assert!(promoter
        .promote_unary_operand(UnaryOperator::Not, &flag)
        .is_supported());

    let null = ConstantNode::null();
    assert!(promoter
        .promote_unary_operand(UnaryOperator::Not, &null)
        .is_supported());

    let age = property(EdmTypeRef::int32(false));
    assert!(!promoter
        .promote_unary_operand(UnaryOperator::Not, &age)
        .is_supported());

    let home = property(EdmTypeRef::complex(&address, false));
    let outcome = promoter.promote_unary_operand(UnaryOperator::Not, &home);
    assert!(!outcome.is_supported());
    assert_eq!(outcome.operand(), Some(&EdmTypeRef::complex(&address, false)));
}

// === Convertibility ===

#[test]
fn test_can_convert_ignores_facets_and_nullability() {
    let promoter = TypePromoter::new();

    let bare = EdmTypeRef::string(false);
    let constrained = EdmTypeRef::primitive_with_facets(
        EdmPrimitiveKind::String,
        true,
        TypeFacets {
            max_length: Some(40),
            ..TypeFacets::default()
        },
    );

    assert!(promoter.can_convert_to(&bare, &constrained));
    assert!(promoter.can_convert_to(&constrained, &bare));
}

#[test]
fn test_can_convert_follows_inheritance_and_collections() {
    let promoter = TypePromoter::new();
    let person = EdmEntityType::new("Demo", "Person");
    let employee = EdmEntityType::derived("Demo", "Employee", &person);
    let address = EdmComplexType::new("Demo", "Address");
    let postal = EdmComplexType::derived("Demo", "PostalAddress", &address);

    let person_ref = EdmTypeRef::entity(&person, true);
    let employee_ref = EdmTypeRef::entity(&employee, true);
    assert!(promoter.can_convert_to(&employee_ref, &person_ref));
    assert!(!promoter.can_convert_to(&person_ref, &employee_ref));

    let address_ref = EdmTypeRef::complex(&address, false);
    let postal_ref = EdmTypeRef::complex(&postal, false);
    assert!(promoter.can_convert_to(&postal_ref, &address_ref));
    assert!(!promoter.can_convert_to(&address_ref, &postal_ref));

    let employees = EdmTypeRef::collection(employee_ref.clone());
    let people = EdmTypeRef::collection(person_ref.clone());
    assert!(promoter.can_convert_to(&employees, &people));
    assert!(!promoter.can_convert_to(&people, &employees));

    assert!(promoter.can_convert_to(&EdmTypeRef::int32(false), &EdmTypeRef::int64(false)));
    assert!(!promoter.can_convert_to(&EdmTypeRef::int64(false), &EdmTypeRef::int32(false)));
    assert!(!promoter.can_convert_to(&EdmTypeRef::int32(false), &people));
    assert!(!promoter.can_convert_to(&person_ref, &address_ref));
}
