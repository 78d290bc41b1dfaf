//! Walkthrough of building an EDM schema in code and resolving its bindings
//!
//! This example demonstrates:
//! - Declaring entity types with inheritance and navigation properties
//! - Declaring entity sets, singletons, and navigation property bindings
//! - Materializing bindings and following navigation targets
//! - Collecting diagnostics for unresolved declarations

use odata_edm::{
    EdmEntityType, EdmModel, EdmNavigationProperty, EdmTypeRef, NavigationSourceKind,
};

fn main() -> anyhow::Result<()> {
    println!("=== EDM Model Construction Example ===\n");

    // 1. Declare the schema types
    println!("1. Declaring schema types...");
    let model = EdmModel::new("TripPin", "Container");

    let person = EdmEntityType::new("TripPin", "Person");
    person.add_structural_property("UserName", EdmTypeRef::string(false))?;
    person.add_structural_property("Age", EdmTypeRef::int32(true))?;

    let manager = EdmEntityType::derived("TripPin", "Manager", &person);
    let trip = EdmEntityType::new("TripPin", "Trip");
    trip.add_structural_property("Name", EdmTypeRef::string(true))?;

    model.declare_entity_type(&person)?;
    model.declare_entity_type(&manager)?;
    model.declare_entity_type(&trip)?;
    println!("   ✓ Declared {} / {} / {}", person.full_name(), manager.full_name(), trip.full_name());

    // 2. Declare navigation properties
    println!("\n2. Declaring navigation properties...");
    let friends = person
        .add_navigation_property(EdmNavigationProperty::collection("Friends", &person))?;
    let trips = person
        .add_navigation_property(EdmNavigationProperty::collection("Trips", &trip).contained())?;
    let reports = manager
        .add_navigation_property(EdmNavigationProperty::collection("DirectReports", &person))?;
    println!("   ✓ Friends -> {}", friends.target().full_name());
    println!("   ✓ Trips (contained) -> {}", trips.target().full_name());
    println!("   ✓ Manager/DirectReports -> {}", reports.target().full_name());

    // 3. Declare the container surface with bindings
    println!("\n3. Declaring entity sets and bindings...");
    let people = model.container().add_entity_set("People", &person)?;
    model.container().add_singleton("Me", &person)?;
    people.declare_binding("Friends", "People", None);
    people.declare_binding("TripPin.Manager/DirectReports", "People", None);
    people.declare_binding("BestFriend", "People", None); // no such property
    println!("   ✓ People declared with {} binding(s)", people.declared_bindings().len());

    // 4. Materialize and inspect the bindings
    println!("\n4. Materializing bindings on People...");
    for binding in model.navigation_property_bindings(&people) {
        match binding.property().resolved() {
            Some(property) => println!("   ✓ {} binds to a target", property.name()),
            None => println!("   ✗ a binding path did not resolve"),
        }
    }

    // 5. Follow navigation targets
    println!("\n5. Following navigation targets...");
    let friends_target = model.find_navigation_target(&people, &friends);
    println!("   People/Friends -> '{}'", friends_target.name());
    let trips_target = model.find_navigation_target(&people, &trips);
    println!(
        "   People/Trips -> '{}' ({:?})",
        trips_target.name(),
        trips_target.kind()
    );
    assert_eq!(trips_target.kind(), NavigationSourceKind::Contained);

    // 6. Collect diagnostics for the unresolved declaration
    println!("\n6. Collecting binding diagnostics...");
    for diagnostic in model.binding_diagnostics() {
        println!("   {diagnostic}");
    }

    println!("\n=== Model Complete ===");
    Ok(())
}
