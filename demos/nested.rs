//! Nested Example - Deep trees, path granularity, and path breaks
//!
//! This example demonstrates:
//! - Recursive conversion of nested object trees
//! - Watching a dotted path and the granularity of notifications
//! - Paths that break on a null intermediate and heal later
//!
//! Run with: cargo run --example nested

use spark_observe::{make_reactive, watch, ReactiveObject, Value};

fn main() {
    println!("=== spark-observe Nested Example ===\n");

    // company.address.city, three levels deep
    let address = ReactiveObject::from_entries([
        ("city", Value::from("Oslo")),
        ("street", Value::from("Main street")),
    ]);
    let company = ReactiveObject::from_entries([
        ("name", Value::from("RLabs")),
        ("address", Value::from(address.clone())),
        ("ceo", Value::Null),
    ]);
    make_reactive(&Value::from(company.clone()));

    let _city_watcher = watch(&company, "address.city", |new, old| {
        let new = new.and_then(Value::as_str).unwrap_or("?");
        let old = old.and_then(Value::as_str).unwrap_or("?");
        println!("  city changed: {old} -> {new}");
    });

    println!("--- Writing the nested field directly ---");
    address.set("city", "Bergen");

    println!("\n--- Writing a sibling field (watcher stays quiet) ---");
    address.set("street", "Side street");

    println!("\n--- Replacing the whole address object ---");
    let new_address = ReactiveObject::from_entries([("city", Value::from("Trondheim"))]);
    make_reactive(&Value::from(new_address.clone()));
    company.set("address", new_address.clone());

    println!("\n--- The watcher re-registered through the new object ---");
    new_address.set("city", "Stavanger");

    // A path through a null intermediate resolves to no value, soft
    let ceo_name = watch(&company, "ceo.name", |new, _| {
        println!("  ceo.name now: {new:?}");
    });
    println!("\nceo.name resolves to: {:?}", ceo_name.value());

    println!("\n--- The intermediate appears and the path heals ---");
    let ceo = ReactiveObject::from_entries([("name", Value::from("Rusty"))]);
    make_reactive(&Value::from(ceo.clone()));
    company.set("ceo", ceo);
}
