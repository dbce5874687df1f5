//! Watch Example - Observing fields and reacting to writes
//!
//! This example demonstrates the core loop of spark-observe:
//! - Building an object tree and converting it reactive
//! - Watching fields by dotted path
//! - Writing values and seeing callbacks fire with (new, old)
//!
//! Run with: cargo run --example watch

use spark_observe::{make_reactive, watch, ReactiveObject, Value};

fn main() {
    println!("=== spark-observe Watch Example ===\n");

    // Build a product and convert it reactive
    let product = ReactiveObject::from_entries([
        ("name", Value::from("Phone")),
        ("price", Value::from(5000i64)),
        ("stock", Value::from(100i64)),
    ]);
    make_reactive(&Value::from(product.clone()));

    // Watch individual fields
    let price_watcher = watch(&product, "price", |new, old| {
        let new = new.and_then(Value::as_number).unwrap_or_default();
        let old = old.and_then(Value::as_number).unwrap_or_default();
        println!("  price changed: {old} -> {new}");
    });

    let _stock_watcher = watch(&product, "stock", |new, old| {
        let new = new.and_then(Value::as_number).unwrap_or_default();
        let old = old.and_then(Value::as_number).unwrap_or_default();
        println!("  stock changed: {old} -> {new}");
    });

    println!("Initial state:");
    println!("  price: {:?}", product.get("price").unwrap());
    println!("  stock: {:?}", product.get("stock").unwrap());

    println!("\n--- Writing new values ---");
    product.set("price", 4500i64);
    product.set("stock", 80i64);

    println!("\n--- Writing an equal value (no callback) ---");
    product.set("price", 4500i64);

    println!("\nTracked value on the handle: {:?}", price_watcher.value().unwrap());
}
