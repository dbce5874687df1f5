//! End-to-end reactivity tests through the public API.
//!
//! Builds object trees the way an application would - construct, convert,
//! watch, mutate - and checks the full write → notify → re-evaluate →
//! callback pipeline, including the scenarios that tend to regress:
//! granularity of nested watches, equal-write suppression, and path breaks.
//!
//! Run with: cargo test --test reactivity

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_observe::{make_reactive, watch, ReactiveObject, Value};

fn reactive(object: &ReactiveObject) {
    make_reactive(&Value::from(object.clone()));
}

// =============================================================================
// PRICE SCENARIO
// =============================================================================

#[test]
fn price_watcher_reports_changes_exactly_once() {
    let product = ReactiveObject::from_entries([("price", 100i64)]);
    reactive(&product);

    let log: Rc<RefCell<Vec<(Option<f64>, Option<f64>)>>> = Rc::new(RefCell::new(Vec::new()));
    let log_clone = log.clone();
    let watcher = watch(&product, "price", move |new, old| {
        log_clone
            .borrow_mut()
            .push((new.and_then(Value::as_number), old.and_then(Value::as_number)));
    });

    product.set("price", 90i64);
    assert_eq!(*log.borrow(), vec![(Some(90.0), Some(100.0))]);

    // Writing the same value again must not invoke the callback.
    product.set("price", 90i64);
    assert_eq!(log.borrow().len(), 1);

    assert_eq!(watcher.value().unwrap().as_number(), Some(90.0));
}

// =============================================================================
// NESTED TREES
// =============================================================================

#[test]
fn nested_fields_are_independently_observable() {
    // company.address.city, in the shape applications actually build
    let address = ReactiveObject::from_entries([("city", "Oslo"), ("street", "Main")]);
    let company = ReactiveObject::from_entries([
        ("name", Value::from("RLabs")),
        ("address", Value::from(address.clone())),
    ]);
    reactive(&company);

    let cities: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let cities_clone = cities.clone();
    let _watcher = watch(&company, "address.city", move |new, _| {
        if let Some(city) = new.and_then(Value::as_str) {
            cities_clone.borrow_mut().push(city.to_string());
        }
    });

    address.set("city", "Bergen");
    company.set("name", "RLabs Inc"); // different field: no effect on the watcher
    address.set("street", "Side");    // sibling field: no effect either

    assert_eq!(*cities.borrow(), vec!["Bergen"]);
}

#[test]
fn watch_granularity_matches_the_path() {
    // obj = {a: {b: {c: 2}}}, watcher on "a.b"
    let leaf = ReactiveObject::from_entries([("c", 2i64)]);
    let branch = ReactiveObject::from_entries([("b", leaf.clone())]);
    let root = ReactiveObject::from_entries([("a", branch.clone())]);
    reactive(&root);

    let count = Rc::new(Cell::new(0u32));
    let count_clone = count.clone();
    let _watcher = watch(&root, "a.b", move |_, _| {
        count_clone.set(count_clone.get() + 1);
    });

    // Deeper write: the watched value itself did not change.
    leaf.set("c", 5i64);
    assert_eq!(count.get(), 0);

    // Write at the watched depth: fires.
    branch.set("b", ReactiveObject::from_entries([("c", 9i64)]));
    assert_eq!(count.get(), 1);
}

#[test]
fn multiple_watchers_over_one_tree() {
    let product = ReactiveObject::from_entries([
        ("price", 5000i64),
        ("stock", 100i64),
    ]);
    let category = ReactiveObject::from_entries([("brand", "Apple")]);
    product.set("category", category.clone());
    reactive(&product);

    let events: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let events_price = events.clone();
    let _price = watch(&product, "price", move |new, old| {
        let new = new.and_then(Value::as_number).unwrap_or_default();
        let old = old.and_then(Value::as_number).unwrap_or_default();
        events_price.borrow_mut().push(format!("price {old} -> {new}"));
    });

    let events_stock = events.clone();
    let _stock = watch(&product, "stock", move |new, old| {
        let new = new.and_then(Value::as_number).unwrap_or_default();
        let old = old.and_then(Value::as_number).unwrap_or_default();
        events_stock.borrow_mut().push(format!("stock {old} -> {new}"));
    });

    let events_brand = events.clone();
    let _brand = watch(&product, "category.brand", move |new, _| {
        let new = new.and_then(Value::as_str).unwrap_or_default().to_string();
        events_brand.borrow_mut().push(format!("brand -> {new}"));
    });

    product.set("price", 4500i64);
    product.set("stock", 80i64);
    category.set("brand", "Apple Inc.");

    assert_eq!(
        *events.borrow(),
        vec![
            "price 5000 -> 4500".to_string(),
            "stock 100 -> 80".to_string(),
            "brand -> Apple Inc.".to_string(),
        ]
    );
}

// =============================================================================
// PATH EDGES
// =============================================================================

#[test]
fn broken_path_resolves_to_no_value_without_panicking() {
    let object = ReactiveObject::from_entries([("a", Value::Null)]);
    reactive(&object);

    let watcher = watch(&object, "a.b.c", |_, _| {});
    assert!(watcher.value().is_none());
}

#[test]
fn path_heals_when_intermediate_value_appears() {
    let object = ReactiveObject::from_entries([("a", Value::Null)]);
    reactive(&object);

    let seen: Rc<RefCell<Vec<Option<f64>>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    let watcher = watch(&object, "a.b", move |new, _| {
        seen_clone.borrow_mut().push(new.and_then(Value::as_number));
    });
    assert!(watcher.value().is_none());

    // The intermediate object appears (already reactive, so the watcher
    // re-registers through it) and the path resolves again.
    let branch = ReactiveObject::from_entries([("b", 7i64)]);
    reactive(&branch);
    object.set("a", branch.clone());
    assert_eq!(*seen.borrow(), vec![Some(7.0)]);

    // The new subscription is live.
    branch.set("b", 8i64);
    assert_eq!(*seen.borrow(), vec![Some(7.0), Some(8.0)]);
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn dropped_watchers_stop_firing() {
    let object = ReactiveObject::from_entries([("x", 1i64)]);
    reactive(&object);

    let count = Rc::new(Cell::new(0u32));
    let count_clone = count.clone();
    let watcher = watch(&object, "x", move |_, _| {
        count_clone.set(count_clone.get() + 1);
    });

    object.set("x", 2i64);
    assert_eq!(count.get(), 1);

    drop(watcher);
    object.set("x", 3i64);
    assert_eq!(count.get(), 1);
}

#[test]
fn converting_twice_is_harmless() {
    let object = ReactiveObject::from_entries([("x", 1i64)]);
    reactive(&object);
    reactive(&object);

    let count = Rc::new(Cell::new(0u32));
    let count_clone = count.clone();
    let _watcher = watch(&object, "x", move |_, _| {
        count_clone.set(count_clone.get() + 1);
    });

    // A single write still produces a single callback.
    object.set("x", 2i64);
    assert_eq!(count.get(), 1);
}
