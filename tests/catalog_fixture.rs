//! Integration tests for the bundled product catalog.

use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use trolley::prelude::*;

#[test]
fn default_catalog_loads() -> TestResult {
    let catalog = Catalog::from_file("fixtures/catalog/default.yml")?;

    assert_eq!(catalog.currency(), INR);
    assert_eq!(catalog.len(), 8);
    assert_eq!(catalog.get("pen")?.price, Money::from_minor(1000, INR));
    assert_eq!(catalog.get("notebook")?.price, Money::from_minor(5000, INR));

    Ok(())
}

#[test]
fn every_product_can_be_added_to_a_cart() -> TestResult {
    let catalog = Catalog::from_file("fixtures/catalog/default.yml")?;
    let mut cart = Cart::new(catalog.currency());

    for (_, product) in catalog.iter() {
        let Intent::Add { name, unit_price } = product.add_intent() else {
            return Err("product raised a non-add intent".into());
        };

        assert_eq!(cart.add(&name, unit_price)?, 1);
    }

    assert_eq!(cart.len(), catalog.len());
    assert_eq!(cart.item_count(), 8);

    Ok(())
}

#[test]
fn bundled_catalog_matches_fixture_file() -> TestResult {
    let bundled = Catalog::bundled()?;
    let from_file = Catalog::from_file("fixtures/catalog/default.yml")?;

    let bundled_keys: Vec<&str> = bundled.iter().map(|(key, _)| key).collect();
    let file_keys: Vec<&str> = from_file.iter().map(|(key, _)| key).collect();

    assert_eq!(bundled_keys, file_keys);

    for (key, product) in from_file.iter() {
        assert_eq!(bundled.get(key)?, product);
    }

    Ok(())
}
