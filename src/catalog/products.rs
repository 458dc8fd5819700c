//! Product catalog YAML

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{catalog::CatalogError, money::parse_price, products::Product};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency shared by every product (e.g., "INR")
    pub currency: String,

    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product price (e.g., "10.00 INR")
    pub price: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        Ok(Product {
            name: fixture.name,
            price,
        })
    }
}
