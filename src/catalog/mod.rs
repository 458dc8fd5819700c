//! Catalog
//!
//! Products the storefront offers, loaded from YAML:
//!
//! ```yaml
//! currency: INR
//! products:
//!   pen:
//!     name: Pen
//!     price: "10.00 INR"
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    catalog::products::CatalogFixture,
    money::{PriceError, currency_from_code},
    products::Product,
};

pub mod products;

/// The catalog shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../../fixtures/catalog/default.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or unknown currency
    #[error(transparent)]
    Price(#[from] PriceError),

    /// A product is priced in a currency other than the catalog currency
    #[error("Currency mismatch for {product}: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Product key
        product: String,
        /// Catalog currency
        expected: &'static str,
        /// Product currency
        found: &'static str,
    },

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// Products keyed by a short, stable key.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: FxHashMap<String, Product>,
    currency: &'static Currency,
}

impl Catalog {
    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price cannot be parsed, or a product is
    /// priced in a currency other than the catalog's.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;
        let currency = currency_from_code(&fixture.currency)?;

        let products = fixture
            .products
            .into_iter()
            .map(|(key, product_fixture)| {
                let product = Product::try_from(product_fixture)?;
                let found = product.price.currency();

                if found != currency {
                    return Err(CatalogError::CurrencyMismatch {
                        product: key,
                        expected: currency.iso_alpha_code,
                        found: found.iso_alpha_code,
                    });
                }

                Ok((key, product))
            })
            .collect::<Result<FxHashMap<_, _>, _>>()?;

        Ok(Self { products, currency })
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// The catalog shipped with the binary, used when no catalog file is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled YAML cannot be parsed.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUNDLED_CATALOG)
    }

    /// Get a product by its key
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for unknown keys.
    pub fn get(&self, key: &str) -> Result<&Product, CatalogError> {
        self.products
            .get(key)
            .ok_or_else(|| CatalogError::ProductNotFound(key.to_string()))
    }

    /// Iterate over `(key, product)` pairs sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Product)> {
        let mut entries: Vec<(&str, &Product)> = self
            .products
            .iter()
            .map(|(key, product)| (key.as_str(), product))
            .collect();

        entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));

        entries.into_iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency shared by every product.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, INR},
    };
    use testresult::TestResult;

    use super::*;

    const CATALOG: &str = r#"
currency: INR
products:
  pen:
    name: Pen
    price: "10.00 INR"
  notebook:
    name: Notebook
    price: "50.00 INR"
"#;

    #[test]
    fn from_yaml_str_parses_products() -> TestResult {
        let catalog = Catalog::from_yaml_str(CATALOG)?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.currency(), INR);
        assert_eq!(catalog.get("pen")?.name, "Pen");
        assert_eq!(catalog.get("notebook")?.price, Money::from_minor(5000, INR));

        Ok(())
    }

    #[test]
    fn iter_is_sorted_by_key() -> TestResult {
        let catalog = Catalog::from_yaml_str(CATALOG)?;

        let keys: Vec<&str> = catalog.iter().map(|(key, _)| key).collect();

        assert_eq!(keys, vec!["notebook", "pen"]);

        Ok(())
    }

    #[test]
    fn get_unknown_product_errors() -> TestResult {
        let catalog = Catalog::from_yaml_str(CATALOG)?;

        assert!(matches!(
            catalog.get("stapler"),
            Err(CatalogError::ProductNotFound(key)) if key == "stapler"
        ));

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let yaml = r#"
currency: INR
products:
  tea:
    name: Tea
    price: "2.00 GBP"
"#;

        let result = Catalog::from_yaml_str(yaml);

        assert!(matches!(
            result,
            Err(CatalogError::CurrencyMismatch { expected, found, .. })
                if expected == INR.iso_alpha_code && found == GBP.iso_alpha_code
        ));
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        assert!(matches!(
            Catalog::from_yaml_str("products: ["),
            Err(CatalogError::Yaml(_))
        ));
    }

    #[test]
    fn from_file_reads_catalog() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.yml");

        fs::write(&path, CATALOG)?;

        let catalog = Catalog::from_file(&path)?;

        assert_eq!(catalog.len(), 2);

        Ok(())
    }

    #[test]
    fn bundled_catalog_parses() -> TestResult {
        let catalog = Catalog::bundled()?;

        assert_eq!(catalog.currency(), INR);
        assert_eq!(catalog.get("pen")?.price, Money::from_minor(1000, INR));

        Ok(())
    }

    #[test]
    fn from_file_missing_is_io_error() {
        assert!(matches!(
            Catalog::from_file("/definitely/not/here.yml"),
            Err(CatalogError::Io(_))
        ));
    }
}
