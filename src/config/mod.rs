//! Configuration
//!
//! Settings are read from command-line flags, falling back to environment variables (a `.env`
//! file is honoured by the binary) and then to defaults.

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::Currency;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    config::{observability::LoggingConfig, store::StoreConfig},
    money::{PriceError, currency_from_code},
};

pub mod observability;
pub mod store;

/// Application configuration.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Cart storage settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// ISO code of the currency carts are priced in
    #[arg(long, env = "TROLLEY_CURRENCY", default_value = "INR", global = true)]
    pub currency: String,

    /// Path to a product catalog YAML; the bundled catalog is used when unset
    #[arg(long, env = "TROLLEY_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve the configured currency code.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownCurrency`] if the code is not supported.
    pub fn currency(&self) -> Result<&'static Currency, PriceError> {
        currency_from_code(&self.currency)
    }

    /// Load the configured catalog file, or the bundled catalog when none is set.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog cannot be read or parsed.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => {
                debug!(path = %path.display(), "loading catalog");
                Catalog::from_file(path)
            }
            None => Catalog::bundled(),
        }
    }
}
