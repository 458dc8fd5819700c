//! Cart Storage Config

use clap::Args;

use crate::storage::FileStore;

/// Where the cart is persisted between sessions.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Directory holding persisted carts
    #[arg(long, env = "TROLLEY_STORE_DIR", default_value = ".trolley", global = true)]
    pub store_dir: String,

    /// Key identifying the persisted cart
    #[arg(long, env = "TROLLEY_STORE_KEY", default_value = "cart", global = true)]
    pub store_key: String,
}

impl StoreConfig {
    /// Build the file store these settings describe.
    #[must_use]
    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.store_dir, &self.store_key)
    }
}
