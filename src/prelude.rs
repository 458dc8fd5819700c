//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartState, QuantityChange},
    catalog::{Catalog, CatalogError},
    items::CartLine,
    manager::CartManager,
    money::{PriceError, parse_amount, parse_price},
    notify::{LogNotifier, Notice, NoticeLevel, Notifier, WriterNotifier},
    presentation::{CartObserver, Intent, LineRef, NoopObserver, Outcome, TableObserver},
    pricing::PricingError,
    products::Product,
    receipt::{Receipt, ReceiptError},
    render::{RenderError, write_badge, write_cart},
    storage::{CartStore, FileStore, MemoryStore, StoreError},
};
