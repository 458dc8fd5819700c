//! Trolley
//!
//! Trolley is a persistent shopping cart: add products, adjust quantities, remove lines, watch the
//! running total and check out. The cart survives between sessions through a pluggable store, and
//! rendering and notifications are injected so the core can run without a UI.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod items;
pub mod manager;
pub mod money;
pub mod notify;
pub mod observability;
pub mod prelude;
pub mod presentation;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod render;
pub mod storage;
