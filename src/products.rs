//! Products

use rusty_money::{Money, iso::Currency};

use crate::presentation::Intent;

/// A product offered by the storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product name, used as the cart line name
    pub name: String,

    /// Unit price
    pub price: Money<'static, Currency>,
}

impl Product {
    /// The intent raised by this product's add-to-cart control.
    pub fn add_intent(&self) -> Intent {
        Intent::Add {
            name: self.name.clone(),
            unit_price: self.price,
        }
    }
}
