//! Cart lines

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

use crate::pricing::{PricingError, line_total};

/// One product entry in the cart: a name, a unit price and a positive quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: NonZeroU32,
}

impl CartLine {
    /// Creates a new line holding a single unit.
    pub fn new(name: impl Into<String>, unit_price: Money<'static, Currency>) -> Self {
        Self::with_quantity(name, unit_price, NonZeroU32::MIN)
    }

    /// Creates a new line with the given quantity.
    pub fn with_quantity(
        name: impl Into<String>,
        unit_price: Money<'static, Currency>,
        quantity: NonZeroU32,
    ) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Returns the product name, which is also the line's identity within a cart.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of a single unit.
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Returns the number of units on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Returns `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the multiplication overflows.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, PricingError> {
        line_total(self)
    }

    /// Quantity after applying `delta`, or `None` when it would drop to zero or below.
    pub(crate) fn adjusted(&self, delta: i64) -> Option<NonZeroU32> {
        let next = i64::from(self.quantity.get()).saturating_add(delta);

        if next <= 0 {
            return None;
        }

        NonZeroU32::new(u32::try_from(next).unwrap_or(u32::MAX))
    }

    /// Replaces the quantity, returning the previous one.
    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) -> NonZeroU32 {
        std::mem::replace(&mut self.quantity, quantity)
    }
}
