//! Cart

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::CartLine,
    pricing::{PricingError, total_price},
};

/// Errors related to cart mutations and checkout.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The product name was empty or whitespace.
    #[error("product name must not be empty")]
    EmptyName,

    /// The unit price was below zero.
    #[error("price of {0} must not be negative")]
    NegativePrice(String),

    /// A price's currency differs from the cart currency.
    #[error("{name} is priced in {found}, but the cart uses {expected}")]
    CurrencyMismatch {
        /// Product name
        name: String,
        /// Currency of the rejected price
        found: &'static str,
        /// Currency of the cart
        expected: &'static str,
    },

    /// Two lines share a name.
    #[error("{0} appears on more than one line")]
    DuplicateLine(String),

    /// The change would push the cart total beyond what minor units can hold.
    #[error("cart total would overflow after changing {name}")]
    TotalOverflow {
        /// Line being added or changed
        name: String,
        /// Underlying pricing failure
        source: PricingError,
    },

    /// Checkout was requested with no lines in the cart.
    #[error("Your cart is empty!")]
    EmptyCart,

    /// Totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Macro-state of a cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartState {
    /// No lines.
    Empty,

    /// At least one line.
    NonEmpty,
}

/// Result of applying a quantity delta to an existing line.
#[derive(Clone, Debug, PartialEq)]
pub enum QuantityChange {
    /// The line now holds the given quantity.
    Updated(u32),

    /// The quantity dropped to zero or below and the line was removed.
    Removed(CartLine),
}

/// An ordered list of uniquely named lines priced in a single currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart from existing lines, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line is priced in another currency, has a negative price or an
    /// empty name, if two lines share a name, or if the lines cannot be totalled.
    pub fn with_lines(
        lines: impl Into<Vec<CartLine>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let lines = lines.into();
        let mut seen = FxHashSet::default();

        for line in &lines {
            validate(line.name(), line.unit_price(), currency)?;

            if !seen.insert(line.name()) {
                return Err(CartError::DuplicateLine(line.name().to_string()));
            }
        }

        total_price(&lines, currency)?;

        Ok(Cart { lines, currency })
    }

    /// Add one unit of a product, returning the line's new quantity.
    ///
    /// A product already in the cart keeps its original unit price.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the name is empty, the price is negative or in another currency,
    /// or if the cart total would overflow. The cart is left untouched.
    pub fn add(
        &mut self,
        name: &str,
        unit_price: Money<'static, Currency>,
    ) -> Result<u32, CartError> {
        validate(name, &unit_price, self.currency)?;

        if let Some(index) = self.position(name) {
            self.change_quantity_at(index, 1)?;

            return Ok(self.get_at(index).map_or(0, CartLine::quantity));
        }

        self.lines.push(CartLine::new(name, unit_price));

        if let Err(source) = self.subtotal() {
            self.lines.pop();

            return Err(CartError::TotalOverflow {
                name: name.to_string(),
                source,
            });
        }

        Ok(1)
    }

    /// Apply `delta` to the line at `index`. Out-of-range indexes are ignored and return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the new quantity would make the cart total overflow.
    /// The quantity is left unchanged.
    pub fn change_quantity_at(
        &mut self,
        index: usize,
        delta: i64,
    ) -> Result<Option<QuantityChange>, CartError> {
        let Some(line) = self.lines.get_mut(index) else {
            return Ok(None);
        };

        let Some(quantity) = line.adjusted(delta) else {
            return Ok(Some(QuantityChange::Removed(self.lines.remove(index))));
        };

        let previous = line.set_quantity(quantity);

        let Err(source) = self.subtotal() else {
            return Ok(Some(QuantityChange::Updated(quantity.get())));
        };

        if let Some(line) = self.lines.get_mut(index) {
            line.set_quantity(previous);

            return Err(CartError::TotalOverflow {
                name: line.name().to_string(),
                source,
            });
        }

        Err(source.into())
    }

    /// Apply `delta` to the line named `name`. Unknown names are ignored and return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the new quantity would make the cart total overflow.
    pub fn change_quantity(
        &mut self,
        name: &str,
        delta: i64,
    ) -> Result<Option<QuantityChange>, CartError> {
        let Some(index) = self.position(name) else {
            return Ok(None);
        };

        self.change_quantity_at(index, delta)
    }

    /// Remove the line at `index`. Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Remove the line named `name`. Unknown names are ignored.
    pub fn remove(&mut self, name: &str) -> Option<CartLine> {
        let index = self.position(name)?;

        self.remove_at(index)
    }

    /// Remove every line, returning them in order.
    pub fn clear(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// Position of the line named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.name() == name)
    }

    /// Get the line named `name`.
    pub fn get(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.name() == name)
    }

    /// Get the line at `index`.
    pub fn get_at(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if a line total overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        total_price(&self.lines, self.currency)
    }

    /// Calculate the total of the cart. There are no fees, so this equals the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if a line total overflows.
    pub fn total(&self) -> Result<Money<'static, Currency>, PricingError> {
        self.subtotal()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the macro-state of the cart.
    #[must_use]
    pub fn state(&self) -> CartState {
        if self.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

fn validate(
    name: &str,
    unit_price: &Money<'static, Currency>,
    currency: &'static Currency,
) -> Result<(), CartError> {
    if name.trim().is_empty() {
        return Err(CartError::EmptyName);
    }

    if unit_price.currency() != currency {
        return Err(CartError::CurrencyMismatch {
            name: name.to_string(),
            found: unit_price.currency().iso_alpha_code,
            expected: currency.iso_alpha_code,
        });
    }

    if unit_price.to_minor_units() < 0 {
        return Err(CartError::NegativePrice(name.to_string()));
    }

    Ok(())
}
