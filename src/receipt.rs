//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{cart::Cart, items::CartLine, pricing::PricingError, render::lines_table};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating totals from cart lines.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Confirmation of a completed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Lines that were settled, in cart order
    lines: SmallVec<[CartLine; 8]>,

    /// Total amount for all lines
    total: Money<'static, Currency>,

    /// Number of units settled
    item_count: u64,
}

impl Receipt {
    /// Build a receipt from the current contents of a cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the total overflows.
    pub fn from_cart(cart: &Cart) -> Result<Self, PricingError> {
        Ok(Self {
            lines: cart.iter().cloned().collect(),
            total: cart.total()?,
            item_count: cart.item_count(),
        })
    }

    /// Lines that were settled
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total amount paid for all lines
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Number of units settled
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Confirmation message shown to the shopper.
    pub fn confirmation(&self) -> String {
        format!("Checkout successful! Total: {}", self.total)
    }

    /// Write the settled lines as a table followed by the item count and total.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line total overflows or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let table = lines_table(&self.lines)?;

        writeln!(out, "\n{table}")?;
        writeln!(out, " Items:    {}", self.item_count)?;
        writeln!(out, " \x1b[1mTotal:\x1b[0m    \x1b[1m{}\x1b[0m", self.total)?;

        Ok(())
    }
}
