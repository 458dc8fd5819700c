//! Presentation seam: intents coming in from a UI and "cart changed" notifications going out.

use std::io;

use rusty_money::{Money, iso::Currency};
use tracing::warn;

use crate::{
    cart::{Cart, QuantityChange},
    items::CartLine,
    receipt::Receipt,
    render::write_cart,
};

/// Receives the cart after every mutation.
pub trait CartObserver {
    /// Called once per mutation with the updated cart.
    fn cart_changed(&mut self, cart: &Cart);
}

/// An observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn cart_changed(&mut self, _cart: &Cart) {}
}

/// Records a snapshot of the cart per change.
impl CartObserver for Vec<Cart> {
    fn cart_changed(&mut self, cart: &Cart) {
        self.push(cart.clone());
    }
}

/// Re-renders the cart table to an output stream on every change.
#[derive(Debug)]
pub struct TableObserver<W> {
    out: W,
}

impl<W: io::Write> TableObserver<W> {
    /// Create an observer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the observer, returning the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> CartObserver for TableObserver<W> {
    fn cart_changed(&mut self, cart: &Cart) {
        if let Err(error) = write_cart(&mut self.out, cart) {
            warn!(%error, "failed to render cart");
        }
    }
}

/// Addresses one line of the cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineRef {
    /// Position in the rendered list. Stale positions are ignored.
    Index(usize),

    /// Product name, stable across re-renders.
    Name(String),
}

impl From<usize> for LineRef {
    fn from(index: usize) -> Self {
        LineRef::Index(index)
    }
}

impl From<&str> for LineRef {
    fn from(name: &str) -> Self {
        LineRef::Name(name.to_string())
    }
}

/// A request raised by a UI control.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Add one unit of a product.
    Add {
        /// Product name
        name: String,
        /// Unit price
        unit_price: Money<'static, Currency>,
    },

    /// Adjust the quantity of a line by `delta`.
    ChangeQuantity {
        /// Target line
        line: LineRef,
        /// Signed quantity change
        delta: i64,
    },

    /// Remove a line.
    Remove {
        /// Target line
        line: LineRef,
    },

    /// Settle the cart.
    Checkout,
}

/// What dispatching an [`Intent`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The product's line now holds `quantity` units.
    Added {
        /// Product name
        name: String,
        /// Quantity after the add
        quantity: u32,
    },

    /// The quantity change, or `None` if the line did not exist.
    QuantityChanged(Option<QuantityChange>),

    /// The removed line, or `None` if the line did not exist.
    Removed(Option<CartLine>),

    /// The cart was settled.
    CheckedOut(Receipt),
}
