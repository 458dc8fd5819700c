//! Cart state manager
//!
//! [`CartManager`] owns the authoritative [`Cart`] for a session. Every mutation is persisted
//! through the injected [`CartStore`], announced to the [`CartObserver`], and, where the shopper
//! should hear about it, reported through the [`Notifier`].

use rusty_money::{Money, iso::Currency};
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartError, QuantityChange},
    items::CartLine,
    notify::{LogNotifier, Notice, Notifier},
    presentation::{CartObserver, Intent, LineRef, NoopObserver, Outcome},
    pricing::PricingError,
    receipt::Receipt,
    storage::{CartStore, envelope},
};

/// Owns the session's cart and its collaborators.
#[derive(Debug)]
pub struct CartManager<S, N = LogNotifier, O = NoopObserver> {
    cart: Cart,
    store: S,
    notifier: N,
    observer: O,
}

impl<S: CartStore, N: Notifier, O: CartObserver> CartManager<S, N, O> {
    /// Rehydrate the cart from `store`.
    ///
    /// A missing value starts an empty cart. An unreadable value is discarded and also starts an
    /// empty cart; the shopper is not told.
    pub fn initialize(
        store: S,
        notifier: N,
        observer: O,
        currency: &'static Currency,
    ) -> Self {
        let cart = rehydrate(&store, currency);

        Self {
            cart,
            store,
            notifier,
            observer,
        }
    }

    /// Add one unit of `name`, returning the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the name is empty or the price is negative or in another
    /// currency. The cart is left untouched.
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: Money<'static, Currency>,
    ) -> Result<u32, CartError> {
        let quantity = self.cart.add(name, unit_price)?;

        debug!(name, quantity, "added item");

        self.commit();
        self.notifier
            .notify(Notice::success(format!("Added {name} to cart")));

        Ok(quantity)
    }

    /// Apply `delta` to the line named `name`; a result of zero or below removes the line.
    ///
    /// Unknown names are ignored and return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the new quantity would make the cart total
    /// overflow. The cart is left untouched.
    pub fn change_quantity(
        &mut self,
        name: &str,
        delta: i64,
    ) -> Result<Option<QuantityChange>, CartError> {
        let index = self.cart.position(name);

        self.apply_quantity_change(index, delta)
    }

    /// Apply `delta` to the line at `index`; a result of zero or below removes the line.
    ///
    /// Out-of-range indexes are ignored and return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the new quantity would make the cart total
    /// overflow. The cart is left untouched.
    pub fn change_quantity_at(
        &mut self,
        index: usize,
        delta: i64,
    ) -> Result<Option<QuantityChange>, CartError> {
        self.apply_quantity_change(Some(index), delta)
    }

    /// Remove the line named `name`. Unknown names are ignored and return `None`.
    pub fn remove_item(&mut self, name: &str) -> Option<CartLine> {
        let index = self.cart.position(name);

        self.apply_removal(index)
    }

    /// Remove the line at `index`. Out-of-range indexes are ignored and return `None`.
    pub fn remove_item_at(&mut self, index: usize) -> Option<CartLine> {
        self.apply_removal(Some(index))
    }

    /// Settle the cart: report the total, then clear and persist the empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to settle; the shopper is shown an
    /// error notice and the cart is unchanged.
    pub fn checkout(&mut self) -> Result<Receipt, CartError> {
        if self.cart.is_empty() {
            self.notifier
                .notify(Notice::error(CartError::EmptyCart.to_string()));

            return Err(CartError::EmptyCart);
        }

        let receipt = Receipt::from_cart(&self.cart)?;

        info!(
            total = %receipt.total(),
            items = receipt.item_count(),
            lines = receipt.lines().len(),
            "checkout complete"
        );

        self.notifier.notify(Notice::success(receipt.confirmation()));
        self.cart.clear();
        self.commit();

        Ok(receipt)
    }

    /// Forward a UI intent to the matching operation.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if an add or quantity change is rejected, or checkout is attempted
    /// on an empty cart.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, CartError> {
        match intent {
            Intent::Add { name, unit_price } => {
                let quantity = self.add_item(&name, unit_price)?;

                Ok(Outcome::Added { name, quantity })
            }
            Intent::ChangeQuantity { line, delta } => Ok(Outcome::QuantityChanged(match line {
                LineRef::Index(index) => self.change_quantity_at(index, delta)?,
                LineRef::Name(name) => self.change_quantity(&name, delta)?,
            })),
            Intent::Remove { line } => Ok(Outcome::Removed(match line {
                LineRef::Index(index) => self.remove_item_at(index),
                LineRef::Name(name) => self.remove_item(&name),
            })),
            Intent::Checkout => Ok(Outcome::CheckedOut(self.checkout()?)),
        }
    }

    /// Sum of `unit_price × quantity` across all lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line total overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        self.cart.subtotal()
    }

    /// Amount due at checkout; equal to the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line total overflows.
    pub fn total(&self) -> Result<Money<'static, Currency>, PricingError> {
        self.cart.total()
    }

    /// Number of units in the cart, for the badge.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Consume the manager, returning its collaborators.
    pub fn into_parts(self) -> (S, N, O) {
        (self.store, self.notifier, self.observer)
    }

    fn apply_quantity_change(
        &mut self,
        index: Option<usize>,
        delta: i64,
    ) -> Result<Option<QuantityChange>, CartError> {
        let Some(index) = index else {
            debug!(delta, "ignored quantity change for unknown line");
            return Ok(None);
        };

        let Some(change) = self.cart.change_quantity_at(index, delta)? else {
            debug!(index, delta, "ignored quantity change for unknown line");
            return Ok(None);
        };

        debug!(index, delta, ?change, "changed quantity");

        self.commit();

        Ok(Some(change))
    }

    fn apply_removal(&mut self, index: Option<usize>) -> Option<CartLine> {
        let Some(removed) = index.and_then(|index| self.cart.remove_at(index)) else {
            debug!(?index, "ignored removal of unknown line");
            return None;
        };

        debug!(name = removed.name(), "removed item");

        self.commit();
        self.notifier.notify(Notice::success(format!(
            "Removed {} from cart",
            removed.name()
        )));

        Some(removed)
    }

    fn commit(&mut self) {
        self.persist();
        self.observer.cart_changed(&self.cart);
    }

    fn persist(&mut self) {
        let serialized = match envelope::encode(&self.cart) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(%error, "failed to serialize cart; not saved");
                return;
            }
        };

        if let Err(error) = self.store.save(&serialized) {
            warn!(%error, "failed to save cart");
        }
    }
}

fn rehydrate(store: &impl CartStore, currency: &'static Currency) -> Cart {
    let serialized = match store.load() {
        Ok(Some(serialized)) => serialized,
        Ok(None) => return Cart::new(currency),
        Err(error) => {
            warn!(%error, "failed to read stored cart; starting empty");
            return Cart::new(currency);
        }
    };

    match envelope::decode(&serialized, currency) {
        Ok(cart) => {
            debug!(lines = cart.len(), items = cart.item_count(), "rehydrated cart");
            cart
        }
        Err(error) => {
            warn!(%error, "discarding unreadable stored cart");
            Cart::new(currency)
        }
    }
}
