//! Cart persistence.
//!
//! A [`CartStore`] holds a single serialized cart under one key. The serialized form is the
//! versioned JSON envelope produced by [`envelope::encode`].

use std::{io, string::FromUtf8Error};

use thiserror::Error;

pub mod envelope;
pub mod file;
pub mod memory;

pub use envelope::{EnvelopeError, SCHEMA_VERSION};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("cart storage IO error: {0}")]
    Io(#[from] io::Error),

    /// The stored bytes are not valid UTF-8.
    #[error("stored cart is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Key-value storage for one serialized cart.
pub trait CartStore {
    /// Returns the last saved value, or `None` if nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be read.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the stored value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be written.
    fn save(&mut self, serialized: &str) -> Result<(), StoreError>;
}

impl<S: CartStore + ?Sized> CartStore for &mut S {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, serialized: &str) -> Result<(), StoreError> {
        (**self).save(serialized)
    }
}
