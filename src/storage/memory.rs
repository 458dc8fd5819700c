//! In-memory cart store.

use super::{CartStore, StoreError};

/// Holds the last saved value in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            saves: 0,
        }
    }

    /// The stored value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Number of saves since creation.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, serialized: &str) -> Result<(), StoreError> {
        self.value = Some(serialized.to_string());
        self.saves += 1;

        Ok(())
    }
}
