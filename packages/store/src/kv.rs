//! # Durable key-value storage
//!
//! [`KeyValueStore`] is the narrow interface the session layer persists through.
//! It deliberately mirrors the browser's `localStorage`: string keys, string
//! values, synchronous calls. Implementations live in sibling modules:
//!
//! | Backend | Platform | Module |
//! |---------|----------|--------|
//! | [`crate::MemoryStore`] | all | `memory` |
//! | `FileStore` | native | `file_store` |
//! | `LocalStore` | wasm32 + `web` | `local` |
//!
//! Unlike a cache, every method reports failure. Callers decide whether a
//! failed write matters; the session store logs and carries on.

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed durable storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
