use crate::errors::CoreError;

/// String-to-string durable storage scoped to the page origin.
///
/// Mirrors the browser's `localStorage`: synchronous, no transactions,
/// every call runs to completion before the next one starts. The browser
/// crate implements it over `window.localStorage`; tests use
/// [`MemoryStore`](super::memory::MemoryStore).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError>;

    fn remove_item(&self, key: &str) -> Result<(), CoreError>;
}
