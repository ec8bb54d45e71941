use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Key under which the authorized origin is persisted.
pub const STORAGE_KEY_DOMAIN: &str = "domain";
/// Key under which the Miniflux API token is persisted.
pub const STORAGE_KEY_API_TOKEN: &str = "apiToken";

/// Seam over the host-provided key-value store.
///
/// The browser shell backs this with `localStorage`; tests use
/// [`MemoryStore`]. At most two keys ever exist.
pub trait TweaksStore {
    type Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
    fn delete(&self, key: &str) -> Result<(), Self::Error>;

    /// Reads a key, falling back to `default` when the key is absent or
    /// the store read fails.
    fn get_or(&self, key: &str, default: &str) -> String
    where
        Self: Sized,
    {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) | Err(_) => default.to_string(),
        }
    }
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TweaksStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
