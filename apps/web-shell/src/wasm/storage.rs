use miniflux_tweaks_core::storage::TweaksStore;

/// `TweaksStore` over `window.localStorage`.
///
/// The store is origin-scoped, so the domain guard's stored origin can
/// only ever be found on the origin that wrote it.
#[derive(Debug, Clone)]
pub(super) struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub(super) fn from_window(window: &web_sys::Window) -> Result<Self, String> {
        let storage = window
            .local_storage()
            .map_err(|_| "localStorage is unavailable".to_string())?
            .ok_or_else(|| "localStorage is unavailable".to_string())?;
        Ok(Self { storage })
    }
}

impl TweaksStore for LocalStore {
    type Error = String;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.storage
            .get_item(key)
            .map_err(|_| format!("failed to read {key} from localStorage"))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.storage
            .set_item(key, value)
            .map_err(|_| format!("failed to write {key} to localStorage"))
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.storage
            .remove_item(key)
            .map_err(|_| format!("failed to remove {key} from localStorage"))
    }
}
