use discuss_client::{KvStore, StoreError};
use web_sys::Storage;

/// `localStorage`-backed store. When storage is disabled (private
/// browsing, origin policy) reads answer `None` and writes fail, which
/// the state layer degrades from without surfacing anything to the user.
#[derive(Clone, Copy, Default)]
pub struct LocalKv;

fn local_storage() -> Option<Storage> {
    match web_sys::window()?.local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            tracing::warn!(?e, "localStorage is not accessible");
            None
        }
    }
}

impl KvStore for LocalKv {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage =
            local_storage().ok_or_else(|| StoreError("localStorage disabled".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError(format!("{:?}", e)))
    }
}
