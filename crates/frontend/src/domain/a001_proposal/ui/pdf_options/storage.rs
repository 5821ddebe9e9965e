use contracts::shared::pdf_options::{KeyValueStore, StoreError};
use wasm_bindgen::{JsCast, JsValue};

/// `window.localStorage` as a [`KeyValueStore`]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

fn get_local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StoreError::Unavailable)
}

fn backend_error(e: JsValue) -> StoreError {
    StoreError::Backend(format!("{:?}", e))
}

/// Map a failed `setItem` by its `DOMException` name
fn set_item_error(key: &str, exception_name: Option<&str>, detail: String) -> StoreError {
    match exception_name {
        // NS_ERROR_DOM_QUOTA_REACHED: старые версии Firefox
        Some("QuotaExceededError") | Some("NS_ERROR_DOM_QUOTA_REACHED") => {
            StoreError::QuotaExceeded(key.to_string())
        }
        _ => StoreError::Backend(detail),
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        get_local_storage()?.get_item(key).map_err(backend_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        get_local_storage()?.set_item(key, value).map_err(|e| {
            let name = e.dyn_ref::<web_sys::DomException>().map(|d| d.name());
            set_item_error(key, name.as_deref(), format!("{:?}", e))
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        get_local_storage()?.remove_item(key).map_err(backend_error)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let storage = get_local_storage()?;
        let len = storage.length().map_err(backend_error)?;
        Ok((0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .collect())
    }
}
