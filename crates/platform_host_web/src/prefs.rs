//! `localStorage`-backed preference store.

use platform_host::{PrefsError, PrefsStore};

/// Browser preference store backed by `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPrefsStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, PrefsError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(PrefsError::Unavailable)
}

impl PrefsStore for WebPrefsStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, PrefsError> {
        #[cfg(target_arch = "wasm32")]
        {
            Ok(local_storage()?.get_item(key).ok().flatten())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(PrefsError::Unavailable)
        }
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), PrefsError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, raw_json)
                .map_err(|e| PrefsError::Write(format!("{e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Err(PrefsError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| PrefsError::Write(format!("{e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(PrefsError::Unavailable)
        }
    }
}
