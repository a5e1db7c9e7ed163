//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! - [`contact`]: `fetch`-backed contact backend client.
//! - [`prefs`]: `localStorage`-backed preference store.
//!
//! Non-wasm builds compile the same types with inert fallbacks so the desktop runtime can be unit
//! tested natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod contact;
pub mod prefs;

pub use contact::{api_base_url, WebContactService, DEFAULT_API_BASE_URL};
pub use prefs::WebPrefsStore;
