//! Typed host-service contracts shared by the desktop runtime and browser adapters.
//!
//! Concrete browser implementations live in `platform_host_web`. The in-memory doubles here back
//! unit tests and non-browser builds.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod contact;
pub mod prefs;
pub mod time;

pub use contact::{
    normalize_health_response, normalize_submit_response, ContactService, ContactServiceFuture,
    HealthCheck, MemoryContactService, SubmitOutcome, MSG_NETWORK_ERROR, MSG_SERVER_OFFLINE,
};
pub use prefs::{load_pref, save_pref, MemoryPrefsStore, PrefsError, PrefsStore};
pub use time::{unix_time_ms_now, MonotonicClock};
