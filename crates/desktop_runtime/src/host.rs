//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Services are injected as trait objects so tests and non-browser builds can swap in the
//! in-memory doubles from `platform_host`.

use std::rc::Rc;

use leptos::{logging, Callable, Callback, SignalWithUntracked};
use platform_host::{ContactService, MonotonicClock, PrefsStore};
use platform_host_web::{WebContactService, WebPrefsStore};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    model::{Viewport, WindowId},
    persistence,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    prefs: Rc<dyn PrefsStore>,
    contact: Rc<dyn ContactService>,
    clock: Rc<MonotonicClock>,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(Rc::new(WebPrefsStore), Rc::new(WebContactService::default()))
    }
}

impl DesktopHostContext {
    /// Builds a host bundle from explicit services.
    pub fn new(prefs: Rc<dyn PrefsStore>, contact: Rc<dyn ContactService>) -> Self {
        Self {
            prefs,
            contact,
            clock: Rc::new(MonotonicClock::new()),
        }
    }

    /// Returns the configured preference store.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    /// Returns the configured contact backend client.
    pub fn contact_service(&self) -> Rc<dyn ContactService> {
        self.contact.clone()
    }

    /// Returns a unique creation timestamp for a new window id.
    pub fn next_window_timestamp_ms(&self) -> u64 {
        self.clock.next_ms()
    }

    /// Loads persisted preferences and feeds them through the reducer.
    pub fn hydrate(&self, dispatch: Callback<DesktopAction>) {
        if let Some(theme) = persistence::load_theme(self.prefs.as_ref()) {
            dispatch.call(DesktopAction::HydrateTheme { theme });
        }
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistTheme => {
                let theme = runtime.state.with_untracked(|state| state.theme.clone());
                if let Err(err) = persistence::persist_theme(self.prefs.as_ref(), &theme) {
                    logging::warn!("persist theme failed: {err}");
                }
            }
            RuntimeEffect::FocusWindowContent(window_id) => self.focus_window_content(window_id),
        }
    }

    /// Moves keyboard focus to the window element once it is in the DOM.
    pub fn focus_window_content(&self, window_id: WindowId) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dom_id = window_id.dom_id();
            let callback = Closure::once_into_js(move || {
                let element = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id(&dom_id))
                    .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
                if let Some(element) = element {
                    let _ = element.focus();
                }
            });
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = window_id;
    }

    /// Returns the current browser viewport, or the default outside a browser.
    pub fn desktop_viewport(&self) -> Viewport {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let fallback = Viewport::default();
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(fallback.width);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(fallback.height);
                return Viewport { width, height };
            }
        }

        Viewport::default()
    }
}
