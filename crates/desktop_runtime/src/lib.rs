//! Desktop-metaphor portfolio shell: window-manager state, reducer, and Leptos components.

pub mod apps;
pub mod components;
mod effect_executor;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
pub use model::*;
pub use persistence::{load_theme, persist_theme, THEME_KEY};
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
