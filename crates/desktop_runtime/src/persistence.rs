//! Theme preference persistence.

use platform_host::{load_pref, save_pref, PrefsError, PrefsStore};

use crate::model::DesktopTheme;

/// Preference key holding the serialized [`DesktopTheme`].
pub const THEME_KEY: &str = "portfolio.theme.v1";

/// Loads the stored theme, falling back to `None` when nothing usable is stored.
pub fn load_theme(prefs: &dyn PrefsStore) -> Option<DesktopTheme> {
    match load_pref::<DesktopTheme>(prefs, THEME_KEY) {
        Ok(theme) => theme,
        Err(PrefsError::Unavailable) => None,
        Err(err) => {
            leptos::logging::warn!("theme preference load failed: {err}");
            None
        }
    }
}

/// Stores the theme preference.
///
/// # Errors
///
/// Returns the store's error when the value cannot be written.
pub fn persist_theme(prefs: &dyn PrefsStore, theme: &DesktopTheme) -> Result<(), PrefsError> {
    save_pref(prefs, THEME_KEY, theme)
}
