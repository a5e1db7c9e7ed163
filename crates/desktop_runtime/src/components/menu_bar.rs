use std::time::Duration;

use super::*;

/// Title shown when no window is active.
const DESKTOP_TITLE: &str = "Portfolio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ClockSnapshot {
    pub(super) weekday: u32,
    pub(super) hour: u32,
    pub(super) minute: u32,
}

impl ClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                weekday: date.get_day(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                weekday: 4,
                hour: 0,
                minute: 0,
            }
        }
    }
}

/// `"Mon 9:05 AM"` style label; `weekday` is 0 for Sunday.
pub(super) fn format_menu_clock(snapshot: ClockSnapshot) -> String {
    const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    let day = DAYS[(snapshot.weekday % 7) as usize];
    let mut hour = snapshot.hour % 12;
    if hour == 0 {
        hour = 12;
    }
    let suffix = if snapshot.hour >= 12 { "PM" } else { "AM" };
    format!("{day} {hour}:{:02} {suffix}", snapshot.minute)
}

#[component]
pub(super) fn MenuBar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let clock_now = create_rw_signal(ClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(15),
    ) {
        on_cleanup(move || interval.clear());
    }

    let active_title = move || {
        state.with(|s| {
            s.active_window()
                .map(|w| w.title.clone())
                .unwrap_or_else(|| DESKTOP_TITLE.to_string())
        })
    };
    let dark = move || state.with(|s| s.theme.mode == ThemeMode::Dark);

    view! {
        <header class="menu-bar" role="menubar" style=format!("height:{MENU_BAR_HEIGHT_PX}px;")>
            <span class="menu-bar-brand" aria-hidden="true">"◆"</span>
            <span class="menu-bar-title">{active_title}</span>
            <div class="menu-bar-status">
                <button
                    class="menu-bar-theme-toggle"
                    aria-pressed=move || dark().to_string()
                    aria-label=move || {
                        if dark() { "Switch to light theme" } else { "Switch to dark theme" }
                    }
                    on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleThemeMode)
                >
                    {move || if dark() { "☀" } else { "☾" }}
                </button>
                <time class="menu-bar-clock">{move || format_menu_clock(clock_now.get())}</time>
            </div>
        </header>
    }
}
