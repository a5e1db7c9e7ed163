use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DockIndicator {
    Closed,
    Open,
    Minimized,
}

pub(super) fn dock_indicator(state: &DesktopState, kind: WindowKind) -> DockIndicator {
    match state.window_for_kind(kind) {
        None => DockIndicator::Closed,
        Some(win) if win.mode.is_minimized() => DockIndicator::Minimized,
        Some(_) => DockIndicator::Open,
    }
}

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <nav class="dock" aria-label="Dock" style=format!("height:{DOCK_HEIGHT_PX}px;")>
            {apps::dock_kinds()
                .iter()
                .copied()
                .map(|kind| {
                    let indicator = move || state.with(|s| dock_indicator(s, kind));
                    view! {
                        <button
                            class="dock-item"
                            class:open=move || indicator() != DockIndicator::Closed
                            class:minimized=move || indicator() == DockIndicator::Minimized
                            title=kind.title()
                            aria-label=kind.title()
                            on:click=move |_| runtime.open_window(kind)
                        >
                            <span class="dock-icon" aria-hidden="true">{kind.icon_glyph()}</span>
                            <span class="dock-indicator" aria-hidden="true"></span>
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
