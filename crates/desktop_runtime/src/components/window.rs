use super::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Inline style for a window frame; maximized geometry is derived from the viewport here and
/// never stored on the record.
pub(super) fn window_frame_style(win: &WindowRecord, viewport: Viewport) -> String {
    let (position, size) = if win.mode.is_maximized() {
        maximized_geometry(viewport)
    } else {
        (win.position, win.size)
    };
    let display = if win.mode.is_minimized() {
        "display:none;"
    } else {
        ""
    };
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};{}",
        position.x, position.y, size.width, size.height, win.z_index, display
    )
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId, viewport: ReadSignal<Viewport>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let dom_id = window_id.dom_id();
    let initial = runtime.state.with_untracked(|s| s.window(&window_id).cloned());
    let window_id = store_value(window_id);

    let window = create_memo(move |_| {
        window_id.with_value(|id| runtime.state.with(|s| s.window(id).cloned()))
    });
    let is_active = create_memo(move |_| {
        window_id.with_value(|id| {
            runtime
                .state
                .with(|s| s.active_window().is_some_and(|w| &w.id == id))
        })
    });

    // Every press raises, even on the active window.
    let focus = move |_: web_sys::PointerEvent| {
        runtime.dispatch_action(DesktopAction::FocusWindow {
            window_id: window_id.get_value(),
        });
    };
    let minimize = move || {
        runtime.dispatch_action(DesktopAction::MinimizeWindow {
            window_id: window_id.get_value(),
        })
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::MaximizeWindow {
            window_id: window_id.get_value(),
        })
    };
    let close = move || {
        runtime.dispatch_action(DesktopAction::CloseWindow {
            window_id: window_id.get_value(),
        })
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if ev.pointer_type() == "mouse" && ev.button() != 0 {
            return;
        }
        if ev.pointer_type() != "mouse" && !ev.is_primary() {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id: window_id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        toggle_maximize();
    };

    let Some(initial) = initial else {
        return ().into_view();
    };
    let title = initial.title.clone();
    let kind = initial.kind;

    let frame_style = move || {
        window
            .get()
            .map(|win| window_frame_style(&win, viewport.get()))
            .unwrap_or_default()
    };
    let frame_class = move || {
        let Some(win) = window.get() else {
            return "desktop-window".to_string();
        };
        let focused_class = if is_active.get() { " focused" } else { "" };
        let minimized_class = if win.mode.is_minimized() {
            " minimized"
        } else {
            ""
        };
        let maximized_class = if win.mode.is_maximized() {
            " maximized"
        } else {
            ""
        };
        format!("desktop-window{focused_class}{minimized_class}{maximized_class}")
    };
    let maximized = move || window.get().is_some_and(|w| w.mode.is_maximized());
    let hidden = move || window.get().is_some_and(|w| w.mode.is_minimized()).to_string();

    view! {
        <section
            id=dom_id
            class=frame_class
            style=frame_style
            tabindex="-1"
            role="dialog"
            aria-label=title.clone()
            aria-hidden=hidden
            on:pointerdown=focus
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <div class="titlebar-title">
                    <span class="titlebar-icon" aria-hidden="true">{kind.icon_glyph()}</span>
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        class="titlebar-button minimize"
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            minimize();
                        }
                    />
                    <button
                        class="titlebar-button maximize"
                        aria-label=move || {
                            if maximized() { "Restore window" } else { "Maximize window" }
                        }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    />
                    <button
                        class="titlebar-button close"
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            close();
                        }
                    />
                </div>
            </header>
            <div class="window-body">
                <WindowContent kind=kind />
            </div>
        </section>
    }
    .into_view()
}
