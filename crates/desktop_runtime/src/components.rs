//! Desktop shell UI composition and interaction surfaces.

mod dock;
mod menu_bar;
mod window;

use leptos::*;

use self::{dock::Dock, menu_bar::MenuBar, window::DesktopWindow};
use crate::{
    apps::{self, WindowContent},
    model::{
        DesktopState, InteractionState, PointerPosition, ThemeMode, Viewport, WindowId, WindowKind,
        WindowPosition, WindowRecord,
    },
    reducer::DesktopAction,
    window_manager::{
        clamp_position_to_viewport, maximized_geometry, DOCK_HEIGHT_PX, MENU_BAR_HEIGHT_PX,
    },
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell UI: menu bar, window layer, and dock.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let viewport = create_rw_signal(runtime.host.get_value().desktop_viewport());

    let resize_listener = window_event_listener(ev::resize, move |_| {
        viewport.set(runtime.host.get_value().desktop_viewport());
    });
    on_cleanup(move || resize_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let target = runtime.interaction.with_untracked(|interaction| {
            state.with_untracked(|desktop| {
                drag_target_position(desktop, interaction, pointer, viewport.get_untracked())
            })
        });
        if let Some((window_id, position)) = target {
            runtime.dispatch_action(DesktopAction::UpdateWindowPosition {
                window_id,
                position,
            });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            data-theme=move || state.with(|s| s.theme.mode.css_id())
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <MenuBar />
            <div class="desktop-window-layer">
                <For
                    each=move || state.with(|s| s.windows.clone())
                    key=|win| win.id.clone()
                    let:win
                >
                    <DesktopWindow window_id=win.id viewport=viewport.read_only() />
                </For>
            </div>
            <Dock />
        </div>
    }
}

/// Where the dragged window should move for `pointer`, after the advisory viewport clamp.
///
/// Returns `None` when no drag is active or the dragged window has gone away.
pub(crate) fn drag_target_position(
    state: &DesktopState,
    interaction: &InteractionState,
    pointer: PointerPosition,
    viewport: Viewport,
) -> Option<(WindowId, WindowPosition)> {
    let session = interaction.dragging.as_ref()?;
    let window = state.window(&session.window_id)?;
    let position = clamp_position_to_viewport(session.position_at(pointer), window.size, viewport);
    (position != window.position).then(|| (session.window_id.clone(), position))
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    if runtime
        .interaction
        .with_untracked(|interaction| interaction.dragging.is_some())
    {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{
        dock::{dock_indicator, DockIndicator},
        menu_bar::{format_menu_clock, ClockSnapshot},
        window::window_frame_style,
        *,
    };
    use crate::reducer::reduce_desktop;

    const VIEWPORT: Viewport = Viewport {
        width: 1440,
        height: 900,
    };

    fn desktop_with(kind: WindowKind) -> (DesktopState, InteractionState, WindowId) {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow {
                kind,
                viewport: VIEWPORT,
                opened_at_ms: 1,
            },
        );
        let id = state.window_for_kind(kind).unwrap().id.clone();
        (state, interaction, id)
    }

    #[test]
    fn drag_moves_by_pointer_delta() {
        let (mut state, mut interaction, id) = desktop_with(WindowKind::About);
        let start = state.window(&id).unwrap().position;
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id.clone(),
                pointer: PointerPosition { x: 400, y: 200 },
            },
        );

        let target = drag_target_position(
            &state,
            &interaction,
            PointerPosition { x: 420, y: 190 },
            VIEWPORT,
        );

        assert_eq!(target, Some((id, start.offset(20, -10))));
    }

    #[test]
    fn drag_target_is_clamped_and_none_without_session() {
        let (mut state, mut interaction, id) = desktop_with(WindowKind::Blog);
        assert_eq!(
            drag_target_position(&state, &interaction, PointerPosition { x: 0, y: 0 }, VIEWPORT),
            None
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id.clone(),
                pointer: PointerPosition { x: 500, y: 300 },
            },
        );
        let (_, position) = drag_target_position(
            &state,
            &interaction,
            PointerPosition { x: 500, y: -5000 },
            VIEWPORT,
        )
        .unwrap();
        assert_eq!(position.y, MENU_BAR_HEIGHT_PX);
    }

    #[test]
    fn maximized_frame_uses_render_time_geometry() {
        let (mut state, mut interaction, id) = desktop_with(WindowKind::Projects);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow {
                window_id: id.clone(),
            },
        );
        let win = state.window(&id).unwrap();

        let style = window_frame_style(win, VIEWPORT);

        assert!(style.starts_with("left:0px;top:28px;width:1440px;height:800px;"));
        assert_ne!(win.position, WindowPosition { x: 0, y: 28 });
    }

    #[test]
    fn minimized_frame_is_hidden() {
        let (mut state, mut interaction, id) = desktop_with(WindowKind::Skills);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow {
                window_id: id.clone(),
            },
        );

        let style = window_frame_style(state.window(&id).unwrap(), VIEWPORT);
        assert!(style.ends_with("display:none;"));
        assert_eq!(dock_indicator(&state, WindowKind::Skills), DockIndicator::Minimized);
        assert_eq!(dock_indicator(&state, WindowKind::Contact), DockIndicator::Closed);
    }

    #[test]
    fn menu_clock_uses_twelve_hour_time() {
        assert_eq!(
            format_menu_clock(ClockSnapshot {
                weekday: 1,
                hour: 0,
                minute: 5
            }),
            "Mon 12:05 AM"
        );
        assert_eq!(
            format_menu_clock(ClockSnapshot {
                weekday: 6,
                hour: 13,
                minute: 30
            }),
            "Sat 1:30 PM"
        );
    }
}
