//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use crate::{
    model::{
        DesktopState, DesktopTheme, DragSession, InteractionState, PointerPosition, ThemeMode,
        Viewport, WindowId, WindowKind, WindowMode, WindowPosition, WindowRecord,
    },
    window_manager::{allocate_z_index, initial_window_geometry},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open the window for `kind`, or restore and raise it if it is already open.
    OpenWindow {
        /// Content category to open.
        kind: WindowKind,
        /// Viewport used to center a newly created window.
        viewport: Viewport,
        /// Creation timestamp used to build the window id.
        opened_at_ms: u64,
    },
    /// Remove a window permanently.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Toggle the minimized state; stacking order is untouched.
    MinimizeWindow {
        /// Window to minimize or restore.
        window_id: WindowId,
    },
    /// Toggle the maximized state; stored geometry is untouched.
    MaximizeWindow {
        /// Window to maximize or restore.
        window_id: WindowId,
    },
    /// Raise a window to a fresh top z-index.
    FocusWindow {
        /// Window to raise.
        window_id: WindowId,
    },
    /// Overwrite a window position.
    UpdateWindowPosition {
        /// Window to move.
        window_id: WindowId,
        /// New top-left corner.
        position: WindowPosition,
    },
    /// Raise a window and start a title-bar drag.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// End the active drag.
    EndMove,
    /// Select a theme mode.
    SetThemeMode {
        /// Mode to apply.
        mode: ThemeMode,
    },
    /// Flip between light and dark.
    ToggleThemeMode,
    /// Apply a theme loaded at boot without persisting it again.
    HydrateTheme {
        /// Stored theme.
        theme: DesktopTheme,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current theme preference.
    PersistTheme,
    /// Move keyboard focus into a window that was just opened or brought back.
    FocusWindowContent(WindowId),
}

/// Applies a [`DesktopAction`] and returns the side effects it requests.
///
/// Every action is total: one that names a window not in the collection changes nothing and
/// returns no effects.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow {
            kind,
            viewport,
            opened_at_ms,
        } => {
            let window_id = open_window(state, kind, viewport, opened_at_ms);
            effects.push(RuntimeEffect::FocusWindowContent(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            state.windows.retain(|w| w.id != window_id);
            if interaction
                .dragging
                .as_ref()
                .is_some_and(|session| session.window_id == window_id)
            {
                interaction.dragging = None;
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if let Some(window) = find_window_mut(state, &window_id) {
                window.mode = window.mode.toggled_minimized();
            }
        }
        DesktopAction::MaximizeWindow { window_id } => {
            if let Some(window) = find_window_mut(state, &window_id) {
                window.mode = window.mode.toggled_maximized();
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            focus_window(state, &window_id);
        }
        DesktopAction::UpdateWindowPosition {
            window_id,
            position,
        } => {
            if let Some(window) = find_window_mut(state, &window_id) {
                window.position = position;
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            if !focus_window(state, &window_id) {
                return effects;
            }
            interaction.dragging = state
                .window(&window_id)
                .filter(|w| w.mode == WindowMode::Normal)
                .map(|w| DragSession {
                    window_id: w.id.clone(),
                    pointer_start: pointer,
                    position_start: w.position,
                });
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::SetThemeMode { mode } => {
            if state.theme.mode != mode {
                state.theme.mode = mode;
                effects.push(RuntimeEffect::PersistTheme);
            }
        }
        DesktopAction::ToggleThemeMode => {
            state.theme.mode = state.theme.mode.toggled();
            effects.push(RuntimeEffect::PersistTheme);
        }
        DesktopAction::HydrateTheme { theme } => {
            state.theme = theme;
        }
    }
    effects
}

fn open_window(
    state: &mut DesktopState,
    kind: WindowKind,
    viewport: Viewport,
    opened_at_ms: u64,
) -> WindowId {
    let z_index = allocate_z_index(state);

    if let Some(existing) = state.windows.iter_mut().find(|w| w.kind == kind) {
        existing.mode = existing.mode.restored();
        existing.z_index = z_index;
        return existing.id.clone();
    }

    let (position, size) = initial_window_geometry(viewport, state.windows.len());
    let id = WindowId::for_kind(kind, opened_at_ms);
    state.windows.push(WindowRecord {
        id: id.clone(),
        kind,
        title: kind.title().to_string(),
        mode: WindowMode::Normal,
        position,
        size,
        z_index,
    });
    id
}

/// Raises `window_id` to a fresh z-index, even when it is already on top.
///
/// Returns `false` when the window does not exist.
fn focus_window(state: &mut DesktopState, window_id: &WindowId) -> bool {
    if state.window(window_id).is_none() {
        return false;
    }
    let z_index = allocate_z_index(state);
    if let Some(window) = find_window_mut(state, window_id) {
        window.z_index = z_index;
    }
    true
}

fn find_window_mut<'a>(
    state: &'a mut DesktopState,
    window_id: &WindowId,
) -> Option<&'a mut WindowRecord> {
    state.windows.iter_mut().find(|w| &w.id == window_id)
}
