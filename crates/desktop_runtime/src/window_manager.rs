//! Window-manager helpers shared by the reducer and the shell components.

use crate::model::{
    DesktopState, Viewport, WindowPosition, WindowSize, DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE,
};

/// Height of the top menu bar in px.
pub const MENU_BAR_HEIGHT_PX: i32 = 28;
/// Height reserved for the dock at the bottom of the viewport.
pub const DOCK_HEIGHT_PX: i32 = 72;
/// Height of a window title bar.
pub const TITLE_BAR_HEIGHT_PX: i32 = 32;
/// Diagonal offset applied per already-open window when a new one opens.
pub const OPEN_STAGGER_PX: i32 = 30;
/// Margin kept between a newly opened window and the viewport edges when shrinking to fit.
pub const VIEWPORT_MARGIN_PX: i32 = 24;
/// Minimum horizontal strip of a dragged window that stays on screen.
pub const DRAG_VISIBLE_MIN_PX: i32 = 80;

/// Allocates the next z-index from the state-owned counter.
///
/// Every call returns a value strictly greater than all previous ones.
pub fn allocate_z_index(state: &mut DesktopState) -> u64 {
    state.next_z_index = state.next_z_index.saturating_add(1);
    state.next_z_index
}

/// Geometry for a newly opened window: default size shrunk to fit, centered, then staggered by
/// the number of windows already open.
pub fn initial_window_geometry(
    viewport: Viewport,
    open_count: usize,
) -> (WindowPosition, WindowSize) {
    let usable_height = viewport.height - MENU_BAR_HEIGHT_PX - DOCK_HEIGHT_PX;
    let size = WindowSize {
        width: DEFAULT_WINDOW_SIZE
            .width
            .min(viewport.width - 2 * VIEWPORT_MARGIN_PX)
            .max(MIN_WINDOW_SIZE.width),
        height: DEFAULT_WINDOW_SIZE
            .height
            .min(usable_height - 2 * VIEWPORT_MARGIN_PX)
            .max(MIN_WINDOW_SIZE.height),
    };

    let stagger = OPEN_STAGGER_PX.saturating_mul(open_count.min(i32::MAX as usize) as i32);
    let x = ((viewport.width - size.width) / 2).max(0) + stagger;
    let y = (MENU_BAR_HEIGHT_PX + (usable_height - size.height) / 2).max(MENU_BAR_HEIGHT_PX)
        + stagger;

    (WindowPosition { x, y }, size)
}

/// Render-time geometry of a maximized window: the full area between menu bar and dock.
///
/// Maximizing never writes this into the window record.
pub fn maximized_geometry(viewport: Viewport) -> (WindowPosition, WindowSize) {
    (
        WindowPosition {
            x: 0,
            y: MENU_BAR_HEIGHT_PX,
        },
        WindowSize {
            width: viewport.width.max(MIN_WINDOW_SIZE.width),
            height: (viewport.height - MENU_BAR_HEIGHT_PX - DOCK_HEIGHT_PX)
                .max(MIN_WINDOW_SIZE.height),
        },
    )
}

/// Advisory drag clamp applied by the UI so the title bar stays reachable.
///
/// The reducer accepts any position; this is only used before dispatching a drag update.
pub fn clamp_position_to_viewport(
    position: WindowPosition,
    size: WindowSize,
    viewport: Viewport,
) -> WindowPosition {
    let min_x = DRAG_VISIBLE_MIN_PX - size.width;
    let max_x = (viewport.width - DRAG_VISIBLE_MIN_PX).max(min_x);
    let min_y = MENU_BAR_HEIGHT_PX;
    let max_y = (viewport.height - DOCK_HEIGHT_PX - TITLE_BAR_HEIGHT_PX).max(min_y);

    WindowPosition {
        x: position.x.max(min_x).min(max_x),
        y: position.y.max(min_y).min(max_y),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1440,
        height: 900,
    };

    #[test]
    fn z_index_counter_is_strictly_increasing() {
        let mut state = DesktopState::default();
        let a = allocate_z_index(&mut state);
        let b = allocate_z_index(&mut state);
        assert!(b > a);
        assert_eq!(state.next_z_index, b);
    }

    #[test]
    fn first_window_is_centered_in_usable_area() {
        let (position, size) = initial_window_geometry(VIEWPORT, 0);
        assert_eq!(size, DEFAULT_WINDOW_SIZE);
        assert_eq!(position.x, (1440 - 800) / 2);
        assert_eq!(position.y, MENU_BAR_HEIGHT_PX + (900 - 28 - 72 - 600) / 2);
    }

    #[test]
    fn stagger_grows_with_open_window_count() {
        let (first, _) = initial_window_geometry(VIEWPORT, 0);
        let (third, _) = initial_window_geometry(VIEWPORT, 2);
        assert_eq!(third, first.offset(60, 60));
    }

    #[test]
    fn small_viewport_shrinks_window_but_not_below_minimum() {
        let (position, size) = initial_window_geometry(
            Viewport {
                width: 300,
                height: 300,
            },
            0,
        );
        assert_eq!(size, MIN_WINDOW_SIZE);
        assert_eq!(position.x, 0);
        assert!(position.y >= MENU_BAR_HEIGHT_PX);
    }

    #[test]
    fn maximized_geometry_fills_space_between_bars() {
        let (position, size) = maximized_geometry(VIEWPORT);
        assert_eq!(position, WindowPosition { x: 0, y: 28 });
        assert_eq!(
            size,
            WindowSize {
                width: 1440,
                height: 800
            }
        );
    }

    #[test]
    fn clamp_keeps_title_bar_reachable() {
        let size = DEFAULT_WINDOW_SIZE;
        let clamped =
            clamp_position_to_viewport(WindowPosition { x: -5000, y: -40 }, size, VIEWPORT);
        assert_eq!(clamped.x, DRAG_VISIBLE_MIN_PX - size.width);
        assert_eq!(clamped.y, MENU_BAR_HEIGHT_PX);

        let clamped =
            clamp_position_to_viewport(WindowPosition { x: 5000, y: 5000 }, size, VIEWPORT);
        assert_eq!(clamped.x, 1440 - DRAG_VISIBLE_MIN_PX);
        assert_eq!(clamped.y, 900 - DOCK_HEIGHT_PX - TITLE_BAR_HEIGHT_PX);
    }

    #[test]
    fn clamp_leaves_in_bounds_positions_alone() {
        let position = WindowPosition { x: 200, y: 150 };
        assert_eq!(
            clamp_position_to_viewport(position, DEFAULT_WINDOW_SIZE, VIEWPORT),
            position
        );
    }
}
