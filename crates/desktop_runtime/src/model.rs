use std::fmt;

use serde::{Deserialize, Serialize};

/// First value handed out by the z-order counter is `BASE_Z_INDEX + 1`.
pub const BASE_Z_INDEX: u64 = 100;
pub const DEFAULT_WINDOW_SIZE: WindowSize = WindowSize {
    width: 800,
    height: 600,
};
pub const MIN_WINDOW_SIZE: WindowSize = WindowSize {
    width: 320,
    height: 240,
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub String);

impl WindowId {
    /// Builds the `"{kind}-{opened_at_ms}"` token for a freshly opened window.
    pub fn for_kind(kind: WindowKind, opened_at_ms: u64) -> Self {
        Self(format!("{}-{}", kind.slug(), opened_at_ms))
    }

    pub fn dom_id(&self) -> String {
        format!("desktop-window-{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    About,
    Projects,
    Skills,
    Contact,
    Blog,
}

impl WindowKind {
    pub const ALL: [WindowKind; 5] = [
        Self::About,
        Self::Projects,
        Self::Skills,
        Self::Blog,
        Self::Contact,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
            Self::Blog => "blog",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::About => "About Me",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Contact => "Contact",
            Self::Blog => "Blog",
        }
    }

    pub fn icon_glyph(self) -> &'static str {
        match self {
            Self::About => "👤",
            Self::Projects => "📁",
            Self::Skills => "🛠",
            Self::Contact => "✉",
            Self::Blog => "📝",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

/// Visible desktop area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Display state of an open window.
///
/// Minimized takes precedence over maximized; `maximized_on_restore` remembers which state a
/// minimized window returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowMode {
    #[default]
    Normal,
    Maximized,
    Minimized { maximized_on_restore: bool },
}

impl WindowMode {
    pub fn is_minimized(self) -> bool {
        matches!(self, Self::Minimized { .. })
    }

    pub fn is_maximized(self) -> bool {
        matches!(self, Self::Maximized)
    }

    /// Leaves minimized, returning to the remembered state; other modes are unchanged.
    pub fn restored(self) -> Self {
        match self {
            Self::Minimized {
                maximized_on_restore: true,
            } => Self::Maximized,
            Self::Minimized {
                maximized_on_restore: false,
            } => Self::Normal,
            other => other,
        }
    }

    pub fn toggled_minimized(self) -> Self {
        match self {
            Self::Normal => Self::Minimized {
                maximized_on_restore: false,
            },
            Self::Maximized => Self::Minimized {
                maximized_on_restore: true,
            },
            minimized => minimized.restored(),
        }
    }

    /// A minimized window is restored straight into maximized.
    pub fn toggled_maximized(self) -> Self {
        match self {
            Self::Normal | Self::Minimized { .. } => Self::Maximized,
            Self::Maximized => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: WindowKind,
    pub title: String,
    pub mode: WindowMode,
    pub position: WindowPosition,
    pub size: WindowSize,
    pub z_index: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn css_id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesktopTheme {
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Last z-index handed out; never decreases and is never compacted.
    pub next_z_index: u64,
    pub windows: Vec<WindowRecord>,
    pub theme: DesktopTheme,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_z_index: BASE_Z_INDEX,
            windows: Vec::new(),
            theme: DesktopTheme::default(),
        }
    }
}

impl DesktopState {
    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn window_for_kind(&self, kind: WindowKind) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.kind == kind)
    }

    pub fn topmost_window(&self) -> Option<&WindowRecord> {
        self.windows.iter().max_by_key(|w| w.z_index)
    }

    /// Topmost window that is not minimized; this is what the menu bar reports as active.
    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| !w.mode.is_minimized())
            .max_by_key(|w| w.z_index)
    }

    pub fn windows_in_draw_order(&self) -> Vec<WindowRecord> {
        let mut windows = self.windows.clone();
        windows.sort_by_key(|w| w.z_index);
        windows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub position_start: WindowPosition,
}

impl DragSession {
    /// Window position that keeps the grab point under `pointer`.
    pub fn position_at(&self, pointer: PointerPosition) -> WindowPosition {
        self.position_start.offset(
            pointer.x - self.pointer_start.x,
            pointer.y - self.pointer_start.y,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
}
