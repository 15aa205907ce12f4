//! Workspace records: an isolated desktop with its own windows, viewport,
//! and view preferences.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::model::geometry::Viewport;
use crate::model::window::{Window, WindowId};

/// First `z` values are allocated above this base.
pub const BASE_Z: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkspaceId(u64);

impl WorkspaceId {
    pub fn from_serial(serial: u64) -> WorkspaceId { WorkspaceId(serial) }
}

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "instance-{}", self.0)
    }
}

/// Whether background pointer gestures drive the canvas viewport or are
/// left to window content.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Canvas,
    Window,
}

/// How the embeddable IDE tool opens: an external tab, or an ordinary
/// window on the canvas.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IdeOpenMode {
    #[default]
    Tab,
    Window,
}

/// Facet over the launchable tab list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TabFilter {
    #[default]
    All,
    Engine,
    Project,
    Ide,
}

bitflags! {
    /// Named overlay layers of the decorative firmament scene.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FirmamentLayers: u8 {
        const ENTITIES = 1 << 0;
        const EVENTS   = 1 << 1;
        const SECTORS  = 1 << 2;
        const RISKS    = 1 << 3;
    }
}

impl Default for FirmamentLayers {
    fn default() -> Self { FirmamentLayers::ENTITIES | FirmamentLayers::SECTORS }
}

/// One nameable layer, for toggles and the renderer's layer map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FirmamentLayer {
    Entities,
    Events,
    Sectors,
    Risks,
}

impl FirmamentLayer {
    pub fn flag(&self) -> FirmamentLayers {
        match self {
            FirmamentLayer::Entities => FirmamentLayers::ENTITIES,
            FirmamentLayer::Events => FirmamentLayers::EVENTS,
            FirmamentLayer::Sectors => FirmamentLayers::SECTORS,
            FirmamentLayer::Risks => FirmamentLayers::RISKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub title: String,
    /// Insertion order is irrelevant; stacking comes from each window's `z`.
    pub windows: Vec<Window>,
    /// Weak reference: may point at nothing after a close.
    pub active_window: Option<WindowId>,
    /// Monotonic stacking counter, the source of truth for z allocation.
    pub top_z: i64,
    pub viewport: Viewport,
    pub firmament_locked: bool,
    pub interaction_mode: InteractionMode,
    pub show_stars: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub firmament_layers: FirmamentLayers,
    pub filter: TabFilter,
    pub dock_scale: f64,
    pub ide_open_mode: IdeOpenMode,
}

impl Workspace {
    pub fn fresh(id: WorkspaceId, title: impl Into<String>) -> Workspace {
        Workspace {
            id,
            title: title.into(),
            windows: Vec::new(),
            active_window: None,
            top_z: BASE_Z,
            viewport: Viewport::default(),
            firmament_locked: true,
            interaction_mode: InteractionMode::Canvas,
            show_stars: true,
            auto_rotate: true,
            auto_rotate_speed: 0.2,
            firmament_layers: FirmamentLayers::default(),
            filter: TabFilter::All,
            dock_scale: 1.0,
            ide_open_mode: IdeOpenMode::Tab,
        }
    }

    pub fn next_z(&mut self) -> i64 {
        self.top_z += 1;
        self.top_z
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn active_window_record(&self) -> Option<&Window> {
        self.active_window.and_then(|id| self.window(id))
    }
}

/// A partial settings update merged into the active workspace: the
/// universal write path for every toggle. Unset fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub firmament_locked: Option<bool>,
    pub interaction_mode: Option<InteractionMode>,
    pub show_stars: Option<bool>,
    pub auto_rotate: Option<bool>,
    pub auto_rotate_speed: Option<f64>,
    pub filter: Option<TabFilter>,
    pub dock_scale: Option<f64>,
    pub ide_open_mode: Option<IdeOpenMode>,
}

impl SettingsPatch {
    pub fn apply(&self, workspace: &mut Workspace) {
        if let Some(v) = self.firmament_locked {
            workspace.firmament_locked = v;
        }
        if let Some(v) = self.interaction_mode {
            workspace.interaction_mode = v;
        }
        if let Some(v) = self.show_stars {
            workspace.show_stars = v;
        }
        if let Some(v) = self.auto_rotate {
            workspace.auto_rotate = v;
        }
        if let Some(v) = self.auto_rotate_speed {
            workspace.auto_rotate_speed = v;
        }
        if let Some(v) = self.filter {
            workspace.filter = v;
        }
        if let Some(v) = self.dock_scale {
            workspace.dock_scale = v;
        }
        if let Some(v) = self.ide_open_mode {
            workspace.ide_open_mode = v;
        }
    }
}
