//! Serializable snapshots answered to state queries.
//!
//! These are read-only projections of engine state: stable shapes for the
//! binary's snapshot output and any UI polling the reactor.

use serde::{Deserialize, Serialize};

use crate::model::geometry::Viewport;
use crate::model::window::{Extent, Window};
use crate::model::workspace::{FirmamentLayer, Workspace};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowData {
    pub id: String,
    pub code: String,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: Extent,
    pub height: Extent,
    pub z: i64,
    pub pinned: bool,
    pub fullscreen: bool,
    pub is_active: bool,
}

impl WindowData {
    pub fn from_window(window: &Window, is_active: bool) -> WindowData {
        WindowData {
            id: window.display_id(),
            code: window.code.clone(),
            title: window.title.clone(),
            x: window.x,
            y: window.y,
            width: window.width,
            height: window.height,
            z: window.z,
            pinned: window.pinned,
            fullscreen: window.fullscreen,
            is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceData {
    pub id: String,
    pub index: usize,
    pub title: String,
    pub is_active: bool,
    pub window_count: usize,
    pub top_z: i64,
    pub viewport: Viewport,
    pub interaction_mode: String,
    pub filter: String,
    pub firmament_locked: bool,
    pub show_stars: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub dock_scale: f64,
    pub ide_open_mode: String,
    /// Layer name to enabled flag, in declaration order.
    pub firmament_layers: Vec<(String, bool)>,
    pub windows: Vec<WindowData>,
}

impl WorkspaceData {
    pub fn from_workspace(workspace: &Workspace, index: usize, is_active: bool) -> WorkspaceData {
        use strum::IntoEnumIterator;

        let windows = workspace
            .windows
            .iter()
            .map(|w| WindowData::from_window(w, workspace.active_window == Some(w.id)))
            .collect();
        WorkspaceData {
            id: workspace.id.to_string(),
            index,
            title: workspace.title.clone(),
            is_active,
            window_count: workspace.windows.len(),
            top_z: workspace.top_z,
            viewport: workspace.viewport,
            interaction_mode: workspace.interaction_mode.to_string(),
            filter: workspace.filter.to_string(),
            firmament_locked: workspace.firmament_locked,
            show_stars: workspace.show_stars,
            auto_rotate: workspace.auto_rotate,
            auto_rotate_speed: workspace.auto_rotate_speed,
            dock_scale: workspace.dock_scale,
            ide_open_mode: workspace.ide_open_mode.to_string(),
            firmament_layers: FirmamentLayer::iter()
                .map(|layer| {
                    (
                        layer.to_string(),
                        workspace.firmament_layers.contains(layer.flag()),
                    )
                })
                .collect(),
            windows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockData {
    pub left: f64,
    pub bottom: f64,
}
