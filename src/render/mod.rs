//! The one-directional seam to the decorative scene renderer.
//!
//! The reactor derives a [`SceneFrame`] from the active workspace after
//! every mutation and pushes it outward; nothing ever flows back.

use parking_lot::Mutex;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::model::registry::FIRMAMENT_CODE;
use crate::model::workspace::{FirmamentLayer, FirmamentLayers, Workspace};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    /// Content code steering the scene, `FIRMAMENT` while the lock is on.
    pub active_code: String,
    #[serde(serialize_with = "serialize_layers")]
    pub layers: FirmamentLayers,
    pub scale: f64,
    pub show_stars: bool,
    pub enable_rotation: bool,
}

fn serialize_layers<S>(layers: &FirmamentLayers, serializer: S) -> Result<S::Ok, S::Error>
where S: serde::Serializer {
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(4))?;
    for layer in FirmamentLayer::iter() {
        map.serialize_entry(&layer.to_string(), &layers.contains(layer.flag()))?;
    }
    map.end()
}

impl SceneFrame {
    pub fn derive(workspace: &Workspace) -> SceneFrame {
        let active_code = if workspace.firmament_locked {
            FIRMAMENT_CODE.to_string()
        } else {
            workspace
                .active_window_record()
                .map(|w| w.code.clone())
                .unwrap_or_else(|| FIRMAMENT_CODE.to_string())
        };
        SceneFrame {
            active_code,
            layers: workspace.firmament_layers,
            scale: workspace.viewport.scale,
            show_stars: workspace.show_stars,
            enable_rotation: workspace.auto_rotate,
        }
    }

    /// Layer name to enabled flag, in declaration order.
    pub fn layer_map(&self) -> Vec<(String, bool)> {
        FirmamentLayer::iter()
            .map(|layer| (layer.to_string(), self.layers.contains(layer.flag())))
            .collect()
    }
}

pub trait SceneSink: Send + Sync {
    fn present(&self, frame: &SceneFrame);
}

/// Default sink: logs frames and does nothing else. Stands in wherever no
/// real renderer is attached.
#[derive(Debug, Default)]
pub struct TracingSink;

impl SceneSink for TracingSink {
    fn present(&self, frame: &SceneFrame) {
        debug!(code = frame.active_code, scale = frame.scale, "scene frame");
    }
}

/// Collects presented frames; used by tests and the replay snapshotter.
#[derive(Debug, Default)]
pub struct CollectingSink {
    frames: Mutex<Vec<SceneFrame>>,
}

impl CollectingSink {
    pub fn frames(&self) -> Vec<SceneFrame> { self.frames.lock().clone() }

    pub fn last(&self) -> Option<SceneFrame> { self.frames.lock().last().cloned() }
}

impl SceneSink for CollectingSink {
    fn present(&self, frame: &SceneFrame) { self.frames.lock().push(frame.clone()); }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::window::{Extent, Window, WindowId};
    use crate::model::workspace::WorkspaceId;

    fn workspace_with_window(code: &str) -> Workspace {
        let mut ws = Workspace::fresh(WorkspaceId::from_serial(1), "t");
        let id = WindowId::from_serial(1);
        ws.windows.push(Window {
            id,
            code: code.to_string(),
            title: code.to_string(),
            x: 0.0,
            y: 0.0,
            width: Extent::Px(800.0),
            height: Extent::Px(600.0),
            z: 101,
            pinned: false,
            fullscreen: false,
            restore: None,
        });
        ws.active_window = Some(id);
        ws
    }

    #[test]
    fn locked_firmament_overrides_the_active_window() {
        let ws = workspace_with_window("SIG");
        let frame = SceneFrame::derive(&ws);
        assert_eq!(frame.active_code, FIRMAMENT_CODE);
    }

    #[test]
    fn unlocked_scene_follows_the_active_window() {
        let mut ws = workspace_with_window("SIG");
        ws.firmament_locked = false;
        assert_eq!(SceneFrame::derive(&ws).active_code, "SIG");

        ws.active_window = None;
        assert_eq!(SceneFrame::derive(&ws).active_code, FIRMAMENT_CODE);
    }

    #[test]
    fn layers_serialize_as_a_named_map() {
        let ws = Workspace::fresh(WorkspaceId::from_serial(1), "t");
        let frame = SceneFrame::derive(&ws);
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["layers"]["entities"], true);
        assert_eq!(value["layers"]["events"], false);
        assert_eq!(value["layers"]["sectors"], true);
        assert_eq!(value["layers"]["risks"], false);
    }
}
