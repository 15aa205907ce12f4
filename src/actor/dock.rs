//! The floating dock's position: bottom-anchored drag and the one piece of
//! durable state in the system.
//!
//! Live drags never touch storage; the position is written on release and
//! on reset only.

use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::config::DockSettings;
use crate::model::geometry::Point;
use crate::model::server::DockData;

static DEFAULT_STORE_PATH: Lazy<Option<PathBuf>> = Lazy::new(|| {
    dirs::data_local_dir().map(|dir| dir.join("sanctum").join("ns_dock_pos.json"))
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockPosition {
    pub left: f64,
    pub bottom: f64,
}

/// Durable storage for the dock position. Every failure mode is absorbed:
/// a missing or corrupt file reads as "nothing saved", and a failed write
/// is logged and forgotten.
#[derive(Debug, Clone)]
pub struct DockStore {
    path: Option<PathBuf>,
}

impl DockStore {
    pub fn at(path: PathBuf) -> DockStore { DockStore { path: Some(path) } }

    pub fn default_location() -> DockStore { DockStore { path: DEFAULT_STORE_PATH.clone() } }

    /// A store that never persists; used by tests and replays.
    pub fn ephemeral() -> DockStore { DockStore { path: None } }

    pub fn load(&self) -> Option<DockPosition> {
        let path = self.path.as_ref()?;
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(?path, %err, "failed to read dock position");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(position) => Some(position),
            Err(err) => {
                warn!(?path, %err, "discarding corrupt dock position");
                None
            }
        }
    }

    pub fn save(&self, position: &DockPosition) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(?parent, %err, "failed to create dock store directory");
                return;
            }
        }
        match serde_json::to_string(position) {
            Ok(raw) => {
                if let Err(err) = fs::write(path, raw) {
                    warn!(?path, %err, "failed to persist dock position");
                } else {
                    debug!(?path, ?position, "persisted dock position");
                }
            }
            Err(err) => warn!(%err, "failed to encode dock position"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    pointer_start: Point,
    start: DockPosition,
}

pub struct DockState {
    position: DockPosition,
    default: DockPosition,
    drag: Option<DragSession>,
    store: DockStore,
}

impl DockState {
    pub fn load(store: DockStore, settings: &DockSettings) -> DockState {
        let default = DockPosition {
            left: settings.default_left,
            bottom: settings.default_bottom,
        };
        let position = store.load().unwrap_or(default);
        DockState { position, default, drag: None, store }
    }

    pub fn position(&self) -> DockPosition { self.position }

    pub fn data(&self) -> DockData {
        DockData { left: self.position.left, bottom: self.position.bottom }
    }

    pub fn dragging(&self) -> bool { self.drag.is_some() }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag = Some(DragSession { pointer_start: pointer, start: self.position });
    }

    /// The dock is anchored to the bottom-left, so the vertical axis runs
    /// opposite to pointer coordinates.
    pub fn drag_to(&mut self, pointer: Point) {
        let Some(session) = self.drag else {
            return;
        };
        self.position = DockPosition {
            left: session.start.left + (pointer.x - session.pointer_start.x),
            bottom: session.start.bottom - (pointer.y - session.pointer_start.y),
        };
    }

    pub fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            self.store.save(&self.position);
        }
    }

    pub fn reset(&mut self) {
        self.position = self.default;
        self.store.save(&self.position);
    }
}
