//! Raw input events and their translation into window-manager intent.
//!
//! The host surface reports pointer, wheel, and keyboard activity in this
//! vocabulary; the reactor owns a [`DragGesture`] state machine and the
//! shortcut table below to turn it into engine operations.

use serde::{Deserialize, Serialize};

use crate::canvas::PanSession;
use crate::model::geometry::Point;
use crate::model::window::WindowId;
use crate::ui::frame::FrameDragSession;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    KeyW,
    KeyQ,
}

/// What the pointer is over, as hit-tested by the host surface.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// The background canvas.
    Canvas,
    WindowHeader(WindowId),
    WindowContent(WindowId),
    DockHandle,
    DockReset,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    KeyDown {
        key: Key,
        alt: bool,
        /// True while an input or textarea owns keyboard focus; every
        /// shortcut is suppressed then.
        text_input_focused: bool,
    },
    PointerDown {
        target: PointerTarget,
        pos: Point,
    },
    PointerMove {
        pos: Point,
        /// The window whose content region the pointer is over, if any;
        /// feeds the idle-activity stamp.
        over_window: Option<WindowId>,
    },
    PointerUp,
    /// The pointer left the interactive surface; cancels like a release.
    PointerLeave,
    DoubleClick {
        target: PointerTarget,
    },
    Wheel {
        delta_y: f64,
        target: PointerTarget,
    },
}

/// A resolved keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NextTab,
    PrevTab,
    ConfirmTab,
    CloseActiveWindow,
    /// Close the active workspace, or open the hard-reset flow when it is
    /// the last one.
    CloseActiveWorkspace,
}

pub fn shortcut_for(key: Key, alt: bool, text_input_focused: bool) -> Option<Shortcut> {
    if text_input_focused {
        return None;
    }
    if alt {
        return match key {
            Key::KeyW => Some(Shortcut::CloseActiveWindow),
            Key::KeyQ => Some(Shortcut::CloseActiveWorkspace),
            _ => None,
        };
    }
    match key {
        Key::ArrowRight | Key::ArrowUp => Some(Shortcut::NextTab),
        Key::ArrowLeft | Key::ArrowDown => Some(Shortcut::PrevTab),
        Key::Enter => Some(Shortcut::ConfirmTab),
        _ => None,
    }
}

/// The one drag that can be in flight. All three kinds are exclusive and
/// end on pointer-up or pointer-leave.
#[derive(Debug, Default)]
pub enum DragGesture {
    #[default]
    Idle,
    Pan(PanSession),
    Window {
        window: WindowId,
        session: FrameDragSession,
        /// Display scale at drag start; screen deltas divide by it.
        scale: f64,
    },
    Dock,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    None,
    PanTo(Point),
    MoveWindow { window: WindowId, target: Point },
    DockTo(Point),
}

/// Which gesture a release ended; the dock persists its position on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasedGesture {
    None,
    Pan,
    Window,
    Dock,
}

impl DragGesture {
    pub fn begin_pan(&mut self, session: PanSession) { *self = DragGesture::Pan(session); }

    pub fn begin_window(&mut self, window: WindowId, session: FrameDragSession, scale: f64) {
        *self = DragGesture::Window { window, session, scale };
    }

    pub fn begin_dock(&mut self) { *self = DragGesture::Dock; }

    pub fn pointer_move(&self, pos: Point) -> GestureUpdate {
        match self {
            DragGesture::Idle => GestureUpdate::None,
            DragGesture::Pan(session) => GestureUpdate::PanTo(session.pan(pos)),
            DragGesture::Window { window, session, scale } => GestureUpdate::MoveWindow {
                window: *window,
                target: session.target(pos, *scale),
            },
            DragGesture::Dock => GestureUpdate::DockTo(pos),
        }
    }

    pub fn release(&mut self) -> ReleasedGesture {
        match std::mem::take(self) {
            DragGesture::Idle => ReleasedGesture::None,
            DragGesture::Pan(_) => ReleasedGesture::Pan,
            DragGesture::Window { .. } => ReleasedGesture::Window,
            DragGesture::Dock => ReleasedGesture::Dock,
        }
    }
}
