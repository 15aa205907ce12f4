//! Presentation math for one window's chrome.
//!
//! Everything here is a pure function of a window record and the workspace
//! viewport: the frame rect, the header strip, the controls, and the
//! anchored drag math the header forwards to `move_window`.

use serde::Serialize;

use crate::model::geometry::{display_scale, to_screen, Point, Rect, Size, Viewport};
use crate::model::registry::{self, ContentView};
use crate::model::window::Window;

pub const HEADER_HEIGHT: f64 = 40.0;
const HEADER_PADDING: f64 = 16.0;
const CONTROL_SIZE: f64 = 12.0;
const CONTROL_SPACING: f64 = 6.0;
const PIN_CONTROL_WIDTH: f64 = 44.0;

/// Screen-space chrome for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameChrome {
    pub frame: Rect,
    pub z: i64,
    /// Scale the content renders at: the viewport's when pinned, else 1.
    pub scale: f64,
    pub header: Rect,
    pub close_control: Rect,
    pub pin_control: Rect,
    /// Present on project windows only.
    pub pop_out_control: Option<Rect>,
    /// Inactive, non-fullscreen windows carry an invisible full-area
    /// overlay that routes any click into a focus call before content
    /// interaction.
    pub focus_overlay: bool,
    pub fullscreen: bool,
}

pub fn chrome(window: &Window, viewport: &Viewport, screen: Size, is_active: bool) -> FrameChrome {
    if window.fullscreen {
        let frame = Rect::new(0.0, 0.0, screen.width, screen.height);
        return FrameChrome {
            frame,
            z: window.z,
            scale: 1.0,
            header: Rect::new(0.0, 0.0, screen.width, HEADER_HEIGHT),
            close_control: control_rect(frame, 1.0, 0),
            pin_control: pin_rect(frame, 1.0),
            pop_out_control: None,
            focus_overlay: false,
            fullscreen: true,
        };
    }

    let scale = display_scale(viewport, window.pinned);
    let origin = to_screen(Point::new(window.x, window.y), viewport, window.pinned);
    let frame = Rect::new(
        origin.x,
        origin.y,
        window.width.resolve(screen.width) * scale,
        window.height.resolve(screen.height) * scale,
    );
    let pop_out = matches!(registry::resolve(&window.code), ContentView::Project(_));

    FrameChrome {
        frame,
        z: window.z,
        scale,
        header: Rect::new(frame.x, frame.y, frame.width, HEADER_HEIGHT * scale),
        close_control: control_rect(frame, scale, 0),
        pin_control: pin_rect(frame, scale),
        pop_out_control: pop_out.then(|| {
            let pin = pin_rect(frame, scale);
            Rect::new(
                pin.x - (CONTROL_SIZE + CONTROL_SPACING) * scale,
                pin.y,
                CONTROL_SIZE * scale,
                CONTROL_SIZE * scale,
            )
        }),
        focus_overlay: !is_active,
        fullscreen: false,
    }
}

fn control_rect(frame: Rect, scale: f64, slot: usize) -> Rect {
    let size = CONTROL_SIZE * scale;
    Rect::new(
        frame.x + (HEADER_PADDING + slot as f64 * (CONTROL_SIZE + CONTROL_SPACING)) * scale,
        frame.y + (HEADER_HEIGHT * scale - size) / 2.0,
        size,
        size,
    )
}

fn pin_rect(frame: Rect, scale: f64) -> Rect {
    let size = CONTROL_SIZE * scale;
    Rect::new(
        frame.x + frame.width - (HEADER_PADDING + PIN_CONTROL_WIDTH) * scale,
        frame.y + (HEADER_HEIGHT * scale - size) / 2.0,
        PIN_CONTROL_WIDTH * scale,
        size,
    )
}

/// A header drag in progress, anchored at the pointer-down position so
/// per-event rounding never compounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDragSession {
    pointer_start: Point,
    origin: Point,
}

impl FrameDragSession {
    pub fn begin(pointer: Point, window_origin: Point) -> FrameDragSession {
        FrameDragSession { pointer_start: pointer, origin: window_origin }
    }

    /// The window's new local position for the current pointer: the screen
    /// delta from the anchor, converted into local units by the display
    /// scale, applied to the original position.
    pub fn target(&self, pointer: Point, scale: f64) -> Point {
        let delta = pointer - self.pointer_start;
        Point::new(self.origin.x + delta.x / scale, self.origin.y + delta.y / scale)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::window::{Extent, WindowId};

    const SCREEN: Size = Size { width: 1920.0, height: 1080.0 };

    fn window(pinned: bool) -> Window {
        Window {
            id: WindowId::from_serial(1),
            code: "SIG".to_string(),
            title: "Signal Aggregation Engine".to_string(),
            x: 100.0,
            y: 50.0,
            width: Extent::Px(800.0),
            height: Extent::Px(600.0),
            z: 101,
            pinned,
            fullscreen: false,
            restore: None,
        }
    }

    #[test]
    fn floating_chrome_ignores_the_viewport() {
        let viewport = Viewport { x: 300.0, y: 300.0, scale: 2.0 };
        let chrome = chrome(&window(false), &viewport, SCREEN, true);

        assert_eq!(chrome.frame, Rect::new(100.0, 50.0, 800.0, 600.0));
        assert_eq!(chrome.scale, 1.0);
        assert_eq!(chrome.header.height, HEADER_HEIGHT);
        assert!(!chrome.focus_overlay);
    }

    #[test]
    fn pinned_chrome_rides_the_viewport() {
        let viewport = Viewport { x: 10.0, y: 20.0, scale: 2.0 };
        let chrome = chrome(&window(true), &viewport, SCREEN, true);

        assert_eq!(chrome.frame, Rect::new(210.0, 120.0, 1600.0, 1200.0));
        assert_eq!(chrome.scale, 2.0);
        // Chrome scales with the content.
        assert_eq!(chrome.header.height, HEADER_HEIGHT * 2.0);
        assert!(chrome.frame.contains(chrome.close_control.origin()));
        assert!(chrome.header.contains(chrome.pin_control.origin()));
    }

    #[test]
    fn inactive_windows_get_the_focus_overlay() {
        let viewport = Viewport::default();
        assert!(chrome(&window(false), &viewport, SCREEN, false).focus_overlay);
        assert!(!chrome(&window(false), &viewport, SCREEN, true).focus_overlay);
    }

    #[test]
    fn fullscreen_chrome_fills_the_screen() {
        let mut win = window(true);
        win.fullscreen = true;
        win.x = 0.0;
        win.y = 0.0;
        win.width = Extent::Fill;
        win.height = Extent::Fill;
        win.z = crate::model::window::FULLSCREEN_Z;

        let viewport = Viewport { x: 500.0, y: 500.0, scale: 3.0 };
        let chrome = chrome(&win, &viewport, SCREEN, false);
        assert_eq!(chrome.frame, Rect::new(0.0, 0.0, 1920.0, 1080.0));
        assert!(!chrome.focus_overlay);
        assert_eq!(chrome.z, crate::model::window::FULLSCREEN_Z);
    }

    #[test]
    fn project_windows_carry_the_pop_out_control() {
        let viewport = Viewport::default();
        let mut win = window(false);
        assert_eq!(chrome(&win, &viewport, SCREEN, true).pop_out_control, None);

        win.code = "FRK".to_string();
        assert!(chrome(&win, &viewport, SCREEN, true).pop_out_control.is_some());
    }

    #[test]
    fn drag_divides_screen_delta_by_the_display_scale() {
        let session = FrameDragSession::begin(Point::new(500.0, 500.0), Point::new(100.0, 50.0));

        // At 2x, 40 screen pixels are 20 local units.
        assert_eq!(session.target(Point::new(540.0, 520.0), 2.0), Point::new(120.0, 60.0));
        // Anchored: the same pointer position always yields the same
        // target, regardless of intermediate events.
        assert_eq!(session.target(Point::new(540.0, 520.0), 2.0), Point::new(120.0, 60.0));
        assert_eq!(session.target(Point::new(500.0, 500.0), 2.0), Point::new(100.0, 50.0));
    }
}
