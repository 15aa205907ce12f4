//! Pan and zoom math for the workspace viewport.

use crate::common::config::CanvasSettings;
use crate::model::geometry::{Point, Viewport};

/// Applies a wheel delta to the viewport, anchored on `center` so the point
/// under the middle of the screen stays put while the scale changes. The
/// resulting scale is clamped to the configured range no matter how large
/// the accumulated deltas get.
pub fn zoom_about_center(
    viewport: Viewport,
    delta_y: f64,
    center: Point,
    settings: &CanvasSettings,
) -> Viewport {
    let old_scale = viewport.scale;
    let new_scale = (old_scale + (-delta_y * settings.zoom_sensitivity))
        .clamp(settings.min_scale, settings.max_scale);
    let ratio = new_scale / old_scale;
    Viewport {
        x: center.x - (center.x - viewport.x) * ratio,
        y: center.y - (center.y - viewport.y) * ratio,
        scale: new_scale,
    }
}

/// An in-flight background pan. The grab offset is recorded once at
/// pointer-down; every move computes the pan from the absolute pointer
/// position, so there is no per-event delta accumulation to drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSession {
    grab: Point,
}

impl PanSession {
    pub fn begin(pointer: Point, viewport: &Viewport) -> PanSession {
        PanSession { grab: pointer - viewport.pan() }
    }

    /// The pan offset for the current pointer position.
    pub fn pan(&self, pointer: Point) -> Point { pointer - self.grab }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn settings() -> CanvasSettings { CanvasSettings::default() }

    #[test]
    fn zoom_in_keeps_the_center_anchored() {
        let center = Point::new(960.0, 540.0);
        let viewport = Viewport { x: 100.0, y: 50.0, scale: 1.0 };

        let zoomed = zoom_about_center(viewport, -100.0, center, &settings());
        assert!((zoomed.scale - 1.3).abs() < 1e-12);

        // A workspace-local point that projected onto the screen center
        // must still project there.
        let local = Point::new(
            (center.x - viewport.x) / viewport.scale,
            (center.y - viewport.y) / viewport.scale,
        );
        let reprojected = Point::new(
            local.x * zoomed.scale + zoomed.x,
            local.y * zoomed.scale + zoomed.y,
        );
        assert!((reprojected.x - center.x).abs() < 1e-9);
        assert!((reprojected.y - center.y).abs() < 1e-9);
    }

    #[test]
    fn scale_clamps_at_both_ends() {
        let center = Point::new(960.0, 540.0);
        let mut viewport = Viewport::default();
        for _ in 0..100 {
            viewport = zoom_about_center(viewport, -10_000.0, center, &settings());
        }
        assert_eq!(viewport.scale, 8.0);

        for _ in 0..100 {
            viewport = zoom_about_center(viewport, 10_000.0, center, &settings());
        }
        assert_eq!(viewport.scale, 0.1);
    }

    #[test]
    fn pan_follows_the_absolute_pointer() {
        let viewport = Viewport { x: 10.0, y: 20.0, scale: 1.0 };
        let session = PanSession::begin(Point::new(100.0, 100.0), &viewport);

        assert_eq!(session.pan(Point::new(100.0, 100.0)), Point::new(10.0, 20.0));
        assert_eq!(session.pan(Point::new(150.0, 90.0)), Point::new(60.0, 10.0));
        // Jumping the pointer produces the same result as arriving by many
        // small moves: position is a function of the pointer alone.
        assert_eq!(session.pan(Point::new(150.0, 90.0)), Point::new(60.0, 10.0));
    }
}
