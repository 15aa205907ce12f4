//! Screen and workspace-local geometry.
//!
//! Window positions are stored in workspace-local, unscaled coordinates;
//! [`to_screen`] is the one place that turns them into screen pixels. Both
//! the frame presentation and any external renderer must go through it so
//! the two can never disagree.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point { Point { x, y } }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point { Point::new(self.x - rhs.x, self.y - rhs.y) }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point { Point::new(self.x + rhs.x, self.y + rhs.y) }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Size { Size { width, height } }

    pub fn center(&self) -> Point { Point::new(self.width / 2.0, self.height / 2.0) }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect { x, y, width, height }
    }

    pub fn origin(&self) -> Point { Point::new(self.x, self.y) }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Per-workspace pan offset and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self { Viewport { x: 0.0, y: 0.0, scale: 1.0 } }
}

impl Viewport {
    pub fn pan(&self) -> Point { Point::new(self.x, self.y) }
}

/// Maps a workspace-local position to screen pixels. Pinned windows ride
/// the viewport; floating windows ignore it entirely.
pub fn to_screen(local: Point, viewport: &Viewport, pinned: bool) -> Point {
    if pinned {
        Point::new(
            local.x * viewport.scale + viewport.x,
            local.y * viewport.scale + viewport.y,
        )
    } else {
        local
    }
}

/// The scale a window is displayed at: the viewport's when pinned, 1 when
/// floating.
pub fn display_scale(viewport: &Viewport, pinned: bool) -> f64 {
    if pinned { viewport.scale } else { 1.0 }
}
