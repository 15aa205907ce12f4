//! Window records and their fullscreen snapshot.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Stacking level reserved for fullscreen windows; always above anything
/// the per-workspace counter can allocate in practice.
pub const FULLSCREEN_Z: i64 = 999_999;

/// Opaque window handle. Allocated from one process-monotonic serial, so
/// two windows can never collide even across workspaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(u64);

impl WindowId {
    pub fn from_serial(serial: u64) -> WindowId { WindowId(serial) }

    pub fn serial(&self) -> u64 { self.0 }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

/// A window dimension: a pixel value, or the fill sentinel used while
/// fullscreen. Serialized as a bare number or the string `"100%"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    Px(f64),
    Fill,
}

impl Extent {
    /// Resolves against the dimension of the screen.
    pub fn resolve(&self, screen_extent: f64) -> f64 {
        match self {
            Extent::Px(px) => *px,
            Extent::Fill => screen_extent,
        }
    }
}

impl Serialize for Extent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        match self {
            Extent::Px(px) => serializer.serialize_f64(*px),
            Extent::Fill => serializer.serialize_str("100%"),
        }
    }
}

impl<'de> Deserialize<'de> for Extent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        struct ExtentVisitor;

        impl<'de> Visitor<'de> for ExtentVisitor {
            type Value = Extent;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a pixel count or \"100%\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Extent, E> {
                Ok(Extent::Px(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Extent, E> {
                Ok(Extent::Px(v as f64))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Extent, E> {
                Ok(Extent::Px(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Extent, E> {
                match v {
                    "100%" => Ok(Extent::Fill),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(ExtentVisitor)
    }
}

/// Geometry and stacking captured when a window enters fullscreen, restored
/// verbatim on exit.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreState {
    pub x: f64,
    pub y: f64,
    pub width: Extent,
    pub height: Extent,
    pub pinned: bool,
    pub z: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub id: WindowId,
    /// Selects the content view mounted inside the frame.
    pub code: String,
    pub title: String,
    /// Workspace-local, unscaled coordinates.
    pub x: f64,
    pub y: f64,
    pub width: Extent,
    pub height: Extent,
    /// Stacking order. Assigned only by the engine's counter, never by the
    /// frame.
    pub z: i64,
    /// Pinned windows are displayed through the workspace viewport
    /// transform; floating ones ignore it.
    pub pinned: bool,
    pub fullscreen: bool,
    /// Present iff `fullscreen` is true.
    pub restore: Option<RestoreState>,
}

impl Window {
    /// The id rendered for UIs and query consumers, `win-{serial}-{code}`.
    pub fn display_id(&self) -> String { format!("{}-{}", self.id, self.code) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_round_trips_both_variants() {
        let px: Extent = serde_json::from_str("640.0").unwrap();
        assert_eq!(px, Extent::Px(640.0));
        assert_eq!(serde_json::to_string(&px).unwrap(), "640.0");

        let fill: Extent = serde_json::from_str("\"100%\"").unwrap();
        assert_eq!(fill, Extent::Fill);
        assert_eq!(serde_json::to_string(&fill).unwrap(), "\"100%\"");
    }

    #[test]
    fn extent_rejects_other_strings() {
        assert!(serde_json::from_str::<Extent>("\"50%\"").is_err());
    }

    #[test]
    fn fill_resolves_to_screen_extent() {
        assert_eq!(Extent::Fill.resolve(1920.0), 1920.0);
        assert_eq!(Extent::Px(800.0).resolve(1920.0), 800.0);
    }
}
