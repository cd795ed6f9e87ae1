//! Geometry primitives: [`Location`].

use std::fmt;

use glam::Vec3;

/// A placement in world space: a position plus a facing angle.
///
/// Every node in a level graph carries a `Location`, so heuristics and the
/// movement layer that consumes routes can reason about world distances.
/// The orientation is in radians around the world up axis; route planning
/// itself only reads the position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub position: Vec3,
    pub orientation: f32,
}

impl Location {
    /// Origin with zero facing.
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        orientation: 0.0,
    };

    /// Create a location at `position` facing `orientation` radians.
    #[inline]
    pub const fn new(position: Vec3, orientation: f32) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Location at `(x, y, z)` with zero facing.
    #[inline]
    pub const fn at(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, y, z), 0.0)
    }

    /// Straight-line distance to another location.
    #[inline]
    pub fn distance_to(self, other: Location) -> f32 {
        self.position.distance(other.position)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) facing {}",
            self.position.x, self.position.y, self.position.z, self.orientation
        )
    }
}
