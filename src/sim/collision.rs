//! Axis-aligned collision helpers
//!
//! Everything in the court is a rectangle: the ball is tested as its
//! bounding square, bricks and the paddle as plain boxes.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its center and half extents
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box from a top-left corner and size
    pub fn from_rect(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap: boxes that merely touch do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Velocity axis to reflect after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Decide which face of `target` the `mover` struck.
///
/// The center offset on each axis is normalized by the combined half extents,
/// so a ratio of 1.0 means the boxes just touch on that axis. The axis with
/// the larger ratio is the one the mover came in through. Ties go to Y, which
/// keeps corner hits bouncing back toward the paddle.
pub fn contact_axis(mover: &Aabb, target: &Aabb) -> Axis {
    let offset = (mover.center() - target.center()).abs();
    let reach = mover.half_extents() + target.half_extents();
    let ratio = offset / reach;
    if ratio.x > ratio.y { Axis::X } else { Axis::Y }
}
