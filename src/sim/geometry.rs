//! Line-segment geometry for walls and doors
//!
//! Everything the movement resolver needs to know about a wall is whether a
//! circle of a given radius overlaps it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEGENERATE_SEGMENT_EPSILON;

/// A line segment between two endpoints
///
/// Zero-length segments are valid and behave as a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Convenience constructor from raw coordinates
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        (self.end - self.start).length_squared()
    }

    /// True when the segment is short enough to be treated as a point
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length_squared() < DEGENERATE_SEGMENT_EPSILON
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Project `p` onto `segment`, clamped to its endpoints
pub fn closest_point_on_segment(p: Vec2, segment: &Segment) -> Vec2 {
    let line_vec = segment.end - segment.start;
    let len_sq = line_vec.length_squared();

    if len_sq < DEGENERATE_SEGMENT_EPSILON {
        return segment.start;
    }

    let t = ((p - segment.start).dot(line_vec) / len_sq).clamp(0.0, 1.0);
    segment.start + line_vec * t
}

/// Check whether a circle overlaps a segment
///
/// Strict: a circle exactly tangent to the segment does not collide.
#[inline]
pub fn circle_intersects_segment(center: Vec2, radius: f32, segment: &Segment) -> bool {
    distance(center, closest_point_on_segment(center, segment)) < radius
}

/// Check whether two circles overlap (strict)
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    distance(a, b) < radius_a + radius_b
}
