//! Axis-aligned level bounds
//!
//! Entity centers are kept inside the bounds inset by the entity's own radius,
//! so the rendered circle never crosses the rectangle edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Clamp a center point into the bounds inset by `radius`
    ///
    /// If the inset rectangle is empty on an axis, the center collapses onto
    /// that axis' midpoint instead of panicking.
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, self.left + radius, self.right - radius),
            clamp_axis(pos.y, self.top + radius, self.bottom - radius),
        )
    }

    /// Whether a center point lies inside the bounds inset by `radius`
    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= self.left + radius
            && pos.x <= self.right - radius
            && pos.y >= self.top + radius
            && pos.y <= self.bottom - radius
    }
}

#[inline]
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        return (lo + hi) * 0.5;
    }
    value.max(lo).min(hi)
}
