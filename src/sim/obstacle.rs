//! Walls, doors, and the per-tick set of active obstacles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Segment, circle_intersects_segment};

/// Anything that can block movement with a line segment
pub trait Obstacle {
    fn segment(&self) -> Segment;

    /// Inactive obstacles are skipped when the obstacle set is assembled
    fn is_active(&self) -> bool;
}

/// A static wall (always active)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub segment: Segment,
}

impl Wall {
    pub const fn new(segment: Segment) -> Self {
        Self { segment }
    }
}

impl Obstacle for Wall {
    fn segment(&self) -> Segment {
        self.segment
    }

    fn is_active(&self) -> bool {
        true
    }
}

/// A door that blocks movement until the key sharing its id is collected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: u32,
    pub segment: Segment,
    pub locked: bool,
}

impl Door {
    pub const fn new(id: u32, segment: Segment) -> Self {
        Self {
            id,
            segment,
            locked: true,
        }
    }

    /// Unlock the door. Returns true if it was locked before.
    ///
    /// There is no way back: only a level reset re-creates a locked door.
    pub fn unlock(&mut self) -> bool {
        std::mem::replace(&mut self.locked, false)
    }
}

impl Obstacle for Door {
    fn segment(&self) -> Segment {
        self.segment
    }

    fn is_active(&self) -> bool {
        self.locked
    }
}

/// The active segments for one tick
///
/// Rebuilt every tick since a key pickup can unlock a door mid-tick.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    segments: Vec<Segment>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the standard set: every wall plus every locked door
    pub fn assemble(walls: &[Wall], doors: &[Door]) -> Self {
        let mut set = Self {
            segments: Vec::with_capacity(walls.len() + doors.len()),
        };
        set.extend(walls);
        set.extend(doors);
        set
    }

    /// Add the active members of `obstacles`
    pub fn extend<'a, O: Obstacle + 'a>(&mut self, obstacles: impl IntoIterator<Item = &'a O>) {
        self.segments.extend(
            obstacles
                .into_iter()
                .filter(|o| o.is_active())
                .map(|o| o.segment()),
        );
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Does any active obstacle overlap a circle at `pos`?
    pub fn blocks(&self, pos: Vec2, radius: f32) -> bool {
        self.segments
            .iter()
            .any(|s| circle_intersects_segment(pos, radius, s))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<Segment> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
