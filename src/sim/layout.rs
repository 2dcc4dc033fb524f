//! Static level layout
//!
//! A layout is authored in fractions of the level frame, so the same level
//! fits any screen. It is never mutated: every reset rebuilds the live level
//! state from it.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bounds::Bounds;
use super::geometry::Segment;

/// Rejected layout data
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("no levels to play")]
    NoLevels,
    #[error("level has no name")]
    Unnamed,
    #[error("level '{name}': size must be positive, got {size}")]
    Size { name: String, size: f32 },
    #[error("level '{name}': {what} lies outside the level frame")]
    OutOfFrame { name: String, what: String },
    #[error("level '{name}': duplicate key id {id}")]
    DuplicateKey { name: String, id: u32 },
    #[error("level '{name}': duplicate door id {id}")]
    DuplicateDoor { name: String, id: u32 },
}

/// The on-screen rectangle a level is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Map a fractional coordinate to an absolute point
    pub fn point(&self, frac: [f32; 2]) -> Vec2 {
        Vec2::new(self.x + self.width * frac[0], self.y + self.height * frac[1])
    }

    /// Map a fractional `[x1, y1, x2, y2]` line to an absolute segment
    pub fn segment(&self, frac: [f32; 4]) -> Segment {
        Segment::new(self.point([frac[0], frac[1]]), self.point([frac[2], frac[3]]))
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A key placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeySpec {
    pub id: u32,
    pub pos: [f32; 2],
}

/// A door placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorSpec {
    pub id: u32,
    pub line: [f32; 4],
}

/// Static description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    /// Diameter of every entity, key and the exit, in pixels
    pub size: f32,
    pub spawn: [f32; 2],
    pub exit: [f32; 2],
    #[serde(default)]
    pub walls: Vec<[f32; 4]>,
    #[serde(default)]
    pub keys: Vec<KeySpec>,
    #[serde(default)]
    pub doors: Vec<DoorSpec>,
    /// Pursuer spawn points
    #[serde(default)]
    pub dragons: Vec<[f32; 2]>,
}

impl LevelLayout {
    /// Minimal layout: a name, a size, a spawn point and an exit
    pub fn new(name: impl Into<String>, size: f32, spawn: [f32; 2], exit: [f32; 2]) -> Self {
        Self {
            name: name.into(),
            size,
            spawn,
            exit,
            walls: Vec::new(),
            keys: Vec::new(),
            doors: Vec::new(),
            dragons: Vec::new(),
        }
    }

    pub fn with_wall(mut self, line: [f32; 4]) -> Self {
        self.walls.push(line);
        self
    }

    pub fn with_key(mut self, id: u32, pos: [f32; 2]) -> Self {
        self.keys.push(KeySpec { id, pos });
        self
    }

    pub fn with_door(mut self, id: u32, line: [f32; 4]) -> Self {
        self.doors.push(DoorSpec { id, line });
        self
    }

    pub fn with_dragon(mut self, pos: [f32; 2]) -> Self {
        self.dragons.push(pos);
        self
    }

    /// Reject layouts the simulation cannot run correctly
    ///
    /// Keys without a door (or doors without a key) are legal but logged,
    /// since the door can never open or the key opens nothing.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::Unnamed);
        }
        if !(self.size > 0.0) {
            return Err(LayoutError::Size {
                name: self.name.clone(),
                size: self.size,
            });
        }

        let out_of_frame = |what: String| LayoutError::OutOfFrame {
            name: self.name.clone(),
            what,
        };
        if !in_unit(&self.spawn) {
            return Err(out_of_frame("spawn".into()));
        }
        if !in_unit(&self.exit) {
            return Err(out_of_frame("exit".into()));
        }
        if let Some(i) = self.walls.iter().position(|w| !in_unit(w)) {
            return Err(out_of_frame(format!("wall #{i}")));
        }
        if let Some(k) = self.keys.iter().find(|k| !in_unit(&k.pos)) {
            return Err(out_of_frame(format!("key {}", k.id)));
        }
        if let Some(d) = self.doors.iter().find(|d| !in_unit(&d.line)) {
            return Err(out_of_frame(format!("door {}", d.id)));
        }
        if let Some(i) = self.dragons.iter().position(|p| !in_unit(p)) {
            return Err(out_of_frame(format!("dragon #{i}")));
        }

        let mut key_ids = HashSet::new();
        for key in &self.keys {
            if !key_ids.insert(key.id) {
                return Err(LayoutError::DuplicateKey {
                    name: self.name.clone(),
                    id: key.id,
                });
            }
        }
        let mut door_ids = HashSet::new();
        for door in &self.doors {
            if !door_ids.insert(door.id) {
                return Err(LayoutError::DuplicateDoor {
                    name: self.name.clone(),
                    id: door.id,
                });
            }
        }

        for id in key_ids.difference(&door_ids) {
            log::warn!("Level '{}': key {} has no matching door", self.name, id);
        }
        for id in door_ids.difference(&key_ids) {
            log::warn!("Level '{}': door {} can never be unlocked", self.name, id);
        }

        Ok(())
    }
}

fn in_unit(coords: &[f32]) -> bool {
    coords.iter().all(|c| (0.0..=1.0).contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LevelLayout {
        LevelLayout::new("Hall", 20.0, [0.1, 0.1], [0.9, 0.9])
            .with_wall([0.5, 0.0, 0.5, 0.8])
            .with_key(1, [0.2, 0.8])
            .with_door(1, [0.5, 0.8, 0.5, 1.0])
            .with_dragon([0.9, 0.1])
    }

    #[test]
    fn test_frame_maps_fractions() {
        let frame = Frame::new(100.0, 50.0, 800.0, 400.0);
        assert_eq!(frame.point([0.5, 0.25]), Vec2::new(500.0, 150.0));
        assert_eq!(
            frame.segment([0.0, 0.0, 1.0, 1.0]),
            Segment::from_coords(100.0, 50.0, 900.0, 450.0)
        );
        assert_eq!(frame.bounds(), Bounds::new(100.0, 50.0, 900.0, 450.0));
    }

    #[test]
    fn test_valid_layout() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_unmatched_ids_are_not_errors() {
        let layout = sample().with_key(9, [0.3, 0.3]).with_door(4, [0.1, 0.5, 0.2, 0.5]);
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let layout = sample().with_key(1, [0.3, 0.3]);
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::DuplicateKey { id: 1, .. })
        ));

        let layout = sample().with_door(1, [0.1, 0.5, 0.2, 0.5]);
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::DuplicateDoor { id: 1, .. })
        ));
    }

    #[test]
    fn test_bad_geometry_rejected() {
        let mut layout = sample();
        layout.size = 0.0;
        assert!(matches!(layout.validate(), Err(LayoutError::Size { .. })));

        let layout = sample().with_wall([0.0, 0.0, 1.5, 0.0]);
        assert!(matches!(layout.validate(), Err(LayoutError::OutOfFrame { .. })));

        let layout = LevelLayout::new("  ", 20.0, [0.1, 0.1], [0.9, 0.9]);
        assert_eq!(layout.validate(), Err(LayoutError::Unnamed));
    }

    #[test]
    fn test_optional_lists_default_to_empty() {
        let json = r#"{ "name": "Bare", "size": 30, "spawn": [0.1, 0.5], "exit": [0.9, 0.5] }"#;
        let layout: LevelLayout = serde_json::from_str(json).unwrap();
        assert!(layout.walls.is_empty() && layout.keys.is_empty());
        assert!(layout.doors.is_empty() && layout.dragons.is_empty());
    }
}
