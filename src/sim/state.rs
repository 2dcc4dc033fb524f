//! Live level state
//!
//! Everything here is rebuilt from the static [`LevelLayout`] on a reset.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::geometry::circles_overlap;
use super::layout::{Frame, LayoutError, LevelLayout};
use super::obstacle::{Door, ObstacleSet, Wall};
use crate::settings::Settings;

/// What drives an entity's movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Player-controlled, follows the pointer
    Avatar,
    /// Dragon that chases the avatar
    Pursuer,
}

/// A moving circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Max displacement per tick
    pub speed: f32,
}

impl Entity {
    pub const fn avatar(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            kind: EntityKind::Avatar,
            pos,
            radius,
            speed,
        }
    }

    pub const fn pursuer(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            kind: EntityKind::Pursuer,
            pos,
            radius,
            speed,
        }
    }

    pub fn touches(&self, other: &Entity) -> bool {
        circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }
}

/// A pickup that unlocks the door sharing its id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

/// Phase of a single level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    Playing,
    /// Exit reached; nothing moves any more
    Completed,
}

/// Side effects of a tick, drained by audio/visual collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    KeyCollected { id: u32 },
    DoorUnlocked { id: u32 },
    /// A dragon caught the avatar; the level was reset
    Death,
    LevelCompleted,
    /// The campaign moved on to the level at `index`
    LevelAdvanced { index: usize },
    CampaignFinished,
}

/// A level in play
#[derive(Debug, Clone)]
pub struct LevelState {
    layout: Arc<LevelLayout>,
    frame: Frame,
    avatar_speed: f32,
    pursuer_speed: f32,
    pub bounds: Bounds,
    /// Center of the exit doorway
    pub exit: Vec2,
    pub avatar: Entity,
    pub dragons: Vec<Entity>,
    pub walls: Vec<Wall>,
    pub doors: Vec<Door>,
    pub keys: Vec<Key>,
    pub phase: LevelPhase,
    /// Deaths since the level was built
    pub deaths: u32,
}

impl LevelState {
    /// Validate `layout` and lay it out inside `frame`
    pub fn new(
        layout: Arc<LevelLayout>,
        frame: Frame,
        settings: &Settings,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;

        let radius = layout.size / 2.0;
        let avatar_speed = settings.avatar_speed(layout.size);
        let pursuer_speed = settings.pursuer_speed(layout.size);
        let bounds = frame.bounds();

        let mut state = Self {
            exit: frame.point(layout.exit),
            avatar: Entity::avatar(Vec2::ZERO, radius, avatar_speed),
            dragons: Vec::with_capacity(layout.dragons.len()),
            walls: Vec::with_capacity(layout.walls.len()),
            doors: Vec::with_capacity(layout.doors.len()),
            keys: Vec::with_capacity(layout.keys.len()),
            phase: LevelPhase::Playing,
            deaths: 0,
            layout,
            frame,
            avatar_speed,
            pursuer_speed,
            bounds,
        };
        state.reset();

        log::info!(
            "Level '{}' ready: {} walls, {} doors, {} dragons",
            state.layout.name,
            state.walls.len(),
            state.doors.len(),
            state.dragons.len()
        );
        Ok(state)
    }

    /// Rebuild every entity, key and door from the static layout
    pub fn reset(&mut self) {
        let layout = &self.layout;
        let frame = &self.frame;
        let radius = layout.size / 2.0;

        self.avatar = Entity::avatar(
            self.bounds.clamp(frame.point(layout.spawn), radius),
            radius,
            self.avatar_speed,
        );
        self.dragons = layout
            .dragons
            .iter()
            .map(|&p| {
                Entity::pursuer(self.bounds.clamp(frame.point(p), radius), radius, self.pursuer_speed)
            })
            .collect();
        self.walls = layout
            .walls
            .iter()
            .map(|&line| Wall::new(frame.segment(line)))
            .collect();
        self.doors = layout
            .doors
            .iter()
            .map(|d| Door::new(d.id, frame.segment(d.line)))
            .collect();
        self.keys = layout
            .keys
            .iter()
            .map(|k| Key {
                id: k.id,
                pos: frame.point(k.pos),
                radius,
                collected: false,
            })
            .collect();
        self.phase = LevelPhase::Playing;
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn name(&self) -> &str {
        &self.layout.name
    }

    /// Entity/exit size in pixels
    pub fn size(&self) -> f32 {
        self.layout.size
    }

    /// Walls plus locked doors, as of right now
    pub fn obstacles(&self) -> ObstacleSet {
        ObstacleSet::assemble(&self.walls, &self.doors)
    }

    /// Unlock the first door with `id`. Returns true if a locked door opened.
    pub fn unlock_door(&mut self, id: u32) -> bool {
        self.doors
            .iter_mut()
            .find(|d| d.id == id)
            .is_some_and(Door::unlock)
    }

    /// Axis-aligned "close enough" test against the exit
    ///
    /// Looser than a circle test: a diagonal offset up to `size` on both
    /// axes still counts.
    pub fn avatar_at_exit(&self) -> bool {
        let delta = (self.avatar.pos - self.exit).abs();
        let size = self.size();
        delta.x < size && delta.y < size
    }

    pub fn is_completed(&self) -> bool {
        self.phase == LevelPhase::Completed
    }
}
