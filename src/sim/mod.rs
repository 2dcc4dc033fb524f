//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock reads
//! - Stable iteration order (layout order)
//! - No rendering, audio or platform dependencies

pub mod bounds;
pub mod campaign;
pub mod geometry;
pub mod layout;
pub mod movement;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use bounds::Bounds;
pub use campaign::{Campaign, CampaignPhase, CampaignStats};
pub use geometry::{Segment, circle_intersects_segment, closest_point_on_segment, distance};
pub use layout::{DoorSpec, Frame, KeySpec, LayoutError, LevelLayout};
pub use movement::{Step, move_toward, resolve_step};
pub use obstacle::{Door, Obstacle, ObstacleSet, Wall};
pub use state::{Entity, EntityKind, GameEvent, Key, LevelPhase, LevelState};
pub use tick::{TickInput, tick};
