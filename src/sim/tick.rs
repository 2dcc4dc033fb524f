//! Fixed-rate simulation tick
//!
//! Advances one level by one frame and reports what happened.

use glam::Vec2;

use super::geometry::circles_overlap;
use super::movement::resolve_step;
use super::obstacle::Door;
use super::state::{GameEvent, LevelPhase, LevelState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer position; the avatar walks toward it
    pub pointer: Vec2,
}

impl TickInput {
    pub const fn pointer(pointer: Vec2) -> Self {
        Self { pointer }
    }
}

/// Advance the level by one tick
///
/// Events are appended to `events` in the order they happen. A completed
/// level ignores further ticks.
pub fn tick(state: &mut LevelState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if state.phase == LevelPhase::Completed {
        return;
    }

    collect_keys(state, events);

    // After pickups, so a door opened this tick no longer blocks
    let obstacles = state.obstacles();

    let step = resolve_step(&state.avatar, input.pointer, &state.bounds, &obstacles);
    state.avatar.pos = step.position(state.avatar.pos);

    let target = state.avatar.pos;
    for dragon in &mut state.dragons {
        let step = resolve_step(dragon, target, &state.bounds, &obstacles);
        dragon.pos = step.position(dragon.pos);
    }

    // Being caught wins over reaching the exit on the same tick
    if state.dragons.iter().any(|d| d.touches(&state.avatar)) {
        log::info!("Caught by a dragon in '{}', resetting", state.name());
        state.deaths += 1;
        state.reset();
        events.push(GameEvent::Death);
        return;
    }

    if state.avatar_at_exit() {
        log::info!("Level '{}' completed", state.name());
        state.phase = LevelPhase::Completed;
        events.push(GameEvent::LevelCompleted);
    }
}

fn collect_keys(state: &mut LevelState, events: &mut Vec<GameEvent>) {
    let avatar = state.avatar;

    for key in state.keys.iter_mut().filter(|k| !k.collected) {
        if !circles_overlap(avatar.pos, avatar.radius, key.pos, key.radius) {
            continue;
        }
        key.collected = true;
        log::debug!("Key {} collected", key.id);
        events.push(GameEvent::KeyCollected { id: key.id });

        let opened = state
            .doors
            .iter_mut()
            .find(|d| d.id == key.id)
            .is_some_and(Door::unlock);
        if opened {
            events.push(GameEvent::DoorUnlocked { id: key.id });
        } else {
            log::debug!("Key {} opened nothing", key.id);
        }
    }
}
