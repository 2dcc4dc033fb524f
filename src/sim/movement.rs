//! Seek-then-resolve movement against line-segment obstacles
//!
//! An entity steps straight toward its target when it can. When the straight
//! step is blocked it tries each axis on its own, which gives wall sliding.
//! Pursuers that still cannot move sidestep along the perpendicular of their
//! seek direction, then back off at half speed. This is local avoidance only;
//! there is no path planning.

use glam::Vec2;

use super::bounds::Bounds;
use super::geometry::distance;
use super::obstacle::ObstacleSet;
use super::state::{Entity, EntityKind};
use crate::consts::MOVE_EPSILON;

/// How a step was resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Within one step of the target (or exactly on it); no movement
    Arrived,
    /// Full diagonal move
    Direct(Vec2),
    /// One or both single-axis moves committed
    Slide(Vec2),
    /// Pursuer sidestep along a perpendicular of the seek direction
    Sidestep(Vec2),
    /// Pursuer half-speed retreat away from the target
    Retreat(Vec2),
    /// Every candidate collided; the entity stays where it is
    Blocked,
}

impl Step {
    /// Position after applying this step to an entity at `current`
    pub fn position(self, current: Vec2) -> Vec2 {
        match self {
            Step::Direct(p) | Step::Slide(p) | Step::Sidestep(p) | Step::Retreat(p) => p,
            Step::Arrived | Step::Blocked => current,
        }
    }

    pub fn moved(self) -> bool {
        !matches!(self, Step::Arrived | Step::Blocked)
    }
}

/// Compute the next position of `entity` as it seeks `target`
pub fn move_toward(entity: &Entity, target: Vec2, bounds: &Bounds, obstacles: &ObstacleSet) -> Vec2 {
    resolve_step(entity, target, bounds, obstacles).position(entity.pos)
}

/// Resolve one tick of movement, reporting which rule produced it
pub fn resolve_step(entity: &Entity, target: Vec2, bounds: &Bounds, obstacles: &ObstacleSet) -> Step {
    let current = entity.pos;
    let dist = distance(current, target);

    // Stopping short of the target keeps the entity from oscillating across it
    if dist < entity.speed || dist <= f32::EPSILON {
        return Step::Arrived;
    }

    let dir = (target - current) / dist;
    let is_clear = |p: Vec2| !obstacles.blocks(p, entity.radius);

    let candidate = bounds.clamp(current + dir * entity.speed, entity.radius);
    if is_clear(candidate) {
        return Step::Direct(candidate);
    }

    // Axis decomposition. Y is tested from wherever X ended up, so two clear
    // single-axis moves never combine into the blocked diagonal.
    let mut pos = current;
    let along_x = bounds.clamp(Vec2::new(candidate.x, pos.y), entity.radius);
    if (along_x.x - pos.x).abs() > MOVE_EPSILON && is_clear(along_x) {
        pos = along_x;
    }
    let along_y = bounds.clamp(Vec2::new(pos.x, candidate.y), entity.radius);
    if (along_y.y - pos.y).abs() > MOVE_EPSILON && is_clear(along_y) {
        pos = along_y;
    }
    if pos != current {
        return Step::Slide(pos);
    }

    if entity.kind != EntityKind::Pursuer {
        return Step::Blocked;
    }

    let perp = Vec2::new(-dir.y, dir.x);
    for side in [perp, -perp] {
        let sidestep = bounds.clamp(current + side * entity.speed, entity.radius);
        if sidestep != current && is_clear(sidestep) {
            log::trace!("pursuer sidestep at {current} toward {target}");
            return Step::Sidestep(sidestep);
        }
    }

    let retreat = bounds.clamp(current - dir * (entity.speed * 0.5), entity.radius);
    if retreat != current && is_clear(retreat) {
        log::trace!("pursuer retreat at {current} from {target}");
        return Step::Retreat(retreat);
    }

    Step::Blocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Segment;
    use proptest::prelude::*;

    fn open_bounds() -> Bounds {
        Bounds::new(-1000.0, -1000.0, 1000.0, 1000.0)
    }

    fn walls(coords: &[[f32; 4]]) -> ObstacleSet {
        coords
            .iter()
            .map(|c| Segment::from_coords(c[0], c[1], c[2], c[3]))
            .collect()
    }

    #[test]
    fn test_straight_move_without_obstacles() {
        let avatar = Entity::avatar(Vec2::ZERO, 5.0, 10.0);
        let next = move_toward(&avatar, Vec2::new(100.0, 0.0), &open_bounds(), &ObstacleSet::new());
        assert!((next - Vec2::new(10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_overshoot_guard() {
        let avatar = Entity::avatar(Vec2::new(3.0, 4.0), 5.0, 10.0);
        let step = resolve_step(&avatar, Vec2::new(6.0, 8.0), &open_bounds(), &ObstacleSet::new());
        assert_eq!(step, Step::Arrived);

        // Exactly on target
        let step = resolve_step(&avatar, avatar.pos, &open_bounds(), &ObstacleSet::new());
        assert_eq!(step, Step::Arrived);
    }

    #[test]
    fn test_zero_speed_on_target_does_not_divide_by_zero() {
        let statue = Entity::avatar(Vec2::new(1.0, 1.0), 5.0, 0.0);
        let next = move_toward(&statue, statue.pos, &open_bounds(), &ObstacleSet::new());
        assert_eq!(next, statue.pos);
    }

    #[test]
    fn test_clamped_to_inset_bounds() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let avatar = Entity::avatar(Vec2::new(90.0, 50.0), 5.0, 10.0);
        let next = move_toward(&avatar, Vec2::new(200.0, 50.0), &bounds, &ObstacleSet::new());
        assert_eq!(next, Vec2::new(95.0, 50.0));
    }

    #[test]
    fn test_avatar_slides_along_wall() {
        // Horizontal wall just above the diagonal step
        let obstacles = walls(&[[-100.0, 10.0, 100.0, 10.0]]);
        let avatar = Entity::avatar(Vec2::ZERO, 5.0, 10.0);

        let step = resolve_step(&avatar, Vec2::new(50.0, 50.0), &open_bounds(), &obstacles);
        let Step::Slide(pos) = step else {
            panic!("expected a slide, got {step:?}");
        };
        assert!((pos.x - 10.0 / 2f32.sqrt()).abs() < 1e-4);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_avatar_slides_along_vertical_wall() {
        let obstacles = walls(&[[10.0, -100.0, 10.0, 100.0]]);
        let avatar = Entity::avatar(Vec2::ZERO, 5.0, 10.0);

        let step = resolve_step(&avatar, Vec2::new(50.0, 50.0), &open_bounds(), &obstacles);
        let Step::Slide(pos) = step else {
            panic!("expected a slide, got {step:?}");
        };
        assert_eq!(pos.x, 0.0);
        assert!((pos.y - 10.0 / 2f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_corner_slide_takes_x_only() {
        // Each axis move is clear on its own, but together they hit the post
        let obstacles = walls(&[[7.0, 7.0, 7.0, 7.0]]);
        let avatar = Entity::avatar(Vec2::ZERO, 5.0, 10.0);

        let step = resolve_step(&avatar, Vec2::new(50.0, 50.0), &open_bounds(), &obstacles);
        let Step::Slide(pos) = step else {
            panic!("expected a slide, got {step:?}");
        };
        assert!((pos.x - 10.0 / 2f32.sqrt()).abs() < 1e-4);
        assert_eq!(pos.y, 0.0);
        assert!(!obstacles.blocks(pos, avatar.radius));
    }

    #[test]
    fn test_avatar_never_sidesteps() {
        let obstacles = walls(&[[10.0, -3.0, 10.0, 3.0]]);
        let avatar = Entity::avatar(Vec2::ZERO, 5.0, 10.0);

        let step = resolve_step(&avatar, Vec2::new(100.0, 0.0), &open_bounds(), &obstacles);
        assert_eq!(step, Step::Blocked);
    }

    #[test]
    fn test_pursuer_sidesteps_perpendicular() {
        let obstacles = walls(&[[10.0, -3.0, 10.0, 3.0]]);
        let dragon = Entity::pursuer(Vec2::ZERO, 5.0, 10.0);

        let step = resolve_step(&dragon, Vec2::new(100.0, 0.0), &open_bounds(), &obstacles);
        let Step::Sidestep(pos) = step else {
            panic!("expected a sidestep, got {step:?}");
        };
        assert!((pos - Vec2::new(0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_pursuer_tries_opposite_perpendicular() {
        let obstacles = walls(&[[10.0, -3.0, 10.0, 3.0], [-20.0, 12.0, 20.0, 12.0]]);
        let dragon = Entity::pursuer(Vec2::ZERO, 5.0, 10.0);

        let step = resolve_step(&dragon, Vec2::new(100.0, 0.0), &open_bounds(), &obstacles);
        let Step::Sidestep(pos) = step else {
            panic!("expected a sidestep, got {step:?}");
        };
        assert!((pos - Vec2::new(0.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn test_pursuer_retreats_when_boxed_in() {
        let obstacles = walls(&[
            [10.0, -3.0, 10.0, 3.0],
            [-20.0, 12.0, 20.0, 12.0],
            [-20.0, -12.0, 20.0, -12.0],
        ]);
        let dragon = Entity::pursuer(Vec2::ZERO, 5.0, 10.0);

        let step = resolve_step(&dragon, Vec2::new(100.0, 0.0), &open_bounds(), &obstacles);
        let Step::Retreat(pos) = step else {
            panic!("expected a retreat, got {step:?}");
        };
        assert!((pos - Vec2::new(-5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_pursuer_fully_blocked_stays_put() {
        let obstacles = walls(&[
            [10.0, -3.0, 10.0, 3.0],
            [-20.0, 12.0, 20.0, 12.0],
            [-20.0, -12.0, 20.0, -12.0],
            [-7.0, -20.0, -7.0, 20.0],
        ]);
        let dragon = Entity::pursuer(Vec2::ZERO, 5.0, 10.0);

        let step = resolve_step(&dragon, Vec2::new(100.0, 0.0), &open_bounds(), &obstacles);
        assert_eq!(step, Step::Blocked);
        assert_eq!(step.position(dragon.pos), dragon.pos);
        assert!(!step.moved());
    }

    proptest! {
        #[test]
        fn movement_respects_bounds_and_walls(
            start_x in 10.0f32..190.0,
            start_y in 10.0f32..190.0,
            target_x in -50.0f32..250.0,
            target_y in -50.0f32..250.0,
            wall in prop::array::uniform4(0.0f32..200.0),
            radius in 1.0f32..10.0,
            speed in 0.5f32..15.0,
            pursuer in any::<bool>(),
        ) {
            let bounds = Bounds::new(0.0, 0.0, 200.0, 200.0);
            let obstacles = walls(&[wall]);
            let start = bounds.clamp(Vec2::new(start_x, start_y), radius);
            prop_assume!(!obstacles.blocks(start, radius));

            let mut entity = if pursuer {
                Entity::pursuer(start, radius, speed)
            } else {
                Entity::avatar(start, radius, speed)
            };
            let target = Vec2::new(target_x, target_y);

            for _ in 0..40 {
                entity.pos = move_toward(&entity, target, &bounds, &obstacles);
                prop_assert!(bounds.contains(entity.pos, radius));
                prop_assert!(!obstacles.blocks(entity.pos, radius));
            }
        }
    }
}
