//! Destruction cascade
//!
//! Destroying an entity is how the game makes debris. Each entity is
//! destroyed at most once; what it leaves behind depends on its kind:
//!
//! - area effects simply vanish
//! - ships explode, scream, maybe drop loot, and burst into shrapnel
//! - asteroids above the minimum size split in two, shedding some shrapnel
//! - everything else breaks into shrapnel worth its `mass`
//!
//! Children are inserted into the arena immediately but are only reached by
//! the next frame's passes, so a cascade can never recurse within a tick.

use glam::Vec2;
use rand::Rng;

use super::arena::EntityId;
use super::entity::{Entity, EntityKind};
use super::spawner::Spawner;
use super::state::{GameEvent, GameState};
use super::text::{
    ALIEN_SCREAMS, FloatingText, PLAYER_DEATH_SCREAMS, SPLIT_EXCLAMATIONS, TextStyle, pick,
};
use crate::{heading, rotate_degrees};

/// Destroy an entity, spawning whatever its kind leaves behind.
///
/// `mass` is the shrapnel budget used when the kind has no scripted debris.
/// Calling this on an already destroyed (or removed) entity does nothing.
pub fn destroy(state: &mut GameState, id: EntityId, mass: f32) {
    assert!(
        mass >= 0.0 && mass.is_finite(),
        "shrapnel mass must be non-negative, got {}",
        mass
    );
    let Some(entity) = state.entities.get_mut(id) else {
        return;
    };
    if entity.destroyed {
        return;
    }
    entity.destroyed = true;

    let kind = entity.kind();
    let (pos, vel, radius, rotation) = (entity.pos, entity.vel, entity.radius, entity.rotation);
    state.events.push(GameEvent::Destroyed { id, kind });
    log::trace!("Destroyed {:?} {:?}", kind, id);

    let tuning = state.tuning.clone();
    match kind {
        EntityKind::AreaEffect => {}
        EntityKind::Player | EntityKind::Alien => {
            ship_death(state, kind, pos);
            shrapnel(state, pos, vel, radius, tuning.death_shrapnel_mass);
        }
        EntityKind::Asteroid if radius > tuning.asteroid_min_radius => {
            split(state, id, pos, vel, radius, rotation);
            shrapnel(state, pos, vel, radius, radius * tuning.split_shrapnel_fraction);
        }
        _ => {
            shrapnel(state, pos, vel, radius, mass);
        }
    }
}

/// Break an asteroid into two half-radius children
///
/// The children sit either side of the parent's line of travel, far enough
/// apart that they do not overlap, and each flies off along a slightly
/// rotated and rescaled copy of the parent's velocity.
fn split(
    state: &mut GameState,
    parent: EntityId,
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    rotation: f32,
) -> [EntityId; 2] {
    let tuning = state.tuning.clone();
    let child_radius = radius / 2.0;
    let along = vel.try_normalize().unwrap_or_else(|| heading(rotation));
    let offset = along.perp() * (child_radius + tuning.split_gap);
    let spread = tuning.split_spread_deg;

    let spawn_child = |state: &mut GameState, at: Vec2| {
        let angle = state.rng.random_range(-spread..=spread);
        let scale = state.rng.random_range(0.5..=1.5);
        let child_vel = rotate_degrees(vel, angle) * scale;
        state.spawn(Entity::asteroid(at, child_vel, child_radius, &tuning))
    };
    let children = [spawn_child(state, pos + offset), spawn_child(state, pos - offset)];

    let shout = pick(&mut state.rng, SPLIT_EXCLAMATIONS);
    state.texts.push(FloatingText::new(
        pos,
        shout,
        TextStyle::Split,
        tuning.split_msg_duration,
    ));
    state.events.push(GameEvent::Split { parent, children });
    children
}

/// Scatter short-lived fragments until `mass` worth of radius is spent
///
/// Returns how many fragments were made.
pub fn shrapnel(state: &mut GameState, origin: Vec2, vel: Vec2, radius: f32, mass: f32) -> usize {
    assert!(
        mass >= 0.0 && mass.is_finite(),
        "shrapnel mass must be non-negative, got {}",
        mass
    );
    let tuning = state.tuning.clone();
    let mut budget = mass;
    let mut count = 0;

    while budget > 0.0 {
        let rng = &mut state.rng;
        let size = rng.random_range(tuning.shrapnel_min_radius..=tuning.shrapnel_max_radius);
        let lifetime =
            rng.random_range(tuning.shrapnel_min_lifetime..=tuning.shrapnel_max_lifetime);
        let angle = rng.random_range(0.0..360.0);
        let scale = rng.random_range(0.5..=1.5);
        let scatter = rng.random_range(0.0..=radius * 0.5);

        let mut fragment_vel = rotate_degrees(vel, angle) * scale;
        if fragment_vel.length() < tuning.min_shrapnel_speed {
            fragment_vel = heading(angle) * tuning.min_shrapnel_speed * rng.random_range(1.0..=2.0);
        }
        let at = origin + heading(angle) * scatter;

        state.spawn(Entity::shrapnel(at, fragment_vel, size, lifetime));
        budget -= size;
        count += 1;
    }
    count
}

/// Explosion, last words and a possible loot drop for a dead ship
fn ship_death(state: &mut GameState, kind: EntityKind, pos: Vec2) {
    let tuning = state.tuning.clone();
    state.spawn(Entity::explosion(pos, tuning.death_explosion_multiplier, &tuning));

    let (table, style) = match kind {
        EntityKind::Player => (PLAYER_DEATH_SCREAMS, TextStyle::PlayerDeath),
        _ => (ALIEN_SCREAMS, TextStyle::AlienDeath),
    };
    let scream = pick(&mut state.rng, table);
    state.texts.push(FloatingText::new(pos, scream, style, tuning.death_msg_duration));

    if state.rng.random_bool(tuning.loot_drop_chance) {
        state.spawners.push(Spawner::loot_drop(pos, tuning.loot_spawn_delay));
    }
    if kind == EntityKind::Player {
        log::info!("Player destroyed at ({:.0}, {:.0})", pos.x, pos.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::FieldVariant;
    use crate::tuning::Tuning;
    use std::sync::Arc;

    fn empty_state() -> GameState {
        GameState::new(11, Arc::new(Tuning::default()))
    }

    fn count(state: &GameState, kind: EntityKind) -> usize {
        state
            .entities
            .iter()
            .filter(|(_, e)| !e.destroyed && e.kind() == kind)
            .count()
    }

    #[test]
    fn test_large_asteroid_splits() {
        let mut state = empty_state();
        let tuning = state.tuning.clone();
        let rock = state.spawn(Entity::asteroid(
            Vec2::new(500.0, 500.0),
            Vec2::new(100.0, 0.0),
            60.0,
            &tuning,
        ));

        destroy(&mut state, rock, 60.0);

        let children: Vec<&Entity> = state
            .entities
            .iter()
            .filter(|(_, e)| !e.destroyed && e.kind() == EntityKind::Asteroid)
            .map(|(_, e)| e)
            .collect();
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.radius, 30.0);
            assert!((49.99..=150.01).contains(&child.speed()));
        }
        assert!(children[0].pos.distance(children[1].pos) >= 60.0);
        assert!(count(&state, EntityKind::Shrapnel) > 0);
        assert!(state.texts.iter().any(|t| t.style == TextStyle::Split));
    }

    #[test]
    fn test_minimum_asteroid_does_not_split() {
        let mut state = empty_state();
        let tuning = state.tuning.clone();
        let rock = state.spawn(Entity::asteroid(Vec2::ZERO, Vec2::ZERO, 20.0, &tuning));

        destroy(&mut state, rock, 20.0);
        assert_eq!(count(&state, EntityKind::Asteroid), 0);
        assert!(count(&state, EntityKind::Shrapnel) >= 7);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut state = empty_state();
        let tuning = state.tuning.clone();
        let rock = state.spawn(Entity::asteroid(Vec2::ZERO, Vec2::X, 40.0, &tuning));

        destroy(&mut state, rock, 40.0);
        let population = state.entities.len();
        let events = state.drain_events().len();
        destroy(&mut state, rock, 40.0);
        assert_eq!(state.entities.len(), population);
        assert_eq!(state.drain_events().len(), 0);
        assert!(events > 0);
    }

    #[test]
    fn test_zero_mass_makes_no_shrapnel() {
        let mut state = empty_state();
        assert_eq!(shrapnel(&mut state, Vec2::ZERO, Vec2::ZERO, 5.0, 0.0), 0);
    }

    #[test]
    #[should_panic]
    fn test_negative_mass_panics() {
        let mut state = empty_state();
        shrapnel(&mut state, Vec2::ZERO, Vec2::ZERO, 5.0, -1.0);
    }

    #[test]
    fn test_shrapnel_respects_speed_floor() {
        let mut state = empty_state();
        shrapnel(&mut state, Vec2::ZERO, Vec2::ZERO, 10.0, 30.0);
        for (_, e) in state.entities.iter() {
            assert!(e.speed() >= 70.0 - 1e-3);
            assert!((1.0..=3.0).contains(&e.radius));
        }
    }

    #[test]
    fn test_alien_death_explodes() {
        let mut state = empty_state();
        let tuning = state.tuning.clone();
        let alien = state.spawn(Entity::alien(Vec2::new(300.0, 300.0), &tuning));

        destroy(&mut state, alien, 25.0);

        let explosion = state
            .entities
            .iter()
            .find_map(|(_, e)| e.area_effect().map(|fx| (e.radius, fx.variant)));
        assert_eq!(explosion, Some((7.0, FieldVariant::Explosion)));
        assert!(state.texts.iter().any(|t| t.style == TextStyle::AlienDeath));
        assert!(count(&state, EntityKind::Shrapnel) > 0);
    }

    #[test]
    fn test_area_effect_leaves_nothing() {
        let mut state = empty_state();
        let tuning = state.tuning.clone();
        let hole = state.spawn(Entity::black_hole(Vec2::ZERO, Vec2::ZERO, &tuning));
        destroy(&mut state, hole, 75.0);
        assert_eq!(state.entities.len(), 1);
    }
}
