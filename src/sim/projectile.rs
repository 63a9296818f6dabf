//! Shots fired by ships

use glam::Vec2;

use super::arena::EntityId;
use super::cascade;
use super::entity::{Behavior, Entity, EntityKind};
use super::state::{GameEvent, GameState};
use crate::heading;

/// Payload of a shot entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Ship that fired it; may no longer exist
    pub owner: EntityId,
    pub damage: f32,
    /// Seconds until the shot fizzles out
    pub lifetime: f32,
}

/// Fire from `owner` along its heading
pub fn fire(state: &mut GameState, owner: EntityId) -> Option<EntityId> {
    let rotation = state.entities.get(owner)?.rotation;
    fire_in_direction(state, owner, heading(rotation))
}

/// Fire from `owner` along `direction`
///
/// The shot starts just outside the owner's hull and inherits its velocity,
/// but never travels slower than the ship's muzzle speed.
pub fn fire_in_direction(
    state: &mut GameState,
    owner: EntityId,
    direction: Vec2,
) -> Option<EntityId> {
    let tuning = state.tuning.clone();
    let shooter = state.entities.get(owner).filter(|e| !e.destroyed)?;
    let ship = shooter.ship()?;

    let direction = direction.try_normalize().unwrap_or_else(|| heading(shooter.rotation));
    let pos = shooter.pos + direction * (shooter.radius + tuning.shot_muzzle_offset);
    let mut vel = direction * ship.muzzle_speed + shooter.vel;
    if vel.length() < ship.muzzle_speed {
        vel = vel.normalize_or(direction) * ship.muzzle_speed;
    }

    let shot = Projectile {
        owner,
        damage: ship.shot_damage,
        lifetime: tuning.shot_lifetime,
    };
    let entity = Entity::new(pos, tuning.shot_radius, Behavior::Projectile(shot))
        .with_velocity(vel)
        .with_rotation(shooter.rotation)
        .with_friction(1.0, 1.0);

    let id = state.spawn(entity);
    state.events.push(GameEvent::ShotFired { owner });
    Some(id)
}

/// Move a shot and run down its lifetime; true once it has expired
pub fn advance(entity: &mut Entity, dt: f32) -> bool {
    entity.integrate_linear(dt);
    match &mut entity.behavior {
        Behavior::Projectile(shot) => {
            shot.lifetime -= dt;
            shot.lifetime <= 0.0
        }
        _ => false,
    }
}

/// A shot touched `target`
///
/// Its owner is immune. Otherwise the target takes the shot's damage; if that
/// hit finished it off, the owner (when still alive) scores the kill and the
/// target is destroyed. The shot then breaks up into shrapnel.
pub fn on_contact(state: &mut GameState, shot_id: EntityId, target: EntityId) {
    let Some((shot, shot_radius)) = state
        .entities
        .get(shot_id)
        .filter(|e| !e.destroyed)
        .and_then(|e| e.projectile().map(|shot| (*shot, e.radius)))
    else {
        return;
    };
    if target == shot.owner {
        return;
    }
    let Some(victim) = state.entities.get_mut(target).filter(|e| !e.destroyed) else {
        return;
    };

    let killed = victim.damage(shot.damage);
    let (victim_kind, victim_radius) = (victim.kind(), victim.radius);

    if killed {
        award_kill(state, shot.owner, victim_kind);
        cascade::destroy(state, target, victim_radius);
    }
    cascade::destroy(state, shot_id, shot_radius);
}

fn award_kill(state: &mut GameState, owner: EntityId, victim: EntityKind) {
    let points = match victim {
        EntityKind::Alien => state.tuning.alien_kill_points,
        _ => state.tuning.kill_points,
    };
    let Some(ship) = state
        .entities
        .get_mut(owner)
        .filter(|e| !e.destroyed)
        .and_then(|e| e.ship_mut())
    else {
        return;
    };
    ship.score += points;
    state.events.push(GameEvent::ScoreAwarded {
        ship: owner,
        points,
    });
}
