//! The physical object every game piece is built from
//!
//! A single [`Entity`] struct carries the shared rigid-body state; whatever
//! makes a ship a ship or a shot a shot lives in its [`Behavior`] payload.

use glam::Vec2;

use super::field::AreaEffect;
use super::loot::LootKind;
use super::projectile::Projectile;
use super::ship::Ship;
use crate::consts::{DEFAULT_ANGULAR_FRICTION, DEFAULT_FRICTION};
use crate::tuning::Tuning;
use crate::wrap_degrees;

/// Payload-free tag for dispatch and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Alien,
    Asteroid,
    Loot,
    Shrapnel,
    Projectile,
    AreaEffect,
}

/// Kind-specific state and behaviour
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Player(Ship),
    Alien(Ship),
    Asteroid,
    Loot(LootKind),
    /// Short-lived debris, expires after `lifetime` seconds
    Shrapnel { lifetime: f32 },
    Projectile(Projectile),
    AreaEffect(AreaEffect),
}

/// What happens when an entity leaves the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Reappear on the opposite edge
    Wrap,
    /// Removed once outside the inflated screen bounds
    Cull,
}

/// A physically simulated circle
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, kept in [0, 360)
    pub rotation: f32,
    /// Degrees per second
    pub angular_velocity: f32,
    /// Visual size and collision bound
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// Per-tick velocity multiplier
    pub friction: f32,
    /// Per-tick angular velocity multiplier
    pub angular_friction: f32,
    /// Set exactly once; nothing touches the entity afterwards
    pub destroyed: bool,
    pub behavior: Behavior,
}

impl Entity {
    /// Base constructor: health starts at twice the radius
    pub fn new(pos: Vec2, radius: f32, behavior: Behavior) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "entity radius must be positive, got {}",
            radius
        );
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            radius,
            health: 2.0 * radius,
            max_health: 2.0 * radius,
            friction: DEFAULT_FRICTION,
            angular_friction: DEFAULT_ANGULAR_FRICTION,
            destroyed: false,
            behavior,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = wrap_degrees(rotation);
        self
    }

    /// Override starting health (also resets `max_health`)
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    pub fn with_friction(mut self, friction: f32, angular_friction: f32) -> Self {
        self.friction = friction;
        self.angular_friction = angular_friction;
        self
    }

    pub fn player(pos: Vec2, tuning: &Tuning) -> Self {
        Self::new(pos, tuning.player_radius, Behavior::Player(Ship::player(tuning)))
            .with_friction(tuning.friction, tuning.angular_friction)
    }

    pub fn alien(pos: Vec2, tuning: &Tuning) -> Self {
        Self::new(pos, tuning.alien_radius, Behavior::Alien(Ship::alien(tuning)))
            .with_health(tuning.alien_health)
            .with_friction(tuning.friction, tuning.angular_friction)
    }

    pub fn asteroid(pos: Vec2, vel: Vec2, radius: f32, tuning: &Tuning) -> Self {
        Self::new(pos, radius, Behavior::Asteroid)
            .with_velocity(vel)
            .with_friction(tuning.friction, tuning.angular_friction)
    }

    pub fn loot(pos: Vec2, kind: LootKind, tuning: &Tuning) -> Self {
        Self::new(pos, tuning.loot_radius, Behavior::Loot(kind))
            .with_health(tuning.loot_health)
            .with_friction(tuning.friction, tuning.angular_friction)
    }

    /// Debris fragment; flies straight until it expires
    pub fn shrapnel(pos: Vec2, vel: Vec2, radius: f32, lifetime: f32) -> Self {
        Self::new(pos, radius, Behavior::Shrapnel { lifetime })
            .with_velocity(vel)
            .with_friction(1.0, 1.0)
    }

    pub fn explosion(pos: Vec2, multiplier: f32, tuning: &Tuning) -> Self {
        Self::new(
            pos,
            tuning.explosion_initial_radius * multiplier,
            Behavior::AreaEffect(AreaEffect::explosion(tuning)),
        )
        .with_health(1.0)
        .with_friction(1.0, 1.0)
    }

    pub fn black_hole(pos: Vec2, vel: Vec2, tuning: &Tuning) -> Self {
        Self::new(
            pos,
            tuning.black_hole_radius,
            Behavior::AreaEffect(AreaEffect::black_hole(tuning)),
        )
        .with_velocity(vel)
        .with_health(tuning.black_hole_health)
        .with_friction(1.0, 1.0)
    }

    pub fn kind(&self) -> EntityKind {
        match self.behavior {
            Behavior::Player(_) => EntityKind::Player,
            Behavior::Alien(_) => EntityKind::Alien,
            Behavior::Asteroid => EntityKind::Asteroid,
            Behavior::Loot(_) => EntityKind::Loot,
            Behavior::Shrapnel { .. } => EntityKind::Shrapnel,
            Behavior::Projectile(_) => EntityKind::Projectile,
            Behavior::AreaEffect(_) => EntityKind::AreaEffect,
        }
    }

    /// Takes part in the pairwise contact pass
    pub fn is_collidable(&self) -> bool {
        !matches!(
            self.behavior,
            Behavior::Shrapnel { .. } | Behavior::AreaEffect(_)
        )
    }

    /// Acts through a force field only, never through contact
    pub fn is_field_emitter(&self) -> bool {
        matches!(self.behavior, Behavior::AreaEffect(_))
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        match self.behavior {
            Behavior::Player(_) | Behavior::Alien(_) => EdgePolicy::Wrap,
            _ => EdgePolicy::Cull,
        }
    }

    pub fn ship(&self) -> Option<&Ship> {
        match &self.behavior {
            Behavior::Player(ship) | Behavior::Alien(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.behavior {
            Behavior::Player(ship) | Behavior::Alien(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        match &self.behavior {
            Behavior::Projectile(shot) => Some(shot),
            _ => None,
        }
    }

    pub fn area_effect(&self) -> Option<&AreaEffect> {
        match &self.behavior {
            Behavior::AreaEffect(effect) => Some(effect),
            _ => None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance one tick: decay, then Euler step.
    ///
    /// Friction is a per-tick multiplier, not scaled by `dt`, so damping is
    /// only stable at the fixed simulation rate.
    pub fn integrate(&mut self, dt: f32) {
        self.vel *= self.friction;
        self.angular_velocity *= self.angular_friction;
        self.pos += self.vel * dt;
        self.rotation = wrap_degrees(self.rotation + self.angular_velocity * dt);
    }

    /// Straight-line motion with no decay or spin
    pub fn integrate_linear(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.vel += force;
    }

    pub fn apply_torque(&mut self, torque: f32) {
        self.angular_velocity += torque;
    }

    /// Subtract health; true if this hit took it from above zero to zero or below
    pub fn damage(&mut self, amount: f32) -> bool {
        let was_alive = self.health > 0.0;
        self.health -= amount;
        was_alive && self.health <= 0.0
    }

    /// Health has run out but the cascade has not run yet
    pub fn is_depleted(&self) -> bool {
        self.health <= 0.0 && !self.destroyed
    }

    pub fn detect_collision(&self, other: &Entity) -> bool {
        super::collision::detect_collision(self.pos, self.radius, other.pos, other.radius)
    }
}
