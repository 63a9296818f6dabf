//! Piloted ships: the player and aliens share one flight model

use super::entity::{Behavior, Entity};
use crate::tuning::Tuning;
use crate::{heading, rotate_degrees};

/// What a pilot wants this tick. Axes are clamped to [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipIntent {
    /// Forward (+) / reverse (-) thrust
    pub thrust: f32,
    /// Right (+) / left (-) thrust
    pub strafe: f32,
    /// Positive turns toward increasing rotation
    pub turn: f32,
    pub fire: bool,
}

impl ShipIntent {
    pub fn clamped(self) -> Self {
        Self {
            thrust: self.thrust.clamp(-1.0, 1.0),
            strafe: self.strafe.clamp(-1.0, 1.0),
            turn: self.turn.clamp(-1.0, 1.0),
            fire: self.fire,
        }
    }
}

/// Flight and weapon parameters carried by a ship entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Thrust acceleration
    pub move_speed: f32,
    /// Turn acceleration, degrees per second squared
    pub turn_speed: f32,
    pub muzzle_speed: f32,
    pub shot_damage: f32,
    /// Seconds between shots
    pub shot_cooldown: f32,
    pub cooldown_timer: f32,
    pub stabilisers: bool,
    pub stabiliser_strength: f32,
    /// Below this speed along an axis, drift is zeroed outright
    pub velocity_threshold: f32,
    pub max_speed: Option<f32>,
    pub max_angular_velocity: Option<f32>,
    pub score: u64,
    pub intent: ShipIntent,
}

impl Ship {
    pub fn player(tuning: &Tuning) -> Self {
        Self {
            move_speed: tuning.player_speed,
            turn_speed: tuning.player_turn_speed,
            muzzle_speed: tuning.player_shot_speed,
            shot_damage: tuning.player_shot_damage,
            shot_cooldown: tuning.player_shoot_cooldown,
            cooldown_timer: 0.0,
            stabilisers: false,
            stabiliser_strength: tuning.stabiliser_strength,
            velocity_threshold: tuning.stabiliser_velocity_threshold,
            max_speed: None,
            max_angular_velocity: None,
            score: 0,
            intent: ShipIntent::default(),
        }
    }

    pub fn alien(tuning: &Tuning) -> Self {
        Self {
            move_speed: tuning.alien_move_speed,
            turn_speed: tuning.alien_turn_speed,
            muzzle_speed: tuning.alien_shot_speed,
            shot_damage: tuning.player_shot_damage,
            shot_cooldown: tuning.alien_shoot_cooldown,
            cooldown_timer: tuning.alien_shoot_cooldown,
            stabilisers: true,
            stabiliser_strength: tuning.alien_stabiliser_strength,
            velocity_threshold: tuning.stabiliser_velocity_threshold,
            max_speed: Some(tuning.alien_max_speed),
            max_angular_velocity: Some(tuning.alien_max_angular_velocity),
            score: 0,
            intent: ShipIntent::default(),
        }
    }

    pub fn ready_to_fire(&self) -> bool {
        self.cooldown_timer <= 0.0
    }
}

/// Move `value` toward zero by `step` without overshooting
#[inline]
fn decay_toward_zero(value: f32, step: f32) -> f32 {
    if value > 0.0 {
        (value - step).max(0.0)
    } else {
        (value + step).min(0.0)
    }
}

/// Apply the ship's current intent to its body for one tick.
///
/// Returns true when the ship fires this tick; the caller spawns the shot.
/// Integration is left to the caller.
pub fn pilot(entity: &mut Entity, dt: f32) -> bool {
    let forward = heading(entity.rotation);
    let right = rotate_degrees(forward, -90.0);
    let Entity {
        vel,
        angular_velocity,
        behavior,
        ..
    } = entity;
    let (Behavior::Player(ship) | Behavior::Alien(ship)) = behavior else {
        return false;
    };

    ship.cooldown_timer -= dt;
    let intent = ship.intent.clamped();
    *vel += forward * (intent.thrust * ship.move_speed * dt);
    *vel += right * (intent.strafe * ship.move_speed * dt);
    *angular_velocity += intent.turn * ship.turn_speed * dt;

    if ship.stabilisers {
        let step = ship.move_speed * dt * ship.stabiliser_strength;
        if intent.thrust == 0.0 && intent.strafe == 0.0 {
            let mut along = vel.dot(forward);
            let mut across = vel.dot(right);
            along = if along.abs() < ship.velocity_threshold {
                0.0
            } else {
                decay_toward_zero(along, step)
            };
            across = if across.abs() < ship.velocity_threshold {
                0.0
            } else {
                decay_toward_zero(across, step)
            };
            *vel = forward * along + right * across;
        }
        if intent.turn == 0.0 {
            let twist = ship.turn_speed * dt * ship.stabiliser_strength;
            *angular_velocity = decay_toward_zero(*angular_velocity, twist);
        }
    }

    if let Some(max) = ship.max_speed {
        *vel = vel.clamp_length_max(max);
    }
    if let Some(max) = ship.max_angular_velocity {
        *angular_velocity = angular_velocity.clamp(-max, max);
    }

    if intent.fire && ship.ready_to_fire() {
        ship.cooldown_timer = ship.shot_cooldown;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player() -> Entity {
        Entity::player(Vec2::ZERO, &Tuning::default())
    }

    fn set_intent(entity: &mut Entity, intent: ShipIntent) {
        entity.ship_mut().unwrap().intent = intent;
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut ship = player();
        set_intent(
            &mut ship,
            ShipIntent {
                thrust: 1.0,
                ..Default::default()
            },
        );
        pilot(&mut ship, 0.5);
        assert!((ship.vel - Vec2::new(0.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_intent_axes_are_clamped() {
        let mut ship = player();
        set_intent(
            &mut ship,
            ShipIntent {
                turn: 5.0,
                ..Default::default()
            },
        );
        pilot(&mut ship, 1.0);
        assert_eq!(ship.angular_velocity, 300.0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut ship = player();
        set_intent(
            &mut ship,
            ShipIntent {
                fire: true,
                ..Default::default()
            },
        );
        assert!(pilot(&mut ship, 0.1));
        assert!(!pilot(&mut ship, 0.1));
        assert!(!pilot(&mut ship, 0.1));
        assert!(pilot(&mut ship, 0.15));
    }

    #[test]
    fn test_stabilisers_bleed_drift() {
        let mut ship = player();
        ship.ship_mut().unwrap().stabilisers = true;
        ship.vel = Vec2::new(0.0, 50.0);
        ship.angular_velocity = 10.0;
        pilot(&mut ship, 0.1);
        assert!((ship.vel.y - 40.0).abs() < 1e-4);
        assert_eq!(ship.angular_velocity, 0.0);

        ship.vel = Vec2::new(0.0, 0.5);
        pilot(&mut ship, 0.1);
        assert_eq!(ship.vel, Vec2::ZERO);
    }

    #[test]
    fn test_alien_speed_is_capped() {
        let mut alien = Entity::alien(Vec2::ZERO, &Tuning::default());
        alien.vel = Vec2::new(1000.0, 0.0);
        pilot(&mut alien, 0.01);
        assert!(alien.speed() <= 300.0 + 1e-3);
    }
}
