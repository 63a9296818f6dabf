//! Shatterfield - asteroid-field arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, destruction cascades, spawners)
//! - `renderer`: CPU-side draw boundary (vertices, colours, tessellation)
//! - `tuning`: Data-driven game balance
//! - `highscores`: JSON leaderboard

pub mod error;
pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::{GameError, GameResult};
pub use highscores::HighScores;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// These are the defaults behind [`Tuning::default`]. Simulation code reads
/// the `Tuning` it was handed, never these directly.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 2560.0;
    pub const SCREEN_HEIGHT: f32 = 1440.0;
    /// Extra room outside the screen before loose debris is culled
    pub const CULL_MARGIN: f32 = 100.0;

    /// Per-tick velocity decay
    pub const DEFAULT_FRICTION: f32 = 0.995;
    pub const DEFAULT_ANGULAR_FRICTION: f32 = 0.95;

    /// Asteroids
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROID_KINDS: u32 = 3;
    pub const ASTEROID_SPAWN_RATE: f32 = 0.9;
    pub const ASTEROID_MAX_RADIUS: f32 = ASTEROID_MIN_RADIUS * ASTEROID_KINDS as f32;
    pub const ASTEROID_MIN_SPEED: u32 = 200;
    pub const ASTEROID_MAX_SPEED: u32 = 400;
    /// Gap left between split children on top of their radius
    pub const SPLIT_GAP: f32 = 2.0;
    /// Spread of child velocity direction (degrees, either side)
    pub const SPLIT_SPREAD_DEG: f32 = 30.0;

    /// Player
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_TURN_SPEED: f32 = 300.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const STABILISER_STR: f32 = 0.5;
    pub const STABILISER_VELOCITY_THRESHOLD: f32 = 1.0;

    /// Shots
    pub const SHOT_RADIUS: f32 = 5.0;
    pub const SHOT_LIFETIME: f32 = 2.0;
    pub const SHOT_MUZZLE_OFFSET: f32 = 10.0;
    pub const PLAYER_SHOT_SPEED: f32 = 700.0;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.3;
    pub const PLAYER_SHOT_DMG: f32 = 40.0;

    /// Aliens
    pub const ALIEN_RADIUS: f32 = 25.0;
    pub const ALIEN_HEALTH: f32 = ALIEN_RADIUS * 3.0;
    pub const ALIEN_SPAWN_RATE: f32 = 3.0;
    pub const ALIEN_SHOT_SPEED: f32 = 300.0;
    pub const ALIEN_SHOOT_COOLDOWN: f32 = 1.5;
    pub const ALIEN_TURN_SPEED: f32 = PLAYER_TURN_SPEED * 1.5;
    pub const ALIEN_MOVE_SPEED: f32 = PLAYER_SPEED * 1.5;
    pub const ALIEN_MAX_SPEED: f32 = 300.0;
    pub const ALIEN_MAX_ANGULAR_VELOCITY: f32 = 300.0;
    pub const ALIEN_STABILISER_STRENGTH: f32 = 0.5;

    /// Collisions and cascades
    pub const GLOBAL_COLLISION_MODIFIER: f32 = 0.002;
    pub const COLLISION_SPIN: f32 = 0.2;
    pub const LOOT_DROP_CHANCE: f64 = 0.7;
    pub const MIN_SHRAPNEL_SPEED: f32 = PLAYER_SHOT_SPEED / 10.0;
    pub const SHRAPNEL_MIN_RADIUS: f32 = 1.0;
    pub const SHRAPNEL_MAX_RADIUS: f32 = 3.0;
    pub const SHRAPNEL_MIN_LIFETIME: f32 = 0.1;
    pub const SHRAPNEL_MAX_LIFETIME: f32 = 0.7;
    /// Shrapnel budget for ship deaths
    pub const DEATH_SHRAPNEL_MASS: f32 = 30.0;
    /// Fraction of the parent radius spent on shrapnel when an asteroid splits
    pub const SPLIT_SHRAPNEL_FRACTION: f32 = 0.5;

    /// Explosions
    pub const EXPLOSION_NEAR_STRENGTH: f32 = 200.0;
    pub const EXPLOSION_MID_STRENGTH: f32 = 100.0;
    pub const EXPLOSION_FAR_STRENGTH: f32 = 50.0;
    pub const EXPLOSION_INITIAL_RADIUS: f32 = 1.0;
    pub const EXPLOSION_FAR_RADIUS: f32 = EXPLOSION_INITIAL_RADIUS * 200.0;
    pub const EXPLOSION_NEAR_RADIUS: f32 = EXPLOSION_FAR_RADIUS / 3.0;
    pub const EXPLOSION_MID_RADIUS: f32 = EXPLOSION_FAR_RADIUS / 1.5;
    /// Explosion size multiplier used for ship deaths
    pub const DEATH_EXPLOSION_MULTIPLIER: f32 = 7.0;

    /// Black holes
    pub const BLACK_HOLE_RADIUS: f32 = 75.0;
    pub const BLACK_HOLE_FAR_RADIUS: f32 = BLACK_HOLE_RADIUS * 10.0;
    pub const BLACK_HOLE_NEAR_RADIUS: f32 = BLACK_HOLE_FAR_RADIUS / 4.0;
    pub const BLACK_HOLE_MID_RADIUS: f32 = BLACK_HOLE_FAR_RADIUS / 2.0;
    pub const BLACK_HOLE_HEALTH: f32 = 1_000_000.0;
    pub const BLACK_HOLE_REGEN_BELOW: f32 = 5000.0;
    pub const BLACK_HOLE_REGEN_STEP: f32 = 1000.0;
    pub const BLACK_HOLE_COLLI_BUFFER: f32 = 15.0;
    pub const BLACK_HOLE_NEAR_PULL: f32 = -100.0;
    pub const BLACK_HOLE_MID_PULL: f32 = -10.0;
    pub const BLACK_HOLE_FAR_PULL: f32 = -3.0;
    pub const BLACK_HOLE_SPAWN_RATE: f32 = 30.0;
    pub const BLACK_HOLE_MIN_SPEED: u32 = 100;
    pub const BLACK_HOLE_MAX_SPEED: u32 = 150;

    /// Loot
    pub const LOOT_RADIUS: f32 = 20.0;
    pub const LOOT_HEALTH: f32 = 1_000_000_000.0;
    pub const LOOT_COLLECTION_BUFFER: f32 = 10.0;
    pub const LOOT_SPAWN_DELAY: f32 = 1.0;
    pub const LOOT_MSG_DURATION: f32 = 1.0;
    pub const LOOT_HEAL_AMOUNT: f32 = 200.0;
    pub const LOOT_SCORE_POINTS: u64 = 50;
    pub const LOOT_STABILISER_REFUND_POINTS: u64 = 25;
    pub const LOOT_FIRE_COOLDOWN_MULTIPLIER: f32 = 0.7;
    pub const LOOT_DMG_MULTIPLIER: f32 = 2.0;
    pub const LOOT_SPEED_MULTIPLIER: f32 = 1.2;
    pub const LOOT_ROTATION_MULTIPLIER: f32 = 1.2;

    /// Score awarded to the shooter for each kill
    pub const ALIEN_KILL_POINTS: u64 = 5;
    pub const KILL_POINTS: u64 = 1;

    /// Floating text durations (seconds)
    pub const SPLIT_MSG_DURATION: f32 = 0.5;
    pub const DEATH_MSG_DURATION: f32 = 3.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate a vector counter-clockwise by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Forward unit vector for a rotation in degrees (0° faces +Y)
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    rotate_degrees(Vec2::Y, rotation)
}

/// Rotation in degrees whose heading points along `direction`
#[inline]
pub fn rotation_towards(direction: Vec2) -> f32 {
    wrap_degrees((-direction.x).atan2(direction.y).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_heading_quarter_turns() {
        let up = heading(0.0);
        assert!((up - Vec2::Y).length() < 1e-5);

        let left = heading(90.0);
        assert!((left - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        let r = rotate_degrees(v, 37.0);
        assert!((r.length() - 5.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn wrap_degrees_stays_in_range(angle in -1.0e5f32..1.0e5f32) {
            let w = wrap_degrees(angle);
            prop_assert!((0.0..360.0).contains(&w));
        }

        #[test]
        fn rotation_towards_inverts_heading(angle in 0.0f32..360.0) {
            let back = heading(rotation_towards(heading(angle)));
            prop_assert!((back - heading(angle)).length() < 1e-3);
        }
    }
}
