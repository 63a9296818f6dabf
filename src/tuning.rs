//! Data-driven game balance
//!
//! [`Tuning`] mirrors every constant in [`crate::consts`]. It is built once at
//! startup, optionally from a JSON file that overrides any subset of fields
//! (missing keys fall back to the compile-time defaults), validated, and then
//! shared read-only with the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};
use crate::sim::field::{Band, ForceBands};

/// How often the collision pass visits an overlapping pair per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPasses {
    /// Each unordered pair is resolved once
    #[default]
    Once,
    /// Both (A, B) and (B, A) are resolved, doubling contact damage
    BothOrderings,
}

/// Runtime-tunable physics and gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // World
    pub screen_width: f32,
    pub screen_height: f32,
    pub cull_margin: f32,
    pub friction: f32,
    pub angular_friction: f32,

    // Collisions
    pub collision_modifier: f32,
    pub collision_spin: f32,
    pub collision_passes: CollisionPasses,

    // Asteroids
    pub asteroid_min_radius: f32,
    pub asteroid_kinds: u32,
    pub asteroid_spawn_rate: f32,
    pub asteroid_min_speed: u32,
    pub asteroid_max_speed: u32,
    pub split_gap: f32,
    pub split_spread_deg: f32,
    pub split_shrapnel_fraction: f32,

    // Shrapnel
    pub min_shrapnel_speed: f32,
    pub shrapnel_min_radius: f32,
    pub shrapnel_max_radius: f32,
    pub shrapnel_min_lifetime: f32,
    pub shrapnel_max_lifetime: f32,
    pub death_shrapnel_mass: f32,

    // Player
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_turn_speed: f32,
    pub player_shot_speed: f32,
    pub player_shoot_cooldown: f32,
    pub player_shot_damage: f32,
    pub stabiliser_strength: f32,
    pub stabiliser_velocity_threshold: f32,

    // Shots
    pub shot_radius: f32,
    pub shot_lifetime: f32,
    pub shot_muzzle_offset: f32,

    // Aliens
    pub alien_radius: f32,
    pub alien_health: f32,
    pub alien_spawn_rate: f32,
    pub alien_shot_speed: f32,
    pub alien_shoot_cooldown: f32,
    pub alien_turn_speed: f32,
    pub alien_move_speed: f32,
    pub alien_max_speed: f32,
    pub alien_max_angular_velocity: f32,
    pub alien_stabiliser_strength: f32,

    // Explosions
    pub explosion_initial_radius: f32,
    pub explosion_bands: ForceBands,
    pub death_explosion_multiplier: f32,

    // Black holes
    pub black_hole_radius: f32,
    pub black_hole_bands: ForceBands,
    pub black_hole_health: f32,
    pub black_hole_regen_below: f32,
    pub black_hole_regen_step: f32,
    pub black_hole_swallow_buffer: f32,
    pub black_hole_spawn_rate: f32,
    pub black_hole_min_speed: u32,
    pub black_hole_max_speed: u32,

    // Loot
    pub loot_drop_chance: f64,
    pub loot_radius: f32,
    pub loot_health: f32,
    pub loot_collection_buffer: f32,
    pub loot_spawn_delay: f32,
    pub loot_msg_duration: f32,
    pub loot_heal_amount: f32,
    pub loot_score_points: u64,
    pub loot_stabiliser_refund_points: u64,
    pub loot_fire_cooldown_multiplier: f32,
    pub loot_damage_multiplier: f32,
    pub loot_speed_multiplier: f32,
    pub loot_rotation_multiplier: f32,

    // Scoring
    pub alien_kill_points: u64,
    pub kill_points: u64,

    // Floating text
    pub split_msg_duration: f32,
    pub death_msg_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cull_margin: CULL_MARGIN,
            friction: DEFAULT_FRICTION,
            angular_friction: DEFAULT_ANGULAR_FRICTION,

            collision_modifier: GLOBAL_COLLISION_MODIFIER,
            collision_spin: COLLISION_SPIN,
            collision_passes: CollisionPasses::Once,

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_kinds: ASTEROID_KINDS,
            asteroid_spawn_rate: ASTEROID_SPAWN_RATE,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            split_gap: SPLIT_GAP,
            split_spread_deg: SPLIT_SPREAD_DEG,
            split_shrapnel_fraction: SPLIT_SHRAPNEL_FRACTION,

            min_shrapnel_speed: MIN_SHRAPNEL_SPEED,
            shrapnel_min_radius: SHRAPNEL_MIN_RADIUS,
            shrapnel_max_radius: SHRAPNEL_MAX_RADIUS,
            shrapnel_min_lifetime: SHRAPNEL_MIN_LIFETIME,
            shrapnel_max_lifetime: SHRAPNEL_MAX_LIFETIME,
            death_shrapnel_mass: DEATH_SHRAPNEL_MASS,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_turn_speed: PLAYER_TURN_SPEED,
            player_shot_speed: PLAYER_SHOT_SPEED,
            player_shoot_cooldown: PLAYER_SHOOT_COOLDOWN,
            player_shot_damage: PLAYER_SHOT_DMG,
            stabiliser_strength: STABILISER_STR,
            stabiliser_velocity_threshold: STABILISER_VELOCITY_THRESHOLD,

            shot_radius: SHOT_RADIUS,
            shot_lifetime: SHOT_LIFETIME,
            shot_muzzle_offset: SHOT_MUZZLE_OFFSET,

            alien_radius: ALIEN_RADIUS,
            alien_health: ALIEN_HEALTH,
            alien_spawn_rate: ALIEN_SPAWN_RATE,
            alien_shot_speed: ALIEN_SHOT_SPEED,
            alien_shoot_cooldown: ALIEN_SHOOT_COOLDOWN,
            alien_turn_speed: ALIEN_TURN_SPEED,
            alien_move_speed: ALIEN_MOVE_SPEED,
            alien_max_speed: ALIEN_MAX_SPEED,
            alien_max_angular_velocity: ALIEN_MAX_ANGULAR_VELOCITY,
            alien_stabiliser_strength: ALIEN_STABILISER_STRENGTH,

            explosion_initial_radius: EXPLOSION_INITIAL_RADIUS,
            explosion_bands: ForceBands {
                near: Band::new(EXPLOSION_NEAR_RADIUS, EXPLOSION_NEAR_STRENGTH),
                mid: Band::new(EXPLOSION_MID_RADIUS, EXPLOSION_MID_STRENGTH),
                far: Band::new(EXPLOSION_FAR_RADIUS, EXPLOSION_FAR_STRENGTH),
            },
            death_explosion_multiplier: DEATH_EXPLOSION_MULTIPLIER,

            black_hole_radius: BLACK_HOLE_RADIUS,
            black_hole_bands: ForceBands {
                near: Band::new(BLACK_HOLE_NEAR_RADIUS, BLACK_HOLE_NEAR_PULL),
                mid: Band::new(BLACK_HOLE_MID_RADIUS, BLACK_HOLE_MID_PULL),
                far: Band::new(BLACK_HOLE_FAR_RADIUS, BLACK_HOLE_FAR_PULL),
            },
            black_hole_health: BLACK_HOLE_HEALTH,
            black_hole_regen_below: BLACK_HOLE_REGEN_BELOW,
            black_hole_regen_step: BLACK_HOLE_REGEN_STEP,
            black_hole_swallow_buffer: BLACK_HOLE_COLLI_BUFFER,
            black_hole_spawn_rate: BLACK_HOLE_SPAWN_RATE,
            black_hole_min_speed: BLACK_HOLE_MIN_SPEED,
            black_hole_max_speed: BLACK_HOLE_MAX_SPEED,

            loot_drop_chance: LOOT_DROP_CHANCE,
            loot_radius: LOOT_RADIUS,
            loot_health: LOOT_HEALTH,
            loot_collection_buffer: LOOT_COLLECTION_BUFFER,
            loot_spawn_delay: LOOT_SPAWN_DELAY,
            loot_msg_duration: LOOT_MSG_DURATION,
            loot_heal_amount: LOOT_HEAL_AMOUNT,
            loot_score_points: LOOT_SCORE_POINTS,
            loot_stabiliser_refund_points: LOOT_STABILISER_REFUND_POINTS,
            loot_fire_cooldown_multiplier: LOOT_FIRE_COOLDOWN_MULTIPLIER,
            loot_damage_multiplier: LOOT_DMG_MULTIPLIER,
            loot_speed_multiplier: LOOT_SPEED_MULTIPLIER,
            loot_rotation_multiplier: LOOT_ROTATION_MULTIPLIER,

            alien_kill_points: ALIEN_KILL_POINTS,
            kill_points: KILL_POINTS,

            split_msg_duration: SPLIT_MSG_DURATION,
            death_msg_duration: DEATH_MSG_DURATION,
        }
    }
}

fn positive(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            name,
            value,
            safe_range: "(0, inf)",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            name,
            value,
            safe_range: "[0, inf)",
        })
    }
}

fn unit_interval(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            name,
            value,
            safe_range: "(0, 1]",
        })
    }
}

fn ordered_bands(name: &'static str, bands: &ForceBands) -> GameResult<()> {
    if bands.near.radius > 0.0
        && bands.near.radius < bands.mid.radius
        && bands.mid.radius < bands.far.radius
    {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            name,
            value: bands.near.radius,
            safe_range: "0 < near < mid < far",
        })
    }
}

impl Tuning {
    /// Largest asteroid the field spawns
    pub fn asteroid_max_radius(&self) -> f32 {
        self.asteroid_min_radius * self.asteroid_kinds as f32
    }

    /// Check that every value is inside the range the simulation assumes
    pub fn validate(&self) -> GameResult<()> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        unit_interval("friction", self.friction)?;
        unit_interval("angular_friction", self.angular_friction)?;
        positive("asteroid_min_radius", self.asteroid_min_radius)?;
        positive("asteroid_kinds", self.asteroid_kinds as f32)?;
        positive("asteroid_spawn_rate", self.asteroid_spawn_rate)?;
        positive("alien_spawn_rate", self.alien_spawn_rate)?;
        positive("black_hole_spawn_rate", self.black_hole_spawn_rate)?;
        positive("player_radius", self.player_radius)?;
        positive("alien_radius", self.alien_radius)?;
        positive("shot_radius", self.shot_radius)?;
        positive("shot_lifetime", self.shot_lifetime)?;
        positive("loot_radius", self.loot_radius)?;
        positive("black_hole_radius", self.black_hole_radius)?;
        positive("explosion_initial_radius", self.explosion_initial_radius)?;
        positive("shrapnel_min_radius", self.shrapnel_min_radius)?;
        non_negative("split_gap", self.split_gap)?;
        non_negative("split_spread_deg", self.split_spread_deg)?;
        non_negative("split_shrapnel_fraction", self.split_shrapnel_fraction)?;
        non_negative("death_shrapnel_mass", self.death_shrapnel_mass)?;
        if self.shrapnel_max_radius < self.shrapnel_min_radius {
            return Err(GameError::InvalidTuning {
                name: "shrapnel_max_radius",
                value: self.shrapnel_max_radius,
                safe_range: "[shrapnel_min_radius, inf)",
            });
        }
        if self.shrapnel_max_lifetime < self.shrapnel_min_lifetime {
            return Err(GameError::InvalidTuning {
                name: "shrapnel_max_lifetime",
                value: self.shrapnel_max_lifetime,
                safe_range: "[shrapnel_min_lifetime, inf)",
            });
        }
        if self.asteroid_max_speed < self.asteroid_min_speed {
            return Err(GameError::InvalidTuning {
                name: "asteroid_max_speed",
                value: self.asteroid_max_speed as f32,
                safe_range: "[asteroid_min_speed, inf)",
            });
        }
        if self.black_hole_max_speed < self.black_hole_min_speed {
            return Err(GameError::InvalidTuning {
                name: "black_hole_max_speed",
                value: self.black_hole_max_speed as f32,
                safe_range: "[black_hole_min_speed, inf)",
            });
        }
        if !(0.0..=1.0).contains(&self.loot_drop_chance) {
            return Err(GameError::InvalidTuning {
                name: "loot_drop_chance",
                value: self.loot_drop_chance as f32,
                safe_range: "[0, 1]",
            });
        }
        ordered_bands("explosion_bands", &self.explosion_bands)?;
        ordered_bands("black_hole_bands", &self.black_hole_bands)?;
        Ok(())
    }

    /// Parse a (possibly partial) JSON override document and validate it
    pub fn from_json_str(json: &str) -> GameResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
