//! Timed spawners: the asteroid, alien and black hole fields plus one-shot
//! loot drops left behind by dead ships.

use glam::Vec2;
use rand::Rng;

use super::arena::EntityId;
use super::entity::Entity;
use super::loot::LootKind;
use super::state::GameState;
use crate::rotate_degrees;
use crate::tuning::Tuning;

/// Delay between spawns
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interval {
    Fixed(f32),
    /// Re-rolled uniformly after every spawn
    Range(f32, f32),
}

impl Interval {
    fn roll(&self, rng: &mut impl Rng) -> f32 {
        match *self {
            Interval::Fixed(secs) => secs,
            Interval::Range(lo, hi) if hi > lo => rng.random_range(lo..=hi),
            Interval::Range(lo, _) => lo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnerKind {
    AsteroidField,
    AlienField,
    BlackHoleField,
    /// Drops a single random pickup at `pos`, then retires
    LootDrop { pos: Vec2 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub kind: SpawnerKind,
    pub interval: Interval,
    /// Seconds since the last spawn
    pub timer: f32,
    /// Delay before the next spawn
    pub next_in: f32,
    pub finished: bool,
}

impl Spawner {
    pub fn new(kind: SpawnerKind, interval: Interval, rng: &mut impl Rng) -> Self {
        Self {
            kind,
            interval,
            timer: 0.0,
            next_in: interval.roll(rng),
            finished: false,
        }
    }

    pub fn asteroid_field(tuning: &Tuning) -> Self {
        let interval = Interval::Fixed(tuning.asteroid_spawn_rate);
        Self::fixed(SpawnerKind::AsteroidField, interval)
    }

    pub fn alien_field(tuning: &Tuning) -> Self {
        Self::fixed(SpawnerKind::AlienField, Interval::Fixed(tuning.alien_spawn_rate))
    }

    pub fn black_hole_field(tuning: &Tuning) -> Self {
        Self::fixed(SpawnerKind::BlackHoleField, Interval::Fixed(tuning.black_hole_spawn_rate))
    }

    pub fn loot_drop(pos: Vec2, delay: f32) -> Self {
        Self::fixed(SpawnerKind::LootDrop { pos }, Interval::Fixed(delay))
    }

    fn fixed(kind: SpawnerKind, interval: Interval) -> Self {
        let next_in = match interval {
            Interval::Fixed(secs) => secs,
            Interval::Range(lo, _) => lo,
        };
        Self {
            kind,
            interval,
            timer: 0.0,
            next_in,
            finished: false,
        }
    }

    /// Advance the timer; true when a spawn is due this tick
    ///
    /// Repeating fields fire once the timer strictly exceeds the interval.
    /// One-shot drops fire once it is reached and then finish.
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) -> bool {
        if self.finished {
            return false;
        }
        self.timer += dt;
        match self.kind {
            SpawnerKind::LootDrop { .. } => {
                if self.timer >= self.next_in {
                    self.finished = true;
                    return true;
                }
                false
            }
            _ => {
                if self.timer > self.next_in {
                    self.timer = 0.0;
                    self.next_in = self.interval.roll(rng);
                    return true;
                }
                false
            }
        }
    }
}

/// Pick a point on (or beyond) a random screen edge
///
/// Returns the position and the unit direction pointing into the screen.
fn edge_entry(rng: &mut impl Rng, tuning: &Tuning, outset: f32) -> (Vec2, Vec2) {
    let (w, h) = (tuning.screen_width, tuning.screen_height);
    let t: f32 = rng.random_range(0.0..=1.0);
    match rng.random_range(0..4) {
        0 => (Vec2::new(-outset, t * h), Vec2::X),
        1 => (Vec2::new(w + outset, t * h), Vec2::NEG_X),
        2 => (Vec2::new(t * w, -outset), Vec2::Y),
        _ => (Vec2::new(t * w, h + outset), Vec2::NEG_Y),
    }
}

/// Launch an asteroid of random size from just beyond a screen edge
pub fn spawn_asteroid(state: &mut GameState) -> EntityId {
    let tuning = state.tuning.clone();
    let (pos, inward) = edge_entry(&mut state.rng, &tuning, tuning.asteroid_max_radius());
    let speed = state
        .rng
        .random_range(tuning.asteroid_min_speed..=tuning.asteroid_max_speed) as f32;
    let angle = state.rng.random_range(-30..=30) as f32;
    let size = state.rng.random_range(1..=tuning.asteroid_kinds) as f32;
    let vel = rotate_degrees(inward * speed, angle);
    state.spawn(Entity::asteroid(pos, vel, tuning.asteroid_min_radius * size, &tuning))
}

pub fn spawn_black_hole(state: &mut GameState) -> EntityId {
    let tuning = state.tuning.clone();
    let (pos, inward) = edge_entry(&mut state.rng, &tuning, tuning.asteroid_max_radius());
    let speed = state
        .rng
        .random_range(tuning.black_hole_min_speed..=tuning.black_hole_max_speed) as f32;
    let angle = state.rng.random_range(-30..=30) as f32;
    let vel = rotate_degrees(inward * speed, angle);
    log::debug!("Black hole entering at ({:.0}, {:.0})", pos.x, pos.y);
    state.spawn(Entity::black_hole(pos, vel, &tuning))
}

/// Aliens appear on the screen edge facing inward
pub fn spawn_alien(state: &mut GameState) -> EntityId {
    let tuning = state.tuning.clone();
    let (pos, inward) = edge_entry(&mut state.rng, &tuning, 0.0);
    let alien = Entity::alien(pos, &tuning).with_rotation(crate::rotation_towards(inward));
    state.spawn(alien)
}

pub fn spawn_loot(state: &mut GameState, pos: Vec2) -> EntityId {
    let kind = LootKind::random(&mut state.rng);
    let loot = Entity::loot(pos, kind, &state.tuning);
    state.spawn(loot)
}

/// Advance every spawner and create whatever is due, then drop finished ones
pub fn run_spawners(state: &mut GameState, dt: f32) {
    let mut spawners = std::mem::take(&mut state.spawners);
    for spawner in spawners.iter_mut() {
        if !spawner.advance(dt, &mut state.rng) {
            continue;
        }
        match spawner.kind {
            SpawnerKind::AsteroidField => {
                spawn_asteroid(state);
            }
            SpawnerKind::AlienField => {
                spawn_alien(state);
            }
            SpawnerKind::BlackHoleField => {
                spawn_black_hole(state);
            }
            SpawnerKind::LootDrop { pos } => {
                spawn_loot(state, pos);
            }
        }
    }
    spawners.retain(|s| !s.finished);
    // Keep anything queued while the list was taken
    spawners.append(&mut state.spawners);
    state.spawners = spawners;
}
