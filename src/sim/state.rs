//! Game state and core simulation types
//!
//! Everything the simulation touches lives in [`GameState`]: the entity
//! arena, the spawners, floating texts, the seeded RNG and the event queue
//! that the outer layers drain each frame.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, EntityId};
use super::entity::{Entity, EntityKind};
use super::loot::LootKind;
use super::ship::ShipIntent;
use super::spawner::Spawner;
use super::text::{FloatingText, START_MESSAGES, TextStyle, pick};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player is gone; the field keeps drifting until a respawn
    GameOver,
}

/// Something gameplay-relevant that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Destroyed { id: EntityId, kind: EntityKind },
    Split { parent: EntityId, children: [EntityId; 2] },
    ScoreAwarded { ship: EntityId, points: u64 },
    LootCollected { kind: LootKind },
    /// Pulled into a black hole
    Swallowed { id: EntityId, kind: EntityKind },
    ShotFired { owner: EntityId },
    PlayerDied,
    PlayerRespawned,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Shared, read-only balance values
    pub tuning: Arc<Tuning>,
    pub entities: Arena<Entity>,
    pub spawners: Vec<Spawner>,
    pub texts: Vec<FloatingText>,
    /// Pending events, oldest first
    pub events: Vec<GameEvent>,
    pub phase: GamePhase,
    /// Current player ship, if one is alive
    pub player: Option<EntityId>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds survived by the current player
    pub elapsed: f32,
    /// Score of the last player once their ship is gone
    final_score: u64,
}

impl GameState {
    /// Empty world: no player, no spawners
    pub fn new(seed: u64, tuning: Arc<Tuning>) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            entities: Arena::new(),
            spawners: Vec::new(),
            texts: Vec::new(),
            events: Vec::new(),
            phase: GamePhase::Playing,
            player: None,
            time_ticks: 0,
            elapsed: 0.0,
            final_score: 0,
        }
    }

    /// A fresh run: player in the middle, all three fields running
    pub fn new_game(seed: u64, tuning: Arc<Tuning>) -> Self {
        let mut state = Self::new(seed, tuning);
        state.spawn_player();
        state.spawners.push(Spawner::asteroid_field(&state.tuning));
        state.spawners.push(Spawner::alien_field(&state.tuning));
        state.spawners.push(Spawner::black_hole_field(&state.tuning));

        let centre = state.screen_centre();
        let greeting = pick(&mut state.rng, START_MESSAGES);
        let duration = state.tuning.death_msg_duration;
        state
            .texts
            .push(FloatingText::new(centre, greeting, TextStyle::Info, duration));
        log::info!("New game (seed {})", seed);
        state
    }

    pub fn screen_centre(&self) -> Vec2 {
        Vec2::new(self.tuning.screen_width, self.tuning.screen_height) / 2.0
    }

    /// Add an entity to the world
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.entities.insert(entity)
    }

    /// Place a new player ship at the screen centre
    pub fn spawn_player(&mut self) -> EntityId {
        let player = Entity::player(self.screen_centre(), &self.tuning);
        let id = self.spawn(player);
        self.player = Some(id);
        self.final_score = 0;
        self.elapsed = 0.0;
        id
    }

    /// Mark an entity destroyed without running its cascade
    ///
    /// Used for lifetimes running out, culling, pickups and swallowing.
    pub fn retire(&mut self, id: EntityId) -> bool {
        match self.entities.get_mut(id) {
            Some(entity) if !entity.destroyed => {
                entity.destroyed = true;
                true
            }
            _ => false,
        }
    }

    /// Present in the arena and not yet destroyed
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.get(id).is_some_and(|e| !e.destroyed)
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.player
            .and_then(|id| self.entities.get(id))
            .filter(|e| !e.destroyed)
    }

    /// Score of the current player, or of the last one after game over
    pub fn player_score(&self) -> u64 {
        self.player
            .and_then(|id| self.entities.get(id))
            .and_then(|e| e.ship())
            .map_or(self.final_score, |ship| ship.score)
    }

    /// Steer a live ship for the coming ticks; false if `id` is not a live ship
    pub fn command(&mut self, id: EntityId, intent: ShipIntent) -> bool {
        match self
            .entities
            .get_mut(id)
            .filter(|e| !e.destroyed)
            .and_then(|e| e.ship_mut())
        {
            Some(ship) => {
                ship.intent = intent;
                true
            }
            None => false,
        }
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Live entities of one kind
    pub fn count_alive(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|(_, e)| !e.destroyed && e.kind() == kind)
            .count()
    }

    /// Remove every destroyed entity from the arena; returns how many went
    pub fn flush_destroyed(&mut self) -> usize {
        let removed = self.entities.retain(|_, e| !e.destroyed);
        for entity in &removed {
            if entity.kind() == EntityKind::Player
                && let Some(ship) = entity.ship()
            {
                self.final_score = ship.score;
            }
        }
        if self.player.is_some_and(|id| !self.entities.contains(id)) {
            self.player = None;
        }
        removed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Behavior;

    fn state() -> GameState {
        GameState::new(42, Arc::new(Tuning::default()))
    }

    #[test]
    fn test_new_game_has_player_and_fields() {
        let game = GameState::new_game(1, Arc::new(Tuning::default()));
        assert!(game.player_entity().is_some());
        assert_eq!(game.spawners.len(), 3);
        assert_eq!(game.texts.len(), 1);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_retire_is_silent_and_once() {
        let mut game = state();
        let id = game.spawn(Entity::new(Vec2::ZERO, 5.0, Behavior::Asteroid));
        assert!(game.retire(id));
        assert!(!game.retire(id));
        assert!(!game.is_alive(id));
        assert!(game.events.is_empty());
    }

    #[test]
    fn test_flush_keeps_score_of_removed_player() {
        let mut game = state();
        let player = game.spawn_player();
        game.entities.get_mut(player).unwrap().ship_mut().unwrap().score = 12;

        game.retire(player);
        assert_eq!(game.flush_destroyed(), 1);
        assert_eq!(game.player, None);
        assert_eq!(game.player_score(), 12);
    }

    #[test]
    fn test_command_only_steers_ships() {
        let mut game = state();
        let rock = game.spawn(Entity::new(Vec2::ZERO, 5.0, Behavior::Asteroid));
        let alien = game.spawn(Entity::alien(Vec2::ZERO, &Tuning::default()));
        let intent = ShipIntent {
            thrust: 1.0,
            ..Default::default()
        };

        assert!(!game.command(rock, intent));
        assert!(game.command(alien, intent));
        assert_eq!(game.entities.get(alien).unwrap().ship().unwrap().intent, intent);
    }

    #[test]
    fn test_same_seed_same_rng() {
        use rand::Rng;
        let mut a = state();
        let mut b = state();
        let xs: Vec<u32> = (0..5).map(|_| a.rng.random()).collect();
        let ys: Vec<u32> = (0..5).map(|_| b.rng.random()).collect();
        assert_eq!(xs, ys);
    }
}
