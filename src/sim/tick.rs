//! Fixed timestep simulation tick
//!
//! One call to [`tick`] advances the world by one step, in a fixed order:
//!
//! 1. ships fly and fire, everything integrates, lifetimes run down
//! 2. pairwise contacts resolve
//! 3. spawners fire
//! 4. force fields act
//! 5. ships wrap around the screen, loose bodies far off it are culled
//! 6. destroyed entities are removed and the game-over check runs
//!
//! Entities created during a step are not visited again until the next one.

use super::arena::EntityId;
use super::collision::resolve_collisions;
use super::entity::{Behavior, EdgePolicy, EntityKind};
use super::field::{self, apply_area_effects};
use super::projectile;
use super::ship::{self, ShipIntent};
use super::spawner::run_spawners;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Forward / reverse thrust, -1..=1
    pub thrust: f32,
    /// Right / left thrust, -1..=1
    pub strafe: f32,
    /// Turn rate, -1..=1
    pub turn: f32,
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new ship after game over
    pub respawn: bool,
}

impl TickInput {
    /// The piloting part of the input
    pub fn intent(&self) -> ShipIntent {
        ShipIntent {
            thrust: self.thrust,
            strafe: self.strafe,
            turn: self.turn,
            fire: self.fire,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }
    if state.phase == GamePhase::Paused {
        return;
    }

    if state.phase == GamePhase::GameOver && input.respawn {
        state.spawn_player();
        state.phase = GamePhase::Playing;
        state.events.push(GameEvent::PlayerRespawned);
        log::info!("Player respawned");
    }

    state.time_ticks += 1;
    if state.phase == GamePhase::Playing {
        state.elapsed += dt;
    }
    if let Some(player) = state.player {
        state.command(player, input.intent());
    }

    update_entities(state, dt);
    resolve_collisions(state);
    run_spawners(state, dt);
    apply_area_effects(state);
    enforce_bounds(state);

    state.texts.retain_mut(|text| !text.update(dt));
    state.flush_destroyed();

    if state.phase == GamePhase::Playing && state.player.is_none() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerDied);
        log::info!(
            "Game over: score {} after {:.1}s",
            state.player_score(),
            state.elapsed
        );
    }
}

/// Per-entity update: piloting, integration, lifetimes
fn update_entities(state: &mut GameState, dt: f32) {
    for id in state.entities.ids() {
        let Some(entity) = state.entities.get_mut(id) else {
            continue;
        };
        if entity.destroyed {
            continue;
        }

        let mut fires = false;
        let mut expired = false;
        match entity.kind() {
            EntityKind::Player | EntityKind::Alien => {
                fires = ship::pilot(entity, dt);
                entity.integrate(dt);
            }
            EntityKind::Asteroid | EntityKind::Loot => entity.integrate(dt),
            EntityKind::Shrapnel => {
                entity.integrate_linear(dt);
                if let Behavior::Shrapnel { lifetime } = &mut entity.behavior {
                    *lifetime -= dt;
                    expired = *lifetime <= 0.0;
                }
            }
            EntityKind::Projectile => expired = projectile::advance(entity, dt),
            EntityKind::AreaEffect => field::update(entity, dt),
        }

        if fires {
            projectile::fire(state, id);
        }
        if expired {
            state.retire(id);
        }
    }
}

/// Wrap ships around the screen; retire anything else that has drifted
/// beyond the cull margin
fn enforce_bounds(state: &mut GameState) {
    let (width, height) = (state.tuning.screen_width, state.tuning.screen_height);
    let margin = state.tuning.cull_margin;

    let mut lost: Vec<EntityId> = Vec::new();
    for (id, entity) in state.entities.iter_mut() {
        if entity.destroyed {
            continue;
        }
        match entity.edge_policy() {
            EdgePolicy::Wrap => {
                entity.pos.x = entity.pos.x.rem_euclid(width);
                entity.pos.y = entity.pos.y.rem_euclid(height);
            }
            EdgePolicy::Cull => {
                let reach = margin + entity.radius;
                let p = entity.pos;
                if p.x < -reach || p.x > width + reach || p.y < -reach || p.y > height + reach {
                    lost.push(id);
                }
            }
        }
    }
    for id in lost {
        state.retire(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entity::Entity;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use std::sync::Arc;

    fn empty() -> GameState {
        GameState::new(12345, Arc::new(Tuning::default()))
    }

    #[test]
    fn test_tick_pause() {
        let mut state = empty();
        state.spawn_player();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let ticks = state.time_ticks;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_shrapnel_expires() {
        let mut state = empty();
        state.spawn_player();
        let debris = state.spawn(Entity::shrapnel(Vec2::new(100.0, 100.0), Vec2::X, 1.0, 0.04));
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(!state.entities.contains(debris));
    }

    #[test]
    fn test_ships_wrap_and_rocks_cull() {
        let mut state = empty();
        let player = state.spawn_player();
        state.entities.get_mut(player).unwrap().pos = Vec2::new(-5.0, 100.0);
        let tuning = state.tuning.clone();
        let rock = state.spawn(Entity::asteroid(
            Vec2::new(-500.0, 100.0),
            Vec2::ZERO,
            20.0,
            &tuning,
        ));

        tick(&mut state, &TickInput::default(), SIM_DT);
        let pos = state.entities.get(player).unwrap().pos;
        assert!(pos.x > 2500.0);
        assert!(!state.entities.contains(rock));
    }

    #[test]
    fn test_fire_input_spawns_shot() {
        let mut state = empty();
        state.spawn_player();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        assert_eq!(state.count_alive(EntityKind::Projectile), 1);

        // Cooldown holds the next shot back
        tick(&mut state, &fire, SIM_DT);
        assert_eq!(state.count_alive(EntityKind::Projectile), 1);
    }

    #[test]
    fn test_game_over_and_respawn() {
        let mut state = empty();
        let player = state.spawn_player();
        state.retire(player);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::PlayerDied));

        let respawn = TickInput {
            respawn: true,
            ..Default::default()
        };
        tick(&mut state, &respawn, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player_entity().is_some());
        assert!(state.drain_events().contains(&GameEvent::PlayerRespawned));
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = GameState::new_game(99999, Arc::new(Tuning::default()));
            let inputs = [
                TickInput {
                    turn: 1.0,
                    fire: true,
                    ..Default::default()
                },
                TickInput {
                    thrust: 1.0,
                    ..Default::default()
                },
            ];
            for i in 0..600 {
                tick(&mut state, &inputs[i % 2], SIM_DT);
            }
            let snapshot: Vec<(Vec2, Vec2, f32)> = state
                .entities
                .iter()
                .map(|(_, e)| (e.pos, e.vel, e.health))
                .collect();
            (snapshot, state.player_score(), state.phase)
        };
        assert_eq!(run(), run());
    }
}
