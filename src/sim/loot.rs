//! Power-up pickups dropped by dead ships

use rand::Rng;
use rand::seq::IndexedRandom;

use super::arena::EntityId;
use super::entity::{Behavior, EntityKind};
use super::state::{GameEvent, GameState};
use super::text::{FloatingText, TextStyle};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LootKind {
    Health,
    Speed,
    Score,
    FireRate,
    Rotation,
    Stabilisers,
    Damage,
}

impl LootKind {
    pub const ALL: [LootKind; 7] = [
        LootKind::Health,
        LootKind::Speed,
        LootKind::Score,
        LootKind::FireRate,
        LootKind::Rotation,
        LootKind::Stabilisers,
        LootKind::Damage,
    ];

    /// Uniform pick over every kind
    pub fn random(rng: &mut impl Rng) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&LootKind::Score)
    }

    pub fn description(&self, tuning: &Tuning) -> String {
        match self {
            LootKind::Health => format!("+{} Health", tuning.loot_heal_amount),
            LootKind::Speed => "Engine upgrade!".to_string(),
            LootKind::Score => format!("{}+ Score!", tuning.loot_score_points),
            LootKind::FireRate => "Fire rate increase!".to_string(),
            LootKind::Rotation => "Thruster upgrade!".to_string(),
            LootKind::Stabilisers => "STABILISERS!!!!".to_string(),
            LootKind::Damage => "Fire damage increase!".to_string(),
        }
    }
}

/// Hand a pickup to the player: apply its effect, show its message and
/// remove it from play.
pub fn collect(state: &mut GameState, loot: EntityId, player: EntityId) {
    let tuning = state.tuning.clone();
    let Some(kind) = state
        .entities
        .get(loot)
        .filter(|e| !e.destroyed)
        .and_then(|e| match e.behavior {
            Behavior::Loot(kind) => Some(kind),
            _ => None,
        })
    else {
        return;
    };
    let Some(target) = state
        .entities
        .get_mut(player)
        .filter(|e| !e.destroyed && e.kind() == EntityKind::Player)
    else {
        return;
    };

    let pos = target.pos;
    let mut points = 0;
    let mut message = kind.description(&tuning);
    if kind == LootKind::Health {
        target.health += tuning.loot_heal_amount;
    }
    if let Some(ship) = target.ship_mut() {
        match kind {
            LootKind::Health => {}
            LootKind::Speed => ship.move_speed *= tuning.loot_speed_multiplier,
            LootKind::Score => points = tuning.loot_score_points,
            LootKind::FireRate => ship.shot_cooldown *= tuning.loot_fire_cooldown_multiplier,
            LootKind::Rotation => ship.turn_speed *= tuning.loot_rotation_multiplier,
            LootKind::Damage => ship.shot_damage *= tuning.loot_damage_multiplier,
            LootKind::Stabilisers if ship.stabilisers => {
                points = tuning.loot_stabiliser_refund_points;
                message = format!("Already have stabilisers! +{} Score", points);
            }
            LootKind::Stabilisers => ship.stabilisers = true,
        }
        ship.score += points;
    }

    log::debug!("Player collected {:?} loot", kind);
    state.texts.push(FloatingText::new(
        pos,
        message,
        TextStyle::Loot(kind),
        tuning.loot_msg_duration,
    ));
    state.events.push(GameEvent::LootCollected { kind });
    if points > 0 {
        state.events.push(GameEvent::ScoreAwarded {
            ship: player,
            points,
        });
    }
    state.retire(loot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Entity;
    use glam::Vec2;
    use std::sync::Arc;

    fn setup(kind: LootKind) -> (GameState, EntityId, EntityId) {
        let mut state = GameState::new(1, Arc::new(Tuning::default()));
        let player = state.spawn_player();
        let loot = state.spawn(Entity::loot(Vec2::new(100.0, 100.0), kind, &state.tuning.clone()));
        (state, loot, player)
    }

    #[test]
    fn test_health_loot_heals() {
        let (mut state, loot, player) = setup(LootKind::Health);
        let before = state.entities.get(player).unwrap().health;
        collect(&mut state, loot, player);
        assert_eq!(state.entities.get(player).unwrap().health, before + 200.0);
        assert!(state.entities.get(loot).unwrap().destroyed);
        assert!(state.drain_events().contains(&GameEvent::LootCollected {
            kind: LootKind::Health
        }));
    }

    #[test]
    fn test_score_loot_awards_points() {
        let (mut state, loot, player) = setup(LootKind::Score);
        collect(&mut state, loot, player);
        assert_eq!(state.player_score(), 50);
    }

    #[test]
    fn test_second_stabiliser_refunds_points() {
        let (mut state, loot, player) = setup(LootKind::Stabilisers);
        collect(&mut state, loot, player);
        assert!(state.entities.get(player).unwrap().ship().unwrap().stabilisers);
        assert_eq!(state.player_score(), 0);

        let again = state.spawn(Entity::loot(
            Vec2::ZERO,
            LootKind::Stabilisers,
            &Tuning::default(),
        ));
        collect(&mut state, again, player);
        assert_eq!(state.player_score(), 25);
    }

    #[test]
    fn test_multipliers_apply_to_ship() {
        let (mut state, loot, player) = setup(LootKind::FireRate);
        let before = state.entities.get(player).unwrap().ship().unwrap().shot_cooldown;
        collect(&mut state, loot, player);
        let after = state.entities.get(player).unwrap().ship().unwrap().shot_cooldown;
        assert!((after - before * 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_collected_loot_cannot_be_collected_twice() {
        let (mut state, loot, player) = setup(LootKind::Score);
        collect(&mut state, loot, player);
        collect(&mut state, loot, player);
        assert_eq!(state.player_score(), 50);
    }
}
