//! Radial force fields: explosions push, black holes pull and swallow

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::EntityId;
use super::entity::Entity;
use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// One distance band of a force field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Outer edge of the band
    pub radius: f32,
    /// Velocity change per tick; negative pulls inward
    pub strength: f32,
}

impl Band {
    pub const fn new(radius: f32, strength: f32) -> Self {
        Self { radius, strength }
    }
}

/// Three concentric bands, `near.radius < mid.radius < far.radius`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceBands {
    pub near: Band,
    pub mid: Band,
    pub far: Band,
}

impl ForceBands {
    /// Strength felt by a body of `candidate_radius` whose centre is
    /// `distance` from the emitter, or None when out of reach.
    ///
    /// Reach counts the candidate's radius; band choice uses raw distance.
    pub fn strength_at(&self, distance: f32, candidate_radius: f32) -> Option<f32> {
        if distance > self.far.radius + candidate_radius {
            return None;
        }
        let band = if distance <= self.near.radius {
            self.near
        } else if distance <= self.mid.radius {
            self.mid
        } else {
            self.far
        };
        Some(band.strength)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldVariant {
    /// Applies once, then vanishes
    Explosion,
    /// Persistent; regenerates and swallows what strays too close
    BlackHole {
        swallow_buffer: f32,
        regen_below: f32,
        regen_step: f32,
    },
}

/// Payload of an area-effect entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaEffect {
    pub bands: ForceBands,
    pub variant: FieldVariant,
}

impl AreaEffect {
    pub fn explosion(tuning: &Tuning) -> Self {
        Self {
            bands: tuning.explosion_bands,
            variant: FieldVariant::Explosion,
        }
    }

    pub fn black_hole(tuning: &Tuning) -> Self {
        Self {
            bands: tuning.black_hole_bands,
            variant: FieldVariant::BlackHole {
                swallow_buffer: tuning.black_hole_swallow_buffer,
                regen_below: tuning.black_hole_regen_below,
                regen_step: tuning.black_hole_regen_step,
            },
        }
    }

    pub fn is_one_shot(&self) -> bool {
        matches!(self.variant, FieldVariant::Explosion)
    }

    /// Velocity change for a candidate at `target`, or None when out of reach.
    ///
    /// Coincident centres get no push.
    pub fn force_on(&self, origin: Vec2, target: Vec2, target_radius: f32) -> Option<Vec2> {
        let offset = target - origin;
        let strength = self.bands.strength_at(offset.length(), target_radius)?;
        Some(offset.normalize_or_zero() * strength)
    }

    /// Whether a body at `distance` from an emitter of `emitter_radius` is swallowed
    pub fn swallows(&self, emitter_radius: f32, distance: f32) -> bool {
        match self.variant {
            FieldVariant::BlackHole { swallow_buffer, .. } => {
                distance <= emitter_radius + swallow_buffer
            }
            FieldVariant::Explosion => false,
        }
    }
}

/// Per-tick motion and upkeep of an area-effect entity
pub fn update(entity: &mut Entity, dt: f32) {
    let Some(effect) = entity.area_effect().copied() else {
        return;
    };
    if let FieldVariant::BlackHole {
        regen_below,
        regen_step,
        ..
    } = effect.variant
    {
        entity.integrate(dt);
        if entity.health < regen_below {
            entity.health += regen_step;
        }
    }
}

/// Apply one emitter's field to every other live, non-emitter entity
pub fn apply_to_nearby(state: &mut GameState, emitter: EntityId) {
    let Some((origin, radius, effect)) = state
        .entities
        .get(emitter)
        .filter(|e| !e.destroyed)
        .and_then(|e| e.area_effect().map(|effect| (e.pos, e.radius, *effect)))
    else {
        return;
    };

    let candidates: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|(id, e)| *id != emitter && !e.destroyed && !e.is_field_emitter())
        .map(|(id, _)| id)
        .collect();

    for id in candidates {
        let Some(candidate) = state.entities.get_mut(id) else {
            continue;
        };
        if effect.swallows(radius, origin.distance(candidate.pos)) {
            let kind = candidate.kind();
            state.retire(id);
            state.events.push(GameEvent::Swallowed { id, kind });
            continue;
        }
        if let Some(force) = effect.force_on(origin, candidate.pos, candidate.radius) {
            candidate.apply_force(force);
        }
    }

    if effect.is_one_shot() {
        state.retire(emitter);
    }
}

/// Run every live emitter in slot order
pub fn apply_area_effects(state: &mut GameState) {
    let emitters: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|(_, e)| !e.destroyed && e.is_field_emitter())
        .map(|(id, _)| id)
        .collect();
    for id in emitters {
        apply_to_nearby(state, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bands() -> ForceBands {
        ForceBands {
            near: Band::new(10.0, 3.0),
            mid: Band::new(20.0, 2.0),
            far: Band::new(30.0, 1.0),
        }
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let b = bands();
        assert_eq!(b.strength_at(10.0, 0.0), Some(3.0));
        assert_eq!(b.strength_at(10.5, 0.0), Some(2.0));
        assert_eq!(b.strength_at(20.0, 0.0), Some(2.0));
        assert_eq!(b.strength_at(30.0, 0.0), Some(1.0));
        assert_eq!(b.strength_at(30.5, 0.0), None);
    }

    #[test]
    fn test_candidate_radius_extends_reach() {
        let b = bands();
        assert_eq!(b.strength_at(35.0, 5.0), Some(1.0));
        assert_eq!(b.strength_at(35.1, 5.0), None);
    }

    #[test]
    fn test_explosion_pushes_outward() {
        let effect = AreaEffect::explosion(&Tuning::default());
        let force = effect
            .force_on(Vec2::ZERO, Vec2::new(10.0, 0.0), 5.0)
            .unwrap();
        assert!(force.x > 0.0);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_black_hole_pulls_inward() {
        let effect = AreaEffect::black_hole(&Tuning::default());
        let force = effect
            .force_on(Vec2::ZERO, Vec2::new(0.0, 300.0), 5.0)
            .unwrap();
        assert!(force.y < 0.0);
        assert!(effect.swallows(75.0, 90.0));
        assert!(!effect.swallows(75.0, 90.5));
    }

    #[test]
    fn test_coincident_centre_gets_no_push() {
        let effect = AreaEffect::explosion(&Tuning::default());
        assert_eq!(effect.force_on(Vec2::ONE, Vec2::ONE, 1.0), Some(Vec2::ZERO));
    }

    #[test]
    fn test_black_hole_regenerates_when_low() {
        let tuning = Tuning::default();
        let mut hole = Entity::black_hole(Vec2::ZERO, Vec2::new(10.0, 0.0), &tuning);
        hole.health = 100.0;
        update(&mut hole, 0.5);
        assert_eq!(hole.health, 1100.0);
        assert!((hole.pos.x - 5.0).abs() < 1e-5);

        hole.health = 6000.0;
        update(&mut hole, 0.5);
        assert_eq!(hole.health, 6000.0);
    }

    proptest! {
        #[test]
        fn band_strength_never_increases_with_distance(d1 in 0.0f32..40.0, d2 in 0.0f32..40.0) {
            let b = bands();
            let (close, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            if let (Some(s_close), Some(s_far)) =
                (b.strength_at(close, 0.0), b.strength_at(far, 0.0))
            {
                prop_assert!(s_close >= s_far);
            }
        }
    }
}
