//! Circle-circle contact detection and response
//!
//! Everything collidable is a circle, so detection is a single distance
//! test. Response is split into the pure maths (impact damage, elastic
//! bounce with spin) and [`on_collision`], which routes a contacting pair
//! to the right gameplay rule: shot hits, loot pickup or a generic crash.

use glam::Vec2;
use rand::Rng;

use super::arena::EntityId;
use super::cascade;
use super::entity::{Entity, EntityKind};
use super::loot;
use super::projectile;
use super::state::GameState;
use crate::tuning::CollisionPasses;

/// Restitution of a crash bounce (perfectly elastic)
const RESTITUTION: f32 = 1.0;

/// Impulse applied by a bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceResult {
    /// Unit normal from the first body toward the second
    pub normal: Vec2,
    /// Impulse magnitude along the normal
    pub impulse: f32,
}

/// Strict overlap: touching circles do not collide
#[inline]
pub fn detect_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Damage dealt to both parties of a crash, from size-weighted speeds
#[inline]
pub fn impact_damage(a: &Entity, b: &Entity, modifier: f32) -> f32 {
    (a.radius * a.speed() + b.radius * b.speed()) * modifier
}

/// Contact normal from `a` toward `b`, random when the centres coincide
pub fn contact_normal(a: Vec2, b: Vec2, rng: &mut impl Rng) -> Vec2 {
    let delta = b - a;
    let distance = delta.length();
    if distance > f32::EPSILON {
        delta / distance
    } else {
        Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU))
    }
}

/// Elastic bounce using radius as mass, plus spin from the sliding component
///
/// Returns None when the bodies are already separating.
pub fn bounce(
    a: &mut Entity,
    b: &mut Entity,
    spin: f32,
    rng: &mut impl Rng,
) -> Option<BounceResult> {
    let normal = contact_normal(a.pos, b.pos, rng);
    let relative = b.vel - a.vel;
    let closing = relative.dot(normal);
    if closing > 0.0 {
        return None;
    }

    let (mass_a, mass_b) = (a.radius, b.radius);
    let impulse = -(1.0 + RESTITUTION) * closing / (1.0 / mass_a + 1.0 / mass_b);
    a.vel -= normal * (impulse / mass_a);
    b.vel += normal * (impulse / mass_b);

    // Tangential slip at the contact point twists both bodies the same way
    let slip = relative.dot(normal.perp());
    a.apply_torque(slip * spin / mass_a);
    b.apply_torque(slip * spin / mass_b);

    Some(BounceResult { normal, impulse })
}

/// Resolve one contact between `a` and `b`
///
/// Destroyed bodies, non-collidables and field emitters are ignored. Loot
/// only reacts to the player, within an extra pickup buffer. Shots deliver
/// their damage through [`projectile::on_contact`]. Anything else crashes:
/// both take impact damage, anything depleted is destroyed, then the pair
/// bounces apart if `allow_bounce` is set.
pub fn on_collision(state: &mut GameState, a: EntityId, b: EntityId, allow_bounce: bool) {
    let modifier = state.tuning.collision_modifier;
    let spin = state.tuning.collision_spin;
    let pickup_buffer = state.tuning.loot_collection_buffer;

    let Some((ea, eb)) = state.entities.get_pair_mut(a, b) else {
        return;
    };
    if ea.destroyed || eb.destroyed {
        return;
    }
    if !ea.is_collidable()
        || !eb.is_collidable()
        || ea.is_field_emitter()
        || eb.is_field_emitter()
    {
        return;
    }

    let (kind_a, kind_b) = (ea.kind(), eb.kind());
    if kind_a == EntityKind::Loot || kind_b == EntityKind::Loot {
        let reach = ea.radius + eb.radius + pickup_buffer;
        if ea.pos.distance(eb.pos) >= reach {
            return;
        }
        match (kind_a, kind_b) {
            (EntityKind::Loot, EntityKind::Player) => loot::collect(state, a, b),
            (EntityKind::Player, EntityKind::Loot) => loot::collect(state, b, a),
            _ => {}
        }
        return;
    }

    if !ea.detect_collision(eb) {
        return;
    }
    if kind_b == EntityKind::Projectile {
        projectile::on_contact(state, b, a);
        return;
    }
    if kind_a == EntityKind::Projectile {
        projectile::on_contact(state, a, b);
        return;
    }

    let damage = impact_damage(ea, eb, modifier);
    ea.damage(damage);
    eb.damage(damage);
    let (a_depleted, b_depleted) = (ea.is_depleted(), eb.is_depleted());
    let (radius_a, radius_b) = (ea.radius, eb.radius);

    if a_depleted {
        cascade::destroy(state, a, radius_a);
    }
    if b_depleted {
        cascade::destroy(state, b, radius_b);
    }

    // Only survivors bounce; a destroyed body takes no further physics
    if allow_bounce
        && !a_depleted
        && !b_depleted
        && let Some((ea, eb)) = state.entities.get_pair_mut(a, b)
    {
        bounce(ea, eb, spin, &mut state.rng);
    }
}

/// Visit every unordered pair of live collidables once, in slot order
pub fn resolve_collisions(state: &mut GameState) {
    let ids: Vec<EntityId> = state
        .entities
        .iter()
        .filter(|(_, e)| !e.destroyed && e.is_collidable())
        .map(|(id, _)| id)
        .collect();
    let passes = state.tuning.collision_passes;

    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            on_collision(state, a, b, true);
            if passes == CollisionPasses::BothOrderings {
                on_collision(state, b, a, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Behavior;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock(pos: Vec2, vel: Vec2, radius: f32) -> Entity {
        Entity::new(pos, radius, Behavior::Asteroid).with_velocity(vel)
    }

    #[test]
    fn test_head_on_equal_masses_swap_velocities() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut a = rock(Vec2::ZERO, Vec2::new(10.0, 0.0), 10.0);
        let mut b = rock(Vec2::new(15.0, 0.0), Vec2::new(-10.0, 0.0), 10.0);

        let result = bounce(&mut a, &mut b, 0.0, &mut rng).unwrap();
        assert!((result.normal - Vec2::X).length() < 1e-6);
        assert!((a.vel.x + 10.0).abs() < 1e-4);
        assert!((b.vel.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_separating_pair_is_left_alone() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut a = rock(Vec2::ZERO, Vec2::new(-5.0, 0.0), 10.0);
        let mut b = rock(Vec2::new(15.0, 0.0), Vec2::new(5.0, 0.0), 10.0);

        assert!(bounce(&mut a, &mut b, 0.2, &mut rng).is_none());
        assert_eq!(a.vel, Vec2::new(-5.0, 0.0));
        assert_eq!(b.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_glancing_contact_adds_spin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut a = rock(Vec2::ZERO, Vec2::new(10.0, 0.0), 10.0);
        let mut b = rock(Vec2::new(15.0, 0.0), Vec2::new(-10.0, 20.0), 10.0);

        bounce(&mut a, &mut b, 0.2, &mut rng).unwrap();
        assert!(a.angular_velocity != 0.0);
        assert_eq!(a.angular_velocity, b.angular_velocity);
    }

    #[test]
    fn test_coincident_centres_still_resolve() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut a = rock(Vec2::ZERO, Vec2::ZERO, 10.0);
        let mut b = rock(Vec2::ZERO, Vec2::ZERO, 10.0);
        let result = bounce(&mut a, &mut b, 0.2, &mut rng).unwrap();
        assert!((result.normal.length() - 1.0).abs() < 1e-5);
        assert!(a.vel.is_finite() && b.vel.is_finite());
    }

    #[test]
    fn test_fatal_crash_does_not_bounce_the_survivor() {
        use crate::tuning::Tuning;
        use std::sync::Arc;

        let mut state = GameState::new(9, Arc::new(Tuning::default()));
        let player = state.spawn_player();
        let centre = state.screen_centre();
        let tuning = state.tuning.clone();
        let rock = state.spawn(Entity::asteroid(
            centre - Vec2::new(70.0, 0.0),
            Vec2::new(400.0, 0.0),
            60.0,
            &tuning,
        ));

        on_collision(&mut state, rock, player, true);

        let dead = state.entities.get(player).unwrap();
        assert!(dead.destroyed);
        assert_eq!(dead.vel, Vec2::ZERO);
        let survivor = state.entities.get(rock).unwrap();
        assert!(!survivor.destroyed);
        assert_eq!(survivor.vel, Vec2::new(400.0, 0.0));
    }

    #[test]
    fn test_impact_damage_weights_by_radius() {
        let a = rock(Vec2::ZERO, Vec2::new(100.0, 0.0), 60.0);
        let b = rock(Vec2::ZERO, Vec2::ZERO, 20.0);
        assert!((impact_damage(&a, &b, 0.002) - 12.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn bounce_conserves_momentum_and_energy(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            ra in 1.0f32..60.0, rb in 1.0f32..60.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let mut rng = Pcg32::seed_from_u64(7);
            let offset = Vec2::from_angle(angle) * (ra + rb) * 0.9;
            let mut a = rock(Vec2::ZERO, Vec2::new(ax, ay), ra);
            let mut b = rock(offset, Vec2::new(bx, by), rb);

            let momentum = a.vel * ra + b.vel * rb;
            let energy = a.vel.length_squared() * ra + b.vel.length_squared() * rb;
            bounce(&mut a, &mut b, 0.0, &mut rng);

            let momentum_after = a.vel * ra + b.vel * rb;
            let energy_after = a.vel.length_squared() * ra + b.vel.length_squared() * rb;
            prop_assert!((momentum - momentum_after).length() < 1e-2 * (1.0 + momentum.length()));
            prop_assert!((energy - energy_after).abs() < 1e-2 * (1.0 + energy));
        }
    }
}
