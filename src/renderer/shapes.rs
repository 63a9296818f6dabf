//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{Behavior, Entity, FieldVariant, LootKind, TextStyle};
use crate::{heading, rotate_degrees};

/// Segments used for round bodies
const CIRCLE_SEGMENTS: u32 = 24;
/// Thickness of outlined bodies (asteroids, area effects)
const OUTLINE: f32 = 2.0;

pub fn loot_color(kind: LootKind) -> [f32; 4] {
    match kind {
        LootKind::Health => colors::LOOT_HEALTH,
        LootKind::Speed => colors::LOOT_SPEED,
        LootKind::Score => colors::LOOT_SCORE,
        LootKind::FireRate => colors::LOOT_FIRE,
        LootKind::Rotation => colors::LOOT_ROTATION,
        LootKind::Stabilisers => colors::LOOT_STABILISERS,
        LootKind::Damage => colors::LOOT_DAMAGE,
    }
}

pub fn text_color(style: TextStyle) -> [f32; 4] {
    match style {
        TextStyle::Info => colors::TEXT,
        TextStyle::Split => colors::SPLIT_TEXT,
        TextStyle::AlienDeath => colors::ALIEN,
        TextStyle::PlayerDeath => colors::PLAYER,
        TextStyle::Loot(kind) => loot_color(kind),
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let point = |r: f32, theta: f32| center + Vec2::from_angle(theta) * r;

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = point(inner_radius, theta1);
        let outer1 = point(outer_radius, theta1);
        let inner2 = point(inner_radius, theta2);
        let outer2 = point(outer_radius, theta2);

        // Two triangles per segment
        for p in [inner1, outer1, inner2, inner2, outer1, outer2] {
            vertices.push(Vertex::new(p.x, p.y, color));
        }
    }

    vertices
}

/// Arrowhead hull pointing along the ship's heading
pub fn ship_hull(pos: Vec2, rotation: f32, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let forward = heading(rotation);
    let right = rotate_degrees(forward, -90.0) * (radius / 1.5);
    let nose = pos + forward * radius;
    let left_tail = pos - forward * radius - right;
    let right_tail = pos - forward * radius + right;

    [nose, left_tail, right_tail]
        .into_iter()
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// Tessellate one entity
pub fn entity_vertices(entity: &Entity) -> Vec<Vertex> {
    let (pos, r) = (entity.pos, entity.radius);
    match &entity.behavior {
        Behavior::Player(_) => ship_hull(pos, entity.rotation, r, colors::PLAYER),
        Behavior::Alien(_) => ship_hull(pos, entity.rotation, r, colors::ALIEN),
        Behavior::Asteroid => {
            ring(pos, (r - OUTLINE).max(0.0), r, colors::ASTEROID, CIRCLE_SEGMENTS)
        }
        Behavior::Loot(kind) => circle(pos, r, loot_color(*kind), CIRCLE_SEGMENTS),
        Behavior::Shrapnel { .. } => circle(pos, r, colors::SHRAPNEL, 6),
        Behavior::Projectile(_) => circle(pos, r, colors::SHOT, 8),
        Behavior::AreaEffect(effect) => match effect.variant {
            FieldVariant::Explosion => circle(pos, r, colors::EXPLOSION, CIRCLE_SEGMENTS),
            FieldVariant::BlackHole { .. } => {
                ring(pos, (r - OUTLINE).max(0.0), r, colors::BLACK_HOLE, CIRCLE_SEGMENTS * 2)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, colors::SHOT, 8).len(), 24);
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, colors::SHOT, 8).len(), 48);
    }

    #[test]
    fn test_hull_nose_leads() {
        let hull = ship_hull(Vec2::ZERO, 0.0, 20.0, colors::PLAYER);
        assert_eq!(hull.len(), 3);
        assert!((hull[0].position[1] - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_every_kind_tessellates() {
        let tuning = Tuning::default();
        let bodies = [
            Entity::player(Vec2::ZERO, &tuning),
            Entity::alien(Vec2::ZERO, &tuning),
            Entity::asteroid(Vec2::ZERO, Vec2::ZERO, 40.0, &tuning),
            Entity::loot(Vec2::ZERO, LootKind::Speed, &tuning),
            Entity::shrapnel(Vec2::ZERO, Vec2::ZERO, 2.0, 0.3),
            Entity::explosion(Vec2::ZERO, 7.0, &tuning),
            Entity::black_hole(Vec2::ZERO, Vec2::ZERO, &tuning),
        ];
        for body in &bodies {
            assert!(!entity_vertices(body).is_empty());
            assert_eq!(entity_vertices(body).len() % 3, 0);
        }
    }
}
