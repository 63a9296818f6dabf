//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Raw bytes of a vertex slice, ready for upload to a GPU buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Build an opaque color from 0-255 channels
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = rgb(234, 0, 0);
    pub const ALIEN: [f32; 4] = rgb(50, 190, 50);
    pub const ASTEROID: [f32; 4] = rgb(150, 150, 150);
    pub const SHOT: [f32; 4] = rgb(255, 255, 255);
    pub const SHRAPNEL: [f32; 4] = rgb(255, 140, 40);
    pub const EXPLOSION: [f32; 4] = rgb(189, 12, 16);
    pub const BLACK_HOLE: [f32; 4] = rgb(150, 120, 160);
    pub const TEXT: [f32; 4] = rgb(250, 200, 100);
    pub const SPLIT_TEXT: [f32; 4] = rgb(255, 0, 150);

    pub const LOOT_HEALTH: [f32; 4] = rgb(0, 255, 0);
    pub const LOOT_SPEED: [f32; 4] = rgb(0, 0, 255);
    pub const LOOT_SCORE: [f32; 4] = rgb(255, 255, 0);
    pub const LOOT_FIRE: [f32; 4] = rgb(255, 0, 255);
    pub const LOOT_ROTATION: [f32; 4] = rgb(0, 50, 200);
    pub const LOOT_STABILISERS: [f32; 4] = rgb(99, 50, 15);
    pub const LOOT_DAMAGE: [f32; 4] = rgb(255, 0, 75);
}
