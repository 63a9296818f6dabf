//! CPU-side rendering boundary
//!
//! The simulation never draws. Each frame the outer loop hands a [`Surface`]
//! to [`draw_state`], which tessellates every live entity into colored
//! triangles and forwards floating texts. A window or GPU backend only has
//! to implement the two `Surface` methods.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::highscores::format_time;
use crate::sim::{GamePhase, GameState};
pub use vertex::{Vertex, colors};

/// Anything that can show triangles and text
pub trait Surface {
    /// Draw a triangle list (three vertices per triangle)
    fn fill_triangles(&mut self, vertices: &[Vertex]);
    /// Draw a line of text centred on `pos`
    fn text(&mut self, pos: Vec2, text: &str, color: [f32; 4]);
}

/// Line spacing for multi-line floating text
const LINE_SPACING: f32 = 30.0;

/// Draw the whole world plus the HUD
pub fn draw_state(state: &GameState, surface: &mut impl Surface) {
    let mut vertices = Vec::new();
    for (_, entity) in state.entities.iter() {
        if !entity.destroyed {
            vertices.extend(shapes::entity_vertices(entity));
        }
    }
    surface.fill_triangles(&vertices);

    for text in &state.texts {
        let color = shapes::text_color(text.style);
        for (i, line) in text.lines().enumerate() {
            let pos = text.pos + Vec2::new(0.0, i as f32 * LINE_SPACING);
            surface.text(pos, line, color);
        }
    }

    let hud = format!(
        "Score: {}  Time: {}",
        state.player_score(),
        format_time(state.elapsed)
    );
    surface.text(Vec2::new(150.0, 40.0), &hud, colors::TEXT);
    if let Some(player) = state.player_entity() {
        let health = format!("Health: {:.0}", player.health.max(0.0));
        surface.text(Vec2::new(150.0, 80.0), &health, colors::TEXT);
    }

    let banner = match state.phase {
        GamePhase::Paused => Some("PAUSED"),
        GamePhase::GameOver => Some("GAME OVER"),
        GamePhase::Playing => None,
    };
    if let Some(banner) = banner {
        surface.text(state.screen_centre(), banner, colors::TEXT);
    }
}

/// Surface that records everything drawn; used by headless runs
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub vertices: Vec<Vertex>,
    pub texts: Vec<(Vec2, String)>,
}

impl Surface for FrameRecorder {
    fn fill_triangles(&mut self, vertices: &[Vertex]) {
        self.vertices.extend_from_slice(vertices);
    }

    fn text(&mut self, pos: Vec2, text: &str, _color: [f32; 4]) {
        self.texts.push((pos, text.to_string()));
    }
}
