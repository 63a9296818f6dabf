//! Shatterfield headless runner
//!
//! Flies an autopilot through a seeded field using the same fixed-step loop
//! a windowed front end would use, then records the run on the leaderboard.
//!
//! Usage: `shatterfield [seconds] [seed] [tuning.json]`

use std::sync::Arc;

use shatterfield::consts::{MAX_SUBSTEPS, SIM_DT};
use shatterfield::highscores::format_time;
use shatterfield::renderer::{FrameRecorder, draw_state};
use shatterfield::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use shatterfield::{HighScores, Tuning};

const HIGH_SCORE_FILE: &str = "shatterfield_scores.json";

/// Game instance holding all state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(seed: u64, tuning: Arc<Tuning>) -> Self {
        Self {
            state: GameState::new_game(seed, tuning),
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;
            self.input.respawn = false;
        }
    }
}

/// Spin, shoot and thrust in bursts
fn autopilot(frame: u64) -> TickInput {
    TickInput {
        thrust: if frame % 120 < 20 { 1.0 } else { 0.0 },
        turn: if (frame / 240) % 2 == 0 { 0.4 } else { -0.4 },
        fire: true,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seconds: f32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(60.0);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);
    let tuning = match args.get(3) {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("Failed to load tuning from {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Shatterfield starting (seed {}, {}s)", seed, seconds);
    let mut game = Game::new(seed, Arc::new(tuning));

    // Uneven frame pacing, like a real display
    let frame_times = [1.0 / 60.0, 1.0 / 50.0, 1.0 / 144.0, 1.0 / 30.0];
    let mut wall_clock = 0.0;
    let mut frame = 0u64;
    while wall_clock < seconds && game.state.phase != GamePhase::GameOver {
        game.input = autopilot(frame);
        let dt = frame_times[(frame % frame_times.len() as u64) as usize];
        game.update(dt);
        wall_clock += dt;
        frame += 1;

        for event in game.state.drain_events() {
            match event {
                GameEvent::ScoreAwarded { points, .. } => log::debug!("+{} points", points),
                GameEvent::LootCollected { kind } => log::info!("Picked up {:?}", kind),
                GameEvent::PlayerDied => log::info!("Player died"),
                _ => {}
            }
        }
    }

    let mut recorder = FrameRecorder::default();
    draw_state(&game.state, &mut recorder);
    log::info!(
        "Final frame: {} entities, {} vertices, {} text lines",
        game.state.entities.len(),
        recorder.vertices.len(),
        recorder.texts.len()
    );

    let score = game.state.player_score();
    let survived = game.state.elapsed;
    println!("Score {} after {}", score, format_time(survived));

    let mut scores = HighScores::load_or_default(HIGH_SCORE_FILE);
    if let Some(rank) = scores.add_score("autopilot", score, survived) {
        match scores.save(HIGH_SCORE_FILE) {
            Ok(()) => println!("New high score! Rank #{}", rank),
            Err(err) => log::warn!("Could not save high scores: {}", err),
        }
    }
}
