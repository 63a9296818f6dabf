//! Floating text messages and the phrase tables they draw from

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::loot::LootKind;

/// Shouted by aliens as they blow up
pub const ALIEN_SCREAMS: &[&str] = &[
    "Ouch! Right in the thrusters!",
    "Boom! There goes my day!",
    "Eject? Into what? More rocks?!",
    "Should've stayed in bed!",
    "Can't catch a break, huh?!",
    "Shields? What shields?!",
    "This'll look great on my resume!",
    "Blame the navigator!",
    "Deja vu... oh wait, I died before!",
    "Tell the fleet... meh, nevermind!",
    "What a way to end the day!",
    "Perfect! What a last thought!",
    "Shouldn't have skipped flight school!",
    "At least I dodged my bar tab!",
];

/// Shown when a new game begins
pub const START_MESSAGES: &[&str] = &[
    "More rocks? Yay.",
    "Asteroids? How fun.",
    "Let's dust some rocks.",
    "Aliens are watching... cool.",
    "Rocks again. Thrilling.",
    "Prepare to mildly annoy rocks.",
    "Smash rocks... joy.",
    "Big rocks. Small brains!",
    "Beware of the Black Hole!",
    "Miss shots? Let's go!",
    "Another day, more rocks.",
    "Aliens bet against us. Classic.",
];

pub const PLAYER_DEATH_SCREAMS: &[&str] = &[
    "ARGHHH!",
    "No! No! No!  NOOOOOOOOO!!!",
    "NO!",
    "We're crashing!",
    "Eject!",
    "Beam me out!",
];

/// Comic-book exclamations for asteroid splits
pub const SPLIT_EXCLAMATIONS: &[&str] = &[
    "CRASH!", "BLAM!", "BANG!", "BOOMSHAK!", "THWACK!", "SMASH!", "THOOM!", "ZAP!", "BLAST!",
    "KA-BLAST!", "KABLAM!", "WHOOSH!", "CRACK!", "THUD!", "WHAM!",
];

/// Pick a random phrase from a table
pub fn pick(rng: &mut impl Rng, table: &'static [&'static str]) -> &'static str {
    table.choose(rng).copied().unwrap_or_default()
}

/// What a message is about, so the renderer can colour it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Info,
    Split,
    AlienDeath,
    PlayerDeath,
    Loot(LootKind),
}

/// A message pinned to a world position for a limited time
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub pos: Vec2,
    pub message: String,
    pub style: TextStyle,
    /// Seconds left on screen
    pub remaining: f32,
}

impl FloatingText {
    pub fn new(pos: Vec2, message: impl Into<String>, style: TextStyle, duration: f32) -> Self {
        Self {
            pos,
            message: message.into(),
            style,
            remaining: duration,
        }
    }

    /// Count down; true once the message should disappear
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    /// Multi-line messages split on `\n`
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.split('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_text_expires() {
        let mut text = FloatingText::new(Vec2::ZERO, "BANG!", TextStyle::Split, 0.5);
        assert!(!text.update(0.25));
        assert!(text.update(0.25));
    }

    #[test]
    fn test_pick_comes_from_table() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..20 {
            assert!(SPLIT_EXCLAMATIONS.contains(&pick(&mut rng, SPLIT_EXCLAMATIONS)));
        }
    }

    #[test]
    fn test_lines_split() {
        let text = FloatingText::new(Vec2::ZERO, "one\ntwo", TextStyle::Info, 1.0);
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["one", "two"]);
    }
}
