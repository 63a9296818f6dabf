//! Error types for the recoverable edges of the game.
//!
//! The simulation itself never fails: numerical edge cases fall back to an
//! arbitrary direction and broken invariants panic. What can go wrong at
//! runtime is loading tuning files and reading/writing the leaderboard.

use std::fmt;

/// Top-level error enum.
#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a file failed.
    Io(std::io::Error),

    /// A JSON document could not be parsed or produced.
    Json(serde_json::Error),

    /// A tuning value is outside the range the simulation can handle.
    InvalidTuning {
        /// Name of the tuning field.
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(err) => write!(f, "io error: {}", err),
            GameError::Json(err) => write!(f, "json error: {}", err),
            GameError::InvalidTuning {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "tuning value '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(err) => Some(err),
            GameError::Json(err) => Some(err),
            GameError::InvalidTuning { .. } => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Io(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Json(err)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tuning_message() {
        let err = GameError::InvalidTuning {
            name: "asteroid_min_radius",
            value: -1.0,
            safe_range: "(0, inf)",
        };
        let msg = err.to_string();
        assert!(msg.contains("asteroid_min_radius"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: GameError = parse.unwrap_err().into();
        assert!(matches!(err, GameError::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
