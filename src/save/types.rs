//! Save data types
//!
//! The serializable projection of a gameplay session, plus the error taxonomy
//! for the persistence layer. Serde/JSON keep the on-disk format readable.

use crate::ship::ShipTint;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Current save file version.
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// Which ruleset the saved session was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Regular,
    TimeTrial,
}

/// The root save file structure: a versioned envelope around the snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub timestamp: SystemTime,
    pub state: GameStateData,
}

/// Snapshot of a live session, sufficient to rebuild an equivalent one.
///
/// The ship contributes only its tint; its physical state is excluded on
/// purpose and a restored session respawns it at the default spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateData {
    /// Entries may be null; loaders skip missing entries defensively.
    pub asteroids: Vec<Option<AsteroidData>>,
    pub play_time: f32,
    #[serde(default)]
    pub remaining_time: f32,
    #[serde(default)]
    pub ship_color: ShipTint,
    #[serde(default)]
    pub game_mode: GameMode,
    #[serde(default)]
    pub current_level: u32,
    #[serde(default)]
    pub total_destroyed: u32,
}

/// Per-asteroid snapshot entry.
///
/// Zero-sized screen bounds mean "no wrap area configured"; drift fields
/// default to inert when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidData {
    pub position_x: f32,
    pub position_y: f32,
    pub angular_velocity: f32,
    pub destroyed: bool,
    #[serde(default)]
    pub velocity_x: f32,
    #[serde(default)]
    pub velocity_y: f32,
    #[serde(default)]
    pub drifting: bool,
    #[serde(default)]
    pub screen_width: f32,
    #[serde(default)]
    pub screen_height: f32,
}

/// Error types for save/load operations.
///
/// `NotFound` (no save slot) and `Corrupted` (slot present but unreadable)
/// are deliberately distinct: the shell reports them differently and neither
/// may touch the running session.
#[derive(Debug)]
pub enum SaveError {
    NotFound,
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    Corrupted(String),
    InvalidVersion(u32),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::NotFound => write!(f, "no saved game found"),
            SaveError::IoError(e) => write!(f, "IO error: {}", e),
            SaveError::SerializationError(e) => write!(f, "serialization error: {}", e),
            SaveError::Corrupted(msg) => write!(f, "corrupted save data: {}", msg),
            SaveError::InvalidVersion(v) => write!(f, "unsupported save version: {}", v),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::IoError(err)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::SerializationError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asteroid_data_drift_fields_default() {
        // Older saves without drift fields still deserialize, inert
        let json = r#"{
            "position_x": 10.0,
            "position_y": 20.0,
            "angular_velocity": 0.5,
            "destroyed": false
        }"#;

        let data: AsteroidData = serde_json::from_str(json).unwrap();
        assert!(!data.drifting);
        assert_eq!(data.velocity_x, 0.0);
        assert_eq!(data.screen_width, 0.0);
    }

    #[test]
    fn test_state_null_asteroid_entries_deserialize() {
        let json = r#"{
            "asteroids": [
                null,
                {
                    "position_x": 1.0,
                    "position_y": 2.0,
                    "angular_velocity": 0.1,
                    "destroyed": true
                }
            ],
            "play_time": 12.5
        }"#;

        let state: GameStateData = serde_json::from_str(json).unwrap();
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids[0].is_none());
        assert!(state.asteroids[1].as_ref().unwrap().destroyed);
        assert_eq!(state.game_mode, GameMode::Regular);
        assert_eq!(state.ship_color, ShipTint::WHITE);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = GameStateData {
            asteroids: vec![Some(AsteroidData {
                position_x: 5.0,
                position_y: 6.0,
                angular_velocity: 0.7,
                destroyed: false,
                velocity_x: 33.0,
                velocity_y: -12.0,
                drifting: true,
                screen_width: 1280.0,
                screen_height: 720.0,
            })],
            play_time: 42.0,
            remaining_time: 18.0,
            ship_color: ShipTint::new(220, 40, 60),
            game_mode: GameMode::TimeTrial,
            current_level: 3,
            total_destroyed: 27,
        };

        let json = serde_json::to_string(&state).unwrap();
        let back: GameStateData = serde_json::from_str(&json).unwrap();

        assert_eq!(back.asteroids, state.asteroids);
        assert_eq!(back.play_time, state.play_time);
        assert_eq!(back.remaining_time, state.remaining_time);
        assert_eq!(back.ship_color, state.ship_color);
        assert_eq!(back.game_mode, state.game_mode);
        assert_eq!(back.current_level, state.current_level);
        assert_eq!(back.total_destroyed, state.total_destroyed);
    }
}
