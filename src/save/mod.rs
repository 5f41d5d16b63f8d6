//! Save system
//!
//! A single-slot JSON persistence layer: `types` defines the snapshot schema
//! and error taxonomy, `manager` owns the files on disk. Building a snapshot
//! from a live session (and back) lives with the session itself.

pub mod manager;
pub mod types;

pub use manager::SaveManager;
pub use types::{AsteroidData, GameMode, GameStateData, SaveError, SaveFile};
