//! Save manager for handling save/load operations
//!
//! One named slot (`save.json`) in a save directory created on demand.
//! Writes are whole-file; the previous save is rotated to a timestamped
//! backup before being overwritten, and old backups are pruned.

use super::types::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const SAVE_FILENAME: &str = "save.json";
const BACKUP_PREFIX: &str = "save_";
const BACKUPS_TO_KEEP: usize = 3;

pub struct SaveManager {
    save_directory: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
        })
    }

    fn save_path(&self) -> PathBuf {
        self.save_directory.join(SAVE_FILENAME)
    }

    /// Writes the snapshot to the save slot.
    ///
    /// An existing save is rotated to a backup first, so a failed write never
    /// destroys the previous save.
    pub fn save_game(&self, state: &GameStateData) -> Result<PathBuf, SaveError> {
        let filepath = self.save_path();

        if filepath.exists() {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let backup = self
                .save_directory
                .join(format!("{}{}.bak.json", BACKUP_PREFIX, stamp));
            fs::rename(&filepath, &backup)?;
            self.cleanup_backups(BACKUPS_TO_KEEP)?;
        }

        let save_file = SaveFile {
            version: CURRENT_SAVE_VERSION,
            timestamp: SystemTime::now(),
            state: state.clone(),
        };

        // Pretty JSON for readability/debugging
        let json = serde_json::to_string_pretty(&save_file)?;
        fs::write(&filepath, json)?;

        Ok(filepath)
    }

    /// Loads the save slot.
    ///
    /// An absent slot is `NotFound`; a present but empty or undeserializable
    /// slot is `Corrupted`; callers report the two differently.
    pub fn load_game(&self) -> Result<SaveFile, SaveError> {
        let filepath = self.save_path();

        if !filepath.exists() {
            return Err(SaveError::NotFound);
        }

        let json = fs::read_to_string(&filepath)?;
        if json.trim().is_empty() {
            return Err(SaveError::Corrupted("save file is empty".to_string()));
        }

        let save_file: SaveFile = serde_json::from_str(&json)
            .map_err(|e| SaveError::Corrupted(format!("unreadable save file: {}", e)))?;

        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }

        Ok(save_file)
    }

    /// Check if the save slot exists.
    #[allow(dead_code)] // Menu code reports NotFound from load_game instead
    pub fn save_exists(&self) -> bool {
        self.save_path().exists()
    }

    /// Delete old backups, keeping only the N most recent.
    fn cleanup_backups(&self, keep_count: usize) -> Result<(), SaveError> {
        let mut backups: Vec<_> = fs::read_dir(&self.save_directory)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|s| s.starts_with(BACKUP_PREFIX) && s.ends_with(".bak.json"))
                    .unwrap_or(false)
            })
            .collect();

        // Newest first; the stamp format sorts lexicographically
        backups.sort_by_key(|entry| std::cmp::Reverse(entry.file_name()));

        for entry in backups.iter().skip(keep_count) {
            fs::remove_file(entry.path())?;
        }

        Ok(())
    }
}
