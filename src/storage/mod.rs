//!  Storage is organized through [json_storage::JsonFileStorage].
//!  The basic idea is:
//!   - Every tracker owns one JSON file inside the application directory.
//!   - A file is read completely on start and rewritten completely on every change.
//!   - A missing file means the tracker has no data yet.

pub mod json_storage;
pub mod persisted;

use std::path::PathBuf;

pub const WORKOUTS_FILE: &str = "workouts.json";
pub const FITNESS_CHALLENGES_FILE: &str = "fitness_challenges.json";
pub const CHALLENGE_FILE: &str = "challenge.json";
pub const GOALS_FILE: &str = "goals.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// Locations of every tracker file inside the application directory.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn storage(&self, file_name: &str) -> json_storage::JsonFileStorage {
        json_storage::JsonFileStorage::new(self.root.join(file_name))
    }
}
