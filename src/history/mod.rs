mod models;
mod projection;
mod store;

pub use models::{MatchEntry, PlayerResult, RankingRecord, TIMESTAMP_FORMAT};
pub use projection::{MatchView, PlayerView, project};
pub use store::{MatchHistoryStore, SubscriptionId};

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const HISTORY_FILE_NAME: &str = "multiplayer_history.json";

const ORGANIZATION: &str = "RapidTexter";
const APPLICATION: &str = "RapidTexter";

/// Get the per-user application data directory, creating it if needed.
pub fn get_history_dir() -> Result<PathBuf> {
    let mut path = dirs::data_dir()
        .context("Unable to determine data directory for your platform")?;

    path.push(ORGANIZATION);
    path.push(APPLICATION);

    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    Ok(path)
}

/// Get the path to the match history file in the platform data directory.
pub fn get_history_path() -> Result<PathBuf> {
    Ok(get_history_dir()?.join(HISTORY_FILE_NAME))
}
