//! Presentation-shaped view of the history log.

use serde::Serialize;

use super::models::{MatchEntry, PlayerResult};

/// A player row as shown in the history list. The player's uuid is
/// storage-only and not part of the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub name: String,
    pub wpm: u32,
    pub accuracy: f64,
    pub errors: u32,
    pub duration: f64,
    pub position: u32,
    pub is_local: bool,
    pub has_left: bool,
}

impl From<&PlayerResult> for PlayerView {
    fn from(player: &PlayerResult) -> Self {
        Self {
            name: player.name.clone(),
            wpm: player.wpm,
            accuracy: player.accuracy,
            errors: player.errors,
            duration: player.duration,
            position: player.position,
            is_local: player.is_local,
            has_left: player.has_left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub timestamp: String,
    pub host_name: String,
    pub local_wpm: u32,
    pub local_rank: u32,
    pub players: Vec<PlayerView>,
}

impl From<&MatchEntry> for MatchView {
    fn from(entry: &MatchEntry) -> Self {
        Self {
            timestamp: entry.timestamp().to_string(),
            host_name: entry.host_name().to_string(),
            local_wpm: entry.local_wpm(),
            local_rank: entry.local_rank(),
            players: entry.players().iter().map(PlayerView::from).collect(),
        }
    }
}

/// Project a whole log, preserving its order.
pub fn project(entries: &[MatchEntry]) -> Vec<MatchView> {
    entries.iter().map(MatchView::from).collect()
}
