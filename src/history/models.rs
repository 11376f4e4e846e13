use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Format of [`MatchEntry::timestamp`], e.g. `19/10/2026 21:04:55`.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One player's outcome in a single match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub uuid: String,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub wpm: u32,
    #[serde(default, deserialize_with = "lenient::float")]
    pub accuracy: f64,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub errors: u32,
    /// Seconds.
    #[serde(default, deserialize_with = "lenient::float")]
    pub duration: f64,
    /// 1-based rank.
    #[serde(default, deserialize_with = "lenient::uint")]
    pub position: u32,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_local: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_left: bool,
}

/// Ranking payload produced by the gameplay layer when a race ends.
///
/// Same fields as [`PlayerResult`], except the player identifier arrives
/// under the key `id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::uint_rounded")]
    pub wpm: u32,
    #[serde(default, deserialize_with = "lenient::float")]
    pub accuracy: f64,
    #[serde(default, deserialize_with = "lenient::uint_rounded")]
    pub errors: u32,
    #[serde(default, deserialize_with = "lenient::float")]
    pub duration: f64,
    #[serde(default, deserialize_with = "lenient::uint_rounded")]
    pub position: u32,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_local: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_left: bool,
}

impl From<RankingRecord> for PlayerResult {
    fn from(record: RankingRecord) -> Self {
        Self {
            name: record.name,
            uuid: record.id,
            wpm: record.wpm,
            accuracy: record.accuracy,
            errors: record.errors,
            duration: record.duration,
            position: record.position,
            is_local: record.is_local,
            has_left: record.has_left,
        }
    }
}

/// One completed match.
///
/// `local_wpm` and `local_rank` are derived from the player list and are not
/// written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredEntry")]
pub struct MatchEntry {
    timestamp: String,
    host_name: String,
    players: Vec<PlayerResult>,
    #[serde(skip)]
    local_wpm: u32,
    #[serde(skip)]
    local_rank: u32,
}

impl MatchEntry {
    pub fn new(timestamp: String, host_name: String, players: Vec<PlayerResult>) -> Self {
        // Last local player wins if several are flagged
        let (local_wpm, local_rank) = players
            .iter()
            .rev()
            .find(|p| p.is_local)
            .map(|p| (p.wpm, p.position))
            .unwrap_or((0, 0));

        Self {
            timestamp,
            host_name,
            players,
            local_wpm,
            local_rank,
        }
    }

    /// Build an entry from a race's ranking payload, stamped with `when`.
    pub fn from_rankings(
        rankings: Vec<RankingRecord>,
        host_name: &str,
        when: NaiveDateTime,
    ) -> Self {
        let players = rankings.into_iter().map(PlayerResult::from).collect();
        Self::new(
            when.format(TIMESTAMP_FORMAT).to_string(),
            host_name.to_string(),
            players,
        )
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn players(&self) -> &[PlayerResult] {
        &self.players
    }

    pub fn local_wpm(&self) -> u32 {
        self.local_wpm
    }

    pub fn local_rank(&self) -> u32 {
        self.local_rank
    }
}

/// On-disk shape of an entry, before derived stats are filled in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    timestamp: String,
    #[serde(default, deserialize_with = "lenient::string")]
    host_name: String,
    #[serde(default, deserialize_with = "lenient::records")]
    players: Vec<PlayerResult>,
}

impl From<StoredEntry> for MatchEntry {
    fn from(stored: StoredEntry) -> Self {
        Self::new(stored.timestamp, stored.host_name, stored.players)
    }
}

/// Root of `multiplayer_history.json`, as written.
#[derive(Serialize)]
pub(super) struct HistoryDocument<'a> {
    pub entries: &'a [MatchEntry],
}

/// Root of `multiplayer_history.json`, as read.
#[derive(Deserialize)]
pub(super) struct StoredHistory {
    #[serde(default, deserialize_with = "lenient::records")]
    pub entries: Vec<MatchEntry>,
}
