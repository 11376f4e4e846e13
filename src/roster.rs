//! Lookup of the players currently connected to the room.

use serde::Deserialize;

use crate::lenient;

/// Host name recorded when the roster cannot name one.
pub const UNKNOWN_HOST: &str = "Unknown";

/// A connected player as reported by the networking layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_host: bool,
}

/// Source of the current player roster.
pub trait Roster {
    /// Connected players, or `None` if the roster is unavailable.
    fn players(&self) -> Option<Vec<RosterPlayer>>;
}

impl Roster for Vec<RosterPlayer> {
    fn players(&self) -> Option<Vec<RosterPlayer>> {
        Some(self.clone())
    }
}

impl Roster for Option<Vec<RosterPlayer>> {
    fn players(&self) -> Option<Vec<RosterPlayer>> {
        self.clone()
    }
}

/// Name of the first player flagged as host, or [`UNKNOWN_HOST`].
pub fn resolve_host_name<R: Roster + ?Sized>(roster: &R) -> String {
    roster
        .players()
        .and_then(|players| players.into_iter().find(|p| p.is_host))
        .map(|host| host.name)
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}
