use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::roster::{Roster, resolve_host_name};

use super::models::{HistoryDocument, MatchEntry, RankingRecord, StoredHistory};
use super::projection::{MatchView, project};

/// Handle returned by [`MatchHistoryStore::subscribe`].
pub type SubscriptionId = usize;

type Listener = Box<dyn FnMut(&[MatchEntry])>;

/// Durable, newest-first log of completed multiplayer matches.
///
/// Every mutation rewrites the whole backing file and then notifies
/// subscribers with the current entries.
pub struct MatchHistoryStore {
    path: PathBuf,
    entries: Vec<MatchEntry>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl MatchHistoryStore {
    /// Create a store backed by `path` and load whatever is already there.
    ///
    /// A missing or unreadable file is not an error; the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create history directory {}: {}", parent.display(), e);
            }
        }

        let mut store = Self {
            path,
            entries: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        };

        if let Err(e) = store.load() {
            debug!("Starting with empty match history: {:#}", e);
        }

        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory log with the backing file's contents.
    ///
    /// On failure the current log is left untouched and no one is notified.
    pub fn load(&mut self) -> Result<()> {
        let entries = read_history(&self.path)?;
        debug!("Loaded {} match(es) from {}", entries.len(), self.path.display());

        self.entries = entries;
        self.notify();
        Ok(())
    }

    /// Write the whole log to the backing file.
    pub fn save(&self) -> Result<()> {
        let result = write_history(&self.path, &self.entries);
        if let Err(e) = &result {
            warn!("Failed to save match history: {:#}", e);
        }
        result
    }

    /// Record a finished match, stamped with the current local time.
    pub fn add_entry(&mut self, rankings: Vec<RankingRecord>, host_name: &str) -> Result<()> {
        self.add_entry_at(rankings, host_name, Local::now().naive_local())
    }

    /// Record a finished match with an explicit timestamp.
    ///
    /// The entry is kept in memory even if saving fails.
    pub fn add_entry_at(
        &mut self,
        rankings: Vec<RankingRecord>,
        host_name: &str,
        when: NaiveDateTime,
    ) -> Result<()> {
        let entry = MatchEntry::from_rankings(rankings, host_name, when);
        info!(
            "Recording match hosted by {} with {} player(s)",
            entry.host_name(),
            entry.players().len()
        );

        self.entries.insert(0, entry);
        let saved = self.save();
        self.notify();
        saved
    }

    /// Entry point for a race that just ended: the host is looked up in the
    /// roster, falling back to "Unknown".
    pub fn on_results_available<R: Roster + ?Sized>(
        &mut self,
        rankings: Vec<RankingRecord>,
        roster: &R,
    ) -> Result<()> {
        debug!("Race finished, saving results");
        let host_name = resolve_host_name(roster);
        self.add_entry(rankings, &host_name)
    }

    pub fn clear(&mut self) -> Result<()> {
        info!("Clearing match history ({} entries)", self.entries.len());
        self.entries.clear();
        let saved = self.save();
        self.notify();
        saved
    }

    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn projection(&self) -> Vec<MatchView> {
        project(&self.entries)
    }

    /// Register a callback run after every successful load, add or clear.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[MatchEntry]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.entries);
        }
    }
}

fn read_history(path: &Path) -> Result<Vec<MatchEntry>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let root: Value = serde_json::from_str(&data)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    if !root.is_object() {
        bail!("{} does not hold a JSON object", path.display());
    }

    let stored: StoredHistory =
        serde_json::from_value(root).context("Failed to decode match history")?;
    Ok(stored.entries)
}

/// The document goes to a sibling temp file, is synced, and is then renamed
/// over the target, so the target is either the old or the new history.
fn write_history(path: &Path, entries: &[MatchEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(&HistoryDocument { entries })
        .context("Failed to encode match history")?;

    replace_file(path, |file| file.write_all(json.as_bytes()))
}

/// Replace `path` with whatever `write` puts in a fresh temp file. The temp
/// file never outlives a failure.
fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let tmp_path = path.with_extension("json.tmp");

    let written = File::create(&tmp_path).and_then(|mut file| {
        write(&mut file)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to write {}", tmp_path.display()));
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }

    Ok(())
}
