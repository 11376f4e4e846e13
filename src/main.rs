use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;

use race_history::{
    args::{Args, Command},
    history::{HISTORY_FILE_NAME, MatchHistoryStore, RankingRecord, get_history_dir},
    logging::init_logging,
    roster::RosterPlayer,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => get_history_dir()?,
    };
    let _log_guard = match init_logging(&data_dir.join("logs")) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e:#}");
            None
        }
    };

    let mut store = MatchHistoryStore::open(data_dir.join(HISTORY_FILE_NAME));

    match args.command {
        Command::List => {
            let json = serde_json::to_string_pretty(&store.projection())?;
            println!("{json}");
        }
        Command::Count => println!("{}", store.entry_count()),
        Command::Clear => {
            store.clear()?;
            println!("history cleared");
        }
        Command::Add { rankings, host } => {
            let rankings = read_rankings(&rankings)?;
            store.add_entry(rankings, &host)?;
            println!("recorded match hosted by {host} ({} total)", store.entry_count());
        }
        Command::Finish { rankings, roster } => {
            let rankings = read_rankings(&rankings)?;
            let roster = roster.as_deref().map(read_roster).transpose()?;
            store.on_results_available(rankings, &roster)?;
            if let Some(entry) = store.entries().first() {
                println!(
                    "recorded match hosted by {} ({} total)",
                    entry.host_name(),
                    store.entry_count()
                );
            }
        }
    }

    Ok(())
}

fn read_rankings(path: &Path) -> Result<Vec<RankingRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rankings from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of ranking records", path.display()))
}

fn read_roster(path: &Path) -> Result<Vec<RosterPlayer>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of players", path.display()))
}
