use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "race-history", about = "Inspect and record multiplayer race history")]
pub struct Args {
    /// Directory holding multiplayer_history.json (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the history, newest first, as JSON
    List,

    /// Print the number of recorded matches
    Count,

    /// Delete every recorded match
    Clear,

    /// Record a match from a ranking file with an explicit host
    Add {
        /// JSON array of ranking records
        #[arg(long, value_name = "FILE")]
        rankings: PathBuf,

        #[arg(long)]
        host: String,
    },

    /// Record a finished race, resolving the host from a roster file
    Finish {
        /// JSON array of ranking records
        #[arg(long, value_name = "FILE")]
        rankings: PathBuf,

        /// JSON array of connected players; omit when no roster is available
        #[arg(long, value_name = "FILE")]
        roster: Option<PathBuf>,
    },
}
