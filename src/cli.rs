use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chatsync", about = "Chat list synchronization against a chat service")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load the full chat list and print it
    Chats,
    /// Merge the newest chats into the list and print it
    Latest {
        /// Number of chats to request (default from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Search chats by title
    Search {
        query: String,
        /// Username the search is scoped to (default from config)
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Create a new chat
    Create { title: String },
    /// Apply a JSON file of chat events to the loaded list
    Replay {
        events: PathBuf,
        /// Chat whose messages are printed after the replay
        #[arg(short, long)]
        select: Option<i64>,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chats)
    }
}
