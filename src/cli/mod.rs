//! CLI module for gridlink.
//!
//! Subcommands:
//! - `resolve`: Consolidate a batch of fact extractions against reference data
//! - `topics`: List the topic taxonomy
//! - `canonicalize`: Map topic phrases onto the taxonomy

mod resolve;
mod topics;

use clap::{Parser, Subcommand};

pub use resolve::ResolveCommand;

/// gridlink - NFL entity resolution and knowledge consolidation
#[derive(Parser)]
#[command(name = "gridlink")]
#[command(about = "Resolve NFL mentions to canonical records and consolidate fact knowledge")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve mentions and topics for a JSON batch of facts
    Resolve(ResolveCommand),

    /// List topic categories (with keywords in verbose mode)
    Topics,

    /// Print the canonical topic for each phrase
    Canonicalize {
        /// Freeform topic phrases
        #[arg(required = true)]
        phrases: Vec<String>,
    },
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Resolve(cmd) => cmd.run(),
            Command::Topics => self.run_topics(),
            Command::Canonicalize { ref phrases } => self.run_canonicalize(phrases),
        }
    }
}
