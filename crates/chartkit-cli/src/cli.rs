//! CLI argument definitions for chartkit.

use chartkit::{ControlScheme, NoteType};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chartkit")]
#[command(about = "Rhythm game chart file tool", version)]
pub struct Args {
    /// Settings file (TOML)
    #[arg(long, value_name = "FILE", env = "CHARTKIT_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty track file
    New {
        /// Output file path
        output: String,
        /// Track title
        #[arg(long)]
        title: String,
        /// Track artist
        #[arg(long)]
        artist: String,
        /// Add an empty pattern with this name
        #[arg(long)]
        pattern: Option<String>,
        /// Control scheme of the added pattern
        #[arg(long, default_value = "Touch")]
        scheme: ControlScheme,
        /// Level of the added pattern
        #[arg(long, default_value = "1")]
        level: u32,
    },
    /// Show track metadata and pattern statistics
    Info {
        /// Track file path
        file: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a track file and report hold overlaps
    Check {
        /// Track file path
        file: String,
    },
    /// Copy a track into a new file
    Clone {
        /// Source track file
        input: String,
        /// Destination track file
        output: String,
        /// Replace the title of the copy
        #[arg(long)]
        title: Option<String>,
    },
    /// Place a note in a pattern
    AddNote {
        /// Track file path
        file: String,
        /// Pattern name
        #[arg(long)]
        pattern: String,
        #[arg(long)]
        lane: u32,
        #[arg(long)]
        pulse: u32,
        /// Note type (e.g., Basic, HoldStart, ChainHead)
        #[arg(long = "type", default_value = "Basic")]
        note_type: NoteType,
        /// Sound channel name
        #[arg(long, default_value = "")]
        sound: String,
    },
    /// Remove the note at a cell, if any
    DeleteNote {
        /// Track file path
        file: String,
        /// Pattern name
        #[arg(long)]
        pattern: String,
        #[arg(long)]
        lane: u32,
        #[arg(long)]
        pulse: u32,
    },
}
