//! # chartkit
//!
//! Chart document model for a lane-based rhythm game editor.
//!
//! This crate provides:
//! - Track, pattern and note data structures
//! - A pulse-addressed index for fast note lookup inside a pattern
//! - Chain, hold and repeat linking between notes
//! - Versioned JSON load, save and deep copy of tracks
//!
//! The model is single-threaded and synchronous. Loading and saving block on
//! file I/O; callers that need a responsive UI should run them elsewhere.

pub mod chart;
pub mod config;
pub mod error;
pub mod format;

// Re-export from chart module
pub use chart::{
    BpmEvent, ControlScheme, DragNode, HoldOverlap, Note, NoteId, NoteKey, NoteLinks, NoteType,
    Pattern, PatternMetadata, PulseIndex, SoundChannel, Track, TrackMetadata,
};

// Re-export from config module
pub use config::{MAX_PULSE, PULSES_PER_BEAT, PlacementPolicy};

// Re-export from error module
pub use error::{Error, ErrorKind, Result};

// Re-export from format module
pub use format::{
    TrackDocument, clone_track, format_track, load_track, parse_track, save_track,
    save_track_with,
};
