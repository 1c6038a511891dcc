//! Fixed constants and editing policy.
//!
//! This module contains:
//! - Timeline constants (pulse resolution and bounds)
//! - Format constants (current document version)
//! - `PlacementPolicy` - whether `Pattern::add_note` checks for occupied cells

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Number of pulses in one beat. Fixed for every pattern.
pub const PULSES_PER_BEAT: u32 = 240;

/// Highest pulse a note may occupy.
///
/// The pulse index is dense, so one slot is allocated per pulse up to the
/// last note. 20,000 beats is over an hour at 300 BPM.
pub const MAX_PULSE: u32 = PULSES_PER_BEAT * 20_000;

/// Track format constants.
pub mod format {
    /// Version tag written by `save_track` and the only tag `load_track` accepts.
    pub const CURRENT_VERSION: &str = "1";
}

/// Defaults for newly created patterns.
pub mod pattern {
    pub const DEFAULT_INITIAL_BPM: f64 = 60.0;
    pub const DEFAULT_BEATS_PER_SCAN: u32 = 4;
    pub const DEFAULT_LEVEL: u32 = 1;
    pub const DEFAULT_NAME: &str = "New pattern";
}

/// How `Pattern::add_note` treats a cell that already holds a note.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlacementPolicy {
    /// The caller is trusted to check `has_note_at` first. Two notes may end
    /// up sharing a cell; lookups return the one added first.
    #[default]
    Lenient,
    /// Adding onto an occupied cell fails with `Error::CellOccupied`.
    Strict,
}
