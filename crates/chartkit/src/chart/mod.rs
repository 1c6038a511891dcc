//! Chart document model.
//!
//! This module contains the in-memory representation of a track:
//! - `Track`, `TrackMetadata` - a song and its patterns
//! - `Pattern`, `PatternMetadata`, `BpmEvent` - one playable chart
//! - `SoundChannel` - persisted grouping of notes by sound sample
//! - `Note`, `NoteType`, `DragNode`, `NoteLinks` - note primitives
//! - `PulseIndex` - pulse-addressed lookup over a pattern's notes

mod channel;
mod index;
mod metadata;
mod note;
mod pattern;
mod track;

pub use channel::*;
pub use index::*;
pub use metadata::*;
pub use note::*;
pub use pattern::*;
pub use track::*;
