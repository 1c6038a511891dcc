//! Versioned track documents.
//!
//! Every document carries a top-level `version` tag. Loading reads the tag
//! first and then decodes the body with the schema for that version;
//! unknown tags are rejected. Saving always writes the current version.

mod v1;

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::chart::Track;
use crate::error::{Error, Result};

pub use v1::{DragNoteV1, NoteV1, PatternV1, SoundChannelV1, TrackV1};

#[derive(Deserialize)]
struct VersionTag {
    version: String,
}

/// A decoded document in one of the supported schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackDocument {
    V1(TrackV1),
}

impl TrackDocument {
    /// Decodes `text`, choosing the schema from its `version` tag.
    pub fn decode(text: &str) -> Result<Self> {
        Self::decode_slice(text.as_bytes())
    }

    /// Like `decode`, for raw file contents. Bytes that are not UTF-8 are a
    /// format error.
    pub fn decode_slice(bytes: &[u8]) -> Result<Self> {
        let tag: VersionTag = serde_json::from_slice(bytes)?;
        match tag.version.as_str() {
            v1::VERSION => Ok(Self::V1(serde_json::from_slice(bytes)?)),
            _ => Err(Error::UnsupportedVersion {
                version: tag.version,
            }),
        }
    }

    pub fn version(&self) -> &str {
        match self {
            Self::V1(document) => &document.version,
        }
    }

    pub fn into_track(self) -> Result<Track> {
        match self {
            Self::V1(document) => Track::try_from(document),
        }
    }
}

impl From<&Track> for TrackDocument {
    fn from(track: &Track) -> Self {
        Self::V1(TrackV1::from(track))
    }
}

/// Parses a track document and indexes every pattern.
pub fn parse_track(text: &str) -> Result<Track> {
    TrackDocument::decode(text)?.into_track()
}

/// Serializes `track` in the current format version.
pub fn format_track(track: &Track, pretty: bool) -> Result<String> {
    let document = TrackV1::from(track);
    let text = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(text)
}

pub fn load_track<P: AsRef<Path>>(path: P) -> Result<Track> {
    let content = fs::read(&path)?;
    let track = TrackDocument::decode_slice(&content)?.into_track()?;
    info!(
        "Loaded track {:?} with {} patterns from {:?}",
        track.metadata.title,
        track.patterns.len(),
        path.as_ref()
    );
    Ok(track)
}

/// Writes `track` as pretty-printed JSON.
pub fn save_track<P: AsRef<Path>>(path: P, track: &Track) -> Result<()> {
    save_track_with(path, track, true)
}

pub fn save_track_with<P: AsRef<Path>>(path: P, track: &Track, pretty: bool) -> Result<()> {
    let content = format_track(track, pretty)?;
    fs::write(&path, content)?;
    info!(
        "Saved track {:?} to {:?}",
        track.metadata.title,
        path.as_ref()
    );
    Ok(())
}

/// Deep copy through a serialize/parse cycle. The copy shares nothing with
/// `track` and has fresh indexes and links.
pub fn clone_track(track: &Track) -> Result<Track> {
    parse_track(&format_track(track, false)?)
}
