//! Version "1" document schema.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::chart::{
    BpmEvent, DragNode, Note, NoteType, Pattern, PatternMetadata, Track, TrackMetadata,
};
use crate::error::{Error, Result};

pub const VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackV1 {
    pub version: String,
    #[serde(default)]
    pub track_metadata: TrackMetadata,
    #[serde(default)]
    pub patterns: Vec<PatternV1>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternV1 {
    #[serde(default)]
    pub pattern_metadata: PatternMetadata,
    #[serde(default)]
    pub bpm_events: Vec<BpmEvent>,
    #[serde(default)]
    pub sound_channels: Vec<SoundChannelV1>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundChannelV1 {
    pub name: String,
    #[serde(default)]
    pub notes: Vec<NoteV1>,
    #[serde(default)]
    pub drag_notes: Vec<DragNoteV1>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteV1 {
    pub lane: u32,
    pub pulse: u32,
    #[serde(rename = "type")]
    pub note_type: NoteType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragNoteV1 {
    pub lane: u32,
    pub pulse: u32,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    #[serde(default)]
    pub path: Vec<DragNode>,
}

impl From<&Track> for TrackV1 {
    fn from(track: &Track) -> Self {
        Self {
            version: VERSION.to_string(),
            track_metadata: track.metadata.clone(),
            patterns: track.patterns.iter().map(PatternV1::from).collect(),
        }
    }
}

impl From<&Pattern> for PatternV1 {
    fn from(pattern: &Pattern) -> Self {
        let sound_channels = pattern
            .channels()
            .iter()
            .map(|channel| SoundChannelV1 {
                name: channel.name().to_string(),
                notes: channel
                    .note_ids()
                    .iter()
                    .filter_map(|&id| pattern.note(id))
                    .map(|note| NoteV1 {
                        lane: note.lane,
                        pulse: note.pulse,
                        note_type: note.note_type(),
                    })
                    .collect(),
                drag_notes: channel
                    .drag_note_ids()
                    .iter()
                    .filter_map(|&id| pattern.note(id))
                    .map(|note| DragNoteV1 {
                        lane: note.lane,
                        pulse: note.pulse,
                        note_type: note.note_type(),
                        path: note.path().map(<[DragNode]>::to_vec).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            pattern_metadata: pattern.metadata.clone(),
            bpm_events: pattern.bpm_events.clone(),
            sound_channels,
        }
    }
}

impl TryFrom<TrackV1> for Track {
    type Error = Error;

    fn try_from(document: TrackV1) -> Result<Self> {
        for (field, time) in document.track_metadata.times() {
            if !time.is_finite() || time < 0.0 {
                return Err(Error::InvalidDocument(format!(
                    "trackMetadata.{} must be a non-negative number of seconds, got {}",
                    field, time
                )));
            }
        }

        let patterns = document
            .patterns
            .into_iter()
            .map(Pattern::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Track::from_parts(document.track_metadata, patterns))
    }
}

impl TryFrom<PatternV1> for Pattern {
    type Error = Error;

    fn try_from(document: PatternV1) -> Result<Self> {
        let metadata = document.pattern_metadata;
        let name = metadata.pattern_name.clone();
        let invalid = |message: String| Error::InvalidDocument(format!("pattern {:?}: {}", name, message));

        check_bpm(metadata.init_bpm).map_err(|bpm| invalid(format!("invalid initBpm {}", bpm)))?;
        for event in &document.bpm_events {
            check_bpm(event.bpm).map_err(|bpm| {
                invalid(format!("invalid bpm {} at pulse {}", bpm, event.pulse))
            })?;
        }
        if !metadata.first_beat_offset.is_finite() {
            return Err(invalid("firstBeatOffset must be finite".to_string()));
        }

        let mut names = HashSet::with_capacity(document.sound_channels.len());
        let mut channels = Vec::with_capacity(document.sound_channels.len());
        for channel in document.sound_channels {
            // A note's sound names exactly one channel
            if !names.insert(channel.name.clone()) {
                return Err(invalid(format!(
                    "sound channel {:?} is listed more than once",
                    channel.name
                )));
            }
            let mut notes = Vec::with_capacity(channel.notes.len() + channel.drag_notes.len());
            for note in channel.notes {
                if note.note_type == NoteType::Drag {
                    return Err(invalid(format!(
                        "channel {:?} lists a Drag note at pulse {} outside dragNotes",
                        channel.name, note.pulse
                    )));
                }
                notes.push(Note::new(note.lane, note.pulse, note.note_type));
            }
            for drag in channel.drag_notes {
                if drag.note_type != NoteType::Drag {
                    return Err(invalid(format!(
                        "channel {:?} lists a {} note at pulse {} in dragNotes",
                        channel.name, drag.note_type, drag.pulse
                    )));
                }
                notes.push(Note::drag(drag.lane, drag.pulse, drag.path));
            }
            channels.push((channel.name, notes));
        }

        Pattern::from_channels(metadata, document.bpm_events, channels)
    }
}

fn check_bpm(bpm: f64) -> std::result::Result<(), f64> {
    if bpm.is_finite() && bpm > 0.0 {
        Ok(())
    } else {
        Err(bpm)
    }
}
