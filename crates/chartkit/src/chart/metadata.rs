use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::config::pattern::{
    DEFAULT_BEATS_PER_SCAN, DEFAULT_INITIAL_BPM, DEFAULT_LEVEL, DEFAULT_NAME,
};

/// Descriptive fields of a track. Times are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackMetadata {
    pub title: String,
    pub subtitle: String,
    pub artist: String,
    pub genre: String,
    pub additional_credits: String,

    pub eyecatch_image: String,
    pub preview_track: String,
    pub preview_start_time: f64,
    pub preview_end_time: f64,

    pub back_image: String,
    pub bga: String,
    pub bga_start_time: f64,
}

impl TrackMetadata {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }

    /// Name and value of each time offset, for validation.
    pub(crate) fn times(&self) -> [(&'static str, f64); 3] {
        [
            ("previewStartTime", self.preview_start_time),
            ("previewEndTime", self.preview_end_time),
            ("bgaStartTime", self.bga_start_time),
        ]
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ControlScheme {
    #[default]
    Touch,
    Keys,
    #[strum(to_string = "KeyboardMouse", serialize = "KM")]
    KeyboardMouse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternMetadata {
    pub pattern_name: String,
    pub author: String,
    pub level: u32,
    pub control_scheme: ControlScheme,
    pub backing_track: String,
    /// Seconds from the start of the backing track to pulse 0.
    pub first_beat_offset: f64,
    pub init_bpm: f64,
    /// Beats shown per screen scan.
    pub bps: u32,
}

impl Default for PatternMetadata {
    fn default() -> Self {
        Self {
            pattern_name: DEFAULT_NAME.to_string(),
            author: String::new(),
            level: DEFAULT_LEVEL,
            control_scheme: ControlScheme::default(),
            backing_track: String::new(),
            first_beat_offset: 0.0,
            init_bpm: DEFAULT_INITIAL_BPM,
            bps: DEFAULT_BEATS_PER_SCAN,
        }
    }
}

/// Tempo change taking effect at `pulse`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpmEvent {
    pub pulse: u32,
    pub bpm: f64,
}

impl BpmEvent {
    pub fn new(pulse: u32, bpm: f64) -> Self {
        Self { pulse, bpm }
    }
}
