use thiserror::Error;

use crate::chart::NoteId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported track format version: {version:?}")]
    UnsupportedVersion { version: String },

    #[error("Malformed track document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid track document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Note {0} does not exist in this pattern")]
    NoteNotFound(NoteId),

    #[error("Sound channel not found: {name:?}")]
    ChannelNotFound { name: String },

    #[error("Note at pulse {pulse}, lane {lane} is missing from the pulse index")]
    NoteNotIndexed { pulse: u32, lane: u32 },

    #[error("A note already occupies pulse {pulse}, lane {lane}")]
    CellOccupied { pulse: u32, lane: u32 },

    #[error("Pulse {pulse} exceeds the maximum pattern length")]
    PulseOutOfRange { pulse: u32 },
}

/// Coarse classification of [`Error`] for callers that only need to decide
/// how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown version tag, malformed text, or a document violating model rules.
    Format,
    /// Filesystem failure while reading or writing a document.
    Io,
    /// The caller asked for something that contradicts the pattern's state.
    Consistency,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedVersion { .. } | Self::Json(_) | Self::InvalidDocument(_) => {
                ErrorKind::Format
            }
            Self::Io(_) => ErrorKind::Io,
            Self::NoteNotFound(_)
            | Self::ChannelNotFound { .. }
            | Self::NoteNotIndexed { .. }
            | Self::CellOccupied { .. }
            | Self::PulseOutOfRange { .. } => ErrorKind::Consistency,
        }
    }

    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    pub fn is_consistency(&self) -> bool {
        self.kind() == ErrorKind::Consistency
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_classification() {
        let err = Error::UnsupportedVersion {
            version: "999".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.kind(), ErrorKind::Io);

        let err = Error::ChannelNotFound {
            name: "kick.wav".to_string(),
        };
        assert!(err.is_consistency());
        assert!(!err.is_format());
    }

    #[test]
    fn test_json_error_is_format() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.is_format());
        assert!(err.to_string().starts_with("Malformed track document"));
    }
}
