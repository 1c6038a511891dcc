use crate::chart::{Pattern, TrackMetadata};
use crate::config::format::CURRENT_VERSION;

/// A song with its metadata and every pattern charted for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    version: String,
    pub metadata: TrackMetadata,
    pub patterns: Vec<Pattern>,
}

impl Track {
    /// Creates an empty track in the current format version.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self::from_parts(TrackMetadata::new(title, artist), Vec::new())
    }

    pub(crate) fn from_parts(metadata: TrackMetadata, patterns: Vec<Pattern>) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            metadata,
            patterns,
        }
    }

    /// Format version this track is saved with.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Appends a pattern and returns its position.
    pub fn add_pattern(&mut self, pattern: Pattern) -> usize {
        self.patterns.push(pattern);
        self.patterns.len() - 1
    }

    pub fn remove_pattern(&mut self, index: usize) -> Option<Pattern> {
        (index < self.patterns.len()).then(|| self.patterns.remove(index))
    }

    pub fn find_pattern(&self, name: &str) -> Option<&Pattern> {
        self.patterns
            .iter()
            .find(|pattern| pattern.metadata.pattern_name == name)
    }

    pub fn find_pattern_mut(&mut self, name: &str) -> Option<&mut Pattern> {
        self.patterns
            .iter_mut()
            .find(|pattern| pattern.metadata.pattern_name == name)
    }

    /// Orders patterns by control scheme, then level, then name.
    pub fn sort_patterns(&mut self) {
        self.patterns.sort_by(|a, b| {
            let (a, b) = (&a.metadata, &b.metadata);
            a.control_scheme
                .cmp(&b.control_scheme)
                .then(a.level.cmp(&b.level))
                .then_with(|| a.pattern_name.cmp(&b.pattern_name))
        });
    }

    pub fn note_count(&self) -> usize {
        self.patterns.iter().map(Pattern::note_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ControlScheme, PatternMetadata};

    fn pattern(name: &str, scheme: ControlScheme, level: u32) -> Pattern {
        Pattern::new(PatternMetadata {
            pattern_name: name.to_string(),
            control_scheme: scheme,
            level,
            ..PatternMetadata::default()
        })
    }

    #[test]
    fn test_new_track_is_current_version() {
        let track = Track::new("Song", "Artist");
        assert_eq!(track.version(), "1");
        assert_eq!(track.metadata.title, "Song");
        assert_eq!(track.metadata.artist, "Artist");
        assert!(track.patterns.is_empty());
    }

    #[test]
    fn test_add_find_remove_pattern() {
        let mut track = Track::new("Song", "Artist");
        assert_eq!(track.add_pattern(pattern("Easy", ControlScheme::Touch, 2)), 0);
        assert_eq!(track.add_pattern(pattern("Hard", ControlScheme::Touch, 9)), 1);

        assert_eq!(track.find_pattern("Hard").unwrap().metadata.level, 9);
        assert!(track.find_pattern("Lunatic").is_none());

        track.find_pattern_mut("Easy").unwrap().metadata.level = 3;
        assert_eq!(track.patterns[0].metadata.level, 3);

        assert!(track.remove_pattern(5).is_none());
        let removed = track.remove_pattern(0).unwrap();
        assert_eq!(removed.metadata.pattern_name, "Easy");
        assert_eq!(track.patterns.len(), 1);
    }

    #[test]
    fn test_sort_patterns() {
        let mut track = Track::new("Song", "Artist");
        track.add_pattern(pattern("KM 5", ControlScheme::KeyboardMouse, 5));
        track.add_pattern(pattern("Keys 3", ControlScheme::Keys, 3));
        track.add_pattern(pattern("Touch 7", ControlScheme::Touch, 7));
        track.add_pattern(pattern("Touch 2", ControlScheme::Touch, 2));

        track.sort_patterns();
        let names: Vec<&str> = track
            .patterns
            .iter()
            .map(|p| p.metadata.pattern_name.as_str())
            .collect();
        assert_eq!(names, vec!["Touch 2", "Touch 7", "Keys 3", "KM 5"]);
    }
}
