use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum NoteType {
    Basic,
    ChainHead,
    Chain,
    HoldStart,
    HoldEnd,
    Drag,
    RepeatHead,
    RepeatHeadHold,
    Repeat,
    RepeatHoldStart,
    RepeatHoldEnd,
}

impl NoteType {
    pub fn is_chain(&self) -> bool {
        matches!(self, Self::ChainHead | Self::Chain)
    }

    /// Note types that begin a hold span.
    pub fn is_hold_start(&self) -> bool {
        matches!(
            self,
            Self::HoldStart | Self::RepeatHeadHold | Self::RepeatHoldStart
        )
    }

    pub fn is_hold_end(&self) -> bool {
        matches!(self, Self::HoldEnd | Self::RepeatHoldEnd)
    }

    /// Whether a hold opened by `self` is closed by `end`.
    pub fn closes_with(&self, end: NoteType) -> bool {
        match self {
            Self::HoldStart => end == Self::HoldEnd,
            Self::RepeatHeadHold | Self::RepeatHoldStart => end == Self::RepeatHoldEnd,
            _ => false,
        }
    }

    /// Members of a repeat sequence. `RepeatHoldEnd` only closes a hold and
    /// takes no part in the sequence itself.
    pub fn is_repeat(&self) -> bool {
        matches!(
            self,
            Self::RepeatHead | Self::RepeatHeadHold | Self::Repeat | Self::RepeatHoldStart
        )
    }

    pub fn is_repeat_head(&self) -> bool {
        matches!(self, Self::RepeatHead | Self::RepeatHeadHold)
    }
}

/// Position of a note on the pattern grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteKey {
    pub pulse: u32,
    pub lane: u32,
}

impl NoteKey {
    pub fn new(pulse: u32, lane: u32) -> Self {
        Self { pulse, lane }
    }
}

impl std::fmt::Display for NoteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pulse {} lane {}", self.pulse, self.lane)
    }
}

/// Handle to a note owned by a `Pattern`.
///
/// Ids are never reused by the pattern that issued them, so a handle to a
/// deleted note stays invalid instead of pointing at a newer note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(pub(crate) usize);

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Control point of a drag gesture, relative to the drag note's own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragNode {
    pub lane: i32,
    pub pulse: i32,
}

impl DragNode {
    pub fn new(lane: i32, pulse: i32) -> Self {
        Self { lane, pulse }
    }
}

/// Neighbor references filled in by the linking pass.
///
/// Every field is a grid position resolved through the owning pattern's
/// index. `None` means no neighbor, which is normal for sequence ends and
/// for half-finished structures during editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteLinks {
    pub chain_prev: Option<NoteKey>,
    pub chain_next: Option<NoteKey>,
    /// For a hold start this is its end, for a hold end its start.
    pub hold_partner: Option<NoteKey>,
    pub repeat_prev: Option<NoteKey>,
    pub repeat_next: Option<NoteKey>,
}

#[derive(Debug, Clone)]
pub struct Note {
    pub lane: u32,
    pub pulse: u32,
    note_type: NoteType,
    /// Present exactly when `note_type` is `Drag`.
    path: Option<Vec<DragNode>>,
    /// Name of the owning sound channel. Stamped by the pattern, not persisted.
    pub(crate) sound: String,
    pub(crate) links: NoteLinks,
}

impl Note {
    /// Creates a note of the given type. A `Drag` note starts with a path
    /// holding only its origin.
    pub fn new(lane: u32, pulse: u32, note_type: NoteType) -> Self {
        let path = (note_type == NoteType::Drag).then(|| vec![DragNode::new(0, 0)]);
        Self {
            lane,
            pulse,
            note_type,
            path,
            sound: String::new(),
            links: NoteLinks::default(),
        }
    }

    pub fn basic(lane: u32, pulse: u32) -> Self {
        Self::new(lane, pulse, NoteType::Basic)
    }

    pub fn drag(lane: u32, pulse: u32, path: Vec<DragNode>) -> Self {
        Self {
            path: Some(path),
            ..Self::new(lane, pulse, NoteType::Drag)
        }
    }

    pub fn note_type(&self) -> NoteType {
        self.note_type
    }

    pub fn key(&self) -> NoteKey {
        NoteKey::new(self.pulse, self.lane)
    }

    pub fn is_drag(&self) -> bool {
        self.note_type == NoteType::Drag
    }

    /// Drag path, `None` for every other note type.
    pub fn path(&self) -> Option<&[DragNode]> {
        self.path.as_deref()
    }

    pub fn path_mut(&mut self) -> Option<&mut Vec<DragNode>> {
        self.path.as_mut()
    }

    /// Name of the sound channel this note belongs to. Empty until the note
    /// is added to a pattern.
    pub fn sound(&self) -> &str {
        &self.sound
    }

    pub fn links(&self) -> &NoteLinks {
        &self.links
    }
}

/// Equality covers persisted fields only. Sound and links are derived.
impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.lane == other.lane
            && self.pulse == other.pulse
            && self.note_type == other.note_type
            && self.path == other.path
    }
}

impl Eq for Note {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_drag_note_gets_origin_path() {
        let note = Note::new(1, 480, NoteType::Drag);
        assert_eq!(note.path(), Some(&[DragNode::new(0, 0)][..]));

        let note = Note::basic(1, 480);
        assert!(note.path().is_none());
    }

    #[test]
    fn test_equality_ignores_derived_fields() {
        let mut a = Note::basic(2, 0);
        let b = Note::basic(2, 0);
        a.sound = "kick.wav".to_string();
        a.links.chain_next = Some(NoteKey::new(240, 1));
        assert_eq!(a, b);

        let c = Note::new(2, 0, NoteType::ChainHead);
        assert_ne!(b, c);
    }

    #[test]
    fn test_hold_pairing_rules() {
        assert!(NoteType::HoldStart.closes_with(NoteType::HoldEnd));
        assert!(!NoteType::HoldStart.closes_with(NoteType::RepeatHoldEnd));
        assert!(NoteType::RepeatHeadHold.closes_with(NoteType::RepeatHoldEnd));
        assert!(NoteType::RepeatHoldStart.closes_with(NoteType::RepeatHoldEnd));
        assert!(!NoteType::Basic.closes_with(NoteType::HoldEnd));
    }

    #[test]
    fn test_every_hold_start_has_an_end_type() {
        for start in NoteType::iter().filter(NoteType::is_hold_start) {
            assert!(
                NoteType::iter().any(|end| start.closes_with(end) && end.is_hold_end()),
                "{} has no matching end",
                start
            );
        }
    }

    #[test]
    fn test_note_type_names() {
        assert_eq!(NoteType::from_str("RepeatHeadHold").unwrap(), NoteType::RepeatHeadHold);
        let name: &'static str = NoteType::ChainHead.into();
        assert_eq!(name, "ChainHead");
        assert_eq!(
            serde_json::to_string(&NoteType::HoldEnd).unwrap(),
            "\"HoldEnd\""
        );
    }
}
