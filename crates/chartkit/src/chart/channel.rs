use crate::chart::NoteId;

/// Notes sharing one sound sample.
///
/// The channel is the persisted owner of its notes. Drag notes are kept in
/// their own list because the document stores them separately.
#[derive(Debug, Clone, Default)]
pub struct SoundChannel {
    name: String,
    notes: Vec<NoteId>,
    drag_notes: Vec<NoteId>,
}

impl SoundChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn note_ids(&self) -> &[NoteId] {
        &self.notes
    }

    pub fn drag_note_ids(&self) -> &[NoteId] {
        &self.drag_notes
    }

    /// All ids, plain notes first, each list in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NoteId> + '_ {
        self.notes.iter().chain(&self.drag_notes).copied()
    }

    pub fn len(&self) -> usize {
        self.notes.len() + self.drag_notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.drag_notes.is_empty()
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.notes.contains(&id) || self.drag_notes.contains(&id)
    }

    pub(crate) fn push(&mut self, id: NoteId, is_drag: bool) {
        if is_drag {
            self.drag_notes.push(id);
        } else {
            self.notes.push(id);
        }
    }

    /// Removes `id`, keeping the order of the remaining notes.
    pub(crate) fn remove(&mut self, id: NoteId) -> bool {
        for list in [&mut self.notes, &mut self.drag_notes] {
            if let Some(position) = list.iter().position(|&n| n == id) {
                list.remove(position);
                return true;
            }
        }
        false
    }
}
