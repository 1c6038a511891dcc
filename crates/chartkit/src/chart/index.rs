use crate::chart::{NoteId, NoteKey};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub lane: u32,
    pub id: NoteId,
}

/// Pulse-addressed lookup over the notes of one pattern.
///
/// Slot `p` holds the notes at pulse `p`. Slots are created on demand when
/// a note lands past the current end, and empty slots stay unallocated.
/// Buckets are scanned linearly since more than a handful of notes on one
/// pulse is rare.
#[derive(Debug, Clone, Default)]
pub struct PulseIndex {
    buckets: Vec<Option<Vec<IndexEntry>>>,
    len: usize,
}

impl PulseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self, pulse: u32, lane: u32) -> Option<NoteId> {
        self.bucket(pulse)
            .iter()
            .find(|entry| entry.lane == lane)
            .map(|entry| entry.id)
    }

    pub fn contains(&self, pulse: u32, lane: u32) -> bool {
        self.query(pulse, lane).is_some()
    }

    /// Notes at `pulse`, in insertion order.
    pub fn bucket(&self, pulse: u32) -> &[IndexEntry] {
        self.buckets
            .get(pulse as usize)
            .and_then(Option::as_deref)
            .unwrap_or(&[])
    }

    pub fn insert(&mut self, key: NoteKey, id: NoteId) {
        let slot = key.pulse as usize;
        if self.buckets.len() <= slot {
            self.buckets.resize_with(slot + 1, || None);
        }
        self.buckets[slot]
            .get_or_insert_with(Vec::new)
            .push(IndexEntry { lane: key.lane, id });
        self.len += 1;
    }

    /// Whether `id` is indexed at `key`.
    pub fn holds(&self, key: NoteKey, id: NoteId) -> bool {
        self.bucket(key.pulse)
            .iter()
            .any(|entry| entry.id == id && entry.lane == key.lane)
    }

    /// Removes the entry for `id` at `key`.
    ///
    /// A missing entry means the caller is deleting a note that was never
    /// indexed, reported as `Error::NoteNotIndexed`.
    pub fn remove(&mut self, key: NoteKey, id: NoteId) -> Result<()> {
        let not_indexed = || Error::NoteNotIndexed {
            pulse: key.pulse,
            lane: key.lane,
        };
        let bucket = self
            .buckets
            .get_mut(key.pulse as usize)
            .and_then(Option::as_mut)
            .ok_or_else(not_indexed)?;
        let position = bucket
            .iter()
            .position(|entry| entry.id == id && entry.lane == key.lane)
            .ok_or_else(not_indexed)?;
        bucket.remove(position);
        self.len -= 1;
        Ok(())
    }

    /// Removes whatever note sits at `(pulse, lane)`. Does nothing on an
    /// empty cell.
    pub fn remove_at(&mut self, pulse: u32, lane: u32) -> Option<NoteId> {
        let bucket = self.buckets.get_mut(pulse as usize)?.as_mut()?;
        let position = bucket.iter().position(|entry| entry.lane == lane)?;
        let entry = bucket.remove(position);
        self.len -= 1;
        Some(entry.id)
    }

    /// Entries with `start <= pulse < end`, ordered by pulse.
    pub fn range(&self, start: u32, end: u32) -> impl Iterator<Item = (u32, IndexEntry)> + '_ {
        let end = (end as usize).min(self.buckets.len());
        let start = (start as usize).min(end);
        self.buckets[start..end]
            .iter()
            .zip(start..)
            .filter_map(|(bucket, pulse)| bucket.as_ref().map(|b| (pulse as u32, b)))
            .flat_map(|(pulse, bucket)| bucket.iter().map(move |entry| (pulse, *entry)))
    }

    /// Highest pulse holding at least one note.
    pub fn last_pulse(&self) -> Option<u32> {
        self.buckets
            .iter()
            .rposition(|bucket| bucket.as_ref().is_some_and(|b| !b.is_empty()))
            .map(|pulse| pulse as u32)
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
