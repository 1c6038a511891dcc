use std::collections::HashMap;

use tracing::{debug, warn};

use crate::chart::{
    BpmEvent, DragNode, Note, NoteId, NoteKey, NoteLinks, NoteType, PatternMetadata, PulseIndex,
    SoundChannel,
};
use crate::config::{MAX_PULSE, PlacementPolicy};
use crate::error::{Error, Result};

/// A note placed inside a hold span on the same lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldOverlap {
    pub hold_start: NoteKey,
    pub hold_end: NoteKey,
    pub note: NoteKey,
}

/// One playable chart of a track.
///
/// Sound channels are the persisted owners of notes. The pulse index is a
/// lookup cache over the same notes, and every mutation updates both.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    pub metadata: PatternMetadata,
    pub bpm_events: Vec<BpmEvent>,
    channels: Vec<SoundChannel>,
    /// Note storage addressed by `NoteId`. Deleted notes leave a `None` so
    /// that ids stay unique.
    notes: Vec<Option<Note>>,
    index: PulseIndex,
    placement: PlacementPolicy,
}

impl Pattern {
    pub fn new(metadata: PatternMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Builds a pattern from channel-grouped notes and indexes it.
    pub(crate) fn from_channels(
        metadata: PatternMetadata,
        bpm_events: Vec<BpmEvent>,
        channels: impl IntoIterator<Item = (String, Vec<Note>)>,
    ) -> Result<Self> {
        let mut pattern = Self {
            metadata,
            bpm_events,
            ..Self::default()
        };

        for (name, notes) in channels {
            let mut channel = SoundChannel::new(name);
            for note in notes {
                if note.pulse > MAX_PULSE {
                    return Err(Error::InvalidDocument(format!(
                        "note in channel {:?} at pulse {} exceeds the maximum pulse {}",
                        channel.name(),
                        note.pulse,
                        MAX_PULSE
                    )));
                }
                let id = NoteId(pattern.notes.len());
                channel.push(id, note.is_drag());
                pattern.notes.push(Some(note));
            }
            pattern.channels.push(channel);
        }

        pattern.rebuild_index();
        Ok(pattern)
    }

    pub fn placement_policy(&self) -> PlacementPolicy {
        self.placement
    }

    pub fn set_placement_policy(&mut self, placement: PlacementPolicy) {
        self.placement = placement;
    }

    /// Repopulates the pulse index from the channels, stamps every note with
    /// its channel name and reruns the linking pass.
    ///
    /// Needed once after loading; the editing methods keep the index current.
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for channel in &self.channels {
            for id in channel.ids() {
                if let Some(note) = self.notes.get_mut(id.0).and_then(Option::as_mut) {
                    note.sound = channel.name().to_string();
                    self.index.insert(note.key(), id);
                }
            }
        }

        debug!(
            "Rebuilt pulse index: {} notes in {} channels",
            self.index.len(),
            self.channels.len()
        );

        self.relink();
    }

    /// Recomputes chain, hold and repeat links for every note.
    ///
    /// Notes are visited in (pulse, lane) order:
    /// - a `ChainHead` starts a chain that following `Chain` notes join
    /// - a hold start pairs with the next matching hold end in its lane
    /// - a repeat head starts a sequence that following repeat notes in its
    ///   lane join
    pub fn relink(&mut self) {
        let mut order: Vec<(NoteKey, NoteId, NoteType)> = self
            .notes()
            .map(|(id, note)| (note.key(), id, note.note_type()))
            .collect();
        order.sort_by_key(|&(key, id, _)| (key, id));

        for note in self.notes.iter_mut().flatten() {
            note.links = NoteLinks::default();
        }

        let mut chain_tail: Option<(NoteId, NoteKey)> = None;
        let mut open_holds: HashMap<u32, (NoteId, NoteKey, NoteType)> = HashMap::new();
        let mut repeat_tails: HashMap<u32, (NoteId, NoteKey)> = HashMap::new();
        let mut linked = 0usize;

        for (key, id, note_type) in order {
            if note_type.is_chain() {
                if note_type == NoteType::Chain
                    && let Some((prev_id, prev_key)) = chain_tail
                {
                    self.update_links(prev_id, |links| links.chain_next = Some(key));
                    self.update_links(id, |links| links.chain_prev = Some(prev_key));
                    linked += 1;
                }
                chain_tail = Some((id, key));
            }

            if note_type.is_hold_end()
                && let Some(&(start_id, start_key, start_type)) = open_holds.get(&key.lane)
                && start_type.closes_with(note_type)
            {
                open_holds.remove(&key.lane);
                self.update_links(start_id, |links| links.hold_partner = Some(key));
                self.update_links(id, |links| links.hold_partner = Some(start_key));
                linked += 1;
            }

            if note_type.is_hold_start() {
                open_holds.insert(key.lane, (id, key, note_type));
            }

            if note_type.is_repeat() {
                let prev = repeat_tails.insert(key.lane, (id, key));
                if !note_type.is_repeat_head()
                    && let Some((prev_id, prev_key)) = prev
                {
                    self.update_links(prev_id, |links| links.repeat_next = Some(key));
                    self.update_links(id, |links| links.repeat_prev = Some(prev_key));
                    linked += 1;
                }
            }
        }

        debug!("Linking pass connected {} note pairs", linked);
    }

    fn update_links(&mut self, id: NoteId, update: impl FnOnce(&mut NoteLinks)) {
        if let Some(note) = self.notes.get_mut(id.0).and_then(Option::as_mut) {
            update(&mut note.links);
        }
    }

    /// Adds `note` to the channel named `sound`, creating the channel if needed.
    ///
    /// Under `PlacementPolicy::Lenient` the cell is not checked; callers
    /// should test `has_note_at` first. Overlap with an existing hold span is
    /// never checked, see `hold_overlaps`.
    pub fn add_note(&mut self, mut note: Note, sound: &str) -> Result<NoteId> {
        if note.pulse > MAX_PULSE {
            return Err(Error::PulseOutOfRange { pulse: note.pulse });
        }
        if self.placement == PlacementPolicy::Strict && self.has_note_at(note.pulse, note.lane) {
            return Err(Error::CellOccupied {
                pulse: note.pulse,
                lane: note.lane,
            });
        }

        let channel_index = match self.channel_position(sound) {
            Some(index) => index,
            None => {
                self.channels.push(SoundChannel::new(sound));
                self.channels.len() - 1
            }
        };

        let id = NoteId(self.notes.len());
        note.sound = sound.to_string();
        note.links = NoteLinks::default();
        self.index.insert(note.key(), id);
        self.channels[channel_index].push(id, note.is_drag());
        self.notes.push(Some(note));
        Ok(id)
    }

    pub fn has_note_at(&self, pulse: u32, lane: u32) -> bool {
        self.index.contains(pulse, lane)
    }

    pub fn note_id_at(&self, pulse: u32, lane: u32) -> Option<NoteId> {
        self.index.query(pulse, lane)
    }

    pub fn note_at(&self, pulse: u32, lane: u32) -> Option<&Note> {
        self.note_id_at(pulse, lane).and_then(|id| self.note(id))
    }

    /// Looks up a link target.
    pub fn resolve(&self, key: NoteKey) -> Option<&Note> {
        self.note_at(key.pulse, key.lane)
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access to a drag note's path. `None` for other note types.
    pub fn drag_path_mut(&mut self, id: NoteId) -> Option<&mut Vec<DragNode>> {
        self.notes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .and_then(Note::path_mut)
    }

    /// Removes a note from its channel and from the pulse index.
    ///
    /// Every precondition is checked before anything is modified, so an
    /// error leaves the pattern untouched.
    ///
    /// The note's storage slot is not reused, so outstanding ids never alias
    /// another note. Slots stay allocated until the pattern is reloaded, for
    /// example through `clone_track`, which stores only live notes.
    pub fn delete_note(&mut self, id: NoteId) -> Result<Note> {
        let note = self.note(id).ok_or(Error::NoteNotFound(id))?;
        let key = note.key();
        let channel_index =
            self.channel_position(note.sound())
                .ok_or_else(|| Error::ChannelNotFound {
                    name: note.sound().to_string(),
                })?;
        if !self.index.holds(key, id) {
            return Err(Error::NoteNotIndexed {
                pulse: key.pulse,
                lane: key.lane,
            });
        }
        if !self.channels[channel_index].contains(id) {
            return Err(Error::NoteNotFound(id));
        }

        self.index.remove(key, id)?;
        self.channels[channel_index].remove(id);
        self.notes[id.0].take().ok_or(Error::NoteNotFound(id))
    }

    /// Removes the note at `(pulse, lane)` if there is one.
    ///
    /// Never fails: an empty cell, or a note whose channel is missing, leaves
    /// the pattern as it was.
    pub fn delete_note_at(&mut self, pulse: u32, lane: u32) -> Option<Note> {
        let Some(id) = self.index.query(pulse, lane) else {
            debug!("No note at pulse {} lane {}, nothing to delete", pulse, lane);
            return None;
        };

        match self.delete_note(id) {
            Ok(note) => Some(note),
            Err(e) => {
                warn!("Skipped deleting note at pulse {} lane {}: {}", pulse, lane, e);
                None
            }
        }
    }

    /// Live notes in id order.
    pub fn notes(&self) -> impl Iterator<Item = (NoteId, &Note)> {
        self.notes
            .iter()
            .enumerate()
            .filter_map(|(slot, note)| note.as_ref().map(|note| (NoteId(slot), note)))
    }

    /// Notes with `start <= pulse < end`, ordered by pulse.
    pub fn notes_between(&self, start: u32, end: u32) -> impl Iterator<Item = (NoteId, &Note)> {
        self.index
            .range(start, end)
            .filter_map(|(_, entry)| self.note(entry.id).map(|note| (entry.id, note)))
    }

    /// Notes of `channel` in persisted order, plain notes before drag notes.
    pub fn channel_notes<'a>(&'a self, channel: &'a SoundChannel) -> impl Iterator<Item = &'a Note> {
        channel.ids().filter_map(|id| self.note(id))
    }

    pub fn note_count(&self) -> usize {
        self.index.len()
    }

    pub fn last_pulse(&self) -> Option<u32> {
        self.index.last_pulse()
    }

    pub fn channels(&self) -> &[SoundChannel] {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&SoundChannel> {
        self.channels.iter().find(|channel| channel.name() == name)
    }

    fn channel_position(&self, name: &str) -> Option<usize> {
        self.channels.iter().position(|channel| channel.name() == name)
    }

    pub fn sort_bpm_events(&mut self) {
        self.bpm_events.sort_by_key(|event| event.pulse);
    }

    /// Tempo in effect at `pulse`: the initial BPM, replaced by the latest
    /// event at or before `pulse`.
    pub fn bpm_at(&self, pulse: u32) -> f64 {
        self.bpm_events
            .iter()
            .filter(|event| event.pulse <= pulse)
            .fold(None::<&BpmEvent>, |latest, event| match latest {
                Some(latest) if latest.pulse > event.pulse => Some(latest),
                _ => Some(event),
            })
            .map_or(self.metadata.init_bpm, |event| event.bpm)
    }

    /// Notes sitting strictly inside a linked hold span on the hold's lane.
    ///
    /// Uses the links from the last `rebuild_index` or `relink`.
    pub fn hold_overlaps(&self) -> Vec<HoldOverlap> {
        let mut overlaps = Vec::new();

        for (_, start) in self.notes() {
            if !start.note_type().is_hold_start() {
                continue;
            }
            let Some(end) = start.links().hold_partner else {
                continue;
            };

            overlaps.extend(
                self.index
                    .range(start.pulse + 1, end.pulse)
                    .filter(|(_, entry)| entry.lane == start.lane)
                    .map(|(pulse, entry)| HoldOverlap {
                        hold_start: start.key(),
                        hold_end: end,
                        note: NoteKey::new(pulse, entry.lane),
                    }),
            );
        }

        overlaps.sort_by_key(|overlap| (overlap.hold_start, overlap.note));
        overlaps
    }
}

/// Equality covers persisted content only: metadata, tempo events and each
/// channel's notes in order.
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata
            && self.bpm_events == other.bpm_events
            && self.channels.len() == other.channels.len()
            && self
                .channels
                .iter()
                .zip(&other.channels)
                .all(|(ours, theirs)| {
                    ours.name() == theirs.name()
                        && ours.note_ids().len() == theirs.note_ids().len()
                        && ours.drag_note_ids().len() == theirs.drag_note_ids().len()
                        && self.channel_notes(ours).eq(other.channel_notes(theirs))
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_with_hold() -> (Pattern, NoteId, NoteId) {
        let mut pattern = Pattern::default();
        let start = pattern
            .add_note(Note::new(0, 0, NoteType::HoldStart), "pad.wav")
            .unwrap();
        let end = pattern
            .add_note(Note::new(0, 480, NoteType::HoldEnd), "pad.wav")
            .unwrap();
        (pattern, start, end)
    }

    #[test]
    fn test_add_note_creates_channel_and_indexes() {
        let mut pattern = Pattern::default();
        let id = pattern.add_note(Note::basic(2, 0), "kick.wav").unwrap();

        assert!(pattern.has_note_at(0, 2));
        assert!(!pattern.has_note_at(0, 1));
        assert_eq!(pattern.channels().len(), 1);
        assert_eq!(pattern.channel("kick.wav").unwrap().note_ids(), &[id]);
        assert_eq!(pattern.note(id).unwrap().sound(), "kick.wav");
    }

    #[test]
    fn test_add_note_reuses_channel() {
        let mut pattern = Pattern::default();
        pattern.add_note(Note::basic(0, 0), "kick.wav").unwrap();
        pattern.add_note(Note::basic(1, 240), "snare.wav").unwrap();
        pattern.add_note(Note::basic(0, 480), "kick.wav").unwrap();

        assert_eq!(pattern.channels().len(), 2);
        assert_eq!(pattern.channel("kick.wav").unwrap().len(), 2);
        assert_eq!(pattern.note_count(), 3);
    }

    #[test]
    fn test_drag_note_goes_to_drag_list() {
        let mut pattern = Pattern::default();
        let path = vec![DragNode::new(0, 0), DragNode::new(1, 120)];
        let id = pattern
            .add_note(Note::drag(1, 960, path), "swipe.wav")
            .unwrap();

        let channel = pattern.channel("swipe.wav").unwrap();
        assert!(channel.note_ids().is_empty());
        assert_eq!(channel.drag_note_ids(), &[id]);

        pattern.drag_path_mut(id).unwrap().push(DragNode::new(2, 240));
        assert_eq!(pattern.note(id).unwrap().path().unwrap().len(), 3);
    }

    #[test]
    fn test_lenient_placement_allows_shared_cell() {
        let mut pattern = Pattern::default();
        let first = pattern.add_note(Note::basic(0, 0), "a.wav").unwrap();
        pattern.add_note(Note::basic(0, 0), "b.wav").unwrap();

        assert_eq!(pattern.note_count(), 2);
        assert_eq!(pattern.note_id_at(0, 0), Some(first));
    }

    #[test]
    fn test_strict_placement_rejects_occupied_cell() {
        let mut pattern = Pattern::default();
        pattern.set_placement_policy(PlacementPolicy::Strict);
        pattern.add_note(Note::basic(0, 0), "a.wav").unwrap();

        let err = pattern.add_note(Note::basic(0, 0), "b.wav").unwrap_err();
        assert!(matches!(err, Error::CellOccupied { pulse: 0, lane: 0 }));
        assert_eq!(pattern.note_count(), 1);
        assert!(pattern.channel("b.wav").is_none());
    }

    #[test]
    fn test_add_note_rejects_pulse_past_limit() {
        let mut pattern = Pattern::default();
        let err = pattern
            .add_note(Note::basic(0, MAX_PULSE + 1), "a.wav")
            .unwrap_err();
        assert!(matches!(err, Error::PulseOutOfRange { .. }));
        assert!(pattern.channels().is_empty());
    }

    #[test]
    fn test_delete_note_removes_from_channel_and_index() {
        let mut pattern = Pattern::default();
        let id = pattern.add_note(Note::basic(2, 240), "kick.wav").unwrap();
        let other = pattern.add_note(Note::basic(3, 240), "kick.wav").unwrap();

        let removed = pattern.delete_note(id).unwrap();
        assert_eq!(removed, Note::basic(2, 240));
        assert!(!pattern.has_note_at(240, 2));
        assert!(pattern.has_note_at(240, 3));
        assert_eq!(pattern.channel("kick.wav").unwrap().note_ids(), &[other]);
        assert!(pattern.note(id).is_none());
    }

    #[test]
    fn test_delete_note_twice_is_consistency_error() {
        let mut pattern = Pattern::default();
        let id = pattern.add_note(Note::basic(2, 240), "kick.wav").unwrap();
        pattern.add_note(Note::basic(1, 0), "kick.wav").unwrap();
        pattern.delete_note(id).unwrap();
        let before = pattern.clone();

        let err = pattern.delete_note(id).unwrap_err();
        assert!(err.is_consistency());
        assert_eq!(pattern, before);
        assert_eq!(pattern.note_count(), 1);
    }

    #[test]
    fn test_delete_note_with_missing_channel_changes_nothing() {
        let mut pattern = Pattern::default();
        let id = pattern.add_note(Note::basic(0, 0), "kick.wav").unwrap();
        if let Some(note) = pattern.notes[id.0].as_mut() {
            note.sound = "renamed.wav".to_string();
        }

        let err = pattern.delete_note(id).unwrap_err();
        assert!(matches!(err, Error::ChannelNotFound { .. }));
        assert!(pattern.has_note_at(0, 0));
        assert_eq!(pattern.channel("kick.wav").unwrap().len(), 1);

        // The lenient variant swallows the same failure
        assert!(pattern.delete_note_at(0, 0).is_none());
        assert!(pattern.has_note_at(0, 0));
    }

    #[test]
    fn test_delete_note_at_empty_cell_is_noop() {
        let mut pattern = Pattern::default();
        pattern.add_note(Note::basic(0, 0), "kick.wav").unwrap();
        let before = pattern.clone();

        assert!(pattern.delete_note_at(240, 0).is_none());
        assert!(pattern.delete_note_at(0, 1).is_none());
        assert!(pattern.delete_note_at(1_000_000, 0).is_none());
        assert_eq!(pattern, before);
        assert_eq!(pattern.note_count(), 1);
    }

    #[test]
    fn test_delete_note_at_removes_note() {
        let mut pattern = Pattern::default();
        pattern.add_note(Note::basic(1, 720), "kick.wav").unwrap();

        let removed = pattern.delete_note_at(720, 1).unwrap();
        assert_eq!(removed.sound(), "kick.wav");
        assert_eq!(pattern.note_count(), 0);
        assert!(pattern.channel("kick.wav").unwrap().is_empty());
    }

    #[test]
    fn test_index_agrees_with_channels_after_edits() {
        let mut pattern = Pattern::default();
        let mut ids = Vec::new();
        for i in 0..20u32 {
            let sound = if i % 3 == 0 { "a.wav" } else { "b.wav" };
            ids.push(pattern.add_note(Note::basic(i % 4, i * 120), sound).unwrap());
        }
        for id in ids.iter().step_by(2) {
            pattern.delete_note(*id).unwrap();
        }
        pattern.delete_note_at(120, 1);
        pattern.delete_note_at(5, 5);

        let mut in_channels = 0;
        for channel in pattern.channels() {
            for note in pattern.channel_notes(channel) {
                assert!(pattern.has_note_at(note.pulse, note.lane));
                in_channels += 1;
            }
        }
        assert_eq!(in_channels, pattern.note_count());

        for i in 0..20u32 {
            let present = pattern
                .channels()
                .iter()
                .flat_map(|c| pattern.channel_notes(c))
                .any(|n| n.pulse == i * 120 && n.lane == i % 4);
            assert_eq!(pattern.has_note_at(i * 120, i % 4), present);
        }
    }

    #[test]
    fn test_rebuild_links_hold_pair() {
        let (mut pattern, start, end) = pattern_with_hold();
        pattern.rebuild_index();

        let start_note = pattern.note(start).unwrap();
        let end_note = pattern.note(end).unwrap();
        assert_eq!(start_note.links().hold_partner, Some(NoteKey::new(480, 0)));
        assert_eq!(end_note.links().hold_partner, Some(NoteKey::new(0, 0)));

        let resolved = pattern.resolve(start_note.links().hold_partner.unwrap());
        assert_eq!(resolved.map(Note::note_type), Some(NoteType::HoldEnd));
    }

    #[test]
    fn test_unfinished_hold_has_no_partner() {
        let mut pattern = Pattern::default();
        let start = pattern
            .add_note(Note::new(1, 0, NoteType::HoldStart), "pad.wav")
            .unwrap();
        // End on another lane does not close the hold
        pattern
            .add_note(Note::new(2, 480, NoteType::HoldEnd), "pad.wav")
            .unwrap();
        pattern.relink();

        assert_eq!(pattern.note(start).unwrap().links().hold_partner, None);
    }

    #[test]
    fn test_relink_chain_across_lanes() {
        let mut pattern = Pattern::default();
        let head = pattern
            .add_note(Note::new(0, 0, NoteType::ChainHead), "c.wav")
            .unwrap();
        let second = pattern
            .add_note(Note::new(1, 60, NoteType::Chain), "c.wav")
            .unwrap();
        let third = pattern
            .add_note(Note::new(2, 120, NoteType::Chain), "c.wav")
            .unwrap();
        let new_head = pattern
            .add_note(Note::new(0, 480, NoteType::ChainHead), "c.wav")
            .unwrap();
        pattern.relink();

        let links = |id| *pattern.note(id).unwrap().links();
        assert_eq!(links(head).chain_prev, None);
        assert_eq!(links(head).chain_next, Some(NoteKey::new(60, 1)));
        assert_eq!(links(second).chain_prev, Some(NoteKey::new(0, 0)));
        assert_eq!(links(second).chain_next, Some(NoteKey::new(120, 2)));
        assert_eq!(links(third).chain_next, None);
        assert_eq!(links(new_head).chain_prev, None);
    }

    #[test]
    fn test_relink_repeat_with_hold() {
        let mut pattern = Pattern::default();
        let head = pattern
            .add_note(Note::new(3, 0, NoteType::RepeatHeadHold), "r.wav")
            .unwrap();
        let end = pattern
            .add_note(Note::new(3, 240, NoteType::RepeatHoldEnd), "r.wav")
            .unwrap();
        let repeat = pattern
            .add_note(Note::new(3, 480, NoteType::Repeat), "r.wav")
            .unwrap();
        let repeat_hold = pattern
            .add_note(Note::new(3, 720, NoteType::RepeatHoldStart), "r.wav")
            .unwrap();
        let other_lane = pattern
            .add_note(Note::new(2, 600, NoteType::Repeat), "r.wav")
            .unwrap();
        pattern.relink();

        let links = |id| *pattern.note(id).unwrap().links();
        assert_eq!(links(head).hold_partner, Some(NoteKey::new(240, 3)));
        assert_eq!(links(end).hold_partner, Some(NoteKey::new(0, 3)));
        assert_eq!(links(end).repeat_prev, None);
        assert_eq!(links(head).repeat_next, Some(NoteKey::new(480, 3)));
        assert_eq!(links(repeat).repeat_prev, Some(NoteKey::new(0, 3)));
        assert_eq!(links(repeat).repeat_next, Some(NoteKey::new(720, 3)));
        assert_eq!(links(repeat_hold).repeat_prev, Some(NoteKey::new(480, 3)));
        assert_eq!(links(repeat_hold).hold_partner, None);
        assert_eq!(links(other_lane).repeat_prev, None);
    }

    #[test]
    fn test_notes_between() {
        let mut pattern = Pattern::default();
        pattern.add_note(Note::basic(0, 960), "a.wav").unwrap();
        pattern.add_note(Note::basic(0, 0), "a.wav").unwrap();
        pattern.add_note(Note::basic(1, 480), "a.wav").unwrap();

        let pulses: Vec<u32> = pattern
            .notes_between(0, 961)
            .map(|(_, note)| note.pulse)
            .collect();
        assert_eq!(pulses, vec![0, 480, 960]);
        assert_eq!(pattern.notes_between(1, 480).count(), 0);
        assert_eq!(pattern.last_pulse(), Some(960));
    }

    #[test]
    fn test_bpm_at() {
        let mut pattern = Pattern::default();
        pattern.metadata.init_bpm = 120.0;
        pattern.bpm_events = vec![BpmEvent::new(960, 180.0), BpmEvent::new(480, 150.0)];

        assert_eq!(pattern.bpm_at(0), 120.0);
        assert_eq!(pattern.bpm_at(480), 150.0);
        assert_eq!(pattern.bpm_at(700), 150.0);
        assert_eq!(pattern.bpm_at(5000), 180.0);

        pattern.sort_bpm_events();
        assert_eq!(pattern.bpm_events[0].pulse, 480);
    }

    #[test]
    fn test_hold_overlaps_reports_inner_notes() {
        let (mut pattern, _, _) = pattern_with_hold();
        pattern.add_note(Note::basic(0, 240), "kick.wav").unwrap();
        pattern.add_note(Note::basic(1, 240), "kick.wav").unwrap();
        pattern.add_note(Note::basic(0, 480 + 240), "kick.wav").unwrap();
        pattern.relink();

        let overlaps = pattern.hold_overlaps();
        assert_eq!(
            overlaps,
            vec![HoldOverlap {
                hold_start: NoteKey::new(0, 0),
                hold_end: NoteKey::new(480, 0),
                note: NoteKey::new(240, 0),
            }]
        );
    }

    #[test]
    fn test_reload_drops_deleted_slots() {
        let mut pattern = Pattern::default();
        for pulse in 0..50u32 {
            let id = pattern.add_note(Note::basic(0, pulse), "a.wav").unwrap();
            if pulse % 10 != 0 {
                pattern.delete_note(id).unwrap();
            }
        }
        assert_eq!(pattern.notes.len(), 50);

        let reloaded = Pattern::try_from(crate::format::PatternV1::from(&pattern)).unwrap();
        assert_eq!(reloaded.notes.len(), 5);
        assert_eq!(reloaded.note_count(), 5);
        assert_eq!(reloaded, pattern);
    }

    #[test]
    fn test_equality_ignores_ids_and_tombstones() {
        let mut edited = Pattern::default();
        let id = edited.add_note(Note::basic(0, 0), "kick.wav").unwrap();
        edited.add_note(Note::basic(1, 240), "kick.wav").unwrap();
        edited.delete_note(id).unwrap();

        let mut fresh = Pattern::default();
        fresh.add_note(Note::basic(1, 240), "kick.wav").unwrap();

        assert_eq!(edited, fresh);
        fresh.metadata.level = 9;
        assert_ne!(edited, fresh);
    }
}
