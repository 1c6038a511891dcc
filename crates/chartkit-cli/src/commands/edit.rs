//! Note editing commands. Each loads the track, applies one edit and saves.

use anyhow::{Context, Result};
use chartkit::{Note, NoteType, Pattern, Track, load_track, save_track_with};

use crate::settings::Settings;

fn pattern_mut<'a>(track: &'a mut Track, name: &str) -> Result<&'a mut Pattern> {
    track
        .find_pattern_mut(name)
        .with_context(|| format!("Pattern {:?} not found", name))
}

pub fn add_note(
    file: &str,
    pattern: &str,
    lane: u32,
    pulse: u32,
    note_type: NoteType,
    sound: &str,
    settings: &Settings,
) -> Result<()> {
    let mut track = load_track(file)?;
    let target = pattern_mut(&mut track, pattern)?;
    target.set_placement_policy(settings.placement);

    let id = target.add_note(Note::new(lane, pulse, note_type), sound)?;
    target.relink();
    eprintln!("Added {} note {} at pulse {} lane {}", note_type, id, pulse, lane);

    save_track_with(file, &track, settings.pretty)?;
    Ok(())
}

/// Returns whether a note was removed.
pub fn delete_note(
    file: &str,
    pattern: &str,
    lane: u32,
    pulse: u32,
    settings: &Settings,
) -> Result<bool> {
    let mut track = load_track(file)?;
    let target = pattern_mut(&mut track, pattern)?;

    let Some(note) = target.delete_note_at(pulse, lane) else {
        return Ok(false);
    };
    eprintln!(
        "Deleted {} note at pulse {} lane {} from {:?}",
        note.note_type(),
        pulse,
        lane,
        note.sound()
    );

    save_track_with(file, &track, settings.pretty)?;
    Ok(true)
}
