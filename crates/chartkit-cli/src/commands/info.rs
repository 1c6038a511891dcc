//! Info command for summarizing a track file.

use anyhow::Result;
use chartkit::{PULSES_PER_BEAT, Pattern, Track, load_track};
use serde_json::json;

pub fn run(file: &str, as_json: bool) -> Result<()> {
    let track = load_track(file)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary_json(&track))?);
    } else {
        print!("{}", summary_text(&track));
    }
    Ok(())
}

fn beats(pattern: &Pattern) -> f64 {
    pattern
        .last_pulse()
        .map_or(0.0, |pulse| f64::from(pulse) / f64::from(PULSES_PER_BEAT))
}

pub fn summary_text(track: &Track) -> String {
    let metadata = &track.metadata;
    let mut lines = vec![
        format!("Title:    {}", metadata.title),
        format!("Artist:   {}", metadata.artist),
        format!("Genre:    {}", metadata.genre),
        format!("Version:  {}", track.version()),
        format!(
            "Preview:  {} ({:.2}s - {:.2}s)",
            metadata.preview_track, metadata.preview_start_time, metadata.preview_end_time
        ),
        format!("Patterns: {}", track.patterns.len()),
    ];

    for pattern in &track.patterns {
        let pm = &pattern.metadata;
        lines.push(format!(
            "  [{} Lv.{}] {} - {} notes, {} channels, {:.1} beats, {} BPM",
            pm.control_scheme,
            pm.level,
            pm.pattern_name,
            pattern.note_count(),
            pattern.channels().len(),
            beats(pattern),
            pm.init_bpm
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn summary_json(track: &Track) -> serde_json::Value {
    let patterns: Vec<_> = track
        .patterns
        .iter()
        .map(|pattern| {
            let pm = &pattern.metadata;
            let channels: Vec<&str> = pattern.channels().iter().map(|c| c.name()).collect();
            json!({
                "name": pm.pattern_name,
                "controlScheme": pm.control_scheme.to_string(),
                "level": pm.level,
                "notes": pattern.note_count(),
                "channels": channels,
                "lastPulse": pattern.last_pulse(),
                "initBpm": pm.init_bpm,
                "bpmEvents": pattern.bpm_events.len(),
            })
        })
        .collect();

    json!({
        "version": track.version(),
        "title": track.metadata.title,
        "artist": track.metadata.artist,
        "genre": track.metadata.genre,
        "patterns": patterns,
    })
}
