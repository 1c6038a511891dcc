//! Create command for starting a new track file.

use anyhow::{Result, bail};
use chartkit::{ControlScheme, Pattern, PatternMetadata, Track, save_track_with};
use std::path::Path;

use crate::settings::Settings;

pub fn run(
    output: &str,
    title: &str,
    artist: &str,
    pattern: Option<&str>,
    scheme: ControlScheme,
    level: u32,
    settings: &Settings,
) -> Result<()> {
    if Path::new(output).exists() {
        bail!("{} already exists", output);
    }

    let mut track = Track::new(title, artist);
    if let Some(name) = pattern {
        track.add_pattern(Pattern::new(PatternMetadata {
            pattern_name: name.to_string(),
            control_scheme: scheme,
            level,
            ..PatternMetadata::default()
        }));
    }

    save_track_with(output, &track, settings.pretty)?;
    eprintln!("Created {} ({} - {})", output, artist, title);
    Ok(())
}
