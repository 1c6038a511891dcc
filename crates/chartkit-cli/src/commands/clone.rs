//! Clone command for copying a track into a new file.

use anyhow::{Result, bail};
use chartkit::{clone_track, load_track, save_track_with};
use std::path::Path;

use crate::settings::Settings;

pub fn run(input: &str, output: &str, title: Option<&str>, settings: &Settings) -> Result<()> {
    if Path::new(output).exists() {
        bail!("{} already exists", output);
    }

    let track = load_track(input)?;
    let mut copy = clone_track(&track)?;
    if let Some(title) = title {
        copy.metadata.title = title.to_string();
    }

    save_track_with(output, &copy, settings.pretty)?;
    eprintln!("Copied {} to {}", input, output);
    Ok(())
}
