//! Check command for validating a track file.

use anyhow::{Result, bail};
use chartkit::{HoldOverlap, Track, clone_track, load_track};
use owo_colors::OwoColorize;

/// Problems found in one pattern.
#[derive(Debug, Default)]
pub struct PatternReport {
    pub name: String,
    pub overlaps: Vec<HoldOverlap>,
    /// Cells claimed by more than one note.
    pub shared_cells: usize,
}

impl PatternReport {
    pub fn is_clean(&self) -> bool {
        self.overlaps.is_empty() && self.shared_cells == 0
    }
}

pub fn run(file: &str) -> Result<()> {
    let track = load_track(file)?;

    let copy = clone_track(&track)?;
    if copy != track {
        bail!("{} does not survive a save/load cycle unchanged", file);
    }

    let reports = inspect(&track);
    let mut problems = 0;
    for report in &reports {
        if report.is_clean() {
            println!("{} {}", "ok".green(), report.name);
            continue;
        }
        problems += 1;
        println!("{} {}", "warn".yellow(), report.name);
        for overlap in &report.overlaps {
            println!(
                "    note at {} lies inside hold {} -> {}",
                overlap.note, overlap.hold_start, overlap.hold_end
            );
        }
        if report.shared_cells > 0 {
            println!("    {} cells hold more than one note", report.shared_cells);
        }
    }

    if problems > 0 {
        bail!("{} of {} patterns have problems", problems, reports.len());
    }
    Ok(())
}

pub fn inspect(track: &Track) -> Vec<PatternReport> {
    track
        .patterns
        .iter()
        .map(|pattern| {
            let mut cells: Vec<_> = pattern.notes().map(|(_, note)| note.key()).collect();
            let total = cells.len();
            cells.sort();
            cells.dedup();

            PatternReport {
                name: pattern.metadata.pattern_name.clone(),
                overlaps: pattern.hold_overlaps(),
                shared_cells: total - cells.len(),
            }
        })
        .collect()
}
