mod cli;
mod commands;
mod settings;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use settings::Settings;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (defaults to warn when RUST_LOG is unset)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chartkit_cli=warn,chartkit=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = match args.config.as_deref() {
        Some(path) => Settings::load(path)?,
        None if Path::new(settings::DEFAULT_SETTINGS_FILE).exists() => {
            Settings::load(settings::DEFAULT_SETTINGS_FILE)?
        }
        None => Settings::default(),
    };

    match args.command {
        Command::New {
            output,
            title,
            artist,
            pattern,
            scheme,
            level,
        } => commands::new::run(
            &output,
            &title,
            &artist,
            pattern.as_deref(),
            scheme,
            level,
            &settings,
        ),
        Command::Info { file, json } => commands::info::run(&file, json),
        Command::Check { file } => commands::check::run(&file),
        Command::Clone {
            input,
            output,
            title,
        } => commands::clone::run(&input, &output, title.as_deref(), &settings),
        Command::AddNote {
            file,
            pattern,
            lane,
            pulse,
            note_type,
            sound,
        } => commands::edit::add_note(
            &file, &pattern, lane, pulse, note_type, &sound, &settings,
        ),
        Command::DeleteNote {
            file,
            pattern,
            lane,
            pulse,
        } => {
            let removed = commands::edit::delete_note(&file, &pattern, lane, pulse, &settings)?;
            if !removed {
                warn!("No note at pulse {} lane {}", pulse, lane);
            }
            Ok(())
        }
    }
}
