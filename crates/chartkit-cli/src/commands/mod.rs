//! Subcommand implementations.

pub mod check;
pub mod clone;
pub mod edit;
pub mod info;
pub mod new;
