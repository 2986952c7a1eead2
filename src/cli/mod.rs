//! Command-line interface.
//!
//! The launcher has no subcommands. Every flag is optional and falls back
//! to the configuration file, then to the built-in defaults.

pub mod args;

pub use args::Cli;
