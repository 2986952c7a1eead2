//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.
//!
//! Boolean flags backed by environment variables treat any value other
//! than an empty string, `0`, `false`, `no`, `off` or `n` as set.

use clap::builder::FalseyValueParser;
use clap::Parser;
use std::path::PathBuf;

use crate::config::LauncherConfig;
use crate::ui::OutputMode;

/// Launchkit - Prepare a Python runtime and start the application.
#[derive(Debug, Parser)]
#[command(name = "launchkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default launchkit.yml)
    #[arg(short, long, env = "LAUNCHKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, env = "LAUNCHKIT_PROJECT")]
    pub project: Option<PathBuf>,

    /// Exit without waiting for a key press
    #[arg(long, env = "LAUNCHKIT_NO_PAUSE", value_parser = FalseyValueParser::new())]
    pub no_pause: bool,

    /// Abort when dependencies fail to install and report the application's exit code
    #[arg(long, env = "LAUNCHKIT_STRICT", value_parser = FalseyValueParser::new())]
    pub strict: bool,

    /// Minimal output
    #[arg(short, long, env = "LAUNCHKIT_QUIET", value_parser = FalseyValueParser::new())]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Output mode selected by the flags.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }

    /// Layer the flags over a loaded configuration.
    ///
    /// Flags only ever switch behavior on; an absent flag leaves the
    /// file's value alone.
    pub fn apply_overrides(&self, config: &mut LauncherConfig) {
        if self.no_pause {
            config.pause_on_exit = false;
        }
        if self.strict {
            config.strict = true;
        }
    }
}
