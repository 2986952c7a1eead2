//! Launchkit CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use launchkit::cli::Cli;
use launchkit::config::load_config;
use launchkit::messages::{Locale, Messages};
use launchkit::runner::{report_config_failure, LaunchReport, Launcher};
use launchkit::shell::{is_ci, SystemRunner};
use launchkit::ui::TerminalUI;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("launchkit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("launchkit=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Launchkit starting with args: {:?}", cli);

    let mut ui = TerminalUI::new(cli.output_mode(), !cli.no_color);

    // Determine project root
    let project_root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    // Nobody is there to press a key in CI
    let ci = is_ci();

    let mut config = match load_config(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let messages = Messages::new(Locale::detect());
            let pause = !cli.no_pause && !ci;
            let code = report_config_failure(&e, &messages, pause, &mut ui);
            return ExitCode::from(LaunchReport::narrow_exit_code(code));
        }
    };
    cli.apply_overrides(&mut config);
    if ci {
        config.pause_on_exit = false;
    }

    let mut runner = SystemRunner::new();
    let report = Launcher::new(&config, &project_root).run(&mut runner, &mut ui);

    tracing::debug!("Visited stages: {:?}", report.stages);
    ExitCode::from(report.process_exit_code())
}
