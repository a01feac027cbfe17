//! distfix CLI - static deploy finalizer
//!
//! Usage: distfix [OPTIONS] [-- <COMMAND>...]
//!
//! Runs the bundler (`npx vite build` by default), flattens `dist/public`
//! into `dist`, and requires `dist/index.html`. Exits 1 on any failure.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use distfix::presentation::Cli;
use distfix::{FinalizeConfig, FinalizeUseCase, SystemCommandRunner};

mod ui;

use ui::console::ConsoleEventSink;
use ui::context::UiContext;
use ui::views::finalize::{render_error, render_header};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ui = UiContext::new(cli.verbose, cli.color);
    match run(&cli, ui) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", render_error(&err, ui.color, ui.unicode));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, ui: UiContext) -> Result<()> {
    let config = cli.apply_to(FinalizeConfig::default().apply_env());
    tracing::debug!(?config, "resolved configuration");

    print!("{}", render_header(&config, ui.color, ui.unicode));

    let use_case = FinalizeUseCase::new(SystemCommandRunner::new());
    let report = use_case.execute_with_events(&config, &ConsoleEventSink::new(ui))?;
    tracing::info!(
        relocated = report.relocated.len(),
        entries = report.entries.len(),
        flat = report.flat,
        "finalize complete"
    );
    Ok(())
}

/// `RUST_LOG` wins; otherwise verbosity picks the level.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "off",
        1 => "distfix=debug",
        _ => "distfix=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
