mod guard;
mod migrate;
mod preflight;
mod render;
mod report;


use anyhow::Result;
use clap::Parser;
use flatshift_core::{builtin_catalog, RunOptions};
use flatshift_sources::SystemPackageOps;

use crate::guard::{default_lock_path, RunGuard};
use crate::migrate::run_migration;
use crate::preflight::{ensure_interactive_terminal, ensure_root, TerminalSession};
use crate::render::TerminalRenderer;
use crate::report::ReportAggregator;

#[derive(Parser, Debug)]
#[command(name = "flatshift")]
#[command(about = "Migrate apt and snap applications to Flatpak", long_about = None)]
struct Cli {
    #[arg(long)]
    install_only_missing: bool,
}

fn main() -> Result<()> {
    run_cli(Cli::parse())
}

fn run_cli(cli: Cli) -> Result<()> {
    if ensure_interactive_terminal()? == TerminalSession::Relaunched {
        return Ok(());
    }
    ensure_root()?;

    let guard = RunGuard::acquire(default_lock_path())?;
    guard.install_signal_release()?;

    let renderer = TerminalRenderer::current();
    let catalog = builtin_catalog()?;
    let options = RunOptions {
        install_only_missing: cli.install_only_missing,
    };
    let mut ops = SystemPackageOps;
    let mut report = ReportAggregator::new();

    run_migration(&mut ops, &catalog, &options, &mut report, renderer)?;
    guard.release();

    renderer.print_section("migration report");
    renderer.print_lines(&report.render_lines(renderer.style()));
    Ok(())
}
