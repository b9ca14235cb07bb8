use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use lcars_panel::panel::{
    render::ProbeShape,
    runtime::{run, RunOptions},
};
use tracing_subscriber::EnvFilter;

/// Status board for MQTT events on a Linux framebuffer with a touch overlay.
#[derive(Debug, Parser)]
#[command(name = "lcars-panel", version)]
struct Cli {
    /// TOML settings file; environment variables override it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Draw one frame of sample messages and exit.
    #[arg(long, conflicts_with = "probe")]
    demo: bool,
    /// Draw a geometry probe and exit.
    #[arg(long, value_enum, value_name = "SHAPE")]
    probe: Option<ProbeShape>,
    /// Fill the probe shape instead of outlining it.
    #[arg(long, requires = "probe")]
    fill: bool,
    /// Render into memory instead of the framebuffer.
    #[arg(long)]
    headless: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let options = RunOptions {
        config: cli.config,
        demo: cli.demo,
        probe: cli.probe,
        fill: cli.fill,
        headless: cli.headless,
    };
    run(options).context("panel stopped with an error")
}
