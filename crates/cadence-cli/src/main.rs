//! Cadence CLI Application
//!
//! Command-line front end and scheduler service for the cadence engine.

mod args;
mod cli;
mod renderer;
mod service;
mod shell;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use args::{Args, Commands, ReportArgs};
use cadence_core::{EngineConfig, PlannerBuilder};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use shell::ShellExecutor;
use Commands::*;

/// How long shutdown waits for executor threads still on the blocking pool.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    env_logger::init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(run());
    // A command past its deadline may still be winding down; do not wait for it.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn run() -> Result<()> {
    let Args {
        data_dir,
        config,
        no_color,
        command,
    } = Args::parse();

    let mut config =
        EngineConfig::load(config.as_deref()).context("Failed to load configuration")?;
    if data_dir.is_some() {
        config.data_dir = data_dir;
    }

    let planner = PlannerBuilder::from_config(&config)
        .and_then(PlannerBuilder::build)
        .context("Failed to initialize planner")?;
    planner
        .load_tasks()
        .await
        .context("Failed to load saved tasks")?;

    let executor = Arc::new(
        ShellExecutor::new(config.shell.as_str()).with_timeout(config.executor_timeout()?),
    );
    let renderer = TerminalRenderer::new(!no_color);

    info!("Cadence started");

    let cli = Cli::new(planner, renderer);
    match command {
        Some(Submit(args)) => cli.submit(args).await,
        Some(Sweep) => cli.sweep(executor).await,
        Some(Report(args)) => cli.report(args),
        Some(List) => cli.list(),
        Some(Remove(args)) => cli.remove(args).await,
        Some(History(args)) => cli.history(args),
        Some(Serve) => {
            let sweep_interval = config.sweep_interval()?;
            service::serve(Arc::new(cli.into_planner()), executor, sweep_interval)
                .await
                .context("Scheduler service failed")
        }
        None => cli.report(ReportArgs::default()),
    }
}
