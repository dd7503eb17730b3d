// src/lib.rs

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod shutdown;
pub mod types;
pub mod workdir;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, load_and_validate};
use crate::engine::{Engine, LoopOptions, Registry, run_once};
use crate::exec::{ProcessRunner, Runner};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - working-directory resolution
/// - config loading and CLI overrides
/// - the task registry and one loop per task
/// - the terminal renderer
/// - SIGINT/SIGTERM handling and a joined shutdown
pub async fn run(args: CliArgs) -> Result<()> {
    workdir::apply(args.workdir.as_deref(), args.exe_dir)?;

    let mut cfg = load_and_validate(&args.config)
        .with_context(|| format!("loading config from {:?}", args.config))?;
    if let Some(timeout) = args.run_timeout {
        cfg.config.run_timeout = timeout;
    }
    if let Some(refresh) = args.refresh {
        cfg.config.refresh = refresh;
    }

    for (idx, task) in cfg.tasks().iter().enumerate() {
        info!(task = idx, interval = ?task.interval, path = %task.path.display(), "task configured");
    }

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let settings = cfg.config;
    let registry = Arc::new(Registry::new(cfg.into_tasks())?);
    let runner: Arc<dyn Runner> = Arc::new(ProcessRunner::new(settings.run_timeout));

    if args.once {
        run_once(&registry, runner).await?;
        print!("{}", display::render_frame(&registry.snapshot()));
        return Ok(());
    }

    let options = LoopOptions {
        first_run: settings.first_run,
    };
    let engine = Engine::start(Arc::clone(&registry), runner, options);

    tokio::select! {
        res = display::run_renderer(Arc::clone(&registry), settings.refresh) => {
            res.context("rendering output")?;
        }
        res = shutdown::wait_for_signal() => {
            res.context("listening for termination signals")?;
        }
    }

    info!("waiting for task loops to finish");
    engine.shutdown().await?;
    Ok(())
}

/// Simple dry-run output: print settings and tasks.
fn print_dry_run(cfg: &ConfigFile) {
    println!("xtatus dry-run");
    println!("  config.run_timeout = {:?}", cfg.config.run_timeout);
    println!("  config.first_run = {:?}", cfg.config.first_run);
    println!("  config.refresh = {:?}", cfg.config.refresh);
    println!();

    println!("tasks ({}):", cfg.tasks().len());
    for task in cfg.tasks() {
        println!("  - {}", task.path.display());
        println!("      interval: {:?}", task.interval);
    }

    debug!("dry-run complete (no execution)");
}
