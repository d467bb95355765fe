//! `secvul export`

use std::sync::Arc;

use anyhow::{Context, Result};
use secvul_core::config::SecvulConfig;
use secvul_core::events::EventDispatcher;
use secvul_extract::ExportPipeline;

use crate::args::{Cli, ExportArgs};
use crate::progress::LogProgressHandler;

pub fn run(cli: &Cli, args: &ExportArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = SecvulConfig::load(&cwd, cli.config.as_deref(), Some(&args.overrides()))
        .context("failed to load configuration")?;
    let settings = config
        .export
        .settings(cli.verbose)
        .context("no store given; pass --db or set export.db_path")?;
    let out_path = settings.out_path.clone();

    let mut events = EventDispatcher::new();
    events.register(Arc::new(LogProgressHandler));

    let stats = ExportPipeline::new(settings)
        .with_events(events)
        .run()
        .with_context(|| format!("export to {} failed", out_path.display()))?;

    println!(
        "scanned={} emitted={} skipped_cosmetic={} pages={} cap_reached={} duration_ms={} out={}",
        stats.scanned,
        stats.emitted,
        stats.skipped_cosmetic,
        stats.pages,
        stats.cap_reached,
        stats.duration_ms,
        out_path.display()
    );
    Ok(())
}
