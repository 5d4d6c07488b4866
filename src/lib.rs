//! dupescan - Duplicate File Finder
//!
//! A cross-platform CLI tool and library for finding and eliminating
//! duplicate files by content hashing (BLAKE3). Files are grouped by the
//! digest of their full byte content; the first-discovered file in each
//! group is the keeper and every other member is a deletable duplicate.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::sync::Arc;

use anyhow::Result;
use bytesize::ByteSize;

use crate::actions::{delete_duplicates, DeleteConfig};
use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::progress::Progress;
use crate::scanner::WalkerConfig;

/// Run the application with parsed CLI arguments.
///
/// Returns the exit code to report on success; errors bubble up to `main`
/// which maps them to exit codes and renders them (optionally as JSON).
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        yansi::disable();
    }

    let handler = signal::install_handler()?;

    let walker_config = WalkerConfig {
        recursive: !cli.no_recurse,
        follow_symlinks: cli.follow_symlinks,
        min_size: cli.min_size,
    };

    let mut config = FinderConfig::default()
        .with_walker_config(walker_config)
        .with_io_threads(cli.io_threads)
        .with_shutdown_flag(handler.get_flag());

    if !cli.quiet {
        config = config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let finder = DuplicateFinder::new(config);
    let (set, summary) = finder.find_duplicates(&cli.path)?;

    match cli.output {
        OutputFormat::Text => print!("{}", output::text::render(&set, cli.show_size)),
        OutputFormat::Json => println!("{}", output::json::render(&set, &summary)?),
    }

    if cli.dry_run {
        let report = delete_duplicates(&set, &DeleteConfig::dry_run());
        println!(
            "\nDry run: would delete {} file(s), freeing {}",
            report.deleted_count,
            ByteSize::b(report.freed_bytes)
        );
    } else if cli.delete && !set.is_empty() {
        log::info!("Deleting duplicate files...");
        let report = delete_duplicates(&set, &DeleteConfig::default());
        println!("{}", report.summary());
    }

    if summary.interrupted {
        return Ok(ExitCode::Interrupted);
    }

    Ok(ExitCode::Success)
}
