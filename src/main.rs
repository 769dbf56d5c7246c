use anyhow::Context;
use clap::Parser;
use image_optimizer::{validate_root, BatchProcessor, CancelToken, Cli, OptimizerError};
use log::LevelFilter;
use std::path::absolute;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    let mut config = cli.into_config();
    config.directory = absolute(&config.directory)
        .with_context(|| format!("Cannot resolve {}", config.directory.display()))?;

    if let Err(e) = validate_root(&config.directory) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    let cancel = CancelToken::new();
    sigint(cancel.clone());

    let batch = BatchProcessor::new(config)
        .context("Invalid configuration")?
        .with_cancel_token(cancel);

    let summary = batch.run()?;
    if summary.cancelled {
        return Err(OptimizerError::Cancelled.into());
    }

    Ok(())
}

/// Ctrl-C stops the run after the files already in flight.
fn sigint(cancel: CancelToken) {
    let result = ctrlc::set_handler(move || {
        if cancel.cancel() {
            log::warn!("Interrupted, finishing images in progress...");
        }
    });

    if let Err(e) = result {
        log::debug!("Could not install Ctrl-C handler: {}", e);
    }
}
