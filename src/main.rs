mod colors;
mod config;
mod constants;
mod discover;
mod driver;
mod error;
mod invoke;
mod types;
mod utils;

use crate::colors::{load_triples, validate_hex};
use crate::discover::find_images;
use crate::driver::{drive, Summary};
use crate::invoke::{CommandTemplate, DryRunLauncher, ProcessLauncher};
use crate::types::AppConfig;

use std::io;

use anyhow::{bail, Context, Result};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = crate::config::init().context("failed to load configuration")?;
    let summary = run(&config)?;

    info!(
        "{} of {} runs succeeded",
        summary.succeeded, summary.attempted
    );
    for failed in summary.failed() {
        error!(
            "failed: {} with {} ({:?})",
            failed.image.display(),
            failed.triple,
            failed.outcome
        );
    }

    if config.strict && !summary.all_succeeded() {
        bail!(
            "{} of {} runs failed",
            summary.failed().len(),
            summary.attempted
        );
    }

    Ok(())
}

fn run(config: &AppConfig) -> Result<Summary> {
    let triples = load_triples(&config.colors_path)?;
    if config.check_hex {
        validate_hex(&triples)?;
    }
    let images = find_images(&config.image_dir, &config.extensions)?;
    info!(
        "{} color triples x {} images from {}",
        triples.len(),
        images.len(),
        config.image_dir.display()
    );

    let template = CommandTemplate {
        program: config.program.clone(),
        leading_args: config.program_args.clone(),
        plot: true,
    };

    let summary = if config.dry_run {
        let mut launcher = DryRunLauncher::new(io::stdout().lock());
        drive(&triples, &images, &template, &mut launcher, &ProgressBar::hidden())?
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
                .progress_chars("#>-"),
        );
        let summary = drive(&triples, &images, &template, &mut ProcessLauncher, &pb)?;
        pb.finish_with_message(format!("Finished {} runs", summary.attempted));
        summary
    };

    Ok(summary)
}
