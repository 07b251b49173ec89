use crate::error::Result;
use crate::invoke::{CommandTemplate, Launcher, Outcome};
use crate::types::ColorTriple;

use std::path::PathBuf;

use indicatif::ProgressBar;
use log::warn;

#[derive(Debug)]
pub struct FailedRun {
    pub image: PathBuf,
    pub triple: ColorTriple,
    pub outcome: Outcome,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub attempted: usize,
    pub succeeded: usize,
    failed: Vec<FailedRun>,
}

impl Summary {
    pub fn failed(&self) -> &[FailedRun] {
        &self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Invokes the program once for every triple and every image, triples in the
/// outer loop. A failing run is recorded and the loop carries on; only a
/// program that cannot be started at all stops it.
pub fn drive<L: Launcher>(
    triples: &[ColorTriple],
    images: &[PathBuf],
    template: &CommandTemplate,
    launcher: &mut L,
    pb: &ProgressBar,
) -> Result<Summary> {
    let mut summary = Summary::default();
    pb.set_length((triples.len() * images.len()) as u64);

    for triple in triples {
        for image in images {
            pb.set_message(format!("{} with {}", image.display(), triple));
            let invocation = template.build(image, triple);

            let outcome = pb.suspend(|| launcher.launch(&invocation))?;
            summary.attempted += 1;

            match outcome {
                Outcome::Success => summary.succeeded += 1,
                Outcome::Failure(code) => {
                    match code {
                        Some(code) => warn!("{} exited with status {}", invocation.render(), code),
                        None => warn!("{} was terminated by a signal", invocation.render()),
                    }
                    summary.failed.push(FailedRun {
                        image: image.clone(),
                        triple: triple.clone(),
                        outcome,
                    });
                }
            }
            pb.inc(1);
        }
    }

    Ok(summary)
}
