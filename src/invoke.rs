use crate::constants::{COLOR_FLAG, PLOT_FLAG};
use crate::error::{AppError, Result};
use crate::types::ColorTriple;
use crate::utils::render_command;

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn render(&self) -> String {
        render_command(&self.program, &self.args)
    }
}

/// What to run for every (image, triple) pair.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    pub program: String,
    /// Placed before the image path, e.g. the script for an interpreter.
    pub leading_args: Vec<String>,
    pub plot: bool,
}

impl CommandTemplate {
    pub fn build(&self, image: &Path, triple: &ColorTriple) -> Invocation {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        args.push(image.as_os_str().to_os_string());
        for color in triple.tokens() {
            args.push(COLOR_FLAG.into());
            args.push(color.into());
        }
        if self.plot {
            args.push(PLOT_FLAG.into());
        }

        Invocation {
            program: self.program.clone(),
            args,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Exit code, or `None` if the process was killed by a signal.
    Failure(Option<i32>),
}

pub trait Launcher {
    fn launch(&mut self, invocation: &Invocation) -> Result<Outcome>;
}

/// Runs the program and waits for it. Stdio is inherited.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<Outcome> {
        debug!("running {}", invocation.render());

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|source| AppError::Launch {
                program: invocation.program.clone(),
                source,
            })?;

        Ok(if status.success() {
            Outcome::Success
        } else {
            Outcome::Failure(status.code())
        })
    }
}

/// Prints each command line instead of running it.
pub struct DryRunLauncher<W: Write> {
    out: W,
}

impl<W: Write> DryRunLauncher<W> {
    pub fn new(out: W) -> Self {
        DryRunLauncher { out }
    }
}

impl<W: Write> Launcher for DryRunLauncher<W> {
    fn launch(&mut self, invocation: &Invocation) -> Result<Outcome> {
        writeln!(self.out, "{}", invocation.render()).map_err(|source| AppError::Write {
            target: "dry-run output".to_string(),
            source,
        })?;
        Ok(Outcome::Success)
    }
}
