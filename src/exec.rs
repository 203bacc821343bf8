//! Command executor — runs composer commands one after another.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::args::CommandSpec;
use crate::error::CgrError;

/// Where child process output goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Share cgr's stdout and stderr.
    #[default]
    Inherit,
    /// Send stdout and stderr of every command to this file.
    File(PathBuf),
}

/// Runs a command list in order, stopping at the first failure.
///
/// Nothing is rolled back: projects installed by earlier commands stay
/// installed when a later one fails.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    output: OutputTarget,
}

impl CommandExecutor {
    pub fn new(output: OutputTarget) -> Self {
        Self { output }
    }

    /// Run every command and return the first non-zero exit code, or 0.
    pub fn run_all(&self, commands: &[CommandSpec]) -> Result<i32, CgrError> {
        let log_file = match &self.output {
            OutputTarget::Inherit => None,
            OutputTarget::File(path) => Some((path.as_path(), open_output(path)?)),
        };

        for command in commands {
            let status = run_one(command, log_file.as_ref().map(|(p, f)| (*p, f)))?;
            let code = exit_code(status);
            if code != 0 {
                tracing::warn!(%command, code, "command failed, skipping remaining commands");
                return Ok(code);
            }
        }
        Ok(0)
    }
}

fn run_one(spec: &CommandSpec, log_file: Option<(&Path, &File)>) -> Result<ExitStatus, CgrError> {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args).envs(spec.env.iter().map(|(k, v)| (k, v)));

    if let Some(dir) = &spec.cwd {
        fs::create_dir_all(dir).map_err(|e| CgrError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;
        cmd.current_dir(dir);
    }

    if let Some((path, file)) = log_file {
        cmd.stdout(redirect(path, file)?)
            .stderr(redirect(path, file)?);
    }

    tracing::info!(command = %spec, "running");
    cmd.status().map_err(|e| CgrError::Spawn {
        program: spec.program.clone(),
        source: e,
    })
}

fn open_output(path: &Path) -> Result<File, CgrError> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| CgrError::OutputFile {
            path: path.to_path_buf(),
            source: e,
        })
}

fn redirect(path: &Path, file: &File) -> Result<Stdio, CgrError> {
    // Cloned handles share one file offset, so output from successive
    // commands is appended in order.
    let clone = file.try_clone().map_err(|e| CgrError::OutputFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Stdio::from(clone))
}

/// Exit code of a finished child. Killed by a signal counts as 1.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
