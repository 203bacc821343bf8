//! Application — the whole invocation, from argv to exit code.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::args::{classify, extract_options, option_registry, plan, CommandSpec};
use crate::config::{overlay_environment, FileConfig, Options};
use crate::error::CgrError;
use crate::exec::{CommandExecutor, OutputTarget};

/// Environment variable naming a file that receives all composer output.
pub const OUTPUT_FILE_ENV: &str = "CGR_OUTPUT_FILE";

/// A safer `composer global require`.
///
/// Each project named in `cgr global require a/b c/d` is installed into its
/// own directory under `base-dir`, with binaries still linked into the
/// shared `bin-dir`. Any other composer command is passed straight through.
#[derive(Debug, Clone, Default)]
pub struct Application {
    file_config: FileConfig,
    output: OutputTarget,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use option values from a config file.
    ///
    /// Also picks up the file's `output_file` unless an output file was
    /// already set.
    pub fn with_file_config(mut self, file_config: FileConfig) -> Self {
        if self.output == OutputTarget::Inherit {
            if let Some(path) = file_config.output_file() {
                self.output = OutputTarget::File(path.to_path_buf());
            }
        }
        self.file_config = file_config;
        self
    }

    /// Send all composer output to `path` instead of the terminal.
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = OutputTarget::File(path.into());
        self
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    /// Option values before the command line is looked at: built-in
    /// defaults, then the config file, then `CGR_*` variables.
    pub fn resolve_defaults<F>(&self, home: &Path, env: F) -> Options
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = self.file_config.apply(&Options::defaults(home));
        overlay_environment(&defaults, env)
    }

    /// Work out every command to run, without running any of them.
    pub fn plan<F>(&self, argv: &[OsString], home: &Path, env: F) -> Result<Vec<CommandSpec>, CgrError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = self.resolve_defaults(home, env);
        let extracted = extract_options(argv, &option_registry(), &defaults)?;
        tracing::debug!(options = ?extracted.options, remaining = ?extracted.remaining, "options extracted");

        let classification = classify(&extracted.remaining);
        tracing::debug!(?classification, "arguments classified");

        Ok(plan(&classification, &extracted.options))
    }

    /// Plan and run. Returns the first non-zero exit code, or 0.
    pub fn run<F>(&self, argv: &[OsString], home: &Path, env: F) -> Result<i32, CgrError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let commands = self.plan(argv, home, env)?;
        CommandExecutor::new(self.output.clone()).run_all(&commands)
    }
}
