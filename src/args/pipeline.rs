//! Pipeline — turns classified arguments into composer commands.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

use crate::args::assembler::ArgAssembler;
use crate::args::classifier::{Classification, ProjectSet};
use crate::args::env_builder::EnvSet;
use crate::config::Options;

/// One composer invocation, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Binary to execute (the configured composer path).
    pub program: String,
    /// CLI arguments for the command, byte-for-byte as given.
    pub args: Vec<OsString>,
    /// Environment variables layered over the caller's environment.
    pub env: Vec<(String, String)>,
    /// Working directory; `None` inherits the caller's.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Forward `args` to composer unchanged.
    pub fn passthrough(program: &str, args: &[OsString]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
            env: Vec::new(),
            cwd: None,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={} ", quote(OsStr::new(value)))?;
        }
        f.write_str(&quote(OsStr::new(&self.program)))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Single-quote `s` for display if it contains anything shell-special.
/// Invalid unicode is shown lossily; the command itself keeps the bytes.
fn quote(s: &OsStr) -> String {
    let s = s.to_string_lossy();
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=^~@%+,".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Install directory for `project` under `base_dir`.
pub fn install_dir(base_dir: &str, project: &str) -> String {
    format!("{base_dir}/{project}")
}

/// Build the command list for a classification.
pub fn plan(classification: &Classification, options: &Options) -> Vec<CommandSpec> {
    match classification {
        Classification::Passthrough(args) => build_command_list(args, &ProjectSet::new(), options),
        Classification::GlobalRequire {
            projects,
            composer_args,
        } => build_command_list(composer_args, projects, options),
    }
}

/// Build the commands to run.
///
/// With no projects this is a single passthrough call to composer.
/// Otherwise there is one `composer require` per project, each installing
/// into `<base-dir>/<project>` and linking binaries into `<bin-dir>`.
pub fn build_command_list(
    composer_args: &[OsString],
    projects: &ProjectSet,
    options: &Options,
) -> Vec<CommandSpec> {
    if projects.is_empty() {
        return vec![CommandSpec::passthrough(&options.composer_path, composer_args)];
    }

    projects
        .iter()
        .map(|(project, version)| {
            let dir = install_dir(&options.base_dir, project);
            let args = ArgAssembler::from_passthrough(composer_args)
                .with_working_dir(&dir)
                .with_require(project, version)
                .build();
            let env = EnvSet::new().with_bin_dir(&options.bin_dir).build();

            CommandSpec {
                program: options.composer_path.clone(),
                args,
                env,
                cwd: Some(PathBuf::from(dir)),
            }
        })
        .collect()
}
