//! Argument assembler — composer argv for one project install.

use std::ffi::OsString;

/// Builder for the arguments passed to one composer invocation.
#[derive(Debug, Clone, Default)]
pub struct ArgAssembler {
    args: Vec<OsString>,
}

impl ArgAssembler {
    /// Start with the flags forwarded from the user's command line.
    pub fn from_passthrough(composer_args: &[OsString]) -> Self {
        Self {
            args: composer_args.to_vec(),
        }
    }

    /// Point composer at the project's own install directory.
    pub fn with_working_dir(mut self, install_dir: &str) -> Self {
        self.args.push(format!("--working-dir={install_dir}").into());
        self
    }

    /// `require <project>[:<version>]`.
    pub fn with_require(mut self, project: &str, version: &str) -> Self {
        self.args.push("require".into());
        self.args.push(project_with_version(project, version).into());
        self
    }

    /// Build the final argument list.
    pub fn build(self) -> Vec<OsString> {
        self.args
    }
}

/// `project:version`, or just `project` when the version is empty.
pub fn project_with_version(project: &str, version: &str) -> String {
    if version.is_empty() {
        project.to_string()
    } else {
        format!("{project}:{version}")
    }
}
