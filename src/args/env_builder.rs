//! Environment builder — variables set on a composer child process.

/// Tells composer where to link project binaries.
pub const COMPOSER_BIN_DIR: &str = "COMPOSER_BIN_DIR";

/// Builder for environment overrides. These are layered over the
/// caller's environment, never replacing it.
#[derive(Debug, Clone, Default)]
pub struct EnvSet {
    vars: Vec<(String, String)>,
}

impl EnvSet {
    /// Create an empty environment set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared bin directory for every per-project install.
    pub fn with_bin_dir(mut self, bin_dir: &str) -> Self {
        self.vars.push((COMPOSER_BIN_DIR.into(), bin_dir.into()));
        self
    }

    /// Build the final environment variable list.
    pub fn build(self) -> Vec<(String, String)> {
        self.vars
    }
}
