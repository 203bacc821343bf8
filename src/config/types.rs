use std::fmt;
use std::path::Path;

/// Prefix for environment variables that override option defaults.
pub const ENV_PREFIX: &str = "CGR_";

/// One of the options cgr owns. Everything else on the command line
/// belongs to composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    /// Path to the composer binary (`--composer-path`).
    ComposerPath,
    /// Directory holding one install directory per project (`--base-dir`).
    BaseDir,
    /// Shared directory for project binaries (`--bin-dir`).
    BinDir,
}

impl OptionName {
    pub const ALL: [OptionName; 3] = [
        OptionName::ComposerPath,
        OptionName::BaseDir,
        OptionName::BinDir,
    ];

    /// Name as written on the command line, without the `--` prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionName::ComposerPath => "composer-path",
            OptionName::BaseDir => "base-dir",
            OptionName::BinDir => "bin-dir",
        }
    }

    /// Look up an option by its bare name (`base-dir`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == name)
    }

    /// Environment variable that overrides this option's default.
    ///
    /// `base-dir` → `CGR_BASE_DIR`
    pub fn env_var(self) -> String {
        format!(
            "{}{}",
            ENV_PREFIX,
            self.as_str().to_uppercase().replace('-', "_")
        )
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved option values for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub composer_path: String,
    pub base_dir: String,
    pub bin_dir: String,
}

impl Options {
    /// Built-in defaults, with paths relative to `home`.
    pub fn defaults(home: &Path) -> Self {
        let home = home.display();
        Self {
            composer_path: "composer".to_string(),
            base_dir: format!("{home}/.composer/global"),
            bin_dir: format!("{home}/.composer/vendor/bin"),
        }
    }

    pub fn set(&mut self, name: OptionName, value: String) {
        match name {
            OptionName::ComposerPath => self.composer_path = value,
            OptionName::BaseDir => self.base_dir = value,
            OptionName::BinDir => self.bin_dir = value,
        }
    }
}
