//! Option registry — single source of truth for the options cgr owns.

use crate::config::OptionName;

/// Prefix that introduces a long option on the command line.
pub const OPTION_PREFIX: &str = "--";

/// A single option definition.
///
/// Every cgr option takes exactly one value, given as the next token
/// (`--base-dir /tmp`). The `--base-dir=/tmp` form is not recognized and
/// is passed through to composer.
#[derive(Debug, Clone)]
pub struct OptionDef {
    pub name: OptionName,
    /// Human-readable description, logged when the option is set.
    pub description: &'static str,
}

/// Build the complete option registry.
pub fn option_registry() -> Vec<OptionDef> {
    vec![
        OptionDef {
            name: OptionName::ComposerPath,
            description: "Path to the composer binary",
        },
        OptionDef {
            name: OptionName::BaseDir,
            description: "Directory that holds one install directory per project",
        },
        OptionDef {
            name: OptionName::BinDir,
            description: "Directory where project binaries are linked",
        },
    ]
}

impl OptionDef {
    /// Check if this definition matches the given argument string.
    pub fn matches(&self, arg: &str) -> bool {
        arg.strip_prefix(OPTION_PREFIX).and_then(OptionName::from_name) == Some(self.name)
    }
}
