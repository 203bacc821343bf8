//! Option extractor — pull cgr's own options out of argv.

use std::ffi::OsString;

use crate::args::registry::OptionDef;
use crate::config::Options;
use crate::error::CgrError;

/// Result of extracting cgr options from argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Tokens not consumed as options, in their original order and bytes.
    pub remaining: Vec<OsString>,
    /// Defaults with command-line overrides applied.
    pub options: Options,
}

/// Extract registered options from `argv`.
///
/// `argv[0]` is the program name and is discarded. A registered `--name`
/// consumes the following token as its value; later occurrences win.
/// Every other token is kept for classification.
pub fn extract_options(
    argv: &[OsString],
    registry: &[OptionDef],
    defaults: &Options,
) -> Result<Extracted, CgrError> {
    let mut remaining = Vec::new();
    let mut options = defaults.clone();
    let mut iter = argv.iter().skip(1);

    while let Some(arg) = iter.next() {
        let def = arg
            .to_str()
            .and_then(|flag| registry.iter().find(|d| d.matches(flag)));
        let Some(def) = def else {
            remaining.push(arg.clone());
            continue;
        };

        let value = iter.next().ok_or_else(|| CgrError::MalformedOption {
            option: def.name.to_string(),
        })?;
        let value = value.to_str().ok_or_else(|| CgrError::InvalidOptionValue {
            option: def.name.to_string(),
        })?;
        tracing::debug!(
            option = %def.name,
            description = def.description,
            %value,
            "option set on command line"
        );
        options.set(def.name, value.to_string());
    }

    Ok(Extracted { remaining, options })
}
