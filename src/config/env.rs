//! Environment overlay — `CGR_*` variables replace option defaults.

use crate::config::types::{OptionName, Options};

/// Read a variable from the process environment.
///
/// Unset and non-unicode values are both treated as absent.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Overlay environment values onto `defaults`.
///
/// For every option whose `CGR_*` variable is set to a non-empty value,
/// that value replaces the default. Absent and empty variables leave the
/// default untouched.
pub fn overlay_environment<F>(defaults: &Options, lookup: F) -> Options
where
    F: Fn(&str) -> Option<String>,
{
    let mut options = defaults.clone();
    for name in OptionName::ALL {
        let key = name.env_var();
        if let Some(value) = lookup(&key).filter(|v| !v.is_empty()) {
            tracing::debug!(option = %name, env = %key, "option overridden from environment");
            options.set(name, value);
        }
    }
    options
}
