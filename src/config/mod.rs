//! Option values: built-in defaults, config file, and `CGR_*` environment.

mod env;
mod loader;
mod types;

pub use env::{overlay_environment, process_env};
pub use loader::{ConfigError, FileConfig, CONFIG_PATH_ENV};
pub use types::{OptionName, Options, ENV_PREFIX};
