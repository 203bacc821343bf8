//! Argument handling pipeline for cgr.
//!
//! ```text
//! argv → Extract options → Classify → Plan → Vec<CommandSpec>
//! ```
//!
//! Each stage is a pure function that can be unit-tested independently.

mod assembler;
mod classifier;
mod env_builder;
mod extractor;
mod pipeline;
mod registry;

pub use assembler::{project_with_version, ArgAssembler};
pub use classifier::{classify, is_version, split_project, Classification, ProjectSet};
pub use env_builder::{EnvSet, COMPOSER_BIN_DIR};
pub use extractor::{extract_options, Extracted};
pub use pipeline::{build_command_list, install_dir, plan, CommandSpec};
pub use registry::{option_registry, OptionDef, OPTION_PREFIX};
