//! cgr — a safer alternative to `composer global require`.
//!
//! `composer global require` installs every global tool into one shared
//! project, so their dependencies must all agree. cgr rewrites the
//! invocation into one `composer require` per project, each in its own
//! directory, while binaries still land in the shared bin directory.

pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;

pub use app::Application;
pub use error::CgrError;
