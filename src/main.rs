use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};

use cgr::app::OUTPUT_FILE_ENV;
use cgr::config::{process_env, FileConfig};
use cgr::{logging, Application, CgrError};

fn main() {
    logging::init_tracing();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            e.downcast_ref::<CgrError>().map_or(1, CgrError::exit_code)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

    let config_path = FileConfig::config_path(process_env);
    let file_config = FileConfig::load_from(&config_path)
        .map_err(CgrError::from)
        .context("failed to load configuration")?;

    let mut app = Application::new();
    if let Some(path) = process_env(OUTPUT_FILE_ENV).filter(|p| !p.is_empty()) {
        app = app.with_output_file(path);
    }
    let app = app.with_file_config(file_config);
    tracing::debug!(output = ?app.output(), config = %config_path.display(), "application configured");

    let code = app.run(&argv, &home, process_env)?;
    Ok(code)
}
