// src/main.rs
//
// The main entry point. Resolves the project root, makes sure the data
// directory exists, then configures logging and prints one record per
// severity.

use std::error::Error;

use colorlog_core::{Logger, ensure_data_dir};

mod logger;
mod paths;

use paths::ProjectPaths;

fn main() -> Result<(), Box<dyn Error>> {
    // 1. Locate the project and its data directory
    let paths = ProjectPaths::discover()?;
    let data_dir = ensure_data_dir(paths.root())?;

    // 2. Initialize the logger
    let logger = logger::init_logger(&paths)?;
    colorlog_core::info!(logger, "Hello from colorlog!");
    colorlog_core::debug!(logger, "project root: {}", paths.root().display());

    // Records sent through the `log` facade land in the same handler.
    log::info!("data directory ready at {}", data_dir.display());

    // 3. Show every severity
    show_levels(&logger);
    Ok(())
}

fn show_levels(logger: &Logger) {
    colorlog_core::debug!(logger, "This is a debug message.");
    colorlog_core::info!(logger, "This is an info message.");
    colorlog_core::success!(logger, "This is a success message!");
    colorlog_core::warning!(logger, "This is a warning message.");
    colorlog_core::error!(logger, "This is an error message.");
    colorlog_core::critical!(logger, "This is a critical message.");
}
