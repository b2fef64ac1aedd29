// src/logger.rs
//
// Single responsibility: setting up or providing the logger

use std::sync::Arc;

use colorlog_core::platform::AppPaths;
use colorlog_core::{LogSettings, Logger, SettingsError, setup_logging};

/// Initializes the logger for the entire application.
/// Typically called early in `main()`.
pub fn init_logger(paths: &dyn AppPaths) -> Result<Arc<Logger>, SettingsError> {
    let settings = LogSettings::load_with(paths)?;
    Ok(setup_logging(&settings))
}
