//! Colorized logging bootstrap.
//!
//! Sets up a named (or root) logger with a single colored stdout handler,
//! adds a `SUCCESS` severity above the standard ladder and locates the
//! project root so callers can derive a data directory from it.
//!
//! ```no_run
//! use colorlog_core::{LogSettings, setup_logging};
//!
//! let logger = setup_logging(&LogSettings {
//!     include_function: true,
//!     ..LogSettings::default()
//! });
//! colorlog_core::success!(logger, "ready");
//! ```

pub mod bridge;
pub mod colors;
pub mod config;
pub mod error;
pub mod formatter;
pub mod level;
pub mod project;
pub mod record;
pub mod registry;
pub mod setup;

pub use config::LogSettings;
pub use error::{ParseLevelError, RootNotFound, SettingsError};
pub use formatter::{ColoredFormatter, Formatter, FullColoredFormatter, formatter_for};
pub use level::Level;
pub use project::{RootLocator, data_dir, ensure_data_dir, find_project_root};
pub use record::{CallSite, Record};
pub use registry::{Handler, Logger, LoggerRegistry, StreamHandler};
pub use setup::{setup_logging, setup_logging_in, setup_logging_to};

/// Interfaces that binaries implement to adapt the library to where they
/// keep their files.
pub mod platform {
    /// Trait for locating the settings file.
    pub trait AppPaths {
        fn config_path(&self) -> std::path::PathBuf;
    }
}
