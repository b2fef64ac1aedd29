//! One-call logger bootstrap.

use std::io::Write;
use std::sync::Arc;

use crate::bridge;
use crate::colors::force_ansi;
use crate::config::LogSettings;
use crate::formatter::formatter_for;
use crate::level::Level;
use crate::registry::{Logger, LoggerRegistry, StreamHandler};

pub const SUCCESS_NAME: &str = "SUCCESS";

/// The only logger implementation; see [`LogSettings::logger_type`].
pub const BASE_LOGGER_TYPE: &str = "Logger";

/// Library loggers held at WARNING whatever the requested level: a
/// messaging client, a tracing exporter and two HTTP stacks.
pub const NOISY_LOGGERS: [&str; 4] = ["lapin", "opentelemetry", "hyper", "reqwest"];

pub fn register_success_level(registry: &LoggerRegistry) {
    registry.add_level_name(Level::SUCCESS, SUCCESS_NAME);
}

/// Configure the global registry with a stdout handler and route the `log`
/// facade into it.
///
/// Call once at startup, before spawning threads that log. Calling again
/// replaces the handler rather than adding a second one.
pub fn setup_logging(settings: &LogSettings) -> Arc<Logger> {
    let formatter = formatter_for(settings.full_color, settings.include_function);
    setup_global(settings, StreamHandler::stdout(formatter))
}

/// [`setup_logging`], writing to `stream` instead of stdout.
pub fn setup_logging_to<W>(settings: &LogSettings, stream: W) -> Arc<Logger>
where
    W: Write + Send + 'static,
{
    let formatter = formatter_for(settings.full_color, settings.include_function);
    setup_global(settings, StreamHandler::new(stream, formatter))
}

fn setup_global(settings: &LogSettings, handler: StreamHandler) -> Arc<Logger> {
    let bridged = bridge::install();
    let logger = configure(LoggerRegistry::global(), settings, handler);
    if !bridged {
        logger.debug("log facade already has a logger; records sent through `log` are not routed here");
    }
    logger
}

/// Configure `settings.logger_name` (or the root) in `registry`, writing to
/// `stream`.
pub fn setup_logging_in<W>(registry: &LoggerRegistry, settings: &LogSettings, stream: W) -> Arc<Logger>
where
    W: Write + Send + 'static,
{
    let formatter = formatter_for(settings.full_color, settings.include_function);
    configure(registry, settings, StreamHandler::new(stream, formatter))
}

fn configure(registry: &LoggerRegistry, settings: &LogSettings, handler: StreamHandler) -> Arc<Logger> {
    force_ansi();
    register_success_level(registry);

    let logger = match settings.logger_name.as_deref() {
        Some(name) => registry.get(name),
        None => registry.root(),
    };
    logger.set_level(settings.level);
    logger.clear_handlers();
    logger.add_handler(Arc::new(handler));

    for name in NOISY_LOGGERS {
        registry.get(name).set_level(Level::WARNING);
    }

    if let Some(kind) = settings.logger_type.as_deref()
        && kind != BASE_LOGGER_TYPE
    {
        logger.warning(format_args!(
            "logger type '{kind}' is not a {BASE_LOGGER_TYPE}; using {BASE_LOGGER_TYPE}"
        ));
    }

    if settings.include_function {
        logger.success("🎨 Colored logging configured with function names");
    } else {
        logger.success("🎨 Colored logging configured");
    }

    logger
}
