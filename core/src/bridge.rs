//! Routes records from the `log` facade into the global registry.
//!
//! Libraries log through `log` with their module path as target; the
//! bridge looks the target up as a logger name so thresholds set on
//! `hyper` or `lapin` also apply to `hyper::client::pool`.

use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata};

use crate::level::Level;
use crate::record::CallSite;
use crate::registry::LoggerRegistry;

struct LogBridge;

static BRIDGE: LogBridge = LogBridge;
static INSTALLED: OnceLock<bool> = OnceLock::new();

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        LoggerRegistry::global()
            .get(metadata.target())
            .is_enabled_for(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        let logger = LoggerRegistry::global().get(record.target());
        let call_site = CallSite {
            file: record.file().unwrap_or("<unknown>"),
            line: record.line().unwrap_or(0),
            function: None,
            module_path: record.module_path(),
        };
        logger.log(Level::from(record.level()), *record.args(), call_site);
    }

    fn flush(&self) {
        LoggerRegistry::global().flush();
    }
}

/// Install the bridge as the `log` facade's logger.
///
/// Returns `false` when some other logger already owns the facade. Only the
/// first call does any work.
pub fn install() -> bool {
    *INSTALLED.get_or_init(|| match log::set_logger(&BRIDGE) {
        Ok(()) => {
            log::set_max_level(LevelFilter::Trace);
            true
        }
        Err(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent() {
        let first = install();
        assert_eq!(install(), first);
    }
}
