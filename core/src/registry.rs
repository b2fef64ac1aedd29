//! Named loggers and the registry that owns them.
//!
//! Names are hierarchical with `::` separators, like `log` targets. A
//! logger without its own threshold inherits the nearest ancestor's, and
//! records accepted by a logger are also handed to its ancestors' handlers
//! while `propagate` is set. The empty name is the root logger.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock, Weak};

use chrono::Local;

use crate::formatter::Formatter;
use crate::level::Level;
use crate::record::{CallSite, Record};

/// Threshold the root logger starts with.
pub const DEFAULT_ROOT_LEVEL: Level = Level::WARNING;

/// Receives every record a logger accepts.
pub trait Handler: Send + Sync {
    fn handle(&self, record: &Record<'_>);

    fn flush(&self) {}
}

/// Writes formatted records, one per line, to a stream.
pub struct StreamHandler {
    formatter: Box<dyn Formatter>,
    stream: Mutex<Box<dyn Write + Send>>,
}

impl StreamHandler {
    pub fn new(stream: impl Write + Send + 'static, formatter: Box<dyn Formatter>) -> Self {
        Self {
            formatter,
            stream: Mutex::new(Box::new(stream)),
        }
    }

    pub fn stdout(formatter: Box<dyn Formatter>) -> Self {
        Self::new(io::stdout(), formatter)
    }
}

impl Handler for StreamHandler {
    fn handle(&self, record: &Record<'_>) {
        let text = self.formatter.format(record);
        let mut stream = self.stream.lock().unwrap_or_else(PoisonError::into_inner);
        let written = writeln!(stream, "{text}").and_then(|()| stream.flush());
        if let Err(e) = written {
            eprintln!("colorlog: failed to write record from '{}': {e}", record.logger);
        }
    }

    fn flush(&self) {
        let mut stream = self.stream.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = stream.flush() {
            eprintln!("colorlog: failed to flush stream: {e}");
        }
    }
}

impl fmt::Debug for StreamHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandler").finish_non_exhaustive()
    }
}

struct Shared {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    level_names: RwLock<BTreeMap<Level, String>>,
}

impl Shared {
    fn existing(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn level_name(&self, level: Level) -> String {
        self.level_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&level)
            .cloned()
            .unwrap_or_else(|| format!("Level {}", level.rank()))
    }
}

/// Owns every logger by name.
pub struct LoggerRegistry {
    shared: Arc<Shared>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        let level_names = [
            Level::DEBUG,
            Level::INFO,
            Level::WARNING,
            Level::ERROR,
            Level::CRITICAL,
        ]
        .into_iter()
        .map(|level| (level, level.to_string()))
        .collect();

        let shared = Arc::new(Shared {
            loggers: RwLock::new(HashMap::new()),
            level_names: RwLock::new(level_names),
        });

        let root = Arc::new(Logger::new(String::new(), Arc::downgrade(&shared)));
        root.set_level(DEFAULT_ROOT_LEVEL);
        shared
            .loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(String::new(), root);

        Self { shared }
    }

    /// The process-wide registry.
    pub fn global() -> &'static LoggerRegistry {
        static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();
        GLOBAL.get_or_init(LoggerRegistry::new)
    }

    pub fn root(&self) -> Arc<Logger> {
        self.get("")
    }

    /// Fetch a logger, creating it on first use. `""` and `"root"` both
    /// name the root logger.
    pub fn get(&self, name: &str) -> Arc<Logger> {
        let key = if name == "root" { "" } else { name };
        if let Some(logger) = self.shared.existing(key) {
            return logger;
        }

        let mut loggers = self
            .shared
            .loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        loggers
            .entry(key.to_string())
            .or_insert_with(|| {
                Arc::new(Logger::new(key.to_string(), Arc::downgrade(&self.shared)))
            })
            .clone()
    }

    /// Give `level` a display name. Registering the same pair again is a
    /// no-op; a different name replaces the old one.
    pub fn add_level_name(&self, level: Level, name: &str) {
        let mut names = self
            .shared
            .level_names
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if names.get(&level).map(String::as_str) != Some(name) {
            names.insert(level, name.to_string());
        }
    }

    pub fn level_name(&self, level: Level) -> String {
        self.shared.level_name(level)
    }

    /// Flush every handler of every logger.
    pub fn flush(&self) {
        let loggers: Vec<Arc<Logger>> = self
            .shared
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for logger in loggers {
            logger.flush();
        }
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parent names from nearest to the root, e.g. `a::b::c` yields `a::b`, `a`, `""`.
fn ancestors(name: &str) -> impl Iterator<Item = &str> {
    let mut current = Some(name);
    std::iter::from_fn(move || {
        let name = current?;
        if name.is_empty() {
            current = None;
            return None;
        }
        let parent = name.rfind("::").map_or("", |at| &name[..at]);
        current = Some(parent);
        Some(parent)
    })
}

/// A named logger. Obtain one through [`LoggerRegistry::get`].
pub struct Logger {
    name: String,
    level: RwLock<Option<Level>>,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
    propagate: AtomicBool,
    registry: Weak<Shared>,
}

impl Logger {
    fn new(name: String, registry: Weak<Shared>) -> Self {
        Self {
            name,
            level: RwLock::new(None),
            handlers: RwLock::new(Vec::new()),
            propagate: AtomicBool::new(true),
            registry,
        }
    }

    /// Empty for the root logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = Some(level);
    }

    /// Drop the own threshold so the ancestors' one applies.
    pub fn unset_level(&self) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn level(&self) -> Option<Level> {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn effective_level(&self) -> Level {
        if let Some(level) = self.level() {
            return level;
        }
        let Some(shared) = self.registry.upgrade() else {
            return DEFAULT_ROOT_LEVEL;
        };
        ancestors(&self.name)
            .filter_map(|name| shared.existing(name))
            .find_map(|logger| logger.level())
            .unwrap_or(DEFAULT_ROOT_LEVEL)
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.effective_level()
    }

    pub fn add_handler(&self, handler: Arc<dyn Handler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    pub fn clear_handlers(&self) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Relaxed);
    }

    pub fn propagates(&self) -> bool {
        self.propagate.load(Ordering::Relaxed)
    }

    /// Emit a record if `level` passes the effective threshold.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>, call_site: CallSite<'_>) {
        if !self.is_enabled_for(level) {
            return;
        }

        let shared = self.registry.upgrade();
        let level_name = match &shared {
            Some(shared) => shared.level_name(level),
            None => level.to_string(),
        };
        let record = Record {
            logger: &self.name,
            level,
            level_name: &level_name,
            args,
            call_site,
            timestamp: Local::now(),
        };

        self.handle_local(&record);
        if !self.propagates() {
            return;
        }
        let Some(shared) = shared else {
            return;
        };
        for name in ancestors(&self.name) {
            if let Some(parent) = shared.existing(name) {
                parent.handle_local(&record);
                if !parent.propagates() {
                    break;
                }
            }
        }
    }

    pub fn flush(&self) {
        for handler in self.handlers_snapshot() {
            handler.flush();
        }
    }

    fn handlers_snapshot(&self) -> Vec<Arc<dyn Handler>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn handle_local(&self, record: &Record<'_>) {
        for handler in self.handlers_snapshot() {
            handler.handle(record);
        }
    }

    // The level methods below are `#[track_caller]`: the reported file and
    // line belong to whoever called them, not to this module. They carry no
    // function name, so `[file:line -> function]` shows `<unknown>`; the
    // macros of the same name capture it.

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::DEBUG, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::INFO, format_args!("{message}"), CallSite::caller());
    }

    /// Emit at SUCCESS, attributed to the caller's file and line.
    ///
    /// The function part of the call site is `<unknown>`. Use
    /// [`success!`](crate::success) when records need the calling function.
    #[track_caller]
    pub fn success(&self, message: impl fmt::Display) {
        self.log(Level::SUCCESS, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::WARNING, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::ERROR, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::CRITICAL, format_args!("{message}"), CallSite::caller());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .field("propagate", &self.propagates())
            .finish()
    }
}

/// Emit at an explicit level, capturing the full call site.
///
/// ```no_run
/// # let logger = colorlog_core::LoggerRegistry::global().root();
/// colorlog_core::log_at!(logger, colorlog_core::Level::INFO, "{} rows", 3);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+), $crate::call_site!())
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::DEBUG, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::INFO, $($arg)+) };
}

#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::SUCCESS, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::WARNING, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::ERROR, $($arg)+) };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::CRITICAL, $($arg)+) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Capture {
        lines: Mutex<Vec<String>>,
        flushes: AtomicBool,
    }

    impl Capture {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Handler for Capture {
        fn handle(&self, record: &Record<'_>) {
            self.lines.lock().unwrap().push(format!(
                "{}|{}|{}|{}",
                record.logger, record.level_name, record.args, record.call_site.line
            ));
        }

        fn flush(&self) {
            self.flushes.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn ancestors_walk_to_the_root() {
        let names: Vec<&str> = ancestors("a::b::c").collect();
        assert_eq!(names, ["a::b", "a", ""]);
        assert_eq!(ancestors("").count(), 0);
    }

    #[test]
    fn children_inherit_the_nearest_threshold() {
        let registry = LoggerRegistry::new();
        let leaf = registry.get("app::db::pool");
        assert_eq!(leaf.effective_level(), DEFAULT_ROOT_LEVEL);

        registry.get("app").set_level(Level::DEBUG);
        assert_eq!(leaf.effective_level(), Level::DEBUG);

        leaf.set_level(Level::ERROR);
        assert_eq!(leaf.effective_level(), Level::ERROR);
        leaf.unset_level();
        assert_eq!(leaf.effective_level(), Level::DEBUG);
    }

    #[test]
    fn root_aliases_resolve_to_the_same_logger() {
        let registry = LoggerRegistry::new();
        assert!(Arc::ptr_eq(&registry.get("root"), &registry.root()));
        assert!(Arc::ptr_eq(&registry.get("x"), &registry.get("x")));
    }

    #[test]
    fn records_propagate_to_ancestor_handlers() {
        let registry = LoggerRegistry::new();
        let capture = Arc::new(Capture::default());
        registry.root().set_level(Level::DEBUG);
        registry.root().add_handler(capture.clone());

        registry.get("app::jobs").info("started");
        assert_eq!(capture.lines().len(), 1);
        assert!(capture.lines()[0].starts_with("app::jobs|INFO|started|"));

        registry.get("app").set_propagate(false);
        registry.get("app::jobs").info("hidden from root");
        assert_eq!(capture.lines().len(), 1);
    }

    #[test]
    fn records_below_threshold_are_dropped() {
        let registry = LoggerRegistry::new();
        let capture = Arc::new(Capture::default());
        let logger = registry.get("quiet");
        logger.set_level(Level::ERROR);
        logger.add_handler(capture.clone());

        logger.warning("dropped");
        logger.critical("kept");
        logger.success("success outranks critical");
        assert_eq!(capture.lines().len(), 2);
    }

    #[test]
    fn level_methods_report_their_caller() {
        let registry = LoggerRegistry::new();
        let capture = Arc::new(Capture::default());
        let logger = registry.root();
        logger.add_handler(capture.clone());

        let line = line!() + 1;
        logger.success("ok");
        assert_eq!(capture.lines(), [format!("|Level 69|ok|{line}")]);

        registry.add_level_name(Level::SUCCESS, "SUCCESS");
        registry.add_level_name(Level::SUCCESS, "SUCCESS");
        let line = line!() + 1;
        crate::success!(logger, "{} done", 2);
        assert_eq!(capture.lines()[1], format!("|SUCCESS|2 done|{line}"));
    }

    #[test]
    fn renaming_a_level_replaces_the_old_name() {
        let registry = LoggerRegistry::new();
        registry.add_level_name(Level::new(25), "NOTICE");
        assert_eq!(registry.level_name(Level::new(25)), "NOTICE");
        registry.add_level_name(Level::new(25), "AUDIT");
        assert_eq!(registry.level_name(Level::new(25)), "AUDIT");

        let capture = Arc::new(Capture::default());
        let logger = registry.root();
        logger.add_handler(capture.clone());
        logger.log(Level::new(35), format_args!("ranked"), CallSite::caller());
        assert!(capture.lines()[0].starts_with("|Level 35|ranked|"));
    }

    #[test]
    fn registry_flush_reaches_every_handler() {
        let registry = LoggerRegistry::new();
        let on_root = Arc::new(Capture::default());
        let on_child = Arc::new(Capture::default());
        registry.root().add_handler(on_root.clone());
        registry.get("app::db").add_handler(on_child.clone());

        registry.flush();
        assert!(on_root.flushes.load(Ordering::SeqCst));
        assert!(on_child.flushes.load(Ordering::SeqCst));
    }

    #[test]
    fn stream_handler_writes_one_line_per_record() {
        #[derive(Clone, Default)]
        struct Buf(Arc<Mutex<Vec<u8>>>);

        impl Write for Buf {
            fn write(&mut self, data: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(data);
                Ok(data.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buf = Buf::default();
        let handler = StreamHandler::new(
            buf.clone(),
            Box::new(crate::formatter::FullColoredFormatter::new(false)),
        );
        let registry = LoggerRegistry::new();
        let logger = registry.root();
        logger.add_handler(Arc::new(handler));
        logger.error("first");
        logger.error("second");
        registry.flush();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.matches("\x1b[0m\n").count(), 2, "{text:?}");
    }

    #[test]
    fn clearing_handlers_leaves_none() {
        let registry = LoggerRegistry::new();
        let logger = registry.get("svc");
        logger.add_handler(Arc::new(Capture::default()));
        logger.add_handler(Arc::new(Capture::default()));
        assert_eq!(logger.handler_count(), 2);
        logger.clear_handlers();
        assert_eq!(logger.handler_count(), 0);
    }
}
