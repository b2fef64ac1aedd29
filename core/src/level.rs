//! Severity levels.
//!
//! Ranks follow the usual ten-step ladder from DEBUG to CRITICAL. SUCCESS
//! ranks above all of them, so it is only hidden when the threshold is set
//! above CRITICAL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLevelError;

/// A severity rank. Ordering follows the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Level(u32);

impl Level {
    pub const DEBUG: Level = Level(10);
    pub const INFO: Level = Level(20);
    pub const WARNING: Level = Level(30);
    pub const ERROR: Level = Level(40);
    pub const CRITICAL: Level = Level(50);
    pub const SUCCESS: Level = Level(69);

    /// The six levels accepted as configuration input, lowest rank first.
    pub const ALL: [Level; 6] = [
        Level::DEBUG,
        Level::INFO,
        Level::WARNING,
        Level::ERROR,
        Level::CRITICAL,
        Level::SUCCESS,
    ];

    pub const fn new(rank: u32) -> Self {
        Level(rank)
    }

    pub const fn rank(self) -> u32 {
        self.0
    }

    /// Built-in display name, if this is one of the six known ranks.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Level::DEBUG => Some("DEBUG"),
            Level::INFO => Some("INFO"),
            Level::WARNING => Some("WARNING"),
            Level::ERROR => Some("ERROR"),
            Level::CRITICAL => Some("CRITICAL"),
            Level::SUCCESS => Some("SUCCESS"),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Level {}", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.name().is_some_and(|name| name.eq_ignore_ascii_case(wanted)))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl TryFrom<String> for Level {
    type Error = ParseLevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.to_string()
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::ERROR,
            log::Level::Warn => Level::WARNING,
            log::Level::Info => Level::INFO,
            log::Level::Debug | log::Level::Trace => Level::DEBUG,
        }
    }
}
