//! Renders records as colored, human-readable text.
//!
//! Both layouts put a bracketed timestamp (and optionally the call site) on
//! the first line and `LEVEL: message` on the second. The partial layout
//! colors only the timestamp and level, the full layout colors everything.

use colored::Colorize;

use crate::colors::{call_site_color, color_for, force_ansi};
use crate::record::Record;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Turns a record into the text a handler writes, without a trailing newline.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &Record<'_>) -> String;
}

/// Colors the timestamp and level name only.
#[derive(Debug, Clone, Copy)]
pub struct ColoredFormatter {
    pub include_function: bool,
}

impl ColoredFormatter {
    pub fn new(include_function: bool) -> Self {
        force_ansi();
        Self { include_function }
    }
}

impl Formatter for ColoredFormatter {
    fn format(&self, record: &Record<'_>) -> String {
        let color = color_for(record.level_name);
        let time = record.timestamp.format(TIME_FORMAT).to_string();

        let mut header = format!("[{}]", time.as_str().color(color));
        if self.include_function {
            let site = format!("[{}]", record.call_site);
            header.push_str(&format!(" {}", site.as_str().color(call_site_color())));
        }

        format!(
            "{header}\n{}: {}",
            record.level_name.color(color),
            record.args
        )
    }
}

/// Colors the whole record in the severity's color.
#[derive(Debug, Clone, Copy)]
pub struct FullColoredFormatter {
    pub include_function: bool,
}

impl FullColoredFormatter {
    pub fn new(include_function: bool) -> Self {
        force_ansi();
        Self { include_function }
    }
}

impl Formatter for FullColoredFormatter {
    fn format(&self, record: &Record<'_>) -> String {
        let color = color_for(record.level_name);

        let mut header = format!("[{}]", record.timestamp.format(TIME_FORMAT));
        if self.include_function {
            header.push_str(&format!(" [{}]", record.call_site));
        }

        let body = format!("\n{header}\n{}: {}", record.level_name, record.args);
        body.as_str().color(color).to_string()
    }
}

pub fn formatter_for(full_color: bool, include_function: bool) -> Box<dyn Formatter> {
    if full_color {
        Box::new(FullColoredFormatter::new(include_function))
    } else {
        Box::new(ColoredFormatter::new(include_function))
    }
}
