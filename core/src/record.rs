//! Log records and the call site they were emitted from.

use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Local};

use crate::level::Level;

/// Where a record was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
    /// Path of the enclosing function, when the emitting macro could capture it.
    pub function: Option<&'a str>,
    pub module_path: Option<&'a str>,
}

impl CallSite<'static> {
    /// Location of the nearest caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        CallSite {
            file: location.file(),
            line: location.line(),
            function: None,
            module_path: None,
        }
    }
}

impl CallSite<'_> {
    /// Function path, falling back to the module path.
    pub fn function_name(&self) -> &str {
        self.function
            .or(self.module_path)
            .unwrap_or("<unknown>")
    }
}

impl fmt::Display for CallSite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} -> {}", self.file, self.line, self.function_name())
    }
}

/// A single event handed to handlers.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub logger: &'a str,
    pub level: Level,
    pub level_name: &'a str,
    pub args: fmt::Arguments<'a>,
    pub call_site: CallSite<'a>,
    pub timestamp: DateTime<Local>,
}

#[doc(hidden)]
pub fn trim_function_path(raw: &'static str) -> &'static str {
    let mut path = raw.strip_suffix("::__here").unwrap_or(raw);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path
}

/// Path of the function the macro is expanded in.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn __here() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::record::trim_function_path(type_name_of(__here))
    }};
}

/// Capture the current file, line, function and module.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite {
            file: ::std::file!(),
            line: ::std::line!(),
            function: ::std::option::Option::Some($crate::__function_path!()),
            module_path: ::std::option::Option::Some(::std::module_path!()),
        }
    };
}
