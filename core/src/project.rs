//! Project root discovery.
//!
//! Walks upward from a start directory looking for marker entries such as
//! `.git` or `Cargo.toml`, and derives the `data` directory from the hit.

use std::fs;
use std::io;
use std::panic::Location;
use std::path::{Path, PathBuf};

use crate::error::RootNotFound;

/// Marker names checked in every candidate directory.
pub const DEFAULT_MARKERS: [&str; 7] = [
    ".git",
    ".gitignore",
    ".cargo",
    "main.rs",
    "Cargo.toml",
    "Cargo.lock",
    "rust-toolchain.toml",
];

/// The start directory counts as depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 3;

pub const DATA_DIR_NAME: &str = "data";

/// Return the first directory, from `start` upward, that directly contains
/// any of `markers`. At most `max_depth` directories are inspected and the
/// walk stops at the filesystem root.
///
/// With no `start`, the directory of the calling source file is used (see
/// [`source_dir`]).
#[track_caller]
pub fn find_project_root<S: AsRef<str>>(
    start: Option<&Path>,
    markers: &[S],
    max_depth: usize,
) -> Result<PathBuf, RootNotFound> {
    let mut current = match start {
        Some(path) => path.to_path_buf(),
        None => source_dir(Location::caller().file(), None),
    };

    for _ in 0..max_depth {
        if markers.iter().any(|marker| {
            let marker: &str = marker.as_ref();
            current.join(marker).exists()
        }) {
            return Ok(current);
        }

        let parent = match current.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
            Some(parent) => parent,
            None => break,
        };
        if parent == current {
            break;
        }
        current = parent.to_path_buf();
    }

    Err(RootNotFound {
        max_depth,
        markers: markers
            .iter()
            .map(|marker| {
                let marker: &str = marker.as_ref();
                marker.to_string()
            })
            .collect(),
    })
}

/// Directory holding the source file `file`, as reported by `file!()` or
/// `Location::file`.
///
/// Those paths are usually relative to the workspace root, so each base
/// (`manifest_dir`, then `CARGO_MANIFEST_DIR` at run time, then the working
/// directory) is tried together with its ancestors. Falls back to the first
/// base that exists when the source is not on disk.
pub fn source_dir(file: &str, manifest_dir: Option<&str>) -> PathBuf {
    let file = Path::new(file);
    if file.is_absolute() {
        return file.parent().map_or_else(|| file.to_path_buf(), Path::to_path_buf);
    }

    let bases: Vec<PathBuf> = manifest_dir
        .map(PathBuf::from)
        .into_iter()
        .chain(std::env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from))
        .chain(std::env::current_dir().ok())
        .collect();

    bases
        .iter()
        .flat_map(|base| base.ancestors())
        .map(|ancestor| ancestor.join(file))
        .find(|candidate| candidate.is_file())
        .and_then(|source| source.parent().map(Path::to_path_buf))
        .or_else(|| bases.into_iter().next())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Directory of the source file this macro is expanded in, resolved against
/// the expanding crate's manifest directory.
#[macro_export]
macro_rules! caller_dir {
    () => {
        $crate::project::source_dir(
            ::std::file!(),
            ::std::option::Option::Some(::std::env!("CARGO_MANIFEST_DIR")),
        )
    };
}

/// Builder over [`find_project_root`] with the default markers and depth.
#[derive(Debug, Clone)]
pub struct RootLocator {
    start: Option<PathBuf>,
    markers: Vec<String>,
    max_depth: usize,
}

impl Default for RootLocator {
    fn default() -> Self {
        Self {
            start: None,
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RootLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: impl Into<PathBuf>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Replace the marker set.
    pub fn markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Without an explicit start, searches from the caller's source directory.
    #[track_caller]
    pub fn find(&self) -> Result<PathBuf, RootNotFound> {
        find_project_root(self.start.as_deref(), &self.markers, self.max_depth)
    }
}

pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR_NAME)
}

/// Make sure `<root>/data` is a directory. A plain file with that name is
/// removed first.
pub fn ensure_data_dir(root: &Path) -> io::Result<PathBuf> {
    let dir = data_dir(root);
    if dir.is_file() {
        fs::remove_file(&dir)?;
    }
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
