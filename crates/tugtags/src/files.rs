//! Input file list assembly.
//!
//! Names are gathered in this order:
//!
//! 1. Positional `FILE` arguments
//! 2. Lines of the `-L` list (a file, or stdin for `-`); blank lines are skipped
//!
//! With `--recurse` every directory among those names is replaced by the
//! files beneath it that the front-end handles, in file-name order. Without
//! it, names are passed through untouched and a directory simply fails to
//! read later.
//!
//! ## Exclusion
//!
//! `--exclude` globs are matched against both the full path and its base
//! name. `*` does not cross `/`. Exclusions apply to named files as well as
//! to walked ones, and an excluded directory is not descended into.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use tugtags_core::{FrontEnd, TagsError};

/// Where input file names come from.
#[derive(Debug, Clone, Default)]
pub struct FileListOptions {
    /// Names given on the command line.
    pub inputs: Vec<PathBuf>,
    /// File holding one name per line; `-` reads stdin.
    pub input_list: Option<PathBuf>,
    pub recurse: bool,
    pub exclude: Vec<String>,
}

// ============================================================================
// Exclusion
// ============================================================================

/// Compiled `--exclude` patterns.
#[derive(Debug)]
pub struct ExcludeSet {
    globs: GlobSet,
}

impl ExcludeSet {
    pub fn new(patterns: &[String]) -> Result<Self, TagsError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| TagsError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| TagsError::InvalidPattern {
            pattern: "<combined>".to_string(),
            message: e.to_string(),
        })?;
        Ok(ExcludeSet { globs })
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    /// True when the full path or its base name matches a pattern.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.globs.is_empty() {
            return false;
        }
        self.globs.is_match(path)
            || path
                .file_name()
                .is_some_and(|name| self.globs.is_match(Path::new(name)))
    }
}

// ============================================================================
// Collection
// ============================================================================

/// Assemble the list of files to tag.
///
/// Walked directories contribute only the files `front_end` can handle.
/// Named files are passed through whatever their extension.
pub fn collect_file_names<F: FrontEnd>(
    options: &FileListOptions,
    front_end: &F,
) -> Result<Vec<PathBuf>, TagsError> {
    let excludes = ExcludeSet::new(&options.exclude)?;

    let mut names = options.inputs.clone();
    if let Some(list) = &options.input_list {
        names.extend(read_input_list(list)?);
    }

    let mut files = Vec::new();
    for name in names {
        if excludes.is_excluded(&name) {
            debug!(path = %name.display(), "excluded");
            continue;
        }
        if options.recurse && name.is_dir() {
            walk_sources(&name, &excludes, front_end, &mut files)?;
        } else {
            files.push(name);
        }
    }
    debug!(files = files.len(), "collected input files");
    Ok(files)
}

/// Read names from a list file, or from stdin when `list` is `-`.
pub fn read_input_list(list: &Path) -> Result<Vec<PathBuf>, TagsError> {
    if list == Path::new("-") {
        let stdin = io::stdin();
        return read_names(stdin.lock()).map_err(|e| TagsError::Unreadable {
            path: "<stdin>".to_string(),
            message: e.to_string(),
        });
    }

    let display = list.display().to_string();
    let file = File::open(list).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => TagsError::FileNotFound {
            path: display.clone(),
        },
        _ => TagsError::Unreadable {
            path: display.clone(),
            message: e.to_string(),
        },
    })?;
    read_names(BufReader::new(file)).map_err(|e| TagsError::Unreadable {
        path: display,
        message: e.to_string(),
    })
}

/// One name per line; blank lines are skipped, a trailing `\r` is dropped.
pub fn read_names<R: BufRead>(reader: R) -> io::Result<Vec<PathBuf>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim_end_matches('\r');
        if !name.trim().is_empty() {
            names.push(PathBuf::from(name));
        }
    }
    Ok(names)
}

/// Append every file under `dir` that `front_end` handles, skipping excluded
/// entries.
fn walk_sources<F: FrontEnd>(
    dir: &Path,
    excludes: &ExcludeSet,
    front_end: &F,
    out: &mut Vec<PathBuf>,
) -> Result<(), TagsError> {
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !excludes.is_excluded(entry.path()));

    for entry in walker {
        let entry = entry.map_err(|e| TagsError::Unreadable {
            path: e.path().unwrap_or(dir).display().to_string(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() && front_end.can_handle(&entry.path().to_string_lossy()) {
            out.push(entry.into_path());
        }
    }
    Ok(())
}

// ============================================================================
// Relative Paths
// ============================================================================

/// `path` expressed relative to `base`.
///
/// Both are made absolute against the current directory and normalized
/// lexically, so neither has to exist.
pub fn relative_to(base: &Path, path: &Path) -> io::Result<PathBuf> {
    let base = normalize(&std::path::absolute(base)?);
    let path = normalize(&std::path::absolute(path)?);

    let base_parts: Vec<Component<'_>> = base.components().collect();
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let common = base_parts
        .iter()
        .zip(&path_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Ok(relative)
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
