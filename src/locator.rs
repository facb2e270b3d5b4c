use crate::error::{BumpError, Result};
use log::{debug, warn};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The kinds of files that can carry version fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileKind {
    AssemblyInfo,
    ProjectFile,
}

impl FileKind {
    pub fn all() -> [FileKind; 2] {
        [FileKind::AssemblyInfo, FileKind::ProjectFile]
    }

    /// Matched against the file name only, never the directory part.
    pub fn filename_match_regex(&self) -> std::result::Result<Regex, regex::Error> {
        match self {
            FileKind::AssemblyInfo => Regex::new(r"(?i)^AssemblyInfo\..*$"),
            FileKind::ProjectFile => Regex::new(r"(?i)^.*\.csproj$"),
        }
    }
}

/// The filename patterns of every [`FileKind`], compiled once per walk.
#[derive(Debug)]
pub struct FileMatcher {
    patterns: Vec<(FileKind, Regex)>,
}

impl FileMatcher {
    pub fn new() -> Result<Self> {
        let patterns = FileKind::all()
            .into_iter()
            .map(|kind| -> Result<(FileKind, Regex)> { Ok((kind, kind.filename_match_regex()?)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(FileMatcher { patterns })
    }

    pub fn detect(&self, file_name: &str) -> Option<FileKind> {
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(file_name))
            .map(|(kind, _)| *kind)
    }
}

/// Recursively collects every AssemblyInfo and project file under `root`.
///
/// Symlinked directories are followed. A link back to one of its ancestors is
/// reported and skipped, and a file reachable through more than one path is
/// only returned once, so no file is bumped twice in a run. Unreadable
/// entries below the root are skipped as well.
pub fn get_matching_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(BumpError::DirectoryNotFound(root.to_path_buf()));
    }

    debug!("Checking matching files under '{}'", root.display());
    let matcher = FileMatcher::new()?;
    let mut files: Vec<PathBuf> = vec![];
    for item in WalkDir::new(root).follow_links(true) {
        let item = match item {
            Ok(item) => item,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                if let Some(ancestor) = e.loop_ancestor() {
                    warn!("Skipping symlink loop back to '{}'", ancestor.display());
                } else {
                    warn!("Skipping unreadable entry: {}", e);
                }
                continue;
            }
        };
        if !item.file_type().is_file() {
            continue;
        }
        let file_name = item.file_name().to_string_lossy();
        if matcher.detect(&file_name).is_some() {
            files.push(item.into_path());
        }
    }

    files.sort();
    let mut seen = HashSet::new();
    files.retain(|file| {
        let real = std::fs::canonicalize(file).unwrap_or_else(|_| file.clone());
        let first = seen.insert(real);
        if !first {
            debug!("Skipping '{}': already found through another path", file.display());
        }
        first
    });
    debug!("Found files: {:?}", files);
    Ok(files)
}
