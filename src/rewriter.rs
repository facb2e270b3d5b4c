use crate::markers::{MARKERS, VersionMarker};
use crate::version::{AssemblyVersion, BumpFlags};
use log::{debug, warn};
use thiserror::Error;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// A single version field that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    pub line: usize,
    pub from: AssemblyVersion,
    pub to: AssemblyVersion,
}

/// The rebuilt file text and the fields that changed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub contents: String,
    pub changes: Vec<VersionChange>,
}

impl Rewrite {
    pub fn is_updated(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// One rewritten line and the `(from, to)` pairs of the fields bumped in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRewrite {
    pub text: String,
    pub bumped: Vec<(AssemblyVersion, AssemblyVersion)>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("line {line}: bumping {version} would overflow a version component")]
    Overflow { line: usize, version: AssemblyVersion },
}

/// Rewrites every version field found in `contents`.
///
/// Lines without a parseable field come back untouched. Trailing empty lines
/// are dropped and every remaining line is terminated with the terminator the
/// file already uses. An overflowing bump fails the whole file so nothing
/// half-bumped is ever written.
pub fn rewrite_contents(contents: &str, flags: &BumpFlags) -> Result<Rewrite, RewriteError> {
    let terminator = if contents.contains("\r\n") { "\r\n" } else { LINE_ENDING };
    let mut lines: Vec<&str> = contents
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut changes = Vec::new();
    let mut rebuilt = String::with_capacity(contents.len() + 16);
    for (index, line) in lines.into_iter().enumerate() {
        let number = index + 1;
        match rewrite_line(line, flags) {
            Ok(Some(rewrite)) => {
                changes.extend(
                    rewrite
                        .bumped
                        .into_iter()
                        .map(|(from, to)| VersionChange { line: number, from, to }),
                );
                rebuilt.push_str(&rewrite.text);
            }
            Ok(None) => rebuilt.push_str(line),
            Err(version) => return Err(RewriteError::Overflow { line: number, version }),
        }
        rebuilt.push_str(terminator);
    }

    Ok(Rewrite { contents: rebuilt, changes })
}

/// Runs every marker over `line`.
///
/// Returns `Ok(None)` when nothing about the line changes, and the version
/// that could not be bumped if a component would overflow.
pub fn rewrite_line(line: &str, flags: &BumpFlags) -> Result<Option<LineRewrite>, AssemblyVersion> {
    if !flags.any() {
        return Ok(None);
    }
    let mut current: Option<LineRewrite> = None;
    for marker in MARKERS {
        let text = current.as_ref().map_or(line, |rewrite| rewrite.text.as_str());
        if let Some((rewritten, from, to)) = rewrite_field(text, marker, flags)? {
            let rewrite = current.get_or_insert_with(|| LineRewrite {
                text: String::new(),
                bumped: Vec::new(),
            });
            rewrite.text = rewritten;
            rewrite.bumped.push((from, to));
        }
    }
    Ok(current)
}

fn rewrite_field(
    line: &str,
    marker: &VersionMarker,
    flags: &BumpFlags,
) -> Result<Option<(String, AssemblyVersion, AssemblyVersion)>, AssemblyVersion> {
    let Some(offset) = marker.find_in(line) else {
        return Ok(None);
    };
    let Some(indent) = indentation(line, offset) else {
        debug!("Skipping '{line}': text before {}", marker.opening);
        return Ok(None);
    };
    let tail = &line[offset + marker.opening.len()..];
    let candidate = tail.split(marker.terminator()).next().unwrap_or(tail);
    let Some(current) = AssemblyVersion::parse(candidate) else {
        return Ok(None);
    };
    let Some(next) = current.bump(flags) else {
        warn!("Cannot bump {current} in '{line}': component would overflow");
        return Err(current);
    };
    debug!("{} {current} -> {next}", marker.opening);

    let closing = marker.closing();
    let trailing = tail[candidate.len()..]
        .strip_prefix(&*closing)
        .unwrap_or_default();
    let field = format!("{}{next}{closing}{trailing}", marker.opening);
    Ok(Some((format!("{indent}{field}"), current, next)))
}

/// The indentation in front of a marker at byte `offset`.
///
/// Only whitespace counts as indentation; a marker preceded by anything else
/// sits inside other markup and is left alone.
pub fn indentation(line: &str, offset: usize) -> Option<&str> {
    let prefix = &line[..offset];
    prefix.chars().all(char::is_whitespace).then_some(prefix)
}
