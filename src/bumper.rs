use crate::encoding::{decode, encode};
use crate::error::{BumpError, Result};
use crate::locator::get_matching_files;
use crate::rewriter::rewrite_contents;
use crate::version::BumpFlags;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// What happened to each file found during a run.
#[derive(Debug, Default)]
pub struct BumpReport {
    pub scanned: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, BumpError)>,
}

/// Result of processing one file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Unchanged,
    Rewritten,
}

/// Reads, rewrites and, if anything changed, writes back a single file.
///
/// The file is only opened for writing once the new contents are fully built,
/// and is written back in the encoding it was read in.
pub fn bump_file(path: &Path, flags: &BumpFlags) -> Result<FileOutcome> {
    debug!("Checking file: '{}'", path.display());
    let (encoding, contents) = std::fs::read(path)
        .and_then(|bytes| decode(&bytes))
        .map_err(|source| BumpError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let rewrite = rewrite_contents(&contents, flags).map_err(|source| BumpError::Rewrite {
        path: path.to_path_buf(),
        source,
    })?;
    if !rewrite.is_updated() {
        return Ok(FileOutcome::Unchanged);
    }
    for change in &rewrite.changes {
        debug!("{}:{} {} -> {}", path.display(), change.line, change.from, change.to);
    }

    std::fs::write(path, encode(encoding, &rewrite.contents)).map_err(|source| BumpError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(FileOutcome::Rewritten)
}

/// Bumps every version field in every matching file beneath `root`.
///
/// A missing root fails the whole run before anything is touched. Failures on
/// individual files are collected in the report and the run moves on; files
/// already written stay written.
pub fn bump(root: impl AsRef<Path>, flags: &BumpFlags) -> Result<BumpReport> {
    let files = get_matching_files(root)?;
    info!("Found {} version file(s)", files.len());

    let mut report = BumpReport::default();
    for file in files {
        match bump_file(&file, flags) {
            Ok(FileOutcome::Rewritten) => {
                println!("Updated {}", file.display());
                report.updated.push(file.clone());
            }
            Ok(FileOutcome::Unchanged) => {}
            Err(e) => {
                println!(" FAILED with error {}", e);
                report.failed.push((file.clone(), e));
            }
        }
        report.scanned.push(file);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_bump_file_unchanged_is_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("app.csproj");
        // no trailing newline; a rewrite would add one
        fs::write(&project, "<Project>\n  <Version>1.0.0</Version>\n</Project>").unwrap();

        let flags = BumpFlags { build: true, ..Default::default() };
        assert_eq!(bump_file(&project, &flags).unwrap(), FileOutcome::Unchanged);
        assert_eq!(
            fs::read_to_string(&project).unwrap(),
            "<Project>\n  <Version>1.0.0</Version>\n</Project>"
        );
    }

    #[test]
    fn test_bump_file_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("AssemblyInfo.cs");
        let flags = BumpFlags { build: true, ..Default::default() };
        assert!(matches!(bump_file(&missing, &flags), Err(BumpError::Read { .. })));
    }

    #[test]
    fn test_bump_file_overflow_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("app.csproj");
        let original = "<Version>1.0.0.0</Version>\n<FileVersion>1.0.0.2147483647</FileVersion>\n";
        fs::write(&project, original).unwrap();

        let flags = BumpFlags { revision: true, ..Default::default() };
        assert!(matches!(bump_file(&project, &flags), Err(BumpError::Rewrite { .. })));
        assert_eq!(fs::read_to_string(&project).unwrap(), original);
    }

    #[test]
    fn test_bump_file_keeps_utf16_encoding() {
        let temp_dir = TempDir::new().unwrap();
        let info = temp_dir.path().join("AssemblyInfo.cs");
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("[assembly: AssemblyVersion(\"1.0.0.0\")]\r\n".encode_utf16().flat_map(u16::to_le_bytes));
        fs::write(&info, &bytes).unwrap();

        let flags = BumpFlags { build: true, ..Default::default() };
        assert_eq!(bump_file(&info, &flags).unwrap(), FileOutcome::Rewritten);

        let mut expected = vec![0xFF, 0xFE];
        expected.extend("[assembly: AssemblyVersion(\"1.0.1.0\")]\r\n".encode_utf16().flat_map(u16::to_le_bytes));
        assert_eq!(fs::read(&info).unwrap(), expected);
    }

    #[test]
    fn test_bump_file_rewrites() {
        let temp_dir = TempDir::new().unwrap();
        let info = temp_dir.path().join("AssemblyInfo.cs");
        fs::write(&info, "[assembly: AssemblyVersion(\"1.2.3.4\")]\n").unwrap();

        let flags = BumpFlags { revision: true, ..Default::default() };
        assert_eq!(bump_file(&info, &flags).unwrap(), FileOutcome::Rewritten);
        assert!(fs::read_to_string(&info).unwrap().contains("AssemblyVersion(\"1.2.3.5\")"));
    }
}
