use crate::rewriter::RewriteError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BumpError {
    #[error("Directory {} doesn't exist.", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to bump '{}': {source}", .path.display())]
    Rewrite {
        path: PathBuf,
        source: RewriteError,
    },
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid filename pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, BumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_message() {
        let err = BumpError::DirectoryNotFound(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "Directory /no/such/dir doesn't exist.");
    }

    #[test]
    fn test_read_error_names_file() {
        let err = BumpError::Read {
            path: PathBuf::from("Properties/AssemblyInfo.cs"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        };
        let message = err.to_string();
        assert!(message.contains("Properties/AssemblyInfo.cs"));
        assert!(message.contains("access denied"));
    }
}
