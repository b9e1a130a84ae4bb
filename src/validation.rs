//! Source file validation.
//!
//! The scanner only understands Python-style `#` comments, so anything that
//! is not a readable, reasonably sized `.py` file is rejected up front,
//! before a single line is read.

use std::path::Path;

use crate::config::SourceConfig;

/// Reasons a source path is refused before extraction runs.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Not a python file.")]
    NotPythonFile,

    #[error("File does not exist.")]
    FileMissing,

    #[error("Path is not a regular file.")]
    NotAFile,

    #[error("File is too large to scan (max {max} bytes).")]
    TooLarge { max: u64 },
}

/// Check that `path` points at a Python source file we are willing to scan.
pub fn validate_source_path(path: &Path, config: &SourceConfig) -> Result<(), SourceError> {
    let is_python = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("py"))
        .unwrap_or(false);
    if !is_python {
        return Err(SourceError::NotPythonFile);
    }

    let metadata = std::fs::metadata(path).map_err(|_| SourceError::FileMissing)?;
    if !metadata.is_file() {
        return Err(SourceError::NotAFile);
    }
    if metadata.len() > config.max_file_bytes {
        return Err(SourceError::TooLarge {
            max: config.max_file_bytes,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn limits() -> SourceConfig {
        SourceConfig::default()
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let err = validate_source_path(Path::new("notes.txt"), &limits()).unwrap_err();
        assert!(matches!(err, SourceError::NotPythonFile));

        let err = validate_source_path(Path::new(""), &limits()).unwrap_err();
        assert!(matches!(err, SourceError::NotPythonFile));

        let err = validate_source_path(Path::new("no_extension"), &limits()).unwrap_err();
        assert!(matches!(err, SourceError::NotPythonFile));
    }

    #[test]
    fn test_rejects_missing_file() {
        let err =
            validate_source_path(Path::new("/definitely/not/here.py"), &limits()).unwrap_err();
        assert!(matches!(err, SourceError::FileMissing));
    }

    #[test]
    fn test_accepts_real_python_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module.py");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "# a comment").unwrap();

        assert!(validate_source_path(&path, &limits()).is_ok());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.py");
        std::fs::write(&path, vec![b'#'; 64]).unwrap();

        let config = SourceConfig { max_file_bytes: 16 };
        let err = validate_source_path(&path, &config).unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { max: 16 }));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module.PY");
        std::fs::write(&path, "# hi").unwrap();
        assert!(validate_source_path(&path, &limits()).is_ok());
    }
}
