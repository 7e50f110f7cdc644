//! Path validation helpers shared by the adapter and the tool runner.

use std::path::{Path, PathBuf};

use crate::error::{CtdError, Result};
use crate::file_kind::{FileKind, suffix};

/// Hint appended to "does not exist" errors for plain input files.
pub const DEFAULT_EXISTS_HINT: &str = "Are you in the right directory?";

/// Check that `path` carries one of the extensions accepted for `kind`.
///
/// Outputs only need this check; they are not required to exist.
pub fn validate_file_extension(path: &Path, kind: FileKind) -> Result<()> {
    if kind.matches(path) {
        return Ok(());
    }
    Err(CtdError::InvalidExtension {
        path: path.to_path_buf(),
        expected: kind.extensions(),
        got: suffix(path),
    })
}

/// Check that `path` exists, attaching `hint` to the error.
pub fn validate_file_exists(path: &Path, hint: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    Err(CtdError::NotFound {
        path: path.to_path_buf(),
        hint: hint.to_string(),
    })
}

/// Validate an input file: extension first, then existence.
pub fn validate_input(path: &Path, kind: FileKind) -> Result<()> {
    validate_file_extension(path, kind)?;
    validate_file_exists(path, DEFAULT_EXISTS_HINT)
}

/// `dir/model.h5m` + `-wt` → `dir/model-wt.h5m`
pub fn sibling_with_stem_suffix(path: &Path, stem_suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, stem_suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, stem_suffix),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extension_error_lists_accepted_and_received() {
        let err = validate_file_extension(Path::new("model.txt"), FileKind::Step).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(".stp"), "{msg}");
        assert!(msg.contains(".step"), "{msg}");
        assert!(msg.contains(".txt"), "{msg}");
    }

    #[test]
    fn test_output_need_not_exist() {
        let dir = tempdir().expect("Failed to create temp dir");
        let out = dir.path().join("not-yet.brep");
        assert!(validate_file_extension(&out, FileKind::Brep).is_ok());
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input_is_not_found() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = validate_input(&dir.path().join("missing.stp"), FileKind::Step).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains(DEFAULT_EXISTS_HINT));
    }

    #[test]
    fn test_extension_checked_before_existence() {
        let err = validate_input(Path::new("/definitely/missing.txt"), FileKind::Step).unwrap_err();
        assert!(matches!(err, CtdError::InvalidExtension { .. }));
    }

    #[test]
    fn test_existing_input_passes() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("model.step");
        std::fs::write(&path, "ISO-10303-21;").unwrap();
        assert!(validate_input(&path, FileKind::Step).is_ok());
    }

    #[test]
    fn test_sibling_with_stem_suffix() {
        assert_eq!(
            sibling_with_stem_suffix(Path::new("data/model.h5m"), "-wt"),
            PathBuf::from("data/model-wt.h5m")
        );
        assert_eq!(
            sibling_with_stem_suffix(Path::new("model"), "-wt"),
            PathBuf::from("model-wt")
        );
    }
}
