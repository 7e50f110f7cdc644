//! File kinds accepted by the conversion stages.
//!
//! This module is the single source of truth for which extensions each stage
//! of the STEP → BREP → DAGMC → VTK pipeline accepts.
//!
//! # Example
//!
//! ```
//! use fast_ctd_shared::FileKind;
//! use std::path::Path;
//!
//! assert!(FileKind::Step.matches(Path::new("model.step")));
//! assert!(!FileKind::Step.matches(Path::new("model.STEP")));
//! assert_eq!(FileKind::Dagmc.extensions(), &[".h5m"]);
//! ```

use std::fmt;
use std::path::Path;

/// A file format handled by the toolchain, identified purely by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// STEP CAD exchange file
    Step,
    /// OpenCASCADE boundary representation
    Brep,
    /// DAGMC mesh geometry stored in a MOAB `.h5m` file
    Dagmc,
    /// Materials list, one material per volume
    MaterialsCsv,
    /// Legacy VTK mesh, for visual inspection
    Vtk,
}

impl FileKind {
    /// Accepted extensions including the leading dot.
    ///
    /// Matching is case-sensitive.
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Step => &[".stp", ".step"],
            FileKind::Brep => &[".brep"],
            FileKind::Dagmc => &[".h5m"],
            FileKind::MaterialsCsv => &[".csv"],
            FileKind::Vtk => &[".vtk"],
        }
    }

    /// Short human readable name
    pub const fn name(self) -> &'static str {
        match self {
            FileKind::Step => "STEP",
            FileKind::Brep => "BREP",
            FileKind::Dagmc => "DAGMC",
            FileKind::MaterialsCsv => "materials CSV",
            FileKind::Vtk => "VTK",
        }
    }

    /// Whether `path` carries one of this kind's extensions.
    pub fn matches(self, path: &Path) -> bool {
        let suffix = suffix(path);
        self.extensions().iter().any(|ext| *ext == suffix)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The final extension of `path` with its leading dot, or an empty string.
///
/// A bare dot-file such as `.brep` has no extension.
pub fn suffix(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_accepts_both_spellings() {
        assert!(FileKind::Step.matches(Path::new("a/b/model.stp")));
        assert!(FileKind::Step.matches(Path::new("model.step")));
        assert!(!FileKind::Step.matches(Path::new("model.brep")));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(!FileKind::Brep.matches(Path::new("model.BREP")));
        assert!(!FileKind::Dagmc.matches(Path::new("model.H5M")));
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert!(FileKind::Dagmc.matches(Path::new("model.brep.h5m")));
        assert!(!FileKind::Brep.matches(Path::new("model.brep.h5m")));
    }

    #[test]
    fn test_suffix() {
        assert_eq!(suffix(Path::new("dagmc.h5m")), ".h5m");
        assert_eq!(suffix(Path::new("no_extension")), "");
        assert_eq!(suffix(Path::new(".brep")), "");
    }
}
