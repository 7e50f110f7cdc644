//! Locating the external executables
//!
//! The DAGMC/MOAB tools and the geometry command line tools are expected to
//! be installed next to each other. A [`Toolchain`] knows where to look and
//! turns a missing executable into a configuration error before anything is
//! spawned.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use fast_ctd_shared::{CtdError, Result};

/// Environment variable overriding the toolchain directory.
pub const TOOLCHAIN_DIR_ENV: &str = "FAST_CTD_TOOLCHAIN_DIR";

/// Hint attached to "executable not found" errors.
pub const INSTALL_HINT: &str =
    "Is DAGMC (with the MOAB tools) installed alongside fast-ctd? Check your toolchain installation.";

/// An external executable the wrappers know how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// DAGMC watertight repair
    MakeWatertight,
    /// DAGMC watertight check
    CheckWatertight,
    /// MOAB mesh format converter
    MeshConvert,
    /// Geometry library command line front ends
    StepToBrep,
    BrepMerger,
    BrepFaceter,
}

impl Tool {
    /// Executable name without platform suffix
    pub const fn default_name(self) -> &'static str {
        match self {
            Tool::MakeWatertight => "make_watertight",
            Tool::CheckWatertight => "check_watertight",
            Tool::MeshConvert => "mbconvert",
            Tool::StepToBrep => "occ_step_to_brep",
            Tool::BrepMerger => "occ_merger",
            Tool::BrepFaceter => "occ_faceter",
        }
    }
}

/// `[toolchain]` table of a `ctd.toml` manifest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Directory holding the executables
    pub dir: Option<PathBuf>,
    /// Fall back to `PATH` when a tool is not in `dir`. Default: true
    pub search_path: Option<bool>,
    /// Executable name overrides, keyed by default name
    /// (e.g. `mbconvert = "mbconvert-5.5"`)
    pub names: BTreeMap<String, String>,
}

/// Where to find the external executables.
#[derive(Debug, Clone)]
pub struct Toolchain {
    dir: Option<PathBuf>,
    search_path: bool,
    names: BTreeMap<String, String>,
}

impl Toolchain {
    /// Only look in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            search_path: false,
            names: BTreeMap::new(),
        }
    }

    /// Look in `$FAST_CTD_TOOLCHAIN_DIR`, or else next to the running
    /// executable, then on `PATH`.
    pub fn discover() -> Self {
        let dir = std::env::var_os(TOOLCHAIN_DIR_ENV)
            .map(PathBuf::from)
            .or_else(executable_dir);
        Self {
            dir,
            search_path: true,
            names: BTreeMap::new(),
        }
    }

    /// Build from a manifest table. Without a `dir` this behaves like
    /// [`Toolchain::discover`].
    pub fn from_config(config: &ToolchainConfig) -> Self {
        let mut toolchain = match &config.dir {
            Some(dir) => Self::in_dir(dir),
            None => Self::discover(),
        };
        toolchain.search_path = config.search_path.unwrap_or(true);
        toolchain.with_names(config.names.clone())
    }

    /// Replace the executable name overrides, keyed by default name.
    pub fn with_names(mut self, names: BTreeMap<String, String>) -> Self {
        self.names = names;
        self
    }

    /// Directory searched first, if any
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Executable name for `tool`, honouring overrides.
    pub fn name_of(&self, tool: Tool) -> &str {
        self.names
            .get(tool.default_name())
            .map(String::as_str)
            .unwrap_or(tool.default_name())
    }

    /// Resolve `tool` to an existing executable.
    ///
    /// # Errors
    /// [`CtdError::NotFound`] with an installation hint if the executable
    /// is in none of the searched places.
    pub fn locate(&self, tool: Tool) -> Result<PathBuf> {
        let name = self.name_of(tool);

        let candidate = self
            .dir
            .as_ref()
            .map(|dir| dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX)));

        if let Some(candidate) = &candidate {
            if candidate.is_file() {
                return Ok(candidate.clone());
            }
        }

        if self.search_path {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        tracing::debug!(
            target: crate::logging::LOG_TARGET,
            tool = name,
            dir = ?self.dir,
            "Executable not found"
        );
        Err(CtdError::NotFound {
            path: candidate.unwrap_or_else(|| PathBuf::from(name)),
            hint: INSTALL_HINT.to_string(),
        })
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::discover()
    }
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
